/*
 * SPDX-FileCopyrightText: 2023 Tommaso Fontana
 * SPDX-FileCopyrightText: 2023 Inria
 * SPDX-FileCopyrightText: 2023 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! Elias γ code.
//!
//! The γ code of a natural number `n` is the concatenation of the unary
//! code of `l = ⌊log₂(n + 1)⌋` and the binary representation of `n + 1`
//! with the most significant bit removed, in `l` bits.

use super::{DecodeError, read_unary, write_unary};
use crate::bits::{BitOrder, BitStr};

/// Return the length of the γ code for `n`.
#[must_use]
#[inline]
pub fn len_gamma(n: u64) -> u64 {
    let v = n as u128 + 1;
    2 * v.ilog2() as u64 + 1
}

/// Write the γ code for `n` at the writing end of `bits`.
pub fn write_gamma(n: u64, bits: &mut BitStr, order: BitOrder) {
    let v = n as u128 + 1;
    let l = v.ilog2();
    write_unary(l as u64, bits, order);
    bits.write_fixed(v - (1 << l), l, order);
}

/// Decode one γ codeword from the reading end of `bits`.
pub fn read_gamma(bits: &mut BitStr, order: BitOrder) -> Result<u64, DecodeError> {
    let l = read_unary(bits, order)?;
    if l > 64 {
        // 2^l - 1 alone exceeds the u64 domain
        return Err(DecodeError::Overflow);
    }
    let f = bits.read_fixed(l as u32, order)?;
    u64::try_from(f + (1u128 << l) - 1).map_err(|_| DecodeError::Overflow)
}
