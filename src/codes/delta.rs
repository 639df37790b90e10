/*
 * SPDX-FileCopyrightText: 2023 Tommaso Fontana
 * SPDX-FileCopyrightText: 2023 Inria
 * SPDX-FileCopyrightText: 2023 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! Elias δ code.
//!
//! The δ code of a natural number `n` is structurally the γ code with a
//! γ-coded exponent: `l = ⌊log₂(n + 1)⌋` is written as a γ codeword instead
//! of a unary one, followed by the `l` low bits of `n + 1`. The logarithmic
//! exponent field makes δ shorter than γ from `n = 31` on.

use super::{DecodeError, len_gamma, read_gamma, write_gamma};
use crate::bits::{BitOrder, BitStr};

/// Return the length of the δ code for `n`.
#[must_use]
#[inline]
pub fn len_delta(n: u64) -> u64 {
    let v = n as u128 + 1;
    let l = v.ilog2() as u64;
    l + len_gamma(l)
}

/// Write the δ code for `n` at the writing end of `bits`.
pub fn write_delta(n: u64, bits: &mut BitStr, order: BitOrder) {
    let v = n as u128 + 1;
    let l = v.ilog2();
    write_gamma(l as u64, bits, order);
    bits.write_fixed(v - (1 << l), l, order);
}

/// Decode one δ codeword from the reading end of `bits`.
pub fn read_delta(bits: &mut BitStr, order: BitOrder) -> Result<u64, DecodeError> {
    let l = read_gamma(bits, order)?;
    if l > 64 {
        return Err(DecodeError::Overflow);
    }
    let f = bits.read_fixed(l as u32, order)?;
    u64::try_from(f + (1u128 << l) - 1).map_err(|_| DecodeError::Overflow)
}
