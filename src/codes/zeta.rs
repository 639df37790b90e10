/*
 * SPDX-FileCopyrightText: 2023 Tommaso Fontana
 * SPDX-FileCopyrightText: 2023 Inria
 * SPDX-FileCopyrightText: 2023 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! ζ code.
//!
//! The ζ code with bucket exponent `k ≥ 1` groups the naturals into buckets
//! `[2^(hk) − 1, 2^((h+1)k) − 1)` of geometrically growing width: `h` is
//! written in unary, followed by the offset of `n + 1` within the bucket as
//! a minimal binary codeword with upper bound `2^((h+1)k) − 2^(hk)`.
//!
//! ζ₁ coincides with γ; larger `k` trades longer codewords for small values
//! against shorter ones for large values.
//!
//! `k` is bounded to `1..=63` so that the bucket bounds of every `u64`
//! value fit in the `u128` arithmetic used here.

use super::{DecodeError, len_minimal_binary, len_unary, read_minimal_binary, read_unary};
use super::{write_minimal_binary, write_unary};
use crate::bits::{BitOrder, BitStr};

#[inline(always)]
fn ensure_k(k: u64) {
    assert!((1..=63).contains(&k), "k = {}", k);
}

/// Return the length of the ζ code with bucket exponent `k` for `n`.
#[must_use]
#[inline]
pub fn len_zeta(n: u64, k: u64) -> u64 {
    ensure_k(k);
    let v = n as u128 + 1;
    let h = v.ilog2() as u64 / k;
    let u = 1u128 << ((h + 1) * k);
    let l = 1u128 << (h * k);
    len_unary(h) + len_minimal_binary(v - l, u - l)
}

/// Write the ζ code with bucket exponent `k` for `n` at the writing end of
/// `bits`.
pub fn write_zeta(n: u64, k: u64, bits: &mut BitStr, order: BitOrder) {
    ensure_k(k);
    let v = n as u128 + 1;
    let h = v.ilog2() as u64 / k;
    let u = 1u128 << ((h + 1) * k);
    let l = 1u128 << (h * k);

    debug_assert!(l <= v, "{} <= {}", l, v);
    debug_assert!(v < u, "{} < {}", v, u);

    write_unary(h, bits, order);
    write_minimal_binary(v - l, u - l, bits, order);
}

/// Decode one ζ codeword with bucket exponent `k` from the reading end of
/// `bits`.
pub fn read_zeta(bits: &mut BitStr, k: u64, order: BitOrder) -> Result<u64, DecodeError> {
    ensure_k(k);
    let h = read_unary(bits, order)?;
    if h.saturating_add(1).saturating_mul(k) > 127 {
        // the bucket holds no u64 value
        return Err(DecodeError::Overflow);
    }
    let u = 1u128 << ((h + 1) * k);
    let l = 1u128 << (h * k);
    let r = read_minimal_binary(u - l, bits, order)?;
    u64::try_from(l + r - 1).map_err(|_| DecodeError::Overflow)
}
