/*
 * SPDX-FileCopyrightText: 2023 Tommaso Fontana
 * SPDX-FileCopyrightText: 2023 Inria
 * SPDX-FileCopyrightText: 2023 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! Minimal binary code (truncated binary encoding).
//!
//! A minimal binary code with upper bound `max > 0` is an optimal
//! prefix-free code for the alphabet `{0, …, max − 1}` under the uniform
//! distribution. With `l = ⌊log₂ max⌋` and `limit = 2^(l+1) − max`, the
//! first `limit` values take `l` bits and the remaining `max − limit`
//! values take `l + 1` bits.
//!
//! The long codeword for `n` is written as the top `l` bits of `n + limit`
//! followed by its final bit as a separate one-bit field; the split matters
//! under [`L2M`](BitOrder::L2M), where the reader peels the fields off the
//! tail in the same order.
//!
//! The domain is `u128` because ζ uses this code with bucket-sized bounds
//! that exceed `u64`.

use super::DecodeError;
use crate::bits::{BitOrder, BitStr};

#[inline(always)]
fn ensure_max(max: u128) {
    // the 2^(l+1) limit computation needs one spare bit
    assert!(max > 0 && max < 1 << 127, "max = {}", max);
}

/// Return the length of the minimal binary code for `n` with upper bound
/// `max`.
#[must_use]
#[inline]
pub fn len_minimal_binary(n: u128, max: u128) -> u64 {
    ensure_max(max);
    let l = max.ilog2();
    let limit = (1u128 << (l + 1)) - max;
    if n < limit { l as u64 } else { l as u64 + 1 }
}

/// Write the minimal binary code for `n` with upper bound `max` at the
/// writing end of `bits`.
///
/// With `max = 1` the alphabet is a singleton and the codeword is empty.
pub fn write_minimal_binary(n: u128, max: u128, bits: &mut BitStr, order: BitOrder) {
    ensure_max(max);
    debug_assert!(n < max, "{} < {}", n, max);
    let l = max.ilog2();
    let limit = (1u128 << (l + 1)) - max;

    if n < limit {
        bits.write_fixed(n, l, order);
    } else {
        let to_write = n + limit;
        bits.write_fixed(to_write >> 1, l, order);
        bits.write_fixed(to_write & 1, 1, order);
    }
}

/// Decode one minimal binary codeword with upper bound `max` from the
/// reading end of `bits`.
pub fn read_minimal_binary(max: u128, bits: &mut BitStr, order: BitOrder) -> Result<u128, DecodeError> {
    ensure_max(max);
    let l = max.ilog2();
    let limit = (1u128 << (l + 1)) - max;

    let prefix = bits.read_fixed(l, order)?;
    if prefix < limit {
        Ok(prefix)
    } else {
        let b = bits.read_fixed(1, order)?;
        Ok(((prefix << 1) | b) - limit)
    }
}
