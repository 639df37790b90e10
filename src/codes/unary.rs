/*
 * SPDX-FileCopyrightText: 2023 Tommaso Fontana
 * SPDX-FileCopyrightText: 2023 Inria
 * SPDX-FileCopyrightText: 2023 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! Unary code.
//!
//! The unary code of a natural number `n` is a run of `n` zeros followed by
//! a one. It is the base case every other code in this crate composes with:
//! γ uses it for the exponent, ζ for the bucket index.

use super::DecodeError;
use crate::bits::{BitOrder, BitStr};

/// Return the length of the unary code for `n`.
#[must_use]
#[inline]
pub fn len_unary(n: u64) -> u64 {
    n + 1
}

/// Write the unary code for `n` at the writing end of `bits`.
///
/// Total for every `n`: the table assembler, not the code, imposes a
/// practical bound on codeword length.
pub fn write_unary(n: u64, bits: &mut BitStr, order: BitOrder) {
    for _ in 0..n {
        bits.push_bit(false, order);
    }
    bits.push_bit(true, order);
}

/// Decode one unary codeword from the reading end of `bits`.
///
/// Fails with [`DecodeError::UnterminatedUnary`] if the run of zeros
/// consumes the whole sequence.
pub fn read_unary(bits: &mut BitStr, order: BitOrder) -> Result<u64, DecodeError> {
    let mut n = 0;
    loop {
        match bits.pop_bit(order) {
            Some(false) => n += 1,
            Some(true) => return Ok(n),
            None => return Err(DecodeError::UnterminatedUnary),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use BitOrder::{L2M, M2L};

    fn unary(n: u64, order: BitOrder) -> String {
        let mut bits = BitStr::new();
        write_unary(n, &mut bits, order);
        bits.to_string()
    }

    #[test]
    fn codewords() {
        assert_eq!(unary(0, M2L), "1");
        assert_eq!(unary(0, L2M), "1");
        assert_eq!(unary(1, M2L), "01");
        assert_eq!(unary(1, L2M), "10");
        assert_eq!(unary(2, M2L), "001");
        assert_eq!(unary(2, L2M), "100");
        assert_eq!(unary(3, M2L), "0001");
        assert_eq!(unary(3, L2M), "1000");
        assert_eq!(len_unary(3), 4);
    }

    #[test]
    fn unterminated() {
        for order in BitOrder::BOTH {
            let mut bits = BitStr::from_pattern(0, 4);
            assert_eq!(
                read_unary(&mut bits, order),
                Err(DecodeError::UnterminatedUnary)
            );
        }
    }
}
