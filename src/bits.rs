/*
 * SPDX-FileCopyrightText: 2023 Tommaso Fontana
 * SPDX-FileCopyrightText: 2023 Inria
 * SPDX-FileCopyrightText: 2023 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! Order-aware bit sequences.
//!
//! Table generation needs an exact, bit-by-bit model of a stream, not a fast
//! one: [`BitStr`] is a growable sequence of bits in which index 0 is the most
//! significant position, and every read and write is parameterized by a
//! [`BitOrder`] that selects which end of the sequence is the "front" of the
//! stream.
//!
//! Under [`M2L`](BitOrder::M2L) writers append at the least significant end
//! and readers consume from the most significant end; under
//! [`L2M`](BitOrder::L2M) the two ends are swapped. Writing a codeword and
//! then reading it back under the same order always yields the original
//! value and consumes exactly the bits that were written.

use std::collections::VecDeque;
use std::fmt;
use std::str::FromStr;

/// The two bit-traversal conventions.
///
/// These correspond to the big-endian and little-endian bit streams of the
/// consuming runtime: `M2L` reads bits from the most significant to the
/// least significant position, `L2M` the other way around.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BitOrder {
    /// Most-significant-to-least: read from the head of the sequence,
    /// append at the tail.
    M2L,
    /// Least-significant-to-most: read from the tail of the sequence,
    /// prepend at the head.
    L2M,
}

impl BitOrder {
    /// Both traversal orders, in the order tables are generated.
    pub const BOTH: [BitOrder; 2] = [BitOrder::M2L, BitOrder::L2M];
}

impl fmt::Display for BitOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BitOrder::M2L => write!(f, "M2L"),
            BitOrder::L2M => write!(f, "L2M"),
        }
    }
}

/// Error returned by [`BitStr::read_fixed`] when fewer bits remain than
/// were requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("not enough bits left in the sequence")]
pub struct OutOfBits;

/// Error returned when parsing a [`BitStr`] from a string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("bit strings may contain only '0' and '1'")]
pub struct ParseBitStrError;

/// A growable sequence of bits; index 0 is the most significant position.
///
/// The [`Display`](fmt::Display) and [`FromStr`] implementations use the
/// `"0"`/`"1"` notation with the most significant bit first, so codewords
/// print exactly as they appear in the literature.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BitStr {
    bits: VecDeque<bool>,
}

impl BitStr {
    /// Create an empty sequence.
    pub fn new() -> Self {
        Self::default()
    }

    /// The number of bits in the sequence.
    pub fn len(&self) -> usize {
        self.bits.len()
    }

    /// Whether the sequence contains no bits.
    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    /// The `width`-bit big-endian rendering of `pattern`.
    ///
    /// This is how the read-domain of a table is enumerated: every index
    /// `0 ≤ i < 2^width` becomes the candidate bit pattern to decode.
    pub fn from_pattern(pattern: u64, width: u32) -> Self {
        debug_assert!(width <= 64);
        debug_assert!(width == 64 || pattern < 1 << width);
        let mut bits = VecDeque::with_capacity(width as usize);
        for j in (0..width).rev() {
            bits.push_back((pattern >> j) & 1 != 0);
        }
        Self { bits }
    }

    /// The whole sequence as an unsigned integer, most significant bit
    /// first.
    ///
    /// Sequences longer than 128 bits cannot be represented; callers check
    /// the length first.
    pub fn value(&self) -> u128 {
        debug_assert!(self.len() <= 128);
        self.bits.iter().fold(0, |v, &b| (v << 1) | b as u128)
    }

    /// Append one bit at the writing end of the sequence.
    pub fn push_bit(&mut self, bit: bool, order: BitOrder) {
        match order {
            BitOrder::M2L => self.bits.push_back(bit),
            BitOrder::L2M => self.bits.push_front(bit),
        }
    }

    /// Remove and return one bit from the reading end of the sequence.
    pub fn pop_bit(&mut self, order: BitOrder) -> Option<bool> {
        match order {
            BitOrder::M2L => self.bits.pop_front(),
            BitOrder::L2M => self.bits.pop_back(),
        }
    }

    /// Write the `n_bits`-wide zero-padded binary representation of `value`
    /// at the writing end of the sequence.
    ///
    /// The written block keeps its most significant bit first under both
    /// orders; only the end of the sequence it lands on changes. Writing
    /// zero bits is a no-op.
    pub fn write_fixed(&mut self, value: u128, n_bits: u32, order: BitOrder) {
        debug_assert!(n_bits <= 128);
        debug_assert!(n_bits == 128 || value < 1 << n_bits);
        match order {
            BitOrder::M2L => {
                for j in (0..n_bits).rev() {
                    self.bits.push_back((value >> j) & 1 != 0);
                }
            }
            BitOrder::L2M => {
                for j in 0..n_bits {
                    self.bits.push_front((value >> j) & 1 != 0);
                }
            }
        }
    }

    /// Consume `n_bits` from the reading end of the sequence and return the
    /// unsigned integer they form.
    ///
    /// Fails with [`OutOfBits`] if fewer than `n_bits` bits remain; in that
    /// case the sequence is left untouched.
    pub fn read_fixed(&mut self, n_bits: u32, order: BitOrder) -> Result<u128, OutOfBits> {
        debug_assert!(n_bits <= 128);
        if n_bits as usize > self.len() {
            return Err(OutOfBits);
        }
        let mut v = 0;
        match order {
            BitOrder::M2L => {
                for _ in 0..n_bits {
                    // checked above
                    let bit = self.bits.pop_front().ok_or(OutOfBits)?;
                    v = (v << 1) | bit as u128;
                }
            }
            BitOrder::L2M => {
                for j in 0..n_bits {
                    let bit = self.bits.pop_back().ok_or(OutOfBits)?;
                    v |= (bit as u128) << j;
                }
            }
        }
        Ok(v)
    }
}

impl fmt::Display for BitStr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &bit in &self.bits {
            write!(f, "{}", bit as u8)?;
        }
        Ok(())
    }
}

impl FromStr for BitStr {
    type Err = ParseBitStrError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut bits = VecDeque::with_capacity(s.len());
        for c in s.chars() {
            match c {
                '0' => bits.push_back(false),
                '1' => bits.push_back(true),
                _ => return Err(ParseBitStrError),
            }
        }
        Ok(Self { bits })
    }
}
