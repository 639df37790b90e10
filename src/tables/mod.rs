/*
 * SPDX-FileCopyrightText: 2023 Tommaso Fontana
 * SPDX-FileCopyrightText: 2023 Inria
 * SPDX-FileCopyrightText: 2023 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

/*!

Table descriptors and the strongly-typed bundles the assembler produces.

A [`CodeDescriptor`] names a code family and the table sizing knobs; feeding
it to [`generate`] yields a [`TableBundle`] with, per
[traversal order](crate::bits::BitOrder):

- a [`ReadTable`] mapping every `read_bits`-wide bit pattern to the value it
  decodes to and the number of bits the codeword occupies, with undecodable
  patterns carrying the bundle's sentinel length;
- a [`WriteTable`] mapping every value `0..=write_max` to its codeword (as
  an integer) and length;

plus one order-independent [`LenTable`] over `0..=len_max` for the
skip-only fast path. Each column records the narrowest standard unsigned
width ([`IntWidth`]) that holds its data, so the external renderer can emit
arrays of the smallest possible element type.

Invalid descriptors are configuration errors: they are reported as
[`DescriptorError`] before any table is produced, never clamped.

*/

use crate::bits::BitOrder;
use crate::codes::Code;

pub mod build;
pub use build::{default_descriptors, generate};

/// Maximum supported read-domain width: read tables have `2^read_bits`
/// entries, so wider domains are rejected as misconfigurations.
pub const MAX_READ_BITS: u32 = 32;

/// Error returned by [`generate`] on a misconfigured descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum DescriptorError {
    /// `read_bits` exceeds [`MAX_READ_BITS`].
    #[error("read tables indexed by more than {max} bits are not supported (got {read_bits})", max = MAX_READ_BITS)]
    ReadBitsTooLarge { read_bits: u32 },
    /// ζ needs a bucket exponent in `1..=63`.
    #[error("zeta bucket exponent k must be in 1..=63 (got {k})")]
    InvalidZetaK { k: u64 },
    /// A tabulated codeword does not fit the widest table element.
    #[error("the codeword for {value} is {len} bits long and does not fit a 128-bit table element")]
    CodeTooLong { value: u64, len: u64 },
    /// No standard width holds both the maximum code length and a distinct
    /// sentinel.
    #[error("no integer width can hold both the maximum code length and a sentinel")]
    SentinelUnrepresentable,
}

/// The standard unsigned integer widths table elements can take.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum IntWidth {
    U8,
    U16,
    U32,
    U64,
    U128,
}

impl IntWidth {
    /// The width in bits.
    pub const fn bits(self) -> u32 {
        match self {
            IntWidth::U8 => 8,
            IntWidth::U16 => 16,
            IntWidth::U32 => 32,
            IntWidth::U64 => 64,
            IntWidth::U128 => 128,
        }
    }

    /// The largest value this width can hold.
    pub const fn max_value(self) -> u128 {
        match self {
            IntWidth::U8 => u8::MAX as u128,
            IntWidth::U16 => u16::MAX as u128,
            IntWidth::U32 => u32::MAX as u128,
            IntWidth::U64 => u64::MAX as u128,
            IntWidth::U128 => u128::MAX,
        }
    }

    /// The smallest width that holds `max`.
    #[must_use]
    pub fn for_value(max: u128) -> Self {
        match max {
            _ if max <= u8::MAX as u128 => IntWidth::U8,
            _ if max <= u16::MAX as u128 => IntWidth::U16,
            _ if max <= u32::MAX as u128 => IntWidth::U32,
            _ if max <= u64::MAX as u128 => IntWidth::U64,
            _ => IntWidth::U128,
        }
    }

    /// The next width up, if any.
    pub const fn wider(self) -> Option<Self> {
        match self {
            IntWidth::U8 => Some(IntWidth::U16),
            IntWidth::U16 => Some(IntWidth::U32),
            IntWidth::U32 => Some(IntWidth::U64),
            IntWidth::U64 => Some(IntWidth::U128),
            IntWidth::U128 => None,
        }
    }

    /// The Rust type name, for the renderer.
    pub const fn rust_name(self) -> &'static str {
        match self {
            IntWidth::U8 => "u8",
            IntWidth::U16 => "u16",
            IntWidth::U32 => "u32",
            IntWidth::U64 => "u64",
            IntWidth::U128 => "u128",
        }
    }
}

/// Whether a table stores (value, length) pairs in one array or in two
/// parallel arrays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TableLayout {
    Merged,
    Split,
}

/// Everything needed to generate the tables of one code family.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CodeDescriptor {
    /// The code family to tabulate.
    pub code: Code,
    /// Read tables are indexed by every `read_bits`-wide bit pattern.
    pub read_bits: u32,
    /// Write tables cover the values `0..=write_max`.
    pub write_max: u64,
    /// The length table covers the values `0..=len_max`. Usually equal to
    /// `write_max`; divergence is legal but flagged with a warning, since a
    /// shorter length table does not cover all tabulated writes.
    pub len_max: u64,
    /// Merged pairs or split parallel arrays.
    pub layout: TableLayout,
}

impl CodeDescriptor {
    /// A descriptor with `len_max` equal to `write_max`.
    pub fn new(code: Code, read_bits: u32, write_max: u64, layout: TableLayout) -> Self {
        Self {
            code,
            read_bits,
            write_max,
            len_max: write_max,
            layout,
        }
    }

    /// Override the length-table bound.
    #[must_use]
    pub fn with_len_max(mut self, len_max: u64) -> Self {
        self.len_max = len_max;
        self
    }

    /// Reject misconfigured descriptors.
    ///
    /// Called by [`generate`] before any table is computed; failures here
    /// are deterministic and will recur on every attempt with the same
    /// descriptor.
    pub fn validate(&self) -> Result<(), DescriptorError> {
        if self.read_bits > MAX_READ_BITS {
            return Err(DescriptorError::ReadBitsTooLarge {
                read_bits: self.read_bits,
            });
        }
        if let Code::Zeta { k } = self.code {
            if !(1..=63).contains(&k) {
                return Err(DescriptorError::InvalidZetaK { k });
            }
        }
        // Code lengths are nondecreasing for every tabulated family, so the
        // write bound carries the longest codeword. Unary is computed
        // saturating: its length counter itself overflows at u64::MAX.
        let max_len = match self.code {
            Code::Unary => self.write_max.saturating_add(1),
            code => code.len(self.write_max),
        };
        if max_len > 128 {
            return Err(DescriptorError::CodeTooLong {
                value: self.write_max,
                len: max_len,
            });
        }
        Ok(())
    }
}

/// Column storage for a table: one array of pairs or two parallel arrays.
///
/// Both shapes expose the same `(value, length)` view through
/// [`pair`](TableData::pair); the layout only affects what the renderer
/// emits.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TableData<V> {
    Merged(Vec<(V, u64)>),
    Split { values: Vec<V>, lens: Vec<u64> },
}

impl<V: Copy> TableData<V> {
    pub(crate) fn from_columns(values: Vec<V>, lens: Vec<u64>, layout: TableLayout) -> Self {
        debug_assert_eq!(values.len(), lens.len());
        match layout {
            TableLayout::Merged => TableData::Merged(values.into_iter().zip(lens).collect()),
            TableLayout::Split => TableData::Split { values, lens },
        }
    }

    /// The number of rows.
    pub fn len(&self) -> usize {
        match self {
            TableData::Merged(pairs) => pairs.len(),
            TableData::Split { values, .. } => values.len(),
        }
    }

    /// Whether the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The layout this data is stored in.
    pub fn layout(&self) -> TableLayout {
        match self {
            TableData::Merged(_) => TableLayout::Merged,
            TableData::Split { .. } => TableLayout::Split,
        }
    }

    /// The `(value, length)` row at `idx`, regardless of layout.
    pub fn pair(&self, idx: usize) -> Option<(V, u64)> {
        match self {
            TableData::Merged(pairs) => pairs.get(idx).copied(),
            TableData::Split { values, lens } => {
                Some((*values.get(idx)?, *lens.get(idx)?))
            }
        }
    }
}

/// A decoding table: for every `read_bits`-wide pattern, the decoded value
/// and the consumed length, or the sentinel length when no codeword fits.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ReadTable {
    pub data: TableData<u64>,
    /// Narrowest width holding every decoded value.
    pub value_width: IntWidth,
    /// Narrowest width holding every length, sentinel included.
    pub len_width: IntWidth,
}

/// An encoding table: for every value up to the write bound, the codeword
/// bits (most significant bit first) and its length.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WriteTable {
    pub data: TableData<u128>,
    /// Narrowest width holding every codeword's bits.
    pub bits_width: IntWidth,
    /// Narrowest width holding every codeword length.
    pub len_width: IntWidth,
}

/// A length-only table over `0..=len_max`, shared by both traversal orders
/// (codeword lengths are order-invariant).
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LenTable {
    pub lens: Vec<u64>,
    pub width: IntWidth,
}

/// The complete output of one generator run: all tables of one code family,
/// for both traversal orders.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TableBundle {
    /// The descriptor this bundle was generated from.
    pub descriptor: CodeDescriptor,
    /// The out-of-band length marking read-table rows with no decodable
    /// codeword: the maximum value of the length column's width, strictly
    /// above every real length.
    pub sentinel: u64,
    pub read_m2l: ReadTable,
    pub read_l2m: ReadTable,
    pub write_m2l: WriteTable,
    pub write_l2m: WriteTable,
    pub len: LenTable,
}

impl TableBundle {
    /// The read table for `order`.
    pub fn read(&self, order: BitOrder) -> &ReadTable {
        match order {
            BitOrder::M2L => &self.read_m2l,
            BitOrder::L2M => &self.read_l2m,
        }
    }

    /// The write table for `order`.
    pub fn write(&self, order: BitOrder) -> &WriteTable {
        match order {
            BitOrder::M2L => &self.write_m2l,
            BitOrder::L2M => &self.write_l2m,
        }
    }
}
