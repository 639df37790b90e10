/*
 * SPDX-FileCopyrightText: 2023 Tommaso Fontana
 * SPDX-FileCopyrightText: 2023 Inria
 * SPDX-FileCopyrightText: 2023 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! The table assembler.
//!
//! [`generate`] drives the reference codecs of [`crate::codes`] over the
//! two table domains: every `read_bits`-wide bit pattern for the read
//! tables, every value up to the write bound for the write and length
//! tables. Decode failures during read-domain enumeration are expected —
//! they become sentinel rows — while a misconfigured descriptor fails the
//! whole run before anything is produced.
//!
//! The computation is pure and deterministic: the same descriptor always
//! yields the same bundle, and bundles for different code families are
//! independent of one another.

use log::{debug, warn};

use super::{
    CodeDescriptor, DescriptorError, IntWidth, LenTable, ReadTable, TableBundle, TableData,
    TableLayout, WriteTable,
};
use crate::bits::{BitOrder, BitStr};
use crate::codes::Code;

/// Generate the full table bundle for a descriptor.
///
/// # Errors
///
/// Fails with a [`DescriptorError`] on a misconfigured descriptor; see
/// [`CodeDescriptor::validate`]. Decode failures on individual bit patterns
/// are not errors: they are folded into the sentinel length.
pub fn generate(descriptor: &CodeDescriptor) -> Result<TableBundle, DescriptorError> {
    descriptor.validate()?;
    if descriptor.len_max != descriptor.write_max {
        warn!(
            "{}: len_max ({}) diverges from write_max ({}); the length table will not cover all tabulated writes",
            descriptor.code, descriptor.len_max, descriptor.write_max
        );
    }

    let raw_m2l = read_pass(descriptor, BitOrder::M2L);
    let raw_l2m = read_pass(descriptor, BitOrder::L2M);

    // The sentinel must be distinct from every real length, so the length
    // column is sized for the maximum real length and, if that collides
    // with the width's top value, widened one step.
    let max_len = raw_m2l
        .iter()
        .chain(raw_l2m.iter())
        .filter_map(|&(_, len)| len)
        .max()
        .unwrap_or(0);
    let mut len_width = IntWidth::for_value(max_len as u128);
    if len_width.max_value() == max_len as u128 {
        len_width = len_width
            .wider()
            .ok_or(DescriptorError::SentinelUnrepresentable)?;
    }
    if len_width.max_value() > u64::MAX as u128 {
        return Err(DescriptorError::SentinelUnrepresentable);
    }
    let sentinel = len_width.max_value() as u64;

    let read_m2l = finish_read(raw_m2l, sentinel, len_width, descriptor.layout);
    let read_l2m = finish_read(raw_l2m, sentinel, len_width, descriptor.layout);

    let write_m2l = write_pass(descriptor, BitOrder::M2L)?;
    let write_l2m = write_pass(descriptor, BitOrder::L2M)?;

    let len = len_pass(descriptor);

    debug!(
        "{}: generated {} read and {} write entries per order, sentinel {}",
        descriptor.code,
        read_m2l.data.len(),
        write_m2l.data.len(),
        sentinel
    );

    Ok(TableBundle {
        descriptor: *descriptor,
        sentinel,
        read_m2l,
        read_l2m,
        write_m2l,
        write_l2m,
        len,
    })
}

/// Decode every `read_bits`-wide bit pattern under `order`.
///
/// Returns `(value, Some(consumed))` rows for patterns that start with a
/// complete codeword and `(0, None)` rows for the rest.
fn read_pass(descriptor: &CodeDescriptor, order: BitOrder) -> Vec<(u64, Option<u64>)> {
    let n = 1usize << descriptor.read_bits;
    let mut rows = Vec::with_capacity(n);
    for idx in 0..n as u64 {
        let mut bits = BitStr::from_pattern(idx, descriptor.read_bits);
        match descriptor.code.read(&mut bits, order) {
            Ok(value) => {
                let consumed = descriptor.read_bits as u64 - bits.len() as u64;
                rows.push((value, Some(consumed)));
            }
            Err(_) => rows.push((0, None)),
        }
    }
    rows
}

fn finish_read(
    rows: Vec<(u64, Option<u64>)>,
    sentinel: u64,
    len_width: IntWidth,
    layout: TableLayout,
) -> ReadTable {
    let value_width = IntWidth::for_value(
        rows.iter().map(|&(value, _)| value as u128).max().unwrap_or(0),
    );
    let (values, lens): (Vec<u64>, Vec<u64>) = rows
        .into_iter()
        .map(|(value, len)| (value, len.unwrap_or(sentinel)))
        .unzip();
    ReadTable {
        data: TableData::from_columns(values, lens, layout),
        value_width,
        len_width,
    }
}

/// Encode every value `0..=write_max` under `order`.
fn write_pass(descriptor: &CodeDescriptor, order: BitOrder) -> Result<WriteTable, DescriptorError> {
    let mut values = Vec::with_capacity(descriptor.write_max as usize + 1);
    let mut lens = Vec::with_capacity(descriptor.write_max as usize + 1);
    for v in 0..=descriptor.write_max {
        let mut bits = BitStr::new();
        descriptor.code.write(v, &mut bits, order);
        let len = bits.len() as u64;
        if len > 128 {
            return Err(DescriptorError::CodeTooLong { value: v, len });
        }
        debug_assert_eq!(len, descriptor.code.len(v));
        values.push(bits.value());
        lens.push(len);
    }
    let bits_width = IntWidth::for_value(values.iter().copied().max().unwrap_or(0));
    let len_width = IntWidth::for_value(lens.iter().copied().max().unwrap_or(0) as u128);
    Ok(WriteTable {
        data: TableData::from_columns(values, lens, descriptor.layout),
        bits_width,
        len_width,
    })
}

/// Tabulate codeword lengths for `0..=len_max`; order-invariant.
fn len_pass(descriptor: &CodeDescriptor) -> LenTable {
    let lens: Vec<u64> = (0..=descriptor.len_max)
        .map(|v| descriptor.code.len(v))
        .collect();
    let width = IntWidth::for_value(lens.iter().copied().max().unwrap_or(0) as u128);
    LenTable { lens, width }
}

/// The descriptors of the tables the consuming runtime ships by default.
pub fn default_descriptors() -> Vec<CodeDescriptor> {
    vec![
        CodeDescriptor::new(Code::Unary, 0, 0, TableLayout::Merged),
        CodeDescriptor::new(Code::Gamma, 9, 63, TableLayout::Merged),
        CodeDescriptor::new(Code::Delta, 0, 1023, TableLayout::Merged),
        CodeDescriptor::new(Code::Zeta { k: 3 }, 12, 1023, TableLayout::Merged),
    ]
}
