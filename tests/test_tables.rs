/*
 * SPDX-FileCopyrightText: 2023 Tommaso Fontana
 * SPDX-FileCopyrightText: 2023 Inria
 * SPDX-FileCopyrightText: 2023 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use code_tables::prelude::*;

/// Check a bundle's read tables against direct decoding of every pattern:
/// sentinel rows exactly where decoding fails, matching value and consumed
/// length everywhere else.
fn assert_read_tables_sound(bundle: &TableBundle) {
    let descriptor = &bundle.descriptor;
    for order in BitOrder::BOTH {
        let table = bundle.read(order);
        assert_eq!(table.data.len(), 1 << descriptor.read_bits);
        for idx in 0..1u64 << descriptor.read_bits {
            let (value, len) = table.data.pair(idx as usize).unwrap();
            let mut bits = BitStr::from_pattern(idx, descriptor.read_bits);
            match descriptor.code.read(&mut bits, order) {
                Ok(decoded) => {
                    assert_ne!(len, bundle.sentinel, "{}: pattern {:b} wrongly marked missing", order, idx);
                    assert_eq!(value, decoded);
                    assert_eq!(len, descriptor.read_bits as u64 - bits.len() as u64);
                }
                Err(_) => {
                    assert_eq!(len, bundle.sentinel, "{}: pattern {:b} wrongly marked decodable", order, idx);
                    assert_eq!(value, 0);
                }
            }
        }
    }
}

/// Check a bundle's write tables against direct encoding of every value.
fn assert_write_tables_sound(bundle: &TableBundle) {
    let descriptor = &bundle.descriptor;
    for order in BitOrder::BOTH {
        let table = bundle.write(order);
        assert_eq!(table.data.len() as u64, descriptor.write_max + 1);
        for v in 0..=descriptor.write_max {
            let (pattern, len) = table.data.pair(v as usize).unwrap();
            let mut bits = BitStr::new();
            descriptor.code.write(v, &mut bits, order);
            assert_eq!(pattern, bits.value());
            assert_eq!(len, bits.len() as u64);
            assert_eq!(len, descriptor.code.len(v));
        }
    }
}

/// Check that a column's recorded width is the narrowest that holds it.
fn assert_width_minimal(width: IntWidth, column_max: u128) {
    assert!(width.max_value() >= column_max);
    if let Some(narrower) = match width {
        IntWidth::U8 => None,
        IntWidth::U16 => Some(IntWidth::U8),
        IntWidth::U32 => Some(IntWidth::U16),
        IntWidth::U64 => Some(IntWidth::U32),
        IntWidth::U128 => Some(IntWidth::U64),
    } {
        assert!(narrower.max_value() < column_max, "width {:?} not minimal for {}", width, column_max);
    }
}

fn column_maxes(bundle: &TableBundle) {
    for order in BitOrder::BOTH {
        let read = bundle.read(order);
        let mut max_value = 0u128;
        let mut max_len = 0u64;
        for idx in 0..read.data.len() {
            let (value, len) = read.data.pair(idx).unwrap();
            max_value = max_value.max(value as u128);
            max_len = max_len.max(len);
        }
        assert_width_minimal(read.value_width, max_value);
        // the sentinel is the top of the length column's width
        assert_eq!(read.len_width.max_value(), bundle.sentinel as u128);
        assert!(max_len <= bundle.sentinel);

        let write = bundle.write(order);
        let mut max_bits = 0u128;
        let mut max_wlen = 0u64;
        for idx in 0..write.data.len() {
            let (bits, len) = write.data.pair(idx).unwrap();
            max_bits = max_bits.max(bits);
            max_wlen = max_wlen.max(len);
        }
        assert_width_minimal(write.bits_width, max_bits);
        assert_width_minimal(write.len_width, max_wlen as u128);
    }
    let max_len = bundle.len.lens.iter().copied().max().unwrap_or(0);
    assert_width_minimal(bundle.len.width, max_len as u128);
}

#[test]
fn gamma_bundle() {
    let descriptor = CodeDescriptor::new(Code::Gamma, 9, 63, TableLayout::Merged);
    let bundle = generate(&descriptor).unwrap();

    assert_read_tables_sound(&bundle);
    assert_write_tables_sound(&bundle);
    column_maxes(&bundle);

    // lengths are order-invariant and tabulated once
    assert_eq!(bundle.len.lens.len() as u64, descriptor.len_max + 1);
    for (v, &len) in bundle.len.lens.iter().enumerate() {
        assert_eq!(len, len_gamma(v as u64));
    }

    // the all-zero pattern holds no complete codeword
    let (_, len) = bundle.read(BitOrder::M2L).data.pair(0).unwrap();
    assert_eq!(len, bundle.sentinel);

    // "100000000" starts with the one-bit codeword for 0
    let (value, len) = bundle.read(BitOrder::M2L).data.pair(0b100000000).unwrap();
    assert_eq!((value, len), (0, 1));
    // under L2M the same codeword sits at the other end
    let (value, len) = bundle.read(BitOrder::L2M).data.pair(0b000000001).unwrap();
    assert_eq!((value, len), (0, 1));
}

#[test]
fn zeta3_bundle_split() {
    let descriptor = CodeDescriptor::new(Code::Zeta { k: 3 }, 12, 1023, TableLayout::Split);
    let bundle = generate(&descriptor).unwrap();

    assert_eq!(bundle.read(BitOrder::M2L).data.layout(), TableLayout::Split);
    assert_read_tables_sound(&bundle);
    assert_write_tables_sound(&bundle);
    column_maxes(&bundle);
}

#[test]
fn layouts_hold_identical_rows() {
    let merged = generate(&CodeDescriptor::new(Code::Zeta { k: 3 }, 10, 255, TableLayout::Merged)).unwrap();
    let split = generate(&CodeDescriptor::new(Code::Zeta { k: 3 }, 10, 255, TableLayout::Split)).unwrap();

    assert_eq!(merged.sentinel, split.sentinel);
    for order in BitOrder::BOTH {
        let (m, s) = (merged.read(order), split.read(order));
        assert_eq!(m.data.len(), s.data.len());
        for idx in 0..m.data.len() {
            assert_eq!(m.data.pair(idx), s.data.pair(idx));
        }
        let (m, s) = (merged.write(order), split.write(order));
        for idx in 0..m.data.len() {
            assert_eq!(m.data.pair(idx), s.data.pair(idx));
        }
    }
}

#[test]
fn unary_read_table_has_single_missing_row() {
    // every pattern with at least one set bit starts with a unary codeword;
    // only the all-zero pattern is missing
    let bundle = generate(&CodeDescriptor::new(Code::Unary, 4, 15, TableLayout::Merged)).unwrap();
    for order in BitOrder::BOTH {
        let table = bundle.read(order);
        let missing = (0..table.data.len())
            .filter(|&idx| table.data.pair(idx).unwrap().1 == bundle.sentinel)
            .count();
        assert_eq!(missing, 1);
        assert_eq!(table.data.pair(0).unwrap().1, bundle.sentinel);
    }
}

#[test]
fn narrow_read_domain_yields_sentinels() {
    // gamma needs up to 13 bits for values up to 63: a 3-bit read domain
    // must leave undecodable patterns
    let bundle = generate(&CodeDescriptor::new(Code::Gamma, 3, 63, TableLayout::Merged)).unwrap();
    for order in BitOrder::BOTH {
        let table = bundle.read(order);
        assert!(
            (0..table.data.len())
                .any(|idx| table.data.pair(idx).unwrap().1 == bundle.sentinel)
        );
    }
    assert_read_tables_sound(&bundle);
}

#[test]
fn empty_read_domain() {
    // read_bits = 0: a single empty pattern, necessarily a sentinel row
    let bundle = generate(&CodeDescriptor::new(Code::Delta, 0, 1023, TableLayout::Merged)).unwrap();
    for order in BitOrder::BOTH {
        let table = bundle.read(order);
        assert_eq!(table.data.len(), 1);
        assert_eq!(table.data.pair(0).unwrap().1, bundle.sentinel);
    }
    assert_write_tables_sound(&bundle);
}

#[test]
fn sentinel_above_every_real_length() {
    for descriptor in default_descriptors() {
        let bundle = generate(&descriptor).unwrap();
        for order in BitOrder::BOTH {
            let table = bundle.read(order);
            for idx in 0..table.data.len() {
                let (_, len) = table.data.pair(idx).unwrap();
                assert!(len == bundle.sentinel || len < bundle.sentinel);
                if len != bundle.sentinel {
                    assert!(len <= descriptor.read_bits as u64);
                }
            }
        }
    }
}

#[test]
fn default_descriptors_generate() {
    let bundles: Vec<_> = default_descriptors()
        .iter()
        .map(|d| generate(d).unwrap())
        .collect();
    assert_eq!(bundles.len(), 4);
    // regeneration is idempotent
    for bundle in &bundles {
        assert_eq!(&generate(&bundle.descriptor).unwrap(), bundle);
    }
}

#[test]
fn diverging_len_bound_is_generated_with_warning() {
    let descriptor =
        CodeDescriptor::new(Code::Gamma, 4, 255, TableLayout::Merged).with_len_max(63);
    let bundle = generate(&descriptor).unwrap();
    assert_eq!(bundle.len.lens.len(), 64);
    assert_eq!(bundle.write(BitOrder::M2L).data.len(), 256);
}

#[test]
fn invalid_descriptors_fail_fast() {
    assert_eq!(
        generate(&CodeDescriptor::new(Code::Gamma, 33, 63, TableLayout::Merged)),
        Err(DescriptorError::ReadBitsTooLarge { read_bits: 33 })
    );
    assert_eq!(
        generate(&CodeDescriptor::new(Code::Zeta { k: 0 }, 8, 63, TableLayout::Merged)),
        Err(DescriptorError::InvalidZetaK { k: 0 })
    );
    assert_eq!(
        generate(&CodeDescriptor::new(Code::Zeta { k: 64 }, 8, 63, TableLayout::Merged)),
        Err(DescriptorError::InvalidZetaK { k: 64 })
    );
    // unary codewords grow linearly: 200 needs 201 bits
    assert_eq!(
        generate(&CodeDescriptor::new(Code::Unary, 4, 200, TableLayout::Merged)),
        Err(DescriptorError::CodeTooLong { value: 200, len: 201 })
    );
}

#[cfg(feature = "serde")]
#[test]
fn bundle_serde_round_trip() {
    let bundle =
        generate(&CodeDescriptor::new(Code::Zeta { k: 3 }, 8, 127, TableLayout::Split)).unwrap();
    let json = serde_json::to_string(&bundle).unwrap();
    let back: TableBundle = serde_json::from_str(&json).unwrap();
    assert_eq!(bundle, back);
}
