/*
 * SPDX-FileCopyrightText: 2023 Tommaso Fontana
 * SPDX-FileCopyrightText: 2023 Inria
 * SPDX-FileCopyrightText: 2023 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! Self-consistency oracles for the reference codecs.
//!
//! Tables are only as correct as the codecs they are derived from, so the
//! codecs carry their own verifiable properties: encoding any value and
//! decoding it back under the same traversal order must reproduce the
//! value, must emit exactly as many bits as the length function reports,
//! and must leave nothing behind. These checks are not on the production
//! path; tests drive them over representative ranges.

use crate::bits::{BitOrder, BitStr};
use crate::codes::{
    Code, DecodeError, len_minimal_binary, read_minimal_binary, write_minimal_binary,
};

/// A violated codec property, with enough context to reproduce it.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CheckError {
    #[error("{code} under {order}: {value} decodes back to {decoded}")]
    RoundTrip {
        code: String,
        order: BitOrder,
        value: u128,
        decoded: u128,
    },
    #[error("{code} under {order}: encoded {value} in {emitted} bits but the length function reports {reported}")]
    LenMismatch {
        code: String,
        order: BitOrder,
        value: u128,
        emitted: u64,
        reported: u64,
    },
    #[error("{code} under {order}: decoding {value} left {left} bits unconsumed")]
    TrailingBits {
        code: String,
        order: BitOrder,
        value: u128,
        left: u64,
    },
    #[error("{code} under {order}: decoding {value} failed: {source}")]
    Decode {
        code: String,
        order: BitOrder,
        value: u128,
        source: DecodeError,
    },
}

/// Check round-trip, length agreement, and full consumption for every value
/// `0..=max` under both traversal orders.
pub fn check_code(code: Code, max: u64) -> Result<(), CheckError> {
    for order in BitOrder::BOTH {
        for value in 0..=max {
            check_one(code, value, order)?;
        }
    }
    Ok(())
}

/// Check a single value under a single order; useful for spot checks on
/// values far outside an enumerable range.
pub fn check_one(code: Code, value: u64, order: BitOrder) -> Result<(), CheckError> {
    let mut bits = BitStr::new();
    code.write(value, &mut bits, order);

    let emitted = bits.len() as u64;
    let reported = code.len(value);
    if emitted != reported {
        return Err(CheckError::LenMismatch {
            code: code.to_string(),
            order,
            value: value as u128,
            emitted,
            reported,
        });
    }

    let decoded = code.read(&mut bits, order).map_err(|source| CheckError::Decode {
        code: code.to_string(),
        order,
        value: value as u128,
        source,
    })?;
    if !bits.is_empty() {
        return Err(CheckError::TrailingBits {
            code: code.to_string(),
            order,
            value: value as u128,
            left: bits.len() as u64,
        });
    }
    if decoded != value {
        return Err(CheckError::RoundTrip {
            code: code.to_string(),
            order,
            value: value as u128,
            decoded: decoded as u128,
        });
    }
    Ok(())
}

/// Check the minimal binary code over its whole alphabet `[0, max)` under
/// both traversal orders.
pub fn check_minimal_binary(max: u128) -> Result<(), CheckError> {
    let name = format!("minimal_binary(max={})", max);
    for order in BitOrder::BOTH {
        for value in 0..max {
            let mut bits = BitStr::new();
            write_minimal_binary(value, max, &mut bits, order);

            let emitted = bits.len() as u64;
            let reported = len_minimal_binary(value, max);
            if emitted != reported {
                return Err(CheckError::LenMismatch {
                    code: name.clone(),
                    order,
                    value,
                    emitted,
                    reported,
                });
            }

            let decoded =
                read_minimal_binary(max, &mut bits, order).map_err(|source| CheckError::Decode {
                    code: name.clone(),
                    order,
                    value,
                    source,
                })?;
            if !bits.is_empty() {
                return Err(CheckError::TrailingBits {
                    code: name.clone(),
                    order,
                    value,
                    left: bits.len() as u64,
                });
            }
            if decoded != value {
                return Err(CheckError::RoundTrip {
                    code: name.clone(),
                    order,
                    value,
                    decoded,
                });
            }
        }
    }
    Ok(())
}
