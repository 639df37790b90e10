/*
 * SPDX-FileCopyrightText: 2023 Tommaso Fontana
 * SPDX-FileCopyrightText: 2023 Inria
 * SPDX-FileCopyrightText: 2023 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

/*!

Reference implementations of the instantaneous codes the tables are
derived from.

Each code is a triple of pure functions — `len_*`, `write_*`, `read_*` —
operating on a [`BitStr`] under an explicit [`BitOrder`]. They are the
bit-level ground truth: slow, exact, and valid for every representable
value. Codewords are uniformly indexed from 0. For example, the first few
words of the unary, γ, and δ codes under [`M2L`](BitOrder::M2L) are:

| Arg |  unary   |    γ    |     δ    |
|-----|---------:|--------:|---------:|
| 0   |        1 |       1 |        1 |
| 1   |       01 |     010 |     0100 |
| 2   |      001 |     011 |     0101 |
| 3   |     0001 |   00100 |    01100 |
| 4   |    00001 |   00101 |    01101 |
| 5   |   000001 |   00110 |    01110 |

Reading can fail — with [`DecodeError::UnterminatedUnary`] when a unary run
has no terminator, with [`DecodeError::OutOfBits`] when a codeword is
truncated, or with [`DecodeError::Overflow`] when the codeword denotes a
value outside the `u64` domain. During table generation these failures are
expected: they mark bit patterns of the read domain that contain no
complete codeword and are folded into the sentinel length.

[`Code`] selects a tabulated code family dynamically, with the ζ bucket
exponent as its parameter.

*/

use crate::bits::{BitOrder, BitStr, OutOfBits};
use std::fmt;

pub mod unary;
pub use unary::{len_unary, read_unary, write_unary};

pub mod gamma;
pub use gamma::{len_gamma, read_gamma, write_gamma};

pub mod delta;
pub use delta::{len_delta, read_delta, write_delta};

pub mod minimal_binary;
pub use minimal_binary::{len_minimal_binary, read_minimal_binary, write_minimal_binary};

pub mod zeta;
pub use zeta::{len_zeta, read_zeta, write_zeta};

/// Error returned when a bit sequence does not contain a decodable
/// codeword.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum DecodeError {
    /// The codeword is truncated: the sequence ended mid-field.
    #[error(transparent)]
    OutOfBits(#[from] OutOfBits),
    /// A unary run consumed the whole sequence without finding its
    /// terminator.
    #[error("unary run ends without a terminator")]
    UnterminatedUnary,
    /// The codeword is well formed but denotes a value that does not fit
    /// in a `u64`.
    #[error("codeword decodes to a value outside the u64 domain")]
    Overflow,
}

/// A tabulated code family, with its parameters.
///
/// This is the dynamic selector the table assembler dispatches on. The
/// minimal binary code is not listed: it needs an upper bound per
/// invocation and appears only as the inner code of ζ.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Code {
    Unary,
    Gamma,
    Delta,
    Zeta { k: u64 },
}

impl Code {
    /// Return the length in bits of the codeword for `n`.
    #[must_use]
    pub fn len(&self, n: u64) -> u64 {
        match self {
            Code::Unary => len_unary(n),
            Code::Gamma => len_gamma(n),
            Code::Delta => len_delta(n),
            Code::Zeta { k } => len_zeta(n, *k),
        }
    }

    /// Write the codeword for `n` at the writing end of `bits`.
    pub fn write(&self, n: u64, bits: &mut BitStr, order: BitOrder) {
        match self {
            Code::Unary => write_unary(n, bits, order),
            Code::Gamma => write_gamma(n, bits, order),
            Code::Delta => write_delta(n, bits, order),
            Code::Zeta { k } => write_zeta(n, *k, bits, order),
        }
    }

    /// Decode one codeword from the reading end of `bits`.
    pub fn read(&self, bits: &mut BitStr, order: BitOrder) -> Result<u64, DecodeError> {
        match self {
            Code::Unary => read_unary(bits, order),
            Code::Gamma => read_gamma(bits, order),
            Code::Delta => read_delta(bits, order),
            Code::Zeta { k } => read_zeta(bits, *k, order),
        }
    }
}

impl fmt::Display for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Code::Unary => write!(f, "unary"),
            Code::Gamma => write!(f, "gamma"),
            Code::Delta => write!(f, "delta"),
            Code::Zeta { k } => write!(f, "zeta{}", k),
        }
    }
}
