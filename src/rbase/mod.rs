mod baseband;

pub mod builtin;
pub mod encode;

pub use baseband::{BasebandDecoder, BasebandEncoder, PhaseReference, SymbolMapping};
pub use encode::{decode_bits_to_text, encode_text_to_bits, parse_bit_literal};

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum BasebandError {
    #[error("Invalid symbol length (expected at least 1 sample per symbol, found {0})")]
    InvalidSymbolLength(usize),
    #[error("Unsupported symbol mapping {0:?} (expected one negative and one positive level)")]
    UnsupportedMapping(SymbolMapping),
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum BitLiteralError {
    #[error("Invalid character in bit literal (expected 0 or 1, found `{0}`)")]
    InvalidChar(char),
}
