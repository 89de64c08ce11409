//! RLP (Recursive Length Prefix) codec.
//!
//! Encodes nested byte strings and lists into Ethereum's self-describing
//! length-prefixed wire format, and decodes that format back into
//! [`RlpItem`]s.

mod decode;
mod encode;
mod value;


use thiserror::Error;

pub use decode::{decode, decode_exact, Decoded, Header};
pub use encode::{encode, encoded_len, RlpEncoder};
pub use value::{RlpItem, RlpValue};

/// Prefix of an empty byte string (and of `Null`).
pub const EMPTY_STRING_CODE: u8 = 0x80;
/// Prefix of an empty list.
pub const EMPTY_LIST_CODE: u8 = 0xc0;
/// Longest payload that still uses the single-byte short-form prefix.
pub const MAX_SHORT_LEN: usize = 55;
/// Deepest list nesting the decoder accepts.
pub const MAX_DEPTH: usize = 1024;

/// Codec errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RlpError {
    #[error("invalid input: {0}")]
    InvalidInput(#[from] InvalidInput),
    #[error("malformed input: {0}")]
    MalformedInput(#[from] MalformedInput),
}

/// A caller-supplied value that is outside the codec's domain.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InvalidInput {
    #[error("negative integer {0} cannot be encoded")]
    NegativeInteger(i128),
    #[error("invalid hex digit {digit:?} at position {position}")]
    InvalidHexDigit { digit: char, position: usize },
    #[error("invalid decimal integer {0:?}")]
    InvalidDecimal(String),
    #[error("integer does not fit the requested width")]
    IntegerOverflow,
}

/// A byte sequence that is not a well-formed canonical RLP encoding.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MalformedInput {
    #[error("empty input")]
    Empty,
    #[error("declared length {needed} exceeds remaining {available} bytes")]
    Truncated { needed: usize, available: usize },
    #[error("single byte below 0x80 must not carry a prefix")]
    NonCanonicalSingleByte,
    #[error("long-form prefix used for a payload of {0} bytes")]
    NonCanonicalLength(usize),
    #[error("length field has a leading zero byte")]
    LeadingZeroLength,
    #[error("length field does not fit in usize")]
    LengthOverflow,
    #[error("lists nested deeper than {0} levels")]
    TooDeep(usize),
    #[error("list element overruns the list payload")]
    ListPayloadOverrun,
    #[error("{0} trailing bytes after item")]
    TrailingBytes(usize),
    #[error("expected a byte string, found a list")]
    UnexpectedList,
    #[error("expected a list, found a byte string")]
    UnexpectedString,
    #[error("integer has a leading zero byte")]
    LeadingZeroInteger,
}
