//! Typed values accepted and produced by the RLP codec.
//!
//! [`RlpValue`] is what callers hand to the encoder. Scalars are reduced to
//! their canonical minimal big-endian form when they are converted into a
//! value, so the encoder itself only ever sees byte strings and lists.
//! [`RlpItem`] is what the decoder hands back: byte strings and lists only,
//! with no attempt to recover the original scalar type.

use primitive_types::U256;

use super::{InvalidInput, MalformedInput, RlpError};

/// An input value for the RLP encoder.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RlpValue {
    /// Distinguished null value, encoded exactly like an empty byte string.
    Null,
    /// Raw byte string.
    Bytes(Vec<u8>),
    /// Ordered list of values, arbitrarily nested.
    List(Vec<RlpValue>),
}

impl RlpValue {
    /// Creates an empty list.
    pub fn empty_list() -> Self {
        RlpValue::List(Vec::new())
    }

    /// Creates a list from anything convertible into values.
    pub fn list<I, T>(items: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<RlpValue>,
    {
        RlpValue::List(items.into_iter().map(Into::into).collect())
    }

    /// Parses a hex string, with or without a `0x` prefix.
    ///
    /// An odd number of digits is left-padded with a zero nibble, so `0x400`
    /// becomes `[0x04, 0x00]`.
    pub fn from_hex_str(input: &str) -> Result<Self, RlpError> {
        let digits = input.strip_prefix("0x").unwrap_or(input);
        let offset = input.len() - digits.len();

        let padded = if digits.len() % 2 == 1 {
            format!("0{digits}")
        } else {
            digits.to_string()
        };

        match hex::decode(&padded) {
            Ok(bytes) => Ok(RlpValue::Bytes(bytes)),
            Err(hex::FromHexError::InvalidHexCharacter { c, index }) => {
                // Report the position in the caller's string, not the padded copy.
                let pad = padded.len() - digits.len();
                Err(InvalidInput::InvalidHexDigit {
                    digit: c,
                    position: offset + index - pad,
                }
                .into())
            }
            Err(_) => Err(InvalidInput::InvalidHexDigit {
                digit: '?',
                position: offset,
            }
            .into()),
        }
    }

    /// Parses an unsigned decimal integer of up to 256 bits.
    pub fn from_decimal_str(input: &str) -> Result<Self, RlpError> {
        if input.is_empty() || !input.bytes().all(|b| b.is_ascii_digit()) {
            return Err(InvalidInput::InvalidDecimal(input.to_string()).into());
        }
        let value = U256::from_dec_str(input).map_err(|_| InvalidInput::IntegerOverflow)?;
        Ok(value.into())
    }

    /// Returns the canonical decoded shape of this value.
    ///
    /// `Null` becomes the empty byte string; everything else keeps its shape.
    pub fn to_item(&self) -> RlpItem {
        match self {
            RlpValue::Null => RlpItem::Bytes(Vec::new()),
            RlpValue::Bytes(bytes) => RlpItem::Bytes(bytes.clone()),
            RlpValue::List(items) => RlpItem::List(items.iter().map(RlpValue::to_item).collect()),
        }
    }
}

/// Strips leading zero bytes; zero becomes the empty string.
pub(crate) fn minimal_be_bytes(bytes: &[u8]) -> &[u8] {
    let first = bytes.iter().position(|&b| b != 0).unwrap_or(bytes.len());
    &bytes[first..]
}

pub(crate) fn u256_to_minimal_be(value: U256) -> Vec<u8> {
    let mut buf = [0u8; 32];
    value.to_big_endian(&mut buf);
    minimal_be_bytes(&buf).to_vec()
}

macro_rules! impl_from_unsigned {
    ($($t:ty),*) => {
        $(
            impl From<$t> for RlpValue {
                fn from(value: $t) -> Self {
                    RlpValue::Bytes(minimal_be_bytes(&value.to_be_bytes()).to_vec())
                }
            }
        )*
    };
}

impl_from_unsigned!(u8, u16, u32, u64, u128, usize);

macro_rules! impl_try_from_signed {
    ($($t:ty),*) => {
        $(
            impl TryFrom<$t> for RlpValue {
                type Error = RlpError;

                fn try_from(value: $t) -> Result<Self, Self::Error> {
                    if value < 0 {
                        return Err(InvalidInput::NegativeInteger(value as i128).into());
                    }
                    Ok(RlpValue::Bytes(minimal_be_bytes(&value.to_be_bytes()).to_vec()))
                }
            }
        )*
    };
}

impl_try_from_signed!(i8, i16, i32, i64, i128, isize);

impl From<U256> for RlpValue {
    fn from(value: U256) -> Self {
        RlpValue::Bytes(u256_to_minimal_be(value))
    }
}

impl From<&str> for RlpValue {
    fn from(value: &str) -> Self {
        RlpValue::Bytes(value.as_bytes().to_vec())
    }
}

impl From<String> for RlpValue {
    fn from(value: String) -> Self {
        RlpValue::Bytes(value.into_bytes())
    }
}

impl From<Vec<u8>> for RlpValue {
    fn from(value: Vec<u8>) -> Self {
        RlpValue::Bytes(value)
    }
}

impl From<&[u8]> for RlpValue {
    fn from(value: &[u8]) -> Self {
        RlpValue::Bytes(value.to_vec())
    }
}

impl<const N: usize> From<&[u8; N]> for RlpValue {
    fn from(value: &[u8; N]) -> Self {
        RlpValue::Bytes(value.to_vec())
    }
}

impl From<Vec<RlpValue>> for RlpValue {
    fn from(value: Vec<RlpValue>) -> Self {
        RlpValue::List(value)
    }
}

impl<T: Into<RlpValue>> From<Option<T>> for RlpValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(RlpValue::Null, Into::into)
    }
}

impl From<RlpItem> for RlpValue {
    fn from(item: RlpItem) -> Self {
        match item {
            RlpItem::Bytes(bytes) => RlpValue::Bytes(bytes),
            RlpItem::List(items) => RlpValue::List(items.into_iter().map(Into::into).collect()),
        }
    }
}

/// A decoded RLP item.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RlpItem {
    /// Byte string payload.
    Bytes(Vec<u8>),
    /// List of decoded items.
    List(Vec<RlpItem>),
}

impl RlpItem {
    /// Returns true if this item is a list.
    pub fn is_list(&self) -> bool {
        matches!(self, RlpItem::List(_))
    }

    /// Returns the byte string payload, or `None` for lists.
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            RlpItem::Bytes(bytes) => Some(bytes),
            RlpItem::List(_) => None,
        }
    }

    /// Returns the list items, or `None` for byte strings.
    pub fn as_list(&self) -> Option<&[RlpItem]> {
        match self {
            RlpItem::List(items) => Some(items),
            RlpItem::Bytes(_) => None,
        }
    }

    /// Consumes the item, expecting a byte string.
    pub fn into_bytes(self) -> Result<Vec<u8>, RlpError> {
        match self {
            RlpItem::Bytes(bytes) => Ok(bytes),
            RlpItem::List(_) => Err(MalformedInput::UnexpectedList.into()),
        }
    }

    /// Consumes the item, expecting a list.
    pub fn into_list(self) -> Result<Vec<RlpItem>, RlpError> {
        match self {
            RlpItem::List(items) => Ok(items),
            RlpItem::Bytes(_) => Err(MalformedInput::UnexpectedString.into()),
        }
    }

    /// Interprets a byte string as a canonical big-endian `u64`.
    pub fn to_u64(&self) -> Result<u64, RlpError> {
        let bytes = self.integer_bytes()?;
        if bytes.len() > 8 {
            return Err(InvalidInput::IntegerOverflow.into());
        }
        Ok(bytes.iter().fold(0u64, |acc, &b| (acc << 8) | u64::from(b)))
    }

    /// Interprets a byte string as a canonical big-endian 256-bit integer.
    pub fn to_u256(&self) -> Result<U256, RlpError> {
        let bytes = self.integer_bytes()?;
        if bytes.len() > 32 {
            return Err(InvalidInput::IntegerOverflow.into());
        }
        Ok(U256::from_big_endian(bytes))
    }

    fn integer_bytes(&self) -> Result<&[u8], RlpError> {
        let bytes = self.as_bytes().ok_or(MalformedInput::UnexpectedList)?;
        if bytes.first() == Some(&0) {
            return Err(MalformedInput::LeadingZeroInteger.into());
        }
        Ok(bytes)
    }
}
