//! RLP decoding.
//!
//! The first byte of an item selects one of five size classes:
//!
//! | Range       | Meaning                                              |
//! |-------------|------------------------------------------------------|
//! | `0x00-0x7f` | the byte itself is the payload                       |
//! | `0x80-0xb7` | string, payload length `b - 0x80`                    |
//! | `0xb8-0xbf` | string, `b - 0xb7` big-endian length bytes follow    |
//! | `0xc0-0xf7` | list, payload length `b - 0xc0`                      |
//! | `0xf8-0xff` | list, `b - 0xf7` big-endian length bytes follow      |
//!
//! Only canonical encodings are accepted, so every successfully decoded item
//! re-encodes to exactly the bytes it was read from. List nesting is limited
//! to [`MAX_DEPTH`] levels; deeper input is rejected before it can exhaust the
//! stack.

use super::value::RlpItem;
use super::{
    MalformedInput, RlpError, EMPTY_LIST_CODE, EMPTY_STRING_CODE, MAX_DEPTH, MAX_SHORT_LEN,
};

/// Result of decoding one item from the front of a buffer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Decoded<'a> {
    /// The decoded item.
    pub data: RlpItem,
    /// Bytes following the item, untouched.
    pub remaining: &'a [u8],
}

/// Decodes the first item of `bytes`, returning it with the unread tail.
pub fn decode(bytes: &[u8]) -> Result<Decoded<'_>, RlpError> {
    let (data, remaining) = decode_item(bytes, 0)?;
    Ok(Decoded { data, remaining })
}

/// Decodes a buffer that must contain exactly one item.
pub fn decode_exact(bytes: &[u8]) -> Result<RlpItem, RlpError> {
    let Decoded { data, remaining } = decode(bytes)?;
    if !remaining.is_empty() {
        return Err(MalformedInput::TrailingBytes(remaining.len()).into());
    }
    Ok(data)
}

/// `depth` counts the lists enclosing `bytes`.
fn decode_item(bytes: &[u8], depth: usize) -> Result<(RlpItem, &[u8]), RlpError> {
    let header = Header::decode(bytes)?;
    let end = header.header_len + header.payload_len;
    let payload = &bytes[header.header_len..end];
    let remaining = &bytes[end..];

    if !header.list {
        return Ok((RlpItem::Bytes(payload.to_vec()), remaining));
    }
    if depth >= MAX_DEPTH {
        return Err(MalformedInput::TooDeep(MAX_DEPTH).into());
    }

    let mut items = Vec::new();
    let mut rest = payload;
    while !rest.is_empty() {
        let (item, tail) = decode_item(rest, depth + 1).map_err(|err| match err {
            RlpError::MalformedInput(MalformedInput::Truncated { .. }) => {
                MalformedInput::ListPayloadOverrun.into()
            }
            other => other,
        })?;
        items.push(item);
        rest = tail;
    }

    Ok((RlpItem::List(items), remaining))
}

/// Prefix of a single RLP item.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Header {
    /// True for lists, false for byte strings.
    pub list: bool,
    /// Number of prefix bytes (zero for a bare single byte).
    pub header_len: usize,
    /// Number of payload bytes following the prefix.
    pub payload_len: usize,
}

impl Header {
    /// Parses the prefix at the front of `bytes`.
    ///
    /// Fails unless the whole item (prefix and payload) fits in `bytes`.
    pub fn decode(bytes: &[u8]) -> Result<Self, RlpError> {
        let first = *bytes.first().ok_or(MalformedInput::Empty)?;

        let header = match first {
            0x00..=0x7f => Header {
                list: false,
                header_len: 0,
                payload_len: 1,
            },
            0x80..=0xb7 => {
                let payload_len = (first - EMPTY_STRING_CODE) as usize;
                if payload_len == 1 {
                    if let Some(&b) = bytes.get(1) {
                        if b < EMPTY_STRING_CODE {
                            return Err(MalformedInput::NonCanonicalSingleByte.into());
                        }
                    }
                }
                Header {
                    list: false,
                    header_len: 1,
                    payload_len,
                }
            }
            0xb8..=0xbf => {
                let len_of_len = (first - 0xb7) as usize;
                Header {
                    list: false,
                    header_len: 1 + len_of_len,
                    payload_len: read_long_length(&bytes[1..], len_of_len)?,
                }
            }
            0xc0..=0xf7 => Header {
                list: true,
                header_len: 1,
                payload_len: (first - EMPTY_LIST_CODE) as usize,
            },
            0xf8..=0xff => {
                let len_of_len = (first - 0xf7) as usize;
                Header {
                    list: true,
                    header_len: 1 + len_of_len,
                    payload_len: read_long_length(&bytes[1..], len_of_len)?,
                }
            }
        };

        let total = header
            .header_len
            .checked_add(header.payload_len)
            .ok_or(MalformedInput::LengthOverflow)?;
        if total > bytes.len() {
            return Err(MalformedInput::Truncated {
                needed: total,
                available: bytes.len(),
            }
            .into());
        }

        Ok(header)
    }

    /// Total encoded size of the item, prefix included.
    pub fn total_len(&self) -> usize {
        self.header_len + self.payload_len
    }
}

/// Reads a long-form big-endian length field of `len_of_len` bytes.
fn read_long_length(bytes: &[u8], len_of_len: usize) -> Result<usize, RlpError> {
    if len_of_len > std::mem::size_of::<usize>() {
        return Err(MalformedInput::LengthOverflow.into());
    }
    let field = bytes.get(..len_of_len).ok_or(MalformedInput::Truncated {
        needed: 1 + len_of_len,
        available: 1 + bytes.len(),
    })?;
    if field[0] == 0 {
        return Err(MalformedInput::LeadingZeroLength.into());
    }

    let len = field.iter().fold(0usize, |acc, &b| (acc << 8) | b as usize);
    if len <= MAX_SHORT_LEN {
        return Err(MalformedInput::NonCanonicalLength(len).into());
    }
    Ok(len)
}
