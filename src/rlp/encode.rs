//! RLP encoding.

use primitive_types::U256;

use super::value::{minimal_be_bytes, u256_to_minimal_be, RlpValue};
use super::{EMPTY_LIST_CODE, EMPTY_STRING_CODE, MAX_SHORT_LEN};

/// Offset of the long-form string prefix (`0xb7 + length-of-length`).
const LONG_STRING_OFFSET: u8 = 0xb7;
/// Offset of the long-form list prefix (`0xf7 + length-of-length`).
const LONG_LIST_OFFSET: u8 = 0xf7;

/// Encodes a value into a fresh buffer.
pub fn encode(value: &RlpValue) -> Vec<u8> {
    let mut encoder = RlpEncoder::with_capacity(encoded_len(value));
    encoder.encode_value(value);
    encoder.into_bytes()
}

/// Returns the number of bytes [`encode`] produces for `value`.
pub fn encoded_len(value: &RlpValue) -> usize {
    match value {
        RlpValue::Null => 1,
        RlpValue::Bytes(bytes) => {
            if bytes.len() == 1 && bytes[0] < EMPTY_STRING_CODE {
                1
            } else {
                header_len(bytes.len()) + bytes.len()
            }
        }
        RlpValue::List(items) => {
            let payload: usize = items.iter().map(encoded_len).sum();
            header_len(payload) + payload
        }
    }
}

fn header_len(payload_len: usize) -> usize {
    if payload_len <= MAX_SHORT_LEN {
        1
    } else {
        1 + length_bytes(payload_len).len()
    }
}

/// Big-endian length without leading zeros.
fn length_bytes(len: usize) -> Vec<u8> {
    minimal_be_bytes(&len.to_be_bytes()).to_vec()
}

/// RLP encoder for building RLP-encoded data.
#[derive(Clone, Debug)]
pub struct RlpEncoder {
    buffer: Vec<u8>,
}

impl RlpEncoder {
    /// Creates a new empty encoder.
    pub fn new() -> Self {
        Self { buffer: Vec::new() }
    }

    /// Creates an encoder with pre-allocated capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buffer: Vec::with_capacity(capacity),
        }
    }

    /// Returns the encoded bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.buffer
    }

    /// Consumes the encoder and returns the encoded bytes.
    pub fn into_bytes(self) -> Vec<u8> {
        self.buffer
    }

    /// Clears the encoder.
    pub fn clear(&mut self) {
        self.buffer.clear();
    }

    /// Encodes any [`RlpValue`], recursing into lists.
    pub fn encode_value(&mut self, value: &RlpValue) {
        match value {
            RlpValue::Null => self.encode_empty(),
            RlpValue::Bytes(bytes) => self.encode_bytes(bytes),
            RlpValue::List(items) => self.encode_list(|e| {
                for item in items {
                    e.encode_value(item);
                }
            }),
        }
    }

    /// Encodes a single byte as an integer (zero is the empty string).
    pub fn encode_byte(&mut self, byte: u8) {
        if byte == 0x00 {
            self.buffer.push(EMPTY_STRING_CODE);
        } else if byte < EMPTY_STRING_CODE {
            self.buffer.push(byte);
        } else {
            self.buffer.push(EMPTY_STRING_CODE + 1);
            self.buffer.push(byte);
        }
    }

    /// Encodes a byte slice as a string.
    pub fn encode_bytes(&mut self, bytes: &[u8]) {
        if bytes.len() == 1 && bytes[0] < EMPTY_STRING_CODE {
            self.buffer.push(bytes[0]);
        } else {
            self.push_header(EMPTY_STRING_CODE, LONG_STRING_OFFSET, bytes.len());
            self.buffer.extend_from_slice(bytes);
        }
    }

    /// Encodes an empty string.
    pub fn encode_empty(&mut self) {
        self.buffer.push(EMPTY_STRING_CODE);
    }

    /// Encodes a u64 value in its minimal big-endian form.
    pub fn encode_u64(&mut self, value: u64) {
        self.encode_bytes(minimal_be_bytes(&value.to_be_bytes()));
    }

    /// Encodes a 256-bit value in its minimal big-endian form.
    pub fn encode_u256(&mut self, value: U256) {
        self.encode_bytes(&u256_to_minimal_be(value));
    }

    /// Encodes a fixed-size hash (32 bytes).
    pub fn encode_hash(&mut self, hash: &[u8; 32]) {
        self.encode_bytes(hash);
    }

    /// Starts encoding a list, returns the position to write length later.
    pub fn start_list(&mut self) -> usize {
        let pos = self.buffer.len();
        // Placeholder, widened in finish_list if the payload needs a long header
        self.buffer.push(0);
        pos
    }

    /// Finishes encoding a list started at the given position.
    pub fn finish_list(&mut self, start_pos: usize) {
        let content_len = self.buffer.len() - start_pos - 1;

        if content_len <= MAX_SHORT_LEN {
            self.buffer[start_pos] = EMPTY_LIST_CODE + content_len as u8;
        } else {
            let len_bytes = length_bytes(content_len);
            let header_len = 1 + len_bytes.len();

            // Need to make room for longer header
            let extra = header_len - 1;
            let old_len = self.buffer.len();
            self.buffer.resize(old_len + extra, 0);
            self.buffer.copy_within(start_pos + 1..old_len, start_pos + header_len);

            self.buffer[start_pos] = LONG_LIST_OFFSET + len_bytes.len() as u8;
            self.buffer[start_pos + 1..start_pos + header_len].copy_from_slice(&len_bytes);
        }
    }

    /// Encodes a list of items.
    pub fn encode_list<F>(&mut self, encode_items: F)
    where
        F: FnOnce(&mut Self),
    {
        let start = self.start_list();
        encode_items(self);
        self.finish_list(start);
    }

    fn push_header(&mut self, short_offset: u8, long_offset: u8, payload_len: usize) {
        if payload_len <= MAX_SHORT_LEN {
            self.buffer.push(short_offset + payload_len as u8);
        } else {
            let len_bytes = length_bytes(payload_len);
            self.buffer.push(long_offset + len_bytes.len() as u8);
            self.buffer.extend_from_slice(&len_bytes);
        }
    }
}

impl Default for RlpEncoder {
    fn default() -> Self {
        Self::new()
    }
}
