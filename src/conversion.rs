//! Hex string <-> byte conversion at the crate boundary.
//!
//! `hex_to_bytes` never fails: it decodes `floor(len / 2)` byte pairs and
//! stops at the first pair containing a non-hex character, returning what was
//! decoded so far. Callers that need strict parsing should use
//! [`RlpValue::from_hex_str`](crate::rlp::RlpValue::from_hex_str) or the `hex`
//! crate directly.

/// Encodes bytes as lowercase hex without a `0x` prefix.
pub fn bytes_to_hex(bytes: &[u8]) -> String {
    hex::encode(bytes)
}

/// Decodes hex into bytes, truncating at the first malformed pair.
///
/// A trailing odd nibble is ignored. No `0x` prefix is stripped; `"0x12"`
/// stops immediately because `0x` is not a hex pair.
pub fn hex_to_bytes(input: &str) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(input.len() / 2);
    for pair in input.as_bytes().chunks_exact(2) {
        let mut byte = [0u8; 1];
        if hex::decode_to_slice(pair, &mut byte).is_err() {
            break;
        }
        bytes.push(byte[0]);
    }
    bytes
}
