#![no_main]

use libfuzzer_sys::fuzz_target;
use rlp_merkle::rlp::{decode, encode};

fuzz_target!(|data: &[u8]| {
    // Decoding arbitrary bytes must never panic
    let Ok(decoded) = decode(data) else {
        return;
    };

    // Only canonical encodings decode, so the consumed prefix re-encodes exactly
    let consumed = data.len() - decoded.remaining.len();
    assert_eq!(encode(&decoded.data.into()), &data[..consumed]);
});
