//! RLP round-trip example
//!
//! Encodes a few values, decodes them back, and shows how malformed input is
//! reported.

use rlp_merkle::rlp::{decode, decode_exact, encode, RlpEncoder, RlpValue};

fn main() {
    println!("=== RLP Round-Trip Example ===\n");

    // 1. Scalars
    let samples = [
        ("empty string", RlpValue::from("")),
        ("zero", RlpValue::from(0u64)),
        ("15", RlpValue::from(15u64)),
        ("1024", RlpValue::from(1024u64)),
        ("\"dog\"", RlpValue::from("dog")),
    ];
    for (label, value) in &samples {
        println!("{:>14}: 0x{}", label, hex::encode(encode(value)));
    }

    // 2. Nested lists: the set-theoretic representation of three
    let three = RlpValue::List(vec![
        RlpValue::empty_list(),
        RlpValue::list([RlpValue::empty_list()]),
        RlpValue::List(vec![
            RlpValue::empty_list(),
            RlpValue::list([RlpValue::empty_list()]),
        ]),
    ]);
    let encoded = encode(&three);
    println!("\n[[],[[]],[[],[[]]]] -> 0x{}", hex::encode(&encoded));

    let item = decode_exact(&encoded).expect("encoder output decodes");
    assert_eq!(item, three.to_item());
    println!("Decoded back to the same structure");

    // 3. Streaming encoder
    let mut encoder = RlpEncoder::new();
    encoder.encode_list(|e| {
        e.encode_bytes(b"cat");
        e.encode_bytes(b"dog");
    });
    println!("\n[\"cat\",\"dog\"] via RlpEncoder: 0x{}", hex::encode(encoder.as_bytes()));

    // 4. Trailing bytes are handed back
    let mut buffer = encoder.into_bytes();
    buffer.extend_from_slice(&[0x01, 0x02]);
    let decoded = decode(&buffer).expect("list decodes");
    println!("Remaining after first item: {:?}", decoded.remaining);

    // 5. Malformed input is an error, not a panic
    let bad_inputs: [&[u8]; 4] = [&[], &[0x83, b'd', b'o'], &[0x81, 0x05], &[0xc2, 0x83, b'a', b'b']];
    for bad in bad_inputs {
        match decode(bad) {
            Ok(_) => println!("0x{} unexpectedly decoded", hex::encode(bad)),
            Err(err) => println!("0x{:<10} -> {}", hex::encode(bad), err),
        }
    }

    println!("\n=== Example Complete ===");
}
