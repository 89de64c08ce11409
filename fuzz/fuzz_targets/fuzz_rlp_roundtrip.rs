#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use rlp_merkle::rlp::{decode_exact, encode, encoded_len, RlpValue};

#[derive(Arbitrary, Debug)]
enum Value {
    Null,
    Bytes(Vec<u8>),
    Int(u128),
    List(Vec<Value>),
}

impl Value {
    fn depth(&self) -> usize {
        match self {
            Value::List(items) => 1 + items.iter().map(Value::depth).max().unwrap_or(0),
            _ => 0,
        }
    }

    fn to_rlp(&self) -> RlpValue {
        match self {
            Value::Null => RlpValue::Null,
            Value::Bytes(bytes) => RlpValue::from(bytes.clone()),
            Value::Int(n) => RlpValue::from(*n),
            Value::List(items) => RlpValue::List(items.iter().map(Value::to_rlp).collect()),
        }
    }
}

fuzz_target!(|input: Value| {
    // Limit nesting
    if input.depth() > 64 {
        return;
    }

    let value = input.to_rlp();
    let encoded = encode(&value);
    assert_eq!(encoded.len(), encoded_len(&value));

    let item = decode_exact(&encoded).expect("canonical encoding must decode");
    assert_eq!(item, value.to_item());
});
