#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use rlp_merkle::merkle::{Keccak256, MerkleTree, OddNodePolicy, TreeOptions};

#[derive(Arbitrary, Debug)]
struct MerkleTreeInput {
    leaves: Vec<Vec<u8>>,
    duplicate_odd_nodes: bool,
    tamper: Option<(u8, u8, u8)>,
}

fuzz_target!(|input: MerkleTreeInput| {
    // Limit tree size
    if input.leaves.is_empty() || input.leaves.len() > 512 {
        return;
    }

    let policy = if input.duplicate_odd_nodes {
        OddNodePolicy::Duplicate
    } else {
        OddNodePolicy::Promote
    };
    let options = TreeOptions::new().with_odd_node_policy(policy);
    let tree = MerkleTree::from_bytes(Keccak256, options, &input.leaves).unwrap();

    // Every leaf proves against the root
    for i in 0..tree.leaf_count() {
        let proof = tree.proof(i).unwrap();
        assert!(tree.verify(&proof, &tree.leaf_hash(i).unwrap()));
    }

    // Out-of-range indices are errors, not panics
    assert!(tree.proof(tree.leaf_count()).is_err());

    // Any single-byte change to a sibling is rejected
    if let Some((index, step, byte)) = input.tamper {
        let index = index as usize % tree.leaf_count();
        let mut proof = tree.proof(index).unwrap();
        if !proof.is_empty() {
            let step = step as usize % proof.len();
            proof.steps[step].sibling[byte as usize % 32] ^= 0xff;
            assert!(!tree.verify(&proof, &tree.leaf_hash(index).unwrap()));
        }
    }
});
