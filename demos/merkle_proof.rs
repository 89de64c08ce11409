//! Merkle proof example
//!
//! Builds trees over a small word list, proves inclusion of one leaf, and
//! shows how the odd-node policy and node pairing change the root.

use rlp_merkle::merkle::{
    verify_proof, HexConcat, Keccak256, MerkleTree, OddNodePolicy, Sha256, TreeOptions,
};

const WORDS: [&str; 8] = ["zero", "one", "two", "three", "four", "five", "six", "seven"];

fn main() {
    println!("=== Merkle Proof Example ===\n");

    // 1. Build a Keccak-256 tree
    let tree = MerkleTree::build(&WORDS).expect("non-empty leaves");
    println!("Leaves: {}", tree.leaf_count());
    println!("Height: {}", tree.height());
    println!("Root:   0x{}", hex::encode(tree.root()));

    // 2. Prove and verify one leaf
    let proof = tree.proof(0).expect("index in range");
    let leaf = tree.leaf_hash(0).expect("index in range");
    println!("\nProof for {:?} (leaf 0x{}):", WORDS[0], hex::encode(leaf));
    for step in &proof.steps {
        println!("  {:?} 0x{}", step.side, hex::encode(step.sibling));
    }
    println!("Verifies: {}", verify_proof(&Keccak256, &proof, &leaf, &tree.root()));

    // 3. A leaf that is not in the tree
    let foreign = tree.leaf_hash_of("eight").expect("serializable");
    println!("\"eight\" with the same proof verifies: {}", tree.verify(&proof, &foreign));

    // 4. Odd leaf counts under each policy
    println!("\nFive leaves:");
    for policy in [OddNodePolicy::Promote, OddNodePolicy::Duplicate] {
        let options = TreeOptions::new().with_odd_node_policy(policy);
        let tree = MerkleTree::build_with(Keccak256, options, &WORDS[..5]).expect("non-empty leaves");
        println!(
            "  {:?}: root 0x{}, proof length for leaf 4 = {}",
            policy,
            hex::encode(tree.root()),
            tree.proof(4).expect("index in range").len()
        );
    }

    // 5. Other hash strategies
    let hex_text = MerkleTree::build_with(HexConcat(Keccak256), TreeOptions::default(), &WORDS)
        .expect("non-empty leaves");
    println!("\nHex-text pairing root: 0x{}", hex::encode(hex_text.root()));

    let sha = MerkleTree::from_bytes(Sha256, TreeOptions::default(), &[b"a", b"b", b"c"])
        .expect("non-empty leaves");
    println!("SHA-256 root over raw a, b, c: 0x{}", hex::encode(sha.root()));

    println!("\n=== Example Complete ===");
}
