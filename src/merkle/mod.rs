//! Binary Merkle hash tree with inclusion proofs.
//!
//! This module builds a hash tree over an ordered leaf sequence, derives an
//! authentication path for any leaf, and verifies a leaf against a root using
//! only that path. The hash function is injected through [`MerkleHasher`].

mod hasher;
mod proof;
mod tree;


pub use hasher::{keccak256, Hash, HexConcat, Keccak256, MerkleHasher, Sha256, HASH_SIZE};
pub use proof::{verify_proof, MerkleProof, ProofStep, Side};
pub use tree::{
    leaf_hash, MerkleError, MerkleTree, OddNodePolicy, TreeOptions, DEFAULT_PARALLEL_THRESHOLD,
};
