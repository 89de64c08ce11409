//! Merkle inclusion proofs.

use log::debug;
use serde::{Deserialize, Serialize};

use super::hasher::{Hash, MerkleHasher};

/// Position of a sibling relative to the running hash.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Side {
    /// Sibling is the left child: parent = H(sibling ++ current).
    Left,
    /// Sibling is the right child: parent = H(current ++ sibling).
    Right,
}

/// One level of an authentication path.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProofStep {
    /// Sibling digest at this level.
    pub sibling: Hash,
    /// Which side the sibling sits on.
    pub side: Side,
}

/// Authentication path from a leaf to the root.
///
/// Levels where the leaf's ancestor was promoted without a sibling contribute
/// no step, so the path may be shorter than the tree height.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MerkleProof {
    /// Index of the proven leaf.
    pub leaf_index: usize,
    /// Steps ordered from the leaf level upwards.
    pub steps: Vec<ProofStep>,
}

impl MerkleProof {
    /// Creates a proof from its parts.
    pub fn new(leaf_index: usize, steps: Vec<ProofStep>) -> Self {
        Self { leaf_index, steps }
    }

    /// Number of steps in the path.
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Returns true for the proof of a single-leaf tree.
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Sibling digests in path order, without their sides.
    pub fn siblings(&self) -> impl Iterator<Item = &Hash> {
        self.steps.iter().map(|step| &step.sibling)
    }

    /// Folds the path over `leaf_hash` and returns the resulting root.
    pub fn compute_root<H: MerkleHasher + ?Sized>(&self, hasher: &H, leaf_hash: &Hash) -> Hash {
        self.steps.iter().fold(*leaf_hash, |current, step| match step.side {
            Side::Left => hasher.hash_pair(&step.sibling, &current),
            Side::Right => hasher.hash_pair(&current, &step.sibling),
        })
    }

    /// Verifies this proof for `leaf_hash` against `root`.
    pub fn verify<H: MerkleHasher + ?Sized>(&self, hasher: &H, leaf_hash: &Hash, root: &Hash) -> bool {
        verify_proof(hasher, self, leaf_hash, root)
    }
}

/// Returns true iff folding `proof` over `leaf_hash` reproduces `root`.
///
/// A mismatch is a normal outcome, not an error.
pub fn verify_proof<H: MerkleHasher + ?Sized>(
    hasher: &H,
    proof: &MerkleProof,
    leaf_hash: &Hash,
    root: &Hash,
) -> bool {
    let computed = proof.compute_root(hasher, leaf_hash);
    if computed != *root {
        debug!(
            "merkle proof for leaf {} rejected: computed root {} != expected {}",
            proof.leaf_index,
            hex::encode(computed),
            hex::encode(root)
        );
        return false;
    }
    true
}
