//! Binary Merkle hash tree.
//!
//! The tree is built bottom-up from an ordered leaf sequence and is immutable
//! afterwards. Level 0 holds the leaf hashes; each level above holds
//! `ceil(len / 2)` parents, where a parent is `H(left ++ right)`.
//!
//! How a trailing node without a right neighbor is handled is an explicit
//! [`OddNodePolicy`]; proofs follow the same policy as construction, so a
//! tree's proofs always verify against its own root.

use log::{debug, trace};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::hasher::{Hash, Keccak256, MerkleHasher};
use super::proof::{verify_proof, MerkleProof, ProofStep, Side};

/// Levels at least this wide are hashed in parallel by default.
pub const DEFAULT_PARALLEL_THRESHOLD: usize = 1024;

/// Merkle tree errors.
#[derive(Error, Debug)]
pub enum MerkleError {
    #[error("Cannot build a tree from zero leaves")]
    EmptyTree,
    #[error("Leaf index {index} out of range for {leaf_count} leaves")]
    IndexOutOfRange { index: usize, leaf_count: usize },
    #[error("Leaf serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Pairing rule for the last node of an odd-length level.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OddNodePolicy {
    /// The lone node moves up unchanged and is not hashed with anything.
    /// Proofs contribute no step for that level.
    #[default]
    Promote,
    /// The lone node is hashed with a copy of itself.
    /// Proofs record the node itself as its right sibling.
    Duplicate,
}

/// Options for building a tree.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TreeOptions {
    /// How the trailing node of an odd-length level is paired.
    pub odd_node_policy: OddNodePolicy,
    /// Levels with at least this many nodes are hashed with rayon.
    pub parallel_threshold: usize,
}

impl TreeOptions {
    /// Creates default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the odd-node policy.
    pub fn with_odd_node_policy(mut self, policy: OddNodePolicy) -> Self {
        self.odd_node_policy = policy;
        self
    }

    /// Sets the parallel hashing threshold. `usize::MAX` keeps hashing sequential.
    pub fn with_parallel_threshold(mut self, threshold: usize) -> Self {
        self.parallel_threshold = threshold;
        self
    }
}

impl Default for TreeOptions {
    fn default() -> Self {
        Self {
            odd_node_policy: OddNodePolicy::Promote,
            parallel_threshold: DEFAULT_PARALLEL_THRESHOLD,
        }
    }
}

/// Hashes a leaf value through its canonical JSON serialization.
pub fn leaf_hash<H, T>(hasher: &H, value: &T) -> Result<Hash, MerkleError>
where
    H: MerkleHasher + ?Sized,
    T: Serialize + ?Sized,
{
    let bytes = serde_json::to_vec(value)?;
    Ok(hasher.hash(&bytes))
}

/// An immutable binary Merkle tree.
#[derive(Clone, Debug)]
pub struct MerkleTree<H = Keccak256> {
    hasher: H,
    options: TreeOptions,
    /// Level 0 is the leaf hashes, the last level holds only the root.
    levels: Vec<Vec<Hash>>,
}

impl MerkleTree<Keccak256> {
    /// Builds a Keccak-256 tree with default options.
    ///
    /// Each leaf is hashed as `keccak256(json(leaf))`.
    pub fn build<T: Serialize + Sync>(leaves: &[T]) -> Result<Self, MerkleError> {
        Self::build_with(Keccak256, TreeOptions::default(), leaves)
    }
}

impl<H: MerkleHasher> MerkleTree<H> {
    /// Builds a tree over serializable leaves with the given hasher and options.
    pub fn build_with<T: Serialize + Sync>(
        hasher: H,
        options: TreeOptions,
        leaves: &[T],
    ) -> Result<Self, MerkleError> {
        let leaf_hashes = if leaves.len() >= options.parallel_threshold {
            leaves
                .par_iter()
                .map(|leaf| leaf_hash(&hasher, leaf))
                .collect::<Result<Vec<_>, _>>()?
        } else {
            leaves
                .iter()
                .map(|leaf| leaf_hash(&hasher, leaf))
                .collect::<Result<Vec<_>, _>>()?
        };
        Self::from_leaf_hashes(hasher, options, leaf_hashes)
    }

    /// Builds a tree whose leaves are raw byte strings, hashed as-is.
    pub fn from_bytes<B: AsRef<[u8]>>(
        hasher: H,
        options: TreeOptions,
        leaves: &[B],
    ) -> Result<Self, MerkleError> {
        let leaf_hashes = leaves.iter().map(|leaf| hasher.hash(leaf.as_ref())).collect();
        Self::from_leaf_hashes(hasher, options, leaf_hashes)
    }

    /// Builds a tree from already-computed leaf hashes.
    pub fn from_leaf_hashes(
        hasher: H,
        options: TreeOptions,
        leaf_hashes: Vec<Hash>,
    ) -> Result<Self, MerkleError> {
        if leaf_hashes.is_empty() {
            return Err(MerkleError::EmptyTree);
        }

        let leaf_count = leaf_hashes.len();
        let mut levels = vec![leaf_hashes];
        while levels[levels.len() - 1].len() > 1 {
            let level = &levels[levels.len() - 1];
            let next = next_level(&hasher, &options, level);
            trace!("merkle level {}: {} -> {} nodes", levels.len() - 1, level.len(), next.len());
            levels.push(next);
        }

        let tree = Self { hasher, options, levels };
        debug!(
            "built merkle tree: {} leaves, height {}, policy {:?}, root {}",
            leaf_count,
            tree.height(),
            tree.options.odd_node_policy,
            hex::encode(tree.root())
        );
        Ok(tree)
    }

    /// Returns the root hash.
    pub fn root(&self) -> Hash {
        // The top level always holds exactly one hash.
        self.levels[self.levels.len() - 1][0]
    }

    /// Returns the number of leaves.
    pub fn leaf_count(&self) -> usize {
        self.levels[0].len()
    }

    /// Returns the number of levels, leaves and root included.
    pub fn height(&self) -> usize {
        self.levels.len()
    }

    /// Returns the hashes of one level (0 = leaves).
    pub fn level(&self, index: usize) -> Option<&[Hash]> {
        self.levels.get(index).map(|level| level.as_slice())
    }

    /// Returns all leaf hashes in order.
    pub fn leaf_hashes(&self) -> &[Hash] {
        &self.levels[0]
    }

    /// Returns the hash of one leaf.
    pub fn leaf_hash(&self, index: usize) -> Option<Hash> {
        self.levels[0].get(index).copied()
    }

    /// Hashes a value the way [`MerkleTree::build_with`] hashes leaves.
    pub fn leaf_hash_of<T: Serialize + ?Sized>(&self, value: &T) -> Result<Hash, MerkleError> {
        leaf_hash(&self.hasher, value)
    }

    /// Returns the options the tree was built with.
    pub fn options(&self) -> &TreeOptions {
        &self.options
    }

    /// Returns the tree's hasher.
    pub fn hasher(&self) -> &H {
        &self.hasher
    }

    /// Generates the authentication path for a leaf.
    pub fn proof(&self, leaf_index: usize) -> Result<MerkleProof, MerkleError> {
        let leaf_count = self.leaf_count();
        if leaf_index >= leaf_count {
            return Err(MerkleError::IndexOutOfRange {
                index: leaf_index,
                leaf_count,
            });
        }

        let mut steps = Vec::with_capacity(self.height() - 1);
        let mut n = leaf_index;

        for level in &self.levels[..self.levels.len() - 1] {
            if n % 2 == 1 {
                steps.push(ProofStep {
                    sibling: level[n - 1],
                    side: Side::Left,
                });
            } else if let Some(&sibling) = level.get(n + 1) {
                steps.push(ProofStep {
                    sibling,
                    side: Side::Right,
                });
            } else if self.options.odd_node_policy == OddNodePolicy::Duplicate {
                steps.push(ProofStep {
                    sibling: level[n],
                    side: Side::Right,
                });
            }
            n /= 2;
        }

        Ok(MerkleProof::new(leaf_index, steps))
    }

    /// Verifies a proof for `leaf_hash` against this tree's root.
    pub fn verify(&self, proof: &MerkleProof, leaf_hash: &Hash) -> bool {
        verify_proof(&self.hasher, proof, leaf_hash, &self.root())
    }
}

fn next_level<H: MerkleHasher>(hasher: &H, options: &TreeOptions, level: &[Hash]) -> Vec<Hash> {
    let parent = |pair: &[Hash]| match pair {
        [left, right] => hasher.hash_pair(left, right),
        [lone] => match options.odd_node_policy {
            OddNodePolicy::Promote => *lone,
            OddNodePolicy::Duplicate => hasher.hash_pair(lone, lone),
        },
        _ => unreachable!("chunks(2) yields one or two hashes"),
    };

    if level.len() >= options.parallel_threshold {
        level.par_chunks(2).map(parent).collect()
    } else {
        level.chunks(2).map(parent).collect()
    }
}
