//! Hash functions used to build Merkle trees.

use sha2::Digest;
use tiny_keccak::{Hasher, Keccak};

/// Hash size (256-bit digests).
pub const HASH_SIZE: usize = 32;

/// A node or leaf digest.
pub type Hash = [u8; HASH_SIZE];

/// Hash strategy for a Merkle tree.
///
/// Trees take their hasher by value, so tests can swap in a deterministic
/// stub without touching the tree code.
pub trait MerkleHasher: Send + Sync {
    /// Hashes arbitrary bytes.
    fn hash(&self, data: &[u8]) -> Hash;

    /// Hashes two child digests into their parent (`H(left ++ right)`).
    fn hash_pair(&self, left: &Hash, right: &Hash) -> Hash {
        let mut buf = [0u8; 2 * HASH_SIZE];
        buf[..HASH_SIZE].copy_from_slice(left);
        buf[HASH_SIZE..].copy_from_slice(right);
        self.hash(&buf)
    }
}

/// Keccak-256, as used by Ethereum.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Keccak256;

impl MerkleHasher for Keccak256 {
    fn hash(&self, data: &[u8]) -> Hash {
        keccak256(data)
    }

    fn hash_pair(&self, left: &Hash, right: &Hash) -> Hash {
        let mut hasher = Keccak::v256();
        hasher.update(left);
        hasher.update(right);
        let mut hash = [0u8; HASH_SIZE];
        hasher.finalize(&mut hash);
        hash
    }
}

/// SHA-256.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Sha256;

impl MerkleHasher for Sha256 {
    fn hash(&self, data: &[u8]) -> Hash {
        sha2::Sha256::digest(data).into()
    }
}

/// Pairs children through their lowercase hex text: `H(hex(left) ++ hex(right))`.
///
/// Trees that join hex-encoded digests as strings before hashing produce
/// different roots than raw-byte pairing; wrapping the hasher reproduces them.
/// Leaves are hashed by the inner hasher unchanged, and proofs verified with
/// the same wrapper fold the same way.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct HexConcat<H>(pub H);

impl<H: MerkleHasher> MerkleHasher for HexConcat<H> {
    fn hash(&self, data: &[u8]) -> Hash {
        self.0.hash(data)
    }

    fn hash_pair(&self, left: &Hash, right: &Hash) -> Hash {
        let mut text = hex::encode(left);
        text.push_str(&hex::encode(right));
        self.0.hash(text.as_bytes())
    }
}

/// Computes Keccak-256 hash of data.
pub fn keccak256(data: &[u8]) -> Hash {
    let mut hasher = Keccak::v256();
    hasher.update(data);
    let mut hash = [0u8; HASH_SIZE];
    hasher.finalize(&mut hash);
    hash
}
