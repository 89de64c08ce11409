//! # rlp_merkle
//!
//! Recursive Length Prefix (RLP) encoding and a binary Merkle hash tree with
//! inclusion proofs.
//!
//! ## Architecture
//!
//! The library is split into two independent components:
//!
//! 1. **RLP codec** - Byte-exact Ethereum RLP encode/decode of nested byte strings and lists
//! 2. **Merkle tree** - Hash tree over an ordered leaf sequence with logarithmic proofs
//!
//! ## Modules
//!
//! - `rlp` - Value model, encoder, decoder
//! - `merkle` - Hashers, tree construction, proofs and verification
//! - `conversion` - Hex <-> bytes at the boundary

pub mod conversion;
pub mod merkle;
pub mod rlp;
