//! Merkle Tree Integration Tests
//!
//! Fixed Keccak-256 / SHA-256 vectors for tree roots and proofs, proof
//! correctness for every leaf of small trees, and rejection of tampered
//! proofs.
//!
//! Leaves are hashed as `keccak256(json(leaf))`, so the leaf `"zero"` hashes
//! the six bytes `"zero"` including the quotes.

use hex_literal::hex;
use rlp_merkle::conversion::{bytes_to_hex, hex_to_bytes};
use rlp_merkle::merkle::{
    keccak256, verify_proof, HexConcat, Keccak256, MerkleError, MerkleTree, OddNodePolicy, ProofStep, Sha256,
    Side, TreeOptions,
};

const WORDS: [&str; 8] = ["zero", "one", "two", "three", "four", "five", "six", "seven"];

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn options(policy: OddNodePolicy) -> TreeOptions {
    TreeOptions::new().with_odd_node_policy(policy)
}

// ============================================================================
// FIXED VECTORS
// ============================================================================

mod vector_tests {
    use super::*;

    #[test]
    fn test_leaf_hash_of_zero() {
        let tree = MerkleTree::build(&WORDS).unwrap();
        assert_eq!(
            tree.leaf_hash(0).unwrap(),
            hex!("0231a2b550e3adcb6db5c7846099bb95b9400bfde9dd4acba7aabf1d526a65fc")
        );
        assert_eq!(tree.leaf_hash(0).unwrap(), keccak256(b"\"zero\""));
    }

    #[test]
    fn test_eight_leaf_root() {
        init_logging();
        let tree = MerkleTree::build(&WORDS).unwrap();
        assert_eq!(tree.height(), 4);
        assert_eq!(
            tree.root(),
            hex!("3be179c8c6a2de0335f60a3ee591891704cbefbe58c8f303bd8064888826a445")
        );
    }

    #[test]
    fn test_eight_leaf_proof_of_zero() {
        let tree = MerkleTree::build(&WORDS).unwrap();
        let proof = tree.proof(0).unwrap();

        let expected = [
            hex!("5ec1c62f24d95bdac9fdcb8c7db092e28ebcb12cb08da968fd3e5d918c0fea68"),
            hex!("5f7ecf7d85e68447ba48f0ab4b0af53e4b567612996c762ea35d960a1991e148"),
            hex!("5d209cb2a44843fe0bfe7bc11e052e8d8249fcbf5784c5c0a48c90b764d5fd92"),
        ];
        let steps: Vec<ProofStep> = expected
            .iter()
            .map(|&sibling| ProofStep { sibling, side: Side::Right })
            .collect();
        assert_eq!(proof.steps, steps);
        assert!(tree.verify(&proof, &tree.leaf_hash(0).unwrap()));
    }

    #[test]
    fn test_hex_text_pairing_root_and_proof() {
        let tree = MerkleTree::build_with(HexConcat(Keccak256), TreeOptions::default(), &WORDS).unwrap();
        assert_eq!(
            tree.leaf_hash(0).unwrap(),
            hex!("0231a2b550e3adcb6db5c7846099bb95b9400bfde9dd4acba7aabf1d526a65fc")
        );
        assert_eq!(
            tree.root(),
            hex!("5b78ea637f887072bb1f8f1cdcb7cbd60ef15f34678ae5dfe6f8f2d59a1f8bb6")
        );

        let proof = tree.proof(0).unwrap();
        let siblings: Vec<_> = proof.siblings().copied().collect();
        assert_eq!(
            siblings,
            vec![
                hex!("5ec1c62f24d95bdac9fdcb8c7db092e28ebcb12cb08da968fd3e5d918c0fea68"),
                hex!("f01152de4eb22a632e3d7edb31b4e43466b4c36e4f70e647b8f93a9bd6c7ffeb"),
                hex!("b9a82abd0d0a702183e0e3e2a6a88eb7481430e6eaca2ee0f35967b17e0cbf43"),
            ]
        );
        assert!(proof.steps.iter().all(|step| step.side == Side::Right));
        assert!(tree.verify(&proof, &tree.leaf_hash(0).unwrap()));

        // Raw-byte pairing folds to a different root
        assert!(!verify_proof(&Keccak256, &proof, &tree.leaf_hash(0).unwrap(), &tree.root()));
    }

    #[test]
    fn test_hex_text_pairing_mixed_sides() {
        let tree = MerkleTree::build_with(HexConcat(Keccak256), TreeOptions::default(), &WORDS).unwrap();
        let proof = tree.proof(5).unwrap();

        let expected = vec![
            ProofStep {
                sibling: hex!("5f8c047188ff68eac2af9b35c7afe0314253b5569359f6f5c4c141621274a783"),
                side: Side::Left,
            },
            ProofStep {
                sibling: hex!("5284ff308c292c430eaa9b3aeda2443cc93d20a86099c9834d5a036ce309fd6e"),
                side: Side::Right,
            },
            ProofStep {
                sibling: hex!("21adba35c85dce5eb33850d8affde47623d34fc0153488a8792da2f752797e1e"),
                side: Side::Left,
            },
        ];
        assert_eq!(proof.steps, expected);
        assert!(verify_proof(
            &HexConcat(Keccak256),
            &proof,
            &tree.leaf_hash(5).unwrap(),
            &hex!("5b78ea637f887072bb1f8f1cdcb7cbd60ef15f34678ae5dfe6f8f2d59a1f8bb6"),
        ));
    }

    #[test]
    fn test_hex_text_pairing_five_leaves() {
        let leaves = &WORDS[..5];

        let promote =
            MerkleTree::build_with(HexConcat(Keccak256), options(OddNodePolicy::Promote), leaves).unwrap();
        assert_eq!(
            promote.root(),
            hex!("95b49438a43edf838a56f8c3c5433662f1852365d7fcd5ac5e5f7be932f95c89")
        );

        let duplicate =
            MerkleTree::build_with(HexConcat(Keccak256), options(OddNodePolicy::Duplicate), leaves).unwrap();
        assert_eq!(
            duplicate.root(),
            hex!("cadc50c590809c32fc4a5b85f66e3a6f1f724af84448601cac1b5f5ee29c195b")
        );
    }

    #[test]
    fn test_three_leaf_roots_per_policy() {
        let leaves = ["one", "two", "three"];

        let promote = MerkleTree::build_with(Keccak256, options(OddNodePolicy::Promote), &leaves).unwrap();
        assert_eq!(
            promote.root(),
            hex!("36b362a19ccca794243667dce02de7d0a510c47f98126f6de57f369224ae7364")
        );

        let duplicate =
            MerkleTree::build_with(Keccak256, options(OddNodePolicy::Duplicate), &leaves).unwrap();
        assert_eq!(
            duplicate.root(),
            hex!("4512eee51bf73a54e803c6fa08fff0e32fa7b04fffda148f00466ff281f2efe1")
        );
    }

    #[test]
    fn test_five_leaf_roots_per_policy() {
        let leaves = &WORDS[..5];

        let promote = MerkleTree::build_with(Keccak256, options(OddNodePolicy::Promote), leaves).unwrap();
        assert_eq!(
            promote.root(),
            hex!("92cf1241f9c4b8cdcbbae769a5cc19e449b0c6cb62ac483e7145a839dd21fcf0")
        );

        let duplicate =
            MerkleTree::build_with(Keccak256, options(OddNodePolicy::Duplicate), leaves).unwrap();
        assert_eq!(
            duplicate.root(),
            hex!("1904aec8f99be8ab18acbb10f2934111e8d40b4ae474ab2ef517c7a25ffec97c")
        );
    }

    #[test]
    fn test_sha256_raw_leaves() {
        let leaves = [b"a", b"b", b"c"];

        let promote = MerkleTree::from_bytes(Sha256, options(OddNodePolicy::Promote), &leaves).unwrap();
        assert_eq!(
            promote.root(),
            hex!("7075152d03a5cd92104887b476862778ec0c87be5c2fa1c0a90f87c49fad6eff")
        );

        let duplicate =
            MerkleTree::from_bytes(Sha256, options(OddNodePolicy::Duplicate), &leaves).unwrap();
        assert_eq!(
            duplicate.root(),
            hex!("d31a37ef6ac14a2db1470c4316beb5592e6afd4465022339adafda76a18ffabe")
        );
    }

    #[test]
    fn test_root_hex_roundtrip() {
        let tree = MerkleTree::build(&WORDS).unwrap();
        let root_hex = bytes_to_hex(&tree.root());
        assert_eq!(root_hex, "3be179c8c6a2de0335f60a3ee591891704cbefbe58c8f303bd8064888826a445");
        assert_eq!(hex_to_bytes(&root_hex), tree.root().to_vec());
    }
}

// ============================================================================
// PROOF CORRECTNESS
// ============================================================================

mod proof_tests {
    use super::*;

    fn assert_all_proofs_verify(n: usize, policy: OddNodePolicy) {
        let tree = MerkleTree::build_with(Keccak256, options(policy), &WORDS[..n]).unwrap();
        let root = tree.root();

        for (i, word) in WORDS[..n].iter().enumerate() {
            let proof = tree.proof(i).unwrap();
            let leaf = tree.leaf_hash_of(word).unwrap();
            assert_eq!(proof.leaf_index, i);
            assert!(
                verify_proof(&Keccak256, &proof, &leaf, &root),
                "n = {n}, i = {i}, policy = {policy:?}"
            );
        }
    }

    #[test]
    fn test_proofs_for_required_sizes() {
        init_logging();
        for n in [1, 2, 3, 4, 8] {
            assert_all_proofs_verify(n, OddNodePolicy::Promote);
            assert_all_proofs_verify(n, OddNodePolicy::Duplicate);
        }
    }

    #[test]
    fn test_proofs_for_other_sizes() {
        for n in [5, 6, 7] {
            assert_all_proofs_verify(n, OddNodePolicy::Promote);
            assert_all_proofs_verify(n, OddNodePolicy::Duplicate);
        }
    }

    #[test]
    fn test_proof_lengths_promote() {
        let tree = MerkleTree::build(&WORDS[..5]).unwrap();
        // Leaf 4 is promoted twice before meeting the rest of the tree
        let lengths: Vec<usize> = (0..5).map(|i| tree.proof(i).unwrap().len()).collect();
        assert_eq!(lengths, vec![3, 3, 3, 3, 1]);
    }

    #[test]
    fn test_proof_lengths_duplicate() {
        let tree = MerkleTree::build_with(Keccak256, options(OddNodePolicy::Duplicate), &WORDS[..5])
            .unwrap();
        let lengths: Vec<usize> = (0..5).map(|i| tree.proof(i).unwrap().len()).collect();
        assert_eq!(lengths, vec![3; 5]);
    }

    #[test]
    fn test_proof_out_of_range() {
        let tree = MerkleTree::build(&WORDS).unwrap();
        let err = tree.proof(8).unwrap_err();
        assert!(matches!(
            err,
            MerkleError::IndexOutOfRange { index: 8, leaf_count: 8 }
        ));
        assert_eq!(err.to_string(), "Leaf index 8 out of range for 8 leaves");
    }

    #[test]
    fn test_tree_is_shareable_across_threads() {
        let tree = MerkleTree::build(&WORDS).unwrap();
        let root = tree.root();

        std::thread::scope(|s| {
            for i in 0..WORDS.len() {
                let tree = &tree;
                s.spawn(move || {
                    let proof = tree.proof(i).unwrap();
                    assert!(proof.verify(tree.hasher(), &tree.leaf_hash(i).unwrap(), &root));
                });
            }
        });
    }
}

// ============================================================================
// PROOF REJECTION
// ============================================================================

mod rejection_tests {
    use super::*;

    #[test]
    fn test_every_single_byte_mutation_rejected() {
        init_logging();
        let tree = MerkleTree::build(&WORDS).unwrap();
        let leaf = tree.leaf_hash(5).unwrap();
        let proof = tree.proof(5).unwrap();

        for step in 0..proof.len() {
            for byte in 0..32 {
                let mut tampered = proof.clone();
                tampered.steps[step].sibling[byte] ^= 0x01;
                assert!(!tree.verify(&tampered, &leaf), "step {step}, byte {byte}");
            }
        }
    }

    #[test]
    fn test_substituted_leaf_rejected() {
        let tree = MerkleTree::build(&WORDS).unwrap();
        let proof = tree.proof(2).unwrap();

        let other = tree.leaf_hash_of("eight").unwrap();
        assert_eq!(
            other,
            hex!("d4f4a2cfefbb804f85e6015f708170184e2b72298d1e747772e914a9c2867dbc")
        );
        assert!(!tree.verify(&proof, &other));

        // A real leaf at the wrong index fails too
        assert!(!tree.verify(&proof, &tree.leaf_hash(3).unwrap()));
    }

    #[test]
    fn test_fixed_order_fold_rejected() {
        // Folding every sibling on the right only works for leaf 0
        let tree = MerkleTree::build(&WORDS).unwrap();
        let mut proof = tree.proof(6).unwrap();
        for step in &mut proof.steps {
            step.side = Side::Right;
        }
        assert!(!tree.verify(&proof, &tree.leaf_hash(6).unwrap()));
    }

    #[test]
    fn test_proof_against_other_root_rejected() {
        let tree = MerkleTree::build(&WORDS).unwrap();
        let other = MerkleTree::build(&WORDS[..7]).unwrap();
        let proof = tree.proof(0).unwrap();

        assert!(!proof.verify(&Keccak256, &tree.leaf_hash(0).unwrap(), &other.root()));
    }

    #[test]
    fn test_policy_mismatch_rejected() {
        let leaves = &WORDS[..3];
        let promote = MerkleTree::build_with(Keccak256, options(OddNodePolicy::Promote), leaves).unwrap();
        let duplicate =
            MerkleTree::build_with(Keccak256, options(OddNodePolicy::Duplicate), leaves).unwrap();

        let proof = promote.proof(2).unwrap();
        assert!(!duplicate.verify(&proof, &promote.leaf_hash(2).unwrap()));
    }
}
