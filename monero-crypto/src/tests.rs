//! Integration tests for the monero-crypto crate.

use crate::varint::{encode_varint, read_varint};
use crate::*;

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

#[test]
fn test_confidential_output_flow() {
    init_logging();
    let ops = Ed25519;
    let prover = BorromeanProver::new(ops).unwrap();

    // Sender commits to two outputs and proves both are in range
    let amounts = [5_000_000_000_000u64, 1_250_000];
    let mut commitments = Vec::new();
    for amount in amounts {
        let mask = ops.random_scalar();
        let (commitment, proof) = prover.prove(amount, &mask).unwrap();
        assert!(prover.verify(&commitment, &proof));

        // Proof survives the text form
        let json = serde_json::to_string(&proof).unwrap();
        let decoded: RangeSig = serde_json::from_str(&json).unwrap();
        assert!(prover.verify(&commitment, &decoded));

        commitments.push((commitment, mask));
    }

    // Commitments are additively homomorphic
    let sum = ops.add_keys(&commitments[0].0, &commitments[1].0).unwrap();
    let mask_sum = ops.sc_add(&commitments[0].1, &commitments[1].1);
    let expected = pedersen_commit(&ops, amounts[0] + amounts[1], &mask_sum).unwrap();
    assert_eq!(sum, expected);
}

#[test]
fn test_ring_signature_over_output_keys() {
    init_logging();
    let ops = Ed25519;

    // A one-time output key and nine decoys
    let secret = ops.random_scalar();
    let public = ops.secret_to_public(&secret).unwrap();
    let mut ring: Vec<Vec<Key>> = (0..9)
        .map(|_| vec![ops.scalar_mult_base(&ops.random_scalar())])
        .collect();
    ring.insert(3, vec![public]);

    let message = Key(ops.fast_hash(b"transaction prefix"));
    let (sig, images) = generate_mlsag(&ops, &message, &ring, &[secret], 3).unwrap();
    assert!(verify_mlsag(&ops, &message, &ring, &sig, &images));

    // The published key image is the standard one for the output
    assert_eq!(images[0], ops.generate_key_image(&secret, &public).unwrap());

    // MgSig survives the text form
    let json = serde_json::to_value(&sig).unwrap();
    assert!(json.get("ss").is_some());
    assert!(json.get("cc").is_some());
    let decoded: MgSig = serde_json::from_value(json).unwrap();
    assert!(verify_mlsag(&ops, &message, &ring, &decoded, &images));
}

#[test]
fn test_varint_framing() {
    // Several varints back to back decode in sequence
    let mut buf = Vec::new();
    for value in [0u64, 300, u64::MAX, 2] {
        buf.extend_from_slice(&encode_varint(value));
    }

    let mut offset = 0;
    let mut decoded = Vec::new();
    while offset < buf.len() {
        let (value, used) = read_varint(&buf[offset..]).unwrap();
        decoded.push(value);
        offset += used;
    }
    assert_eq!(decoded, vec![0, 300, u64::MAX, 2]);
}

#[test]
fn test_hash_to_scalar_through_trait_object_reference() {
    fn hash_with<H: HashOps>(hasher: H, data: &[u8]) -> Key {
        hasher.hash_to_scalar(data)
    }

    let direct = Keccak.hash_to_scalar(b"abc");
    assert_eq!(hash_with(&Keccak, b"abc"), direct);
    assert_eq!(hash_with(Ed25519, b"abc"), direct);
}

#[derive(serde::Deserialize)]
struct RangeProofFixture {
    commitment: Key,
    #[serde(rename = "rangeSig")]
    range_sig: RangeSig,
}

fn mainnet_range_proof() -> RangeProofFixture {
    serde_json::from_str(include_str!("../testdata/range_proof.json")).unwrap()
}

#[test]
fn test_verifies_mainnet_range_proof() {
    init_logging();
    let prover = BorromeanProver::new(Ed25519).unwrap();
    let fixture = mainnet_range_proof();
    assert!(prover.verify(&fixture.commitment, &fixture.range_sig));
}

#[test]
fn test_rejects_altered_mainnet_range_proof() {
    let prover = BorromeanProver::new(Ed25519).unwrap();
    let fixture = mainnet_range_proof();

    let mut proof = fixture.range_sig;
    proof.asig.s1[63].0[0] ^= 0x01;
    assert!(!prover.verify(&fixture.commitment, &proof));

    let mut proof = fixture.range_sig;
    proof.ci.swap(0, 1);
    assert!(!prover.verify(&fixture.commitment, &proof));
}
