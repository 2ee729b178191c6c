//! Setups and proofs survive a trip through a serde format.

#![cfg(feature = "serde")]

use rand_chacha::ChaCha8Rng;
use rand_core::SeedableRng;
use rsa_setup_proofs::{
    PermutationTestProof, PermutationTestSetup, PoupardSternProof, PoupardSternSetup,
    RsaPrivateKey, RsaPublicKey, DEFAULT_PUBLIC_STRING,
};

#[test]
fn permutation_test_json_roundtrip() {
    let mut rng = ChaCha8Rng::from_seed([42; 32]);
    let private_key = RsaPrivateKey::new(&mut rng, 1024).unwrap();
    let setup = PermutationTestSetup::new(DEFAULT_PUBLIC_STRING, 41, 1024).unwrap();
    let proof = private_key.prove_permutation_test(&setup).unwrap();

    let public_key: RsaPublicKey =
        serde_json::from_str(&serde_json::to_string(&private_key.to_public_key()).unwrap())
            .unwrap();
    let setup: PermutationTestSetup =
        serde_json::from_str(&serde_json::to_string(&setup).unwrap()).unwrap();
    let decoded: PermutationTestProof =
        serde_json::from_str(&serde_json::to_string(&proof).unwrap()).unwrap();

    assert_eq!(decoded, proof);
    assert!(public_key.verify_permutation_test(&setup, &decoded));
}

#[test]
fn poupard_stern_json_roundtrip() {
    let mut rng = ChaCha8Rng::from_seed([42; 32]);
    let private_key = RsaPrivateKey::new(&mut rng, 1024).unwrap();
    let setup = PoupardSternSetup::new(DEFAULT_PUBLIC_STRING, 1024).unwrap();
    let proof = private_key.prove_poupard_stern(&mut rng, &setup).unwrap();

    let setup: PoupardSternSetup =
        serde_json::from_str(&serde_json::to_string(&setup).unwrap()).unwrap();
    let decoded: PoupardSternProof =
        serde_json::from_str(&serde_json::to_string(&proof).unwrap()).unwrap();

    assert_eq!(decoded, proof);
    assert!(private_key.to_public_key().verify_poupard_stern(&setup, &decoded));
}

#[test]
fn invalid_setup_from_json_is_rejected() {
    let mut rng = ChaCha8Rng::from_seed([42; 32]);
    let private_key = RsaPrivateKey::new(&mut rng, 1024).unwrap();
    let setup = PermutationTestSetup::new(DEFAULT_PUBLIC_STRING, 41, 1024).unwrap();
    let proof = private_key.prove_permutation_test(&setup).unwrap();

    let json = serde_json::to_string(&setup)
        .unwrap()
        .replace("\"alpha\":41", "\"alpha\":0");
    let broken: PermutationTestSetup = serde_json::from_str(&json).unwrap();
    assert_eq!(broken.alpha(), 0);
    assert!(private_key.prove_permutation_test(&broken).is_err());
    assert!(!private_key.to_public_key().verify_permutation_test(&broken, &proof));
}

#[test]
fn oversized_key_size_from_json_is_rejected() {
    let mut rng = ChaCha8Rng::from_seed([42; 32]);
    let private_key = RsaPrivateKey::new(&mut rng, 1024).unwrap();
    let setup = PoupardSternSetup::new(DEFAULT_PUBLIC_STRING, 1024).unwrap();
    let proof = private_key.prove_poupard_stern(&mut rng, &setup).unwrap();

    let json = serde_json::to_string(&setup)
        .unwrap()
        .replace("\"key_size\":1024", &format!("\"key_size\":{}", usize::MAX));
    let broken: PoupardSternSetup = serde_json::from_str(&json).unwrap();
    assert_eq!(broken.key_size(), usize::MAX);
    assert!(!private_key.to_public_key().verify_poupard_stern(&broken, &proof));
    assert_eq!(
        private_key.prove_poupard_stern(&mut rng, &broken),
        Err(rsa_setup_proofs::Error::InvalidSetup)
    );
}
