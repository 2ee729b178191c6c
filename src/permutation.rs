//! Permutation test: a non-interactive proof that an RSA modulus has no prime
//! factor smaller than a public bound `alpha`.
//!
//! The prover derives `m2` challenges `rho_i < N` by hashing the public key,
//! the setup's public string and the index `i`. It answers each challenge
//! with a raw RSA signature. The first `m1 + 1` challenges are signed with
//! the exponent `e' = N·e`, the rest with `e`.
//!
//! Raising to `e` (or `e'`) is a permutation of `Z_N` only when the exponent
//! is coprime to `φ(N)`. A modulus with a small factor makes a large share
//! of the challenges unsignable, so the verifier catches a cheating prover
//! except with probability about `2^-k`.
//!
//! # Usage
//!
//! ```
//! use rsa_setup_proofs::{PermutationTestSetup, RsaPrivateKey, RsaPublicKey};
//!
//! let mut rng = rand::thread_rng(); // rand@0.8
//! let private_key = RsaPrivateKey::new(&mut rng, 1024).expect("failed to generate a key");
//! let public_key = RsaPublicKey::from(&private_key);
//!
//! let setup = PermutationTestSetup::new(b"public string".to_vec(), 41, 1024).unwrap();
//! let proof = private_key.prove_permutation_test(&setup).expect("failed to prove");
//! assert!(public_key.verify_permutation_test(&setup, &proof));
//! ```

mod proof;
mod setup;

pub use self::{proof::PermutationTestProof, setup::PermutationTestSetup};

use alloc::vec::Vec;
use num_bigint::BigUint;
use num_integer::Integer;
use num_traits::{Float, One, ToPrimitive};
use subtle::ConstantTimeEq;
use tracing::{error, instrument};

use crate::algorithms::codec::{combine, i2osp, octet_length, os2ip};
use crate::algorithms::mgf::MaskCandidates;
use crate::algorithms::rsa::{rsa_decrypt_block, rsa_encrypt_block};
use crate::algorithms::sieve::primes_up_to;
use crate::dummy_rng::DummyRng;
use crate::errors::{Error, Result};
use crate::key::{RsaPrivateKey, RsaPublicKey};
use crate::traits::{PrivateKeyParts, PublicKeyParts};

/// Returns `(m1, m2)`, the number of challenges answered under `e' = N·e`
/// (minus one) and the total number of challenges.
///
/// ```text
/// m1 = ceil(-(k + 1) / log2(1 / alpha))
/// m2 = ceil(-(k + 1) / log2(1 / alpha + (1 / e) * (1 - 1 / alpha)))
/// ```
///
/// Returns `None` for `e < 2` or `alpha < 2`, and whenever either count is
/// not a positive finite number.
pub fn get_m1_m2(alpha: u32, e: &BigUint, k: u32) -> Option<(usize, usize)> {
    let alpha = f64::from(alpha);
    let e = e.to_f64().unwrap_or(f64::INFINITY);
    if alpha < 2.0 || e < 2.0 {
        return None;
    }
    let bits = -(f64::from(k) + 1.0);

    let p1 = Float::ceil(bits / Float::log2(1.0 / alpha));
    let p2 = Float::ceil(bits / Float::log2(1.0 / alpha + (1.0 / e) * (1.0 - 1.0 / alpha)));

    if !(Float::is_finite(p1) && Float::is_finite(p2) && p1 >= 1.0 && p2 >= 1.0) {
        return None;
    }
    Some((p1 as usize, p2 as usize))
}

/// Derives the `m2` challenges for a public key.
///
/// Challenge `i` is the first candidate
/// `mgf1_sha256(key || public_string || I2OSP(i, octet_length(m2)) || I2OSP(j), key_bits)`,
/// `j = 2, 3, ...`, whose integer value is below `N`.
pub fn get_rhos(
    m2: usize,
    public_string: &[u8],
    pub_key: &RsaPublicKey,
    key_bits: usize,
) -> Result<Vec<Vec<u8>>> {
    let n = pub_key.n();
    let key_bytes = pub_key.to_bytes()?;
    let prefix = combine(&key_bytes, public_string);
    let index_len = octet_length(m2);

    (0..m2)
        .map(|i| {
            let seed = combine(&prefix, &i2osp(&i, index_len)?);
            MaskCandidates::new(&seed, key_bits)
                .find(|rho| os2ip(rho) < *n)
                .ok_or(Error::SearchExhausted)
        })
        .collect()
}

/// Returns `true` when no prime `p < alpha` divides `n`.
pub fn check_alpha_n(alpha: u32, n: &BigUint) -> bool {
    primes_up_to(alpha.saturating_sub(1)).all(|p| n.gcd(&BigUint::from(p)).is_one())
}

/// Produces a permutation test proof for `key`.
///
/// Fails with [`Error::KeySizeMismatch`] when the modulus is not exactly
/// `setup.key_size()` bits long.
#[instrument(skip_all, err(Debug))]
pub fn prove(key: &RsaPrivateKey, setup: &PermutationTestSetup) -> Result<PermutationTestProof> {
    setup.check()?;

    let n = key.n();
    let key_bits = n.bits();
    if key_bits != setup.key_size() {
        error!(
            modulus_bits = key_bits,
            key_size = setup.key_size(),
            "Modulus bit length does not match the declared key size"
        );
        return Err(Error::KeySizeMismatch);
    }

    let (p, q) = match key.primes() {
        [p, q] => (p, q),
        _ => return Err(Error::InvalidPrime),
    };

    let (m1, m2) = match get_m1_m2(setup.alpha(), key.e(), setup.security_parameter()) {
        Some(counts) => counts,
        None => {
            error!("Public exponent yields no permutation test challenges");
            return Err(Error::InvalidExponent);
        }
    };

    // Two keys over the same primes, one for each exponent.
    let signing_key = RsaPrivateKey::from_p_q_unchecked(p.clone(), q.clone(), key.e().clone())?;
    let signing_key_prime = RsaPrivateKey::from_p_q_unchecked(p.clone(), q.clone(), n * key.e())?;

    let rhos = get_rhos(
        m2,
        setup.public_string(),
        &signing_key.to_public_key(),
        key_bits,
    )?;

    let signatures = rhos
        .iter()
        .enumerate()
        .map(|(i, rho)| {
            let signer = if i <= m1 {
                &signing_key_prime
            } else {
                &signing_key
            };
            rsa_decrypt_block(signer, None::<&mut DummyRng>, rho)
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(PermutationTestProof::new(signatures))
}

/// Verifies a permutation test proof against a public key.
///
/// Every failure, including a malformed setup or proof, yields `false`; the
/// reason is logged.
pub fn verify(
    pub_key: &RsaPublicKey,
    setup: &PermutationTestSetup,
    proof: &PermutationTestProof,
) -> bool {
    if setup.check().is_err() {
        error!("Permutation test setup is invalid");
        return false;
    }

    let n = pub_key.n();
    let key_bits = setup.key_size();
    if n.bits() != key_bits {
        error!(
            modulus_bits = n.bits(),
            key_size = key_bits,
            "Modulus bit length does not match the declared key size"
        );
        return false;
    }

    if *pub_key.e() < BigUint::from(RsaPublicKey::MIN_PUB_EXPONENT) {
        error!("Public exponent is smaller than 2");
        return false;
    }

    let (m1, m2) = match get_m1_m2(setup.alpha(), pub_key.e(), setup.security_parameter()) {
        Some(counts) => counts,
        None => {
            error!("Public exponent yields no permutation test challenges");
            return false;
        }
    };
    if proof.len() != m2 {
        error!(
            expected = m2,
            actual = proof.len(),
            "Permutation test proof has the wrong number of signatures"
        );
        return false;
    }

    if !check_alpha_n(setup.alpha(), n) {
        error!(alpha = setup.alpha(), "Modulus has a prime factor below alpha");
        return false;
    }

    let pub_key_prime = RsaPublicKey::new_unchecked(n.clone(), n * pub_key.e());

    let rhos = match get_rhos(m2, setup.public_string(), pub_key, key_bits) {
        Ok(rhos) => rhos,
        Err(err) => {
            error!(?err, "Failed to derive the permutation test challenges");
            return false;
        }
    };

    for (i, (signature, rho)) in proof.signatures().iter().zip(rhos.iter()).enumerate() {
        let key = if i <= m1 { &pub_key_prime } else { pub_key };

        if signature.len() != key.size() || os2ip(signature) >= *n {
            error!(index = i, "Permutation test signature is out of range");
            return false;
        }

        let matches = match rsa_encrypt_block(key, signature) {
            Ok(recovered) => bool::from(recovered.as_slice().ct_eq(rho.as_slice())),
            Err(_) => false,
        };
        if !matches {
            error!(index = i, "Permutation test signature does not match its challenge");
            return false;
        }
    }

    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand_chacha::{rand_core::SeedableRng, ChaCha8Rng};

    fn e() -> BigUint {
        BigUint::from(65537u32)
    }

    #[test]
    fn test_m1_m2_reference_values() {
        let cases = [
            (41, (25, 25)),
            (997, (13, 13)),
            (4999, (11, 11)),
            (7649, (10, 11)),
            (20663, (9, 10)),
            (33469, (9, 9)),
        ];
        for (alpha, expected) in cases {
            assert_eq!(get_m1_m2(alpha, &e(), 128), Some(expected), "alpha = {}", alpha);
        }
    }

    #[test]
    fn test_m1_m2_ordering() {
        for alpha in [41, 89, 191, 937, 1667, 3187, 3347, 7151, 8009, 19121, 26981, 65537, 319567] {
            for k in [80, 120, 128] {
                let (m1, m2) = get_m1_m2(alpha, &e(), k).unwrap();
                assert!(m1 <= m2, "alpha = {}, k = {}", alpha, k);
                assert!(m1 > 0);
            }
        }
        assert_eq!(get_m1_m2(65537, &e(), 128), Some((9, 9)));
        assert_eq!(get_m1_m2(319567, &e(), 128), Some((8, 9)));
    }

    #[test]
    fn test_m1_m2_degenerate_exponent() {
        for e in [0u32, 1] {
            assert_eq!(get_m1_m2(41, &BigUint::from(e), 128), None, "e = {}", e);
        }
        assert_eq!(get_m1_m2(1, &e(), 128), None);
        assert!(get_m1_m2(41, &BigUint::from(2u32), 128).is_some());
    }

    #[test]
    fn test_verify_rejects_degenerate_exponent() {
        let mut rng = ChaCha8Rng::from_seed([7; 32]);
        let key = RsaPrivateKey::new(&mut rng, 512).unwrap();
        let setup = PermutationTestSetup::new(b"public string".to_vec(), 41, 512).unwrap();
        let empty = PermutationTestProof::new(Vec::new());

        for e in [0u32, 1] {
            let public_key = RsaPublicKey::new_unchecked(key.n().clone(), BigUint::from(e));
            assert!(check_alpha_n(41, public_key.n()));
            assert!(!verify(&public_key, &setup, &empty), "e = {}", e);
        }
    }

    #[test]
    fn test_check_alpha_n() {
        let n = BigUint::from(41u32 * 1_000_003);
        assert!(check_alpha_n(41, &n));
        assert!(!check_alpha_n(42, &n));

        let even = BigUint::from(2u32 * 1_000_003);
        assert!(!check_alpha_n(3, &even));
        assert!(check_alpha_n(2, &even));
    }

    #[test]
    fn test_rhos_below_modulus_and_deterministic() {
        let mut rng = ChaCha8Rng::from_seed([42; 32]);
        let key = RsaPrivateKey::new(&mut rng, 512).unwrap();
        let public_key = key.to_public_key();

        let rhos = get_rhos(25, b"public string", &public_key, 512).unwrap();
        assert_eq!(rhos.len(), 25);
        for rho in &rhos {
            assert_eq!(rho.len(), 64);
            assert!(os2ip(rho) < *public_key.n());
        }
        assert_eq!(
            rhos,
            get_rhos(25, b"public string", &public_key, 512).unwrap()
        );
        assert_ne!(rhos, get_rhos(25, b"other string", &public_key, 512).unwrap());
    }

    #[test]
    fn test_prove_verify_small_key() {
        let mut rng = ChaCha8Rng::from_seed([7; 32]);
        let key = RsaPrivateKey::new(&mut rng, 512).unwrap();
        let setup = PermutationTestSetup::new(b"public string".to_vec(), 41, 512).unwrap();

        let proof = prove(&key, &setup).unwrap();
        assert_eq!(proof.len(), 25);
        assert!(proof.signatures().iter().all(|s| s.len() == 64));
        assert!(verify(&key.to_public_key(), &setup, &proof));
    }

    #[test]
    fn test_prove_key_size_mismatch() {
        let mut rng = ChaCha8Rng::from_seed([7; 32]);
        let key = RsaPrivateKey::new(&mut rng, 512).unwrap();
        let setup = PermutationTestSetup::new(b"public string".to_vec(), 41, 1024).unwrap();
        assert_eq!(prove(&key, &setup), Err(Error::KeySizeMismatch));
    }
}
