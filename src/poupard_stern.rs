//! Poupard-Stern proof of knowledge of `φ(N)`, made non-interactive with the
//! Fiat-Shamir transform.
//!
//! The prover commits to `x_i = z_i^r mod N` for `K = k + 1` hash-derived
//! bases `z_i` and a secret `r < 2^(|N| - 1)`. The challenge `w` is a
//! `k`-bit hash of the commitments and the response is
//! `y = r + (N - φ(N))·w`. The verifier accepts when
//! `z_i^(y - N·w) = x_i mod N` holds for every base. The check passes because
//! `y - N·w = r - φ(N)·w`.

mod proof;
mod setup;

pub use self::{proof::PoupardSternProof, setup::PoupardSternSetup};

use alloc::vec::Vec;
use digest::Digest;
use num_bigint::{BigUint, ModInverse, RandBigInt, ToBigUint};
use num_integer::Integer;
use num_traits::One;
use rand_core::CryptoRngCore;
use sha2::Sha256;
use tracing::{error, instrument};
use zeroize::Zeroizing;

use crate::algorithms::codec::{
    byte_length, combine, i2osp, mask_to_bits, octet_length, os2ip, truncate_to_bits,
};
use crate::algorithms::mgf::MaskCandidates;
use crate::algorithms::CRYPTOGRAPHIC_RETRY_MAX;
use crate::errors::{Error, Result};
use crate::key::{RsaPrivateKey, RsaPublicKey};
use crate::traits::{PrivateKeyParts, PublicKeyParts};

/// Number of bases `K` for security parameter `k`.
#[inline]
pub fn get_k(k: u32) -> usize {
    k as usize + 1
}

/// Derives base `z_i`, an element of `Z_N^*`.
///
/// The base is the first candidate
/// `mgf1_sha256(key || public_string || I2OSP(i, octet_length(K)) || I2OSP(j), key_bits)`,
/// `j = 2, 3, ...`, that is below `N` and coprime to it.
pub fn sample_from_zn_star(
    pub_key: &RsaPublicKey,
    public_string: &[u8],
    i: usize,
    big_k: usize,
    key_bits: usize,
) -> Result<BigUint> {
    let prefix = combine(&pub_key.to_bytes()?, public_string);
    sample_with_prefix(&prefix, pub_key.n(), i, big_k, key_bits)
}

fn sample_with_prefix(
    prefix: &[u8],
    n: &BigUint,
    i: usize,
    big_k: usize,
    key_bits: usize,
) -> Result<BigUint> {
    let seed = combine(prefix, &i2osp(&i, octet_length(big_k))?);
    MaskCandidates::new(&seed, key_bits)
        .map(|candidate| os2ip(&candidate))
        .find(|z| z < n && z.gcd(n).is_one())
        .ok_or(Error::SearchExhausted)
}

/// All `K` bases, hashing the public key once.
fn sample_bases(
    pub_key: &RsaPublicKey,
    public_string: &[u8],
    big_k: usize,
    key_bits: usize,
) -> Result<Vec<BigUint>> {
    let prefix = combine(&pub_key.to_bytes()?, public_string);
    (0..big_k)
        .map(|i| sample_with_prefix(&prefix, pub_key.n(), i, big_k, key_bits))
        .collect()
}

/// Samples the secret commitment exponent, uniform in `[0, 2^(key_bits - 1))`.
pub fn get_r<R: CryptoRngCore + ?Sized>(rng: &mut R, key_bits: usize) -> BigUint {
    rng.gen_biguint(key_bits.saturating_sub(1))
}

/// Computes the `k`-bit challenge
/// `SHA-256(key || public_string || I2OSP(x_0, |N|/8) || ... )`.
pub fn get_w(
    pub_key: &RsaPublicKey,
    public_string: &[u8],
    x_values: &[BigUint],
    k: u32,
    key_bits: usize,
) -> Result<BigUint> {
    let x_len = byte_length(key_bits);

    let mut hasher = Sha256::new();
    Digest::update(&mut hasher, pub_key.to_bytes()?);
    Digest::update(&mut hasher, public_string);
    for x in x_values {
        Digest::update(&mut hasher, i2osp(x, x_len)?);
    }
    let digest = hasher.finalize();

    let k = k as usize;
    Ok(mask_to_bits(&os2ip(truncate_to_bits(&digest, k)), k))
}

/// Produces a Poupard-Stern proof for `key`.
///
/// Fails with [`Error::KeySizeMismatch`] when the modulus is not exactly
/// `setup.key_size()` bits long, and with [`Error::BadModulus`] when the
/// modulus is too small for `r` to hide `(N - φ(N))·w`.
#[instrument(skip_all, err(Debug))]
pub fn prove<R: CryptoRngCore + ?Sized>(
    rng: &mut R,
    key: &RsaPrivateKey,
    setup: &PoupardSternSetup,
) -> Result<PoupardSternProof> {
    setup.check()?;

    let n = key.n();
    let key_bits = setup.key_size();
    if n.bits() != key_bits {
        error!(
            modulus_bits = n.bits(),
            key_size = key_bits,
            "Modulus bit length does not match the declared key size"
        );
        return Err(Error::KeySizeMismatch);
    }

    let (p, q) = match key.primes() {
        [p, q] => (p, q),
        _ => return Err(Error::InvalidPrime),
    };

    let k = setup.security_parameter() as usize;
    let phi = Zeroizing::new((p - BigUint::one()) * (q - BigUint::one()));
    let n_minus_phi = Zeroizing::new(n - &*phi);
    let upper = BigUint::one() << (key_bits - 1);

    if n <= &upper {
        error!("Modulus is not larger than 2^(key_size - 1)");
        return Err(Error::BadModulus);
    }
    if &*n_minus_phi << k >= *n {
        error!("(N - phi(N)) * 2^k is not smaller than the modulus");
        return Err(Error::BadModulus);
    }
    if &*n_minus_phi << (2 * k) >= upper {
        error!(
            key_size = key_bits,
            security_parameter = k,
            "Modulus is too small for the security parameter"
        );
        return Err(Error::BadModulus);
    }

    let public_key = key.to_public_key();
    let big_k = get_k(setup.security_parameter());
    let bases = sample_bases(&public_key, setup.public_string(), big_k, key_bits)?;

    for _ in 0..CRYPTOGRAPHIC_RETRY_MAX {
        let r = Zeroizing::new(get_r(rng, key_bits));
        let x_values: Vec<BigUint> = bases.iter().map(|z| z.modpow(&r, n)).collect();
        let w = get_w(
            &public_key,
            setup.public_string(),
            &x_values,
            setup.security_parameter(),
            key_bits,
        )?;

        let y = &*r + &*n_minus_phi * &w;
        if y < upper {
            return Ok(PoupardSternProof::new(x_values, y));
        }
    }

    error!("Failed to find a response below 2^(key_size - 1)");
    Err(Error::SearchExhausted)
}

/// Verifies a Poupard-Stern proof against a public key.
///
/// Every failure, including a malformed setup or proof, yields `false`; the
/// reason is logged.
pub fn verify(pub_key: &RsaPublicKey, setup: &PoupardSternSetup, proof: &PoupardSternProof) -> bool {
    if setup.check().is_err() {
        error!("Poupard-Stern setup is invalid");
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

    // key_bits is now bounded by the modulus itself.
    let upper = BigUint::one() << (key_bits - 1);
    if n <= &upper {
        error!("Modulus is not larger than 2^(key_size - 1)");
        return false;
    }
    if proof.y() >= &upper {
        error!("Response y is not smaller than 2^(key_size - 1)");
        return false;
    }

    let big_k = get_k(setup.security_parameter());
    if proof.x_values().len() != big_k {
        error!(
            expected = big_k,
            actual = proof.x_values().len(),
            "Poupard-Stern proof has the wrong number of commitments"
        );
        return false;
    }

    let w = match get_w(
        pub_key,
        setup.public_string(),
        proof.x_values(),
        setup.security_parameter(),
        key_bits,
    ) {
        Ok(w) => w,
        Err(err) => {
            error!(?err, "Failed to compute the Poupard-Stern challenge");
            return false;
        }
    };

    let bases = match sample_bases(pub_key, setup.public_string(), big_k, key_bits) {
        Ok(bases) => bases,
        Err(err) => {
            error!(?err, "Failed to derive the Poupard-Stern bases");
            return false;
        }
    };

    // r' = y - N·w is negative unless w = 0; then z^r' = (z^-1)^(N·w - y).
    let n_w = n * &w;
    let (exponent, negative) = if proof.y() >= &n_w {
        (proof.y() - &n_w, false)
    } else {
        (&n_w - proof.y(), true)
    };

    for (i, (z, x)) in bases.iter().zip(proof.x_values()).enumerate() {
        let base = if negative {
            match z.mod_inverse(n).and_then(|inv| inv.to_biguint()) {
                Some(inv) => inv,
                None => {
                    error!(index = i, "Base is not invertible modulo N");
                    return false;
                }
            }
        } else {
            z.clone()
        };

        if base.modpow(&exponent, n) != *x {
            error!(index = i, "Poupard-Stern commitment does not match");
            return false;
        }
    }

    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand_chacha::{rand_core::SeedableRng, ChaCha8Rng};

    fn key(bits: usize) -> RsaPrivateKey {
        let mut rng = ChaCha8Rng::from_seed([42; 32]);
        RsaPrivateKey::new(&mut rng, bits).unwrap()
    }

    #[test]
    fn test_get_k() {
        assert_eq!(get_k(80), 81);
        assert_eq!(get_k(128), 129);
    }

    #[test]
    fn test_get_r_range() {
        let mut rng = ChaCha8Rng::from_seed([1; 32]);
        for _ in 0..32 {
            assert!(get_r(&mut rng, 1024).bits() <= 1023);
        }
    }

    #[test]
    fn test_sample_from_zn_star() {
        let key = key(512);
        let public_key = key.to_public_key();

        let z = sample_from_zn_star(&public_key, b"public string", 3, 129, 512).unwrap();
        assert!(&z < public_key.n());
        assert!(z.gcd(public_key.n()).is_one());
        assert_eq!(
            z,
            sample_from_zn_star(&public_key, b"public string", 3, 129, 512).unwrap()
        );

        let bases = sample_bases(&public_key, b"public string", 129, 512).unwrap();
        assert_eq!(bases.len(), 129);
        assert_eq!(bases[3], z);
    }

    #[test]
    fn test_get_w_bits() {
        let key = key(512);
        let public_key = key.to_public_key();
        let x_values = vec![BigUint::from(5u32); 3];

        for k in [1u32, 7, 80, 128, 256] {
            let w = get_w(&public_key, b"ps", &x_values, k, 512).unwrap();
            assert!(w.bits() <= k as usize);
        }

        let too_big = vec![BigUint::one() << 600];
        assert_eq!(
            get_w(&public_key, b"ps", &too_big, 128, 512),
            Err(Error::EncodingTooShort)
        );
    }

    #[test]
    fn test_prove_verify_small_security_parameter() {
        let key = key(512);
        let setup = PoupardSternSetup::new(b"public string".to_vec(), 512)
            .unwrap()
            .with_security_parameter(32)
            .unwrap();

        let mut rng = ChaCha8Rng::from_seed([9; 32]);
        let proof = prove(&mut rng, &key, &setup).unwrap();
        assert_eq!(proof.x_values().len(), 33);
        assert!(verify(&key.to_public_key(), &setup, &proof));
    }

    #[test]
    fn test_verify_rejects_key_size_before_shifting() {
        let key = key(512);
        let setup = PoupardSternSetup::new(b"public string".to_vec(), 512)
            .unwrap()
            .with_security_parameter(32)
            .unwrap();
        let mut rng = ChaCha8Rng::from_seed([9; 32]);
        let proof = prove(&mut rng, &key, &setup).unwrap();

        let public_key = key.to_public_key();
        for key_size in [1, 511, 513, RsaPublicKey::MAX_SIZE] {
            let altered = setup.with_key_size(key_size).unwrap();
            assert!(!verify(&public_key, &altered, &proof), "key_size = {}", key_size);
        }
    }

    #[test]
    fn test_prove_rejects_small_modulus() {
        let key = key(512);
        let setup = PoupardSternSetup::new(b"public string".to_vec(), 512).unwrap();
        let mut rng = ChaCha8Rng::from_seed([9; 32]);
        assert_eq!(prove(&mut rng, &key, &setup), Err(Error::BadModulus));
    }
}
