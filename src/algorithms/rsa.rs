//! Generic RSA implementation

use alloc::borrow::Cow;
use alloc::vec::Vec;
use num_bigint::Sign::Plus;
use num_bigint::{BigInt, BigUint, IntoBigUint, ModInverse, RandBigInt, ToBigUint};
use num_traits::{One, Signed, Zero};
use rand_core::CryptoRngCore;
use zeroize::{Zeroize, Zeroizing};

use crate::algorithms::pad::uint_to_be_pad;
use crate::errors::{Error, Result};
use crate::traits::{PrivateKeyParts, PublicKeyParts};

/// ⚠️ Raw RSA encryption of m with the public key. No padding is performed.
///
/// # ☢️️ WARNING: HAZARDOUS API ☢️
///
/// Use this function with great care! Raw RSA should never be used without an appropriate padding
/// or signature scheme. See the [module-level documentation][crate::hazmat] for more information.
#[inline]
pub fn rsa_encrypt<K: PublicKeyParts + ?Sized>(key: &K, m: &BigUint) -> Result<BigUint> {
    Ok(m.modpow(key.e(), key.n()))
}

/// ⚠️ Performs raw RSA decryption with no padding or error checking.
///
/// Returns a plaintext `BigUint`. Performs RSA blinding if an `Rng` is passed.
///
/// # ☢️️ WARNING: HAZARDOUS API ☢️
///
/// Use this function with great care! Raw RSA should never be used without an appropriate padding
/// or signature scheme. See the [module-level documentation][crate::hazmat] for more information.
#[inline]
pub fn rsa_decrypt<R: CryptoRngCore + ?Sized>(
    mut rng: Option<&mut R>,
    priv_key: &impl PrivateKeyParts,
    c: &BigUint,
) -> Result<BigUint> {
    if c >= priv_key.n() {
        return Err(Error::Decryption);
    }

    if priv_key.n().is_zero() {
        return Err(Error::Decryption);
    }

    let mut ir = None;

    let c = if let Some(ref mut rng) = rng {
        let (blinded, unblinder) = blind(rng, priv_key, c);
        ir = Some(unblinder);
        Cow::Owned(blinded)
    } else {
        Cow::Borrowed(c)
    };

    let m = match (priv_key.dp(), priv_key.dq(), priv_key.qinv()) {
        (Some(dp), Some(dq), Some(qinv)) => {
            // We have the precalculated values needed for the CRT.
            let p = BigInt::from_biguint(Plus, priv_key.primes()[0].clone());

            let mut m = BigInt::from_biguint(Plus, c.modpow(dp, &priv_key.primes()[0]));
            let mut m2 = BigInt::from_biguint(Plus, c.modpow(dq, &priv_key.primes()[1]));

            m -= &m2;
            while m.is_negative() {
                m += &p;
            }
            m *= qinv;
            m %= &p;
            m *= BigInt::from_biguint(Plus, priv_key.primes()[1].clone());
            m += &m2;

            // clear tmp values
            m2.zeroize();

            m.into_biguint().ok_or(Error::Internal)?
        }
        _ => c.modpow(priv_key.d(), priv_key.n()),
    };

    match ir {
        Some(ref ir) => {
            // unblind
            Ok(unblind(priv_key, &m, ir))
        }
        None => Ok(m),
    }
}

/// ⚠️ Performs raw RSA decryption with no padding.
///
/// Returns a plaintext `BigUint`. Performs RSA blinding if an `Rng` is passed.  This will also
/// check for errors in the CRT computation.
///
/// # ☢️️ WARNING: HAZARDOUS API ☢️
///
/// Use this function with great care! Raw RSA should never be used without an appropriate padding
/// or signature scheme. See the [module-level documentation][crate::hazmat] for more information.
#[inline]
pub fn rsa_decrypt_and_check<R: CryptoRngCore + ?Sized>(
    priv_key: &impl PrivateKeyParts,
    rng: Option<&mut R>,
    c: &BigUint,
) -> Result<BigUint> {
    let m = rsa_decrypt(rng, priv_key, c)?;

    // In order to defend against errors in the CRT computation, m^e is
    // calculated, which should match the original ciphertext.
    let check = rsa_encrypt(priv_key, &m)?;

    if c != &check {
        return Err(Error::Internal);
    }

    Ok(m)
}

/// ⚠️ Raw RSA encryption of a big-endian block, output left padded to the
/// modulus size.
///
/// # ☢️️ WARNING: HAZARDOUS API ☢️
///
/// See the [module-level documentation][crate::hazmat] for more information.
pub fn rsa_encrypt_block<K: PublicKeyParts + ?Sized>(key: &K, block: &[u8]) -> Result<Vec<u8>> {
    let m = BigUint::from_bytes_be(block);
    let c = rsa_encrypt(key, &m)?;
    uint_to_be_pad(&c, key.size())
}

/// ⚠️ Raw RSA decryption of a big-endian block, output left padded to the
/// modulus size. CRT faults are detected as in [`rsa_decrypt_and_check`].
///
/// # ☢️️ WARNING: HAZARDOUS API ☢️
///
/// See the [module-level documentation][crate::hazmat] for more information.
pub fn rsa_decrypt_block<R: CryptoRngCore + ?Sized>(
    priv_key: &impl PrivateKeyParts,
    rng: Option<&mut R>,
    block: &[u8],
) -> Result<Vec<u8>> {
    let c = BigUint::from_bytes_be(block);
    let m = Zeroizing::new(rsa_decrypt_and_check(priv_key, rng, &c)?);
    uint_to_be_pad(&m, priv_key.size())
}

/// Returns the blinded c, along with the unblinding factor.
fn blind<R: CryptoRngCore + ?Sized, K: PublicKeyParts + ?Sized>(
    rng: &mut R,
    key: &K,
    c: &BigUint,
) -> (BigUint, BigUint) {
    // Blinding involves multiplying c by r^e.
    // Then the decryption operation performs (m^e * r^e)^d mod n
    // which equals mr mod n. The factor of r can then be removed
    // by multiplying by the multiplicative inverse of r.

    let mut r: BigUint;
    let unblinder;
    loop {
        r = rng.gen_biguint_below(key.n());
        if r.is_zero() {
            r = BigUint::one();
        }
        if let Some(ub) = r
            .clone()
            .mod_inverse(key.n())
            .and_then(|ir| ir.into_biguint())
        {
            unblinder = ub;
            break;
        }
    }

    let c = {
        let mut rpowe = r.modpow(key.e(), key.n()); // N != 0
        let mut c = c * &rpowe;
        c %= key.n();

        rpowe.zeroize();

        c
    };

    (c, unblinder)
}

/// Given an m and and unblinding factor, unblind the m.
fn unblind(key: &impl PublicKeyParts, m: &BigUint, unblinder: &BigUint) -> BigUint {
    (m * unblinder) % key.n()
}

/// Compute the private exponent from its public exponent (e) and the
/// Euler totient of the primes.
pub(crate) fn compute_private_exponent_euler_totient(
    primes: &[BigUint],
    exp: &BigUint,
) -> Result<BigUint> {
    if primes.len() < 2 {
        return Err(Error::InvalidPrime);
    }

    let mut totient = BigUint::one();
    for prime in primes {
        if prime <= &BigUint::one() {
            return Err(Error::InvalidPrime);
        }
        totient *= prime - BigUint::one();
    }

    // The exponent may exceed the totient (e' = N·e does), so reduce it first.
    (exp % &totient)
        .mod_inverse(&totient)
        .and_then(|d| d.to_biguint())
        .ok_or(Error::InvalidExponent)
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_traits::FromPrimitive;

    #[test]
    fn test_private_exponent() {
        // p = 61, q = 53, e = 17 is the textbook example with d = 2753.
        let primes = [BigUint::from(61u32), BigUint::from(53u32)];
        let d = compute_private_exponent_euler_totient(&primes, &BigUint::from(17u32)).unwrap();
        assert_eq!(d, BigUint::from_u32(2753).unwrap());

        // e shares a factor with the totient.
        assert_eq!(
            compute_private_exponent_euler_totient(&primes, &BigUint::from(13u32)),
            Err(Error::InvalidExponent)
        );

        // Exponents larger than the totient are reduced first.
        let big_e = BigUint::from(17u32 + 3120 * 5);
        let d = compute_private_exponent_euler_totient(&primes, &big_e).unwrap();
        assert_eq!(d, BigUint::from(2753u32));
    }
}
