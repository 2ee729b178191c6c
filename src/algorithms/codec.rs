//! Octet string conversions for values that are fed into hash functions.
//!
//! Both sides of a proof hash the same concatenated octet strings, so these
//! conversions have to be bit-for-bit stable.

use alloc::vec::Vec;
use num_bigint::{BigUint, Sign, ToBigInt};
use num_traits::One;

use crate::algorithms::pad::left_pad;
use crate::errors::{Error, Result};

/// Number of octets needed to hold `bits` bits, rounded up.
#[inline]
pub fn byte_length(bits: usize) -> usize {
    (bits + 7) / 8
}

/// Length in octets of the minimal big-endian encoding of `x`.
///
/// Zero still takes one octet, so the result is never zero.
#[inline]
pub fn octet_length(x: usize) -> usize {
    let bits = (usize::BITS - x.leading_zeros()) as usize;
    core::cmp::max(1, byte_length(bits))
}

/// Minimal big-endian encoding of an index, `I2OSP(x, octet_length(x))`.
pub fn encode_index(x: usize) -> Vec<u8> {
    let bytes = x.to_be_bytes();
    bytes[bytes.len() - octet_length(x)..].to_vec()
}

/// Integer-to-octet-string primitive from RFC 8017 section 4.1.
///
/// Encodes `x` big-endian, left padded with zeros to exactly `len` octets.
pub fn i2osp<T: ToBigInt + ?Sized>(x: &T, len: usize) -> Result<Vec<u8>> {
    let x = x.to_bigint().ok_or(Error::EncodingTooShort)?;
    let (sign, bytes) = x.to_bytes_be();
    match sign {
        Sign::Minus => Err(Error::NegativeInput),
        Sign::NoSign => Ok(vec![0u8; len]),
        Sign::Plus => left_pad(&bytes, len).map_err(|_| Error::EncodingTooShort),
    }
}

/// Octet-string-to-integer primitive from RFC 8017 section 4.2.
#[inline]
pub fn os2ip(bytes: &[u8]) -> BigUint {
    BigUint::from_bytes_be(bytes)
}

/// Concatenates two octet strings.
#[inline]
pub fn combine(a: &[u8], b: &[u8]) -> Vec<u8> {
    [a, b].concat()
}

/// Keeps the leading `ceil(bits / 8)` octets of `data`.
///
/// When `bits` is not a multiple of eight the last octet still carries extra
/// bits; see [`mask_to_bits`].
#[inline]
pub fn truncate_to_bits(data: &[u8], bits: usize) -> &[u8] {
    let len = core::cmp::min(byte_length(bits), data.len());
    &data[..len]
}

/// Reduces `x` modulo `2^bits`.
pub fn mask_to_bits(x: &BigUint, bits: usize) -> BigUint {
    let mask = (BigUint::one() << bits) - BigUint::one();
    x & &mask
}

#[cfg(test)]
mod tests {
    use super::*;
    use hex_literal::hex;
    use num_bigint::BigInt;
    use num_traits::FromPrimitive;

    #[test]
    fn test_octet_length() {
        assert_eq!(octet_length(0), 1);
        assert_eq!(octet_length(1), 1);
        assert_eq!(octet_length(255), 1);
        assert_eq!(octet_length(256), 2);
        assert_eq!(octet_length(65535), 2);
        assert_eq!(octet_length(65536), 3);
        assert_eq!(octet_length(129), 1);
    }

    #[test]
    fn test_encode_index() {
        assert_eq!(encode_index(0), vec![0]);
        assert_eq!(encode_index(2), vec![2]);
        assert_eq!(encode_index(256), vec![1, 0]);
        assert_eq!(encode_index(0x01_02_03), vec![1, 2, 3]);
    }

    #[test]
    fn test_i2osp() {
        assert_eq!(i2osp(&5u32, 3).unwrap(), vec![0, 0, 5]);
        assert_eq!(i2osp(&0u32, 2).unwrap(), vec![0, 0]);
        assert_eq!(i2osp(&0u32, 0).unwrap(), Vec::<u8>::new());
        assert_eq!(i2osp(&255u32, 1).unwrap(), vec![255]);
        assert_eq!(i2osp(&256u32, 1), Err(Error::EncodingTooShort));
        assert_eq!(i2osp(&99999999u64, 1), Err(Error::EncodingTooShort));
        assert_eq!(i2osp(&99999999u64, 4).unwrap(), hex!("05f5e0ff").to_vec());

        let big = BigUint::from_bytes_be(&hex!("0102030405060708090a"));
        assert_eq!(
            i2osp(&big, 12).unwrap(),
            hex!("00000102030405060708090a").to_vec()
        );
    }

    #[test]
    fn test_i2osp_negative() {
        let x = BigInt::from_i64(-1).unwrap();
        assert_eq!(i2osp(&x, 4), Err(Error::NegativeInput));
        assert_eq!(i2osp(&-7i32, 4), Err(Error::NegativeInput));
    }

    #[test]
    fn test_os2ip() {
        assert_eq!(os2ip(&[]), BigUint::from(0u32));
        assert_eq!(os2ip(&[0, 0, 0]), BigUint::from(0u32));
        assert_eq!(os2ip(&[0, 0, 1, 0]), BigUint::from(256u32));

        let x = BigUint::from(0xdead_beefu64);
        assert_eq!(os2ip(&i2osp(&x, 9).unwrap()), x);
    }

    #[test]
    fn test_combine() {
        assert_eq!(combine(b"ab", b"cde"), b"abcde".to_vec());
        assert_eq!(combine(b"", b"x"), b"x".to_vec());
    }

    #[test]
    fn test_truncate_to_bits() {
        let data = [1u8, 2, 3, 4];
        assert_eq!(truncate_to_bits(&data, 8), &[1]);
        assert_eq!(truncate_to_bits(&data, 9), &[1, 2]);
        assert_eq!(truncate_to_bits(&data, 0), &[] as &[u8]);
        assert_eq!(truncate_to_bits(&data, 128), &data);
    }

    #[test]
    fn test_mask_to_bits() {
        let x = BigUint::from(0b1111_1111u32);
        assert_eq!(mask_to_bits(&x, 3), BigUint::from(0b111u32));
        assert_eq!(mask_to_bits(&x, 16), x);
    }
}
