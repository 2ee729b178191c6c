//! Mask generation function used to derive the public challenges of both proofs

use alloc::vec::Vec;
use digest::{Digest, FixedOutputReset};
use sha2::Sha256;

use crate::algorithms::codec::{byte_length, combine, encode_index};
use crate::algorithms::CRYPTOGRAPHIC_RETRY_MAX;

/// First sub-index tried when sampling a challenge.
const FIRST_SUB_INDEX: usize = 2;

/// Mask generation function.
///
/// Panics if out is larger than 2**32. This is in accordance with RFC 8017 - PKCS #1 B.2.1
pub(crate) fn mgf1_xor_digest<D>(out: &mut [u8], digest: &mut D, seed: &[u8])
where
    D: Digest + FixedOutputReset,
{
    let mut counter = [0u8; 4];
    let mut i = 0;

    const MAX_LEN: u64 = core::u32::MAX as u64 + 1;
    assert!(out.len() as u64 <= MAX_LEN);

    while i < out.len() {
        Digest::update(digest, seed);
        Digest::update(digest, counter);

        let digest_output = digest.finalize_reset();
        let mut j = 0;
        loop {
            if j >= digest_output.len() || i >= out.len() {
                break;
            }

            out[i] ^= digest_output[j];
            j += 1;
            i += 1;
        }
        inc_counter(&mut counter);
    }
}

fn inc_counter(counter: &mut [u8; 4]) {
    for i in (0..4).rev() {
        counter[i] = counter[i].wrapping_add(1);
        if counter[i] != 0 {
            // No overflow
            return;
        }
    }
}

/// MGF1 with SHA-256, producing `ceil(output_bits / 8)` octets of mask.
pub fn mgf1_sha256(seed: &[u8], output_bits: usize) -> Vec<u8> {
    let mut out = vec![0u8; byte_length(output_bits)];
    mgf1_xor_digest(&mut out, &mut Sha256::new(), seed);
    out
}

/// Hash-derived candidates `mgf1_sha256(prefix || I2OSP(j), bits)` for
/// `j = 2, 3, ...`.
///
/// The sequence ends after [`CRYPTOGRAPHIC_RETRY_MAX`] candidates.
#[derive(Debug, Clone)]
pub struct MaskCandidates<'a> {
    prefix: &'a [u8],
    bits: usize,
    j: usize,
}

impl<'a> MaskCandidates<'a> {
    /// Candidates of `ceil(bits / 8)` octets seeded by `prefix`.
    pub fn new(prefix: &'a [u8], bits: usize) -> Self {
        Self {
            prefix,
            bits,
            j: FIRST_SUB_INDEX,
        }
    }
}

impl Iterator for MaskCandidates<'_> {
    type Item = Vec<u8>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.j >= FIRST_SUB_INDEX + CRYPTOGRAPHIC_RETRY_MAX {
            return None;
        }
        let seed = combine(self.prefix, &encode_index(self.j));
        self.j += 1;
        Some(mgf1_sha256(&seed, self.bits))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = (FIRST_SUB_INDEX + CRYPTOGRAPHIC_RETRY_MAX).saturating_sub(self.j);
        (left, Some(left))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hex_literal::hex;

    #[test]
    fn test_mgf1_sha256_first_block() {
        // A single block is SHA-256(seed || 00000000).
        let mut expected = Sha256::new();
        Digest::update(&mut expected, b"seed");
        Digest::update(&mut expected, [0u8; 4]);
        let expected = expected.finalize();

        assert_eq!(mgf1_sha256(b"seed", 256), expected.as_slice());
        assert_eq!(mgf1_sha256(b"seed", 100), &expected[..13]);
    }

    #[test]
    fn test_mgf1_sha256_known_answer() {
        assert_eq!(
            mgf1_sha256(b"", 512),
            hex!(
                "df3f619804a92fdb4057192dc43dd748ea778adc52bc498ce80524c014b81119"
                "b40711a88c7039756fb8a73827eabe2c0fe5a0346ca7e0a104adc0fc764f528d"
            )
        );
    }

    #[test]
    fn test_mgf1_sha256_deterministic() {
        let a = mgf1_sha256(b"public string", 1024);
        let b = mgf1_sha256(b"public string", 1024);
        assert_eq!(a.len(), 128);
        assert_eq!(a, b);
        assert_ne!(a, mgf1_sha256(b"public strinG", 1024));
    }

    #[test]
    fn test_mask_candidates() {
        let candidates: Vec<_> = MaskCandidates::new(b"prefix", 64).collect();
        assert_eq!(candidates.len(), CRYPTOGRAPHIC_RETRY_MAX);
        assert_eq!(candidates[0], mgf1_sha256(b"prefix\x02", 64));
        assert_eq!(candidates[1], mgf1_sha256(b"prefix\x03", 64));
        assert_eq!(candidates[254], mgf1_sha256(b"prefix\x01\x00", 64));
        assert!(candidates.iter().all(|c| c.len() == 8));
    }
}
