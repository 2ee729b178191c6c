//! ⚠️ Low-level "hazmat" functions.
//!
//! # ☢️️ WARNING: HAZARDOUS API ☢️
//!
//! This module holds the building blocks of the setup proofs: raw RSA
//! primitives that apply no padding, the octet string codec, the MGF1-SHA256
//! candidate generator and the prime sieve. They are exposed for
//! interoperability testing and for implementing well-reviewed higher-level
//! constructions.
//!
//! We do NOT recommend using the raw RSA functions for anything else.

pub use crate::algorithms::codec::{
    byte_length, combine, encode_index, i2osp, mask_to_bits, octet_length, os2ip,
    truncate_to_bits,
};
pub use crate::algorithms::mgf::{mgf1_sha256, MaskCandidates};
pub use crate::algorithms::rsa::{
    rsa_decrypt, rsa_decrypt_and_check, rsa_decrypt_block, rsa_encrypt, rsa_encrypt_block,
};
pub use crate::algorithms::sieve::{primes_up_to, Primes};
