#![cfg_attr(not(test), no_std)]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]
#![doc = include_str!("../README.md")]
#![warn(missing_docs)]

//! # Protocols
//!
//! - [Permutation test](permutation): the modulus has no prime factor below
//!   a public bound `alpha`.
//! - [Poupard-Stern](poupard_stern): the prover knows `φ(N)`, and therefore
//!   the factorization of `N`.
//!
//! Both proofs are non-interactive. Their challenges are derived from the
//! public key's DER encoding, the setup's public string and an index, so a
//! verifier recomputes them from public data alone.
//!
//! # Logging
//!
//! Verification returns a plain `bool`. The reason for a rejection is emitted
//! as a [`tracing`] event at the `ERROR` level; install a subscriber to see
//! it.
//!
//! # Key encoding
//!
//! [`RsaPrivateKey`] and [`RsaPublicKey`] implement the [`pkcs8`] traits,
//! and through blanket impls the [`pkcs1`] ones, so keys to prove about can
//! be loaded from DER or PEM:
//!
//! ```
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! # #[cfg(all(feature = "pem", feature = "std"))]
//! # {
//! use rsa_setup_proofs::{RsaPublicKey, pkcs8::DecodePublicKey};
//!
//! let pem = "-----BEGIN PUBLIC KEY-----
//! MIIBIjANBgkqhkiG9w0BAQEFAAOCAQ8AMIIBCgKCAQEAtsQsUV8QpqrygsY+2+JC
//! Q6Fw8/omM71IM2N/R8pPbzbgOl0p78MZGsgPOQ2HSznjD0FPzsH8oO2B5Uftws04
//! LHb2HJAYlz25+lN5cqfHAfa3fgmC38FfwBkn7l582UtPWZ/wcBOnyCgb3yLcvJrX
//! yrt8QxHJgvWO23ITrUVYszImbXQ67YGS0YhMrbixRzmo2tpm3JcIBtnHrEUMsT0N
//! fFdfsZhTT8YbxBvA8FdODgEwx7u/vf3J9qbi4+Kv8cvqyJuleIRSjVXPsIMnoejI
//! n04APPKIjpMyQdnWlby7rNyQtE4+CV+jcFjqJbE/Xilcvqxt6DirjFCvYeKYl1uH
//! LwIDAQAB
//! -----END PUBLIC KEY-----";
//!
//! let public_key = RsaPublicKey::from_public_key_pem(pem)?;
//! # }
//! # Ok(())
//! # }
//! ```

#[cfg(doctest)]
pub struct ReadmeDoctests;

#[macro_use]
extern crate alloc;
#[cfg(feature = "std")]
extern crate std;

pub use num_bigint::BigUint;
pub use rand_core;

mod algorithms;
pub mod errors;
pub mod permutation;
pub mod poupard_stern;
pub mod traits;

mod dummy_rng;
mod encoding;
mod key;

pub use pkcs1;
pub use pkcs8;
pub use sha2;

pub use crate::{
    algorithms::CRYPTOGRAPHIC_RETRY_MAX,
    errors::{Error, Result},
    key::{RsaPrivateKey, RsaPublicKey},
    permutation::{PermutationTestProof, PermutationTestSetup},
    poupard_stern::{PoupardSternProof, PoupardSternSetup},
};

/// Security parameter `k` used when a setup does not name one.
pub const DEFAULT_SECURITY_PARAMETER: u32 = 128;

/// Public string used by the reference deployment.
pub const DEFAULT_PUBLIC_STRING: &[u8] = b"public string";

#[cfg(feature = "hazmat")]
pub mod hazmat;
