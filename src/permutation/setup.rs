use alloc::vec::Vec;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::errors::{Error, Result};
use crate::key::RsaPublicKey;
use crate::DEFAULT_SECURITY_PARAMETER;

/// Public parameters of a permutation test, agreed on by prover and verifier.
#[derive(Debug, Clone, Hash, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PermutationTestSetup {
    public_string: Vec<u8>,
    /// Claimed lower bound on the prime factors of the modulus.
    alpha: u32,
    /// Soundness error is about `2^-k`.
    security_parameter: u32,
    /// Bit length of the modulus.
    key_size: usize,
}

impl PermutationTestSetup {
    /// Creates a setup with the default security parameter of 128.
    pub fn new(public_string: impl Into<Vec<u8>>, alpha: u32, key_size: usize) -> Result<Self> {
        Self {
            public_string: public_string.into(),
            alpha,
            security_parameter: DEFAULT_SECURITY_PARAMETER,
            key_size,
        }
        .checked()
    }

    /// Copy of this setup with a different `alpha`.
    pub fn with_alpha(&self, alpha: u32) -> Result<Self> {
        Self {
            alpha,
            ..self.clone()
        }
        .checked()
    }

    /// Copy of this setup with a different security parameter `k`.
    pub fn with_security_parameter(&self, k: u32) -> Result<Self> {
        Self {
            security_parameter: k,
            ..self.clone()
        }
        .checked()
    }

    /// Copy of this setup with a different declared key size.
    pub fn with_key_size(&self, key_size: usize) -> Result<Self> {
        Self {
            key_size,
            ..self.clone()
        }
        .checked()
    }

    /// Copy of this setup with a different public string.
    pub fn with_public_string(&self, public_string: impl Into<Vec<u8>>) -> Self {
        Self {
            public_string: public_string.into(),
            ..self.clone()
        }
    }

    /// Domain separation string hashed into every challenge.
    pub fn public_string(&self) -> &[u8] {
        &self.public_string
    }

    /// No prime below `alpha` may divide the modulus.
    pub fn alpha(&self) -> u32 {
        self.alpha
    }

    /// Security parameter `k`.
    pub fn security_parameter(&self) -> u32 {
        self.security_parameter
    }

    /// Declared bit length of the modulus.
    pub fn key_size(&self) -> usize {
        self.key_size
    }

    /// Checks the invariants. Setups can also arrive through deserialization,
    /// so the protocol re-checks before use.
    pub(crate) fn check(&self) -> Result<()> {
        if self.alpha <= 1
            || self.security_parameter == 0
            || self.key_size == 0
            || self.key_size > RsaPublicKey::MAX_SIZE
        {
            return Err(Error::InvalidSetup);
        }
        Ok(())
    }

    fn checked(self) -> Result<Self> {
        self.check()?;
        Ok(self)
    }
}
