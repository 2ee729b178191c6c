use alloc::vec::Vec;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::errors::{Error, Result};
use crate::key::RsaPublicKey;
use crate::DEFAULT_SECURITY_PARAMETER;

/// Public parameters of a Poupard-Stern proof.
#[derive(Debug, Clone, Hash, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PoupardSternSetup {
    public_string: Vec<u8>,
    /// Challenge length in bits, at most the SHA-256 output size.
    security_parameter: u32,
    /// Bit length of the modulus.
    key_size: usize,
}

impl PoupardSternSetup {
    /// Largest supported security parameter: the challenge is a truncated
    /// SHA-256 digest.
    pub const MAX_SECURITY_PARAMETER: u32 = 256;

    /// Creates a setup with the default security parameter of 128.
    pub fn new(public_string: impl Into<Vec<u8>>, key_size: usize) -> Result<Self> {
        Self {
            public_string: public_string.into(),
            security_parameter: DEFAULT_SECURITY_PARAMETER,
            key_size,
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

    /// Domain separation string hashed into every base and challenge.
    pub fn public_string(&self) -> &[u8] {
        &self.public_string
    }

    /// Security parameter `k`.
    pub fn security_parameter(&self) -> u32 {
        self.security_parameter
    }

    /// Declared bit length of the modulus.
    pub fn key_size(&self) -> usize {
        self.key_size
    }

    pub(crate) fn check(&self) -> Result<()> {
        if self.security_parameter == 0
            || self.security_parameter > Self::MAX_SECURITY_PARAMETER
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
