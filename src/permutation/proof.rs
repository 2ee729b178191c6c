use alloc::vec::Vec;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Output of the permutation test prover: one raw RSA signature per
/// challenge, each as wide as the modulus.
#[derive(Debug, Clone, Hash, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PermutationTestProof {
    signatures: Vec<Vec<u8>>,
}

impl PermutationTestProof {
    /// Wraps a list of signatures, in challenge order.
    pub fn new(signatures: Vec<Vec<u8>>) -> Self {
        Self { signatures }
    }

    /// The signatures, in challenge order.
    pub fn signatures(&self) -> &[Vec<u8>] {
        &self.signatures
    }

    /// Number of signatures.
    pub fn len(&self) -> usize {
        self.signatures.len()
    }

    /// Whether the proof holds no signatures at all.
    pub fn is_empty(&self) -> bool {
        self.signatures.is_empty()
    }

    /// Unwraps the signatures.
    pub fn into_signatures(self) -> Vec<Vec<u8>> {
        self.signatures
    }
}

impl From<Vec<Vec<u8>>> for PermutationTestProof {
    fn from(signatures: Vec<Vec<u8>>) -> Self {
        Self::new(signatures)
    }
}
