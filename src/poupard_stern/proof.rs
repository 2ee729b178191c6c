use alloc::vec::Vec;
use num_bigint::BigUint;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Output of the Poupard-Stern prover: the commitments `x_i = z_i^r mod N`
/// and the response `y`.
#[derive(Debug, Clone, Hash, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PoupardSternProof {
    x_values: Vec<BigUint>,
    y: BigUint,
}

impl PoupardSternProof {
    /// Assembles a proof from its commitments and response.
    pub fn new(x_values: Vec<BigUint>, y: BigUint) -> Self {
        Self { x_values, y }
    }

    /// Commitments, one per base `z_i`.
    pub fn x_values(&self) -> &[BigUint] {
        &self.x_values
    }

    /// Response `y = r + (N - φ(N))·w`.
    pub fn y(&self) -> &BigUint {
        &self.y
    }
}
