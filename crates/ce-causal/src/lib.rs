#![deny(missing_docs)]
#![doc = "Causal power engine: entropy based determinism and degeneracy scores and partition coarse-graining of transition matrices."]

/// Partition driven coarse-graining of transition matrices.
pub mod coarse;
/// Determinism, degeneracy and causal power.
pub mod metrics;

use ce_core::{CeError, Partition, Tpm};
use serde::{Deserialize, Serialize};

pub use coarse::coarse_grain_tpm;
pub use metrics::{causal_power, degeneracy, determinism};

/// All causal scores of a single transition matrix.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CausalProfile {
    /// `1 - H(E|C) / log2(n)`.
    pub determinism: f64,
    /// `1 - H(E) / log2(n)`.
    pub degeneracy: f64,
    /// `1 - degeneracy`.
    pub specificity: f64,
    /// `determinism + specificity - 1`.
    pub causal_power: f64,
}

impl CausalProfile {
    /// Scores the matrix as given.
    pub fn of(tpm: &Tpm) -> Self {
        let determinism = determinism(tpm);
        let degeneracy = degeneracy(tpm);
        let specificity = 1.0 - degeneracy;
        Self {
            determinism,
            degeneracy,
            specificity,
            causal_power: determinism + specificity - 1.0,
        }
    }

    /// Scores the matrix after coarse-graining it by `partition`.
    pub fn of_partition(tpm: &Tpm, partition: &Partition) -> Result<Self, CeError> {
        Ok(Self::of(&coarse_grain_tpm(tpm, partition)?))
    }
}

/// Causal power of `tpm` coarse-grained by `partition`.
pub fn partition_cp(tpm: &Tpm, partition: &Partition) -> Result<f64, CeError> {
    Ok(causal_power(&coarse_grain_tpm(tpm, partition)?))
}
