use ce_core::errors::{CeError, ErrorInfo};
use serde::Serialize;
use sha2::{Digest, Sha256};

use crate::report::{Algorithm, EmergenceReport, ScaleEntry};

fn hash_json<T: Serialize>(value: &T) -> Result<String, CeError> {
    let json = serde_json::to_vec(value)
        .map_err(|err| CeError::Serde(ErrorInfo::new("serialize", err.to_string())))?;
    let mut hasher = Sha256::new();
    hasher.update(json);
    Ok(format!("{:x}", hasher.finalize()))
}

/// Computes the canonical hash of a report, ignoring its stored hash.
pub fn hash_report(report: &EmergenceReport) -> Result<String, CeError> {
    #[derive(Serialize)]
    struct Payload<'a> {
        algorithm: &'a Algorithm,
        num_states: usize,
        epsilon: f64,
        scales: &'a [ScaleEntry],
    }

    hash_json(&Payload {
        algorithm: &report.algorithm,
        num_states: report.num_states,
        epsilon: report.epsilon,
        scales: &report.scales,
    })
}
