use ce_core::errors::{CeError, ErrorInfo};

use crate::greedy::GreedyStats;
use crate::report::EmergenceReport;

fn map_err(err: serde_json::Error, code: &str) -> CeError {
    CeError::Serde(ErrorInfo::new(code, err.to_string()))
}

/// Serialises an emergence report to JSON.
pub fn report_to_json(report: &EmergenceReport) -> Result<String, CeError> {
    serde_json::to_string_pretty(report).map_err(|err| map_err(err, "report-serialize"))
}

/// Restores an emergence report from JSON and checks its hash.
pub fn report_from_json(json: &str) -> Result<EmergenceReport, CeError> {
    let report: EmergenceReport =
        serde_json::from_str(json).map_err(|err| map_err(err, "report-deserialize"))?;
    let expected = crate::hash::hash_report(&report)?;
    if expected != report.report_hash {
        return Err(CeError::Serde(
            ErrorInfo::new("report-hash-mismatch", "stored hash does not match report content")
                .with_context("stored", &report.report_hash)
                .with_context("computed", expected),
        ));
    }
    Ok(report)
}

/// Serialises greedy sampler statistics to JSON.
pub fn greedy_stats_to_json(stats: &GreedyStats) -> Result<String, CeError> {
    serde_json::to_string_pretty(stats).map_err(|err| map_err(err, "greedy-stats-serialize"))
}

/// Restores greedy sampler statistics from JSON.
pub fn greedy_stats_from_json(json: &str) -> Result<GreedyStats, CeError> {
    serde_json::from_str(json).map_err(|err| map_err(err, "greedy-stats-deserialize"))
}
