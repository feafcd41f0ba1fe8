use ce_core::errors::CeError;
use ce_core::Tpm;
use ce_search::{run_exhaustive, run_greedy, ExhaustiveOpts, GreedyOpts, ScaleEntry};
use serde::{Deserialize, Serialize};
use tracing::info;

/// Side by side outcome of both solvers on one matrix.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SolverComparison {
    /// Number of microstates.
    pub num_states: usize,
    /// Best emergent non-microscale partition found by enumeration.
    pub exhaustive_best: Option<ScaleEntry>,
    /// Best emergent non-microscale partition found by the sampler.
    pub greedy_best: Option<ScaleEntry>,
    /// Both solvers name the same best partition (or both find none).
    pub agree: bool,
    /// The exhaustive best is emergent in the greedy report too.
    pub greedy_contains_exhaustive_best: bool,
    /// Partitions scored by the sampler.
    pub sampled: usize,
    /// Size of the full lattice.
    pub lattice_size: usize,
    /// `sampled / lattice_size`.
    pub coverage: f64,
}

/// Runs both solvers on `tpm` and compares their best emergent scales.
pub fn compare_solvers(
    tpm: &Tpm,
    exhaustive: &ExhaustiveOpts,
    greedy: &GreedyOpts,
) -> Result<SolverComparison, CeError> {
    let exact = run_exhaustive(tpm, exhaustive)?.report;
    let sampled = run_greedy(tpm, greedy)?;

    let exhaustive_best = exact.best_emergent().cloned();
    let greedy_best = sampled.report.best_emergent().cloned();
    let agree = match (&exhaustive_best, &greedy_best) {
        (Some(a), Some(b)) => a.partition == b.partition,
        (None, None) => true,
        _ => false,
    };
    let greedy_contains_exhaustive_best = exhaustive_best
        .as_ref()
        .map_or(true, |best| {
            sampled
                .report
                .entry(&best.partition)
                .map_or(false, |entry| entry.emergent)
        });
    let lattice_size = exact.len();
    let coverage = if lattice_size == 0 {
        0.0
    } else {
        sampled.stats.sampled as f64 / lattice_size as f64
    };

    info!(
        n = tpm.n(),
        agree,
        sampled = sampled.stats.sampled,
        lattice_size,
        "solver comparison finished"
    );

    Ok(SolverComparison {
        num_states: tpm.n(),
        exhaustive_best,
        greedy_best,
        agree,
        greedy_contains_exhaustive_best,
        sampled: sampled.stats.sampled,
        lattice_size,
        coverage,
    })
}
