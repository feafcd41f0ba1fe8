use ce_causal::partition_cp;
use ce_core::errors::{CeError, ErrorInfo};
use ce_core::Tpm;
use ce_lattice::{bell_number, generate_all_partitions, HasseDiagram};
use tracing::{info, warn};

use crate::params::ExhaustiveOpts;
use crate::report::{Algorithm, EmergenceReport};

/// Materialised exhaustive search.
#[derive(Debug)]
pub struct ExhaustiveRun {
    /// Scores and gains of every partition of the state set.
    pub report: EmergenceReport,
    /// Covering relation over the full lattice, indexed like `generate_all_partitions`.
    pub hasse: HasseDiagram,
}

/// Scores every partition of the microstates and computes its exact gain over
/// the best strict refinement.
///
/// Refuses systems with more than `opts.max_states` states; the lattice grows
/// as the Bell number and the greedy sampler is the intended path there.
pub fn run_exhaustive(tpm: &Tpm, opts: &ExhaustiveOpts) -> Result<ExhaustiveRun, CeError> {
    opts.validate()?;
    let n = tpm.n();
    if n > opts.max_states {
        let partitions = bell_number(n).map_or_else(|| "overflow".to_string(), |b| b.to_string());
        warn!(n, max_states = opts.max_states, %partitions, "exhaustive search refused");
        return Err(CeError::Lattice(
            ErrorInfo::new("lattice-too-large", "state count exceeds the exhaustive bound")
                .with_context("n", n)
                .with_context("max_states", opts.max_states)
                .with_context("partitions", partitions)
                .with_hint("use the greedy sampler for large systems"),
        ));
    }

    info!(n, "starting exhaustive emergence search");
    let partitions = generate_all_partitions(n);
    let scores = partitions
        .iter()
        .map(|partition| partition_cp(tpm, partition))
        .collect::<Result<Vec<f64>, CeError>>()?;
    let hasse = HasseDiagram::from_lattice(&partitions)?;

    // Best CP over all strict refinements, propagated from fine to coarse.
    let mut best_below: Vec<Option<f64>> = vec![None; partitions.len()];
    for node in hasse.fine_to_coarse() {
        let mut best: Option<f64> = None;
        for &finer in hasse.covered(node) {
            let candidate = best_below[finer].map_or(scores[finer], |b| b.max(scores[finer]));
            best = Some(best.map_or(candidate, |current| current.max(candidate)));
        }
        best_below[node] = best;
    }

    let report = EmergenceReport::from_scores(
        Algorithm::Exhaustive,
        n,
        opts.epsilon,
        partitions
            .iter()
            .zip(&scores)
            .zip(&best_below)
            .map(|((partition, &cp), baseline)| {
                (partition.clone(), cp, cp - baseline.unwrap_or(0.0))
            }),
    )?;
    info!(
        n,
        partitions = report.len(),
        edges = hasse.edge_count(),
        emergent = report.emergent().count(),
        "exhaustive emergence search finished"
    );

    Ok(ExhaustiveRun { report, hasse })
}
