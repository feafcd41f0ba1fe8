use ce_causal::{causal_power, partition_cp};
use ce_core::errors::CeError;
use ce_core::{Partition, Tpm};
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::arena::ScoreArena;
use crate::params::GreedyOpts;
use crate::report::{Algorithm, EmergenceReport};

/// Bookkeeping emitted by the greedy sampler.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GreedyStats {
    /// Branching levels walked along the trunk (microscale to macroscale).
    pub levels: usize,
    /// Greedy completions run; never exceeds the path budget.
    pub paths_completed: usize,
    /// Pairwise-merge candidates scored at branching levels.
    pub candidates_scored: usize,
    /// Distinct partitions in the sampled set.
    pub sampled: usize,
}

/// Materialised greedy search.
#[derive(Debug, Clone)]
pub struct GreedyRun {
    /// Scores and approximate gains of the sampled partitions.
    pub report: EmergenceReport,
    /// Search statistics.
    pub stats: GreedyStats,
}

/// Scores every partition reachable from `current` by merging one pair of
/// blocks, in lexicographic `(i, j)` order over canonical blocks.
pub fn score_pair_merges(tpm: &Tpm, current: &Partition) -> Result<Vec<(Partition, f64)>, CeError> {
    (0..current.len())
        .tuple_combinations()
        .map(|(i, j)| -> Result<(Partition, f64), CeError> {
            let merged = current.merge(i, j)?;
            let cp = partition_cp(tpm, &merged)?;
            Ok((merged, cp))
        })
        .collect()
}

/// Coarsens `start` one best pairwise merge at a time until a single block
/// remains. Returns every visited partition with its CP, `start` included.
/// Ties keep the first merge encountered.
pub fn greedy_completion(tpm: &Tpm, start: &Partition) -> Result<Vec<(Partition, f64)>, CeError> {
    let mut path = vec![(start.clone(), partition_cp(tpm, start)?)];
    let mut current = start.clone();
    while current.len() > 1 {
        let mut best: Option<(Partition, f64)> = None;
        for (i, j) in (0..current.len()).tuple_combinations() {
            let merged = current.merge(i, j)?;
            let cp = partition_cp(tpm, &merged)?;
            if best.as_ref().map_or(true, |(_, best_cp)| cp > *best_cp) {
                best = Some((merged, cp));
            }
        }
        let Some((next, cp)) = best else {
            break;
        };
        current = next.clone();
        path.push((next, cp));
    }
    Ok(path)
}

/// Samples the partition lattice by branching best-first search and computes
/// approximate emergence gains over the sampled set.
///
/// Along a trunk that always follows the best pairwise merge, every candidate
/// at each level is recorded and the top-ranked candidates seed greedy
/// completions to the macroscale, until `opts.paths` completions have run in
/// total. Gains compare each sampled partition only against the other sampled
/// partitions that refine it.
pub fn run_greedy(tpm: &Tpm, opts: &GreedyOpts) -> Result<GreedyRun, CeError> {
    opts.validate()?;
    let n = tpm.n();
    info!(n, paths = opts.paths, "starting greedy emergence search");

    let mut arena = ScoreArena::new();
    let mut current = Partition::microscale(n);
    arena.record(current.clone(), causal_power(tpm));

    let mut levels = 0usize;
    let mut paths_completed = 0usize;
    let mut candidates_scored = 0usize;
    while current.len() > 1 {
        let mut ranked = score_pair_merges(tpm, &current)?;
        candidates_scored += ranked.len();
        for (candidate, cp) in &ranked {
            arena.record(candidate.clone(), *cp);
        }
        ranked.sort_by(|a, b| b.1.total_cmp(&a.1));

        let seeds = opts.paths.min(ranked.len());
        for (seed, _) in ranked.iter().take(seeds) {
            if paths_completed >= opts.paths {
                break;
            }
            for (partition, cp) in greedy_completion(tpm, seed)? {
                arena.record(partition, cp);
            }
            paths_completed += 1;
        }

        levels += 1;
        let Some((next, _)) = ranked.into_iter().next() else {
            break;
        };
        current = next;
        debug!(
            level = levels,
            blocks = current.len(),
            sampled = arena.len(),
            paths_completed,
            "greedy branching level complete"
        );
    }

    let gains = arena.strict_ancestor_gains();
    let report = EmergenceReport::from_scores(
        Algorithm::Greedy { paths: opts.paths },
        n,
        opts.epsilon,
        arena
            .iter()
            .map(|(id, partition, cp)| (partition.clone(), cp, gains[id.index()])),
    )?;
    let stats = GreedyStats {
        levels,
        paths_completed,
        candidates_scored,
        sampled: arena.len(),
    };
    info!(
        n,
        sampled = stats.sampled,
        emergent = report.emergent().count(),
        "greedy emergence search finished"
    );

    Ok(GreedyRun { report, stats })
}
