use std::collections::BTreeMap;

use ce_core::errors::CeError;
use ce_core::Partition;
use serde::{Deserialize, Serialize};

use crate::hash::hash_report;

/// Solver that produced an [`EmergenceReport`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum Algorithm {
    /// Full lattice enumeration.
    Exhaustive,
    /// Branching greedy sampler.
    Greedy {
        /// Path budget used for the run.
        paths: usize,
    },
}

/// Score of a single partition within a report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScaleEntry {
    /// Partition in canonical form.
    pub partition: Partition,
    /// Causal power of the coarse-grained matrix.
    pub cp: f64,
    /// Gain over the best strict refinement in the working set.
    pub delta_cp: f64,
    /// Whether `delta_cp` exceeds the report threshold.
    pub emergent: bool,
}

/// Per-partition causal power and emergence gain for one system.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmergenceReport {
    /// Solver used.
    pub algorithm: Algorithm,
    /// Number of microstates of the analysed matrix.
    pub num_states: usize,
    /// Emergence threshold applied to ΔCP.
    pub epsilon: f64,
    /// Scored partitions sorted by canonical order.
    pub scales: Vec<ScaleEntry>,
    /// Deterministic SHA-256 hash of the fields above.
    pub report_hash: String,
}

impl EmergenceReport {
    /// Assembles a report from `(partition, cp, delta_cp)` triples.
    pub fn from_scores(
        algorithm: Algorithm,
        num_states: usize,
        epsilon: f64,
        scores: impl IntoIterator<Item = (Partition, f64, f64)>,
    ) -> Result<Self, CeError> {
        let mut scales: Vec<ScaleEntry> = scores
            .into_iter()
            .map(|(partition, cp, delta_cp)| ScaleEntry {
                partition,
                cp,
                delta_cp,
                emergent: delta_cp > epsilon,
            })
            .collect();
        scales.sort_by(|a, b| a.partition.cmp(&b.partition));
        let mut report = Self {
            algorithm,
            num_states,
            epsilon,
            scales,
            report_hash: String::new(),
        };
        report.report_hash = hash_report(&report)?;
        Ok(report)
    }

    /// Number of scored partitions.
    pub fn len(&self) -> usize {
        self.scales.len()
    }

    /// Returns `true` when no partition was scored.
    pub fn is_empty(&self) -> bool {
        self.scales.is_empty()
    }

    /// Entry for `partition`, if it was scored.
    pub fn entry(&self, partition: &Partition) -> Option<&ScaleEntry> {
        self.scales
            .binary_search_by(|entry| entry.partition.cmp(partition))
            .ok()
            .map(|idx| &self.scales[idx])
    }

    /// Causal power of `partition`, if it was scored.
    pub fn cp_of(&self, partition: &Partition) -> Option<f64> {
        self.entry(partition).map(|entry| entry.cp)
    }

    /// Emergence gain of `partition`, if it was scored.
    pub fn delta_cp_of(&self, partition: &Partition) -> Option<f64> {
        self.entry(partition).map(|entry| entry.delta_cp)
    }

    /// Causal power of the microscale.
    pub fn microscale_cp(&self) -> Option<f64> {
        self.cp_of(&Partition::microscale(self.num_states))
    }

    /// Partition to CP map.
    pub fn score_map(&self) -> BTreeMap<Partition, f64> {
        self.scales
            .iter()
            .map(|entry| (entry.partition.clone(), entry.cp))
            .collect()
    }

    /// Partition to ΔCP map.
    pub fn delta_map(&self) -> BTreeMap<Partition, f64> {
        self.scales
            .iter()
            .map(|entry| (entry.partition.clone(), entry.delta_cp))
            .collect()
    }

    /// Entries whose ΔCP exceeds the threshold, in canonical order.
    ///
    /// The microscale has no refinement and its ΔCP equals its own CP, so it
    /// is included whenever that CP is positive.
    pub fn emergent(&self) -> impl Iterator<Item = &ScaleEntry> + '_ {
        self.scales.iter().filter(|entry| entry.emergent)
    }

    /// Emergent partitions, in canonical order.
    pub fn emergent_partitions(&self) -> Vec<Partition> {
        self.emergent().map(|entry| entry.partition.clone()).collect()
    }

    /// Emergent entries other than the microscale.
    pub fn emergent_excluding_microscale(&self) -> Vec<&ScaleEntry> {
        self.emergent()
            .filter(|entry| !entry.partition.is_microscale())
            .collect()
    }

    /// Up to `count` entries ordered by descending ΔCP (ties by canonical order).
    pub fn top_by_delta(&self, count: usize) -> Vec<&ScaleEntry> {
        let mut ranked: Vec<&ScaleEntry> = self.scales.iter().collect();
        ranked.sort_by(|a, b| b.delta_cp.total_cmp(&a.delta_cp));
        ranked.truncate(count);
        ranked
    }

    /// Emergent non-microscale entry with the largest ΔCP, preferring higher CP
    /// and then canonical order on ties.
    pub fn best_emergent(&self) -> Option<&ScaleEntry> {
        self.emergent_excluding_microscale()
            .into_iter()
            .reduce(|best, entry| {
                let better = entry
                    .delta_cp
                    .total_cmp(&best.delta_cp)
                    .then(entry.cp.total_cmp(&best.cp))
                    .is_gt();
                if better {
                    entry
                } else {
                    best
                }
            })
    }
}
