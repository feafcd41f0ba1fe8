use ce_causal::CausalProfile;
use ce_core::errors::{CeError, ErrorInfo};
use ce_core::Partition;
use ce_search::{run_exhaustive, run_greedy, EmergenceReport, ExhaustiveOpts, GreedyOpts};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::hash::stable_hash_string;
use crate::systems::{cycle_partition, cycles_tpm};

/// Largest number of noise levels a range grid may expand to.
pub const MAX_SWEEP_POINTS: usize = 100_000;

/// Noise levels visited by a sweep.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum PSelfGrid {
    /// Explicit list of self-loop probabilities.
    Values {
        /// Values in visiting order.
        values: Vec<f64>,
    },
    /// Evenly spaced values from `start` to `stop` inclusive.
    Range {
        /// First value.
        start: f64,
        /// Last value (included when reached within rounding).
        stop: f64,
        /// Positive spacing.
        step: f64,
    },
}

impl PSelfGrid {
    /// Expands the grid into concrete values.
    pub fn values(&self) -> Result<Vec<f64>, CeError> {
        match self {
            PSelfGrid::Values { values } => Ok(values.clone()),
            PSelfGrid::Range { start, stop, step } => {
                if !(*step > 0.0) || !start.is_finite() || !stop.is_finite() {
                    return Err(CeError::Search(
                        ErrorInfo::new("sweep-range", "range needs finite bounds and a positive step")
                            .with_context("start", start)
                            .with_context("stop", stop)
                            .with_context("step", step),
                    ));
                }
                let count = ((stop - start) / step + 1e-9).floor();
                if count < 0.0 {
                    return Ok(Vec::new());
                }
                if count >= MAX_SWEEP_POINTS as f64 {
                    return Err(CeError::Search(
                        ErrorInfo::new("sweep-range", "range expands to too many points")
                            .with_context("step", step)
                            .with_context("max_points", MAX_SWEEP_POINTS)
                            .with_hint("increase the step or list the values explicitly"),
                    ));
                }
                Ok((0..=count as usize)
                    .map(|idx| start + idx as f64 * step)
                    .collect())
            }
        }
    }
}

/// Solver used for every point of a sweep.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum SolverChoice {
    /// Full lattice enumeration.
    Exhaustive {
        /// Solver options.
        #[serde(default)]
        opts: ExhaustiveOpts,
    },
    /// Branching greedy sampler.
    Greedy {
        /// Solver options.
        #[serde(default)]
        opts: GreedyOpts,
    },
}

impl Default for SolverChoice {
    fn default() -> Self {
        SolverChoice::Exhaustive {
            opts: ExhaustiveOpts::default(),
        }
    }
}

impl SolverChoice {
    fn solve(&self, tpm: &ce_core::Tpm) -> Result<EmergenceReport, CeError> {
        match self {
            SolverChoice::Exhaustive { opts } => Ok(run_exhaustive(tpm, &opts.sanitised())?.report),
            SolverChoice::Greedy { opts } => Ok(run_greedy(tpm, &opts.sanitised())?.report),
        }
    }
}

/// Sensitivity sweep over the self-loop probability of a cycle system.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SweepPlan {
    /// Lengths of the disjoint cycles making up the system.
    pub cycle_lengths: Vec<usize>,
    /// Self-loop probabilities to visit.
    pub p_self: PSelfGrid,
    /// Solver applied at every point.
    #[serde(default)]
    pub solver: SolverChoice,
}

/// Measurements at a single noise level.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SweepRow {
    /// Self-loop probability.
    pub p_self: f64,
    /// Scores of the microscale.
    pub micro: CausalProfile,
    /// Scores of the partition grouping each cycle.
    #[serde(rename = "macro")]
    pub macro_: CausalProfile,
    /// `macro.causal_power - micro.causal_power`.
    pub delta_cp: f64,
    /// Emergent scales reported by the solver, microscale included.
    pub n_emergent: usize,
    /// Emergent scales other than the microscale.
    pub n_emergent_excluding_microscale: usize,
    /// Emergent partitions other than the microscale, in canonical order.
    pub emergent_partitions: Vec<Partition>,
    /// Hash of the underlying solver report.
    pub report_hash: String,
}

/// Result of [`run_sweep`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SweepReport {
    /// Hash of the executed plan.
    pub plan_hash: String,
    /// One row per visited noise level.
    pub rows: Vec<SweepRow>,
}

/// Parses a sweep plan from YAML.
pub fn plan_from_yaml(yaml: &str) -> Result<SweepPlan, CeError> {
    serde_yaml::from_str(yaml)
        .map_err(|err| CeError::Serde(ErrorInfo::new("yaml-decode", err.to_string())))
}

/// Parses a sweep plan from JSON.
pub fn plan_from_json(json: &str) -> Result<SweepPlan, CeError> {
    serde_json::from_str(json)
        .map_err(|err| CeError::Serde(ErrorInfo::new("json-decode", err.to_string())))
}

/// Runs the solver on the cycle system at every noise level of the plan.
pub fn run_sweep(plan: &SweepPlan) -> Result<SweepReport, CeError> {
    let plan_hash = stable_hash_string(plan)?;
    let macro_partition = cycle_partition(&plan.cycle_lengths)?;
    let mut rows = Vec::new();
    for p_self in plan.p_self.values()? {
        let tpm = cycles_tpm(&plan.cycle_lengths, p_self)?;
        let micro = CausalProfile::of(&tpm);
        let macro_ = CausalProfile::of_partition(&tpm, &macro_partition)?;
        let report = plan.solver.solve(&tpm)?;
        let emergent_partitions: Vec<Partition> = report
            .emergent_excluding_microscale()
            .into_iter()
            .map(|entry| entry.partition.clone())
            .collect();
        let row = SweepRow {
            p_self,
            micro,
            macro_,
            delta_cp: macro_.causal_power - micro.causal_power,
            n_emergent: report.emergent().count(),
            n_emergent_excluding_microscale: emergent_partitions.len(),
            emergent_partitions,
            report_hash: report.report_hash.clone(),
        };
        info!(
            p_self,
            cp_micro = row.micro.causal_power,
            cp_macro = row.macro_.causal_power,
            delta_cp = row.delta_cp,
            emergent = row.n_emergent_excluding_microscale,
            "sweep point complete"
        );
        rows.push(row);
    }
    Ok(SweepReport { plan_hash, rows })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn range_is_inclusive() {
        let grid = PSelfGrid::Range {
            start: 0.0,
            stop: 0.5,
            step: 0.05,
        };
        let values = grid.values().unwrap();
        assert_eq!(values.len(), 11);
        assert!((values[10] - 0.5).abs() < 1e-12);
    }

    #[test]
    fn bad_range_is_rejected() {
        let grid = PSelfGrid::Range {
            start: 0.0,
            stop: 0.5,
            step: 0.0,
        };
        assert_eq!(grid.values().unwrap_err().code(), "sweep-range");
    }

    #[test]
    fn tiny_step_is_rejected_instead_of_allocating() {
        let grid = PSelfGrid::Range {
            start: 0.0,
            stop: 1.0,
            step: 1e-300,
        };
        let err = grid.values().unwrap_err();
        assert_eq!(err.code(), "sweep-range");
        assert!(err.info().hint.is_some());
    }

    #[test]
    fn range_at_the_point_limit_expands() {
        let grid = PSelfGrid::Range {
            start: 0.0,
            stop: 1.0,
            step: 1.0 / (MAX_SWEEP_POINTS as f64 - 1.0),
        };
        assert_eq!(grid.values().unwrap().len(), MAX_SWEEP_POINTS);
    }
}
