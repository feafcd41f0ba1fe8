//! Experiment utilities around the emergence solvers: deterministic benchmark
//! systems, p_self sensitivity sweeps and exhaustive-versus-greedy comparisons.

mod compare;
mod hash;
mod sweep;
mod systems;

pub use compare::{compare_solvers, SolverComparison};
pub use hash::stable_hash_string;
pub use sweep::{
    plan_from_json, plan_from_yaml, run_sweep, PSelfGrid, SolverChoice, SweepPlan, SweepReport,
    SweepRow, MAX_SWEEP_POINTS,
};
pub use systems::{
    cycle_partition, cycles_tpm, permutation_tpm, random_tpm, two_cycle_tpm, uniform_tpm,
};
