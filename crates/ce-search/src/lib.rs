#![deny(missing_docs)]
#![doc = "Partition-space search for causal emergence: exact lattice enumeration for small systems and a branching greedy sampler for large ones."]

/// Dense partition-keyed score storage.
pub mod arena;
/// Exact search over the full partition lattice.
pub mod exhaustive;
/// Branching greedy sampler.
pub mod greedy;
/// Canonical hashing of reports.
pub mod hash;
/// Solver options.
pub mod params;
/// Emergence report shared by both solvers.
pub mod report;
/// Serde helpers for JSON artefacts.
#[path = "serde.rs"]
pub mod serde_io;

pub use arena::{PartitionId, ScoreArena};
pub use exhaustive::{run_exhaustive, ExhaustiveRun};
pub use greedy::{greedy_completion, run_greedy, score_pair_merges, GreedyRun, GreedyStats};
pub use params::{
    ExhaustiveOpts, GreedyOpts, DEFAULT_EPSILON, DEFAULT_MAX_EXHAUSTIVE_STATES, DEFAULT_PATHS,
};
pub use report::{Algorithm, EmergenceReport, ScaleEntry};
