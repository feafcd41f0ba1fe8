#![deny(missing_docs)]

//! Partition lattice of a finite set of microstates: exhaustive enumeration,
//! Bell numbers, and the covering relation (Hasse diagram) used for ancestor
//! lookups.

mod enumerate;
mod hasse;

pub use ce_core::is_refinement;
pub use enumerate::{bell_number, generate_all_partitions};
pub use hasse::HasseDiagram;
