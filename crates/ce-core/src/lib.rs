#![deny(missing_docs)]
#![doc = "Core data types for causal emergence analysis: validated transition matrices, canonical partitions and the shared error surface."]

pub mod errors;
pub mod partition;
pub mod rng;
pub mod tpm;

pub use errors::{CeError, ErrorInfo};
pub use partition::{is_refinement, Partition};
pub use rng::RngHandle;
pub use tpm::{Tpm, ROW_SUM_TOLERANCE};
