use ce_core::errors::{CeError, ErrorInfo};
use serde::{Deserialize, Serialize};

/// Default numerical threshold above which a ΔCP counts as emergent.
pub const DEFAULT_EPSILON: f64 = 1e-10;
/// Default branching width of the greedy sampler.
pub const DEFAULT_PATHS: usize = 100;
/// Default largest state count accepted by the exhaustive solver.
pub const DEFAULT_MAX_EXHAUSTIVE_STATES: usize = 10;

fn default_epsilon() -> f64 {
    DEFAULT_EPSILON
}

fn default_paths() -> usize {
    DEFAULT_PATHS
}

fn default_max_states() -> usize {
    DEFAULT_MAX_EXHAUSTIVE_STATES
}

/// Options controlling the exhaustive solver.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExhaustiveOpts {
    /// Emergence threshold on ΔCP.
    #[serde(default = "default_epsilon")]
    pub epsilon: f64,
    /// Requests with more states are refused in favour of the greedy sampler.
    #[serde(default = "default_max_states")]
    pub max_states: usize,
}

impl Default for ExhaustiveOpts {
    fn default() -> Self {
        Self {
            epsilon: DEFAULT_EPSILON,
            max_states: DEFAULT_MAX_EXHAUSTIVE_STATES,
        }
    }
}

impl ExhaustiveOpts {
    /// Returns a copy with the threshold clamped to a finite non-negative value.
    pub fn sanitised(&self) -> Self {
        Self {
            epsilon: sanitise_epsilon(self.epsilon),
            max_states: self.max_states.max(1),
        }
    }

    /// Rejects thresholds that are negative or not finite.
    pub fn validate(&self) -> Result<(), CeError> {
        validate_epsilon(self.epsilon)
    }
}

/// Options controlling the greedy sampler.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GreedyOpts {
    /// Emergence threshold on ΔCP.
    #[serde(default = "default_epsilon")]
    pub epsilon: f64,
    /// Global budget of greedy path completions (branching width K).
    #[serde(default = "default_paths")]
    pub paths: usize,
}

impl Default for GreedyOpts {
    fn default() -> Self {
        Self {
            epsilon: DEFAULT_EPSILON,
            paths: DEFAULT_PATHS,
        }
    }
}

impl GreedyOpts {
    /// Returns a copy with at least one path and a finite non-negative threshold.
    pub fn sanitised(&self) -> Self {
        Self {
            epsilon: sanitise_epsilon(self.epsilon),
            paths: self.paths.max(1),
        }
    }

    /// Rejects a zero path budget and thresholds that are negative or not finite.
    pub fn validate(&self) -> Result<(), CeError> {
        if self.paths == 0 {
            return Err(CeError::Search(
                ErrorInfo::new("greedy-zero-paths", "the greedy sampler needs at least one path")
                    .with_hint("use GreedyOpts::sanitised or set paths >= 1"),
            ));
        }
        validate_epsilon(self.epsilon)
    }
}

fn sanitise_epsilon(epsilon: f64) -> f64 {
    if epsilon.is_finite() {
        epsilon.max(0.0)
    } else {
        DEFAULT_EPSILON
    }
}

fn validate_epsilon(epsilon: f64) -> Result<(), CeError> {
    if !epsilon.is_finite() || epsilon < 0.0 {
        return Err(CeError::Search(
            ErrorInfo::new("invalid-epsilon", "emergence threshold must be finite and non-negative")
                .with_context("epsilon", epsilon),
        ));
    }
    Ok(())
}
