//! Error surface shared by the matrix, lattice and solver crates.
//!
//! Every failure carries a stable `code` that tests and callers match on, a
//! message, free-form context and an optional remediation hint.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Payload carried by every [`CeError`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorInfo {
    /// Stable kebab-case code, e.g. `tpm-row-sum`.
    pub code: String,
    /// Human readable message.
    pub message: String,
    /// Offending values keyed by name (row index, state count, sums).
    #[serde(default)]
    pub context: BTreeMap<String, String>,
    /// What the caller can do about it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

impl ErrorInfo {
    /// Payload with no context and no hint.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            context: BTreeMap::new(),
            hint: None,
        }
    }

    /// Records `key = value`, rendering the value with `ToString`.
    pub fn with_context(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.context.insert(key.into(), value.to_string());
        self
    }

    /// Attaches a remediation hint.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }

    /// Looks up a context value.
    pub fn context(&self, key: &str) -> Option<&str> {
        self.context.get(key).map(String::as_str)
    }
}

impl fmt::Display for ErrorInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (code: {})", self.message, self.code)?;
        let mut entries = self.context.iter();
        if let Some((key, value)) = entries.next() {
            write!(f, " [{key}={value}")?;
            for (key, value) in entries {
                write!(f, ", {key}={value}")?;
            }
            f.write_str("]")?;
        }
        match &self.hint {
            Some(hint) => write!(f, "; hint: {hint}"),
            None => Ok(()),
        }
    }
}

/// Failure of any causal emergence operation, grouped by the input at fault.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
#[serde(tag = "family", content = "detail")]
pub enum CeError {
    /// Not a square, finite, non-negative row-stochastic matrix, or a
    /// generator parameter out of range.
    #[error("invalid tpm: {0}")]
    Tpm(ErrorInfo),
    /// Blocks do not exactly cover `0..n`, or do not fit the matrix.
    #[error("partition error: {0}")]
    Partition(ErrorInfo),
    /// Exhaustive enumeration refused or the lattice is incomplete.
    #[error("lattice error: {0}")]
    Lattice(ErrorInfo),
    /// Solver options out of range.
    #[error("search error: {0}")]
    Search(ErrorInfo),
    /// JSON or YAML encoding failure, or a report whose hash does not verify.
    #[error("serde error: {0}")]
    Serde(ErrorInfo),
}

impl CeError {
    /// Payload of the error.
    pub fn info(&self) -> &ErrorInfo {
        let (CeError::Tpm(info)
        | CeError::Partition(info)
        | CeError::Lattice(info)
        | CeError::Search(info)
        | CeError::Serde(info)) = self;
        info
    }

    /// Stable code of the error.
    pub fn code(&self) -> &str {
        &self.info().code
    }

    /// Name of the error family, matching the serialised `family` tag.
    pub fn family(&self) -> &'static str {
        match self {
            CeError::Tpm(_) => "Tpm",
            CeError::Partition(_) => "Partition",
            CeError::Lattice(_) => "Lattice",
            CeError::Search(_) => "Search",
            CeError::Serde(_) => "Serde",
        }
    }

    /// `true` when the exhaustive solver refused the request on size and the
    /// greedy sampler should be used instead.
    pub fn needs_greedy(&self) -> bool {
        matches!(self, CeError::Lattice(info) if info.code == "lattice-too-large")
    }
}
