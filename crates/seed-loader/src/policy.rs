//! Recovery policy: which failures enter row-by-row fallback and which row
//! failures are skipped.

use crate::error::{ErrorClass, SinkError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Set of error classes a policy decision applies to.
///
/// Connection errors are outside every scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorScope {
    /// Only uniqueness violations
    #[serde(rename = "uniqueness")]
    Uniqueness,
    /// Any database-reported error
    #[serde(rename = "any")]
    AnyDatabaseError,
}

impl ErrorScope {
    /// Whether an error of `class` falls within this scope.
    pub fn covers(&self, class: ErrorClass) -> bool {
        match (self, class) {
            (_, ErrorClass::Connection) => false,
            (ErrorScope::Uniqueness, ErrorClass::UniquenessViolation) => true,
            (ErrorScope::Uniqueness, ErrorClass::Other) => false,
            (ErrorScope::AnyDatabaseError, _) => true,
        }
    }
}

impl FromStr for ErrorScope {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "uniqueness" => Ok(ErrorScope::Uniqueness),
            "any" => Ok(ErrorScope::AnyDatabaseError),
            other => Err(format!(
                "unknown error scope '{other}' (expected 'uniqueness' or 'any')"
            )),
        }
    }
}

impl fmt::Display for ErrorScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorScope::Uniqueness => f.write_str("uniqueness"),
            ErrorScope::AnyDatabaseError => f.write_str("any"),
        }
    }
}

/// How the loader reacts to batch and row failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecoveryPolicy {
    /// Batch failures that are retried row by row; others abort the run
    pub batch_fallback: ErrorScope,
    /// Row failures that are skipped during fallback; others abort the run
    pub row_skip: ErrorScope,
}

impl Default for RecoveryPolicy {
    fn default() -> Self {
        Self {
            batch_fallback: ErrorScope::Uniqueness,
            row_skip: ErrorScope::AnyDatabaseError,
        }
    }
}

impl RecoveryPolicy {
    /// Whether a failed batch should be retried row by row.
    pub fn falls_back(&self, error: &SinkError) -> bool {
        self.batch_fallback.covers(error.class())
    }

    /// Whether a failed row may be skipped.
    pub fn skips_row(&self, error: &SinkError) -> bool {
        self.row_skip.covers(error.class())
    }
}
