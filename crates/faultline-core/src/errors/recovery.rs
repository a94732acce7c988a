//! RecoveryAction enum: what a caller should do when an engine operation fails.

use std::fmt;

use super::FaultlineError;

/// Recommended recovery action for a failed operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecoveryAction {
    /// Retry the operation (a concurrent writer moved the record).
    Retry,
    /// Fall back to a degraded but functional alternative.
    Fallback,
    /// Escalate to the caller. This error cannot be handled silently.
    Escalate,
    /// Ignore the error. The operation was best-effort.
    Ignore,
}

impl RecoveryAction {
    /// Determine the recommended recovery action for a FaultlineError.
    pub fn for_error(error: &FaultlineError) -> Self {
        match error {
            // Lost-update guard: re-read and retry
            FaultlineError::OutcomeUpdateConflict { .. } => Self::Retry,

            // Malformed input: substitute safe defaults
            FaultlineError::InvalidInput(_) => Self::Fallback,

            // Caller referenced a record that does not exist
            FaultlineError::PatternNotFound { .. } => Self::Escalate,

            // Config errors must be fixed by the operator
            FaultlineError::Config(_) => Self::Escalate,
            FaultlineError::TomlParse(_) => Self::Escalate,
            FaultlineError::Io(_) => Self::Escalate,
            FaultlineError::Serialization(_) => Self::Escalate,

            // Elaboration is optional prose: drop it
            FaultlineError::Elaboration(_) => Self::Ignore,
        }
    }

    /// Whether the failed operation may be attempted again unchanged.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Retry)
    }
}

impl fmt::Display for RecoveryAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Retry => write!(f, "Retry"),
            Self::Fallback => write!(f, "Fallback"),
            Self::Escalate => write!(f, "Escalate"),
            Self::Ignore => write!(f, "Ignore"),
        }
    }
}
