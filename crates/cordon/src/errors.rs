//! Guard error types.

use thiserror::Error;

use crate::types::GuardToken;

/// Error type a guard's own evaluation may surface
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Guard resolution and evaluation errors
#[derive(Debug, Error)]
pub enum GuardError {
    /// No guard registered under the referenced token
    #[error("No guard registered for token: {0}")]
    Unresolved(GuardToken),

    /// A guard's evaluation failed; the original error is preserved as-is
    #[error(transparent)]
    Evaluation(#[from] BoxError),

    /// A stream-shaped outcome completed without producing a verdict
    #[error("Guard evaluation produced no verdict")]
    NoVerdict,
}

impl GuardError {
    /// Wrap a guard's own failure without losing its identity
    pub fn evaluation(err: impl Into<BoxError>) -> Self {
        GuardError::Evaluation(err.into())
    }
}

/// Result type for guard operations
pub type Result<T> = std::result::Result<T, GuardError>;
