//! Lease domain errors

use thiserror::Error;

/// Errors that can occur in the lease domain
#[derive(Debug, Error)]
pub enum LeaseError {
    /// Input rejected before any mutation
    #[error("Validation error: {0}")]
    Validation(String),

    /// Illegal lease status transition
    #[error("Invalid state transition: {0}")]
    InvalidTransition(String),
}

impl LeaseError {
    pub fn validation(message: impl Into<String>) -> Self {
        LeaseError::Validation(message.into())
    }
}
