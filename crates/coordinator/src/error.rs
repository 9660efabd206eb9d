//! Error types for coordinator operations.

use dispatch_core::{TransitionError, ValidationError};
use incident_store::StoreError;
use thiserror::Error;

/// Errors that can occur while coordinating an incident.
#[derive(Debug, Error)]
pub enum CoordinatorError {
    /// Malformed trigger request; rejected before any side effect.
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationError),

    /// Unknown incident or assignment; no side effect.
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    /// Illegal state change; the current state is left untouched.
    #[error(transparent)]
    InvalidTransition(#[from] TransitionError),

    /// Persistence failed; the caller may retry.
    #[error(transparent)]
    Storage(StoreError),
}

impl From<StoreError> for CoordinatorError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound { entity, id } => Self::NotFound { entity, id },
            other => Self::Storage(other),
        }
    }
}
