//! Shared error types for the dispatch domain.

use thiserror::Error;

/// Validation failures for inbound trigger requests.
///
/// Raised before any persistence or notification side effect.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// A coordinate component is outside its legal range or not finite.
    #[error("{field} out of range: {value}")]
    OutOfRange { field: &'static str, value: f64 },

    /// A required field is missing or empty.
    #[error("{0} is required")]
    Missing(&'static str),
}

/// An illegal state-machine transition.
///
/// Both the incident status machine and the per-responder delivery-state
/// machine only move strictly forward; everything else is rejected with the
/// current state left untouched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid transition: {from} -> {to}")]
pub struct TransitionError {
    /// State the record is currently in.
    pub from: &'static str,
    /// State that was requested.
    pub to: &'static str,
}
