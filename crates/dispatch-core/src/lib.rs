//! Core types and traits for the emergency dispatch engine.
//!
//! This crate provides the shared vocabulary for the dispatch workspace:
//!
//! - [`Incident`] / [`ResponderAssignment`] - the emergency record and its
//!   per-responder sub-records
//! - [`IncidentStatus`] / [`DeliveryState`] - the two state machines, with
//!   strictly-forward transition rules
//! - [`Notifier`] - the trait implemented by the notification dispatcher
//! - [`UserDirectory`] - lookup of a reporter's emergency contacts
//!
//! # Example
//!
//! ```rust
//! use dispatch_core::{DeliveryOutcome, Notifier, NotificationPayload};
//! use async_trait::async_trait;
//!
//! struct AlwaysAccepts;
//!
//! #[async_trait]
//! impl Notifier for AlwaysAccepts {
//!     async fn notify(&self, _target: &str, _payload: &NotificationPayload) -> DeliveryOutcome {
//!         DeliveryOutcome::accepted(None)
//!     }
//! }
//! ```

mod directory;
mod error;
mod incident;
mod notify;
mod responder;

pub use directory::{DirectoryError, UserDirectory};
pub use error::{TransitionError, ValidationError};
pub use incident::{
    Channel, DeliveryState, EmergencyType, Incident, IncidentStatus, Location,
    ResponderAssignment,
};
pub use notify::{DeliveryOutcome, DeliveryStatus, NotificationPayload, Notifier, MAX_SMS_LEN};
pub use responder::{EmergencyContact, Responder, EMERGENCY_SERVICE};

// Re-export async_trait for convenience
pub use async_trait::async_trait;
