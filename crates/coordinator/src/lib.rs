//! Incident coordination for emergency dispatch.
//!
//! This crate owns the orchestration layer of the dispatch engine: triggering
//! incidents, fanning notifications out to nearby responders and emergency
//! contacts, tracking each responder's reaction independently, and keeping
//! the incident's overall status as an explicit, separate state machine.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use coordinator::{CoordinatorConfig, IncidentCoordinator};
//! use dispatch_core::{EmergencyType, Location};
//!
//! # async fn example(
//! #     geo: Arc<geo_index::GeoIndex>,
//! #     notifier: impl dispatch_core::Notifier,
//! #     store: incident_store::IncidentStore,
//! #     users: Arc<dyn dispatch_core::UserDirectory>,
//! # ) -> Result<(), coordinator::CoordinatorError> {
//! let coordinator =
//!     IncidentCoordinator::new(geo, notifier, store, users, CoordinatorConfig::default());
//!
//! let receipt = coordinator
//!     .trigger("user-1", Location::new(-26.2041, 28.0473), EmergencyType::Maternal, None)
//!     .await?;
//! println!("incident {} is {}", receipt.incident.id, receipt.incident.status);
//! # Ok(())
//! # }
//! ```

mod config;
mod coordinator;
mod error;
mod locks;
mod receipt;
mod tracker;

pub use config::CoordinatorConfig;
pub use coordinator::IncidentCoordinator;
pub use error::CoordinatorError;
pub use locks::IncidentLocks;
pub use receipt::{DeliveryRecord, DispatchResult, NotifyTarget, TriggerReceipt};
pub use tracker::{AcceptedTransition, ResponderTracker};

// Re-export the domain vocabulary callers need to drive the coordinator.
pub use dispatch_core::{
    Channel, DeliveryOutcome, DeliveryState, EmergencyContact, EmergencyType, Incident,
    IncidentStatus, Location, Notifier, Responder, ResponderAssignment, UserDirectory,
};
pub use incident_store::IncidentFilter;
