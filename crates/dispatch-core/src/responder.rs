//! Read-only reference data owned by the external directories.

use serde::{Deserialize, Serialize};

use crate::incident::Location;

/// Service tag a responder must carry to be eligible for emergency dispatch.
pub const EMERGENCY_SERVICE: &str = "emergency";

/// A care facility eligible to be dispatched to an incident.
///
/// Owned by the external responder directory; this engine only reads it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Responder {
    pub id: String,
    pub name: String,
    /// Phone number notifications are sent to.
    pub contact_channel: String,
    pub location: Location,
    /// Service tags, e.g. "emergency", "maternity".
    pub accepted_service_types: Vec<String>,
}

impl Responder {
    /// Whether this responder accepts the given service, case-insensitively.
    pub fn accepts_service(&self, service: &str) -> bool {
        self.accepted_service_types
            .iter()
            .any(|s| s.eq_ignore_ascii_case(service))
    }
}

/// An emergency contact embedded in the reporting user's profile.
///
/// Contacts are notified over the voice channel and their delivery outcome is
/// tracked, but they are not part of the responder state machine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmergencyContact {
    pub name: String,
    pub phone: String,
    pub relationship: String,
    pub is_primary: bool,
}
