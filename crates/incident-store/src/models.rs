//! Row types and their decoding into domain records.

use chrono::{DateTime, Utc};
use sqlx::FromRow;

use dispatch_core::{Incident, Location, ResponderAssignment};

use crate::error::{Result, StoreError};

/// Filter for incident list reads.
///
/// The scope is pre-resolved by the caller's authorization layer; this store
/// only applies it.
#[derive(Debug, Clone, Default)]
pub struct IncidentFilter {
    /// Only incidents reported by this user.
    pub reporter_id: Option<String>,
    /// Only incidents with an assignment for this responder.
    pub responder_id: Option<String>,
}

impl IncidentFilter {
    /// No scoping: all incidents.
    pub fn all() -> Self {
        Self::default()
    }

    /// Scope to a reporting user.
    pub fn by_reporter(reporter_id: impl Into<String>) -> Self {
        Self {
            reporter_id: Some(reporter_id.into()),
            ..Self::default()
        }
    }

    /// Scope to a responder-of-record.
    pub fn by_responder(responder_id: impl Into<String>) -> Self {
        Self {
            responder_id: Some(responder_id.into()),
            ..Self::default()
        }
    }
}

/// An incident row as stored, without its assignments.
#[derive(Debug, Clone, FromRow)]
pub(crate) struct IncidentRow {
    pub id: String,
    pub reporter_id: String,
    pub latitude: f64,
    pub longitude: f64,
    pub emergency_type: String,
    pub additional_info: Option<String>,
    pub status: String,
    pub created_at: String,
    pub resolved_at: Option<String>,
}

impl IncidentRow {
    /// Decode into a domain incident with the given assignments.
    pub fn into_incident(self, assignments: Vec<ResponderAssignment>) -> Result<Incident> {
        Ok(Incident {
            status: parse_field("status", &self.status)?,
            emergency_type: parse_field("emergency_type", &self.emergency_type)?,
            created_at: parse_ts("created_at", &self.created_at)?,
            resolved_at: self
                .resolved_at
                .as_deref()
                .map(|s| parse_ts("resolved_at", s))
                .transpose()?,
            location: Location::new(self.latitude, self.longitude),
            id: self.id,
            reporter_id: self.reporter_id,
            additional_info: self.additional_info,
            assignments,
        })
    }
}

/// A responder assignment row as stored.
#[derive(Debug, Clone, FromRow)]
pub(crate) struct AssignmentRow {
    pub responder_id: String,
    pub channel: String,
    pub delivery_state: String,
    pub accepted: bool,
    pub provider_ref: Option<String>,
    pub outcome_error: Option<String>,
    pub notified_at: String,
    pub response_time: Option<String>,
}

impl AssignmentRow {
    /// Decode into a domain assignment.
    pub fn into_assignment(self) -> Result<ResponderAssignment> {
        Ok(ResponderAssignment {
            channel: parse_field("channel", &self.channel)?,
            delivery_state: parse_field("delivery_state", &self.delivery_state)?,
            notified_at: parse_ts("notified_at", &self.notified_at)?,
            response_time: self
                .response_time
                .as_deref()
                .map(|s| parse_ts("response_time", s))
                .transpose()?,
            responder_id: self.responder_id,
            accepted: self.accepted,
            provider_ref: self.provider_ref,
            outcome_error: self.outcome_error,
        })
    }
}

fn parse_field<T: std::str::FromStr<Err = String>>(field: &'static str, s: &str) -> Result<T> {
    s.parse().map_err(|detail| StoreError::Decode { field, detail })
}

fn parse_ts(field: &'static str, s: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| StoreError::Decode {
            field,
            detail: e.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_incident_row_decodes() {
        let row = IncidentRow {
            id: "inc-1".to_string(),
            reporter_id: "user-1".to_string(),
            latitude: -26.2041,
            longitude: 28.0473,
            emergency_type: "cardiac".to_string(),
            additional_info: None,
            status: "dispatched".to_string(),
            created_at: "2026-03-01T08:00:00+00:00".to_string(),
            resolved_at: None,
        };
        let incident = row.into_incident(Vec::new()).unwrap();
        assert_eq!(incident.status, dispatch_core::IncidentStatus::Dispatched);
        assert!(incident.resolved_at.is_none());
    }

    #[test]
    fn test_corrupt_status_is_decode_error() {
        let row = IncidentRow {
            id: "inc-1".to_string(),
            reporter_id: "user-1".to_string(),
            latitude: 0.0,
            longitude: 0.0,
            emergency_type: "cardiac".to_string(),
            additional_info: None,
            status: "halfway".to_string(),
            created_at: "2026-03-01T08:00:00+00:00".to_string(),
            resolved_at: None,
        };
        assert!(matches!(
            row.into_incident(Vec::new()),
            Err(StoreError::Decode { field: "status", .. })
        ));
    }
}
