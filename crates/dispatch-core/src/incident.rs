//! Incident and responder-assignment types with their state machines.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{TransitionError, ValidationError};

/// Category of a reported emergency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmergencyType {
    Maternal,
    Accident,
    Cardiac,
    Other,
}

impl EmergencyType {
    /// Storage/display form.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Maternal => "maternal",
            Self::Accident => "accident",
            Self::Cardiac => "cardiac",
            Self::Other => "other",
        }
    }
}

impl fmt::Display for EmergencyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EmergencyType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "maternal" => Ok(Self::Maternal),
            "accident" => Ok(Self::Accident),
            "cardiac" => Ok(Self::Cardiac),
            "other" => Ok(Self::Other),
            other => Err(format!("unknown emergency type: {}", other)),
        }
    }
}

/// Overall lifecycle of an incident.
///
/// `pending` is the only entry state and `completed` is terminal. The
/// incident status is independent of the per-responder delivery states; the
/// coordinator owns the one aggregation rule that links them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IncidentStatus {
    Pending,
    Dispatched,
    Responded,
    Completed,
}

impl IncidentStatus {
    /// Storage/display form.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Dispatched => "dispatched",
            Self::Responded => "responded",
            Self::Completed => "completed",
        }
    }

    /// Check that moving to `next` strictly advances the lifecycle.
    ///
    /// Backward moves and repeat requests (including terminal-to-terminal)
    /// are rejected.
    pub fn advance_to(self, next: IncidentStatus) -> Result<IncidentStatus, TransitionError> {
        if next > self {
            Ok(next)
        } else {
            Err(TransitionError {
                from: self.as_str(),
                to: next.as_str(),
            })
        }
    }
}

impl fmt::Display for IncidentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for IncidentStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "dispatched" => Ok(Self::Dispatched),
            "responded" => Ok(Self::Responded),
            "completed" => Ok(Self::Completed),
            other => Err(format!("unknown incident status: {}", other)),
        }
    }
}

/// A notified responder's reaction state.
///
/// `notified` is the only entry state (set at fan-out) and `completed` is
/// terminal. Transitions only move strictly forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DeliveryState {
    Notified,
    Enroute,
    OnSite,
    Completed,
}

impl DeliveryState {
    /// Storage/display form.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Notified => "notified",
            Self::Enroute => "enroute",
            Self::OnSite => "on-site",
            Self::Completed => "completed",
        }
    }

    /// Check that moving to `next` strictly advances the state machine.
    pub fn advance_to(self, next: DeliveryState) -> Result<DeliveryState, TransitionError> {
        if next > self {
            Ok(next)
        } else {
            Err(TransitionError {
                from: self.as_str(),
                to: next.as_str(),
            })
        }
    }

    /// Whether this state counts as an acknowledgment (`enroute` or beyond).
    pub fn is_acknowledged(&self) -> bool {
        *self >= Self::Enroute
    }
}

impl fmt::Display for DeliveryState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DeliveryState {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "notified" => Ok(Self::Notified),
            "enroute" => Ok(Self::Enroute),
            "on-site" => Ok(Self::OnSite),
            "completed" => Ok(Self::Completed),
            other => Err(format!("unknown delivery state: {}", other)),
        }
    }
}

/// Notification channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Channel {
    Sms,
    Voice,
}

impl Channel {
    /// Storage/display form.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Sms => "sms",
            Self::Voice => "voice",
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Channel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "sms" => Ok(Self::Sms),
            "voice" => Ok(Self::Voice),
            other => Err(format!("unknown channel: {}", other)),
        }
    }
}

/// A WGS84 coordinate pair in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub latitude: f64,
    pub longitude: f64,
}

impl Location {
    /// Create a location without validating it.
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Validate that both components are finite and in range.
    ///
    /// Latitude must be in [-90, 90], longitude in [-180, 180].
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !self.latitude.is_finite() || !(-90.0..=90.0).contains(&self.latitude) {
            return Err(ValidationError::OutOfRange {
                field: "latitude",
                value: self.latitude,
            });
        }
        if !self.longitude.is_finite() || !(-180.0..=180.0).contains(&self.longitude) {
            return Err(ValidationError::OutOfRange {
                field: "longitude",
                value: self.longitude,
            });
        }
        Ok(())
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.4},{:.4}", self.latitude, self.longitude)
    }
}

/// The record of one responder having been notified about one incident.
///
/// Created at fan-out with `delivery_state = notified` regardless of whether
/// the notification was accepted, so operators can see who failed to be
/// reached. Never removed once created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponderAssignment {
    /// Reference into the responder directory.
    pub responder_id: String,
    /// Channel the notification went out on.
    pub channel: Channel,
    /// The responder's reaction state.
    pub delivery_state: DeliveryState,
    /// Whether the gateway accepted the notification.
    pub accepted: bool,
    /// Provider reference for the send, if one was issued.
    pub provider_ref: Option<String>,
    /// Error detail when the send was rejected.
    pub outcome_error: Option<String>,
    /// When the notification was issued.
    pub notified_at: DateTime<Utc>,
    /// Timestamp of the most recent accepted transition.
    pub response_time: Option<DateTime<Utc>>,
}

/// A single reported emergency and its full response lifecycle.
///
/// Incidents are an immutable audit trail: created once per trigger, mutated
/// only through the coordinator's update operations, never deleted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Incident {
    pub id: String,
    /// The reporting user.
    pub reporter_id: String,
    pub location: Location,
    pub emergency_type: EmergencyType,
    pub additional_info: Option<String>,
    pub status: IncidentStatus,
    pub created_at: DateTime<Utc>,
    /// Set if and only if `status` is `completed`.
    pub resolved_at: Option<DateTime<Utc>>,
    /// One entry per notified responder, in notification order.
    pub assignments: Vec<ResponderAssignment>,
}

impl Incident {
    /// Find the assignment for a responder, if one exists.
    pub fn assignment(&self, responder_id: &str) -> Option<&ResponderAssignment> {
        self.assignments
            .iter()
            .find(|a| a.responder_id == responder_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_incident_status_forward() {
        assert_eq!(
            IncidentStatus::Pending.advance_to(IncidentStatus::Dispatched),
            Ok(IncidentStatus::Dispatched)
        );
        assert_eq!(
            IncidentStatus::Dispatched.advance_to(IncidentStatus::Completed),
            Ok(IncidentStatus::Completed)
        );
    }

    #[test]
    fn test_incident_status_backward_rejected() {
        let err = IncidentStatus::Responded
            .advance_to(IncidentStatus::Dispatched)
            .unwrap_err();
        assert_eq!(err.from, "responded");
        assert_eq!(err.to, "dispatched");
    }

    #[test]
    fn test_incident_status_repeat_rejected() {
        assert!(IncidentStatus::Completed
            .advance_to(IncidentStatus::Completed)
            .is_err());
    }

    #[test]
    fn test_delivery_state_forward() {
        assert_eq!(
            DeliveryState::Notified.advance_to(DeliveryState::OnSite),
            Ok(DeliveryState::OnSite)
        );
    }

    #[test]
    fn test_delivery_state_backward_rejected() {
        assert!(DeliveryState::Completed
            .advance_to(DeliveryState::Enroute)
            .is_err());
        assert!(DeliveryState::OnSite
            .advance_to(DeliveryState::OnSite)
            .is_err());
    }

    #[test]
    fn test_delivery_state_acknowledged() {
        assert!(!DeliveryState::Notified.is_acknowledged());
        assert!(DeliveryState::Enroute.is_acknowledged());
        assert!(DeliveryState::OnSite.is_acknowledged());
        assert!(DeliveryState::Completed.is_acknowledged());
    }

    #[test]
    fn test_location_validate() {
        assert!(Location::new(-26.2041, 28.0473).validate().is_ok());
        assert!(Location::new(90.0, 180.0).validate().is_ok());
        assert!(Location::new(90.1, 0.0).validate().is_err());
        assert!(Location::new(0.0, -180.5).validate().is_err());
        assert!(Location::new(f64::NAN, 0.0).validate().is_err());
    }

    #[test]
    fn test_enum_round_trip() {
        for s in ["notified", "enroute", "on-site", "completed"] {
            let state: DeliveryState = s.parse().unwrap();
            assert_eq!(state.as_str(), s);
        }
        assert!("en-route".parse::<DeliveryState>().is_err());
    }

    #[test]
    fn test_serde_kebab_case() {
        let json = serde_json::to_string(&DeliveryState::OnSite).unwrap();
        assert_eq!(json, "\"on-site\"");
        let json = serde_json::to_string(&EmergencyType::Cardiac).unwrap();
        assert_eq!(json, "\"cardiac\"");
    }
}
