//! Trigger receipts: what the caller learns about a fan-out.

use serde::Serialize;

use dispatch_core::{Channel, DeliveryOutcome, Incident};

/// How a trigger's fan-out went, at batch granularity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum DispatchResult {
    /// At least one notification was accepted.
    Dispatched,
    /// Every notification attempt failed; the incident is recorded but the
    /// caller should escalate through an alternate channel.
    AllFailed,
    /// No eligible responder and no emergency contact; the incident stays
    /// pending.
    NoTargets,
}

/// Who one notification went to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NotifyTarget {
    /// A care facility from the responder directory.
    Responder { id: String },
    /// An emergency contact from the reporter's profile.
    Contact { name: String, phone: String },
}

/// The recorded outcome of one notification attempt.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DeliveryRecord {
    pub target: NotifyTarget,
    pub channel: Channel,
    pub outcome: DeliveryOutcome,
}

/// Everything a trigger call produced.
///
/// The incident is created even when dispatch fails entirely, so a reported
/// emergency is never silently lost.
#[derive(Debug, Clone, Serialize)]
pub struct TriggerReceipt {
    /// The incident as persisted, including its assignment list.
    pub incident: Incident,
    /// One record per notification attempt, responders first.
    pub deliveries: Vec<DeliveryRecord>,
    /// Batch-level dispatch result.
    pub dispatch: DispatchResult,
}

impl TriggerReceipt {
    /// Whether any target acknowledged acceptance at the gateway.
    pub fn any_accepted(&self) -> bool {
        self.deliveries.iter().any(|d| d.outcome.is_accepted())
    }
}
