//! Notification payloads, delivery outcomes, and the dispatcher trait.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::incident::{Channel, EmergencyType, Location};

/// Upper bound on composed SMS alert bodies (two concatenated segments).
pub const MAX_SMS_LEN: usize = 320;

/// Content of one outbound notification.
///
/// The payload variant carries the channel, so a send can never pair an SMS
/// body with a voice call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum NotificationPayload {
    /// A bounded-length text message.
    Sms { body: String },
    /// A voice call playing a hosted audio resource.
    Voice { audio_url: String, caller_id: String },
}

impl NotificationPayload {
    /// Compose the SMS alert body for an emergency.
    ///
    /// Format follows the operator-facing alert text: type, coordinates, and
    /// any additional info, truncated to [`MAX_SMS_LEN`].
    pub fn sms_alert(
        emergency_type: EmergencyType,
        location: Location,
        additional_info: Option<&str>,
    ) -> Self {
        let mut body = format!(
            "EMERGENCY ALERT! Type: {}\nLocation: {}\nAdditional Info: {}",
            emergency_type,
            location,
            additional_info.unwrap_or("None"),
        );
        if body.len() > MAX_SMS_LEN {
            let cut = (0..=MAX_SMS_LEN)
                .rev()
                .find(|i| body.is_char_boundary(*i))
                .unwrap_or(0);
            body.truncate(cut);
        }
        Self::Sms { body }
    }

    /// Compose the voice-call payload for an emergency contact.
    pub fn voice_alert(audio_url: impl Into<String>, caller_id: impl Into<String>) -> Self {
        Self::Voice {
            audio_url: audio_url.into(),
            caller_id: caller_id.into(),
        }
    }

    /// The channel this payload goes out on.
    pub fn channel(&self) -> Channel {
        match self {
            Self::Sms { .. } => Channel::Sms,
            Self::Voice { .. } => Channel::Voice,
        }
    }
}

/// Whether the gateway accepted a single notification attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeliveryStatus {
    Accepted,
    Rejected,
}

/// Outcome of one notification attempt, independent of whether the recipient
/// acted on it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeliveryOutcome {
    pub status: DeliveryStatus,
    /// Gateway-issued reference for the send, when accepted.
    pub provider_ref: Option<String>,
    /// Error detail, when rejected.
    pub error: Option<String>,
}

impl DeliveryOutcome {
    /// An accepted outcome with an optional provider reference.
    pub fn accepted(provider_ref: Option<String>) -> Self {
        Self {
            status: DeliveryStatus::Accepted,
            provider_ref,
            error: None,
        }
    }

    /// A rejected outcome with an error description.
    pub fn rejected(error: impl Into<String>) -> Self {
        Self {
            status: DeliveryStatus::Rejected,
            provider_ref: None,
            error: Some(error.into()),
        }
    }

    /// Whether the gateway accepted the send.
    pub fn is_accepted(&self) -> bool {
        self.status == DeliveryStatus::Accepted
    }
}

/// Trait for sending one notification to one target.
///
/// Implementations never fail the caller: every attempt resolves to a
/// [`DeliveryOutcome`], so a single bad number cannot abort a fan-out batch.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Send `payload` to `target` (a phone number) and report the outcome.
    async fn notify(&self, target: &str, payload: &NotificationPayload) -> DeliveryOutcome;
}
