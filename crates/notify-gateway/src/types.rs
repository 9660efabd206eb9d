//! Request and receipt types for the notification gateway.

use serde::{Deserialize, Serialize};

/// Parameters for sending an SMS.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SmsParams {
    /// Recipient phone number.
    pub to: String,
    /// Message text.
    pub body: String,
    /// Sender number; filled from config if not set.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from: Option<String>,
}

impl SmsParams {
    /// Create SMS params for a recipient and body.
    pub fn new(to: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            to: to.into(),
            body: body.into(),
            from: None,
        }
    }

    /// Set an explicit sender number.
    pub fn with_from(mut self, from: impl Into<String>) -> Self {
        self.from = Some(from.into());
        self
    }
}

/// Parameters for placing a voice call.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CallParams {
    /// Recipient phone number.
    pub to: String,
    /// Hosted audio/TwiML resource played to the callee.
    pub audio_url: String,
    /// Caller id to present; filled from config if not set.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from: Option<String>,
}

impl CallParams {
    /// Create call params for a recipient and audio resource.
    pub fn new(to: impl Into<String>, audio_url: impl Into<String>) -> Self {
        Self {
            to: to.into(),
            audio_url: audio_url.into(),
            from: None,
        }
    }

    /// Set an explicit caller id.
    pub fn with_from(mut self, from: impl Into<String>) -> Self {
        self.from = Some(from.into());
        self
    }
}

/// Receipt returned by the gateway once it accepts a send.
///
/// Acceptance means the provider queued the notification, not that the
/// recipient received it.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryReceipt {
    /// Provider-issued reference for the send.
    pub reference: String,
    /// Provider-side status string (e.g., "queued", "sent").
    #[serde(default)]
    pub status: Option<String>,
}

/// Error body the gateway returns on rejection.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ApiErrorBody {
    #[serde(default)]
    pub message: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sms_params_serialization() {
        let params = SmsParams::new("+27831112222", "hello").with_from("+100");
        let json = serde_json::to_value(&params).unwrap();
        assert_eq!(json["to"], "+27831112222");
        assert_eq!(json["body"], "hello");
        assert_eq!(json["from"], "+100");
    }

    #[test]
    fn test_sms_params_skips_missing_from() {
        let params = SmsParams::new("+27831112222", "hello");
        let json = serde_json::to_value(&params).unwrap();
        assert!(json.get("from").is_none());
    }

    #[test]
    fn test_call_params_camel_case() {
        let params = CallParams::new("+27831112222", "https://example.com/alert.xml");
        let json = serde_json::to_value(&params).unwrap();
        assert_eq!(json["audioUrl"], "https://example.com/alert.xml");
    }

    #[test]
    fn test_receipt_deserialization() {
        let receipt: DeliveryReceipt =
            serde_json::from_str(r#"{"reference":"SM123","status":"queued"}"#).unwrap();
        assert_eq!(receipt.reference, "SM123");
        assert_eq!(receipt.status.as_deref(), Some("queued"));

        let bare: DeliveryReceipt = serde_json::from_str(r#"{"reference":"CA9"}"#).unwrap();
        assert!(bare.status.is_none());
    }
}
