//! Configuration types for the notification gateway client.

/// Configuration for connecting to the notification gateway.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// Base URL of the gateway HTTP server (e.g., "http://localhost:9100").
    pub base_url: String,
    /// Sender number presented on outbound SMS and calls.
    pub sender_number: String,
}

impl GatewayConfig {
    /// Create a new configuration.
    pub fn new(base_url: impl Into<String>, sender_number: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            sender_number: sender_number.into(),
        }
    }

    /// Create configuration from `GATEWAY_URL` and `GATEWAY_SENDER_NUMBER`.
    pub fn from_env() -> Result<Self, crate::GatewayError> {
        let base_url = std::env::var("GATEWAY_URL")
            .map_err(|_| crate::GatewayError::Config("GATEWAY_URL not set".to_string()))?;
        let sender_number = std::env::var("GATEWAY_SENDER_NUMBER").map_err(|_| {
            crate::GatewayError::Config("GATEWAY_SENDER_NUMBER not set".to_string())
        })?;
        Ok(Self::new(base_url, sender_number))
    }

    /// Get the SMS endpoint URL.
    pub fn sms_url(&self) -> String {
        format!("{}/api/v1/messages", self.base_url)
    }

    /// Get the voice-call endpoint URL.
    pub fn call_url(&self) -> String {
        format!("{}/api/v1/calls", self.base_url)
    }

    /// Get the health check endpoint URL.
    pub fn check_url(&self) -> String {
        format!("{}/api/v1/check", self.base_url)
    }
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self::new("http://localhost:9100", "+00000000000")
    }
}
