//! Error types for the notification gateway client.

use thiserror::Error;

/// Errors that can occur when interacting with the notification gateway.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// HTTP request failed (connect, transport, or timeout).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization/deserialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The gateway rejected the request with an API error.
    #[error("gateway rejected request ({status}): {message}")]
    Api { status: u16, message: String },

    /// Connection to the gateway failed.
    #[error("Connection failed: {0}")]
    Connection(String),

    /// Gateway health check failed.
    #[error("Health check failed")]
    HealthCheckFailed,

    /// Invalid configuration.
    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl GatewayError {
    /// Whether retrying the same request can plausibly succeed.
    ///
    /// Transport failures and throttling/server statuses are transient;
    /// other API rejections (bad number, bad request) are permanent.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Http(_) | Self::Connection(_) | Self::HealthCheckFailed => true,
            Self::Api { status, .. } => matches!(status, 408 | 429) || *status >= 500,
            Self::Json(_) | Self::Config(_) => false,
        }
    }
}
