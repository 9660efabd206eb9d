//! HTTP client for the external notification gateway.
//!
//! The gateway exposes two fire-and-forget primitives, send-SMS and
//! place-voice-call, each answering with a delivery receipt. This crate wraps
//! them behind [`GatewayClient`] the way one long-lived provider client would
//! be held at startup and passed by reference into the dispatcher.
//!
//! # Example
//!
//! ```no_run
//! use notify_gateway::{GatewayClient, GatewayConfig, SmsParams};
//!
//! # async fn example() -> Result<(), notify_gateway::GatewayError> {
//! let config = GatewayConfig::new("http://localhost:9100", "+27100000000");
//! let client = GatewayClient::connect(config).await?;
//!
//! let receipt = client
//!     .send_sms(SmsParams::new("+27831112222", "EMERGENCY ALERT!"))
//!     .await?;
//! println!("accepted as {}", receipt.reference);
//! # Ok(())
//! # }
//! ```

mod client;
mod config;
mod error;
mod types;

pub use client::GatewayClient;
pub use config::GatewayConfig;
pub use error::GatewayError;
pub use types::{CallParams, DeliveryReceipt, SmsParams};

/// Crate version.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
