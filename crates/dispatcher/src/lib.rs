//! Single-target notification dispatch.
//!
//! This crate wraps the gateway client with the delivery policy the
//! coordinator relies on: every send resolves to a [`DeliveryOutcome`],
//! transient provider errors are retried with bounded exponential backoff,
//! permanent errors are recorded as rejected without retry, and no send can
//! exceed its timeout. A failed target never raises into the fan-out batch.
//!
//! # Example
//!
//! ```no_run
//! use dispatcher::Dispatcher;
//! use dispatch_core::{NotificationPayload, Notifier};
//! use notify_gateway::{GatewayClient, GatewayConfig};
//!
//! # async fn example() -> Result<(), notify_gateway::GatewayError> {
//! let client = GatewayClient::connect(GatewayConfig::default()).await?;
//! let dispatcher = Dispatcher::new(client);
//!
//! let payload = NotificationPayload::voice_alert("https://example.com/alert.xml", "+100");
//! let outcome = dispatcher.notify("+27831112222", &payload).await;
//! println!("accepted: {}", outcome.is_accepted());
//! # Ok(())
//! # }
//! ```

mod retry;

pub use retry::RetryConfig;

use async_trait::async_trait;
use tracing::{debug, warn};

use dispatch_core::{DeliveryOutcome, NotificationPayload, Notifier};
use notify_gateway::{CallParams, GatewayClient, GatewayError, SmsParams};

/// Dispatches one notification to one target through the gateway.
#[derive(Debug, Clone)]
pub struct Dispatcher {
    client: GatewayClient,
    retry: RetryConfig,
}

impl Dispatcher {
    /// Create a dispatcher with the default retry policy.
    pub fn new(client: GatewayClient) -> Self {
        Self {
            client,
            retry: RetryConfig::default(),
        }
    }

    /// Create a dispatcher with a custom retry policy.
    pub fn with_retry(client: GatewayClient, retry: RetryConfig) -> Self {
        Self { client, retry }
    }

    /// Get the underlying gateway client.
    pub fn client(&self) -> &GatewayClient {
        &self.client
    }

    /// One gateway call for the payload's channel.
    async fn send_once(
        &self,
        target: &str,
        payload: &NotificationPayload,
    ) -> Result<String, GatewayError> {
        let receipt = match payload {
            NotificationPayload::Sms { body } => {
                self.client.send_sms(SmsParams::new(target, body)).await?
            }
            NotificationPayload::Voice {
                audio_url,
                caller_id,
            } => {
                self.client
                    .place_call(CallParams::new(target, audio_url).with_from(caller_id))
                    .await?
            }
        };
        Ok(receipt.reference)
    }
}

#[async_trait]
impl Notifier for Dispatcher {
    async fn notify(&self, target: &str, payload: &NotificationPayload) -> DeliveryOutcome {
        let channel = payload.channel();

        for attempt in 0..self.retry.max_attempts {
            let send = self.send_once(target, payload);

            match tokio::time::timeout(self.retry.send_timeout, send).await {
                Ok(Ok(reference)) => {
                    debug!(%channel, target, %reference, "Notification accepted");
                    return DeliveryOutcome::accepted(Some(reference));
                }
                Ok(Err(e)) if e.is_transient() && self.retry.should_retry(attempt + 1) => {
                    let delay = self.retry.delay_for_attempt(attempt);
                    warn!(
                        %channel,
                        target,
                        attempt = attempt + 1,
                        error = %e,
                        "Transient send failure, retrying in {:?}",
                        delay
                    );
                    tokio::time::sleep(delay).await;
                }
                Ok(Err(e)) => {
                    warn!(%channel, target, error = %e, "Notification rejected");
                    return DeliveryOutcome::rejected(e.to_string());
                }
                Err(_) => {
                    // A stalled send must not hold up the rest of the batch.
                    warn!(%channel, target, "Notification timed out");
                    return DeliveryOutcome::rejected("timeout");
                }
            }
        }

        DeliveryOutcome::rejected("retries exhausted")
    }
}
