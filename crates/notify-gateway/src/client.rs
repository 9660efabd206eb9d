//! Notification gateway HTTP client.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use reqwest::Client;
use serde::Serialize;
use tracing::{debug, info};

use crate::config::GatewayConfig;
use crate::error::GatewayError;
use crate::types::{ApiErrorBody, CallParams, DeliveryReceipt, SmsParams};

/// Client for the SMS/voice notification gateway.
///
/// One instance is constructed at startup and shared; it is cheap to clone.
#[derive(Clone)]
pub struct GatewayClient {
    http: Client,
    config: GatewayConfig,
    connected: Arc<AtomicBool>,
}

impl GatewayClient {
    /// Connect to the gateway and verify it is reachable.
    pub async fn connect(config: GatewayConfig) -> Result<Self, GatewayError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(GatewayError::Http)?;

        let client = Self {
            http,
            config,
            connected: Arc::new(AtomicBool::new(false)),
        };

        if client.health_check().await? {
            client.connected.store(true, Ordering::SeqCst);
            info!("Connected to notification gateway at {}", client.config.base_url);
        } else {
            return Err(GatewayError::HealthCheckFailed);
        }

        Ok(client)
    }

    /// Create a client without probing the gateway.
    ///
    /// Used when the gateway may come up after this process does; the first
    /// send will surface any connectivity problem.
    pub fn new_unchecked(config: GatewayConfig) -> Result<Self, GatewayError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(GatewayError::Http)?;

        Ok(Self {
            http,
            config,
            connected: Arc::new(AtomicBool::new(false)),
        })
    }

    /// Check if the last health probe succeeded.
    pub fn is_connected(&self) -> bool {
        self.connected.load(Ordering::SeqCst)
    }

    /// Perform a health check against the gateway.
    pub async fn health_check(&self) -> Result<bool, GatewayError> {
        let url = self.config.check_url();
        debug!("Health check: {}", url);

        match self.http.get(&url).send().await {
            Ok(resp) => {
                let ok = resp.status().is_success();
                self.connected.store(ok, Ordering::SeqCst);
                Ok(ok)
            }
            Err(e) => {
                self.connected.store(false, Ordering::SeqCst);
                Err(GatewayError::Http(e))
            }
        }
    }

    /// Send an SMS through the gateway.
    pub async fn send_sms(&self, mut params: SmsParams) -> Result<DeliveryReceipt, GatewayError> {
        if params.from.is_none() {
            params.from = Some(self.config.sender_number.clone());
        }
        debug!(to = %params.to, "Sending SMS");
        self.post(&self.config.sms_url(), &params).await
    }

    /// Place a voice call through the gateway.
    pub async fn place_call(&self, mut params: CallParams) -> Result<DeliveryReceipt, GatewayError> {
        if params.from.is_none() {
            params.from = Some(self.config.sender_number.clone());
        }
        debug!(to = %params.to, "Placing voice call");
        self.post(&self.config.call_url(), &params).await
    }

    /// Get the configuration.
    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }

    /// POST a JSON body and decode the receipt, mapping API rejections.
    async fn post<P: Serialize>(
        &self,
        url: &str,
        params: &P,
    ) -> Result<DeliveryReceipt, GatewayError> {
        let response = self
            .http
            .post(url)
            .header("Content-Type", "application/json")
            .json(params)
            .send()
            .await
            .map_err(GatewayError::Http)?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .json::<ApiErrorBody>()
                .await
                .ok()
                .and_then(|b| b.message)
                .unwrap_or_else(|| status.to_string());
            return Err(GatewayError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body = response.text().await.map_err(GatewayError::Http)?;
        serde_json::from_str(&body).map_err(GatewayError::Json)
    }
}

impl std::fmt::Debug for GatewayClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GatewayClient")
            .field("config", &self.config)
            .field("connected", &self.is_connected())
            .finish()
    }
}
