//! End-to-end dispatch demo.
//!
//! Wires the real gateway-backed dispatcher into the coordinator, seeds a
//! few responders, and triggers a test incident.
//!
//! Run with: cargo run -p coordinator --example dispatch_demo
//!
//! Configuration via environment variables:
//!   GATEWAY_URL            - Notification gateway base URL (required)
//!   GATEWAY_SENDER_NUMBER  - Sender number for SMS/calls (required)
//!   DISPATCH_RADIUS_M      - Responder search radius (default: 5000)
//!   DISPATCH_MAX_RESPONDERS- Fan-out cap (default: 3)

use std::sync::Arc;

use coordinator::{
    CoordinatorConfig, EmergencyContact, EmergencyType, IncidentCoordinator, Location,
    UserDirectory,
};
use dispatch_core::{async_trait, DirectoryError, Responder};
use dispatcher::Dispatcher;
use geo_index::GeoIndex;
use incident_store::IncidentStore;
use notify_gateway::{GatewayClient, GatewayConfig};
use tracing::info;

/// Directory with one hard-coded demo contact.
struct DemoDirectory;

#[async_trait]
impl UserDirectory for DemoDirectory {
    async fn emergency_contacts(
        &self,
        _user_id: &str,
    ) -> Result<Vec<EmergencyContact>, DirectoryError> {
        Ok(vec![EmergencyContact {
            name: "Demo Contact".to_string(),
            phone: "+27830000001".to_string(),
            relationship: "partner".to_string(),
            is_primary: true,
        }])
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let gateway = GatewayClient::connect(GatewayConfig::from_env()?).await?;
    let dispatcher = Dispatcher::new(gateway);

    let store = IncidentStore::connect("sqlite:dispatch-demo.db?mode=rwc").await?;
    store.migrate().await?;

    let geo = Arc::new(GeoIndex::new());
    geo.replace_all(vec![
        Responder {
            id: "clinic-hillbrow".to_string(),
            name: "Hillbrow Community Clinic".to_string(),
            contact_channel: "+27110000001".to_string(),
            location: Location::new(-26.1889, 28.0473),
            accepted_service_types: vec!["Emergency".to_string(), "Maternity".to_string()],
        },
        Responder {
            id: "clinic-parktown".to_string(),
            name: "Parktown Hospital".to_string(),
            contact_channel: "+27110000002".to_string(),
            location: Location::new(-26.1790, 28.0299),
            accepted_service_types: vec!["Emergency".to_string()],
        },
    ])
    .await;

    let coordinator = IncidentCoordinator::new(
        geo,
        dispatcher,
        store,
        Arc::new(DemoDirectory),
        CoordinatorConfig::from_env(),
    );

    let receipt = coordinator
        .trigger(
            "demo-user",
            Location::new(-26.1900, 28.0400),
            EmergencyType::Maternal,
            Some("demo trigger".to_string()),
        )
        .await?;

    info!(
        incident = %receipt.incident.id,
        status = %receipt.incident.status,
        dispatch = ?receipt.dispatch,
        "Trigger finished"
    );
    for record in &receipt.deliveries {
        info!(to = ?record.target, channel = %record.channel, outcome = ?record.outcome.status, "Delivery");
    }

    Ok(())
}
