//! Main coordinator that orchestrates incident dispatch.

use std::sync::Arc;

use chrono::Utc;
use futures::future::join_all;
use tracing::{info, warn};
use uuid::Uuid;

use dispatch_core::{
    Channel, DeliveryState, EmergencyType, Incident, IncidentStatus, Location,
    NotificationPayload, Notifier, ResponderAssignment, UserDirectory, EMERGENCY_SERVICE,
};
use geo_index::GeoIndex;
use incident_store::{incident as store, IncidentFilter, IncidentStore};

use crate::config::CoordinatorConfig;
use crate::error::CoordinatorError;
use crate::locks::IncidentLocks;
use crate::receipt::{DeliveryRecord, DispatchResult, NotifyTarget, TriggerReceipt};
use crate::tracker::ResponderTracker;

/// Orchestrates the full incident lifecycle.
///
/// The coordinator:
/// - Validates and persists a reported emergency
/// - Queries the geo index for eligible responders and the user directory
///   for emergency contacts
/// - Fans out notifications concurrently and records every outcome
/// - Serializes mutations per incident so concurrent responder callbacks
///   cannot lose updates
/// - Keeps the incident status and the per-responder delivery states as two
///   independent machines, linked only by the first-acknowledgment rule
pub struct IncidentCoordinator<N: Notifier> {
    /// Spatial index over the responder directory (read-mostly, shared).
    geo: Arc<GeoIndex>,
    /// Dispatcher for single-target sends.
    notifier: N,
    /// Persistence for incidents and assignments.
    store: IncidentStore,
    /// Lookup of a reporter's emergency contacts.
    users: Arc<dyn UserDirectory>,
    /// Per-incident mutation locks.
    locks: IncidentLocks,
    config: CoordinatorConfig,
}

impl<N: Notifier> IncidentCoordinator<N> {
    /// Create a coordinator with the given components.
    pub fn new(
        geo: Arc<GeoIndex>,
        notifier: N,
        store: IncidentStore,
        users: Arc<dyn UserDirectory>,
        config: CoordinatorConfig,
    ) -> Self {
        Self {
            geo,
            notifier,
            store,
            users,
            locks: IncidentLocks::new(),
            config,
        }
    }

    /// Report an emergency: create the incident and fan out notifications.
    ///
    /// The coordinate pair is validated before anything is persisted or
    /// sent. The incident is created in `pending`, then moved to
    /// `dispatched` once the fan-out batch has resolved, provided at least
    /// one target (responder or contact) existed. A failed send never fails
    /// the trigger; per-target outcomes are reported in the receipt.
    pub async fn trigger(
        &self,
        reporter_id: &str,
        location: Location,
        emergency_type: EmergencyType,
        additional_info: Option<String>,
    ) -> Result<TriggerReceipt, CoordinatorError> {
        if reporter_id.trim().is_empty() {
            return Err(dispatch_core::ValidationError::Missing("reporter_id").into());
        }
        location.validate()?;

        let incident = Incident {
            id: Uuid::new_v4().to_string(),
            reporter_id: reporter_id.to_string(),
            location,
            emergency_type,
            additional_info,
            status: IncidentStatus::Pending,
            created_at: Utc::now(),
            resolved_at: None,
            assignments: Vec::new(),
        };
        store::create_incident(self.store.pool(), &incident).await?;

        info!(
            incident = %incident.id,
            reporter = reporter_id,
            kind = %emergency_type,
            "Incident created"
        );

        let responders = self
            .geo
            .nearby(
                location,
                self.config.search_radius_m,
                EMERGENCY_SERVICE,
                self.config.max_responders,
            )
            .await;

        let contacts = match self.users.emergency_contacts(reporter_id).await {
            Ok(contacts) => contacts,
            Err(e) => {
                // Contact lookup failing must not abort the dispatch.
                warn!(incident = %incident.id, error = %e, "Emergency contact lookup failed");
                Vec::new()
            }
        };

        if responders.is_empty() && contacts.is_empty() {
            warn!(incident = %incident.id, "No responder or contact reachable, incident stays pending");
            return Ok(TriggerReceipt {
                incident: store::get_incident(self.store.pool(), &incident.id).await?,
                deliveries: Vec::new(),
                dispatch: DispatchResult::NoTargets,
            });
        }

        // Fan out concurrently: one send per target, every outcome recorded.
        let sms = NotificationPayload::sms_alert(
            emergency_type,
            location,
            incident.additional_info.as_deref(),
        );
        let voice = NotificationPayload::voice_alert(
            self.config.voice_audio_url.clone(),
            self.config.caller_id.clone(),
        );

        let responder_sends = join_all(responders.iter().map(|responder| {
            let payload = sms.clone();
            async move {
                let outcome = self.notifier.notify(&responder.contact_channel, &payload).await;
                DeliveryRecord {
                    target: NotifyTarget::Responder {
                        id: responder.id.clone(),
                    },
                    channel: Channel::Sms,
                    outcome,
                }
            }
        }));
        let contact_sends = join_all(contacts.iter().map(|contact| {
            let payload = voice.clone();
            async move {
                let outcome = self.notifier.notify(&contact.phone, &payload).await;
                DeliveryRecord {
                    target: NotifyTarget::Contact {
                        name: contact.name.clone(),
                        phone: contact.phone.clone(),
                    },
                    channel: Channel::Voice,
                    outcome,
                }
            }
        }));
        let (responder_records, contact_records) = tokio::join!(responder_sends, contact_sends);

        // Assignment inserts and the dispatch write go through the incident
        // lock: a responder acknowledging the moment their assignment exists
        // must not be overwritten back to dispatched.
        let lock = self.locks.acquire(&incident.id).await;
        {
            let _guard = lock.lock().await;

            // Every notified responder gets an assignment, reached or not.
            let notified_at = Utc::now();
            for (responder, record) in responders.iter().zip(responder_records.iter()) {
                let assignment = ResponderAssignment {
                    responder_id: responder.id.clone(),
                    channel: Channel::Sms,
                    delivery_state: DeliveryState::Notified,
                    accepted: record.outcome.is_accepted(),
                    provider_ref: record.outcome.provider_ref.clone(),
                    outcome_error: record.outcome.error.clone(),
                    notified_at,
                    response_time: None,
                };
                store::insert_assignment(self.store.pool(), &incident.id, &assignment).await?;
            }

            store::update_status(self.store.pool(), &incident.id, IncidentStatus::Dispatched, None)
                .await?;
        }

        let mut deliveries = responder_records;
        deliveries.extend(contact_records);

        let accepted = deliveries.iter().filter(|d| d.outcome.is_accepted()).count();
        let dispatch = if accepted == 0 {
            warn!(incident = %incident.id, "Every notification attempt failed");
            DispatchResult::AllFailed
        } else {
            DispatchResult::Dispatched
        };

        info!(
            incident = %incident.id,
            responders = responders.len(),
            contacts = contacts.len(),
            accepted,
            "Dispatch complete"
        );

        Ok(TriggerReceipt {
            incident: store::get_incident(self.store.pool(), &incident.id).await?,
            deliveries,
            dispatch,
        })
    }

    /// Record a responder's status update for an incident.
    ///
    /// The first assignment reaching `enroute` or beyond advances the
    /// incident to `responded`; later acknowledgments leave the incident
    /// status alone.
    pub async fn update_responder(
        &self,
        incident_id: &str,
        responder_id: &str,
        new_state: DeliveryState,
    ) -> Result<Incident, CoordinatorError> {
        let lock = self.locks.acquire(incident_id).await;
        let _guard = lock.lock().await;

        let incident = store::get_incident(self.store.pool(), incident_id).await?;
        let assignment =
            store::get_assignment(self.store.pool(), incident_id, responder_id).await?;

        let transition = ResponderTracker::advance(&assignment, new_state)?;
        store::update_assignment_state(
            self.store.pool(),
            incident_id,
            responder_id,
            transition.state,
            transition.response_time,
        )
        .await?;

        info!(
            incident = incident_id,
            responder = responder_id,
            state = %transition.state,
            "Responder update accepted"
        );

        if transition.state.is_acknowledged() && incident.status < IncidentStatus::Responded {
            store::update_status(self.store.pool(), incident_id, IncidentStatus::Responded, None)
                .await?;
            info!(incident = incident_id, "Incident responded");
        }

        Ok(store::get_incident(self.store.pool(), incident_id).await?)
    }

    /// Apply a top-level incident status transition (manual close-out path).
    ///
    /// Only strictly-forward transitions are valid; completing the incident
    /// stamps `resolved_at`.
    pub async fn update_status(
        &self,
        incident_id: &str,
        new_status: IncidentStatus,
    ) -> Result<Incident, CoordinatorError> {
        let lock = self.locks.acquire(incident_id).await;
        let _guard = lock.lock().await;

        let incident = store::get_incident(self.store.pool(), incident_id).await?;
        let next = incident.status.advance_to(new_status)?;

        let resolved_at = if next == IncidentStatus::Completed {
            Some(Utc::now())
        } else {
            incident.resolved_at
        };
        store::update_status(self.store.pool(), incident_id, next, resolved_at).await?;

        info!(incident = incident_id, status = %next, "Incident status updated");

        Ok(store::get_incident(self.store.pool(), incident_id).await?)
    }

    /// Read one incident with its assignment list.
    pub async fn get_incident(&self, incident_id: &str) -> Result<Incident, CoordinatorError> {
        Ok(store::get_incident(self.store.pool(), incident_id).await?)
    }

    /// Read incidents under a pre-resolved scope filter, newest first.
    pub async fn list_incidents(
        &self,
        filter: &IncidentFilter,
    ) -> Result<Vec<Incident>, CoordinatorError> {
        Ok(store::list_incidents(self.store.pool(), filter).await?)
    }

    /// Get the notifier.
    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    /// Get the geo index.
    pub fn geo(&self) -> &Arc<GeoIndex> {
        &self.geo
    }

    /// Get the store.
    pub fn store(&self) -> &IncidentStore {
        &self.store
    }

    /// Get the configuration.
    pub fn config(&self) -> &CoordinatorConfig {
        &self.config
    }
}
