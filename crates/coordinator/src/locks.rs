//! Per-incident mutation serialization.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::{Mutex, RwLock};

/// Registry of per-incident async mutexes.
///
/// All mutations for one incident id go through its mutex, so concurrent
/// responder callbacks cannot lose updates. Distinct incidents lock
/// independently.
#[derive(Debug, Default)]
pub struct IncidentLocks {
    inner: RwLock<HashMap<String, Arc<Mutex<()>>>>,
}

impl IncidentLocks {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the mutex for an incident, creating it on first use.
    ///
    /// The caller holds the returned `Arc` and locks it for the duration of
    /// the mutation.
    pub async fn acquire(&self, incident_id: &str) -> Arc<Mutex<()>> {
        if let Some(lock) = self.inner.read().await.get(incident_id) {
            return lock.clone();
        }

        let mut guard = self.inner.write().await;
        // An entry only the map still references cannot be held by anyone;
        // reclaim those so the registry does not grow with every incident
        // ever seen.
        guard.retain(|_, lock| Arc::strong_count(lock) > 1);
        guard
            .entry(incident_id.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }

    /// Number of registered entries.
    pub async fn len(&self) -> usize {
        self.inner.read().await.len()
    }

    /// Whether the registry is empty.
    pub async fn is_empty(&self) -> bool {
        self.inner.read().await.is_empty()
    }
}
