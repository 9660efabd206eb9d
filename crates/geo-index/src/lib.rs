//! Spatial lookup of responders within a radius of a point.
//!
//! The index holds a read-mostly snapshot of the responder directory and
//! answers nearest-first queries on a spherical Earth model. An empty result
//! is a valid operational state, not a fault.
//!
//! # Example
//!
//! ```no_run
//! use geo_index::GeoIndex;
//! use dispatch_core::{Location, EMERGENCY_SERVICE};
//!
//! # async fn example(responders: Vec<dispatch_core::Responder>) {
//! let index = GeoIndex::new();
//! index.replace_all(responders).await;
//!
//! let near = index
//!     .nearby(Location::new(-26.2041, 28.0473), 5000.0, EMERGENCY_SERVICE, 3)
//!     .await;
//! # }
//! ```

use std::collections::HashMap;

use tokio::sync::RwLock;
use tracing::debug;

use dispatch_core::{Location, Responder};

mod distance;

pub use distance::haversine_m;

/// In-memory spatial index over the registered responders.
///
/// Safe to share across concurrent trigger calls; queries take a read lock
/// and directory refreshes take a write lock.
#[derive(Debug, Default)]
pub struct GeoIndex {
    responders: RwLock<HashMap<String, Responder>>,
}

impl GeoIndex {
    /// Create an empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or update a single responder.
    pub async fn upsert(&self, responder: Responder) {
        self.responders
            .write()
            .await
            .insert(responder.id.clone(), responder);
    }

    /// Replace the full responder set with a fresh directory snapshot.
    pub async fn replace_all(&self, responders: Vec<Responder>) {
        let mut guard = self.responders.write().await;
        guard.clear();
        for responder in responders {
            guard.insert(responder.id.clone(), responder);
        }
        debug!(count = guard.len(), "Responder index refreshed");
    }

    /// Number of indexed responders.
    pub async fn len(&self) -> usize {
        self.responders.read().await.len()
    }

    /// Whether the index holds no responders.
    pub async fn is_empty(&self) -> bool {
        self.responders.read().await.is_empty()
    }

    /// Responders within `radius_m` meters of `origin` that accept
    /// `required_service`, nearest first, at most `limit` results.
    ///
    /// Distance is great-circle (haversine), so results stay correct at
    /// latitude extremes where flat Euclidean math distorts longitude.
    pub async fn nearby(
        &self,
        origin: Location,
        radius_m: f64,
        required_service: &str,
        limit: usize,
    ) -> Vec<Responder> {
        let guard = self.responders.read().await;

        let mut matches: Vec<(f64, &Responder)> = guard
            .values()
            .filter(|r| r.accepts_service(required_service))
            .map(|r| (haversine_m(origin, r.location), r))
            .filter(|(d, _)| *d <= radius_m)
            .collect();

        matches.sort_by(|a, b| a.0.total_cmp(&b.0));
        matches.truncate(limit);

        debug!(
            origin = %origin,
            radius_m,
            service = required_service,
            found = matches.len(),
            "Nearby query"
        );

        matches.into_iter().map(|(_, r)| r.clone()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dispatch_core::EMERGENCY_SERVICE;

    fn responder(id: &str, lat: f64, lon: f64, services: &[&str]) -> Responder {
        Responder {
            id: id.to_string(),
            name: format!("Clinic {}", id),
            contact_channel: format!("+2711{}", id),
            location: Location::new(lat, lon),
            accepted_service_types: services.iter().map(|s| s.to_string()).collect(),
        }
    }

    async fn seeded() -> GeoIndex {
        let index = GeoIndex::new();
        index
            .replace_all(vec![
                // ~0 m from the Johannesburg query point
                responder("a", -26.2041, 28.0473, &["Emergency"]),
                // ~1.2 km north
                responder("b", -26.1930, 28.0473, &["Emergency", "Maternity"]),
                // ~3.5 km east
                responder("c", -26.2041, 28.0823, &["emergency"]),
                // close, but not an emergency facility
                responder("d", -26.2050, 28.0480, &["Radiology"]),
                // ~60 km away
                responder("e", -25.7479, 28.2293, &["Emergency"]),
            ])
            .await;
        index
    }

    #[tokio::test]
    async fn test_nearby_orders_nearest_first() {
        let index = seeded().await;
        let origin = Location::new(-26.2041, 28.0473);
        let found = index.nearby(origin, 5000.0, EMERGENCY_SERVICE, 10).await;

        let ids: Vec<&str> = found.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b", "c"]);

        // Distances are non-decreasing.
        let dists: Vec<f64> = found
            .iter()
            .map(|r| haversine_m(origin, r.location))
            .collect();
        assert!(dists.windows(2).all(|w| w[0] <= w[1]));
    }

    #[tokio::test]
    async fn test_nearby_filters_service_tag() {
        let index = seeded().await;
        let found = index
            .nearby(Location::new(-26.2041, 28.0473), 5000.0, EMERGENCY_SERVICE, 10)
            .await;
        assert!(found.iter().all(|r| r.accepts_service(EMERGENCY_SERVICE)));
        assert!(!found.iter().any(|r| r.id == "d"));
    }

    #[tokio::test]
    async fn test_nearby_respects_radius_and_limit() {
        let index = seeded().await;
        let origin = Location::new(-26.2041, 28.0473);

        // 60 km responder is out of a 5 km radius.
        let found = index.nearby(origin, 5000.0, EMERGENCY_SERVICE, 10).await;
        assert!(!found.iter().any(|r| r.id == "e"));

        // Wide radius, tight limit.
        let found = index.nearby(origin, 100_000.0, EMERGENCY_SERVICE, 2).await;
        assert_eq!(found.len(), 2);
        assert_eq!(found[0].id, "a");
    }

    #[tokio::test]
    async fn test_nearby_empty_is_ok() {
        let index = GeoIndex::new();
        let found = index
            .nearby(Location::new(0.0, 0.0), 5000.0, EMERGENCY_SERVICE, 3)
            .await;
        assert!(found.is_empty());
    }

    #[tokio::test]
    async fn test_upsert_replaces() {
        let index = GeoIndex::new();
        index.upsert(responder("a", 0.0, 0.0, &["Emergency"])).await;
        index.upsert(responder("a", 1.0, 1.0, &["Emergency"])).await;
        assert_eq!(index.len().await, 1);
    }
}
