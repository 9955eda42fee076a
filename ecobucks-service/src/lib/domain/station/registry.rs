use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Duration;
use std::time::Instant;

use chrono::Utc;
use tokio::sync::RwLock;

use crate::domain::station::models::LocationClaim;
use crate::domain::station::models::RegisterStationCommand;

/// In-process registry of recently reported station locations.
///
/// Entries are kept in insertion order and expire `ttl` after registration.
/// Expired entries are pruned on every read and write.
#[derive(Debug, Clone)]
pub struct StationRegistry {
    locations: Arc<RwLock<VecDeque<(Instant, LocationClaim)>>>,
    ttl: Duration,
}

impl StationRegistry {
    pub fn new(ttl: Duration) -> Self {
        Self {
            locations: Arc::new(RwLock::new(VecDeque::new())),
            ttl,
        }
    }

    /// Publish a station location. Commands only exist for operators.
    pub async fn register(&self, command: RegisterStationCommand) -> LocationClaim {
        let location = LocationClaim {
            latitude: command.latitude,
            longitude: command.longitude,
            timestamp: Utc::now().timestamp(),
            station_id: command.station_id,
        };

        let mut locations = self.locations.write().await;
        let now = Instant::now();
        Self::prune(&mut locations, now, self.ttl);
        locations.push_back((now, location.clone()));

        tracing::info!(
            station_id = %location.station_id,
            operator_id = %command.operator_id,
            "Station registered"
        );

        location
    }

    /// Live locations, oldest first.
    pub async fn list(&self) -> Vec<LocationClaim> {
        let mut locations = self.locations.write().await;
        Self::prune(&mut locations, Instant::now(), self.ttl);
        locations.iter().map(|(_, location)| location.clone()).collect()
    }

    fn prune(locations: &mut VecDeque<(Instant, LocationClaim)>, now: Instant, ttl: Duration) {
        while let Some((registered_at, _)) = locations.front() {
            if now.duration_since(*registered_at) >= ttl {
                locations.pop_front();
            } else {
                break;
            }
        }
    }
}
