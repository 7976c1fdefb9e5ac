//! Application state for the web layer.

use std::sync::Arc;

use crate::cache::{CacheConfig, PlanCache};
use crate::network::SnapshotStore;
use crate::planner::PlannerConfig;

/// Shared application state.
///
/// Contains all the services needed to handle requests.
#[derive(Clone)]
pub struct AppState {
    /// Published network snapshot
    pub network: SnapshotStore,

    /// Departure and itinerary tuning
    pub config: Arc<PlannerConfig>,

    /// Recently planned itineraries
    pub plans: Arc<PlanCache>,
}

impl AppState {
    /// Create a new app state.
    pub fn new(network: SnapshotStore, config: PlannerConfig, cache_config: &CacheConfig) -> Self {
        Self {
            network,
            config: Arc::new(config),
            plans: Arc::new(PlanCache::new(cache_config)),
        }
    }
}
