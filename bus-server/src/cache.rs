//! Caching layer for itinerary plans.
//!
//! Planning a query walks every trip through the origin and each candidate
//! change stop, so repeated requests for the same journey are answered from
//! a short-lived cache instead.
//!
//! Keys carry the snapshot generation: a reload never serves plans computed
//! against the previous network, even before the old entries expire.

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache as MokaCache;

use crate::domain::{ClockTime, NodeId, RouteOption};

/// Cache key for plans: (snapshot generation, origin, destination, departure).
type PlanKey = (u64, NodeId, NodeId, ClockTime);

/// Cached plan entry.
type PlanEntry = Arc<Vec<RouteOption>>;

/// Configuration for the cache.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// TTL for cached entries.
    pub ttl: Duration,

    /// Maximum number of cached entries.
    pub max_capacity: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(60),
            max_capacity: 1000,
        }
    }
}

/// Cache for itinerary plans.
pub struct PlanCache {
    plans: MokaCache<PlanKey, PlanEntry>,
}

impl PlanCache {
    /// Create a new cache with the given configuration.
    pub fn new(config: &CacheConfig) -> Self {
        let plans = MokaCache::builder()
            .time_to_live(config.ttl)
            .max_capacity(config.max_capacity)
            .build();

        Self { plans }
    }

    /// Get a cached plan.
    pub async fn get(
        &self,
        generation: u64,
        from: &NodeId,
        to: &NodeId,
        departure: ClockTime,
    ) -> Option<PlanEntry> {
        let key = (generation, from.clone(), to.clone(), departure);
        self.plans.get(&key).await
    }

    /// Insert a plan into the cache.
    pub async fn insert(
        &self,
        generation: u64,
        from: NodeId,
        to: NodeId,
        departure: ClockTime,
        entry: PlanEntry,
    ) {
        self.plans
            .insert((generation, from, to, departure), entry)
            .await;
    }

    /// Return the cached plan, computing and caching it on a miss.
    ///
    /// Concurrent misses for the same key run `plan` once.
    pub async fn get_or_plan<F>(
        &self,
        generation: u64,
        from: NodeId,
        to: NodeId,
        departure: ClockTime,
        plan: F,
    ) -> PlanEntry
    where
        F: FnOnce() -> Vec<RouteOption>,
    {
        self.plans
            .get_with((generation, from, to, departure), async move { Arc::new(plan()) })
            .await
    }

    /// Get cache statistics (for monitoring).
    pub fn entry_count(&self) -> u64 {
        self.plans.entry_count()
    }

    /// Invalidate all cached entries.
    pub fn invalidate_all(&self) {
        self.plans.invalidate_all();
    }

    /// Apply pending inserts and invalidations so counts are current.
    pub async fn sync(&self) {
        self.plans.run_pending_tasks().await;
    }
}
