//! Per-node index of the trips that serve it.
//!
//! Both the departure finder and the itinerary planner start from "which
//! trips call at this node?". Answering that by scanning every trip of every
//! route is linear in the catalog; the index answers it with one lookup.

use std::collections::HashMap;

use crate::domain::NodeId;

use super::catalog::RouteCatalog;

/// One trip calling at one node.
///
/// Positions refer into the [`RouteCatalog`] the index was built from; use
/// [`RouteCatalog::resolve`] to get the route and trip back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StopVisit {
    /// Position of the route in the catalog.
    pub route: usize,
    /// Position of the trip within its route.
    pub trip: usize,
    /// Index of the node in the trip's stop sequence.
    pub stop_index: usize,
}

/// Map from node to the trips that call there.
#[derive(Debug, Clone, Default)]
pub struct ScheduleIndex {
    visits: HashMap<NodeId, Vec<StopVisit>>,
}

impl ScheduleIndex {
    /// Build the index for a catalog.
    ///
    /// Each trip is recorded once per node, at the node's first occurrence
    /// in its stop sequence. Visits at a node are in catalog order (route
    /// order, then trip order), which callers rely on for stable ordering.
    pub fn build(catalog: &RouteCatalog) -> Self {
        let mut visits: HashMap<NodeId, Vec<StopVisit>> = HashMap::new();

        for (route_idx, route) in catalog.routes().iter().enumerate() {
            for (trip_idx, trip) in route.trips.iter().enumerate() {
                for (stop_index, stop) in trip.stops().iter().enumerate() {
                    // A looping trip visits a node again later; keep the first
                    if trip.position_of(stop.as_str()) != Some(stop_index) {
                        continue;
                    }

                    visits.entry(stop.clone()).or_default().push(StopVisit {
                        route: route_idx,
                        trip: trip_idx,
                        stop_index,
                    });
                }
            }
        }

        Self { visits }
    }

    /// Trips calling at a node, in catalog order. Empty for unserved nodes.
    pub fn visits_at(&self, node: &str) -> &[StopVisit] {
        self.visits
            .get(node)
            .map(|v| v.as_slice())
            .unwrap_or(&[])
    }
}
