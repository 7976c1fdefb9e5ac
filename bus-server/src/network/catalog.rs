//! The catalog of scheduled routes.

use std::collections::HashMap;

use crate::domain::{NodeId, Route, RouteId, Trip};

use super::schedule_index::StopVisit;

/// All scheduled routes of a snapshot, in dataset order.
#[derive(Debug, Clone, Default)]
pub struct RouteCatalog {
    routes: Vec<Route>,
    index: HashMap<RouteId, usize>,
}

impl RouteCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a route. Returns false, leaving the catalog unchanged, if a route
    /// with the same id is already present.
    pub fn push(&mut self, route: Route) -> bool {
        if self.index.contains_key(route.id.as_str()) {
            return false;
        }
        self.index.insert(route.id.clone(), self.routes.len());
        self.routes.push(route);
        true
    }

    /// All routes, in dataset order.
    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    /// Look up a route by id.
    pub fn route(&self, id: &str) -> Option<&Route> {
        self.index.get(id).map(|&idx| &self.routes[idx])
    }

    /// Distinct stops of a route, or `None` for an unknown route.
    pub fn route_stops(&self, id: &str) -> Option<Vec<&NodeId>> {
        self.route(id).map(Route::stops)
    }

    pub fn route_count(&self) -> usize {
        self.routes.len()
    }

    pub fn trip_count(&self) -> usize {
        self.routes.iter().map(|r| r.trips.len()).sum()
    }

    /// Route and trip a [`StopVisit`] points at.
    ///
    /// Visits are only ever produced from this catalog, so the positions
    /// are always in range.
    pub fn resolve(&self, visit: &StopVisit) -> (&Route, &Trip) {
        let route = &self.routes[visit.route];
        (route, &route.trips[visit.trip])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ClockTime, TripId};

    fn trip(id: &str, stops: &[&str]) -> Trip {
        Trip::new(
            TripId::parse(id).unwrap(),
            "",
            ClockTime::parse_hhmm("08:00").unwrap(),
            stops.iter().map(|s| NodeId::parse(s).unwrap()).collect(),
            None,
        )
        .unwrap()
    }

    fn route(id: &str, trips: Vec<Trip>) -> Route {
        Route::new(RouteId::parse(id).unwrap(), format!("Route {id}"), 20, trips)
    }

    #[test]
    fn lookup_by_id() {
        let mut catalog = RouteCatalog::new();
        assert!(catalog.push(route("R1", vec![trip("T1", &["A", "B"])])));
        assert!(catalog.push(route("R2", vec![])));

        assert_eq!(catalog.route("R1").map(|r| r.name.as_str()), Some("Route R1"));
        assert!(catalog.route("R9").is_none());
        assert_eq!(catalog.route_count(), 2);
        assert_eq!(catalog.trip_count(), 1);
    }

    #[test]
    fn duplicate_route_rejected() {
        let mut catalog = RouteCatalog::new();
        assert!(catalog.push(route("R1", vec![trip("T1", &["A", "B"])])));
        assert!(!catalog.push(route("R1", vec![])));

        assert_eq!(catalog.route_count(), 1);
        assert_eq!(catalog.trip_count(), 1);
    }

    #[test]
    fn routes_keep_dataset_order() {
        let mut catalog = RouteCatalog::new();
        for id in ["R3", "R1", "R2"] {
            catalog.push(route(id, vec![]));
        }

        let ids: Vec<&str> = catalog.routes().iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["R3", "R1", "R2"]);
    }

    #[test]
    fn empty_route_still_listed() {
        let mut catalog = RouteCatalog::new();
        catalog.push(route("R1", vec![]));

        assert!(catalog.route("R1").is_some());
        assert_eq!(catalog.route_stops("R1"), Some(vec![]));
        assert_eq!(catalog.route_stops("R9"), None);
    }
}
