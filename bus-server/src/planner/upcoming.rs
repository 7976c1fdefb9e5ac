//! Upcoming departures from a stop.
//!
//! Answers "which buses pass through here soon?" from the timetable alone.
//! Each trip calling at the origin gets an estimated arrival there; trips
//! long gone or too far ahead are dropped and the rest are listed soonest
//! first.

use std::fmt;

use crate::domain::{ClockTime, NodeId, Route, RouteId, Trip, TripId};
use crate::network::{NetworkSnapshot, RouteCatalog, ScheduleIndex};

use super::arrival::ArrivalEstimator;
use super::config::PlannerConfig;

/// How imminent a departure is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DepartureStatus {
    /// Due now, or a little overdue.
    Arriving,
    /// Due within the "soon" threshold.
    Soon,
    Scheduled,
}

impl DepartureStatus {
    fn classify(minutes_until: u32, soon_threshold_mins: u32) -> Self {
        if minutes_until == 0 {
            DepartureStatus::Arriving
        } else if minutes_until <= soon_threshold_mins {
            DepartureStatus::Soon
        } else {
            DepartureStatus::Scheduled
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            DepartureStatus::Arriving => "arriving",
            DepartureStatus::Soon => "soon",
            DepartureStatus::Scheduled => "scheduled",
        }
    }
}

impl fmt::Display for DepartureStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One bus expected at the origin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpcomingDeparture {
    pub route_id: RouteId,
    pub route_name: String,
    pub trip_id: TripId,
    /// Estimated time the bus reaches the origin.
    pub departure: ClockTime,
    /// Minutes from now, clamped at zero for slightly overdue buses.
    pub minutes_until: u32,
    /// Final stop of the trip.
    pub terminus: NodeId,
    pub direction: String,
    /// Stops the bus passes before reaching the origin.
    pub stops_away: usize,
    pub status: DepartureStatus,
}

/// A trip with estimated times at every stop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TripTimetable {
    pub trip_id: TripId,
    pub direction: String,
    pub departure: ClockTime,
    pub calls: Vec<(NodeId, ClockTime)>,
}

/// Finds scheduled departures from a stop.
pub struct UpcomingDepartureFinder<'a, E> {
    catalog: &'a RouteCatalog,
    index: &'a ScheduleIndex,
    estimator: E,
    config: &'a PlannerConfig,
}

impl<'a, E: ArrivalEstimator> UpcomingDepartureFinder<'a, E> {
    pub fn new(
        catalog: &'a RouteCatalog,
        index: &'a ScheduleIndex,
        estimator: E,
        config: &'a PlannerConfig,
    ) -> Self {
        Self {
            catalog,
            index,
            estimator,
            config,
        }
    }

    pub fn for_snapshot(
        snapshot: &'a NetworkSnapshot,
        estimator: E,
        config: &'a PlannerConfig,
    ) -> Self {
        Self::new(snapshot.catalog(), snapshot.index(), estimator, config)
    }

    /// Departures from `origin` around `now`, soonest first.
    ///
    /// With a `destination`, only trips whose first visit to it comes after
    /// the origin are listed. Buses due more than the grace window ago are dropped, as are
    /// buses beyond the horizon. Equal waits keep catalog order. At most
    /// `limit` results (see [`PlannerConfig::clamp_limit`]).
    ///
    /// Times are compared within one service day; a trip departing just
    /// after midnight is not listed as upcoming late the previous evening.
    pub fn upcoming(
        &self,
        origin: &str,
        destination: Option<&str>,
        now: ClockTime,
        limit: Option<usize>,
    ) -> Vec<UpcomingDeparture> {
        let limit = self.config.clamp_limit(limit);
        let grace = i64::from(self.config.grace_mins);
        let horizon = i64::from(self.config.horizon_mins);

        let mut departures = Vec::new();
        for visit in self.index.visits_at(origin) {
            let (route, trip) = self.catalog.resolve(visit);
            let origin_index = visit.stop_index;

            if let Some(dest) = destination {
                if trip.reaches_after(dest, origin_index).is_none() {
                    continue;
                }
            }

            let arrival = self.estimator.arrival_at(trip, origin_index);
            let delta = arrival.minutes_since(now);
            if delta < -grace || delta > horizon {
                continue;
            }
            // In range, so non-negative and small
            let minutes_until = u32::try_from(delta.max(0)).unwrap_or(u32::MAX);

            departures.push(self.departure(route, trip, origin_index, arrival, minutes_until));
        }

        // Stable: equal waits stay in catalog order
        departures.sort_by_key(|d| d.minutes_until);
        departures.truncate(limit);
        departures
    }

    /// Every trip of a route with estimated times at each stop, or `None`
    /// for an unknown route.
    pub fn route_timetable(&self, route_id: &str) -> Option<Vec<TripTimetable>> {
        let route = self.catalog.route(route_id)?;
        Some(
            route
                .trips
                .iter()
                .map(|trip| TripTimetable {
                    trip_id: trip.id().clone(),
                    direction: trip.direction().to_string(),
                    departure: trip.departure(),
                    calls: trip
                        .stops()
                        .iter()
                        .enumerate()
                        .map(|(i, stop)| (stop.clone(), self.estimator.arrival_at(trip, i)))
                        .collect(),
                })
                .collect(),
        )
    }

    fn departure(
        &self,
        route: &Route,
        trip: &Trip,
        origin_index: usize,
        arrival: ClockTime,
        minutes_until: u32,
    ) -> UpcomingDeparture {
        UpcomingDeparture {
            route_id: route.id.clone(),
            route_name: route.name.clone(),
            trip_id: trip.id().clone(),
            departure: arrival,
            minutes_until,
            terminus: trip.terminus().clone(),
            direction: trip.direction().to_string(),
            stops_away: origin_index,
            status: DepartureStatus::classify(minutes_until, self.config.soon_threshold_mins),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::network::LocationGraph;
    use crate::planner::arrival::FixedDwell;
    use proptest::prelude::*;

    fn time(s: &str) -> ClockTime {
        ClockTime::parse_hhmm(s).unwrap()
    }

    fn trip(id: &str, dep: &str, stops: &[&str]) -> Trip {
        Trip::new(
            TripId::parse(id).unwrap(),
            "outbound",
            time(dep),
            stops.iter().map(|s| NodeId::parse(s).unwrap()).collect(),
            None,
        )
        .unwrap()
    }

    fn snapshot(routes: Vec<(&str, Vec<Trip>)>) -> NetworkSnapshot {
        let mut catalog = RouteCatalog::new();
        for (id, trips) in routes {
            let route = Route::new(RouteId::parse(id).unwrap(), format!("Route {id}"), 10, trips);
            catalog.push(route);
        }
        NetworkSnapshot::from_parts(1, LocationGraph::new(), catalog)
    }

    fn finder<'a>(
        snapshot: &'a NetworkSnapshot,
        config: &'a PlannerConfig,
    ) -> UpcomingDepartureFinder<'a, FixedDwell> {
        let estimator = FixedDwell::new(config.dwell_per_stop_mins);
        UpcomingDepartureFinder::for_snapshot(snapshot, estimator, config)
    }

    #[test]
    fn bus_due_in_five_minutes_is_soon() {
        let snap = snapshot(vec![("R1", vec![trip("T1", "08:00", &["A", "B", "C"])])]);
        let config = PlannerConfig::default();

        let result = finder(&snap, &config).upcoming("A", None, time("07:55"), None);

        assert_eq!(result.len(), 1);
        assert_eq!(result[0].route_id.as_str(), "R1");
        assert_eq!(result[0].trip_id.as_str(), "T1");
        assert_eq!(result[0].minutes_until, 5);
        assert_eq!(result[0].status, DepartureStatus::Soon);
        assert_eq!(result[0].terminus.as_str(), "C");
        assert_eq!(result[0].stops_away, 0);
    }

    #[test]
    fn arrival_estimated_from_stop_index() {
        let snap = snapshot(vec![("R1", vec![trip("T1", "08:00", &["A", "B", "C"])])]);
        let config = PlannerConfig::default();

        let result = finder(&snap, &config).upcoming("C", None, time("08:00"), None);

        assert_eq!(result[0].departure, time("08:10"));
        assert_eq!(result[0].minutes_until, 10);
        assert_eq!(result[0].stops_away, 2);
        assert_eq!(result[0].status, DepartureStatus::Scheduled);
    }

    #[test]
    fn destination_before_origin_excluded() {
        let snap = snapshot(vec![("R1", vec![trip("T1", "08:00", &["A", "B", "C"])])]);
        let config = PlannerConfig::default();
        let f = finder(&snap, &config);

        assert!(f.upcoming("B", Some("A"), time("07:55"), None).is_empty());
        assert!(f.upcoming("B", Some("B"), time("07:55"), None).is_empty());
        assert!(f.upcoming("B", Some("Z"), time("07:55"), None).is_empty());
        assert_eq!(f.upcoming("B", Some("C"), time("07:55"), None).len(), 1);
    }

    #[test]
    fn loop_back_to_first_stop_is_not_a_destination() {
        let snap = snapshot(vec![("LOOP", vec![trip("T1", "08:00", &["A", "B", "C", "A"])])]);
        let config = PlannerConfig::default();
        let f = finder(&snap, &config);

        assert!(f.upcoming("B", Some("A"), time("08:00"), None).is_empty());
        assert_eq!(f.upcoming("B", Some("C"), time("08:00"), None).len(), 1);
        assert_eq!(f.upcoming("A", Some("C"), time("08:00"), None).len(), 1);
    }

    #[test]
    fn grace_and_horizon() {
        let snap = snapshot(vec![(
            "R1",
            vec![
                trip("PAST", "07:00", &["A", "B"]),
                trip("LATE", "07:40", &["A", "B"]),
                trip("NOW", "08:00", &["A", "B"]),
                trip("EDGE", "10:00", &["A", "B"]),
                trip("FAR", "10:01", &["A", "B"]),
            ],
        )]);
        let config = PlannerConfig::default();

        let result = finder(&snap, &config).upcoming("A", None, time("08:00"), Some(20));
        let ids: Vec<&str> = result.iter().map(|d| d.trip_id.as_str()).collect();
        assert_eq!(ids, vec!["LATE", "NOW", "EDGE"]);

        assert_eq!(result[0].minutes_until, 0);
        assert_eq!(result[0].status, DepartureStatus::Arriving);
        assert_eq!(result[1].status, DepartureStatus::Arriving);
        assert_eq!(result[2].minutes_until, 120);
    }

    #[test]
    fn exactly_grace_minutes_ago_is_kept() {
        let snap = snapshot(vec![("R1", vec![trip("T1", "07:30", &["A", "B"])])]);
        let config = PlannerConfig::default();

        let result = finder(&snap, &config).upcoming("A", None, time("08:00"), None);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].minutes_until, 0);
    }

    #[test]
    fn ties_keep_catalog_order() {
        let snap = snapshot(vec![
            ("R2", vec![trip("X", "08:10", &["A", "B"])]),
            ("R1", vec![trip("Y", "08:10", &["A", "C"]), trip("Z", "08:05", &["A", "B"])]),
        ]);
        let config = PlannerConfig::default();

        let result = finder(&snap, &config).upcoming("A", None, time("08:00"), None);
        let ids: Vec<&str> = result.iter().map(|d| d.trip_id.as_str()).collect();
        assert_eq!(ids, vec!["Z", "X", "Y"]);
    }

    #[test]
    fn limit_applied() {
        let trips = (0..30)
            .map(|i| trip(&format!("T{i}"), &format!("08:{:02}", i), &["A", "B"]))
            .collect();
        let snap = snapshot(vec![("R1", trips)]);
        let config = PlannerConfig::default();
        let f = finder(&snap, &config);

        assert_eq!(f.upcoming("A", None, time("08:00"), None).len(), 5);
        assert_eq!(f.upcoming("A", None, time("08:00"), Some(0)).len(), 1);
        assert_eq!(f.upcoming("A", None, time("08:00"), Some(12)).len(), 12);
        assert_eq!(f.upcoming("A", None, time("08:00"), Some(100)).len(), 20);
    }

    #[test]
    fn unknown_origin_is_empty() {
        let snap = snapshot(vec![("R1", vec![trip("T1", "08:00", &["A", "B"])])]);
        let config = PlannerConfig::default();

        let result = finder(&snap, &config).upcoming("Z", None, time("08:00"), None);
        assert!(result.is_empty());
    }

    #[test]
    fn route_timetable_estimates_every_stop() {
        let snap = snapshot(vec![("R1", vec![trip("T1", "08:00", &["A", "B", "C"])])]);
        let config = PlannerConfig::default();
        let f = finder(&snap, &config);

        let timetable = f.route_timetable("R1").unwrap();
        assert_eq!(timetable.len(), 1);
        let times: Vec<ClockTime> = timetable[0].calls.iter().map(|(_, t)| *t).collect();
        assert_eq!(times, vec![time("08:00"), time("08:05"), time("08:10")]);

        assert!(f.route_timetable("R9").is_none());
    }

    proptest! {
        #[test]
        fn results_sorted_bounded_and_in_window(
            departures in prop::collection::vec((0u32..1440, 2usize..6), 0..40),
            now in 0u32..1440,
            origin_pos in 0usize..2,
            limit in prop::option::of(0usize..40),
        ) {
            let stops = ["A", "B", "C", "D", "E", "F"];
            let trips: Vec<Trip> = departures
                .iter()
                .enumerate()
                .map(|(i, &(dep, len))| {
                    Trip::new(
                        TripId::parse(&format!("T{i}")).unwrap(),
                        "",
                        ClockTime::from_minutes(dep),
                        stops[..len].iter().map(|s| NodeId::parse(s).unwrap()).collect(),
                        None,
                    )
                    .unwrap()
                })
                .collect();
            let snap = snapshot(vec![("R1", trips)]);
            let config = PlannerConfig::default();

            let result = finder(&snap, &config).upcoming(
                stops[origin_pos],
                None,
                ClockTime::from_minutes(now),
                limit,
            );

            prop_assert!(result.len() <= config.clamp_limit(limit).min(20));
            for d in &result {
                prop_assert!(d.minutes_until <= 120);
            }
            for pair in result.windows(2) {
                prop_assert!(pair[0].minutes_until <= pair[1].minutes_until);
            }
        }
    }
}
