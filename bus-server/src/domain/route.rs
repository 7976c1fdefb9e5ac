//! Scheduled routes and their trips.

use super::{ClockTime, DomainError, NodeId, RouteId, TripId};

/// One scheduled run of a route.
///
/// # Invariants
///
/// - At least two stops
/// - No stop immediately repeated
/// - When per-stop times are present there is one per stop, never
///   decreasing, the first no earlier than the departure time
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Trip {
    id: TripId,
    direction: String,
    departure: ClockTime,
    stops: Vec<NodeId>,
    stop_times: Option<Vec<ClockTime>>,
}

impl Trip {
    /// Constructs a trip, checking the stop-sequence invariants.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidTrip` if an invariant does not hold.
    pub fn new(
        id: TripId,
        direction: impl Into<String>,
        departure: ClockTime,
        stops: Vec<NodeId>,
        stop_times: Option<Vec<ClockTime>>,
    ) -> Result<Self, DomainError> {
        if stops.len() < 2 {
            return Err(DomainError::InvalidTrip("needs at least two stops"));
        }

        if stops.windows(2).any(|pair| pair[0] == pair[1]) {
            return Err(DomainError::InvalidTrip("stop repeated immediately"));
        }

        if let Some(times) = &stop_times {
            if times.len() != stops.len() {
                return Err(DomainError::InvalidTrip(
                    "stop_times length differs from stops",
                ));
            }
            if times.windows(2).any(|pair| pair[1] < pair[0]) {
                return Err(DomainError::InvalidTrip("stop_times go backwards"));
            }
            if times[0] < departure {
                return Err(DomainError::InvalidTrip(
                    "first stop time is before departure",
                ));
            }
        }

        Ok(Self {
            id,
            direction: direction.into(),
            departure,
            stops,
            stop_times,
        })
    }

    pub fn id(&self) -> &TripId {
        &self.id
    }

    pub fn direction(&self) -> &str {
        &self.direction
    }

    /// Scheduled departure from the first stop.
    pub fn departure(&self) -> ClockTime {
        self.departure
    }

    /// Stops in traversal order.
    pub fn stops(&self) -> &[NodeId] {
        &self.stops
    }

    /// Exact per-stop times, when the dataset provides them.
    pub fn stop_times(&self) -> Option<&[ClockTime]> {
        self.stop_times.as_deref()
    }

    /// Index of the first visit to `stop`.
    pub fn position_of(&self, stop: &str) -> Option<usize> {
        self.stops.iter().position(|s| s.as_str() == stop)
    }

    /// Index of the first visit to `stop`, if that visit comes strictly
    /// after `board`. A stop first visited at or before `board` does not
    /// count, even when the trip loops back to it.
    pub fn reaches_after(&self, stop: &str, board: usize) -> Option<usize> {
        self.position_of(stop).filter(|&idx| idx > board)
    }

    /// Final stop of the trip.
    pub fn terminus(&self) -> &NodeId {
        // Non-empty by construction
        &self.stops[self.stops.len() - 1]
    }
}

/// A named bus line with its scheduled trips.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    pub id: RouteId,
    pub name: String,
    /// Flat fare charged for any ride on this route.
    pub fare: u32,
    pub trips: Vec<Trip>,
}

impl Route {
    /// Creates a route.
    pub fn new(id: RouteId, name: impl Into<String>, fare: u32, trips: Vec<Trip>) -> Self {
        Self {
            id,
            name: name.into(),
            fare,
            trips,
        }
    }

    /// Distinct stops served by any trip, in first-seen order.
    pub fn stops(&self) -> Vec<&NodeId> {
        let mut seen = std::collections::HashSet::new();
        self.trips
            .iter()
            .flat_map(|t| t.stops())
            .filter(|s| seen.insert(s.as_str()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(s: &str) -> NodeId {
        NodeId::parse(s).unwrap()
    }

    fn time(s: &str) -> ClockTime {
        ClockTime::parse_hhmm(s).unwrap()
    }

    fn trip(id: &str, dep: &str, stops: &[&str]) -> Result<Trip, DomainError> {
        Trip::new(
            TripId::parse(id).unwrap(),
            "outbound",
            time(dep),
            stops.iter().map(|s| node(s)).collect(),
            None,
        )
    }

    #[test]
    fn valid_trip() {
        let t = trip("T1", "08:00", &["A", "B", "C"]).unwrap();
        assert_eq!(t.id().as_str(), "T1");
        assert_eq!(t.direction(), "outbound");
        assert_eq!(t.departure(), time("08:00"));
        assert_eq!(t.stops().len(), 3);
        assert_eq!(t.terminus(), &node("C"));
        assert!(t.stop_times().is_none());
    }

    #[test]
    fn rejects_short_trip() {
        assert_eq!(
            trip("T1", "08:00", &["A"]),
            Err(DomainError::InvalidTrip("needs at least two stops"))
        );
        assert!(trip("T1", "08:00", &[]).is_err());
    }

    #[test]
    fn rejects_immediate_repeat() {
        assert_eq!(
            trip("T1", "08:00", &["A", "B", "B", "C"]),
            Err(DomainError::InvalidTrip("stop repeated immediately"))
        );
    }

    #[test]
    fn allows_loop_back_to_earlier_stop() {
        let t = trip("LOOP", "08:00", &["A", "B", "C", "A"]).unwrap();
        assert_eq!(t.position_of("A"), Some(0));
        assert_eq!(t.reaches_after("C", 1), Some(2));
        assert_eq!(t.reaches_after("B", 1), None);
        // First visit to A is before B, so the loop back does not count
        assert_eq!(t.reaches_after("A", 1), None);
        assert_eq!(t.reaches_after("Z", 0), None);
    }

    #[test]
    fn position_of_missing_stop() {
        let t = trip("T1", "08:00", &["A", "B"]).unwrap();
        assert_eq!(t.position_of("Z"), None);
    }

    #[test]
    fn stop_times_checked() {
        let stops = vec![node("A"), node("B"), node("C")];
        let id = TripId::parse("T").unwrap();

        let ok = Trip::new(
            id.clone(),
            "",
            time("08:00"),
            stops.clone(),
            Some(vec![time("08:00"), time("08:07"), time("08:15")]),
        );
        assert!(ok.is_ok());

        let wrong_len = Trip::new(
            id.clone(),
            "",
            time("08:00"),
            stops.clone(),
            Some(vec![time("08:00")]),
        );
        assert!(wrong_len.is_err());

        let backwards = Trip::new(
            id.clone(),
            "",
            time("08:00"),
            stops.clone(),
            Some(vec![time("08:00"), time("07:50"), time("08:15")]),
        );
        assert!(backwards.is_err());

        let early = Trip::new(
            id,
            "",
            time("08:00"),
            stops,
            Some(vec![time("07:55"), time("08:07"), time("08:15")]),
        );
        assert!(early.is_err());
    }

    #[test]
    fn route_stops_first_seen_order() {
        let route = Route::new(
            RouteId::parse("R1").unwrap(),
            "Route 1",
            20,
            vec![
                trip("T1", "08:00", &["A", "B", "C"]).unwrap(),
                trip("T2", "09:00", &["C", "B", "D"]).unwrap(),
            ],
        );

        let stops: Vec<&str> = route.stops().iter().map(|s| s.as_str()).collect();
        assert_eq!(stops, vec!["A", "B", "C", "D"]);
    }
}
