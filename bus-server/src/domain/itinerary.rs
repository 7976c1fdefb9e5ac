//! Itinerary types.
//!
//! A `RouteOption` is one complete door-to-door plan: an ordered sequence of
//! legs, each either a local hop along a graph edge or a ride on a
//! scheduled trip.

use std::fmt;

use super::{ClockTime, Edge, Mode, NodeId, Route, RouteId, Trip, TripId};

/// One segment of an itinerary.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Leg {
    pub mode: Mode,
    pub from: NodeId,
    pub to: NodeId,
    /// Scheduled boarding time (scheduled legs only).
    pub departure: Option<ClockTime>,
    /// Scheduled alighting time (scheduled legs only).
    pub arrival: Option<ClockTime>,
    pub duration_mins: u32,
    pub cost: u32,
    pub distance_m: u32,
    pub route_id: Option<RouteId>,
    pub trip_id: Option<TripId>,
}

impl Leg {
    /// A leg along one local edge.
    pub fn local(edge: &Edge) -> Self {
        Self {
            mode: edge.mode,
            from: edge.from.clone(),
            to: edge.to.clone(),
            departure: None,
            arrival: None,
            duration_mins: edge.time_mins,
            cost: edge.cost,
            distance_m: edge.distance_m,
            route_id: None,
            trip_id: None,
        }
    }

    /// A ride on a scheduled trip between two of its stops.
    pub fn scheduled(
        route: &Route,
        trip: &Trip,
        from: NodeId,
        to: NodeId,
        board: ClockTime,
        alight: ClockTime,
    ) -> Self {
        Self {
            mode: Mode::Bus,
            from,
            to,
            departure: Some(board),
            arrival: Some(alight),
            duration_mins: u32::try_from(alight.minutes_since(board)).unwrap_or(0),
            cost: route.fare,
            distance_m: 0,
            route_id: Some(route.id.clone()),
            trip_id: Some(trip.id().clone()),
        }
    }

    /// True for rides on a scheduled trip.
    pub fn is_scheduled(&self) -> bool {
        self.route_id.is_some()
    }
}

/// How an option was composed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OptionCategory {
    /// Local edges only.
    Local,
    /// A single scheduled trip.
    Direct,
    /// Two rides joined at an intermediate node.
    Transfer,
}

impl OptionCategory {
    pub fn as_str(self) -> &'static str {
        match self {
            OptionCategory::Local => "local",
            OptionCategory::Direct => "direct",
            OptionCategory::Transfer => "transfer",
        }
    }
}

impl fmt::Display for OptionCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A complete ranked door-to-door plan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteOption {
    pub label: String,
    pub category: OptionCategory,
    /// Minutes from the requested departure to final arrival, waits included.
    pub total_time_mins: u32,
    pub total_cost: u32,
    pub transfers: usize,
    pub local_time_mins: u32,
    pub local_distance_m: u32,
    pub legs: Vec<Leg>,
}

impl RouteOption {
    /// The zero-length plan for a trip that starts where it ends.
    pub fn stay_put(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            category: OptionCategory::Local,
            total_time_mins: 0,
            total_cost: 0,
            transfers: 0,
            local_time_mins: 0,
            local_distance_m: 0,
            legs: Vec::new(),
        }
    }

    /// Builds an option from its legs, deriving every total.
    ///
    /// The clock starts at `start`. Local legs advance it by their duration;
    /// a scheduled leg first waits for its departure, then jumps to its
    /// arrival. A run of consecutive local legs counts as one ride, so
    /// transfers are the number of ride changes.
    pub fn compose(
        label: impl Into<String>,
        category: OptionCategory,
        start: ClockTime,
        legs: Vec<Leg>,
    ) -> Self {
        let mut clock = start;
        let mut total_cost = 0u32;
        let mut local_time_mins = 0u32;
        let mut local_distance_m = 0u32;
        let mut rides = 0usize;
        let mut previous_was_local = false;

        for leg in &legs {
            total_cost = total_cost.saturating_add(leg.cost);

            match (leg.departure, leg.arrival) {
                (Some(departure), Some(arrival)) => {
                    clock = clock.max(departure).max(arrival);
                    rides += 1;
                    previous_was_local = false;
                }
                _ => {
                    clock = clock.plus_minutes(leg.duration_mins);
                    local_time_mins = local_time_mins.saturating_add(leg.duration_mins);
                    local_distance_m = local_distance_m.saturating_add(leg.distance_m);
                    if !previous_was_local {
                        rides += 1;
                    }
                    previous_was_local = true;
                }
            }
        }

        Self {
            label: label.into(),
            category,
            total_time_mins: u32::try_from(clock.minutes_since(start)).unwrap_or(0),
            total_cost,
            transfers: rides.saturating_sub(1),
            local_time_mins,
            local_distance_m,
            legs,
        }
    }

    /// Node where the plan starts, if it has any legs.
    pub fn origin(&self) -> Option<&NodeId> {
        self.legs.first().map(|l| &l.from)
    }

    /// Node where the plan ends, if it has any legs.
    pub fn destination(&self) -> Option<&NodeId> {
        self.legs.last().map(|l| &l.to)
    }

    /// Arrival clock value given the requested departure.
    pub fn arrival_time(&self, start: ClockTime) -> ClockTime {
        start.plus_minutes(self.total_time_mins)
    }
}
