//! Door-to-door itinerary planning.
//!
//! Candidates come from three sources, all over one snapshot:
//!
//! 1. The local shortest path, if the destination is reachable on local
//!    edges alone.
//! 2. Direct rides: one trip calling at the origin and later at the
//!    destination.
//! 3. One-transfer rides: a first leg to an intermediate node, then a trip
//!    of another route onward to the destination. The first leg is either a
//!    trip from the origin (changing buses at the intermediate stop) or a
//!    local path (walking to a stop that the origin has no direct bus to).
//!
//! Candidates are deduplicated by leg sequence, ranked, and truncated.

use std::collections::hash_map::Entry;
use std::collections::{HashMap, HashSet};

use tracing::debug;

use crate::domain::{
    ClockTime, Leg, Mode, Node, NodeId, OptionCategory, Route, RouteOption, Trip,
};
use crate::network::{
    LocalPath, LocalPathFinder, LocationGraph, NetworkSnapshot, RouteCatalog, ScheduleIndex,
    ShortestPathTree, StopVisit,
};

use super::arrival::ArrivalEstimator;
use super::config::PlannerConfig;
use super::rank::{deduplicate, rank_options};

/// Label for the zero-length plan when origin and destination coincide.
pub const ALREADY_THERE: &str = "Already there";

/// Plans itineraries over a network snapshot.
pub struct ItineraryPlanner<'a, E> {
    graph: &'a LocationGraph,
    catalog: &'a RouteCatalog,
    index: &'a ScheduleIndex,
    estimator: E,
    config: &'a PlannerConfig,
}

/// A scheduled ride between two stops of one trip.
#[derive(Debug, Clone, Copy)]
struct Ride<'a> {
    route: &'a Route,
    trip: &'a Trip,
    board_index: usize,
    alight_index: usize,
    board: ClockTime,
    alight: ClockTime,
}

impl Ride<'_> {
    fn leg(&self) -> Leg {
        let stops = self.trip.stops();
        Leg::scheduled(
            self.route,
            self.trip,
            stops[self.board_index].clone(),
            stops[self.alight_index].clone(),
            self.board,
            self.alight,
        )
    }
}

/// Key under which only the earliest onward ride is kept.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum TransferKey {
    /// First trip (route, trip position), change stop, second route.
    Bus(usize, usize, NodeId, usize),
    /// Change stop reached locally, second route.
    Local(NodeId, usize),
}

impl<'a, E: ArrivalEstimator> ItineraryPlanner<'a, E> {
    pub fn new(
        graph: &'a LocationGraph,
        catalog: &'a RouteCatalog,
        index: &'a ScheduleIndex,
        estimator: E,
        config: &'a PlannerConfig,
    ) -> Self {
        Self {
            graph,
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
        Self::new(
            snapshot.graph(),
            snapshot.catalog(),
            snapshot.index(),
            estimator,
            config,
        )
    }

    /// Ranked options from `from` to `to`, leaving no earlier than
    /// `departure`.
    ///
    /// Unknown nodes and unreachable destinations give an empty list. When
    /// `from == to` the only option is a zero-length local one.
    pub fn plan(&self, from: &str, to: &str, departure: ClockTime) -> Vec<RouteOption> {
        let endpoints = (self.graph.node(from), self.graph.node(to));
        let (Some(origin), Some(destination)) = endpoints else {
            return Vec::new();
        };

        if origin.id == destination.id {
            return vec![RouteOption::stay_put(ALREADY_THERE)];
        }

        let mut candidates = Vec::new();
        let tree = LocalPathFinder::new(self.graph).tree_from(from);

        if let Some(tree) = &tree {
            let path = tree.path_to(to);
            if path.found {
                candidates.push(self.local_option(&path, departure));
            }
        }

        let direct_start = candidates.len();
        candidates.extend(self.direct_options(origin, destination, departure));
        let transfer_start = candidates.len();
        candidates.extend(self.bus_transfer_options(origin, destination, departure));
        if let Some(tree) = &tree {
            candidates.extend(self.local_transfer_options(tree, origin, destination, departure));
        }

        debug!(
            from,
            to,
            %departure,
            local = direct_start,
            direct = transfer_start - direct_start,
            transfer = candidates.len() - transfer_start,
            "itinerary candidates"
        );

        let mut options = rank_options(deduplicate(candidates));
        options.truncate(self.config.max_results);
        options
    }

    fn local_option(&self, path: &LocalPath, departure: ClockTime) -> RouteOption {
        let legs: Vec<Leg> = path.legs.iter().map(Leg::local).collect();
        RouteOption::compose(local_label(&legs), OptionCategory::Local, departure, legs)
    }

    /// Every trip from `origin` that later reaches `destination`, boarding
    /// no earlier than `departure`.
    fn direct_options(
        &self,
        origin: &Node,
        destination: &Node,
        departure: ClockTime,
    ) -> Vec<RouteOption> {
        self.index
            .visits_at(origin.id.as_str())
            .iter()
            .filter_map(|visit| self.ride_from(visit, destination.id.as_str(), departure))
            .map(|ride| {
                let label = format!("Direct: {}", ride.route.name);
                RouteOption::compose(label, OptionCategory::Direct, departure, vec![ride.leg()])
            })
            .collect()
    }

    /// Bus to an intermediate stop, then a bus of another route onward.
    ///
    /// The first trip must not reach the destination itself, and the second
    /// must not call at the origin before the change stop; either would be
    /// a direct ride.
    fn bus_transfer_options(
        &self,
        origin: &Node,
        destination: &Node,
        departure: ClockTime,
    ) -> Vec<RouteOption> {
        let mut best: Vec<(Ride<'a>, Ride<'a>)> = Vec::new();
        let mut slot: HashMap<TransferKey, usize> = HashMap::new();

        for first_visit in self.index.visits_at(origin.id.as_str()) {
            let (route, trip) = self.catalog.resolve(first_visit);
            let board_index = first_visit.stop_index;
            if trip
                .reaches_after(destination.id.as_str(), board_index)
                .is_some()
            {
                continue;
            }

            let board = self.estimator.arrival_at(trip, board_index);
            if board < departure {
                continue;
            }

            let mut changes_seen: HashSet<&NodeId> = HashSet::new();
            for (alight_index, change) in trip.stops().iter().enumerate().skip(board_index + 1) {
                if change.as_str() == origin.id.as_str() || !changes_seen.insert(change) {
                    continue;
                }

                let first = Ride {
                    route,
                    trip,
                    board_index,
                    alight_index,
                    board,
                    alight: self.estimator.arrival_at(trip, alight_index),
                };
                let ready = first.alight.plus_minutes(self.config.min_transfer_mins);

                for second_visit in self.index.visits_at(change.as_str()) {
                    if second_visit.route == first_visit.route {
                        continue;
                    }
                    let Some(second) = self.onward_ride(second_visit, origin, destination, ready)
                    else {
                        continue;
                    };

                    let key = TransferKey::Bus(
                        first_visit.route,
                        first_visit.trip,
                        change.clone(),
                        second_visit.route,
                    );
                    keep_earliest(&mut best, &mut slot, key, (first, second));
                }
            }
        }

        best.into_iter()
            .map(|(first, second)| {
                let change = self.name_of(&first.trip.stops()[first.alight_index]);
                let label = format!(
                    "Via {change}: {} → {}",
                    first.route.name, second.route.name
                );
                RouteOption::compose(
                    label,
                    OptionCategory::Transfer,
                    departure,
                    vec![first.leg(), second.leg()],
                )
            })
            .collect()
    }

    /// Local path to a stop within the access limit, then a bus onward.
    fn local_transfer_options(
        &self,
        tree: &ShortestPathTree<'_>,
        origin: &Node,
        destination: &Node,
        departure: ClockTime,
    ) -> Vec<RouteOption> {
        let mut best: Vec<(LocalPath, Ride<'a>)> = Vec::new();
        let mut slot: HashMap<TransferKey, usize> = HashMap::new();

        for (change, access_mins) in tree.reachable() {
            if change.id == origin.id
                || change.id == destination.id
                || access_mins > self.config.max_access_mins
            {
                continue;
            }

            let ready = departure.plus_minutes(access_mins);
            for visit in self.index.visits_at(change.id.as_str()) {
                let Some(ride) = self.onward_ride(visit, origin, destination, ready) else {
                    continue;
                };

                match slot.entry(TransferKey::Local(change.id.clone(), visit.route)) {
                    Entry::Occupied(entry) => {
                        let kept = &mut best[*entry.get()].1;
                        if ride.board < kept.board {
                            *kept = ride;
                        }
                    }
                    Entry::Vacant(entry) => {
                        entry.insert(best.len());
                        best.push((tree.path_to(change.id.as_str()), ride));
                    }
                }
            }
        }

        best.into_iter()
            .map(|(path, ride)| {
                let mut legs: Vec<Leg> = path.legs.iter().map(Leg::local).collect();
                let label = format!(
                    "Via {}: {} → {}",
                    self.name_of(&ride.trip.stops()[ride.board_index]),
                    local_label(&legs),
                    ride.route.name
                );
                legs.push(ride.leg());
                RouteOption::compose(label, OptionCategory::Transfer, departure, legs)
            })
            .collect()
    }

    /// The ride on a visited trip onward to `to`, if the trip reaches it
    /// and is boardable no earlier than `ready`.
    fn ride_from(&self, visit: &StopVisit, to: &str, ready: ClockTime) -> Option<Ride<'a>> {
        let (route, trip) = self.catalog.resolve(visit);
        let board_index = visit.stop_index;
        let alight_index = trip.reaches_after(to, board_index)?;

        let board = self.estimator.arrival_at(trip, board_index);
        if board < ready {
            return None;
        }

        Some(Ride {
            route,
            trip,
            board_index,
            alight_index,
            board,
            alight: self.estimator.arrival_at(trip, alight_index),
        })
    }

    /// Second leg of a transfer: like [`Self::ride_from`], but rejecting
    /// trips that already called at the origin.
    fn onward_ride(
        &self,
        visit: &StopVisit,
        origin: &Node,
        destination: &Node,
        ready: ClockTime,
    ) -> Option<Ride<'a>> {
        let ride = self.ride_from(visit, destination.id.as_str(), ready)?;
        let passes_origin = ride.trip.stops()[..ride.board_index].contains(&origin.id);
        (!passes_origin).then_some(ride)
    }

    fn name_of(&self, id: &NodeId) -> String {
        self.graph
            .node(id.as_str())
            .map(|n| n.name.clone())
            .unwrap_or_else(|| id.to_string())
    }
}

/// Keep, per key, the pair whose second ride boards earliest. Ties keep the
/// pair found first.
fn keep_earliest<'a>(
    best: &mut Vec<(Ride<'a>, Ride<'a>)>,
    slot: &mut HashMap<TransferKey, usize>,
    key: TransferKey,
    pair: (Ride<'a>, Ride<'a>),
) {
    match slot.entry(key) {
        Entry::Occupied(entry) => {
            let kept = &mut best[*entry.get()];
            if pair.1.board < kept.1.board {
                *kept = pair;
            }
        }
        Entry::Vacant(entry) => {
            entry.insert(best.len());
            best.push(pair);
        }
    }
}

/// "Walk", "Rickshaw", "Walk + Rickshaw": the distinct local modes, in
/// order of first use.
fn local_label(legs: &[Leg]) -> String {
    let mut modes: Vec<Mode> = Vec::new();
    for leg in legs {
        if !modes.contains(&leg.mode) {
            modes.push(leg.mode);
        }
    }

    modes
        .iter()
        .map(|mode| capitalize(mode.as_str()))
        .collect::<Vec<_>>()
        .join(" + ")
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
#[path = "itinerary_tests.rs"]
mod tests;
