//! Data transfer objects for web requests and responses.
//!
//! Field names follow the JSON the existing browser and mobile clients
//! read: camelCase totals (`totalTimeMin`, `minutesUntil`) next to
//! snake_case identifiers (`route_id`, `trip_id`).

use serde::{Deserialize, Serialize};

use crate::domain::{ClockTime, Edge, Leg, Node, NodeId, Route, RouteOption};
use crate::network::{LocalPath, LocationGraph, NetworkSnapshot};
use crate::planner::{TripTimetable, UpcomingDeparture};

/// Query for itinerary planning and local paths.
#[derive(Debug, Deserialize)]
pub struct PlanQuery {
    /// Origin node ID
    pub from: Option<String>,

    /// Destination node ID
    pub to: Option<String>,

    /// Departure time in HH:MM format (defaults to now)
    pub time: Option<String>,
}

/// Query for upcoming buses.
#[derive(Debug, Deserialize)]
pub struct UpcomingQuery {
    /// Stop the buses are coming to
    pub from: Option<String>,

    /// Optional destination the bus must reach afterwards
    pub to: Option<String>,

    /// Maximum number of buses; unparseable values use the default
    pub limit: Option<String>,

    /// Reference time in HH:MM format (defaults to now)
    pub time: Option<String>,
}

/// A node as listed by the API.
#[derive(Debug, Clone, Serialize)]
pub struct NodeResult {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
}

/// Response for the node list.
#[derive(Debug, Serialize)]
pub struct NodesResponse {
    pub count: usize,
    pub nodes: Vec<NodeResult>,
}

/// An outgoing local edge.
#[derive(Debug, Serialize)]
pub struct NeighborResult {
    pub to: String,
    pub name: String,
    pub mode: String,
    #[serde(rename = "timeMin")]
    pub time_min: u32,
    pub cost: u32,
    #[serde(rename = "distanceMeters")]
    pub distance_meters: u32,
}

/// Response for a node's neighbors.
#[derive(Debug, Serialize)]
pub struct NeighborsResponse {
    pub id: String,
    pub count: usize,
    pub neighbors: Vec<NeighborResult>,
}

/// Short identification of a node in a response.
#[derive(Debug, Clone, Serialize)]
pub struct PlaceRef {
    pub id: String,
    pub name: String,
}

/// One leg of a plan or local path.
#[derive(Debug, Serialize)]
pub struct LegResult {
    pub mode: String,
    pub from: String,
    pub to: String,
    #[serde(rename = "fromName")]
    pub from_name: String,
    #[serde(rename = "toName")]
    pub to_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub departure: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub arrival: Option<String>,
    #[serde(rename = "durationMin")]
    pub duration_min: u32,
    pub cost: u32,
    #[serde(rename = "distanceMeters")]
    pub distance_meters: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub route_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trip_id: Option<String>,
}

/// A planned itinerary option.
#[derive(Debug, Serialize)]
pub struct OptionResult {
    pub label: String,
    pub category: String,
    #[serde(rename = "totalTimeMin")]
    pub total_time_min: u32,
    #[serde(rename = "totalCost")]
    pub total_cost: u32,
    pub transfers: usize,
    #[serde(rename = "localTimeMin")]
    pub local_time_min: u32,
    #[serde(rename = "localDistanceMeters")]
    pub local_distance_meters: u32,
    #[serde(rename = "arrivalTime")]
    pub arrival_time: String,
    pub legs: Vec<LegResult>,
}

/// Response for itinerary planning.
#[derive(Debug, Serialize)]
pub struct PlanResponse {
    pub from: PlaceRef,
    pub to: PlaceRef,
    #[serde(rename = "departureTime")]
    pub departure_time: String,
    pub count: usize,
    pub options: Vec<OptionResult>,
}

/// Response for a local shortest path.
#[derive(Debug, Serialize)]
pub struct LocalPathResponse {
    pub found: bool,
    pub from: PlaceRef,
    pub to: PlaceRef,
    #[serde(rename = "totalTimeMin")]
    pub total_time_min: u32,
    #[serde(rename = "totalCost")]
    pub total_cost: u32,
    #[serde(rename = "totalDistanceMeters")]
    pub total_distance_meters: u32,
    pub legs: Vec<LegResult>,
}

/// One bus in the upcoming list.
#[derive(Debug, Serialize)]
pub struct BusResult {
    pub route_id: String,
    pub route_name: String,
    pub trip_id: String,
    pub departure: String,
    #[serde(rename = "minutesUntil")]
    pub minutes_until: u32,
    /// Name of the trip's final stop.
    pub destination: String,
    pub direction: String,
    #[serde(rename = "stopsAway")]
    pub stops_away: usize,
    pub status: String,
}

/// Response for upcoming buses.
#[derive(Debug, Serialize)]
pub struct UpcomingResponse {
    pub location: PlaceRef,
    #[serde(rename = "currentTime")]
    pub current_time: String,
    pub count: usize,
    pub buses: Vec<BusResult>,
}

/// A trip as listed in route details.
#[derive(Debug, Serialize)]
pub struct TripSummary {
    pub trip_id: String,
    pub direction: String,
    pub departure_time: String,
    pub stops: Vec<String>,
}

/// Response for one route's details.
#[derive(Debug, Serialize)]
pub struct RouteDetailsResponse {
    pub route_id: String,
    pub name: String,
    pub fare: u32,
    pub total_trips: usize,
    pub stops: Vec<NodeResult>,
    pub trips: Vec<TripSummary>,
}

/// One route in the catalog listing.
#[derive(Debug, Serialize)]
pub struct RouteSummary {
    pub route_id: String,
    pub name: String,
    pub fare: u32,
    pub trip_count: usize,
    pub stop_count: usize,
}

/// Response for the route catalog.
#[derive(Debug, Serialize)]
pub struct CatalogResponse {
    pub count: usize,
    pub routes: Vec<RouteSummary>,
}

/// A stop call with its estimated time.
#[derive(Debug, Serialize)]
pub struct StopTimeResult {
    pub id: String,
    pub name: String,
    pub time: String,
}

/// A trip in a route schedule.
#[derive(Debug, Serialize)]
pub struct ScheduledTripResult {
    pub trip_id: String,
    pub direction: String,
    pub departure_time: String,
    pub stops: Vec<StopTimeResult>,
    pub stop_count: usize,
}

/// Response for a route schedule.
#[derive(Debug, Serialize)]
pub struct ScheduleResponse {
    pub route_id: String,
    pub name: String,
    pub trips: Vec<ScheduledTripResult>,
}

/// Response for a dataset reload.
#[derive(Debug, Serialize)]
pub struct ReloadResponse {
    pub generation: u64,
    #[serde(rename = "loadedAt")]
    pub loaded_at: String,
    pub nodes: usize,
    pub edges: usize,
    pub routes: usize,
    pub trips: usize,
    pub warnings: Vec<String>,
}

/// Error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
}

// Conversion implementations

/// Display name of a node, falling back to its ID.
pub fn name_of(graph: &LocationGraph, id: &NodeId) -> String {
    graph
        .node(id.as_str())
        .map(|n| n.name.clone())
        .unwrap_or_else(|| id.to_string())
}

impl NodeResult {
    pub fn from_node(node: &Node) -> Self {
        Self {
            id: node.id.to_string(),
            name: node.name.clone(),
            kind: node.category.as_str().to_string(),
        }
    }
}

impl PlaceRef {
    pub fn from_node(node: &Node) -> Self {
        Self {
            id: node.id.to_string(),
            name: node.name.clone(),
        }
    }
}

impl NeighborResult {
    pub fn from_edge(edge: &Edge, graph: &LocationGraph) -> Self {
        Self {
            to: edge.to.to_string(),
            name: name_of(graph, &edge.to),
            mode: edge.mode.as_str().to_string(),
            time_min: edge.time_mins,
            cost: edge.cost,
            distance_meters: edge.distance_m,
        }
    }
}

impl LegResult {
    pub fn from_leg(leg: &Leg, graph: &LocationGraph) -> Self {
        Self {
            mode: leg.mode.as_str().to_string(),
            from: leg.from.to_string(),
            to: leg.to.to_string(),
            from_name: name_of(graph, &leg.from),
            to_name: name_of(graph, &leg.to),
            departure: leg.departure.map(|t| t.to_string()),
            arrival: leg.arrival.map(|t| t.to_string()),
            duration_min: leg.duration_mins,
            cost: leg.cost,
            distance_meters: leg.distance_m,
            route_id: leg.route_id.as_ref().map(|r| r.to_string()),
            trip_id: leg.trip_id.as_ref().map(|t| t.to_string()),
        }
    }

    pub fn from_edge(edge: &Edge, graph: &LocationGraph) -> Self {
        Self::from_leg(&Leg::local(edge), graph)
    }
}

impl OptionResult {
    pub fn from_option(option: &RouteOption, departure: ClockTime, graph: &LocationGraph) -> Self {
        Self {
            label: option.label.clone(),
            category: option.category.as_str().to_string(),
            total_time_min: option.total_time_mins,
            total_cost: option.total_cost,
            transfers: option.transfers,
            local_time_min: option.local_time_mins,
            local_distance_meters: option.local_distance_m,
            arrival_time: option.arrival_time(departure).to_string(),
            legs: option
                .legs
                .iter()
                .map(|l| LegResult::from_leg(l, graph))
                .collect(),
        }
    }
}

impl LocalPathResponse {
    pub fn from_path(path: &LocalPath, from: &Node, to: &Node, graph: &LocationGraph) -> Self {
        Self {
            found: path.found,
            from: PlaceRef::from_node(from),
            to: PlaceRef::from_node(to),
            total_time_min: path.total_time,
            total_cost: path.total_cost,
            total_distance_meters: path.total_distance,
            legs: path
                .legs
                .iter()
                .map(|e| LegResult::from_edge(e, graph))
                .collect(),
        }
    }
}

impl BusResult {
    pub fn from_departure(bus: &UpcomingDeparture, graph: &LocationGraph) -> Self {
        Self {
            route_id: bus.route_id.to_string(),
            route_name: bus.route_name.clone(),
            trip_id: bus.trip_id.to_string(),
            departure: bus.departure.to_string(),
            minutes_until: bus.minutes_until,
            destination: name_of(graph, &bus.terminus),
            direction: bus.direction.clone(),
            stops_away: bus.stops_away,
            status: bus.status.as_str().to_string(),
        }
    }
}

impl RouteSummary {
    pub fn from_route(route: &Route) -> Self {
        Self {
            route_id: route.id.to_string(),
            name: route.name.clone(),
            fare: route.fare,
            trip_count: route.trips.len(),
            stop_count: route.stops().len(),
        }
    }
}

impl RouteDetailsResponse {
    pub fn from_route(route: &Route, stops: &[&NodeId], graph: &LocationGraph) -> Self {
        let stops = stops
            .iter()
            .map(|id| match graph.node(id.as_str()) {
                Some(node) => NodeResult::from_node(node),
                None => NodeResult {
                    id: id.to_string(),
                    name: id.to_string(),
                    kind: String::new(),
                },
            })
            .collect();

        let trips = route
            .trips
            .iter()
            .map(|trip| TripSummary {
                trip_id: trip.id().to_string(),
                direction: trip.direction().to_string(),
                departure_time: trip.departure().to_string(),
                stops: trip.stops().iter().map(|s| s.to_string()).collect(),
            })
            .collect();

        Self {
            route_id: route.id.to_string(),
            name: route.name.clone(),
            fare: route.fare,
            total_trips: route.trips.len(),
            stops,
            trips,
        }
    }
}

impl ScheduleResponse {
    pub fn from_timetables(route: &Route, trips: &[TripTimetable], graph: &LocationGraph) -> Self {
        let trips = trips
            .iter()
            .map(|trip| ScheduledTripResult {
                trip_id: trip.trip_id.to_string(),
                direction: trip.direction.clone(),
                departure_time: trip.departure.to_string(),
                stops: trip
                    .calls
                    .iter()
                    .map(|(id, time)| StopTimeResult {
                        id: id.to_string(),
                        name: name_of(graph, id),
                        time: time.to_string(),
                    })
                    .collect(),
                stop_count: trip.calls.len(),
            })
            .collect();

        Self {
            route_id: route.id.to_string(),
            name: route.name.clone(),
            trips,
        }
    }
}

impl ReloadResponse {
    pub fn from_snapshot(snapshot: &NetworkSnapshot) -> Self {
        Self {
            generation: snapshot.generation(),
            loaded_at: snapshot.loaded_at().to_rfc3339(),
            nodes: snapshot.graph().node_count(),
            edges: snapshot.graph().edge_count(),
            routes: snapshot.catalog().route_count(),
            trips: snapshot.catalog().trip_count(),
            warnings: snapshot
                .report()
                .warnings
                .iter()
                .map(|w| w.to_string())
                .collect(),
        }
    }
}
