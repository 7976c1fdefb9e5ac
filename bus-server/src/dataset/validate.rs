//! Turn raw records into a graph and a route catalog.
//!
//! Availability wins over strictness here: a record that doesn't validate is
//! logged, noted in the report and dropped, and the rest of the dataset
//! still loads. A trip with a bad stop loses only that trip; its route stays
//! listed even if no trip survives.

use tracing::warn;

use crate::domain::{
    ClockTime, DomainError, Edge, Mode, Node, NodeCategory, NodeId, Route, RouteId, Trip, TripId,
};
use crate::network::{LocationGraph, RouteCatalog};

use super::error::DataIntegrityWarning;
use super::records::{Dataset, EdgeRecord, NodeRecord, RouteRecord, TripRecord};

/// Fare charged for a route whose record has none.
pub const DEFAULT_FARE: u32 = 0;

/// Warnings collected while building a snapshot.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadReport {
    pub warnings: Vec<DataIntegrityWarning>,
}

impl LoadReport {
    pub fn is_clean(&self) -> bool {
        self.warnings.is_empty()
    }

    fn record(&mut self, warning: DataIntegrityWarning) {
        warn!(%warning, "dataset record dropped or adjusted");
        self.warnings.push(warning);
    }
}

/// Validated contents of a dataset.
#[derive(Debug, Clone)]
pub struct ValidatedNetwork {
    pub graph: LocationGraph,
    pub catalog: RouteCatalog,
    pub report: LoadReport,
}

/// Validate every record, keeping what is consistent.
pub fn validate(dataset: Dataset) -> ValidatedNetwork {
    let mut report = LoadReport::default();
    let mut graph = LocationGraph::new();
    let mut catalog = RouteCatalog::new();

    for (position, record) in dataset.nodes.into_iter().enumerate() {
        match node_from_record(record) {
            Ok(node) => {
                let id = node.id.to_string();
                if !graph.add_node(node) {
                    report.record(DataIntegrityWarning::DuplicateNode { id });
                }
            }
            Err(source) => report.record(DataIntegrityWarning::InvalidNode { position, source }),
        }
    }

    for record in dataset.edges {
        let from = record.from.clone();
        let to = record.to.clone();
        let rounded = fractional_weights(&record);
        match edge_from_record(record).and_then(|edge| graph.add_edge(edge)) {
            Ok(_) => {
                for field in rounded {
                    report.record(DataIntegrityWarning::RoundedWeight {
                        from: from.clone(),
                        to: to.clone(),
                        field,
                    });
                }
            }
            Err(source) => report.record(DataIntegrityWarning::InvalidEdge { from, to, source }),
        }
    }

    for (position, record) in dataset.routes.into_iter().enumerate() {
        let route = match route_from_record(record, &graph, &mut report) {
            Ok(route) => route,
            Err(source) => {
                report.record(DataIntegrityWarning::InvalidRoute { position, source });
                continue;
            }
        };

        let id = route.id.to_string();
        if !catalog.push(route) {
            report.record(DataIntegrityWarning::DuplicateRoute { id });
        }
    }

    ValidatedNetwork {
        graph,
        catalog,
        report,
    }
}

fn node_from_record(record: NodeRecord) -> Result<Node, DomainError> {
    let id = NodeId::parse(&record.id)?;
    Ok(Node::new(id, record.name, NodeCategory::parse(&record.kind)))
}

fn edge_from_record(record: EdgeRecord) -> Result<Edge, DomainError> {
    Ok(Edge::new(
        NodeId::parse(&record.from)?,
        NodeId::parse(&record.to)?,
        Mode::parse(&record.mode),
        weight(record.time, "time must be finite and non-negative")?,
        weight(record.cost, "cost must be finite and non-negative")?,
        weight(record.distance, "distance must be finite and non-negative")?,
    ))
}

/// Weights of an edge record that are not whole numbers.
fn fractional_weights(record: &EdgeRecord) -> Vec<&'static str> {
    [
        ("time", record.time),
        ("cost", record.cost),
        ("distance", record.distance),
    ]
    .into_iter()
    .filter(|(_, value)| value.is_finite() && value.fract() != 0.0)
    .map(|(field, _)| field)
    .collect()
}

/// Round a non-negative float weight to whole units.
fn weight(value: f64, reason: &'static str) -> Result<u32, DomainError> {
    if !value.is_finite() || value < 0.0 {
        return Err(DomainError::InvalidEdge(reason));
    }
    // Float to int casts saturate
    Ok(value.round() as u32)
}

fn route_from_record(
    record: RouteRecord,
    graph: &LocationGraph,
    report: &mut LoadReport,
) -> Result<Route, DomainError> {
    let id = RouteId::parse(&record.route_id)?;

    let mut trips = Vec::with_capacity(record.trips.len());
    for trip in record.trips {
        let trip_name = trip.trip_id.clone();
        match trip_from_record(trip, graph) {
            Ok(trip) => trips.push(trip),
            Err(source) => report.record(DataIntegrityWarning::InvalidTrip {
                route: id.to_string(),
                trip: trip_name,
                source,
            }),
        }
    }

    Ok(Route::new(
        id,
        record.name,
        record.fare.unwrap_or(DEFAULT_FARE),
        trips,
    ))
}

fn trip_from_record(record: TripRecord, graph: &LocationGraph) -> Result<Trip, DomainError> {
    let id = TripId::parse(&record.trip_id)?;
    let departure = ClockTime::parse_hhmm(&record.departure_time)?;

    let stops = record
        .stops
        .iter()
        .map(|s| {
            let stop = NodeId::parse(s)?;
            if graph.has_node(stop.as_str()) {
                Ok(stop)
            } else {
                Err(DomainError::UnknownNode(stop))
            }
        })
        .collect::<Result<Vec<_>, DomainError>>()?;

    let stop_times = record
        .stop_times
        .map(|times| {
            times
                .iter()
                .map(|t| ClockTime::parse_hhmm(t))
                .collect::<Result<Vec<_>, _>>()
        })
        .transpose()?;

    Trip::new(id, record.direction, departure, stops, stop_times)
}
