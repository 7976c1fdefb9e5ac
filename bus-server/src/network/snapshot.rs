//! An immutable, fully indexed view of one loaded dataset.

use chrono::{DateTime, Utc};

use crate::dataset::{LoadReport, ValidatedNetwork};

use super::catalog::RouteCatalog;
use super::graph::LocationGraph;
use super::schedule_index::ScheduleIndex;

/// Everything a query needs, built once and never mutated.
///
/// Queries hold an `Arc<NetworkSnapshot>` for their whole duration; a reload
/// publishes a new snapshot without disturbing them.
#[derive(Debug)]
pub struct NetworkSnapshot {
    generation: u64,
    loaded_at: DateTime<Utc>,
    graph: LocationGraph,
    catalog: RouteCatalog,
    index: ScheduleIndex,
    report: LoadReport,
}

impl NetworkSnapshot {
    /// Index a validated network.
    pub fn build(generation: u64, network: ValidatedNetwork) -> Self {
        let index = ScheduleIndex::build(&network.catalog);
        Self {
            generation,
            loaded_at: Utc::now(),
            graph: network.graph,
            catalog: network.catalog,
            index,
            report: network.report,
        }
    }

    /// Snapshot from parts already in memory, with an empty report.
    pub fn from_parts(generation: u64, graph: LocationGraph, catalog: RouteCatalog) -> Self {
        Self::build(
            generation,
            ValidatedNetwork {
                graph,
                catalog,
                report: LoadReport::default(),
            },
        )
    }

    /// Increases by one with every successful load.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn loaded_at(&self) -> DateTime<Utc> {
        self.loaded_at
    }

    pub fn graph(&self) -> &LocationGraph {
        &self.graph
    }

    pub fn catalog(&self) -> &RouteCatalog {
        &self.catalog
    }

    pub fn index(&self) -> &ScheduleIndex {
        &self.index
    }

    /// Records dropped while loading.
    pub fn report(&self) -> &LoadReport {
        &self.report
    }
}
