//! The in-memory transit network.
//!
//! [`LocationGraph`] holds locations and local edges, [`RouteCatalog`] the
//! scheduled routes, and [`ScheduleIndex`] the per-node trip lookup derived
//! from the catalog. A [`NetworkSnapshot`] bundles all three; the
//! [`SnapshotStore`] publishes it and swaps it atomically on reload.

mod catalog;
mod graph;
mod local_path;
mod schedule_index;
mod snapshot;
mod store;

pub use catalog::RouteCatalog;
pub use graph::LocationGraph;
pub use local_path::{LocalPath, LocalPathFinder, ShortestPathTree};
pub use schedule_index::{ScheduleIndex, StopVisit};
pub use snapshot::NetworkSnapshot;
pub use store::SnapshotStore;
