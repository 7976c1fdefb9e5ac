//! Dataset loading error types.

use std::path::PathBuf;

use crate::domain::DomainError;

/// Errors that make a dataset unusable as a whole.
#[derive(Debug, thiserror::Error)]
pub enum DatasetError {
    /// Source file could not be read
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Source file is not valid dataset JSON
    #[error("failed to parse {}: {source}", .path.display())]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },

    /// No usable node survived validation
    #[error("dataset {} contains no valid nodes", .path.display())]
    Empty { path: PathBuf },

    /// Reload requested on a store that was not opened from disk
    #[error("no dataset source configured")]
    NoSource,

    /// The blocking load task did not complete
    #[error("dataset load task failed: {0}")]
    LoadTask(String),
}

/// A record dropped or adjusted while building a snapshot.
///
/// Loading continues past these; they are logged and collected into the
/// [`LoadReport`](super::LoadReport).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DataIntegrityWarning {
    #[error("node record {position}: {source}")]
    InvalidNode { position: usize, source: DomainError },

    #[error("duplicate node {id}")]
    DuplicateNode { id: String },

    #[error("edge {from} -> {to}: {source}")]
    InvalidEdge {
        from: String,
        to: String,
        source: DomainError,
    },

    /// The edge is kept with the weight rounded to whole units.
    #[error("edge {from} -> {to}: fractional {field} rounded")]
    RoundedWeight {
        from: String,
        to: String,
        field: &'static str,
    },

    #[error("route record {position}: {source}")]
    InvalidRoute { position: usize, source: DomainError },

    #[error("duplicate route {id}")]
    DuplicateRoute { id: String },

    #[error("trip {trip} of route {route}: {source}")]
    InvalidTrip {
        route: String,
        trip: String,
        source: DomainError,
    },
}
