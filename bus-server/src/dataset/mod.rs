//! Dataset loading.
//!
//! A dataset is read from JSON on disk, validated record by record, and
//! turned into a [`LocationGraph`](crate::network::LocationGraph) and a
//! [`RouteCatalog`](crate::network::RouteCatalog). Only an unreadable or
//! empty dataset is an error; individual bad records become warnings.

mod error;
mod records;
mod source;
mod validate;

pub use error::{DataIntegrityWarning, DatasetError};
pub use records::{Dataset, EdgeRecord, NodeRecord, RouteRecord, TripRecord};
pub use source::DatasetSource;
pub use validate::{DEFAULT_FARE, LoadReport, ValidatedNetwork, validate};

/// Read and validate a dataset. Blocking.
pub fn load_network(source: &DatasetSource) -> Result<ValidatedNetwork, DatasetError> {
    let dataset = source.load()?;
    let network = validate(dataset);

    if network.graph.node_count() == 0 {
        return Err(DatasetError::Empty {
            path: source.path().to_path_buf(),
        });
    }

    Ok(network)
}
