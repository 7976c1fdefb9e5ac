//! The published network snapshot and its reload.

use std::sync::Arc;

use tokio::sync::{Mutex, RwLock};
use tracing::{info, warn};

use crate::dataset::{DatasetError, DatasetSource, load_network};

use super::snapshot::NetworkSnapshot;

/// Shared handle to the current [`NetworkSnapshot`].
///
/// Readers take a cheap `Arc` clone of the current snapshot and query it
/// without holding any lock. A reload builds the next snapshot off to the
/// side and swaps the pointer under a short write lock, so a reader sees
/// either the old snapshot or the new one, never a mix. If the reload
/// fails, the current snapshot stays published.
#[derive(Clone)]
pub struct SnapshotStore {
    current: Arc<RwLock<Arc<NetworkSnapshot>>>,
    source: Option<DatasetSource>,
    /// Serializes reloads so generations stay strictly increasing.
    reload_lock: Arc<Mutex<()>>,
}

impl SnapshotStore {
    /// Load the dataset at `source` and publish it as generation 1.
    ///
    /// The file is read on the blocking pool.
    pub async fn open(source: DatasetSource) -> Result<Self, DatasetError> {
        let snapshot = load_snapshot(source.clone(), 1).await?;
        log_loaded(&snapshot, &source);

        Ok(Self {
            current: Arc::new(RwLock::new(Arc::new(snapshot))),
            source: Some(source),
            reload_lock: Arc::new(Mutex::new(())),
        })
    }

    /// Publish an in-memory snapshot. Such a store cannot reload.
    pub fn from_snapshot(snapshot: NetworkSnapshot) -> Self {
        Self {
            current: Arc::new(RwLock::new(Arc::new(snapshot))),
            source: None,
            reload_lock: Arc::new(Mutex::new(())),
        }
    }

    /// The currently published snapshot.
    pub async fn current(&self) -> Arc<NetworkSnapshot> {
        let guard = self.current.read().await;
        guard.clone()
    }

    /// Re-read the dataset and publish it as the next generation.
    ///
    /// On failure the existing snapshot is preserved and the error is
    /// returned.
    pub async fn reload(&self) -> Result<Arc<NetworkSnapshot>, DatasetError> {
        let source = self.source.clone().ok_or(DatasetError::NoSource)?;
        let _reloading = self.reload_lock.lock().await;

        let generation = self.current().await.generation() + 1;
        let snapshot = match load_snapshot(source.clone(), generation).await {
            Ok(snapshot) => Arc::new(snapshot),
            Err(err) => {
                warn!(error = %err, "dataset reload failed, keeping current snapshot");
                return Err(err);
            }
        };
        log_loaded(&snapshot, &source);

        let mut guard = self.current.write().await;
        *guard = Arc::clone(&snapshot);

        Ok(snapshot)
    }
}

async fn load_snapshot(
    source: DatasetSource,
    generation: u64,
) -> Result<NetworkSnapshot, DatasetError> {
    let network = tokio::task::spawn_blocking(move || load_network(&source))
        .await
        .map_err(|e| DatasetError::LoadTask(e.to_string()))??;
    Ok(NetworkSnapshot::build(generation, network))
}

fn log_loaded(snapshot: &NetworkSnapshot, source: &DatasetSource) {
    info!(
        generation = snapshot.generation(),
        path = %source.path().display(),
        nodes = snapshot.graph().node_count(),
        edges = snapshot.graph().edge_count(),
        routes = snapshot.catalog().route_count(),
        trips = snapshot.catalog().trip_count(),
        warnings = snapshot.report().warnings.len(),
        "network snapshot loaded"
    );
}
