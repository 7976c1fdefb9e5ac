//! Where a dataset is read from.

use std::fs;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;

use super::error::DatasetError;
use super::records::{Dataset, EdgeRecord, NodeRecord, RouteRecord};

const NODES_FILE: &str = "nodes.json";
const EDGES_FILE: &str = "edges.json";
const ROUTES_FILE: &str = "routes.json";

/// A dataset on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DatasetSource {
    /// One JSON document with `nodes`, `edges` and `routes` arrays.
    File(PathBuf),
    /// A directory holding `nodes.json`, and optionally `edges.json` and
    /// `routes.json`, each a JSON array.
    Directory(PathBuf),
}

impl DatasetSource {
    /// Pick the source kind from what is at `path`.
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        if path.is_dir() {
            Self::Directory(path)
        } else {
            Self::File(path)
        }
    }

    pub fn path(&self) -> &Path {
        match self {
            Self::File(path) | Self::Directory(path) => path,
        }
    }

    /// Read and parse the dataset. Blocking.
    pub fn load(&self) -> Result<Dataset, DatasetError> {
        match self {
            Self::File(path) => read_json(path),
            Self::Directory(dir) => {
                let nodes: Vec<NodeRecord> = read_json(&dir.join(NODES_FILE))?;
                let edges: Vec<EdgeRecord> = read_optional_json(&dir.join(EDGES_FILE))?;
                let routes: Vec<RouteRecord> = read_optional_json(&dir.join(ROUTES_FILE))?;
                Ok(Dataset {
                    nodes,
                    edges,
                    routes,
                })
            }
        }
    }
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, DatasetError> {
    let text = fs::read_to_string(path).map_err(|source| DatasetError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&text).map_err(|source| DatasetError::Json {
        path: path.to_path_buf(),
        source,
    })
}

fn read_optional_json<T: DeserializeOwned + Default>(path: &Path) -> Result<T, DatasetError> {
    if path.exists() {
        read_json(path)
    } else {
        Ok(T::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn loads_single_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"nodes": [{{"id": "A", "name": "Alpha"}}], "edges": [], "routes": []}}"#
        )
        .unwrap();

        let source = DatasetSource::from_path(file.path());
        assert!(matches!(source, DatasetSource::File(_)));

        let dataset = source.load().unwrap();
        assert_eq!(dataset.nodes.len(), 1);
    }

    #[test]
    fn loads_directory() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join(NODES_FILE),
            r#"[{"id": "A", "name": "Alpha"}, {"id": "B", "name": "Beta"}]"#,
        )
        .unwrap();
        fs::write(
            dir.path().join(EDGES_FILE),
            r#"[{"from": "A", "to": "B", "time": 3}]"#,
        )
        .unwrap();

        let source = DatasetSource::from_path(dir.path());
        assert_eq!(source, DatasetSource::Directory(dir.path().to_path_buf()));

        let dataset = source.load().unwrap();
        assert_eq!(dataset.nodes.len(), 2);
        assert_eq!(dataset.edges.len(), 1);
        assert!(dataset.routes.is_empty());
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let source = DatasetSource::File(dir.path().join("absent.json"));

        let err = source.load().unwrap_err();
        assert!(matches!(err, DatasetError::Io { .. }));
    }

    #[test]
    fn directory_without_nodes_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = DatasetSource::Directory(dir.path().to_path_buf())
            .load()
            .unwrap_err();
        assert!(matches!(err, DatasetError::Io { .. }));
    }

    #[test]
    fn corrupt_file_is_json_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{{ not json").unwrap();

        let err = DatasetSource::from_path(file.path()).load().unwrap_err();
        assert!(matches!(err, DatasetError::Json { .. }));
        assert!(err.to_string().starts_with("failed to parse"));
    }
}
