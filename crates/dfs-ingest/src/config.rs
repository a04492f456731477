//! Ingestion configuration.

use serde::{Deserialize, Serialize};

/// Environment variable overriding the filesystem root URI.
pub const DFS_URI_VAR: &str = "DFS_URI";
/// Environment variable overriding the parks dataset path.
pub const PARKS_PATH_VAR: &str = "PARKS_DATASET_PATH";

/// Configuration for the ingestion layer.
///
/// Values come from the environment with baked-in defaults matching the
/// production deployment; tests point `dfs_uri` at a `file://` fixture.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngestConfig {
    /// Root filesystem address, e.g. `hdfs://namenode:8020` or `file:///tmp/data`.
    pub dfs_uri: String,
    /// Path of the parks dataset file used to populate the startup cache.
    pub parks_path: String,
    /// Filename suffix selecting delimited-text files in tree aggregation.
    pub csv_extension: String,
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            dfs_uri: "hdfs://namenode:8020".to_string(),
            parks_path: "/user/hadoop/datasets/park-biodiversity/parks.csv".to_string(),
            csv_extension: ".csv".to_string(),
        }
    }
}

impl IngestConfig {
    /// Builds a configuration from the environment, falling back to
    /// defaults for unset variables.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(uri) = std::env::var(DFS_URI_VAR) {
            config.dfs_uri = uri;
        }
        if let Ok(path) = std::env::var(PARKS_PATH_VAR) {
            config.parks_path = path;
        }
        config
    }

    /// Configuration rooted at the given URI, keeping default dataset paths.
    pub fn with_uri(uri: impl Into<String>) -> Self {
        Self {
            dfs_uri: uri.into(),
            ..Self::default()
        }
    }
}
