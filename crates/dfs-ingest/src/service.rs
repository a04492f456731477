//! Boundary exposed to the serving layer.
//!
//! Every operation here degrades to "no data" rather than raising: a
//! connection failure or missing root surfaces as an empty result plus
//! a logged error, never an error value. Each operation connects its
//! own filesystem handle and releases it before returning.

use std::sync::Arc;

use crate::aggregate::{read_table, read_tree};
use crate::cache::DatasetCache;
use crate::client::{Dfs, DfsHandle};
use crate::config::IngestConfig;
use crate::error::Result;
use crate::types::{DirEntry, EntryKind, RowRecord};
use crate::walk::walk;

pub struct IngestService {
    config: IngestConfig,
    cache: DatasetCache,
}

impl IngestService {
    pub fn new(config: IngestConfig) -> Self {
        Self {
            config,
            cache: DatasetCache::new(),
        }
    }

    pub fn config(&self) -> &IngestConfig {
        &self.config
    }

    /// Populates the startup cache from the configured parks dataset.
    ///
    /// Runs at most once per process; a failed load leaves an empty
    /// snapshot and is not retried. Call during process initialization,
    /// before serving traffic.
    pub fn init_cache(&self) {
        if self.cache.is_populated() {
            return;
        }
        tracing::info!(path = %self.config.parks_path, "populating park dataset cache");
        let rows = self
            .connect()
            .and_then(|handle| read_table(&handle, &self.config.parks_path))
            .unwrap_or_else(|e| {
                tracing::error!(error = %e, "park dataset load failed, serving empty cache");
                Vec::new()
            });
        if self.cache.populate(rows) {
            tracing::info!(parks = self.cache.get().len(), "park dataset cache populated");
        }
    }

    /// Returns the cached parks snapshot; empty before [`init_cache`]
    /// completes.
    ///
    /// [`init_cache`]: Self::init_cache
    pub fn cached_parks(&self) -> Arc<[RowRecord]> {
        let snapshot = self.cache.get();
        tracing::debug!(parks = snapshot.len(), "serving parks from cache");
        snapshot
    }

    /// Lists the immediate entries of one directory. Diagnostic.
    pub fn list_dir(&self, path: &str) -> Vec<DirEntry> {
        match self.connect().and_then(|handle| handle.list(path)) {
            Ok(entries) => {
                for entry in &entries {
                    tracing::info!(path = %entry.path, kind = entry.kind.as_str(), "entry");
                }
                entries
            }
            Err(e) => {
                tracing::error!(path, error = %e, "directory listing failed");
                Vec::new()
            }
        }
    }

    /// Returns every file path under `path` from a full recursive walk.
    pub fn list_files(&self, path: &str) -> Vec<String> {
        let handle = match self.connect() {
            Ok(handle) => handle,
            Err(e) => {
                tracing::error!(error = %e, "filesystem connection failed");
                return Vec::new();
            }
        };

        let mut files = Vec::new();
        match walk(&handle, path, |entry| {
            if entry.kind == EntryKind::File {
                files.push(entry.path.clone());
            }
        }) {
            Ok(stats) => {
                tracing::debug!(
                    path,
                    files = stats.files,
                    dirs = stats.dirs,
                    failed_dirs = stats.failed_dirs,
                    "walk finished"
                );
                files
            }
            Err(e) => {
                tracing::error!(path, error = %e, "recursive listing failed");
                Vec::new()
            }
        }
    }

    /// Aggregates every CSV under `path` on demand. Not cached;
    /// recomputed on every call.
    pub fn read_all_csv_under(&self, path: &str) -> Vec<RowRecord> {
        match self.connect() {
            Ok(handle) => {
                let aggregate = read_tree(&handle, path, Some(&self.config.csv_extension));
                if aggregate.files_failed > 0 {
                    tracing::warn!(
                        path,
                        failed = aggregate.files_failed,
                        "some dataset files were skipped"
                    );
                }
                aggregate.rows
            }
            Err(e) => {
                tracing::error!(error = %e, "filesystem connection failed");
                Vec::new()
            }
        }
    }

    fn connect(&self) -> Result<DfsHandle> {
        DfsHandle::connect(&self.config.dfs_uri)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::fs;
    use std::path::Path;

    use tempfile::TempDir;

    fn service_over(temp: &TempDir) -> IngestService {
        IngestService::new(IngestConfig {
            dfs_uri: format!("file://{}", temp.path().display()),
            parks_path: "/datasets/parks.csv".to_string(),
            csv_extension: ".csv".to_string(),
        })
    }

    fn write(dir: &Path, rel: &str, contents: &str) {
        let path = dir.join(rel);
        fs::create_dir_all(path.parent().expect("parent")).expect("mkdir");
        fs::write(path, contents).expect("write");
    }

    #[test]
    fn cached_parks_is_empty_before_init() {
        let temp = TempDir::new().expect("tempdir");
        let service = service_over(&temp);

        assert!(service.cached_parks().is_empty());
    }

    #[test]
    fn init_cache_serves_the_parks_dataset() {
        let temp = TempDir::new().expect("tempdir");
        write(
            temp.path(),
            "datasets/parks.csv",
            "Park Code,Park Name\nACAD,\"Acadia, Maine\"\n",
        );
        let service = service_over(&temp);

        service.init_cache();
        let parks = service.cached_parks();

        assert_eq!(parks.len(), 1);
        assert_eq!(parks[0].get("Park Name"), Some("Acadia, Maine"));
    }

    #[test]
    fn cached_snapshot_is_stable_across_reads_and_reinit() {
        let temp = TempDir::new().expect("tempdir");
        write(temp.path(), "datasets/parks.csv", "a,b\n1,2\n");
        let service = service_over(&temp);

        service.init_cache();
        let first = service.cached_parks();

        // Dataset changes after population must not be observed
        write(temp.path(), "datasets/parks.csv", "a,b\n9,9\n9,9\n");
        service.init_cache();
        let second = service.cached_parks();

        assert_eq!(first, second);
        assert_eq!(second.len(), 1);
    }

    #[test]
    fn failed_population_serves_empty_and_does_not_retry() {
        let temp = TempDir::new().expect("tempdir");
        let service = service_over(&temp);

        service.init_cache();
        assert!(service.cached_parks().is_empty());

        // The dataset appearing later must not repopulate
        write(temp.path(), "datasets/parks.csv", "a\n1\n");
        service.init_cache();
        assert!(service.cached_parks().is_empty());
    }

    #[test]
    fn unreachable_root_degrades_every_operation_to_empty() {
        let service = IngestService::new(IngestConfig::default());

        service.init_cache();
        assert!(service.cached_parks().is_empty());
        assert!(service.list_dir("/user").is_empty());
        assert!(service.list_files("/user").is_empty());
        assert!(service.read_all_csv_under("/user").is_empty());
    }

    #[test]
    fn list_files_returns_every_file_under_the_root() {
        let temp = TempDir::new().expect("tempdir");
        write(temp.path(), "data/a.csv", "x\n1\n");
        write(temp.path(), "data/sub/b.txt", "hello");
        let service = service_over(&temp);

        let mut files = service.list_files("/data");
        files.sort();

        assert_eq!(files, vec!["/data/a.csv", "/data/sub/b.txt"]);
    }

    #[test]
    fn read_all_csv_under_is_recomputed_per_call() {
        let temp = TempDir::new().expect("tempdir");
        write(temp.path(), "drop/one.csv", "x\n1\n");
        let service = service_over(&temp);

        assert_eq!(service.read_all_csv_under("/drop").len(), 1);

        write(temp.path(), "drop/two.csv", "y\n2\n");
        assert_eq!(service.read_all_csv_under("/drop").len(), 2);
    }

    #[test]
    fn read_all_csv_under_skips_non_matching_files() {
        let temp = TempDir::new().expect("tempdir");
        write(temp.path(), "drop/rows.csv", "x\n1\n2\n");
        write(temp.path(), "drop/notes.txt", "not,a,table\n1,2,3\n");
        let service = service_over(&temp);

        let rows = service.read_all_csv_under("/drop");
        assert_eq!(rows.len(), 2);
        assert!(rows.iter().all(|r| r.get("x").is_some()));
    }

    #[test]
    fn list_dir_returns_immediate_entries_only() {
        let temp = TempDir::new().expect("tempdir");
        write(temp.path(), "data/a.csv", "x\n1\n");
        write(temp.path(), "data/sub/b.csv", "y\n2\n");
        let service = service_over(&temp);

        let mut entries = service.list_dir("/data");
        entries.sort_by(|a, b| a.path.cmp(&b.path));

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].path, "/data/a.csv");
        assert_eq!(entries[1].path, "/data/sub");
        assert_eq!(entries[1].kind, EntryKind::Directory);
    }
}
