//! Once-populated, immutable dataset snapshot.
//!
//! The snapshot is set exactly once behind a `OnceLock`. Reads are
//! lock-free: before population they see an empty sequence, afterwards
//! the shared snapshot, unchanged for the lifetime of the process.

use std::sync::{Arc, OnceLock};

use crate::types::RowRecord;

#[derive(Debug, Default)]
pub struct DatasetCache {
    snapshot: OnceLock<Arc<[RowRecord]>>,
}

impl DatasetCache {
    pub const fn new() -> Self {
        Self {
            snapshot: OnceLock::new(),
        }
    }

    /// Sets the snapshot. Only the first call takes effect; returns
    /// whether this call populated the cache. An empty `rows` still
    /// populates — a failed load is indistinguishable from an empty
    /// dataset to readers.
    pub fn populate(&self, rows: Vec<RowRecord>) -> bool {
        self.snapshot.set(Arc::from(rows)).is_ok()
    }

    /// Returns the snapshot, or an empty sequence before population.
    /// Never blocks, never errors.
    pub fn get(&self) -> Arc<[RowRecord]> {
        self.snapshot
            .get()
            .cloned()
            .unwrap_or_else(|| Arc::from(Vec::new()))
    }

    pub fn is_populated(&self) -> bool {
        self.snapshot.get().is_some()
    }
}
