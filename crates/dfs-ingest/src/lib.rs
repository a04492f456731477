//! Dataset ingestion over a remote hierarchical filesystem.
//!
//! This crate provides the data-ingestion layer of the park dataset
//! service:
//! - Scoped filesystem handles connected by URI
//! - Depth-first directory walking with an explicit worklist
//! - Delimited-text parsing into ordered row records
//! - Tree-wide row aggregation with per-file failure isolation
//! - A once-populated, immutable in-memory dataset cache

pub mod aggregate;
pub mod cache;
pub mod client;
pub mod config;
pub mod error;
pub mod parse;
pub mod service;
pub mod types;
pub mod walk;

// Re-export main types
pub use aggregate::{read_table, read_tree, TreeAggregate};
pub use cache::DatasetCache;
pub use client::{Dfs, DfsHandle};
pub use config::IngestConfig;
pub use error::{IngestError, Result};
pub use parse::{parse_table, split_line, SplitMode};
pub use service::IngestService;
pub use types::{DirEntry, EntryKind, RowRecord};
pub use walk::{walk, WalkStats};
