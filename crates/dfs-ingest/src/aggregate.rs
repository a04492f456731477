//! Row aggregation over dataset files.
//!
//! Two operating modes: `read_table` reads one named file with the
//! quote-aware parser (the curated parks dataset), `read_tree` sweeps a
//! directory tree for extension-matching files with the naive parser
//! (the bulk CSV drops). Each file's header is consumed independently,
//! so an aggregate may hold records with heterogeneous key sets.

use std::io::BufRead;

use crate::client::Dfs;
use crate::error::{IngestError, Result};
use crate::parse::{parse_table, SplitMode};
use crate::types::{EntryKind, RowRecord};
use crate::walk::walk;

const DELIMITER: char = ',';

/// Result of one tree-mode aggregation run.
///
/// `rows` is append-only in discovery order. The file counters make
/// per-file failures observable; a failed file contributes no rows.
#[derive(Debug, Default)]
pub struct TreeAggregate {
    pub rows: Vec<RowRecord>,
    pub files_read: usize,
    pub files_failed: usize,
}

/// Reads one delimited-text file into row records (quote-aware mode).
///
/// The path must exist; a missing path is `PathNotFound` and stream
/// errors propagate. Callers at the service boundary degrade these to
/// empty results.
pub fn read_table<D: Dfs + ?Sized>(fs: &D, path: &str) -> Result<Vec<RowRecord>> {
    if !fs.exists(path)? {
        return Err(IngestError::PathNotFound(path.to_string()));
    }
    let reader = fs.open(path)?;
    read_rows(reader, SplitMode::QuoteAware)
}

/// Aggregates rows from every extension-matching file under `root`
/// (naive mode), in traversal order.
///
/// Files not matching the extension are never opened. A failure reading
/// one file is logged and counted, and its contribution omitted; a
/// failure to list the root yields an empty aggregate.
pub fn read_tree<D: Dfs + ?Sized>(
    fs: &D,
    root: &str,
    extension: Option<&str>,
) -> TreeAggregate {
    let mut matching = Vec::new();
    let walked = walk(fs, root, |entry| {
        if entry.kind == EntryKind::File
            && extension.map_or(true, |ext| entry.path.ends_with(ext))
        {
            matching.push(entry.path.clone());
        }
    });
    if let Err(e) = walked {
        tracing::error!(root, error = %e, "tree aggregation aborted");
        return TreeAggregate::default();
    }

    let mut aggregate = TreeAggregate::default();
    for path in matching {
        match fs.open(&path).and_then(|r| read_rows(r, SplitMode::Naive)) {
            Ok(mut rows) => {
                tracing::debug!(path, rows = rows.len(), "aggregated dataset file");
                aggregate.files_read += 1;
                aggregate.rows.append(&mut rows);
            }
            Err(e) => {
                tracing::warn!(path, error = %e, "skipping unreadable dataset file");
                aggregate.files_failed += 1;
            }
        }
    }
    aggregate
}

/// First line is the header; the rest are body lines. An empty stream
/// yields no rows.
fn read_rows(reader: Box<dyn BufRead>, mode: SplitMode) -> Result<Vec<RowRecord>> {
    let mut lines = reader.lines();
    let Some(header) = lines.next() else {
        return Ok(Vec::new());
    };
    let header = header?;
    let body = lines.collect::<std::io::Result<Vec<String>>>()?;
    Ok(parse_table(&header, body, DELIMITER, mode))
}
