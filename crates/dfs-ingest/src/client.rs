//! Filesystem capability: scoped handles connected by URI.
//!
//! A [`DfsHandle`] owns one backend session and releases it when dropped,
//! so every exit path of an operation that connects also disconnects.
//! Backends implement [`Dfs`]; the built-in `file://` backend maps remote
//! absolute paths onto a local base directory.

mod local;

pub use local::LocalDfs;

use std::fmt;
use std::io::BufRead;

use crate::error::{IngestError, Result};
use crate::types::DirEntry;

/// Filesystem access capability consumed by the ingestion pipeline.
///
/// Connecting must not assume any path exists; existence is checked
/// per-operation.
pub trait Dfs {
    /// Lists the immediate entries of a directory, in backend order.
    fn list(&self, path: &str) -> Result<Vec<DirEntry>>;

    /// Opens a file as a buffered byte stream.
    fn open(&self, path: &str) -> Result<Box<dyn BufRead>>;

    /// Returns whether a path exists.
    fn exists(&self, path: &str) -> Result<bool>;
}

/// A scoped connection to a filesystem root.
pub struct DfsHandle {
    backend: Box<dyn Dfs>,
    uri: String,
}

impl DfsHandle {
    /// Connects to the filesystem identified by `uri`.
    ///
    /// An unknown scheme or malformed URI yields a `Connection` error,
    /// never a partial handle. The root is not required to exist.
    pub fn connect(uri: &str) -> Result<Self> {
        let (scheme, rest) = uri.split_once("://").ok_or_else(|| {
            IngestError::Connection(format!("malformed filesystem URI: {uri}"))
        })?;
        let backend: Box<dyn Dfs> = match scheme {
            "file" => Box::new(LocalDfs::new(rest)),
            other => {
                return Err(IngestError::Connection(format!(
                    "unreachable filesystem root {uri}: no client for scheme '{other}'"
                )))
            }
        };
        tracing::debug!(uri, "filesystem session opened");
        Ok(Self {
            backend,
            uri: uri.to_string(),
        })
    }

    pub fn uri(&self) -> &str {
        &self.uri
    }
}

impl Dfs for DfsHandle {
    fn list(&self, path: &str) -> Result<Vec<DirEntry>> {
        self.backend.list(path)
    }

    fn open(&self, path: &str) -> Result<Box<dyn BufRead>> {
        self.backend.open(path)
    }

    fn exists(&self, path: &str) -> Result<bool> {
        self.backend.exists(path)
    }
}

impl fmt::Debug for DfsHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DfsHandle").field("uri", &self.uri).finish()
    }
}

impl Drop for DfsHandle {
    fn drop(&mut self) {
        tracing::debug!(uri = %self.uri, "filesystem session released");
    }
}
