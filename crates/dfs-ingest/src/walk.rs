//! Depth-first directory traversal.
//!
//! The walk runs off an explicit worklist rather than recursion, so deep
//! trees cannot exhaust the call stack and the visit order is a plain
//! property of the stack discipline: entries are visited in listing
//! order, and a directory's contents are visited before its next
//! sibling (pre-order).

use crate::client::Dfs;
use crate::error::Result;
use crate::types::{DirEntry, EntryKind};

/// Counters from one traversal. `failed_dirs` makes partial failure
/// observable instead of only logged.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WalkStats {
    pub files: usize,
    pub dirs: usize,
    pub failed_dirs: usize,
}

/// Walks the tree rooted at `path`, invoking `visit` for every entry
/// exactly once.
///
/// A listing failure on the root aborts the walk. A subdirectory that
/// fails to list mid-walk is logged and counted; its subtree is skipped
/// and the walk continues with the remaining entries.
pub fn walk<D, F>(fs: &D, path: &str, mut visit: F) -> Result<WalkStats>
where
    D: Dfs + ?Sized,
    F: FnMut(&DirEntry),
{
    let mut stats = WalkStats::default();
    let mut stack = fs.list(path)?;
    stack.reverse();

    while let Some(entry) = stack.pop() {
        match entry.kind {
            EntryKind::File => {
                stats.files += 1;
                visit(&entry);
            }
            EntryKind::Directory => {
                stats.dirs += 1;
                visit(&entry);
                match fs.list(&entry.path) {
                    Ok(mut children) => {
                        // Reversed so children pop in listing order,
                        // ahead of the remaining siblings.
                        children.reverse();
                        stack.append(&mut children);
                    }
                    Err(e) => {
                        tracing::warn!(path = %entry.path, error = %e, "skipping unreadable subtree");
                        stats.failed_dirs += 1;
                    }
                }
            }
            EntryKind::Other => {
                tracing::debug!(path = %entry.path, "skipping non-file entry");
            }
        }
    }
    Ok(stats)
}
