// src/scan/enumerate.rs

//! Recursive expansion of root paths into the regular files below them.

use std::path::{Path, PathBuf};

use tracing::{debug, trace, warn};

use crate::fs::{EntryKind, FileSystem};

/// A path that could not be visited during a walk.
#[derive(Debug, Clone)]
pub struct TraversalError {
    pub path: PathBuf,
    pub reason: String,
}

/// Output of [`enumerate`]: the regular files found plus everything that was
/// skipped because it could not be accessed.
#[derive(Debug, Clone, Default)]
pub struct FileList {
    pub files: Vec<PathBuf>,
    pub inaccessible: Vec<TraversalError>,
}

impl FileList {
    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

/// Walk every root and collect the regular files reachable from it.
///
/// Directories are descended into, symlinks and special files are skipped.
/// An entry that cannot be stat'ed, or a directory that cannot be listed,
/// is reported as a diagnostic and its subtree is left out; the walk goes
/// on. Overlapping roots are not deduplicated.
pub fn enumerate(fs: &dyn FileSystem, roots: &[PathBuf]) -> FileList {
    let mut out = FileList::default();
    for root in roots {
        walk_root(fs, root, &mut out);
    }
    debug!(
        roots = roots.len(),
        files = out.files.len(),
        inaccessible = out.inaccessible.len(),
        "enumerated watch roots"
    );
    out
}

fn walk_root(fs: &dyn FileSystem, root: &Path, out: &mut FileList) {
    let mut stack = vec![root.to_path_buf()];

    while let Some(path) = stack.pop() {
        let kind = match fs.entry_kind(&path) {
            Ok(k) => k,
            Err(err) => {
                skip(out, path, format!("{err:#}"));
                continue;
            }
        };

        match kind {
            EntryKind::File => out.files.push(path),
            EntryKind::Dir => match fs.read_dir(&path) {
                Ok(mut children) => {
                    // Reverse so the stack pops children in listing order.
                    children.reverse();
                    stack.extend(children);
                }
                Err(err) => skip(out, path, format!("{err:#}")),
            },
            EntryKind::Symlink | EntryKind::Other => {
                trace!(?path, ?kind, "skipping non-regular entry");
            }
        }
    }
}

fn skip(out: &mut FileList, path: PathBuf, reason: String) {
    warn!(?path, %reason, "unable to access path; skipping");
    out.inaccessible.push(TraversalError { path, reason });
}
