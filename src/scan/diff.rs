// src/scan/diff.rs

use std::path::PathBuf;

use crate::scan::fingerprint::same_content;
use crate::scan::snapshot::Snapshot;

/// Paths that changed between two snapshots.
///
/// The three lists are disjoint. Their order carries no meaning.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChangeSet {
    pub added: Vec<PathBuf>,
    pub edited: Vec<PathBuf>,
    pub deleted: Vec<PathBuf>,
}

impl ChangeSet {
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.edited.is_empty() && self.deleted.is_empty()
    }

    /// Total number of changed paths.
    pub fn len(&self) -> usize {
        self.added.len() + self.edited.len() + self.deleted.len()
    }

    /// Sort each list in place.
    pub fn sort(&mut self) {
        self.added.sort();
        self.edited.sort();
        self.deleted.sort();
    }
}

/// Classify every path of `before` and `after` as added, edited or deleted.
///
/// A path present on both sides is edited when [`same_content`] says the
/// fingerprints differ, which includes a file becoming readable or
/// unreadable.
pub fn diff(before: &Snapshot, after: &Snapshot) -> ChangeSet {
    let mut changes = ChangeSet::default();

    for fp in before.iter() {
        let path = fp.path();
        match after.get(path) {
            None => changes.deleted.push(path.to_path_buf()),
            Some(now) if !same_content(Some(fp), Some(now)) => {
                changes.edited.push(path.to_path_buf())
            }
            Some(_) => {}
        }
    }

    for path in after.paths() {
        if !before.contains(path) {
            changes.added.push(path.to_path_buf());
        }
    }

    changes
}
