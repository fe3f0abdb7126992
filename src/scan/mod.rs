// src/scan/mod.rs

//! File-change detection.
//!
//! - `enumerate`: expand root paths into regular files.
//! - `fingerprint`: SHA-1 content fingerprint of one file.
//! - `snapshot`: fingerprint many files concurrently under an admission gate.
//! - `diff`: compare two snapshots into added / edited / deleted paths.
//!
//! Nothing here prints or loops; see `watch` for that.

pub mod diff;
pub mod enumerate;
pub mod fingerprint;
pub mod snapshot;

pub use diff::{diff, ChangeSet};
pub use enumerate::{enumerate, FileList, TraversalError};
pub use fingerprint::{fingerprint_file, hash_reader, same_content, Fingerprint, HashOutcome};
pub use snapshot::{Snapshot, SnapshotBuilder};
