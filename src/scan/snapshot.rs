// src/scan/snapshot.rs

use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result};
use tokio::sync::{mpsc, Semaphore};
use tokio::task::JoinSet;
use tracing::{debug, warn};

use crate::fs::FileSystem;
use crate::scan::enumerate::enumerate;
use crate::scan::fingerprint::{fingerprint_file, Fingerprint};

/// Every file's fingerprint at one point in time, keyed by path.
///
/// A snapshot is assembled once (by [`SnapshotBuilder::build`] or by
/// collecting fingerprints) and is read-only afterwards.
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    entries: HashMap<PathBuf, Fingerprint>,
}

impl Snapshot {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, path: &Path) -> Option<&Fingerprint> {
        self.entries.get(path)
    }

    pub fn contains(&self, path: &Path) -> bool {
        self.entries.contains_key(path)
    }

    pub fn paths(&self) -> impl Iterator<Item = &Path> {
        self.entries.keys().map(PathBuf::as_path)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Fingerprint> {
        self.entries.values()
    }

    /// Fingerprints ordered by path, for stable output.
    pub fn sorted(&self) -> Vec<&Fingerprint> {
        let mut out: Vec<&Fingerprint> = self.entries.values().collect();
        out.sort_by(|a, b| a.path().cmp(b.path()));
        out
    }

    pub fn failed_count(&self) -> usize {
        self.entries.values().filter(|fp| fp.is_failed()).count()
    }
}

/// Later fingerprints for the same path replace earlier ones.
impl FromIterator<Fingerprint> for Snapshot {
    fn from_iter<I: IntoIterator<Item = Fingerprint>>(iter: I) -> Self {
        let mut entries = HashMap::new();
        for fp in iter {
            entries.insert(fp.path().to_path_buf(), fp);
        }
        Self { entries }
    }
}

/// Hashes a list of files concurrently into a [`Snapshot`].
///
/// At most `max_in_flight` files are being opened/read/hashed at any time.
/// Each worker holds an owned permit from the admission gate for its whole
/// lifetime, so the slot is returned on every exit path. Results flow over
/// a channel to a single aggregator task that owns the map.
#[derive(Clone)]
pub struct SnapshotBuilder {
    fs: Arc<dyn FileSystem>,
    gate: Arc<Semaphore>,
    max_in_flight: usize,
}

impl fmt::Debug for SnapshotBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SnapshotBuilder")
            .field("fs", &self.fs)
            .field("max_in_flight", &self.max_in_flight)
            .finish_non_exhaustive()
    }
}

impl SnapshotBuilder {
    /// `max_in_flight` is clamped to at least 1.
    pub fn new(fs: Arc<dyn FileSystem>, max_in_flight: usize) -> Self {
        let max_in_flight = max_in_flight.max(1);
        Self {
            fs,
            gate: Arc::new(Semaphore::new(max_in_flight)),
            max_in_flight,
        }
    }

    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight
    }

    /// Fingerprint every path and wait for all of them.
    ///
    /// Unreadable files do not fail the call; they are recorded as failed
    /// fingerprints. An error here means a worker or the aggregator itself
    /// died.
    pub async fn build(&self, paths: Vec<PathBuf>) -> Result<Snapshot> {
        if paths.is_empty() {
            return Ok(Snapshot::default());
        }

        let total = paths.len();
        let started = Instant::now();
        debug!(files = total, max_in_flight = self.max_in_flight, "building snapshot");

        let (tx, mut rx) = mpsc::channel::<Fingerprint>(self.max_in_flight);

        let aggregator = tokio::spawn(async move {
            let mut entries = HashMap::with_capacity(total);
            while let Some(fp) = rx.recv().await {
                entries.insert(fp.path().to_path_buf(), fp);
            }
            Snapshot { entries }
        });

        let mut workers = JoinSet::new();
        for path in paths {
            let permit = Arc::clone(&self.gate)
                .acquire_owned()
                .await
                .context("admission gate closed")?;
            let fs = Arc::clone(&self.fs);
            let tx = tx.clone();

            workers.spawn_blocking(move || {
                let _permit = permit;
                let fp = fingerprint_file(fs.as_ref(), &path);
                if tx.blocking_send(fp).is_err() {
                    warn!(?path, "snapshot aggregator gone; dropping fingerprint");
                }
            });
        }
        drop(tx);

        while let Some(res) = workers.join_next().await {
            if let Err(err) = res {
                warn!(error = %err, "fingerprint worker failed");
            }
        }

        let snapshot = aggregator
            .await
            .context("snapshot aggregator task failed")?;

        debug!(
            entries = snapshot.len(),
            failed = snapshot.failed_count(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "snapshot built"
        );
        Ok(snapshot)
    }

    /// Enumerate `roots` and fingerprint everything found.
    ///
    /// The walk itself is blocking I/O and runs on the blocking pool.
    pub async fn scan(&self, roots: &[PathBuf]) -> Result<Snapshot> {
        let fs = Arc::clone(&self.fs);
        let roots = roots.to_vec();
        let list = tokio::task::spawn_blocking(move || enumerate(fs.as_ref(), &roots))
            .await
            .context("enumeration task failed")?;
        self.build(list.files).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fs::mock::MockFileSystem;

    fn builder(fs: &MockFileSystem, max: usize) -> SnapshotBuilder {
        SnapshotBuilder::new(Arc::new(fs.clone()), max)
    }

    #[tokio::test]
    async fn empty_input_gives_empty_snapshot() {
        let fs = MockFileSystem::new();
        let snap = builder(&fs, 4).build(Vec::new()).await.unwrap();
        assert!(snap.is_empty());
    }

    #[tokio::test]
    async fn duplicate_paths_collapse_to_one_entry() {
        let fs = MockFileSystem::new();
        fs.add_file("a.txt", b"abc");

        let paths = vec![PathBuf::from("a.txt"); 5];
        let snap = builder(&fs, 2).build(paths).await.unwrap();

        assert_eq!(snap.len(), 1);
        assert_eq!(
            snap.get(Path::new("a.txt")).unwrap().hex().unwrap(),
            "a9993e364706816aba3e25717850c26c9cd0d89d"
        );
    }

    #[tokio::test]
    async fn failures_are_recorded_not_raised() {
        let fs = MockFileSystem::new();
        fs.add_file("good.txt", b"");
        fs.add_broken_file("bad.txt", b"xx");

        let paths = vec![
            PathBuf::from("good.txt"),
            PathBuf::from("bad.txt"),
            PathBuf::from("missing.txt"),
        ];
        let snap = builder(&fs, 1).build(paths).await.unwrap();

        assert_eq!(snap.len(), 3);
        assert_eq!(snap.failed_count(), 2);
        assert!(!snap.get(Path::new("good.txt")).unwrap().is_failed());
    }

    #[tokio::test]
    async fn scan_walks_and_hashes() {
        let fs = MockFileSystem::new();
        fs.add_file("root/a.txt", b"abc");
        fs.add_file("root/sub/b.txt", b"");
        fs.add_symlink("root/link", "root/a.txt");

        let snap = builder(&fs, 8).scan(&[PathBuf::from("root")]).await.unwrap();

        assert_eq!(snap.len(), 2);
        assert_eq!(
            snap.get(Path::new("root/sub/b.txt")).unwrap().hex().unwrap(),
            "da39a3ee5e6b4b0d3255bfef95601890afd80709"
        );
        assert!(!snap.contains(Path::new("root/link")));
    }

    #[test]
    fn zero_ceiling_is_clamped() {
        let fs = MockFileSystem::new();
        assert_eq!(builder(&fs, 0).max_in_flight(), 1);
    }

    #[test]
    fn collecting_keeps_last_fingerprint_per_path() {
        let snap: Snapshot = vec![
            Fingerprint::digest("f", [1u8; 20]),
            Fingerprint::digest("f", [2u8; 20]),
        ]
        .into_iter()
        .collect();

        assert_eq!(snap.len(), 1);
        assert_eq!(snap.get(Path::new("f")).unwrap().digest_bytes(), Some(&[2u8; 20]));
    }
}
