// src/watch/poller.rs

use std::fmt;
use std::future::Future;
use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info};

use crate::config::Settings;
use crate::fs::FileSystem;
use crate::scan::{diff, Snapshot, SnapshotBuilder};
use crate::watch::report::ChangeReport;

/// Periodically rescans the roots and reports what changed since the
/// previous scan.
///
/// The first scan only establishes the baseline; changes are reported from
/// the second scan on.
pub struct Poller {
    builder: SnapshotBuilder,
    roots: Vec<PathBuf>,
    interval: Duration,
    previous: Option<Snapshot>,
}

impl fmt::Debug for Poller {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Poller")
            .field("roots", &self.roots)
            .field("interval", &self.interval)
            .field("has_baseline", &self.previous.is_some())
            .finish_non_exhaustive()
    }
}

impl Poller {
    pub fn new(fs: Arc<dyn FileSystem>, settings: &Settings) -> Self {
        Self {
            builder: SnapshotBuilder::new(fs, settings.max_in_flight()),
            roots: settings.roots().to_vec(),
            interval: settings.interval(),
            previous: None,
        }
    }

    /// Take a fresh snapshot and make it the reference for the next poll.
    ///
    /// Returns the number of files in the baseline.
    pub async fn baseline(&mut self) -> Result<usize> {
        let snapshot = self.builder.scan(&self.roots).await?;
        let files = snapshot.len();
        info!(files, failed = snapshot.failed_count(), "baseline snapshot taken");
        self.previous = Some(snapshot);
        Ok(files)
    }

    /// Run one poll cycle.
    ///
    /// Returns a report when anything was added, edited or deleted since the
    /// previous cycle. Without a previous snapshot this behaves like
    /// [`Poller::baseline`] and reports nothing.
    pub async fn poll_once(&mut self) -> Result<Option<ChangeReport>> {
        let current = self.builder.scan(&self.roots).await?;
        let Some(previous) = self.previous.take() else {
            self.previous = Some(current);
            return Ok(None);
        };

        let changes = diff(&previous, &current);
        let files = current.len();
        self.previous = Some(current);

        if changes.is_empty() {
            debug!(files, "no changes");
            return Ok(None);
        }

        info!(
            added = changes.added.len(),
            edited = changes.edited.len(),
            deleted = changes.deleted.len(),
            "files changed"
        );
        Ok(Some(ChangeReport::now(changes)))
    }

    /// Poll forever (until `shutdown` resolves), writing every report to `out`.
    pub async fn run<W, F>(mut self, out: &mut W, shutdown: F) -> Result<()>
    where
        W: Write + ?Sized,
        F: Future<Output = ()>,
    {
        self.baseline().await?;

        let mut ticker = tokio::time::interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // The first tick completes immediately; the baseline covers it.
        ticker.tick().await;

        info!(interval_ms = self.interval.as_millis() as u64, "poll loop started");

        tokio::pin!(shutdown);
        loop {
            tokio::select! {
                _ = &mut shutdown => {
                    info!("shutdown requested; stopping poll loop");
                    break;
                }
                _ = ticker.tick() => {
                    if let Some(report) = self.poll_once().await? {
                        write!(out, "{report}")?;
                        out.flush()?;
                    }
                }
            }
        }

        Ok(())
    }
}
