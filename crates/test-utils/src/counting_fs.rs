use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use treewatch::fs::mock::MockFileSystem;
use treewatch::fs::{EntryKind, FileSystem};

/// Counts how many files are open for reading at once.
#[derive(Debug, Default)]
pub struct InFlightGauge {
    current: AtomicUsize,
    peak: AtomicUsize,
    opened: AtomicUsize,
}

impl InFlightGauge {
    fn enter(&self) {
        let now = self.current.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak.fetch_max(now, Ordering::SeqCst);
        self.opened.fetch_add(1, Ordering::SeqCst);
    }

    fn leave(&self) {
        self.current.fetch_sub(1, Ordering::SeqCst);
    }

    /// Files currently open.
    pub fn current(&self) -> usize {
        self.current.load(Ordering::SeqCst)
    }

    /// Highest number of files that were open at the same time.
    pub fn peak(&self) -> usize {
        self.peak.load(Ordering::SeqCst)
    }

    /// Total number of successful opens.
    pub fn opened(&self) -> usize {
        self.opened.load(Ordering::SeqCst)
    }
}

/// A `MockFileSystem` wrapper whose readers are slow and counted.
///
/// Every reader stalls for `read_delay` on its first read, which keeps files
/// open long enough for concurrent hashing to overlap.
#[derive(Debug, Clone)]
pub struct CountingFileSystem {
    inner: MockFileSystem,
    gauge: Arc<InFlightGauge>,
    read_delay: Duration,
}

impl CountingFileSystem {
    pub fn new(inner: MockFileSystem, read_delay: Duration) -> Self {
        Self {
            inner,
            gauge: Arc::new(InFlightGauge::default()),
            read_delay,
        }
    }

    pub fn gauge(&self) -> Arc<InFlightGauge> {
        Arc::clone(&self.gauge)
    }
}

impl FileSystem for CountingFileSystem {
    fn entry_kind(&self, path: &Path) -> Result<EntryKind> {
        self.inner.entry_kind(path)
    }

    fn read_dir(&self, path: &Path) -> Result<Vec<PathBuf>> {
        self.inner.read_dir(path)
    }

    fn open_read(&self, path: &Path) -> Result<Box<dyn Read + Send>> {
        let inner = self.inner.open_read(path)?;
        self.gauge.enter();
        Ok(Box::new(CountingReader {
            inner,
            gauge: Arc::clone(&self.gauge),
            delay: Some(self.read_delay),
        }))
    }
}

struct CountingReader {
    inner: Box<dyn Read + Send>,
    gauge: Arc<InFlightGauge>,
    delay: Option<Duration>,
}

impl Read for CountingReader {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if let Some(delay) = self.delay.take() {
            std::thread::sleep(delay);
        }
        self.inner.read(buf)
    }
}

impl Drop for CountingReader {
    fn drop(&mut self) {
        self.gauge.leave();
    }
}
