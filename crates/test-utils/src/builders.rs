#![allow(dead_code)]

use std::path::PathBuf;

use treewatch::config::{RawConfigFile, Settings};
use treewatch::scan::{hash_reader, Fingerprint, Snapshot};

/// Builder for in-memory `Snapshot`s, so differ tests can be written in
/// terms of file contents instead of raw digests.
#[derive(Debug, Default)]
pub struct SnapshotFixture {
    entries: Vec<Fingerprint>,
}

impl SnapshotFixture {
    pub fn new() -> Self {
        Self::default()
    }

    /// A readable file with the given contents.
    pub fn file(mut self, path: &str, contents: &[u8]) -> Self {
        let digest = hash_reader(&mut &contents[..]).expect("hashing a byte slice cannot fail");
        self.entries.push(Fingerprint::digest(path, digest));
        self
    }

    /// A file that could not be hashed.
    pub fn failed(mut self, path: &str, reason: &str) -> Self {
        self.entries.push(Fingerprint::failed(path, reason));
        self
    }

    pub fn build(self) -> Snapshot {
        self.entries.into_iter().collect()
    }
}

/// Builder for validated `Settings`.
pub struct SettingsBuilder {
    raw: RawConfigFile,
}

impl SettingsBuilder {
    pub fn new() -> Self {
        Self {
            raw: RawConfigFile::default(),
        }
    }

    pub fn root(mut self, root: impl Into<PathBuf>) -> Self {
        self.raw.watch.roots.push(root.into());
        self
    }

    pub fn interval_ms(mut self, ms: u64) -> Self {
        self.raw.config.interval_ms = Some(ms);
        self
    }

    pub fn max_in_flight(mut self, n: usize) -> Self {
        self.raw.config.max_in_flight = Some(n);
        self
    }

    pub fn build(self) -> Settings {
        Settings::try_from(self.raw).expect("Failed to build valid settings from builder")
    }
}

impl Default for SettingsBuilder {
    fn default() -> Self {
        Self::new()
    }
}
