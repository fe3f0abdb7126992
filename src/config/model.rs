// src/config/model.rs

use std::path::PathBuf;
use std::time::Duration;

use serde::Deserialize;

/// Configuration as read from a TOML file, before validation.
///
/// ```toml
/// [config]
/// interval_ms = 1000
/// max_in_flight = 100
///
/// [watch]
/// roots = ["src", "docs"]
/// ```
///
/// All sections are optional; anything missing falls back to the built-in
/// defaults in [`crate::types`].
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawConfigFile {
    /// Global behaviour from `[config]`.
    #[serde(default)]
    pub config: ConfigSection,

    /// What to watch, from `[watch]`.
    #[serde(default)]
    pub watch: WatchSection,
}

/// `[config]` section.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigSection {
    /// Milliseconds between two poll cycles.
    #[serde(default)]
    pub interval_ms: Option<u64>,

    /// Maximum number of files hashed at the same time.
    #[serde(default)]
    pub max_in_flight: Option<usize>,
}

/// `[watch]` section.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WatchSection {
    /// Root paths to walk. Relative paths are taken from the working
    /// directory, not from the config file's location.
    #[serde(default)]
    pub roots: Vec<PathBuf>,
}

/// Values given on the command line. They win over the config file.
#[derive(Debug, Clone, Default)]
pub struct SettingsOverrides {
    /// Replaces `[watch].roots` when non-empty.
    pub roots: Vec<PathBuf>,
    pub interval_ms: Option<u64>,
    pub max_in_flight: Option<usize>,
}

impl RawConfigFile {
    /// Layer CLI values on top of the file values.
    pub fn with_overrides(mut self, overrides: SettingsOverrides) -> Self {
        if !overrides.roots.is_empty() {
            self.watch.roots = overrides.roots;
        }
        if overrides.interval_ms.is_some() {
            self.config.interval_ms = overrides.interval_ms;
        }
        if overrides.max_in_flight.is_some() {
            self.config.max_in_flight = overrides.max_in_flight;
        }
        self
    }
}

/// Validated settings the rest of the application runs on.
///
/// Only constructible through `TryFrom<RawConfigFile>` (see `validate.rs`)
/// or [`Settings::new_unchecked`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    roots: Vec<PathBuf>,
    interval: Duration,
    max_in_flight: usize,
}

impl Settings {
    pub(crate) fn new_unchecked(
        roots: Vec<PathBuf>,
        interval: Duration,
        max_in_flight: usize,
    ) -> Self {
        Self {
            roots,
            interval,
            max_in_flight,
        }
    }

    pub fn roots(&self) -> &[PathBuf] {
        &self.roots
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight
    }
}
