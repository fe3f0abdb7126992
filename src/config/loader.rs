// src/config/loader.rs

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::config::model::{RawConfigFile, Settings, SettingsOverrides};
use crate::errors::Result;
use crate::types::DEFAULT_CONFIG_FILE;

/// Load a configuration file from a given path and return the raw `RawConfigFile`.
///
/// This only performs TOML deserialization; it does **not** perform semantic
/// validation. Use [`load_settings`] for that.
pub fn load_from_path(path: impl AsRef<Path>) -> Result<RawConfigFile> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path)?;

    let config: RawConfigFile = toml::from_str(&contents)?;

    Ok(config)
}

/// Find and load the raw config.
///
/// - An explicit path must exist.
/// - Otherwise `Treewatch.toml` in the working directory is used if present.
/// - Otherwise everything comes from defaults and the command line.
pub fn load_raw(explicit: Option<&Path>) -> Result<RawConfigFile> {
    if let Some(path) = explicit {
        debug!(?path, "loading config file");
        return load_from_path(path);
    }

    let default_path = default_config_path();
    if default_path.is_file() {
        debug!(path = ?default_path, "loading default config file");
        return load_from_path(&default_path);
    }

    debug!("no config file; using defaults");
    Ok(RawConfigFile::default())
}

/// Load the config, apply CLI overrides and validate.
///
/// This is the recommended entry point for the rest of the application.
pub fn load_settings(explicit: Option<&Path>, overrides: SettingsOverrides) -> Result<Settings> {
    let raw = load_raw(explicit)?.with_overrides(overrides);
    Settings::try_from(raw)
}

/// Helper to resolve a default config path.
pub fn default_config_path() -> PathBuf {
    PathBuf::from(DEFAULT_CONFIG_FILE)
}
