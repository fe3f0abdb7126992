// src/config/validate.rs

use std::time::Duration;

use crate::config::model::{RawConfigFile, Settings};
use crate::errors::{Result, TreewatchError};
use crate::types::{DEFAULT_MAX_IN_FLIGHT, DEFAULT_POLL_INTERVAL};

impl TryFrom<RawConfigFile> for Settings {
    type Error = crate::errors::TreewatchError;

    fn try_from(raw: RawConfigFile) -> std::result::Result<Self, Self::Error> {
        validate_config(&raw)?;

        let interval = raw
            .config
            .interval_ms
            .map(Duration::from_millis)
            .unwrap_or(DEFAULT_POLL_INTERVAL);
        let max_in_flight = raw.config.max_in_flight.unwrap_or(DEFAULT_MAX_IN_FLIGHT);

        Ok(Settings::new_unchecked(raw.watch.roots, interval, max_in_flight))
    }
}

/// Check the invariants the poll loop and snapshot builder rely on.
pub fn validate_config(cfg: &RawConfigFile) -> Result<()> {
    ensure_has_roots(cfg)?;
    validate_global_config(cfg)?;
    Ok(())
}

fn ensure_has_roots(cfg: &RawConfigFile) -> Result<()> {
    if cfg.watch.roots.is_empty() {
        return Err(TreewatchError::ConfigError(
            "no root paths given (pass them as arguments or set [watch].roots)".to_string(),
        ));
    }
    Ok(())
}

fn validate_global_config(cfg: &RawConfigFile) -> Result<()> {
    if cfg.config.interval_ms == Some(0) {
        return Err(TreewatchError::ConfigError(
            "[config].interval_ms must be >= 1 (got 0)".to_string(),
        ));
    }

    if cfg.config.max_in_flight == Some(0) {
        return Err(TreewatchError::ConfigError(
            "[config].max_in_flight must be >= 1 (got 0)".to_string(),
        ));
    }

    Ok(())
}
