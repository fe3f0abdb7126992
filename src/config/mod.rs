// src/config/mod.rs

//! Configuration loading and validation for treewatch.
//!
//! Responsibilities:
//! - Define the TOML-backed data model (`model.rs`).
//! - Load a config file from disk (`loader.rs`).
//! - Validate and resolve it into `Settings` (`validate.rs`).

pub mod loader;
pub mod model;
pub mod validate;

pub use loader::{load_from_path, load_raw, load_settings};
pub use model::{RawConfigFile, Settings, SettingsOverrides};
pub use validate::validate_config;
