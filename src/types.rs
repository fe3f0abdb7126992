// src/types.rs

//! Small shared types and the built-in defaults.

use std::time::Duration;

/// Length in bytes of a content digest (SHA-1).
pub const DIGEST_LEN: usize = 20;

/// Raw SHA-1 digest of a file's contents.
pub type Sha1Digest = [u8; DIGEST_LEN];

/// Default time between two poll cycles.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(1);

/// Default ceiling on simultaneously in-flight fingerprint operations.
pub const DEFAULT_MAX_IN_FLIGHT: usize = 100;

/// Default config file looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "Treewatch.toml";
