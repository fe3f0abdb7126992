// src/watch/mod.rs

//! The user-facing layer on top of `scan`.
//!
//! This module is responsible for:
//! - Running the poll loop that rescans the roots on a fixed interval.
//! - Formatting change reports and checksum listings for stdout.

pub mod poller;
pub mod report;

pub use poller::Poller;
pub use report::{write_checksums, ChangeReport};
