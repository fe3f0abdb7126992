// src/cli.rs

//! CLI argument parsing using `clap`.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::config::SettingsOverrides;

/// Command-line arguments for `treewatch`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "treewatch",
    version,
    about = "Watch file trees and report added, edited and deleted files by content checksum.",
    long_about = None
)]
pub struct CliArgs {
    /// Path to a config file (TOML).
    ///
    /// Default: `Treewatch.toml` in the current working directory, if present.
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `TREEWATCH_LOG` or a default level will be used.
    #[arg(long, global = true, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Rescan the roots periodically and print what changed.
    Watch(WatchArgs),

    /// Print the SHA-1 checksum of every file below the roots, once.
    Checksum(ChecksumArgs),
}

#[derive(Debug, Clone, Args)]
pub struct WatchArgs {
    /// Files or directories to watch.
    #[arg(value_name = "ROOT")]
    pub roots: Vec<PathBuf>,

    /// Milliseconds between two scans.
    #[arg(long, value_name = "MS")]
    pub interval_ms: Option<u64>,

    /// Maximum number of files hashed concurrently.
    #[arg(long, value_name = "N")]
    pub max_in_flight: Option<usize>,

    /// Resolve settings and list what would be watched, without hashing.
    #[arg(long)]
    pub dry_run: bool,
}

#[derive(Debug, Clone, Args)]
pub struct ChecksumArgs {
    /// Files or directories to checksum.
    #[arg(value_name = "ROOT")]
    pub roots: Vec<PathBuf>,

    /// Maximum number of files hashed concurrently.
    #[arg(long, value_name = "N")]
    pub max_in_flight: Option<usize>,
}

impl WatchArgs {
    pub fn overrides(&self) -> SettingsOverrides {
        SettingsOverrides {
            roots: self.roots.clone(),
            interval_ms: self.interval_ms,
            max_in_flight: self.max_in_flight,
        }
    }
}

impl ChecksumArgs {
    pub fn overrides(&self) -> SettingsOverrides {
        SettingsOverrides {
            roots: self.roots.clone(),
            interval_ms: None,
            max_in_flight: self.max_in_flight,
        }
    }
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_watch_with_overrides() {
        let args = CliArgs::try_parse_from([
            "treewatch",
            "watch",
            "--interval-ms",
            "250",
            "--max-in-flight",
            "8",
            "src",
            "docs",
        ])
        .unwrap();

        let Command::Watch(watch) = args.command else {
            panic!("expected watch subcommand");
        };
        let overrides = watch.overrides();
        assert_eq!(overrides.roots, vec![PathBuf::from("src"), PathBuf::from("docs")]);
        assert_eq!(overrides.interval_ms, Some(250));
        assert_eq!(overrides.max_in_flight, Some(8));
        assert!(!watch.dry_run);
    }

    #[test]
    fn global_flags_follow_the_subcommand() {
        let args = CliArgs::try_parse_from([
            "treewatch",
            "checksum",
            "--log-level",
            "debug",
            "--config",
            "alt.toml",
            ".",
        ])
        .unwrap();

        assert!(matches!(args.log_level, Some(LogLevel::Debug)));
        assert_eq!(args.config, Some(PathBuf::from("alt.toml")));
        assert!(matches!(args.command, Command::Checksum(_)));
    }
}
