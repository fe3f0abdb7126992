// src/lib.rs

pub mod cli;
pub mod config;
pub mod errors;
pub mod fs;
pub mod logging;
pub mod scan;
pub mod types;
pub mod watch;

use std::sync::Arc;

use anyhow::Result;
use tracing::{debug, info, warn};

use crate::cli::{CliArgs, Command};
use crate::config::{load_settings, Settings};
use crate::fs::{FileSystem, RealFileSystem};
use crate::scan::{enumerate, SnapshotBuilder};
use crate::watch::{write_checksums, Poller};

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - config loading + CLI overrides
/// - the real filesystem
/// - either the poll loop (`watch`) or a one-shot listing (`checksum`)
/// - Ctrl-C handling for the poll loop
pub async fn run(args: CliArgs) -> Result<()> {
    let fs: Arc<dyn FileSystem> = Arc::new(RealFileSystem);

    match args.command {
        Command::Watch(watch) => {
            let settings = load_settings(args.config.as_deref(), watch.overrides())?;
            if watch.dry_run {
                print_dry_run(fs.as_ref(), &settings);
                return Ok(());
            }
            run_watch(fs, &settings).await
        }
        Command::Checksum(checksum) => {
            let settings = load_settings(args.config.as_deref(), checksum.overrides())?;
            run_checksum(fs, &settings).await
        }
    }
}

async fn run_watch(fs: Arc<dyn FileSystem>, settings: &Settings) -> Result<()> {
    info!(roots = ?settings.roots(), "starting watch");

    // Ctrl-C → graceful shutdown.
    let shutdown = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!("failed to listen for Ctrl+C: {e}");
            std::future::pending::<()>().await;
        }
    };

    let poller = Poller::new(fs, settings);
    let mut stdout = std::io::stdout();
    poller.run(&mut stdout, shutdown).await
}

async fn run_checksum(fs: Arc<dyn FileSystem>, settings: &Settings) -> Result<()> {
    let builder = SnapshotBuilder::new(fs, settings.max_in_flight());
    let snapshot = builder.scan(settings.roots()).await?;

    let mut stdout = std::io::stdout().lock();
    write_checksums(&mut stdout, &snapshot)?;

    debug!(files = snapshot.len(), failed = snapshot.failed_count(), "checksum listing done");
    Ok(())
}

/// Simple dry-run output: resolved settings and what the walk finds.
fn print_dry_run(fs: &dyn FileSystem, settings: &Settings) {
    println!("treewatch dry-run");
    println!("  interval = {:?}", settings.interval());
    println!("  max_in_flight = {}", settings.max_in_flight());
    println!();

    let list = enumerate(fs, settings.roots());
    println!("roots ({}):", settings.roots().len());
    for root in settings.roots() {
        println!("  - {}", root.display());
    }
    println!("files: {}", list.len());
    if !list.inaccessible.is_empty() {
        println!("inaccessible ({}):", list.inaccessible.len());
        for skipped in &list.inaccessible {
            println!("  - {}: {}", skipped.path.display(), skipped.reason);
        }
    }

    debug!("dry-run complete (nothing hashed)");
}
