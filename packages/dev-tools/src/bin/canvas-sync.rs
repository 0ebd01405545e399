//! Canvas Sync Binary
//!
//! Watches one canvas in a vault directory and keeps the `## Connections` sections of the
//! notes on it in step with its edges.
//!
//! # Usage
//!
//! ```bash
//! # Watch a canvas, polling every 500ms
//! cargo run --bin canvas-sync -- ~/vault boards/Research.canvas
//!
//! # Run a single pass and exit
//! cargo run --bin canvas-sync -- ~/vault boards/Research.canvas --once
//!
//! # Custom config and poll interval
//! CANVAS_ATOMIZER_CONFIG=atomizer.json CANVAS_SYNC_POLL_MS=2000 \
//!     cargo run --bin canvas-sync -- ~/vault boards/Research.canvas
//! ```
//!
//! # Environment Variables
//!
//! - `CANVAS_ATOMIZER_CONFIG`: JSON config file, same as `--config` (default: built-in defaults)
//! - `CANVAS_SYNC_POLL_MS`: Poll interval in milliseconds, same as `--poll-ms` (default: 500)
//! - `RUST_LOG`: Logging level (e.g., "info", "debug", "trace")
//!
//! # Architecture
//!
//! 1. FsFileStore - Vault directory access
//! 2. EdgeSynchronizer - Seeded from the canvas as it is at startup
//! 3. Poll loop - Runs a pass whenever the canvas text changes
//!
//! With `--once` the snapshot is not seeded, so every edge on the canvas is treated as new
//! and missing backlinks are filled in.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use canvas_atomizer_core::{AtomizerConfig, EdgeSynchronizer, FileStore, FsFileStore, SyncReport};
use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "canvas-sync")]
#[command(about = "Keep note backlinks in sync with the edges of a canvas", long_about = None)]
struct Args {
    /// Vault root directory
    #[arg(value_name = "VAULT_DIR")]
    vault: PathBuf,

    /// Canvas path relative to the vault root
    #[arg(value_name = "CANVAS_PATH")]
    canvas: String,

    /// Run a single pass and exit
    #[arg(long)]
    once: bool,

    /// JSON config file
    #[arg(long, env = "CANVAS_ATOMIZER_CONFIG", value_name = "FILE")]
    config: Option<PathBuf>,

    /// Poll interval in milliseconds
    #[arg(
        long,
        env = "CANVAS_SYNC_POLL_MS",
        default_value_t = 500,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    poll_ms: u64,
}

fn load_config(path: Option<&PathBuf>) -> anyhow::Result<AtomizerConfig> {
    match path {
        Some(path) => {
            tracing::info!("⚙️  Config: {}", path.display());
            AtomizerConfig::from_json_file(path)
        }
        None => Ok(AtomizerConfig::default()),
    }
}

fn log_report(report: &SyncReport) {
    if report.aborted {
        tracing::warn!("⚠️  Canvas is malformed, pass skipped");
        return;
    }

    for failure in &report.failures {
        tracing::warn!(
            "❌ Edge {}: {} ({})",
            failure.edge_id,
            failure.document,
            failure.message
        );
    }

    if report.is_noop() {
        tracing::debug!("Pass finished: {}", report);
    } else {
        tracing::info!("🔗 {}", report);
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    let config = load_config(args.config.as_ref())?;
    let poll_ms = args.poll_ms;

    tracing::info!("🗂️  Vault: {}", args.vault.display());
    tracing::info!("🧭 Canvas: {}", args.canvas);

    let store: Arc<dyn FileStore> = Arc::new(FsFileStore::new(&args.vault));
    let mut synchronizer = EdgeSynchronizer::new(store.clone(), &args.canvas, config.sync);

    if args.once {
        let report = synchronizer
            .on_graph_modified()
            .await
            .with_context(|| format!("Failed to sync {}", args.canvas))?;
        log_report(&report);
        return Ok(());
    }

    synchronizer
        .initialize_from_canvas()
        .await
        .with_context(|| format!("Failed to load {}", args.canvas))?;
    let mut last_seen = store.read(&args.canvas).await?;

    tracing::info!("👀 Watching every {}ms (Ctrl+C to stop)", poll_ms);
    let mut interval = tokio::time::interval(Duration::from_millis(poll_ms));

    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("👋 Stopping");
                return Ok(());
            }
            _ = interval.tick() => {}
        }

        let current = match store.read(&args.canvas).await {
            Ok(text) => text,
            Err(err) => {
                tracing::warn!("Cannot read {}: {}", args.canvas, err);
                continue;
            }
        };
        if current == last_seen {
            continue;
        }

        match synchronizer.on_graph_modified().await {
            Ok(report) => log_report(&report),
            Err(err) => tracing::warn!("Sync pass failed: {}", err),
        }
        last_seen = current;
    }
}
