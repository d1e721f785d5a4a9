//! Veneer host daemon entry point.
//!
//! Runs the privileged side headless: load the configuration, watch the
//! file, reload on change, and report what the failure policy decided.
//! Useful on its own for validating hand-edits live; the full shell (host +
//! view over the bridge) lives in the `veneer-shell` binary.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use veneer_host::application::broadcast::ReloadBroadcaster;
use veneer_host::application::config_store::{ConfigStore, LoadStatus};
use veneer_host::infrastructure::alerts::LogAlertSink;
use veneer_host::infrastructure::storage::config_file;
use veneer_host::infrastructure::watcher::ConfigWatcher;

/// Headless Veneer host: owns the configuration file and logs reloads.
#[derive(Debug, Parser)]
#[command(name = "veneer-host")]
struct Args {
    /// Directory containing config.json; defaults to the platform config dir.
    #[arg(long, env = "VENEER_CONFIG_DIR")]
    config_dir: Option<PathBuf>,

    /// Disable the file watcher (reloads then only happen at startup).
    #[arg(long)]
    no_watch: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialise structured logging.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    info!("Veneer host starting");

    let config_dir = match args.config_dir {
        Some(dir) => dir,
        None => config_file::config_dir().context("could not resolve a configuration directory")?,
    };

    // The host runs headless, so the "dialog" is an error log line.
    let alerts = Arc::new(LogAlertSink);
    let (mut store, status) = ConfigStore::open(&config_dir, alerts);
    if status == LoadStatus::Fatal {
        // The alert was already presented; nothing to run without a config.
        anyhow::bail!(
            "no usable configuration at {}",
            store.path().display()
        );
    }

    let mut broadcaster = ReloadBroadcaster::new();
    store.notify_all(&mut broadcaster);

    // trigger_tx stays alive in this scope so the select loop below never
    // observes a closed trigger channel, watcher or not.
    let (trigger_tx, mut trigger_rx) = tokio::sync::mpsc::channel(1);
    let _watcher = if args.no_watch {
        None
    } else {
        Some(
            ConfigWatcher::spawn(store.path(), trigger_tx.clone())
                .context("failed to start the configuration watcher")?,
        )
    };

    info!(
        config = %store.path().display(),
        watching = !args.no_watch,
        "Veneer host ready"
    );

    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                info!("shutdown signal received");
                break;
            }
            Some(_) = trigger_rx.recv() => {
                match store.reload() {
                    LoadStatus::Installed { generation, changed } => {
                        if changed {
                            store.notify_all(&mut broadcaster);
                        } else {
                            info!(generation, "configuration reloaded without changes");
                        }
                    }
                    LoadStatus::KeptPrevious { alerted } => {
                        if !alerted {
                            info!("configuration edit in progress; keeping previous value");
                        }
                    }
                    LoadStatus::Fatal => {
                        // Unreachable once a baseline exists, but the policy
                        // belongs to the store, not to this loop.
                        warn!("configuration lost with no baseline value");
                        anyhow::bail!("configuration store has no usable value");
                    }
                }
            }
        }
    }

    info!("Veneer host stopped");
    Ok(())
}

// ── Tests ─────────────────────────────────────────────────────────────────────
