//! Veneer shell entry point.
//!
//! Wires the host context and the view context over the bridge, then runs
//! the startup flow a skinned client goes through: initialize the runtime,
//! honor the loading-screen override, activate the default theme, and
//! follow configuration reloads until shutdown.
//!
//! ```text
//! main()
//!  └─ wire()               -- store + bridge service + runtime + listener
//!  └─ runtime.init()       -- one get-configuration round-trip
//!  └─ runtime.load_theme() -- default or --theme override
//!  └─ trigger loop         -- watcher events -> shell.reload()
//! ```

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use veneer_core::Bridge;
use veneer_host::application::config_store::LoadStatus;
use veneer_host::infrastructure::alerts::LogAlertSink;
use veneer_host::infrastructure::storage::config_file;
use veneer_host::infrastructure::watcher::ConfigWatcher;
use veneer_shell::wire;
use veneer_view::ThemeSwitch;

/// Veneer, a themeable desktop client shell (configuration core demo).
#[derive(Debug, Parser)]
#[command(name = "veneer-shell")]
struct Args {
    /// Directory containing config.json; defaults to the platform config dir.
    #[arg(long, env = "VENEER_CONFIG_DIR")]
    config_dir: Option<PathBuf>,

    /// Activate this theme instead of the configured default.
    #[arg(long)]
    theme: Option<String>,

    /// Disable the configuration file watcher.
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
    info!("Veneer shell starting");

    let config_dir = match args.config_dir {
        Some(dir) => dir,
        None => config_file::config_dir().context("could not resolve a configuration directory")?,
    };

    let alerts = Arc::new(LogAlertSink);
    let shell = wire(&config_dir, alerts)
        .await
        .context("configuration is unusable; see the error above")?;

    // ── View startup flow ─────────────────────────────────────────────────────
    shell.runtime.init().await.context("runtime init failed")?;
    shell.runtime.wait_ready().await;

    let dynamic = shell.runtime.dynamic().await.unwrap_or_default();
    if let Some(loading) = dynamic.loading.as_ref().filter(|l| !l.is_empty()) {
        match (&loading.image, &loading.text) {
            (Some(image), _) => {
                // The splash renderer resolves the image against the default
                // theme's directory and fetches the bytes over the bridge.
                if let (Some(constants), Some(theme)) = (
                    shell.runtime.constants().await,
                    dynamic.default_theme.as_deref(),
                ) {
                    let path = shell
                        .bridge
                        .path_join(&[
                            constants.theme_dir.clone(),
                            theme.to_string(),
                            image.clone(),
                        ])
                        .await?;
                    match shell.bridge.request_local_file(&path).await {
                        Ok(bytes) => {
                            info!(%image, bytes = bytes.len(), "loading screen image ready");
                        }
                        Err(err) => warn!(%image, "loading screen image unavailable: {err}"),
                    }
                }
            }
            (None, Some(text)) => info!(%text, "loading screen override"),
            (None, None) => {}
        }
    }

    let theme = args.theme.or(dynamic.default_theme);
    match theme {
        Some(name) => match shell.runtime.load_theme(&name).await? {
            ThemeSwitch::Activated => {
                let active = shell.runtime.active_theme().await;
                if let Some(active) = active {
                    info!(
                        theme = active.name(),
                        layout = %active.config.main.layout,
                        "theme active"
                    );
                }
            }
            ThemeSwitch::UnknownTheme => warn!(theme = %name, "theme not installed"),
            ThemeSwitch::Rejected => {
                warn!(theme = %name, "theme rejected; see diagnostics above");
            }
            ThemeSwitch::Superseded => {}
        },
        None => info!("no default theme configured; starting unskinned"),
    }

    // ── Reload loop ───────────────────────────────────────────────────────────
    // trigger_tx stays alive in this scope so the select loop never observes
    // a closed trigger channel, watcher or not.
    let (trigger_tx, mut trigger_rx) = tokio::sync::mpsc::channel(1);
    let _watcher = if args.no_watch {
        None
    } else {
        let config_path = shell.config_path().await;
        Some(
            ConfigWatcher::spawn(&config_path, trigger_tx.clone())
                .context("failed to start the configuration watcher")?,
        )
    };

    info!(watching = !args.no_watch, "Veneer shell ready");

    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                info!("shutdown signal received");
                break;
            }
            Some(_) = trigger_rx.recv() => {
                match shell.reload().await {
                    LoadStatus::Installed { generation, changed } => {
                        if changed {
                            info!(generation, "configuration reloaded and pushed");
                        }
                    }
                    LoadStatus::KeptPrevious { .. } => {}
                    LoadStatus::Fatal => {
                        anyhow::bail!("configuration store has no usable value");
                    }
                }
            }
        }
    }

    info!("Veneer shell stopped");
    Ok(())
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_defaults_leave_everything_unset() {
        // Arrange: parse with no arguments
        let args = Args::parse_from(["veneer-shell"]);

        // Assert
        assert_eq!(args.config_dir, None);
        assert_eq!(args.theme, None);
        assert!(!args.no_watch);
    }

    #[test]
    fn test_cli_theme_override() {
        let args = Args::parse_from(["veneer-shell", "--theme", "light"]);
        assert_eq!(args.theme.as_deref(), Some("light"));
    }

    #[test]
    fn test_cli_config_dir_override() {
        let args = Args::parse_from(["veneer-shell", "--config-dir", "/etc/veneer"]);
        assert_eq!(args.config_dir, Some(PathBuf::from("/etc/veneer")));
    }
}
