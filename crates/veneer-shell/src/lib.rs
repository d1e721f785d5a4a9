//! Shell wiring: one host context, one view context, one bridge between.
//!
//! The two halves of the application run as separate task groups on the
//! same runtime, communicating only through the bridge channel — the same
//! shape they have when the view lives in a real sandboxed process.  This
//! crate owns the glue; all policy stays in `veneer-host` and `veneer-view`.

use std::path::Path;
use std::sync::Arc;

use thiserror::Error;
use tracing::info;

use veneer_core::bridge::{self, Bridge};
use veneer_host::application::config_store::{ConfigStore, LoadStatus};
use veneer_host::infrastructure::alerts::AlertSink;
use veneer_host::infrastructure::bridge::{serve, HostState};
use veneer_view::infrastructure::bridge::spawn_reload_listener;
use veneer_view::Runtime;

/// Errors from assembling the shell.
#[derive(Debug, Error)]
pub enum ShellError {
    /// The initial configuration load failed with no baseline to fall back
    /// on.  The alert has already been presented; the process should exit.
    #[error("no usable configuration was loaded")]
    NoConfiguration,
}

/// A wired shell: the host state and the view runtime, joined by a served
/// bridge with an attached reload listener.
pub struct Shell {
    pub state: Arc<HostState>,
    pub runtime: Arc<Runtime>,
    /// The view's own bridge handle, for consumers that fetch raw assets
    /// (the loading screen image, for one).
    pub bridge: bridge::BridgeClient,
}

/// Assembles the shell around the configuration in `config_dir`.
///
/// Opens the store (initial load included), attaches one presentation
/// surface, and spawns the bridge service and the reload listener.  The
/// returned runtime is not yet initialized; call [`Runtime::init`] next.
///
/// # Errors
///
/// Returns [`ShellError::NoConfiguration`] when the initial load was fatal.
pub async fn wire(config_dir: &Path, alerts: Arc<dyn AlertSink>) -> Result<Shell, ShellError> {
    let (store, status) = ConfigStore::open(config_dir, alerts);
    if status == LoadStatus::Fatal {
        return Err(ShellError::NoConfiguration);
    }

    let state = HostState::new(store);

    // The broadcaster takes the push half; the service task takes the
    // request half.
    let (client, server) = bridge::channel(bridge::DEFAULT_REQUEST_CAPACITY);
    state.surfaces.lock().await.attach(server.pushes);
    tokio::spawn(serve(Arc::clone(&state), server.requests));

    let runtime = Arc::new(Runtime::new(Arc::new(client.clone()) as Arc<dyn Bridge>));
    spawn_reload_listener(Arc::clone(&runtime), client.subscribe_reloads());

    info!("shell wired: one surface attached");
    Ok(Shell {
        state,
        runtime,
        bridge: client,
    })
}

impl Shell {
    /// Reloads the configuration and, when its content changed, pushes it to
    /// every attached surface.
    ///
    /// Triggers are expected to arrive one at a time (watcher or explicit
    /// action); the store lock keeps the read-install-broadcast sequence
    /// serialized regardless.
    pub async fn reload(&self) -> LoadStatus {
        let mut store = self.state.store.lock().await;
        let status = store.reload();
        if matches!(status, LoadStatus::Installed { changed: true, .. }) {
            let mut surfaces = self.state.surfaces.lock().await;
            store.notify_all(&mut surfaces);
        }
        status
    }

    /// Path of the configuration file the shell is built around.
    pub async fn config_path(&self) -> std::path::PathBuf {
        self.state.store.lock().await.path().to_path_buf()
    }
}
