//! Host side of the bridge: shared state and the request service loop.
//!
//! The view process pulls everything it knows through here.  Each attached
//! surface gets one [`serve`] task draining its request stream; all tasks
//! share the same [`HostState`].
//!
//! # Why async `Mutex` fields on `HostState`?
//!
//! Service tasks and the reload loop run concurrently on the Tokio runtime.
//! A `tokio::sync::Mutex` suspends the waiting *task* instead of blocking
//! the OS thread, so one slow request cannot stall the whole runtime while
//! it waits for the store.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tokio::sync::{mpsc, Mutex};
use tracing::{debug, info, warn};

use veneer_core::bridge::RequestEnvelope;
use veneer_core::{BridgeFault, BridgeRequest, BridgeResponse};

use crate::application::broadcast::ReloadBroadcaster;
use crate::application::config_store::ConfigStore;
use crate::infrastructure::storage::discover_themes;

/// State shared between the bridge service tasks and the reload loop.
pub struct HostState {
    /// The one configuration store of this process.
    pub store: Mutex<ConfigStore>,
    /// Attached presentation surfaces.
    pub surfaces: Mutex<ReloadBroadcaster>,
}

impl HostState {
    /// Wraps an already-opened store for sharing across tasks.
    pub fn new(store: ConfigStore) -> Arc<Self> {
        Arc::new(Self {
            store: Mutex::new(store),
            surfaces: Mutex::new(ReloadBroadcaster::new()),
        })
    }
}

/// Drains one surface's request stream until the surface goes away.
pub async fn serve(state: Arc<HostState>, mut requests: mpsc::Receiver<RequestEnvelope>) {
    while let Some(envelope) = requests.recv().await {
        let name = envelope.request.name();
        let response = handle(&state, envelope.request).await;
        if envelope.respond_to.send(response).is_err() {
            // The caller gave up before the answer arrived; nothing to do.
            debug!(request = name, "bridge caller went away before the response");
        }
    }
    info!("bridge request stream closed");
}

/// Answers a single bridge request against the host state.
async fn handle(
    state: &HostState,
    request: BridgeRequest,
) -> Result<BridgeResponse, BridgeFault> {
    match request {
        BridgeRequest::GetConfiguration => {
            let snapshot = state.store.lock().await.snapshot();
            let Some(mut configuration) = snapshot else {
                return Err(BridgeFault::NotLoaded);
            };

            // The document may omit its theme list; fill it from disk so the
            // surface always sees what is actually installed.
            if configuration.themes.is_empty() {
                let theme_dir = Path::new(&configuration.constants.theme_dir);
                match discover_themes(theme_dir) {
                    Ok(found) => configuration.themes = found,
                    Err(err) => warn!(
                        theme_dir = %theme_dir.display(),
                        "theme discovery failed: {err}"
                    ),
                }
            }

            Ok(BridgeResponse::Configuration { configuration })
        }

        BridgeRequest::PathJoin { segments } => {
            let mut path = PathBuf::new();
            for segment in &segments {
                path.push(segment);
            }
            Ok(BridgeResponse::Path {
                path: path.to_string_lossy().into_owned(),
            })
        }

        BridgeRequest::RequestLocalFile { path } => match tokio::fs::read(&path).await {
            Ok(data) => Ok(BridgeResponse::FileBytes { data }),
            Err(err) => Err(BridgeFault::Io {
                path,
                detail: err.to_string(),
            }),
        },

        BridgeRequest::RequestJsonFile { path } => {
            let bytes = tokio::fs::read(&path).await.map_err(|err| BridgeFault::Io {
                path: path.clone(),
                detail: err.to_string(),
            })?;
            match serde_json::from_slice(&bytes) {
                Ok(value) => Ok(BridgeResponse::Json { value }),
                Err(err) => Err(BridgeFault::Parse {
                    path,
                    detail: err.to_string(),
                }),
            }
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
