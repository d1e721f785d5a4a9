//! The presentation runtime: one cache, one readiness gate, one active theme.
//!
//! Exactly one `Runtime` exists per view process.  It is constructed
//! explicitly and handed to every consumer that needs configuration or theme
//! access — no global lookup.
//!
//! # Readiness (for beginners)
//!
//! Consumers must never render from default or stale data.  Before
//! [`Runtime::init`] completes, every accessor reports an empty cache and
//! [`Runtime::load_theme`] refuses to run.  The gate is an explicit
//! three-state flag on a `watch` channel:
//!
//! ```text
//! NotStarted ──init()──▶ Pending ──configuration received──▶ Ready
//!                          │
//!                          └───────bridge failure──────▶ NotStarted (retryable)
//! ```
//!
//! Dependents call [`Runtime::wait_ready`] and are woken when the flag
//! reaches `Ready`.  The flag cannot stay `Pending` forever: `init` either
//! flips it to `Ready` or rolls it back and returns the error.
//!
//! # The active-theme slot
//!
//! At most one theme is active at a time.  Activation replaces the slot in
//! one assignment under the write lock, so readers never observe a
//! half-updated theme.  A candidate that fails validation never reaches the
//! slot; the previous theme stays.
//!
//! # Switch tickets
//!
//! `load_theme` suspends twice at bridge boundaries, so a slow older switch
//! could resolve after a newer one.  Every call takes a monotonic ticket at
//! issue time; before installing, the call re-checks that no newer switch
//! was issued and that nothing newer already landed.  Stale results are
//! discarded as [`ThemeSwitch::Superseded`].

use std::sync::Arc;

use thiserror::Error;
use tokio::sync::{watch, RwLock};
use tracing::{debug, info, warn};

use veneer_core::config::keys;
use veneer_core::{
    validate_theme, ActiveTheme, Bridge, BridgeCallError, ConfigConstants, ConfigPush,
    DynamicSettings, SequenceCounter, ThemeConfiguration, ThemeDescriptor,
};

/// Initialization state of the runtime cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Readiness {
    NotStarted,
    Pending,
    Ready,
}

/// Outcome of one theme-switch request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeSwitch {
    /// The candidate validated and is now the active theme.
    Activated,
    /// The requested name is not in the cached theme list; the active theme
    /// is untouched.  A recoverable condition, not a failure.
    UnknownTheme,
    /// The candidate failed validation or could not be fetched; the
    /// diagnostic was logged and the active theme is untouched.
    Rejected,
    /// A newer switch was issued or landed while this one was in flight;
    /// this result was discarded.
    Superseded,
}

/// Errors the runtime surfaces to its callers.
#[derive(Debug, Error)]
pub enum RuntimeError {
    /// The runtime has not completed [`Runtime::init`] yet.
    #[error("runtime is not initialized")]
    NotReady,

    /// The bridge transport itself failed (host gone, protocol mismatch).
    #[error(transparent)]
    Bridge(#[from] BridgeCallError),
}

/// Everything the view caches from the host, replaced wholesale on refresh.
#[derive(Default)]
struct CachedState {
    constants: Option<ConfigConstants>,
    dynamic: Option<DynamicSettings>,
    themes: Vec<ThemeDescriptor>,
    active: Option<ActiveTheme>,
    /// Ticket of the switch that installed `active`.
    activated_ticket: Option<u64>,
}

impl CachedState {
    fn install_configuration(&mut self, configuration: veneer_core::ClientConfiguration) {
        self.constants = Some(configuration.constants);
        self.dynamic = Some(configuration.dynamic);
        self.themes = configuration.themes;
    }
}

/// The view process's configuration and theme cache.
pub struct Runtime {
    bridge: Arc<dyn Bridge>,
    readiness: watch::Sender<Readiness>,
    state: RwLock<CachedState>,
    switches: SequenceCounter,
}

impl Runtime {
    pub fn new(bridge: Arc<dyn Bridge>) -> Self {
        let (readiness, _) = watch::channel(Readiness::NotStarted);
        Self {
            bridge,
            readiness,
            state: RwLock::new(CachedState::default()),
            switches: SequenceCounter::new(),
        }
    }

    /// Current readiness state; never blocks.
    pub fn readiness(&self) -> Readiness {
        *self.readiness.borrow()
    }

    /// Suspends until the runtime reaches [`Readiness::Ready`].
    pub async fn wait_ready(&self) {
        let mut rx = self.readiness.subscribe();
        // The sender lives in self, so wait_for cannot fail while we borrow
        // self; the fallback keeps the signature infallible.
        let _ = rx.wait_for(|state| *state == Readiness::Ready).await;
    }

    /// Performs the one-time `get-configuration` round-trip and opens the
    /// readiness gate.
    ///
    /// Safe to call again: a repeat while `Pending` or `Ready` is a logged
    /// no-op.  On a bridge failure the gate rolls back to `NotStarted` and
    /// the error is returned, so a later retry can succeed.
    pub async fn init(&self) -> Result<(), RuntimeError> {
        let entered = self.readiness.send_if_modified(|state| {
            if *state == Readiness::NotStarted {
                *state = Readiness::Pending;
                true
            } else {
                false
            }
        });
        if !entered {
            debug!("runtime init already started; ignoring repeat call");
            return Ok(());
        }

        match self.bridge.get_configuration().await {
            Ok(configuration) => {
                {
                    let mut state = self.state.write().await;
                    state.install_configuration(configuration);
                }
                self.readiness.send_replace(Readiness::Ready);
                info!("runtime initialized");
                Ok(())
            }
            Err(err) => {
                self.readiness.send_replace(Readiness::NotStarted);
                warn!("runtime init failed: {err}");
                Err(err.into())
            }
        }
    }

    /// Replaces the cached configuration wholesale from a `config-reload`
    /// push.  The active theme is retained.  Applying the same push twice is
    /// harmless; a push arriving before readiness is dropped (the pending
    /// `init` fetch will observe the newer value anyway).
    pub async fn apply_reload(&self, push: ConfigPush) {
        if self.readiness() != Readiness::Ready {
            debug!(
                generation = push.generation,
                "dropping config-reload before runtime is ready"
            );
            return;
        }
        let mut state = self.state.write().await;
        state.install_configuration(push.configuration);
        info!(generation = push.generation, "configuration cache replaced");
    }

    /// Switches the active theme to `name`.
    ///
    /// Looks the name up in the cached theme list by exact match, fetches
    /// and validates the theme's configuration, and installs it atomically.
    /// See [`ThemeSwitch`] for the recoverable outcomes; only transport
    /// failures and calling before readiness produce an `Err`.
    pub async fn load_theme(&self, name: &str) -> Result<ThemeSwitch, RuntimeError> {
        if self.readiness() != Readiness::Ready {
            return Err(RuntimeError::NotReady);
        }

        let descriptor = {
            let state = self.state.read().await;
            state.themes.iter().find(|t| t.name == name).cloned()
        };
        let Some(descriptor) = descriptor else {
            debug!(theme = name, "requested theme is not in the cached list");
            return Ok(ThemeSwitch::UnknownTheme);
        };

        // Ticket drawn only for switches that will actually fetch, so a
        // mistyped name cannot supersede a switch already in flight.
        let ticket = self.switches.next();

        let path = self
            .bridge
            .path_join(&[
                descriptor.path.clone(),
                keys::THEME_CONFIGURATION.to_string(),
            ])
            .await?;

        let candidate = match self.bridge.request_json_file(&path).await {
            Ok(candidate) => candidate,
            Err(BridgeCallError::Fault(fault)) => {
                // The host answered "that failed" — an unusable theme, not a
                // broken transport.  Same handling as a validation failure.
                warn!(theme = name, "theme configuration unavailable: {fault}");
                return Ok(ThemeSwitch::Rejected);
            }
            Err(err) => return Err(err.into()),
        };

        let verdict = validate_theme(&candidate);
        if !verdict.is_valid() {
            warn!(theme = name, "{}", verdict.report());
            return Ok(ThemeSwitch::Rejected);
        }

        let config: ThemeConfiguration = match serde_json::from_value(candidate) {
            Ok(config) => config,
            Err(err) => {
                warn!(theme = name, "theme configuration did not deserialize: {err}");
                return Ok(ThemeSwitch::Rejected);
            }
        };

        let mut state = self.state.write().await;
        if self.switches.current() != ticket + 1 {
            debug!(theme = name, ticket, "theme switch superseded by a newer request");
            return Ok(ThemeSwitch::Superseded);
        }
        if state.activated_ticket.is_some_and(|t| t > ticket) {
            debug!(theme = name, ticket, "a newer theme already activated");
            return Ok(ThemeSwitch::Superseded);
        }
        state.active = Some(ActiveTheme { descriptor, config });
        state.activated_ticket = Some(ticket);
        info!(theme = name, "theme activated");
        Ok(ThemeSwitch::Activated)
    }

    /// Snapshot of the active theme, if any.
    pub async fn active_theme(&self) -> Option<ActiveTheme> {
        self.state.read().await.active.clone()
    }

    /// Cached environment constants; `None` until ready.
    pub async fn constants(&self) -> Option<ConfigConstants> {
        self.state.read().await.constants.clone()
    }

    /// Cached dynamic settings; `None` until ready.
    pub async fn dynamic(&self) -> Option<DynamicSettings> {
        self.state.read().await.dynamic.clone()
    }

    /// Cached theme list; empty until ready.
    pub async fn themes(&self) -> Vec<ThemeDescriptor> {
        self.state.read().await.themes.clone()
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
