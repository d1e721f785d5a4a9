//! The process-wide configuration store.
//!
//! Exactly one `ConfigStore` exists per privileged process.  It is
//! constructed once in `main` and handed to every component that needs
//! configuration access — there is no global lookup.
//!
//! # The failure policy (the core design decision)
//!
//! Users hand-edit `config.json` while the application may be running, so
//! the store deliberately trades strict correctness for editability:
//!
//! - Once a configuration has loaded successfully, a later **parse** failure
//!   is treated as an edit in progress: ignored silently, old value kept.
//! - A later **read** failure is not an edit artifact; the user gets an
//!   error box, but the process continues on the old value.
//! - On the very first load there is no old value to fall back to, so *any*
//!   failure shows the error box and tells the caller to terminate.
//!
//! The store itself never calls `process::exit`; it reports
//! [`LoadStatus::Fatal`] and the binary decides how to die.  Likewise the
//! "dialog" is whatever [`AlertSink`] the embedder injected.
//!
//! # Reload generations
//!
//! Every reload draws a generation from a [`SequenceCounter`] *before*
//! touching the filesystem, so generations order reloads by trigger time.
//! The broadcaster uses this to refuse out-of-order publication: even if an
//! implementation ever lets two reloads overlap, a slower older reload
//! cannot overwrite a newer one downstream.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, info, warn};

use veneer_core::{ClientConfiguration, ConfigPush, SequenceCounter};

use crate::application::broadcast::ReloadBroadcaster;
use crate::infrastructure::alerts::AlertSink;
use crate::infrastructure::storage::config_file::{
    config_file_path, read_config_file, ConfigFileError,
};

/// Dialog title used for configuration failures.
const ALERT_TITLE: &str = "Configuration error";

/// Result of one load or reload attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadStatus {
    /// A configuration value was parsed and installed.  `changed` is `false`
    /// when the new value equals the previous one; callers may skip
    /// re-broadcasting in that case.
    Installed { generation: u64, changed: bool },

    /// The attempt failed but a previous value exists and was kept.
    /// `alerted` tells whether an error box was shown (read failures) or the
    /// failure was swallowed as an edit in progress (parse failures).
    KeptPrevious { alerted: bool },

    /// The attempt failed and no value has ever been loaded.  An error box
    /// was shown; the caller must terminate the process.
    Fatal,
}

/// Owns the current configuration value for the privileged process.
pub struct ConfigStore {
    path: PathBuf,
    current: Option<ClientConfiguration>,
    generations: SequenceCounter,
    last_installed_generation: u64,
    alerts: Arc<dyn AlertSink>,
}

impl ConfigStore {
    /// Creates the store and performs the initial load.
    ///
    /// On [`LoadStatus::Fatal`] the store is returned anyway (with no
    /// value); the caller is expected to exit rather than use it.
    pub fn open(config_dir: &Path, alerts: Arc<dyn AlertSink>) -> (Self, LoadStatus) {
        let mut store = Self {
            path: config_file_path(config_dir),
            current: None,
            generations: SequenceCounter::new(),
            last_installed_generation: 0,
            alerts,
        };
        let status = store.reload();
        (store, status)
    }

    /// Re-runs the load algorithm.  Callable repeatedly — on watcher
    /// triggers, on explicit user action — without process-start side
    /// effects.
    pub fn reload(&mut self) -> LoadStatus {
        // Stamped before the read so generations order reloads by trigger
        // time, not by completion time.
        let generation = self.generations.next();

        match read_config_file(&self.path) {
            Ok(next) => {
                let changed = self.current.as_ref() != Some(&next);
                self.current = Some(next);
                self.last_installed_generation = generation;
                info!(generation, changed, "configuration installed");
                LoadStatus::Installed {
                    generation,
                    changed,
                }
            }

            Err(err) if err.is_transient() && self.current.is_some() => {
                // An edit in progress; the file will parse again shortly.
                debug!("ignoring configuration parse error while editing: {err}");
                LoadStatus::KeptPrevious { alerted: false }
            }

            Err(err) => {
                self.alerts.error_box(ALERT_TITLE, &self.alert_message(&err));
                if self.current.is_some() {
                    warn!("configuration reload failed; keeping previous value: {err}");
                    LoadStatus::KeptPrevious { alerted: true }
                } else {
                    warn!("initial configuration load failed: {err}");
                    LoadStatus::Fatal
                }
            }
        }
    }

    /// The current configuration, or `None` when nothing has loaded yet.
    /// Never blocks.
    pub fn current(&self) -> Option<&ClientConfiguration> {
        self.current.as_ref()
    }

    /// Clones the current configuration for handing across the bridge.
    pub fn snapshot(&self) -> Option<ClientConfiguration> {
        self.current.clone()
    }

    /// Path of the configuration file this store watches over.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The push payload for the most recently installed value.
    pub fn last_push(&self) -> Option<ConfigPush> {
        self.current.clone().map(|configuration| ConfigPush {
            generation: self.last_installed_generation,
            configuration,
        })
    }

    /// Delivers the current value to every attached presentation surface.
    ///
    /// Call after `open`/`reload` returned; a store with no value is a
    /// no-op (there is nothing to deliver).
    pub fn notify_all(&self, broadcaster: &mut ReloadBroadcaster) -> usize {
        match self.last_push() {
            Some(push) => broadcaster.broadcast(push),
            None => 0,
        }
    }

    fn alert_message(&self, err: &ConfigFileError) -> String {
        format!(
            "{err}\nThis error occurred while reading {}",
            self.path.display()
        )
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::alerts::RecordingAlertSink;
    use uuid::Uuid;

    const VALID: &str =
        r#"{ "constants": { "themeDir": "/themes" }, "dynamic": { "defaultTheme": "dark" } }"#;
    const VALID_EDITED: &str =
        r#"{ "constants": { "themeDir": "/themes" }, "dynamic": { "defaultTheme": "light" } }"#;
    const MALFORMED: &str = r#"{ "constants": { "themeDir":"#;

    struct Fixture {
        dir: PathBuf,
        alerts: Arc<RecordingAlertSink>,
    }

    impl Fixture {
        fn new() -> Self {
            let dir = std::env::temp_dir().join(format!("veneer_store_{}", Uuid::new_v4()));
            std::fs::create_dir_all(&dir).expect("create temp dir");
            Self {
                dir,
                alerts: Arc::new(RecordingAlertSink::new()),
            }
        }

        fn write_config(&self, content: &str) {
            std::fs::write(config_file_path(&self.dir), content).expect("write config");
        }

        fn remove_config(&self) {
            std::fs::remove_file(config_file_path(&self.dir)).expect("remove config");
        }

        fn open(&self) -> (ConfigStore, LoadStatus) {
            ConfigStore::open(&self.dir, Arc::clone(&self.alerts) as Arc<dyn AlertSink>)
        }
    }

    impl Drop for Fixture {
        fn drop(&mut self) {
            std::fs::remove_dir_all(&self.dir).ok();
        }
    }

    #[test]
    fn test_initial_load_installs_the_value() {
        // Arrange
        let fx = Fixture::new();
        fx.write_config(VALID);

        // Act
        let (store, status) = fx.open();

        // Assert
        assert!(matches!(status, LoadStatus::Installed { changed: true, .. }));
        assert_eq!(
            store.current().unwrap().dynamic.default_theme.as_deref(),
            Some("dark")
        );
        assert_eq!(fx.alerts.count(), 0);
    }

    #[test]
    fn test_first_load_parse_failure_is_fatal_with_one_alert() {
        // Arrange
        let fx = Fixture::new();
        fx.write_config(MALFORMED);

        // Act
        let (store, status) = fx.open();

        // Assert – no usable state to start with
        assert_eq!(status, LoadStatus::Fatal);
        assert!(store.current().is_none());
        assert_eq!(fx.alerts.count(), 1);
    }

    #[test]
    fn test_first_load_missing_file_is_fatal_with_one_alert() {
        // Arrange – no config file at all
        let fx = Fixture::new();

        // Act
        let (_store, status) = fx.open();

        // Assert
        assert_eq!(status, LoadStatus::Fatal);
        assert_eq!(fx.alerts.count(), 1);
        assert!(fx.alerts.recorded()[0].message.contains("config.json"));
    }

    #[test]
    fn test_parse_failure_after_success_keeps_value_silently() {
        // Arrange
        let fx = Fixture::new();
        fx.write_config(VALID);
        let (mut store, _) = fx.open();
        let before = store.snapshot();

        // Act – the user is mid-edit
        fx.write_config(MALFORMED);
        let status = store.reload();

        // Assert – old value retained, no dialog, no termination
        assert_eq!(status, LoadStatus::KeptPrevious { alerted: false });
        assert_eq!(store.snapshot(), before);
        assert_eq!(fx.alerts.count(), 0);
    }

    #[test]
    fn test_read_failure_after_success_alerts_but_continues() {
        // Arrange
        let fx = Fixture::new();
        fx.write_config(VALID);
        let (mut store, _) = fx.open();
        let before = store.snapshot();

        // Act – the file disappeared
        fx.remove_config();
        let status = store.reload();

        // Assert – dialog shown, old value retained, process continues
        assert_eq!(status, LoadStatus::KeptPrevious { alerted: true });
        assert_eq!(store.snapshot(), before);
        assert_eq!(fx.alerts.count(), 1);
    }

    #[test]
    fn test_reload_installs_edited_value() {
        // Arrange
        let fx = Fixture::new();
        fx.write_config(VALID);
        let (mut store, _) = fx.open();

        // Act
        fx.write_config(VALID_EDITED);
        let status = store.reload();

        // Assert
        assert!(matches!(status, LoadStatus::Installed { changed: true, .. }));
        assert_eq!(
            store.current().unwrap().dynamic.default_theme.as_deref(),
            Some("light")
        );
    }

    #[test]
    fn test_reload_without_change_reports_unchanged() {
        // Arrange
        let fx = Fixture::new();
        fx.write_config(VALID);
        let (mut store, _) = fx.open();
        let before = store.snapshot();

        // Act – nothing touched the file
        let status = store.reload();

        // Assert – same value, flagged as unchanged
        assert!(matches!(
            status,
            LoadStatus::Installed { changed: false, .. }
        ));
        assert_eq!(store.snapshot(), before);
    }

    #[test]
    fn test_generations_increase_with_each_install() {
        // Arrange
        let fx = Fixture::new();
        fx.write_config(VALID);
        let (mut store, first) = fx.open();

        // Act
        let second = store.reload();

        // Assert
        let LoadStatus::Installed {
            generation: g1, ..
        } = first
        else {
            panic!("first load must install");
        };
        let LoadStatus::Installed {
            generation: g2, ..
        } = second
        else {
            panic!("second load must install");
        };
        assert!(g2 > g1, "generations must order reloads by trigger time");
    }

    #[test]
    fn test_recovery_after_failed_reload_installs_again() {
        // Arrange – break the file, then fix it
        let fx = Fixture::new();
        fx.write_config(VALID);
        let (mut store, _) = fx.open();
        fx.write_config(MALFORMED);
        store.reload();

        // Act
        fx.write_config(VALID_EDITED);
        let status = store.reload();

        // Assert
        assert!(matches!(status, LoadStatus::Installed { changed: true, .. }));
        assert_eq!(
            store.current().unwrap().dynamic.default_theme.as_deref(),
            Some("light")
        );
    }

    #[test]
    fn test_notify_all_without_value_is_a_no_op() {
        // Arrange – fatal first load leaves the store empty
        let fx = Fixture::new();
        fx.write_config(MALFORMED);
        let (store, _) = fx.open();
        let mut broadcaster = ReloadBroadcaster::new();

        // Act / Assert
        assert_eq!(store.notify_all(&mut broadcaster), 0);
    }
}
