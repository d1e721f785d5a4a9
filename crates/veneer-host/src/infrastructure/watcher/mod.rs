//! Watches the configuration file and emits reload triggers.
//!
//! # Why watch the directory, not the file
//!
//! Most editors save by writing a temporary file and renaming it over the
//! original, which replaces the inode a file-level watch is bound to.  The
//! watcher therefore observes the configuration *directory* and filters for
//! events touching the configuration file's name.
//!
//! # Trigger delivery
//!
//! `notify` invokes the event handler on its own thread; triggers cross into
//! the async world over a bounded `mpsc`.  `try_send` is deliberate: if a
//! trigger is already queued, the pending reload will read the latest bytes
//! anyway, so further triggers for the same burst carry no information.
//! The host loop consumes triggers one at a time, which keeps reloads
//! serialized.

use std::path::Path;

use notify::{Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use thiserror::Error;
use tokio::sync::mpsc;
use tracing::{trace, warn};

/// Marker sent for each observed change to the configuration file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReloadTrigger;

/// Errors from setting up the configuration watcher.
#[derive(Debug, Error)]
pub enum WatcherError {
    /// The configuration path has no parent directory or file name.
    #[error("cannot watch configuration path {0}")]
    UnwatchablePath(String),

    /// The underlying filesystem watcher failed.
    #[error(transparent)]
    Notify(#[from] notify::Error),
}

/// Watches one configuration file for changes.
///
/// Dropping the watcher stops the feed.
pub struct ConfigWatcher {
    // Held only for its Drop side effect; the OS watch dies with it.
    _watcher: RecommendedWatcher,
}

impl ConfigWatcher {
    /// Starts watching `config_path`, sending a [`ReloadTrigger`] into
    /// `triggers` for every write/create/remove of the file.
    pub fn spawn(
        config_path: &Path,
        triggers: mpsc::Sender<ReloadTrigger>,
    ) -> Result<Self, WatcherError> {
        let unwatchable = || WatcherError::UnwatchablePath(config_path.display().to_string());
        let dir = config_path.parent().ok_or_else(unwatchable)?.to_path_buf();
        let file_name = config_path.file_name().ok_or_else(unwatchable)?.to_os_string();

        let mut watcher = notify::recommended_watcher(move |result: notify::Result<Event>| {
            let event = match result {
                Ok(event) => event,
                Err(err) => {
                    warn!("configuration watcher error: {err}");
                    return;
                }
            };

            let relevant = matches!(
                event.kind,
                EventKind::Modify(_) | EventKind::Create(_) | EventKind::Remove(_)
            ) && event
                .paths
                .iter()
                .any(|p| p.file_name() == Some(file_name.as_os_str()));

            if relevant && triggers.try_send(ReloadTrigger).is_err() {
                // Either a trigger is already queued or the host loop is
                // gone; both are fine to ignore here.
                trace!("reload trigger not enqueued");
            }
        })?;

        watcher.watch(&dir, RecursiveMode::NonRecursive)?;

        Ok(Self { _watcher: watcher })
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use uuid::Uuid;

    #[test]
    fn test_path_without_parent_is_rejected() {
        let (tx, _rx) = mpsc::channel(1);
        let result = ConfigWatcher::spawn(Path::new("/"), tx);
        assert!(matches!(result, Err(WatcherError::UnwatchablePath(_))));
    }

    #[tokio::test]
    async fn test_write_to_the_config_file_triggers_a_reload() {
        // Arrange
        let dir = std::env::temp_dir().join(format!("veneer_watch_{}", Uuid::new_v4()));
        std::fs::create_dir_all(&dir).expect("create temp dir");
        let path = dir.join("config.json");
        std::fs::write(&path, "{}").unwrap();

        let (tx, mut rx) = mpsc::channel(1);
        let _watcher = ConfigWatcher::spawn(&path, tx).expect("spawn watcher");

        // Act
        std::fs::write(&path, r#"{ "edited": true }"#).unwrap();

        // Assert – a trigger arrives within a generous deadline
        let trigger = tokio::time::timeout(Duration::from_secs(5), rx.recv()).await;
        assert_eq!(trigger.expect("timed out"), Some(ReloadTrigger));

        std::fs::remove_dir_all(&dir).ok();
    }

    #[tokio::test]
    async fn test_sibling_files_do_not_trigger() {
        // Arrange
        let dir = std::env::temp_dir().join(format!("veneer_watch_{}", Uuid::new_v4()));
        std::fs::create_dir_all(&dir).expect("create temp dir");
        let path = dir.join("config.json");
        std::fs::write(&path, "{}").unwrap();

        let (tx, mut rx) = mpsc::channel(1);
        let _watcher = ConfigWatcher::spawn(&path, tx).expect("spawn watcher");

        // Act – touch an unrelated file in the same directory
        std::fs::write(dir.join("notes.txt"), "unrelated").unwrap();

        // Assert – no trigger shows up
        let outcome =
            tokio::time::timeout(Duration::from_millis(500), rx.recv()).await;
        assert!(outcome.is_err(), "unrelated file must not trigger a reload");

        std::fs::remove_dir_all(&dir).ok();
    }
}
