//! View-side bridge plumbing.
//!
//! The typed client itself lives in `veneer_core::bridge`; this module adds
//! the view-process glue around it — the task that feeds `config-reload`
//! pushes into the runtime — plus the scripted [`mock::MockBridge`] used to
//! drive the runtime without a host.

pub mod mock;

use std::sync::Arc;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::debug;

use veneer_core::ConfigPush;

use crate::application::runtime::Runtime;

/// Spawns the task that applies every incoming `config-reload` push to the
/// runtime cache.
///
/// The feed is the watch receiver obtained from
/// `BridgeClient::subscribe_reloads`; it coalesces to the latest push, so a
/// busy view never processes a backlog of stale configurations.  The task
/// ends when the host side of the bridge goes away.
pub fn spawn_reload_listener(
    runtime: Arc<Runtime>,
    mut reloads: watch::Receiver<Option<ConfigPush>>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        while reloads.changed().await.is_ok() {
            let push = reloads.borrow_and_update().clone();
            if let Some(push) = push {
                runtime.apply_reload(push).await;
            }
        }
        debug!("config-reload feed closed");
    })
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use super::mock::MockBridge;
    use serde_json::json;
    use std::time::Duration;
    use veneer_core::ClientConfiguration;

    fn configuration(default_theme: &str) -> ClientConfiguration {
        serde_json::from_value(json!({
            "constants": { "themeDir": "/themes" },
            "dynamic": { "defaultTheme": default_theme },
            "themes": [ { "name": "dark", "path": "/themes/dark" } ]
        }))
        .expect("configuration")
    }

    #[tokio::test]
    async fn test_listener_applies_pushes_to_the_runtime() {
        // Arrange
        let runtime = Arc::new(Runtime::new(Arc::new(MockBridge::new(configuration(
            "dark",
        )))));
        runtime.init().await.expect("init");

        let (push_tx, push_rx) = watch::channel(None);
        let listener = spawn_reload_listener(Arc::clone(&runtime), push_rx);

        // Act
        push_tx.send_replace(Some(ConfigPush {
            generation: 1,
            configuration: configuration("light"),
        }));

        // Assert – the cache reflects the push shortly after
        let deadline = tokio::time::Instant::now() + Duration::from_secs(1);
        loop {
            let dynamic = runtime.dynamic().await.expect("dynamic");
            if dynamic.default_theme.as_deref() == Some("light") {
                break;
            }
            assert!(
                tokio::time::Instant::now() < deadline,
                "push was not applied in time"
            );
            tokio::time::sleep(Duration::from_millis(10)).await;
        }

        // The listener ends once the host side is gone.
        drop(push_tx);
        tokio::time::timeout(Duration::from_secs(1), listener)
            .await
            .expect("listener must end")
            .expect("listener task");
    }
}
