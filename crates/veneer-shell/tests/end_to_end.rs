//! End-to-end tests: real configuration and theme files on disk, the host
//! context serving them over the bridge, and the view runtime activating
//! themes — the full synchronization path in one process.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use uuid::Uuid;

use veneer_host::infrastructure::alerts::{AlertSink, RecordingAlertSink};
use veneer_shell::{wire, Shell, ShellError};
use veneer_view::ThemeSwitch;

struct Fixture {
    dir: PathBuf,
    alerts: Arc<RecordingAlertSink>,
}

impl Fixture {
    /// A config dir with one installed theme whose theme.json is `theme_body`.
    fn with_theme(theme_body: &str) -> Self {
        let fx = Self::empty();
        let theme_dir = fx.dir.join("themes").join("dark");
        std::fs::create_dir_all(&theme_dir).expect("create theme dir");
        std::fs::write(theme_dir.join("theme.json"), theme_body).expect("write theme");
        fx.write_config(&fx.config_with_default_theme("dark"));
        fx
    }

    fn empty() -> Self {
        let dir = std::env::temp_dir().join(format!("veneer_e2e_{}", Uuid::new_v4()));
        std::fs::create_dir_all(&dir).expect("create temp dir");
        Self {
            dir,
            alerts: Arc::new(RecordingAlertSink::new()),
        }
    }

    fn config_with_default_theme(&self, default_theme: &str) -> String {
        let themes_root = self.dir.join("themes");
        let dark = themes_root.join("dark");
        format!(
            r#"{{
                "constants": {{ "themeDir": "{themes}" }},
                "dynamic": {{ "defaultTheme": "{default_theme}" }},
                "themes": [ {{ "name": "dark", "path": "{dark}" }} ]
            }}"#,
            themes = escape(&themes_root),
            dark = escape(&dark),
        )
    }

    fn write_config(&self, content: &str) {
        std::fs::write(self.dir.join("config.json"), content).expect("write config");
    }

    async fn wire(&self) -> Result<Shell, ShellError> {
        wire(&self.dir, Arc::clone(&self.alerts) as Arc<dyn AlertSink>).await
    }
}

impl Drop for Fixture {
    fn drop(&mut self) {
        std::fs::remove_dir_all(&self.dir).ok();
    }
}

/// JSON string escaping for Windows path separators.
fn escape(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "\\\\")
}

#[tokio::test]
async fn test_init_then_load_theme_activates_the_default_theme() {
    // Arrange – a complete install: theme.json with main.layout "grid"
    let fx = Fixture::with_theme(r#"{ "main": { "layout": "grid" } }"#);
    let shell = fx.wire().await.expect("wire");

    // Act
    shell.runtime.init().await.expect("init");
    let outcome = shell.runtime.load_theme("dark").await.expect("load_theme");

    // Assert
    assert_eq!(outcome, ThemeSwitch::Activated);
    let active = shell.runtime.active_theme().await.expect("active theme");
    assert_eq!(active.name(), "dark");
    assert_eq!(active.config.main.layout, "grid");
    assert_eq!(fx.alerts.count(), 0);
}

#[tokio::test]
async fn test_incomplete_theme_is_diagnosed_and_not_activated() {
    // Arrange – same setup, but the theme file is missing its layout
    let fx = Fixture::with_theme(r#"{ "main": {} }"#);
    let shell = fx.wire().await.expect("wire");

    // Act
    shell.runtime.init().await.expect("init");
    let outcome = shell.runtime.load_theme("dark").await.expect("load_theme");

    // Assert – no active theme, no dialog, no termination
    assert_eq!(outcome, ThemeSwitch::Rejected);
    assert!(shell.runtime.active_theme().await.is_none());
    assert_eq!(fx.alerts.count(), 0);
}

#[tokio::test]
async fn test_missing_configuration_is_fatal_at_wire_time() {
    // Arrange – an empty config dir
    let fx = Fixture::empty();

    // Act
    let result = fx.wire().await;

    // Assert – fatal, with exactly one dialog shown
    assert!(matches!(result, Err(ShellError::NoConfiguration)));
    assert_eq!(fx.alerts.count(), 1);
}

#[tokio::test]
async fn test_config_edit_reaches_the_view_cache() {
    // Arrange
    let fx = Fixture::with_theme(r#"{ "main": { "layout": "grid" } }"#);
    let shell = fx.wire().await.expect("wire");
    shell.runtime.init().await.expect("init");

    // Act – the user edits the default theme, a reload trigger fires
    fx.write_config(&fx.config_with_default_theme("light"));
    shell.reload().await;

    // Assert – the view cache converges on the new value
    let deadline = tokio::time::Instant::now() + Duration::from_secs(2);
    loop {
        let dynamic = shell.runtime.dynamic().await.expect("dynamic");
        if dynamic.default_theme.as_deref() == Some("light") {
            break;
        }
        assert!(
            tokio::time::Instant::now() < deadline,
            "reload push never reached the runtime"
        );
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
}

#[tokio::test]
async fn test_mid_edit_garbage_never_disturbs_the_view() {
    // Arrange
    let fx = Fixture::with_theme(r#"{ "main": { "layout": "grid" } }"#);
    let shell = fx.wire().await.expect("wire");
    shell.runtime.init().await.expect("init");
    shell.runtime.load_theme("dark").await.expect("load_theme");

    // Act – malformed bytes land on disk; a trigger fires anyway
    fx.write_config(r#"{ "constants": { "themeDir":"#);
    shell.reload().await;

    // Assert – nothing changed anywhere, silently
    assert_eq!(fx.alerts.count(), 0);
    let dynamic = shell.runtime.dynamic().await.expect("dynamic");
    assert_eq!(dynamic.default_theme.as_deref(), Some("dark"));
    let active = shell.runtime.active_theme().await.expect("active theme");
    assert_eq!(active.config.main.layout, "grid");
}

#[tokio::test]
async fn test_theme_list_is_discovered_when_config_omits_it() {
    // Arrange – a config without a themes array, plus two themes on disk
    let fx = Fixture::empty();
    for name in ["dark", "light"] {
        let dir = fx.dir.join("themes").join(name);
        std::fs::create_dir_all(&dir).expect("create theme dir");
        std::fs::write(dir.join("theme.json"), r#"{ "main": { "layout": "grid" } }"#)
            .expect("write theme");
    }
    fx.write_config(&format!(
        r#"{{ "constants": {{ "themeDir": "{}" }} }}"#,
        escape(&fx.dir.join("themes"))
    ));
    let shell = fx.wire().await.expect("wire");

    // Act
    shell.runtime.init().await.expect("init");

    // Assert – both themes are visible and activatable
    let themes = shell.runtime.themes().await;
    let names: Vec<_> = themes.iter().map(|t| t.name.as_str()).collect();
    assert_eq!(names, ["dark", "light"]);
    let outcome = shell.runtime.load_theme("light").await.expect("load_theme");
    assert_eq!(outcome, ThemeSwitch::Activated);
}
