//! Schema types for the client configuration document.
//!
//! The configuration file is a single JSON document with camelCase keys:
//!
//! ```json
//! {
//!   "constants": { "themeDir": "/home/user/.config/veneer/themes" },
//!   "dynamic": { "defaultTheme": "dark" },
//!   "themes": [ { "name": "dark", "path": "/themes/dark" } ]
//! }
//! ```
//!
//! The document has two logical partitions:
//!
//! - **`constants`** – environment-derived values established once at process
//!   start (directory roots and similar).  They never change while the
//!   process is running, even across reloads of the file.
//! - **`dynamic`** – user-editable settings.  Users hand-edit this file while
//!   the application may be running, so every consumer of these types must
//!   tolerate the file being rewritten at any time.
//!
//! # Unknown fields
//!
//! Themes are free to define their own settings inside `dynamic` (and skins
//! may grow new `constants`).  Every struct here carries a flattened
//! `extra` map so unknown fields survive a deserialize/serialize round trip
//! instead of being dropped.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Top-level client configuration document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientConfiguration {
    /// Environment-fixed values; established at startup, never changed after.
    pub constants: ConfigConstants,
    /// User-editable settings.
    #[serde(default)]
    pub dynamic: DynamicSettings,
    /// Installed themes.  May be omitted from the file; the host fills the
    /// list by scanning the theme directory when it is empty.
    #[serde(default)]
    pub themes: Vec<ThemeDescriptor>,
}

/// Environment-derived constants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigConstants {
    /// Root directory containing one subdirectory per installed theme.
    pub theme_dir: String,
    /// Additional environment values not interpreted by the core.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// User-editable settings.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DynamicSettings {
    /// Name of the theme to activate at startup.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_theme: Option<String>,
    /// Optional loading-screen override shown while the view initializes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub loading: Option<LoadingOverride>,
    /// Theme-specific settings not interpreted by the core.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Loading-screen override from the `dynamic.loading` section.
///
/// When `image` is set it wins over `text`; `style` is an opaque
/// display-style bag passed through to the renderer untouched.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoadingOverride {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// Image path relative to the active theme directory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<Value>,
}

impl LoadingOverride {
    /// Returns `true` when the override carries nothing to display.
    ///
    /// An empty override is treated the same as an absent one.
    pub fn is_empty(&self) -> bool {
        self.text.is_none() && self.image.is_none()
    }
}

/// Identifies one installed theme: a display name and the directory that
/// holds its `theme.json` and assets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemeDescriptor {
    pub name: String,
    pub path: String,
}

// ── Tests ─────────────────────────────────────────────────────────────────────
