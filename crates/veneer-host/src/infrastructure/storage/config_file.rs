//! Reads the client configuration document from its fixed path.
//!
//! This is a pure function of file bytes: read, parse, classify.  Retry and
//! failure policy live with the caller ([`ConfigStore`]); this module never
//! shows dialogs, never terminates anything, never retries.
//!
//! # Failure classification
//!
//! Users hand-edit `config.json` while the application may be running, so
//! the loader distinguishes two failure kinds the store treats very
//! differently:
//!
//! - [`ConfigFileError::Parse`] – the bytes were read but are not a valid
//!   configuration document.  This is the *expected* state halfway through a
//!   manual edit (an unclosed brace, a trailing comma) and is transient.
//! - [`ConfigFileError::Read`] – the file could not be accessed at all
//!   (missing, permission denied, I/O failure).  Nothing about waiting for
//!   the editor to finish will fix this.
//!
//! Shape mismatches (valid JSON that is not a configuration document) are
//! parse failures too: the bytes exist but fail structural parsing.
//!
//! [`ConfigStore`]: crate::application::config_store::ConfigStore

use std::path::{Path, PathBuf};

use thiserror::Error;

use veneer_core::config::keys;
use veneer_core::ClientConfiguration;

/// Error type for configuration file loading.
#[derive(Debug, Error)]
pub enum ConfigFileError {
    /// The platform config directory could not be determined.
    #[error("could not determine platform config directory")]
    NoPlatformConfigDir,

    /// The file could not be accessed.
    #[error("failed to read configuration at {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The bytes were read but do not parse into a configuration document.
    #[error("failed to parse configuration at {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl ConfigFileError {
    /// `true` for failures that are expected to resolve on their own, such
    /// as a malformed document mid-edit.
    pub fn is_transient(&self) -> bool {
        matches!(self, ConfigFileError::Parse { .. })
    }
}

/// Reads and parses the configuration document at `path`.
///
/// # Errors
///
/// Returns [`ConfigFileError::Read`] when the file cannot be accessed and
/// [`ConfigFileError::Parse`] when its content is not a valid document.
pub fn read_config_file(path: &Path) -> Result<ClientConfiguration, ConfigFileError> {
    let bytes = std::fs::read(path).map_err(|source| ConfigFileError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    serde_json::from_slice(&bytes).map_err(|source| ConfigFileError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Resolves the full path to the configuration file inside `config_dir`.
pub fn config_file_path(config_dir: &Path) -> PathBuf {
    config_dir.join(keys::CLIENT_CONFIGURATION)
}

/// Determines the platform-appropriate configuration directory:
///
/// - Windows:  `%APPDATA%\Veneer`
/// - Linux:    `$XDG_CONFIG_HOME/veneer` or `~/.config/veneer`
/// - macOS:    `~/Library/Application Support/Veneer`
///
/// # Errors
///
/// Returns [`ConfigFileError::NoPlatformConfigDir`] when the base directory
/// cannot be determined from the environment.
pub fn config_dir() -> Result<PathBuf, ConfigFileError> {
    platform_config_dir().ok_or(ConfigFileError::NoPlatformConfigDir)
}

/// Resolves the platform config base directory.
fn platform_config_dir() -> Option<PathBuf> {
    #[cfg(target_os = "windows")]
    {
        // %APPDATA% e.g. C:\Users\<user>\AppData\Roaming
        std::env::var_os("APPDATA").map(|p| PathBuf::from(p).join("Veneer"))
    }

    #[cfg(target_os = "linux")]
    {
        // XDG_CONFIG_HOME or ~/.config
        let base = std::env::var_os("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .or_else(|| std::env::var_os("HOME").map(|h| PathBuf::from(h).join(".config")))?;
        Some(base.join("veneer"))
    }

    #[cfg(target_os = "macos")]
    {
        std::env::var_os("HOME").map(|h| {
            PathBuf::from(h)
                .join("Library")
                .join("Application Support")
                .join("Veneer")
        })
    }

    #[cfg(not(any(target_os = "windows", target_os = "linux", target_os = "macos")))]
    {
        None
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
