//! Theme discovery: fills the theme list when the configuration omits it.
//!
//! A theme is any direct subdirectory of the theme root that contains a
//! `theme.json`.  Discovery only reports *where* themes live; whether a
//! theme's configuration is usable is decided at activation time by the
//! validator, not here.

use std::io;
use std::path::Path;

use tracing::debug;

use veneer_core::config::keys;
use veneer_core::ThemeDescriptor;

/// Scans `theme_dir` for installed themes.
///
/// Subdirectories without a `theme.json` are skipped silently; entries whose
/// names are not valid Unicode are skipped with a debug log.  A missing
/// theme root yields an empty list, not an error — a fresh install has no
/// themes yet.
///
/// # Errors
///
/// Returns the underlying I/O error when the directory exists but cannot be
/// enumerated.
pub fn discover_themes(theme_dir: &Path) -> io::Result<Vec<ThemeDescriptor>> {
    if !theme_dir.exists() {
        return Ok(Vec::new());
    }

    let mut themes = Vec::new();
    for entry in std::fs::read_dir(theme_dir)? {
        let entry = entry?;
        let path = entry.path();
        if !path.is_dir() || !path.join(keys::THEME_CONFIGURATION).is_file() {
            continue;
        }
        match path.file_name().and_then(|n| n.to_str()) {
            Some(name) => themes.push(ThemeDescriptor {
                name: name.to_string(),
                path: path.to_string_lossy().into_owned(),
            }),
            None => debug!(path = %path.display(), "skipping theme directory with non-Unicode name"),
        }
    }

    // Stable ordering for the surface's theme picker.
    themes.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(themes)
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use uuid::Uuid;

    fn temp_theme_dir() -> PathBuf {
        let dir = std::env::temp_dir().join(format!("veneer_themes_{}", Uuid::new_v4()));
        std::fs::create_dir_all(&dir).expect("create temp dir");
        dir
    }

    fn install_theme(root: &Path, name: &str, body: &str) {
        let dir = root.join(name);
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("theme.json"), body).unwrap();
    }

    #[test]
    fn test_discovers_directories_containing_theme_json() {
        // Arrange
        let root = temp_theme_dir();
        install_theme(&root, "dark", r#"{ "main": { "layout": "grid" } }"#);
        install_theme(&root, "light", r#"{ "main": { "layout": "list" } }"#);
        std::fs::create_dir_all(root.join("not-a-theme")).unwrap();

        // Act
        let themes = discover_themes(&root).expect("discover");

        // Assert – sorted by name, bare directory skipped
        let names: Vec<_> = themes.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, ["dark", "light"]);

        std::fs::remove_dir_all(&root).ok();
    }

    #[test]
    fn test_missing_root_yields_empty_list() {
        let root = std::env::temp_dir().join(format!("veneer_absent_{}", Uuid::new_v4()));
        let themes = discover_themes(&root).expect("discover");
        assert!(themes.is_empty());
    }

    #[test]
    fn test_discovery_does_not_judge_theme_content() {
        // An unusable theme file is still discovered; validation happens at
        // activation time.
        let root = temp_theme_dir();
        install_theme(&root, "broken", r#"{ "main": {} }"#);

        let themes = discover_themes(&root).expect("discover");
        assert_eq!(themes.len(), 1);
        assert_eq!(themes[0].name, "broken");

        std::fs::remove_dir_all(&root).ok();
    }
}
