//! Typed view of a theme's configuration document.
//!
//! A theme directory contains a `theme.json` describing the pages the skin
//! renders.  The only structure the core requires is the `main` page with its
//! `layout` field; everything else is theme-defined and carried through
//! opaquely.  A [`ThemeConfiguration`] is only ever constructed from a
//! candidate document that already passed [`super::validation::validate_theme`].

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::config::schema::ThemeDescriptor;

/// Parsed body of a theme's `theme.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThemeConfiguration {
    /// The main page; the entry point every skin must provide.
    pub main: PageConfiguration,
    /// Additional pages and theme-defined sections.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Configuration of one page within a theme.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageConfiguration {
    /// Layout identifier the renderer resolves to a page template.
    pub layout: String,
    /// Widget placements, images, and other theme-defined page fields.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// The currently applied theme: its descriptor from the configuration
/// document plus the validated configuration body loaded from disk.
#[derive(Debug, Clone, PartialEq)]
pub struct ActiveTheme {
    pub descriptor: ThemeDescriptor,
    pub config: ThemeConfiguration,
}

impl ActiveTheme {
    /// Display name of the active theme.
    pub fn name(&self) -> &str {
        &self.descriptor.name
    }
}
