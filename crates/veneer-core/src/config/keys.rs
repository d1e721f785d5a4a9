//! Well-known file names used by both sides of the bridge.

/// File name of the client configuration document, relative to the host's
/// configuration directory.
pub const CLIENT_CONFIGURATION: &str = "config.json";

/// File name of a theme's configuration document, relative to the theme's
/// own directory.
pub const THEME_CONFIGURATION: &str = "theme.json";
