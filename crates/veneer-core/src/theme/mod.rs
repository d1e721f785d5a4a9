//! Theme configuration types and the pre-activation validator.

pub mod types;
pub mod validation;

pub use types::{ActiveTheme, PageConfiguration, ThemeConfiguration};
pub use validation::{validate_theme, ThemeValidation};
