//! Configuration document model shared by the host and view processes.

pub mod keys;
pub mod schema;

pub use keys::{CLIENT_CONFIGURATION, THEME_CONFIGURATION};
pub use schema::{
    ClientConfiguration, ConfigConstants, DynamicSettings, LoadingOverride, ThemeDescriptor,
};
