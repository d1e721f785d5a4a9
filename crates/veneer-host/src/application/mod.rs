//! Application layer: configuration ownership and reload propagation.
//!
//! This layer holds the host's policy decisions — what happens when the
//! configuration file is malformed, when surfaces get notified, in what
//! order reloads are allowed to land.  It depends on the infrastructure
//! layer only through narrow seams (the file loader and the alert sink).

pub mod broadcast;
pub mod config_store;

pub use broadcast::ReloadBroadcaster;
pub use config_store::{ConfigStore, LoadStatus};
