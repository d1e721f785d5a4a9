//! Veneer host library: the privileged-process half of the shell.
//!
//! Owns the configuration file and theme assets on disk, decides the
//! load/reload failure policy, and serves presentation surfaces over the
//! bridge.

pub mod application;
pub mod infrastructure;
