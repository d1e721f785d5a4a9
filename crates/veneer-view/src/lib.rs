//! Veneer view library: the presentation-process half of the shell.
//!
//! Never touches the filesystem.  Everything it knows about configuration
//! and themes arrives over the bridge; this crate caches it, gates
//! consumers behind an explicit readiness flag, and guards the single
//! active-theme slot.

pub mod application;
pub mod infrastructure;

pub use application::runtime::{Readiness, Runtime, RuntimeError, ThemeSwitch};
