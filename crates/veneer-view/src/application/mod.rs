//! Application layer: the presentation runtime.

pub mod runtime;

pub use runtime::{Readiness, Runtime, RuntimeError, ThemeSwitch};
