//! # veneer-core
//!
//! Shared library for Veneer containing the configuration document schema,
//! theme descriptor and validation logic, and the bridge protocol that joins
//! the privileged host process to the presentation (view) process.
//!
//! This crate is used by both the host and view sides.  It has zero
//! dependencies on the filesystem, UI frameworks, or process policy.
//!
//! # Architecture overview (for beginners)
//!
//! Veneer is a themeable desktop client shell: a privileged *host* process
//! owns the configuration file and the theme assets on disk, and a sandboxed
//! *view* process renders whichever skin the user selected.  The two sides
//! never share memory; everything the view knows, it learned over the bridge.
//!
//! This crate (`veneer-core`) is the shared foundation.  It defines:
//!
//! - **`config`** – The shape of the configuration document: environment-fixed
//!   `constants`, user-editable `dynamic` settings, and the theme list.
//!
//! - **`theme`** – Theme configuration types plus the pure validator that a
//!   loosely-typed theme file must pass before the view trusts it.
//!
//! - **`protocol`** – The typed request/response messages the view sends over
//!   the bridge, the `config-reload` push payload, and the monotonic sequence
//!   counter used to stamp reload generations and theme-switch tickets.
//!
//! - **`bridge`** – The channel transport itself: a typed request pipe with
//!   per-call response correlation, and the watch pipe that carries reload
//!   pushes from host to view.

pub mod bridge;
pub mod config;
pub mod protocol;
pub mod theme;

// Re-export the most-used types at the crate root so callers can write
// `veneer_core::ClientConfiguration` instead of the full module path.
pub use bridge::{Bridge, BridgeCallError, BridgeClient, BridgeServer, RequestEnvelope};
pub use config::schema::{
    ClientConfiguration, ConfigConstants, DynamicSettings, LoadingOverride, ThemeDescriptor,
};
pub use protocol::messages::{BridgeFault, BridgeRequest, BridgeResponse, ConfigPush};
pub use protocol::sequence::SequenceCounter;
pub use theme::types::{ActiveTheme, PageConfiguration, ThemeConfiguration};
pub use theme::validation::{validate_theme, ThemeValidation};
