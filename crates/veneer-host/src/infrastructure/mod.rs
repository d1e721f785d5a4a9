//! Infrastructure layer: filesystem, alert presentation, bridge service,
//! and file watching.

pub mod alerts;
pub mod bridge;
pub mod storage;
pub mod watcher;
