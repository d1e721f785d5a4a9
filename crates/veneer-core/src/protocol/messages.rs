//! All bridge protocol message types.
//!
//! The view process never touches the filesystem; everything it needs it
//! requests from the host over the bridge.  The call surface is deliberately
//! tiny: the full configuration payload, path joining (the view must not
//! guess at platform separators), raw file bytes, and parsed JSON documents.
//!
//! # JSON discriminant
//!
//! Every message is an object with a `"type"` field identifying the variant;
//! all other fields are flattened into the same object:
//!
//! ```json
//! {"type":"RequestJsonFile","path":"/themes/dark/theme.json"}
//! ```
//!
//! Serde's `#[serde(tag = "type")]` attribute handles this automatically.
//! The in-process channel transport never serializes these messages, but the
//! derives keep the boundary transport-agnostic: a socket- or pipe-backed
//! bridge can carry the same types unchanged.
//!
//! # Why separate request and response enums?
//!
//! Requests only travel view → host and responses only host → view.  Two
//! distinct enums make it a compile-time error to send a response where a
//! request belongs, and vice versa.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::schema::ClientConfiguration;

// ── Requests (view → host) ────────────────────────────────────────────────────

/// All requests the view may send over the bridge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum BridgeRequest {
    /// Full configuration payload: constants, dynamic settings, theme list.
    GetConfiguration,
    /// Join path segments with the host platform's separator.
    PathJoin { segments: Vec<String> },
    /// Raw bytes of a file under the host's control (theme assets, images).
    RequestLocalFile { path: String },
    /// A file parsed as one JSON document (theme configurations).
    RequestJsonFile { path: String },
}

impl BridgeRequest {
    /// Short name used in logs and error messages.
    pub fn name(&self) -> &'static str {
        match self {
            BridgeRequest::GetConfiguration => "get-configuration",
            BridgeRequest::PathJoin { .. } => "path-join",
            BridgeRequest::RequestLocalFile { .. } => "request-local-file",
            BridgeRequest::RequestJsonFile { .. } => "request-json-file",
        }
    }
}

// ── Responses (host → view) ───────────────────────────────────────────────────

/// Successful responses, one variant per request kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum BridgeResponse {
    Configuration { configuration: ClientConfiguration },
    Path { path: String },
    FileBytes { data: Vec<u8> },
    Json { value: serde_json::Value },
}

/// Failure reported by the host for one request.
///
/// Faults are data, not transport errors: the channel delivered the request
/// and the host answered, but the answer is "that failed".  They carry only
/// display strings so they stay serializable across any transport.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum BridgeFault {
    /// The host has no configuration value yet.
    #[error("configuration is not loaded")]
    NotLoaded,
    /// A file could not be read.
    #[error("failed to read {path}: {detail}")]
    Io { path: String, detail: String },
    /// A file was read but could not be parsed as JSON.
    #[error("failed to parse {path}: {detail}")]
    Parse { path: String, detail: String },
}

// ── Push event (host → view) ──────────────────────────────────────────────────

/// Payload of the `config-reload` push delivered to every presentation
/// surface after the host installs a new configuration value.
///
/// `generation` increases monotonically with each reload, stamped at trigger
/// time.  Consumers replace their cached configuration wholesale; applying
/// the same push twice is harmless.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfigPush {
    pub generation: u64,
    pub configuration: ClientConfiguration,
}

// ── Tests ─────────────────────────────────────────────────────────────────────
