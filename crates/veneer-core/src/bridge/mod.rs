//! The bridge: a typed, correlated request/response channel between the
//! privileged host process and a presentation surface.
//!
//! # Design
//!
//! The two sides share no memory.  The view holds a [`BridgeClient`], the
//! host holds the matching [`BridgeServer`]; between them run exactly two
//! pipes:
//!
//! ```text
//! view                                   host
//!  BridgeClient --- RequestEnvelope --->  BridgeServer.requests
//!  BridgeClient <-- Option<ConfigPush> -- BridgeServer.pushes
//! ```
//!
//! # Request/response correlation (for beginners)
//!
//! A naive bidirectional channel forces the client to match responses to
//! requests by hand, and two concurrent calls can receive each other's
//! answers.  Here every [`RequestEnvelope`] carries its own single-use reply
//! channel (`tokio::sync::oneshot`): the host answers into the envelope it
//! took the request from, so a response can only ever reach the call that
//! asked for it.  This gives at-most-once, per-call-correlated responses
//! with no ordering guarantee between *independent* calls — two calls issued
//! concurrently may resolve in either order, and callers must not assume
//! otherwise.
//!
//! # The push pipe
//!
//! Reload pushes travel the other way on a `tokio::sync::watch` channel.
//! `watch` keeps only the most recent value: a surface that falls behind
//! skips straight to the latest configuration ("latest wins") but can never
//! observe pushes out of chronological order.

use async_trait::async_trait;
use thiserror::Error;
use tokio::sync::{mpsc, oneshot, watch};

use crate::config::schema::ClientConfiguration;
use crate::protocol::messages::{BridgeFault, BridgeRequest, BridgeResponse, ConfigPush};

/// Default request-queue depth used by the binaries.
pub const DEFAULT_REQUEST_CAPACITY: usize = 32;

// ── Errors ────────────────────────────────────────────────────────────────────

/// Errors a bridge call can produce on the client side.
#[derive(Debug, Error)]
pub enum BridgeCallError {
    /// The host side of the bridge is gone (channel closed before or while
    /// the call was in flight).
    #[error("bridge channel closed")]
    ChannelClosed,

    /// The host answered with a response variant that does not belong to
    /// the request.  Indicates a host-side bug, not a caller mistake.
    #[error("unexpected bridge response for {request}")]
    UnexpectedResponse { request: &'static str },

    /// The host processed the request and reported a failure.
    #[error(transparent)]
    Fault(#[from] BridgeFault),
}

// ── Call surface ──────────────────────────────────────────────────────────────

/// The bridge call surface consumed by the presentation process.
///
/// [`BridgeClient`] is the channel-backed implementation; tests mock this
/// trait to drive the runtime without a host.
#[async_trait]
pub trait Bridge: Send + Sync {
    /// `get-configuration`: the full configuration payload.
    async fn get_configuration(&self) -> Result<ClientConfiguration, BridgeCallError>;

    /// `path-join`: joins segments with the host platform's separator.
    async fn path_join(&self, segments: &[String]) -> Result<String, BridgeCallError>;

    /// `request-local-file`: raw bytes of a host-controlled file.
    async fn request_local_file(&self, path: &str) -> Result<Vec<u8>, BridgeCallError>;

    /// `request-json-file`: a host-controlled file parsed as JSON.
    async fn request_json_file(&self, path: &str) -> Result<serde_json::Value, BridgeCallError>;
}

// ── Transport types ───────────────────────────────────────────────────────────

/// One request in flight: the request itself plus the single-use channel the
/// host must answer into.
#[derive(Debug)]
pub struct RequestEnvelope {
    pub request: BridgeRequest,
    pub respond_to: oneshot::Sender<Result<BridgeResponse, BridgeFault>>,
}

/// View-side handle: issues correlated requests and exposes the reload feed.
#[derive(Debug, Clone)]
pub struct BridgeClient {
    requests: mpsc::Sender<RequestEnvelope>,
    pushes: watch::Receiver<Option<ConfigPush>>,
}

/// Host-side endpoints handed to the bridge service and the broadcaster.
#[derive(Debug)]
pub struct BridgeServer {
    /// Stream of incoming request envelopes to answer.
    pub requests: mpsc::Receiver<RequestEnvelope>,
    /// Sender for `config-reload` pushes to this surface.
    pub pushes: watch::Sender<Option<ConfigPush>>,
}

/// Creates a connected client/server pair.
///
/// `capacity` bounds the request queue; a view issuing more than `capacity`
/// concurrent requests backpressures at the `await` point rather than
/// growing without bound.
pub fn channel(capacity: usize) -> (BridgeClient, BridgeServer) {
    let (request_tx, request_rx) = mpsc::channel(capacity);
    // Surfaces start with no configuration; the first push replaces None.
    let (push_tx, push_rx) = watch::channel(None);

    (
        BridgeClient {
            requests: request_tx,
            pushes: push_rx,
        },
        BridgeServer {
            requests: request_rx,
            pushes: push_tx,
        },
    )
}

impl BridgeClient {
    /// Sends one request and awaits its correlated response.
    async fn call(&self, request: BridgeRequest) -> Result<BridgeResponse, BridgeCallError> {
        let name = request.name();
        let (respond_to, response) = oneshot::channel();

        self.requests
            .send(RequestEnvelope {
                request,
                respond_to,
            })
            .await
            .map_err(|_| BridgeCallError::ChannelClosed)?;

        tracing::trace!(request = name, "bridge call sent");

        match response.await {
            Ok(Ok(response)) => Ok(response),
            Ok(Err(fault)) => Err(fault.into()),
            // The host dropped the envelope without answering.
            Err(_) => Err(BridgeCallError::ChannelClosed),
        }
    }

    /// Returns a receiver for `config-reload` pushes.
    ///
    /// Each receiver independently observes the latest push; reading is
    /// non-destructive for other subscribers.
    pub fn subscribe_reloads(&self) -> watch::Receiver<Option<ConfigPush>> {
        self.pushes.clone()
    }
}

#[async_trait]
impl Bridge for BridgeClient {
    async fn get_configuration(&self) -> Result<ClientConfiguration, BridgeCallError> {
        match self.call(BridgeRequest::GetConfiguration).await? {
            BridgeResponse::Configuration { configuration } => Ok(configuration),
            _ => Err(BridgeCallError::UnexpectedResponse {
                request: "get-configuration",
            }),
        }
    }

    async fn path_join(&self, segments: &[String]) -> Result<String, BridgeCallError> {
        let request = BridgeRequest::PathJoin {
            segments: segments.to_vec(),
        };
        match self.call(request).await? {
            BridgeResponse::Path { path } => Ok(path),
            _ => Err(BridgeCallError::UnexpectedResponse {
                request: "path-join",
            }),
        }
    }

    async fn request_local_file(&self, path: &str) -> Result<Vec<u8>, BridgeCallError> {
        let request = BridgeRequest::RequestLocalFile {
            path: path.to_string(),
        };
        match self.call(request).await? {
            BridgeResponse::FileBytes { data } => Ok(data),
            _ => Err(BridgeCallError::UnexpectedResponse {
                request: "request-local-file",
            }),
        }
    }

    async fn request_json_file(&self, path: &str) -> Result<serde_json::Value, BridgeCallError> {
        let request = BridgeRequest::RequestJsonFile {
            path: path.to_string(),
        };
        match self.call(request).await? {
            BridgeResponse::Json { value } => Ok(value),
            _ => Err(BridgeCallError::UnexpectedResponse {
                request: "request-json-file",
            }),
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
