//! Scripted in-memory bridge for driving the runtime without a host.
//!
//! Joins paths with `/` regardless of platform so scripted file paths in
//! tests stay readable and deterministic.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;

use veneer_core::{Bridge, BridgeCallError, BridgeFault, ClientConfiguration};

/// An in-memory [`Bridge`] serving a fixed configuration and a scripted set
/// of files.
pub struct MockBridge {
    configuration: Option<ClientConfiguration>,
    json_files: Mutex<HashMap<String, serde_json::Value>>,
    local_files: Mutex<HashMap<String, Vec<u8>>>,
    json_delays: Mutex<HashMap<String, Duration>>,
}

impl MockBridge {
    /// A bridge whose host serves `configuration`.
    pub fn new(configuration: ClientConfiguration) -> Self {
        Self {
            configuration: Some(configuration),
            json_files: Mutex::new(HashMap::new()),
            local_files: Mutex::new(HashMap::new()),
            json_delays: Mutex::new(HashMap::new()),
        }
    }

    /// A bridge whose host has no configuration yet; `get-configuration`
    /// faults with [`BridgeFault::NotLoaded`].
    pub fn unavailable() -> Self {
        Self {
            configuration: None,
            json_files: Mutex::new(HashMap::new()),
            local_files: Mutex::new(HashMap::new()),
            json_delays: Mutex::new(HashMap::new()),
        }
    }

    /// Scripts the JSON document served for `path`.
    pub fn insert_json_file(&self, path: &str, value: serde_json::Value) {
        self.json_files
            .lock()
            .expect("json files lock")
            .insert(path.to_string(), value);
    }

    /// Scripts the raw bytes served for `path`.
    pub fn insert_local_file(&self, path: &str, data: Vec<u8>) {
        self.local_files
            .lock()
            .expect("local files lock")
            .insert(path.to_string(), data);
    }

    /// Makes `request-json-file` for `path` resolve only after `delay`,
    /// for exercising stale-response handling.
    pub fn delay_json_file(&self, path: &str, delay: Duration) {
        self.json_delays
            .lock()
            .expect("delays lock")
            .insert(path.to_string(), delay);
    }

    fn missing(path: &str) -> BridgeCallError {
        BridgeCallError::Fault(BridgeFault::Io {
            path: path.to_string(),
            detail: "no such scripted file".to_string(),
        })
    }
}

#[async_trait]
impl Bridge for MockBridge {
    async fn get_configuration(&self) -> Result<ClientConfiguration, BridgeCallError> {
        self.configuration
            .clone()
            .ok_or(BridgeCallError::Fault(BridgeFault::NotLoaded))
    }

    async fn path_join(&self, segments: &[String]) -> Result<String, BridgeCallError> {
        Ok(segments.join("/"))
    }

    async fn request_local_file(&self, path: &str) -> Result<Vec<u8>, BridgeCallError> {
        self.local_files
            .lock()
            .expect("local files lock")
            .get(path)
            .cloned()
            .ok_or_else(|| Self::missing(path))
    }

    async fn request_json_file(&self, path: &str) -> Result<serde_json::Value, BridgeCallError> {
        let delay = self
            .json_delays
            .lock()
            .expect("delays lock")
            .get(path)
            .copied();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        self.json_files
            .lock()
            .expect("json files lock")
            .get(path)
            .cloned()
            .ok_or_else(|| Self::missing(path))
    }
}
