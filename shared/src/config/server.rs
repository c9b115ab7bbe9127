//! HTTP listener settings

use serde::{Deserialize, Serialize};
use std::time::Duration;

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_KEEP_ALIVE_SECS: u64 = 75;
/// Refresh and logout bodies carry a single token
const DEFAULT_MAX_PAYLOAD_BYTES: usize = 16 * 1024;

/// Where the server listens and how it treats connections
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// 0 leaves the worker count to actix (one per core)
    pub workers: usize,
    /// Keep-alive in seconds
    pub keep_alive: u64,
    /// Largest accepted JSON body in bytes
    pub max_payload_size: usize,
}

impl ServerConfig {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            ..Self::default()
        }
    }

    /// `host:port` for `HttpServer::bind`
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn keep_alive_duration(&self) -> Duration {
        Duration::from_secs(self.keep_alive)
    }

    /// Explicit worker count, if one was configured
    pub fn worker_count(&self) -> Option<usize> {
        (self.workers > 0).then_some(self.workers)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: DEFAULT_PORT,
            workers: 0,
            keep_alive: DEFAULT_KEEP_ALIVE_SECS,
            max_payload_size: DEFAULT_MAX_PAYLOAD_BYTES,
        }
    }
}
