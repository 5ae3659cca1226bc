//! Network connectivity precondition.

use async_trait::async_trait;
use std::time::Duration;
use tokio::net::TcpStream;
use tracing::debug;

/// Reports whether the records API is likely reachable.
#[async_trait]
pub trait NetworkProbe: Send + Sync {
    async fn is_online(&self) -> bool;
}

/// Probe that always reports connectivity.
#[derive(Debug, Clone, Copy, Default)]
pub struct AlwaysOnline;

#[async_trait]
impl NetworkProbe for AlwaysOnline {
    async fn is_online(&self) -> bool {
        true
    }
}

/// Probe that opens a TCP connection to `host:port`.
#[derive(Debug, Clone)]
pub struct TcpProbe {
    addr: String,
    timeout: Duration,
}

impl TcpProbe {
    pub fn new(addr: impl Into<String>, timeout_ms: u64) -> Self {
        Self {
            addr: addr.into(),
            timeout: Duration::from_millis(timeout_ms.max(1)),
        }
    }
}

#[async_trait]
impl NetworkProbe for TcpProbe {
    async fn is_online(&self) -> bool {
        match tokio::time::timeout(self.timeout, TcpStream::connect(&self.addr)).await {
            Ok(Ok(_)) => true,
            Ok(Err(e)) => {
                debug!(addr = %self.addr, "network probe failed: {e}");
                false
            }
            Err(_) => {
                debug!(addr = %self.addr, "network probe timed out");
                false
            }
        }
    }
}
