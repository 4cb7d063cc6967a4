pub mod http;
pub mod mysql;
pub mod pubsub;
pub mod redis;

use async_trait::async_trait;
use tracing::debug;

use crate::domain::{ConnectionError, Probe};
use crate::ports::Connector;

pub use mysql::MySqlInventory;

impl Probe {
    /// Make exactly one connection attempt, bounded by the probe's timeout
    pub async fn attempt_connection(&self) -> Result<(), ConnectionError> {
        let timeout = self.timeout();
        let attempt = async {
            match self {
                Probe::Http(p) => http::attempt(p).await,
                Probe::MySql(p) => mysql::attempt(p).await,
                Probe::Redis(p) => redis::attempt(p).await,
                Probe::PubSub(p) => pubsub::attempt(p).await,
            }
        };

        tokio::time::timeout(timeout, attempt)
            .await
            .map_err(|_| ConnectionError::Timeout {
                operation: self.operation(),
                timeout,
            })?
    }

    fn operation(&self) -> &'static str {
        match self {
            Probe::Http(_) => "HTTP request",
            Probe::MySql(_) => "MySQL check",
            Probe::Redis(_) => "Redis ping",
            Probe::PubSub(_) => "Pub/Sub topic check",
        }
    }
}

/// Connector backed by the real network clients
#[derive(Debug, Clone, Copy, Default)]
pub struct LiveConnector;

#[async_trait]
impl Connector for LiveConnector {
    async fn attempt(&self, probe: &Probe) -> Result<(), ConnectionError> {
        debug!(target_resource = %probe.describe(), "Attempting connection");
        probe.attempt_connection().await
    }
}
