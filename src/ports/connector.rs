use async_trait::async_trait;

use crate::domain::{ConnectionError, Probe};

/// Port for making a single connection attempt against a probe's target
#[async_trait]
pub trait Connector: Send + Sync {
    /// Attempt one connection. Any handle opened here is released before returning.
    async fn attempt(&self, probe: &Probe) -> Result<(), ConnectionError>;
}
