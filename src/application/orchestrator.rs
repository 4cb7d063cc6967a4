use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, info, warn};

use crate::config::Connections;
use crate::domain::{CheckResult, Outcome, Report};
use crate::ports::Connector;

use super::ResourceFactory;

/// Sequential driver turning configured resources into report rows
pub struct CheckService {
    factory: ResourceFactory,
    connector: Arc<dyn Connector>,
}

impl CheckService {
    pub fn new(factory: ResourceFactory, connector: Arc<dyn Connector>) -> Self {
        Self { factory, connector }
    }

    /// Check every configured resource, one at a time, in name order.
    /// Produces exactly one row per resource; per-resource failures never abort the run.
    pub async fn run(&self, connections: &Connections) -> Report {
        let mut results = Vec::with_capacity(connections.len());

        for (name, entry) in connections {
            let kind = entry.kind().to_string();

            let materialized = entry
                .descriptor()
                .and_then(|descriptor| self.factory.materialize(name, &descriptor));
            let resource = match materialized {
                Ok(resource) => resource,
                Err(e) => {
                    warn!(resource = %name, kind = %kind, "Invalid resource: {}", e);
                    results.push(CheckResult::new(
                        name,
                        kind,
                        "",
                        Outcome::ConstructionError(e.to_string()),
                    ));
                    continue;
                }
            };

            let kind = resource.kind.to_string();
            let description = resource.probe.describe();

            if !resource.checked {
                debug!(resource = %resource.name, "Skipping unchecked resource");
                results.push(CheckResult::new(resource.name, kind, description, Outcome::Skipped));
                continue;
            }

            let started = Instant::now();
            let outcome = match self.connector.attempt(&resource.probe).await {
                Ok(()) => Outcome::Connected,
                Err(e) => Outcome::Failed(e.to_string()),
            };
            info!(
                resource = %resource.name,
                kind = %kind,
                elapsed_ms = started.elapsed().as_millis() as u64,
                timeout_ms = resource.attempt_timeout().as_millis() as u64,
                status = %outcome.status(),
                "Checked resource"
            );

            results.push(CheckResult::new(resource.name, kind, description, outcome));
        }

        Report::new(results)
    }
}
