use std::sync::Arc;

use tracing::warn;

use crate::config::Connections;
use crate::domain::{DatabaseSummary, Probe, ResourceKind};
use crate::ports::TableInventory;

use super::ResourceFactory;

/// Collects table row counts for every configured MySQL resource
pub struct SummaryService {
    factory: ResourceFactory,
    inventory: Arc<dyn TableInventory>,
}

impl SummaryService {
    pub fn new(factory: ResourceFactory, inventory: Arc<dyn TableInventory>) -> Self {
        Self { factory, inventory }
    }

    /// One summary per MySQL resource, in name order. Other kinds are ignored.
    pub async fn run(&self, connections: &Connections) -> Vec<DatabaseSummary> {
        let mut summaries = Vec::new();

        for (name, entry) in connections {
            if entry.kind() != ResourceKind::MySql {
                continue;
            }

            let materialized = entry
                .descriptor()
                .and_then(|descriptor| self.factory.materialize(name, &descriptor));
            let probe = match materialized {
                Ok(resource) => match resource.probe {
                    Probe::MySql(probe) => probe,
                    _ => continue,
                },
                Err(e) => {
                    warn!(resource = %name, "Invalid resource: {}", e);
                    continue;
                }
            };

            let dsn = probe.dsn();
            let tables = self
                .inventory
                .table_counts(&probe)
                .await
                .map_err(|e| e.to_string());
            if let Err(reason) = &tables {
                warn!(resource = %name, "Table summary failed: {}", reason);
            }

            summaries.push(DatabaseSummary {
                name: name.clone(),
                dsn,
                tables,
            });
        }

        summaries
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;

    use super::*;
    use crate::domain::{ConnectionError, MySqlProbe, ResourceDescriptor, TableCount};

    #[derive(Default)]
    struct FakeInventory {
        seen: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl TableInventory for FakeInventory {
        async fn table_counts(&self, probe: &MySqlProbe) -> Result<Vec<TableCount>, ConnectionError> {
            self.seen.lock().unwrap().push(probe.host.clone());
            if probe.host == "down" {
                return Err(ConnectionError::MySqlOpen("connection refused".to_string()));
            }
            Ok(vec![TableCount::new("users", 10), TableCount::unknown("audit")])
        }
    }

    #[tokio::test]
    async fn test_only_mysql_resources_are_summarized() {
        let inventory = Arc::new(FakeInventory::default());
        let connections: Connections = [
            ("b_db", ResourceDescriptor::new("mysql").with_endpoint("up", 3306)),
            ("a_db", ResourceDescriptor::new("mysql").with_endpoint("down", 3306)),
            ("cache", ResourceDescriptor::new("redis").with_endpoint("up", 6379)),
        ]
        .into_iter()
        .map(|(name, d)| (name.to_string(), d.into()))
        .collect();

        let service = SummaryService::new(ResourceFactory::default(), inventory.clone());
        let summaries = service.run(&connections).await;

        assert_eq!(summaries.len(), 2);
        assert_eq!(*inventory.seen.lock().unwrap(), vec!["down", "up"]);

        assert_eq!(summaries[0].name, "a_db");
        assert_eq!(
            summaries[0].tables,
            Err("failed to connect to MySQL: connection refused".to_string())
        );
        assert_eq!(summaries[1].dsn, "mysql://@up:3306/");
        assert_eq!(summaries[1].tables.as_ref().unwrap()[1].rows, -1);
    }
}
