use async_trait::async_trait;

use crate::domain::{ConnectionError, MySqlProbe, TableCount};

/// Port for listing tables and row counts of a database
#[async_trait]
pub trait TableInventory: Send + Sync {
    /// Row count per table, in the order the server lists them.
    /// A table whose count fails is reported with `rows == -1`.
    async fn table_counts(&self, probe: &MySqlProbe) -> Result<Vec<TableCount>, ConnectionError>;
}
