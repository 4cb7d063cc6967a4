use async_trait::async_trait;
use sqlx::mysql::{MySqlConnectOptions, MySqlConnection};
use sqlx::Connection;
use tracing::{debug, warn};

use crate::domain::{ConnectionError, MySqlProbe, TableCount};
use crate::ports::TableInventory;

fn connect_options(probe: &MySqlProbe) -> MySqlConnectOptions {
    let mut options = MySqlConnectOptions::new()
        .host(&probe.host)
        .port(probe.port)
        .username(&probe.user);
    if !probe.password.is_empty() {
        options = options.password(&probe.password);
    }
    if !probe.database.is_empty() {
        options = options.database(&probe.database);
    }
    options
}

async fn open(probe: &MySqlProbe) -> Result<MySqlConnection, ConnectionError> {
    let options = connect_options(probe);
    match tokio::time::timeout(MySqlProbe::CONNECT_TIMEOUT, MySqlConnection::connect_with(&options)).await {
        Ok(Ok(conn)) => Ok(conn),
        Ok(Err(e)) => Err(ConnectionError::MySqlOpen(e.to_string())),
        Err(_) => Err(ConnectionError::MySqlOpen(format!(
            "connect timed out after {}",
            humantime::format_duration(MySqlProbe::CONNECT_TIMEOUT)
        ))),
    }
}

async fn close(conn: MySqlConnection) {
    if let Err(e) = conn.close().await {
        debug!("MySQL connection did not close cleanly: {}", e);
    }
}

/// Open a connection and ping it
pub async fn attempt(probe: &MySqlProbe) -> Result<(), ConnectionError> {
    let mut conn = open(probe).await?;
    let ping = conn
        .ping()
        .await
        .map_err(|e| ConnectionError::MySqlPing(e.to_string()));
    close(conn).await;
    ping
}

/// Table row counts read over a single MySQL connection
#[derive(Debug, Clone, Default)]
pub struct MySqlInventory;

impl MySqlInventory {
    pub fn new() -> Self {
        Self
    }

    async fn count_tables(conn: &mut MySqlConnection) -> Result<Vec<TableCount>, ConnectionError> {
        let tables: Vec<String> = sqlx::query_scalar("SHOW TABLES")
            .fetch_all(&mut *conn)
            .await
            .map_err(|e| ConnectionError::MySqlQuery(e.to_string()))?;

        let mut counts = Vec::with_capacity(tables.len());
        for table in tables {
            let sql = format!("SELECT COUNT(*) FROM {}", quote_identifier(&table));
            match sqlx::query_scalar::<_, i64>(&sql).fetch_one(&mut *conn).await {
                Ok(rows) => counts.push(TableCount::new(table, rows)),
                Err(e) => {
                    warn!(table = %table, "Failed to count rows: {}", e);
                    counts.push(TableCount::unknown(table));
                }
            }
        }
        Ok(counts)
    }
}

#[async_trait]
impl TableInventory for MySqlInventory {
    async fn table_counts(&self, probe: &MySqlProbe) -> Result<Vec<TableCount>, ConnectionError> {
        let mut conn = open(probe).await?;
        let counts = Self::count_tables(&mut conn).await;
        close(conn).await;
        counts
    }
}

fn quote_identifier(name: &str) -> String {
    format!("`{}`", name.replace('`', "``"))
}
