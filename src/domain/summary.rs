use serde::Serialize;

/// Row count of one table. `rows` is -1 when counting failed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableCount {
    pub table: String,
    pub rows: i64,
}

impl TableCount {
    pub const UNKNOWN: i64 = -1;

    pub fn new(table: impl Into<String>, rows: i64) -> Self {
        Self {
            table: table.into(),
            rows,
        }
    }

    pub fn unknown(table: impl Into<String>) -> Self {
        Self::new(table, Self::UNKNOWN)
    }
}

/// Table inventory of one configured MySQL resource
#[derive(Debug, Clone, Serialize)]
pub struct DatabaseSummary {
    pub name: String,
    pub dsn: String,
    pub tables: Result<Vec<TableCount>, String>,
}
