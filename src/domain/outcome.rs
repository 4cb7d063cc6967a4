use chrono::{DateTime, Utc};
use serde::Serialize;

/// Classification of one resource in a check run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "reason", rename_all = "snake_case")]
pub enum Outcome {
    Skipped,
    Connected,
    Failed(String),
    ConstructionError(String),
}

impl Outcome {
    /// Status column text
    pub fn status(&self) -> String {
        match self {
            Self::Skipped => "Skipped".to_string(),
            Self::Connected => "Connected".to_string(),
            Self::Failed(reason) => format!("Failed: {}", reason),
            Self::ConstructionError(reason) => format!("Error: {}", reason),
        }
    }

    pub fn is_healthy(&self) -> bool {
        matches!(self, Self::Connected | Self::Skipped)
    }
}

/// One report row
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckResult {
    pub name: String,
    pub kind: String,
    pub description: String,
    pub outcome: Outcome,
}

impl CheckResult {
    pub fn new(
        name: impl Into<String>,
        kind: impl Into<String>,
        description: impl Into<String>,
        outcome: Outcome,
    ) -> Self {
        Self {
            name: name.into(),
            kind: kind.into(),
            description: description.into(),
            outcome,
        }
    }

    /// Name, Type, Description, Status
    pub fn columns(&self) -> [String; 4] {
        [
            self.name.clone(),
            self.kind.clone(),
            self.description.clone(),
            self.outcome.status(),
        ]
    }
}

/// Result of one full check run
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub checked_at: DateTime<Utc>,
    pub results: Vec<CheckResult>,
}

impl Report {
    pub fn new(results: Vec<CheckResult>) -> Self {
        Self {
            checked_at: Utc::now(),
            results,
        }
    }

    #[cfg(test)]
    pub fn with_timestamp(mut self, checked_at: DateTime<Utc>) -> Self {
        self.checked_at = checked_at;
        self
    }

    pub fn count_where(&self, predicate: impl Fn(&Outcome) -> bool) -> usize {
        self.results.iter().filter(|r| predicate(&r.outcome)).count()
    }
}
