use std::sync::Arc;

use clap::{Parser, Subcommand};
use tracing::info;

use crate::adapters::{JsonSink, LiveConnector, MySqlInventory, TableSink};
use crate::application::{CheckService, ResourceFactory, SummaryService};
use crate::config::{self, ReportFormat, Settings};
use crate::domain::Outcome;
use crate::ports::ReportSink;

/// Check connectivity to the databases, caches, HTTP endpoints and topics
/// listed in the resource file
#[derive(Debug, Parser)]
#[command(name = "connprobe", version, about, arg_required_else_help = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Resource checks
    #[command(subcommand)]
    Check(CheckCommand),
}

#[derive(Debug, Subcommand)]
pub enum CheckCommand {
    /// Try to connect to every configured resource and print a status table
    Connection,
    /// Print the row count of every table in each configured MySQL database
    TableSummary,
}

impl Cli {
    /// Run the selected command. Only configuration problems are returned as errors.
    pub async fn run(self, settings: &Settings) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let connections = config::load_connections(&settings.config_path)?;
        info!(
            path = %settings.config_path.display(),
            resources = connections.len(),
            "Loaded resource configuration"
        );

        let factory = ResourceFactory::from_settings(settings);

        match self.command {
            Command::Check(CheckCommand::Connection) => {
                let service = CheckService::new(factory, Arc::new(LiveConnector));
                let report = service.run(&connections).await;
                info!(
                    connected = report.count_where(|o| matches!(o, Outcome::Connected)),
                    unhealthy = report.count_where(|o| !o.is_healthy()),
                    "Check run finished"
                );

                let mut sink: Box<dyn ReportSink> = match settings.report_format {
                    ReportFormat::Table => Box::new(TableSink::stdout()),
                    ReportFormat::Json => Box::new(JsonSink::stdout()),
                };
                sink.render(&report)?;
            }
            Command::Check(CheckCommand::TableSummary) => {
                let service = SummaryService::new(factory, Arc::new(MySqlInventory::new()));
                let summaries = service.run(&connections).await;
                TableSink::stdout().render_summaries(&summaries)?;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_check_connection() {
        let cli = Cli::try_parse_from(["connprobe", "check", "connection"]).unwrap();
        assert!(matches!(cli.command, Command::Check(CheckCommand::Connection)));

        let cli = Cli::try_parse_from(["connprobe", "check", "table-summary"]).unwrap();
        assert!(matches!(cli.command, Command::Check(CheckCommand::TableSummary)));
    }

    #[test]
    fn test_connection_takes_no_flags() {
        assert!(Cli::try_parse_from(["connprobe", "check", "connection", "--all"]).is_err());
        assert!(Cli::try_parse_from(["connprobe"]).is_err());
    }

    #[tokio::test]
    async fn test_missing_config_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let settings = Settings {
            config_path: dir.path().join("default.yaml"),
            ..Settings::default()
        };

        let cli = Cli::try_parse_from(["connprobe", "check", "connection"]).unwrap();
        let err = cli.run(&settings).await.unwrap_err();
        assert!(err.to_string().starts_with("failed to read config file"));
    }
}
