use std::io::Write;

use comfy_table::presets::UTF8_FULL;
use comfy_table::{Cell, Color, Table};

use crate::domain::{DatabaseSummary, Outcome, Report};
use crate::ports::ReportSink;

const HEADER: [&str; 4] = ["Name", "Type", "Description", "Status"];

/// Renders reports as box-drawn tables
pub struct TableSink<W: Write> {
    out: W,
    colored: bool,
}

impl TableSink<std::io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(std::io::stdout(), true)
    }
}

impl<W: Write> TableSink<W> {
    pub fn new(out: W, colored: bool) -> Self {
        Self { out, colored }
    }

    #[cfg(test)]
    pub fn into_inner(self) -> W {
        self.out
    }

    fn table(&self) -> Table {
        let mut table = Table::new();
        table.load_preset(UTF8_FULL);
        if !self.colored {
            table.force_no_tty();
        }
        table
    }

    fn status_cell(&self, outcome: &Outcome, status: String) -> Cell {
        let cell = Cell::new(status);
        if !self.colored {
            return cell;
        }
        match outcome {
            Outcome::Skipped => cell.fg(Color::Yellow),
            Outcome::Connected => cell.fg(Color::Green),
            Outcome::Failed(_) | Outcome::ConstructionError(_) => cell.fg(Color::Red),
        }
    }

    /// One table per database with its row counts
    pub fn render_summaries(&mut self, summaries: &[DatabaseSummary]) -> std::io::Result<()> {
        for summary in summaries {
            writeln!(self.out, "\nConnection: {}\nDSN: {}", summary.name, summary.dsn)?;

            match &summary.tables {
                Ok(tables) => {
                    let mut table = self.table();
                    table.set_header(vec!["Table", "Rows"]);
                    for count in tables {
                        table.add_row(vec![count.table.clone(), count.rows.to_string()]);
                    }
                    writeln!(self.out, "{table}")?;
                }
                Err(reason) => writeln!(self.out, "Error: {}", reason)?,
            }
        }
        self.out.flush()
    }
}

impl<W: Write> ReportSink for TableSink<W> {
    fn render(&mut self, report: &Report) -> std::io::Result<()> {
        let mut table = self.table();
        table.set_header(HEADER.to_vec());

        for result in &report.results {
            let [name, kind, description, status] = result.columns();
            table.add_row(vec![
                Cell::new(name),
                Cell::new(kind),
                Cell::new(description),
                self.status_cell(&result.outcome, status),
            ]);
        }

        writeln!(self.out, "{table}")?;
        self.out.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{CheckResult, TableCount};

    fn render(report: &Report) -> String {
        let mut sink = TableSink::new(Vec::new(), false);
        sink.render(report).unwrap();
        String::from_utf8(sink.into_inner()).unwrap()
    }

    #[test]
    fn test_render_rows() {
        let report = Report::new(vec![
            CheckResult::new("api", "http", "GET:http://api", Outcome::Connected),
            CheckResult::new("cache", "redis", "redis://cache:6379/0", Outcome::Skipped),
            CheckResult::new(
                "legacy",
                "mongodb",
                "",
                Outcome::ConstructionError("unsupported resource type: mongodb".to_string()),
            ),
        ]);

        let output = render(&report);
        for expected in [
            "Name",
            "Status",
            "GET:http://api",
            "Connected",
            "Skipped",
            "Error: unsupported resource type: mongodb",
        ] {
            assert!(output.contains(expected), "missing {expected:?} in\n{output}");
        }
        assert!(!output.contains('\u{1b}'), "plain output must not carry ANSI codes");
    }

    #[test]
    fn test_render_empty_report_has_header() {
        let output = render(&Report::new(Vec::new()));
        assert!(output.contains("Description"));
    }

    #[test]
    fn test_render_summaries() {
        let summaries = vec![
            DatabaseSummary {
                name: "orders".to_string(),
                dsn: "mysql://app@db:3306/orders".to_string(),
                tables: Ok(vec![TableCount::new("customers", 42), TableCount::unknown("broken")]),
            },
            DatabaseSummary {
                name: "reports".to_string(),
                dsn: "mysql://app@db:3306/reports".to_string(),
                tables: Err("failed to connect to MySQL: refused".to_string()),
            },
        ];

        let mut sink = TableSink::new(Vec::new(), false);
        sink.render_summaries(&summaries).unwrap();
        let output = String::from_utf8(sink.into_inner()).unwrap();

        assert!(output.contains("Connection: orders"));
        assert!(output.contains("customers"));
        assert!(output.contains("42"));
        assert!(output.contains("-1"));
        assert!(output.contains("Error: failed to connect to MySQL: refused"));
    }
}
