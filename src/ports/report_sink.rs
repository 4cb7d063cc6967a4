use crate::domain::Report;

/// Port for rendering a finished check run
pub trait ReportSink {
    fn render(&mut self, report: &Report) -> std::io::Result<()>;
}
