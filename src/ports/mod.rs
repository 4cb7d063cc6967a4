pub mod connector;
pub mod report_sink;
pub mod table_inventory;

pub use connector::Connector;
pub use report_sink::ReportSink;
pub use table_inventory::TableInventory;
