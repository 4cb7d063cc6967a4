pub mod probe;
pub mod report;

pub use probe::{LiveConnector, MySqlInventory};
pub use report::{JsonSink, TableSink};
