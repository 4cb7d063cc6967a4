mod json;
mod table;

pub use json::JsonSink;
pub use table::TableSink;
