pub mod factory;
pub mod orchestrator;
pub mod summary;

pub use factory::{AmbientCredentials, ResourceFactory};
pub use orchestrator::CheckService;
pub use summary::SummaryService;
