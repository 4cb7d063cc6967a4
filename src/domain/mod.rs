pub mod descriptor;
pub mod error;
pub mod outcome;
pub mod probe;
pub mod resource;
pub mod summary;

pub use descriptor::{ConnectionEntry, ResourceDescriptor};
pub use error::{ConfigError, ConnectionError, ConstructionError};
pub use outcome::{CheckResult, Outcome, Report};
pub use probe::{HttpProbe, MySqlProbe, Probe, PubSubCredentials, PubSubProbe, RedisProbe};
pub use resource::{Resource, ResourceKind};
pub use summary::{DatabaseSummary, TableCount};
