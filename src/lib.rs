pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;
pub use config::AppConfig;

pub use adapters::{FileQueryStore, MemoryQueryStore, OpenMeteoClient};
pub use self::core::{session::SearchSession, workflow::SearchWorkflow};
pub use domain::conditions::{describe_condition, ConditionDescriptor};
pub use domain::model::{DisplayUnit, WorkflowResult};
pub use utils::error::{LookupError, Result};
