pub mod presentation;
pub mod session;
pub mod workflow;

pub use crate::domain::model::{DisplayUnit, WorkflowResult};
pub use crate::domain::ports::{ConfigProvider, GeocodingService, QueryStore, WeatherService};
pub use crate::utils::error::Result;
