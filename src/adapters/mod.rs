// Adapters layer: concrete implementations of the domain ports.

pub mod open_meteo;
pub mod storage;

pub use open_meteo::OpenMeteoClient;
pub use storage::{FileQueryStore, MemoryQueryStore};
