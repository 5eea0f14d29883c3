mod app;
mod index;
mod scoring;
mod staged;

pub use app::{AppConfig, AppConfigError};
pub use index::{IndexConfig, IndexMode};
pub use scoring::ScoringConfig;
pub use staged::StagedConfig;
