pub(crate) mod config;
pub use config::{
    AppConfig, AppConfigError, IndexConfig, IndexMode, ScoringConfig, StagedConfig,
};

pub(crate) mod token;
pub use token::{Token, TokenError};

/// Position of an item in the indexed collection.
pub type ItemId = u32;
