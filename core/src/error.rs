use thiserror::Error;

pub use crate::index::snapshot::error::SnapshotError;
pub use crate::storage::error::StorageError;
pub use crate::types::{AppConfigError, TokenError};

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("snapshot error: {0}")]
    Snapshot(#[from] SnapshotError),

    #[error("config error: {0}")]
    Config(#[from] AppConfigError),

    #[error("invalid token: {0}")]
    Token(#[from] TokenError),
}
