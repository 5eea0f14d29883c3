pub mod distance;
pub mod error;
pub mod index;
pub mod storage;
pub mod tokenizer;
pub mod types;

pub use error::{Error, Result};
pub use index::{IndexBuilder, IndexSnapshot, SearchIndex, SnapshotCodec, TokenIndex};
pub use storage::{IndexCache, KeyValueStore, MemoryStore, RedbStore};
pub use types::{
    AppConfig, IndexConfig, IndexMode, ItemId, ScoringConfig, StagedConfig, Token,
};
