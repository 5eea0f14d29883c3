//! Transport form of a [`SearchIndex`] for external caches.
//!
//! Sets become ascending id lists and keys are kept sorted, so the same index
//! always encodes to the same bytes. Encoded snapshots start with a format
//! version byte and a codec tag:
//!
//! ```text
//! [SNAPSHOT_VERSION][codec tag][payload...]
//! ```

use super::{Fingerprint, SearchIndex, TokenIndex};
use crate::types::{IndexMode, ItemId, Token};
use error::SnapshotError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub mod error {
    use crate::types::ItemId;
    use thiserror::Error;

    #[derive(Debug, Error)]
    pub enum SnapshotError {
        #[error("Encode error: {0}")]
        Encode(String),

        #[error("Postcard decode error: {0}")]
        Postcard(#[from] postcard::Error),

        #[error("JSON decode error: {0}")]
        Json(#[from] serde_json::Error),

        #[error("Snapshot is empty")]
        Empty,

        #[error("Unsupported snapshot version: {0}")]
        UnsupportedVersion(u8),

        #[error("Unknown snapshot codec: {0}")]
        UnknownCodec(u8),

        #[error("Invalid token: {0:?}")]
        InvalidToken(String),

        #[error("Empty posting list for token: {0:?}")]
        EmptyPostings(String),

        #[error("Item id {id} out of range for {item_count} items")]
        IdOutOfRange { id: ItemId, item_count: usize },
    }
}

pub const SNAPSHOT_VERSION: u8 = 2;

/// Payload encoding of a snapshot.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SnapshotCodec {
    #[default]
    Postcard,
    Json,
}

impl SnapshotCodec {
    fn tag(self) -> u8 {
        match self {
            SnapshotCodec::Postcard => 0,
            SnapshotCodec::Json => 1,
        }
    }

    fn from_tag(tag: u8) -> Result<Self, SnapshotError> {
        match tag {
            0 => Ok(SnapshotCodec::Postcard),
            1 => Ok(SnapshotCodec::Json),
            other => Err(SnapshotError::UnknownCodec(other)),
        }
    }
}

type Postings = BTreeMap<String, Vec<ItemId>>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexSnapshot {
    pub mode: IndexMode,
    pub item_count: usize,
    pub fingerprint: Fingerprint,
    pub config_fingerprint: Fingerprint,
    pub words: Postings,
    pub prefixes: Postings,
}

impl IndexSnapshot {
    pub fn capture(index: &SearchIndex) -> Self {
        Self {
            mode: index.mode,
            item_count: index.item_count,
            fingerprint: index.fingerprint,
            config_fingerprint: index.config_fingerprint,
            words: capture_postings(&index.words),
            prefixes: capture_postings(&index.prefixes),
        }
    }

    /// Rebuilds the index, rejecting anything a builder could not have produced.
    pub fn restore(self) -> Result<SearchIndex, SnapshotError> {
        Ok(SearchIndex {
            words: restore_postings(self.words, self.item_count)?,
            prefixes: restore_postings(self.prefixes, self.item_count)?,
            mode: self.mode,
            item_count: self.item_count,
            fingerprint: self.fingerprint,
            config_fingerprint: self.config_fingerprint,
        })
    }

    pub fn to_bytes(&self, codec: SnapshotCodec) -> Result<Vec<u8>, SnapshotError> {
        let header = vec![SNAPSHOT_VERSION, codec.tag()];
        match codec {
            SnapshotCodec::Postcard => postcard::to_extend(self, header)
                .map_err(|e| SnapshotError::Encode(e.to_string())),
            SnapshotCodec::Json => {
                let mut out = header;
                serde_json::to_writer(&mut out, self)
                    .map_err(|e| SnapshotError::Encode(e.to_string()))?;
                Ok(out)
            }
        }
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, SnapshotError> {
        let (version, rest) = bytes.split_first().ok_or(SnapshotError::Empty)?;
        if *version != SNAPSHOT_VERSION {
            return Err(SnapshotError::UnsupportedVersion(*version));
        }
        let (tag, payload) = rest.split_first().ok_or(SnapshotError::Empty)?;

        match SnapshotCodec::from_tag(*tag)? {
            SnapshotCodec::Postcard => Ok(postcard::from_bytes(payload)?),
            SnapshotCodec::Json => Ok(serde_json::from_slice(payload)?),
        }
    }
}

fn capture_postings(index: &TokenIndex) -> Postings {
    index
        .iter()
        .map(|(token, ids)| (token.to_string(), ids.iter().copied().collect()))
        .collect()
}

fn restore_postings(postings: Postings, item_count: usize) -> Result<TokenIndex, SnapshotError> {
    let mut index = TokenIndex::default();

    for (key, ids) in postings {
        if ids.is_empty() {
            return Err(SnapshotError::EmptyPostings(key));
        }
        let token = match Token::try_new(key.clone()) {
            Ok(token) if token.as_str() == key => token,
            _ => return Err(SnapshotError::InvalidToken(key)),
        };
        for id in ids {
            if id as usize >= item_count {
                return Err(SnapshotError::IdOutOfRange { id, item_count });
            }
            index.insert(token.clone(), id);
        }
    }

    Ok(index)
}
