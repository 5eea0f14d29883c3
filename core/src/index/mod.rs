//! Word and prefix indices over an item collection.
//!
//! Both indices map a [`Token`] to the set of item ids containing it. They
//! are populated once by [`IndexBuilder`] (or restored from an
//! [`IndexSnapshot`]) and are read-only afterwards, so a built
//! [`SearchIndex`] can be shared between readers behind an `Arc`.

use crate::types::{IndexConfig, IndexMode, ItemId, Token};
use std::collections::{BTreeSet, HashMap};

pub mod builder;
pub mod snapshot;

pub use builder::{IndexBuilder, build_exhaustive, build_optimized};
pub use snapshot::{IndexSnapshot, SnapshotCodec};

/// blake3 digest of an item collection.
pub type Fingerprint = [u8; 32];

/// Hashes the items in order, length-prefixed so `["ab", "c"]` and `["a", "bc"]` differ.
pub fn fingerprint_items<S: AsRef<str>>(items: &[S]) -> Fingerprint {
    let mut hasher = blake3::Hasher::new();
    update_usize(&mut hasher, items.len());
    for item in items {
        let bytes = item.as_ref().as_bytes();
        update_usize(&mut hasher, bytes.len());
        hasher.update(bytes);
    }
    *hasher.finalize().as_bytes()
}

/// Hashes the settings that shape an index built with `config`.
///
/// Settings a mode ignores are left out, so an exhaustive index does not
/// change fingerprint when the stop words or prefix bounds are edited.
/// Stop words are hashed lowercased, sorted and deduplicated.
pub fn fingerprint_config(config: &IndexConfig) -> Fingerprint {
    let mut hasher = blake3::Hasher::new();

    match config.mode {
        IndexMode::Exhaustive => {
            hasher.update(b"exhaustive");
            update_usize(&mut hasher, config.min_token_len);
        }
        IndexMode::Optimized => {
            hasher.update(b"optimized");
            update_usize(&mut hasher, config.min_token_len);
            update_usize(&mut hasher, config.min_prefix_len);
            update_usize(&mut hasher, config.max_prefix_len);
            update_usize(&mut hasher, config.max_prefixed_token_len);

            let stop_words: BTreeSet<String> =
                config.stop_words.iter().map(|word| word.to_lowercase()).collect();
            update_usize(&mut hasher, stop_words.len());
            for word in &stop_words {
                update_usize(&mut hasher, word.len());
                hasher.update(word.as_bytes());
            }
        }
    }

    *hasher.finalize().as_bytes()
}

fn update_usize(hasher: &mut blake3::Hasher, value: usize) {
    hasher.update(&(value as u64).to_le_bytes());
}

/// Token → set of item ids. Never holds an empty set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenIndex {
    entries: HashMap<Token, BTreeSet<ItemId>>,
}

/// Read operations.
impl TokenIndex {
    pub fn get(&self, token: &Token) -> Option<&BTreeSet<ItemId>> {
        self.entries.get(token)
    }

    /// Ids for `token` in ascending order; empty when the token is absent.
    pub fn ids<'a>(&'a self, token: &Token) -> impl Iterator<Item = ItemId> + use<'a> {
        self.entries.get(token).into_iter().flatten().copied()
    }

    pub fn contains(&self, token: &Token) -> bool {
        self.entries.contains_key(token)
    }

    pub fn tokens(&self) -> impl Iterator<Item = &Token> {
        self.entries.keys()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Token, &BTreeSet<ItemId>)> {
        self.entries.iter()
    }

    /// Number of distinct tokens.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Total (token, id) pairs.
    pub fn posting_count(&self) -> usize {
        self.entries.values().map(BTreeSet::len).sum()
    }

    pub fn max_id(&self) -> Option<ItemId> {
        self.entries.values().filter_map(|ids| ids.last()).copied().max()
    }
}

/// Population, only reachable while building or restoring.
impl TokenIndex {
    /// Records `id` under `token`, creating the set on first use.
    pub(crate) fn insert(&mut self, token: Token, id: ItemId) {
        self.entries.entry(token).or_default().insert(id);
    }
}

/// The word and prefix indices for one item collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchIndex {
    pub(crate) words: TokenIndex,
    pub(crate) prefixes: TokenIndex,
    pub(crate) mode: IndexMode,
    pub(crate) item_count: usize,
    pub(crate) fingerprint: Fingerprint,
    pub(crate) config_fingerprint: Fingerprint,
}

impl SearchIndex {
    /// Full-word index.
    pub fn words(&self) -> &TokenIndex {
        &self.words
    }

    /// Prefix index.
    pub fn prefixes(&self) -> &TokenIndex {
        &self.prefixes
    }

    pub fn mode(&self) -> IndexMode {
        self.mode
    }

    pub fn item_count(&self) -> usize {
        self.item_count
    }

    pub fn fingerprint(&self) -> &Fingerprint {
        &self.fingerprint
    }

    pub fn config_fingerprint(&self) -> &Fingerprint {
        &self.config_fingerprint
    }

    /// Whether building with `config` would shape the index the same way.
    pub fn built_with(&self, config: &IndexConfig) -> bool {
        self.mode == config.mode && self.config_fingerprint == fingerprint_config(config)
    }

    /// Whether this index was built from exactly these items.
    pub fn matches_items<S: AsRef<str>>(&self, items: &[S]) -> bool {
        self.item_count == items.len() && self.fingerprint == fingerprint_items(items)
    }

    /// Every stored id is a valid position in the collection.
    pub fn ids_in_range(&self) -> bool {
        [&self.words, &self.prefixes]
            .into_iter()
            .filter_map(TokenIndex::max_id)
            .all(|id| (id as usize) < self.item_count)
    }
}

#[cfg(test)]
mod tests;
