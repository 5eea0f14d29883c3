//! Index construction in exhaustive and optimized modes.

use super::{SearchIndex, TokenIndex, fingerprint_config, fingerprint_items};
use crate::tokenizer::index_tokens;
use crate::types::{IndexConfig, IndexMode, ItemId, Token};
use std::collections::HashSet;
use std::ops::RangeInclusive;
use std::time::Instant;
use tracing::debug;

/// Builds [`SearchIndex`] values according to an [`IndexConfig`].
#[derive(Debug, Clone)]
pub struct IndexBuilder {
    config: IndexConfig,
    stop_words: HashSet<String>,
}

impl IndexBuilder {
    pub fn new(config: IndexConfig) -> Self {
        let stop_words = match config.mode {
            IndexMode::Exhaustive => HashSet::new(),
            IndexMode::Optimized => config
                .stop_words
                .iter()
                .map(|word| word.to_lowercase())
                .collect(),
        };

        Self { config, stop_words }
    }

    pub fn config(&self) -> &IndexConfig {
        &self.config
    }

    /// Indexes `items`; item ids are their positions.
    pub fn build<S: AsRef<str>>(&self, items: &[S]) -> SearchIndex {
        let started = Instant::now();
        let mut words = TokenIndex::default();
        let mut prefixes = TokenIndex::default();

        for (position, item) in items.iter().enumerate() {
            let id = position as ItemId;

            for token in index_tokens(item.as_ref(), self.config.min_token_len, &self.stop_words) {
                for len in self.prefix_lengths(&token).into_iter().flatten() {
                    if let Some(prefix) = token.prefix(len) {
                        prefixes.insert(prefix, id);
                    }
                }
                words.insert(token, id);
            }
        }

        let index = SearchIndex {
            words,
            prefixes,
            mode: self.config.mode,
            item_count: items.len(),
            fingerprint: fingerprint_items(items),
            config_fingerprint: fingerprint_config(&self.config),
        };
        debug_assert!(index.ids_in_range(), "index holds an out-of-range item id");

        debug!(
            mode = %index.mode,
            items = index.item_count,
            words = index.words.len(),
            prefixes = index.prefixes.len(),
            elapsed_us = started.elapsed().as_micros() as u64,
            "built search index"
        );

        index
    }

    /// Prefix lengths to index for `token`, or `None` when it gets no prefix entries.
    fn prefix_lengths(&self, token: &Token) -> Option<RangeInclusive<usize>> {
        let len = token.char_len();
        match self.config.mode {
            IndexMode::Exhaustive => Some(1..=len),
            IndexMode::Optimized if len > self.config.max_prefixed_token_len => None,
            IndexMode::Optimized => {
                Some(self.config.min_prefix_len..=len.min(self.config.max_prefix_len))
            }
        }
    }
}

/// Indexes every prefix of every token of two or more chars.
pub fn build_exhaustive<S: AsRef<str>>(items: &[S]) -> SearchIndex {
    IndexBuilder::new(IndexConfig::exhaustive()).build(items)
}

/// Indexes with the default stop words and prefix bounds.
pub fn build_optimized<S: AsRef<str>>(items: &[S]) -> SearchIndex {
    IndexBuilder::new(IndexConfig::optimized()).build(items)
}
