use serde::{Deserialize, Serialize};
use std::fmt;

/// How the prefix index is populated.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IndexMode {
    /// Every prefix of every indexed token, no stop words.
    Exhaustive,
    /// Stop words removed, prefix lengths capped, long tokens not prefixed.
    #[default]
    Optimized,
}

impl IndexMode {
    /// Picks `Optimized` once a collection exceeds `threshold` items.
    pub fn for_collection_size(item_count: usize, threshold: usize) -> Self {
        if item_count > threshold {
            IndexMode::Optimized
        } else {
            IndexMode::Exhaustive
        }
    }
}

impl fmt::Display for IndexMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IndexMode::Exhaustive => write!(f, "exhaustive"),
            IndexMode::Optimized => write!(f, "optimized"),
        }
    }
}

/// Index construction settings.
///
/// `min_token_len` applies to both modes. The prefix bounds and stop words
/// only apply in [`IndexMode::Optimized`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexConfig {
    #[serde(default)]
    pub mode: IndexMode,
    #[serde(default = "default_min_token_len")]
    pub min_token_len: usize,
    #[serde(default = "default_min_prefix_len")]
    pub min_prefix_len: usize,
    #[serde(default = "default_max_prefix_len")]
    pub max_prefix_len: usize,
    /// Tokens longer than this get a word entry but no prefix entries.
    #[serde(default = "default_max_prefixed_token_len")]
    pub max_prefixed_token_len: usize,
    #[serde(default = "default_stop_words")]
    pub stop_words: Vec<String>,
    /// Collection size above which callers should prefer the optimized mode.
    #[serde(default = "default_large_collection_threshold")]
    pub large_collection_threshold: usize,
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            mode: IndexMode::default(),
            min_token_len: default_min_token_len(),
            min_prefix_len: default_min_prefix_len(),
            max_prefix_len: default_max_prefix_len(),
            max_prefixed_token_len: default_max_prefixed_token_len(),
            stop_words: default_stop_words(),
            large_collection_threshold: default_large_collection_threshold(),
        }
    }
}

impl IndexConfig {
    pub fn exhaustive() -> Self {
        Self {
            mode: IndexMode::Exhaustive,
            ..Self::default()
        }
    }

    pub fn optimized() -> Self {
        Self {
            mode: IndexMode::Optimized,
            ..Self::default()
        }
    }

    /// Resolves the mode from the collection size using `large_collection_threshold`.
    pub fn sized_for(mut self, item_count: usize) -> Self {
        self.mode = IndexMode::for_collection_size(item_count, self.large_collection_threshold);
        self
    }
}

fn default_min_token_len() -> usize {
    2
}

fn default_min_prefix_len() -> usize {
    2
}

fn default_max_prefix_len() -> usize {
    6
}

fn default_max_prefixed_token_len() -> usize {
    12
}

fn default_stop_words() -> Vec<String> {
    ["the", "and", "of", "to", "a", "in", "for", "is"]
        .into_iter()
        .map(str::to_string)
        .collect()
}

fn default_large_collection_threshold() -> usize {
    10_000
}
