//! Full multi-pass ranking and the [`SearchEngine`] facade.

mod passes;

use crate::query::SearchQuery;
use crate::quick;
use crate::results::{ScoreMap, SearchResult};
use std::sync::Arc;
use std::time::Instant;
use typeahead_core::index::{IndexBuilder, SearchIndex};
use typeahead_core::storage::{IndexCache, KeyValueStore};
use typeahead_core::types::{IndexConfig, ScoringConfig};

/// Ranks `items` against `query` using every scoring pass.
///
/// `items` must be the collection `index` was built from. Returns at most
/// `scoring.result_limit` results; a query without tokens yields none.
pub fn search<S: AsRef<str>>(
    query: &str,
    items: &[S],
    index: &SearchIndex,
    scoring: &ScoringConfig,
) -> Vec<SearchResult> {
    let lowered = lowercase_all(items);
    rank(&SearchQuery::parse(query), items, &lowered, index, scoring)
}

fn lowercase_all<S: AsRef<str>>(items: &[S]) -> Vec<String> {
    items.iter().map(|item| item.as_ref().to_lowercase()).collect()
}

fn rank<S: AsRef<str>, L: AsRef<str>>(
    query: &SearchQuery,
    items: &[S],
    lowered: &[L],
    index: &SearchIndex,
    scoring: &ScoringConfig,
) -> Vec<SearchResult> {
    if query.is_empty() {
        return Vec::new();
    }

    let started = Instant::now();
    let mut scores = ScoreMap::default();

    for token in query.tokens() {
        passes::exact(token, index, scoring.exact_weight, &mut scores);
        passes::prefix(token, index, scoring.prefix_weight, &mut scores);
        passes::fuzzy(
            token,
            index,
            scoring.max_edit_distance,
            scoring.fuzzy_weight,
            &mut scores,
        );
        passes::substring(token, lowered, scoring.substring_weight, &mut scores);
    }

    let results = scores.rank(items, scoring.result_limit);
    tracing::debug!(
        query = query.text(),
        tokens = query.tokens().len(),
        results = results.len(),
        elapsed_us = started.elapsed().as_micros() as u64,
        "full search"
    );
    results
}

/// An item collection with its index and scoring weights.
///
/// Items are lowercased once up front for the substring and quick passes.
/// All state is immutable and shared through `Arc`, so an engine can be
/// searched from several threads.
#[derive(Debug, Clone)]
pub struct SearchEngine {
    items: Arc<[String]>,
    lowered: Arc<[String]>,
    index: Arc<SearchIndex>,
    scoring: ScoringConfig,
}

/// Create operations.
impl SearchEngine {
    /// Wraps an index already built from `items`.
    pub fn new(items: Vec<String>, index: Arc<SearchIndex>, scoring: ScoringConfig) -> Self {
        if !index.matches_items(&items) {
            tracing::warn!(
                items = items.len(),
                indexed = index.item_count(),
                "index was built from a different collection"
            );
        }

        let lowered = lowercase_all(&items);
        Self {
            items: items.into(),
            lowered: lowered.into(),
            index,
            scoring,
        }
    }

    /// Indexes `items` from scratch.
    pub fn build(items: Vec<String>, index_config: &IndexConfig, scoring: ScoringConfig) -> Self {
        let index = IndexBuilder::new(index_config.clone()).build(&items);
        Self::new(items, Arc::new(index), scoring)
    }

    /// Reuses a cached index for `items` when one is stored, else builds and caches it.
    pub fn open_cached<S: KeyValueStore>(
        items: Vec<String>,
        index_config: &IndexConfig,
        scoring: ScoringConfig,
        cache: &mut IndexCache<S>,
    ) -> Self {
        let index = cache.load_or_build(&items, index_config);
        Self::new(items, Arc::new(index), scoring)
    }
}

/// Search operations.
impl SearchEngine {
    /// Full ranking with every scoring pass.
    pub fn search(&self, query: &str) -> Vec<SearchResult> {
        rank(
            &SearchQuery::parse(query),
            self.items(),
            &self.lowered[..],
            &self.index,
            &self.scoring,
        )
    }

    /// Cheap first-fragment prefix lookup; every score is 1.
    pub fn quick_search(&self, query: &str) -> Vec<SearchResult> {
        quick::quick_matches(
            &SearchQuery::parse(query),
            self.items(),
            &self.lowered[..],
            self.index.prefixes(),
            &self.scoring,
        )
    }
}

/// Accessors.
impl SearchEngine {
    pub fn items(&self) -> &[String] {
        &self.items
    }

    pub fn index(&self) -> &Arc<SearchIndex> {
        &self.index
    }

    pub fn scoring(&self) -> &ScoringConfig {
        &self.scoring
    }
}
