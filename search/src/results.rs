//! Search result types.

use std::collections::HashMap;
use typeahead_core::types::ItemId;

/// One ranked match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResult {
    pub item: String,
    pub score: u32,
    pub id: ItemId,
}

/// Per-query accumulator of item id → score.
///
/// Rebuilt from scratch for every query and consumed by [`ScoreMap::rank`].
#[derive(Debug, Default)]
pub(crate) struct ScoreMap {
    scores: HashMap<ItemId, u32>,
}

impl ScoreMap {
    pub(crate) fn add(&mut self, id: ItemId, weight: u32) {
        *self.scores.entry(id).or_default() += weight;
    }

    pub(crate) fn add_all(&mut self, ids: impl IntoIterator<Item = ItemId>, weight: u32) {
        for id in ids {
            self.add(id, weight);
        }
    }

    /// Highest scores first, ties by ascending id, at most `limit` results.
    ///
    /// Ids with no matching item are skipped.
    pub(crate) fn rank<S: AsRef<str>>(self, items: &[S], limit: usize) -> Vec<SearchResult> {
        let mut scored: Vec<(ItemId, u32)> = self.scores.into_iter().collect();
        scored.sort_unstable_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));

        scored
            .into_iter()
            .filter_map(|(id, score)| {
                let item = items.get(id as usize)?;
                Some(SearchResult {
                    item: item.as_ref().to_string(),
                    score,
                    id,
                })
            })
            .take(limit)
            .collect()
    }
}
