//! Low-cost first pass shown before full ranking.

use crate::query::SearchQuery;
use crate::results::SearchResult;
use typeahead_core::index::TokenIndex;
use typeahead_core::types::{ScoringConfig, Token};

/// Items under the query's leading prefix that contain its first fragment.
///
/// The first fragment is truncated to `quick_prefix_len` chars and looked up
/// in `prefixes`; candidates are kept only if their lowercased text contains
/// the whole fragment. Results come in ascending id order, each scored 1.
pub fn quick_search<S: AsRef<str>>(
    query: &str,
    items: &[S],
    prefixes: &TokenIndex,
    config: &ScoringConfig,
) -> Vec<SearchResult> {
    let lowered: Vec<String> = items.iter().map(|item| item.as_ref().to_lowercase()).collect();
    quick_matches(&SearchQuery::parse(query), items, &lowered, prefixes, config)
}

pub(crate) fn quick_matches<S: AsRef<str>, L: AsRef<str>>(
    query: &SearchQuery,
    items: &[S],
    lowered: &[L],
    prefixes: &TokenIndex,
    config: &ScoringConfig,
) -> Vec<SearchResult> {
    let fragment = query.first_fragment();
    let key: String = fragment.chars().take(config.quick_prefix_len).collect();
    let Ok(key) = Token::try_new(key) else {
        return Vec::new();
    };

    prefixes
        .ids(&key)
        .filter_map(|id| {
            let idx = id as usize;
            let text = lowered.get(idx)?;
            if !text.as_ref().contains(fragment.as_str()) {
                return None;
            }
            Some(SearchResult {
                item: items.get(idx)?.as_ref().to_string(),
                score: 1,
                id,
            })
        })
        .take(config.quick_result_limit)
        .collect()
}
