//! The four scoring passes. Each adds to the same [`ScoreMap`] and none
//! depends on another's output.

use crate::results::ScoreMap;
use typeahead_core::distance::fuzzy_matches;
use typeahead_core::index::SearchIndex;
use typeahead_core::types::Token;

/// Items containing `token` as a whole word.
pub(super) fn exact(token: &Token, index: &SearchIndex, weight: u32, scores: &mut ScoreMap) {
    scores.add_all(index.words().ids(token), weight);
}

/// Items with a word starting with `token`.
///
/// The token is looked up as-is, so a token longer than the index's prefix
/// cap never hits.
pub(super) fn prefix(token: &Token, index: &SearchIndex, weight: u32, scores: &mut ScoreMap) {
    scores.add_all(index.prefixes().ids(token), weight);
}

/// Items with a word within `max_distance` edits of `token`, once per such word.
pub(super) fn fuzzy(
    token: &Token,
    index: &SearchIndex,
    max_distance: usize,
    weight: u32,
    scores: &mut ScoreMap,
) {
    let words = index.words();
    for word in fuzzy_matches(token.as_str(), words.tokens(), max_distance) {
        scores.add_all(words.ids(word), weight);
    }
}

/// Items whose lowercased text contains `token` anywhere.
pub(super) fn substring<L: AsRef<str>>(token: &Token, lowered: &[L], weight: u32, scores: &mut ScoreMap) {
    let needle = token.as_str();
    for (id, text) in lowered.iter().enumerate() {
        if text.as_ref().contains(needle) {
            scores.add(id as u32, weight);
        }
    }
}
