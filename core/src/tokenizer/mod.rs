//! Text normalization shared by indexing and querying.
//!
//! Text is lowercased, then split on every run of non-alphanumeric chars.
//! Index and query tokenization differ only in filtering: indexing drops
//! tokens shorter than a minimum length (and optionally stop words), while
//! queries keep single-char tokens so they can still hit prefix and
//! substring matches.

use crate::types::Token;
use std::collections::HashSet;

fn fragments(lowered: &str) -> impl Iterator<Item = &str> {
    lowered.split(|c: char| !c.is_alphanumeric())
}

/// Splits `text` into lowercase alphanumeric tokens, dropping empty fragments.
pub fn tokenize(text: &str) -> Vec<Token> {
    let lowered = text.to_lowercase();
    fragments(&lowered)
        .filter(|fragment| !fragment.is_empty())
        .filter_map(|fragment| Token::try_new(fragment.to_string()).ok())
        .collect()
}

/// Tokens eligible for indexing: at least `min_len` chars and not a stop word.
pub fn index_tokens(text: &str, min_len: usize, stop_words: &HashSet<String>) -> Vec<Token> {
    tokenize(text)
        .into_iter()
        .filter(|token| token.char_len() >= min_len)
        .filter(|token| !stop_words.contains(token.as_str()))
        .collect()
}

/// Query terms: every non-empty token, no stop-word filtering.
pub fn query_tokens(text: &str) -> Vec<Token> {
    tokenize(text)
}

/// First fragment of the lowercased text, before any filtering.
///
/// Text that starts with a delimiter yields an empty string.
pub fn first_fragment(text: &str) -> String {
    let lowered = text.to_lowercase();
    fragments(&lowered).next().unwrap_or_default().to_string()
}
