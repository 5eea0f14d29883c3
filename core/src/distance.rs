//! Levenshtein edit distance with a length-difference early exit.
//!
//! `|len(a) - len(b)|` is a lower bound on the edit distance, so pairs whose
//! lengths differ by more than the threshold are rejected before the DP runs.

use crate::types::Token;

/// Unit-cost Levenshtein distance over chars.
pub fn edit_distance(a: &str, b: &str) -> usize {
    let b_chars: Vec<char> = b.chars().collect();
    let mut row: Vec<usize> = (0..=b_chars.len()).collect();

    for (i, ac) in a.chars().enumerate() {
        let mut diagonal = row[0];
        row[0] = i + 1;

        for (j, &bc) in b_chars.iter().enumerate() {
            let above = row[j + 1];
            let cost = usize::from(ac != bc);
            row[j + 1] = (above + 1).min(row[j] + 1).min(diagonal + cost);
            diagonal = above;
        }
    }

    row[b_chars.len()]
}

/// Are `a` and `b` within `max` edits of each other?
pub fn within_distance(a: &str, b: &str, max: usize) -> bool {
    let a_len = a.chars().count();
    let b_len = b.chars().count();

    if a_len.abs_diff(b_len) > max {
        return false;
    }

    edit_distance(a, b) <= max
}

/// Dictionary tokens within `max` edits of `word`.
pub fn fuzzy_matches<'a, I>(
    word: &'a str,
    dictionary: I,
    max: usize,
) -> impl Iterator<Item = &'a Token>
where
    I: IntoIterator<Item = &'a Token>,
    I::IntoIter: 'a,
{
    dictionary
        .into_iter()
        .filter(move |candidate| within_distance(word, candidate.as_str(), max))
}
