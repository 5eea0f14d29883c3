use serde::{Deserialize, Serialize};

/// Weights and limits for query scoring and quick matching.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoringConfig {
    #[serde(default = "default_exact_weight")]
    pub exact_weight: u32,
    #[serde(default = "default_prefix_weight")]
    pub prefix_weight: u32,
    #[serde(default = "default_fuzzy_weight")]
    pub fuzzy_weight: u32,
    #[serde(default = "default_substring_weight")]
    pub substring_weight: u32,
    #[serde(default = "default_max_edit_distance")]
    pub max_edit_distance: usize,
    #[serde(default = "default_result_limit")]
    pub result_limit: usize,
    /// Chars of the first query word looked up by the quick matcher.
    #[serde(default = "default_quick_prefix_len")]
    pub quick_prefix_len: usize,
    #[serde(default = "default_result_limit")]
    pub quick_result_limit: usize,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            exact_weight: default_exact_weight(),
            prefix_weight: default_prefix_weight(),
            fuzzy_weight: default_fuzzy_weight(),
            substring_weight: default_substring_weight(),
            max_edit_distance: default_max_edit_distance(),
            result_limit: default_result_limit(),
            quick_prefix_len: default_quick_prefix_len(),
            quick_result_limit: default_result_limit(),
        }
    }
}

fn default_exact_weight() -> u32 {
    10
}

fn default_prefix_weight() -> u32 {
    5
}

fn default_fuzzy_weight() -> u32 {
    3
}

fn default_substring_weight() -> u32 {
    1
}

fn default_max_edit_distance() -> usize {
    2
}

fn default_result_limit() -> usize {
    10
}

fn default_quick_prefix_len() -> usize {
    4
}
