use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Timing and gating for the quick-then-full search worker.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StagedConfig {
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
    /// Delay between publishing quick results and running the full search.
    #[serde(default = "default_full_delay_ms")]
    pub full_delay_ms: u64,
    /// Trimmed queries shorter than this clear the results.
    #[serde(default = "default_min_query_len")]
    pub min_query_len: usize,
    #[serde(default = "default_full_search_min_len")]
    pub full_search_min_len: usize,
    /// A quick pass with fewer results than this always gets a full search.
    #[serde(default = "default_quick_result_threshold")]
    pub quick_result_threshold: usize,
}

impl Default for StagedConfig {
    fn default() -> Self {
        Self {
            debounce_ms: default_debounce_ms(),
            full_delay_ms: default_full_delay_ms(),
            min_query_len: default_min_query_len(),
            full_search_min_len: default_full_search_min_len(),
            quick_result_threshold: default_quick_result_threshold(),
        }
    }
}

impl StagedConfig {
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    pub fn full_delay(&self) -> Duration {
        Duration::from_millis(self.full_delay_ms)
    }
}

fn default_debounce_ms() -> u64 {
    200
}

fn default_full_delay_ms() -> u64 {
    50
}

fn default_min_query_len() -> usize {
    2
}

fn default_full_search_min_len() -> usize {
    3
}

fn default_quick_result_threshold() -> usize {
    3
}
