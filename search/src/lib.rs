//! Typeahead search over an indexed item collection.
//!
//! # Design
//!
//! - [`search`] ranks every item with four additive passes per query token:
//!   exact word, word prefix, fuzzy word (bounded edit distance) and raw
//!   substring. Scores are summed, sorted descending with ties by id, and
//!   truncated to the configured limit.
//! - [`quick_search`] is a cheap preview: one prefix lookup for the query's
//!   first fragment, filtered by substring containment.
//! - [`SearchEngine`] bundles items, index and weights behind `Arc`s.
//! - [`StagedSearch`] drives both from live input on a worker thread:
//!   debounce, quick results, then a delayed full search that is dropped if
//!   a newer query arrived.

mod engine;
mod query;
mod quick;
mod results;
mod staged;

pub use engine::{SearchEngine, search};
pub use query::SearchQuery;
pub use quick::quick_search;
pub use results::SearchResult;
pub use staged::{StagedSearch, StagedUpdate};
