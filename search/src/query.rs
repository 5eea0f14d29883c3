//! Search query types.

use typeahead_core::tokenizer;
use typeahead_core::types::Token;

/// A parsed query: the raw text and its query tokens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    text: String,
    tokens: Vec<Token>,
}

impl SearchQuery {
    pub fn parse(text: &str) -> Self {
        Self {
            text: text.to_string(),
            tokens: tokenizer::query_tokens(text),
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// True when the text holds no alphanumeric run at all.
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Leading fragment used by the quick matcher; see [`tokenizer::first_fragment`].
    pub fn first_fragment(&self) -> String {
        tokenizer::first_fragment(&self.text)
    }
}

impl From<&str> for SearchQuery {
    fn from(text: &str) -> Self {
        Self::parse(text)
    }
}
