use nutype::nutype;

fn is_token_text(s: &str) -> bool {
    s.chars().all(char::is_alphanumeric)
}

/// A normalized search term: non-empty, lowercase, alphanumeric only.
///
/// Every key of a word or prefix index is a `Token`, so un-normalized
/// strings cannot end up in an index.
#[nutype(
    sanitize(lowercase),
    validate(not_empty, predicate = is_token_text),
    derive(
        Debug,
        Clone,
        PartialEq,
        Eq,
        PartialOrd,
        Ord,
        AsRef,
        Deref,
        TryFrom,
        Into,
        Hash,
        Display,
        Serialize,
        Deserialize,
    )
)]
pub struct Token(String);

impl Token {
    /// Length in chars.
    pub fn char_len(&self) -> usize {
        self.chars().count()
    }

    /// Leading `len` chars of this token.
    ///
    /// Returns `None` when `len` is zero; a `len` past the end yields the whole token.
    pub fn prefix(&self, len: usize) -> Option<Token> {
        if len == 0 {
            return None;
        }
        let end = self
            .char_indices()
            .nth(len)
            .map_or(self.len(), |(byte_idx, _)| byte_idx);
        Token::try_new(self.as_str()[..end].to_string()).ok()
    }
}
