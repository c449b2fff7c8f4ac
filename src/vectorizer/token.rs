use indexmap::IndexMap;

/// Characters that are replaced by a separator before splitting.
/// Newline, carriage return, tab and the apostrophe are handled the same way.
pub const SEPARATORS: &[char] = &[
    '!', '"', '#', '$', '%', '&', '(', ')', '*', '+', '-', '.', '/', ':', ';', '<', '=', '>',
    '?', '@', '[', ']', '^', '_', '`', '{', '|', '}', '~', '\n', '\r', '\t', '\'', ' ',
];

/// Split raw text into normalized word tokens.
///
/// The text is lower-cased (ASCII range only), every separator character is
/// treated as a word boundary and empty pieces are dropped, so no token is
/// ever `""` and no token contains a separator.
///
/// # Arguments
/// * `text` - raw document or query text
///
/// # Returns
/// * `Vec<String>` - tokens in their original order, duplicates kept
pub fn tokenize(text: &str) -> Vec<String> {
    text.to_ascii_lowercase()
        .split(SEPARATORS)
        .filter(|piece| !piece.is_empty())
        .map(str::to_string)
        .collect()
}

/// Occurrence counts of each token within one document.
///
/// Keeps:
/// - the count of each distinct token, in first-seen order
/// - the total number of tokens (the TF denominator)
///
/// # Examples
/// ```
/// use moogle::TokenFrequency;
/// let mut freq = TokenFrequency::new();
/// freq.add_tokens(&["cat", "sat", "cat"]);
///
/// assert_eq!(freq.token_count("cat"), 2);
/// assert_eq!(freq.token_sum(), 3);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TokenFrequency {
    token_count: IndexMap<String, u32>,
    total_token_count: u64,
}

impl TokenFrequency {
    pub fn new() -> Self {
        TokenFrequency {
            token_count: IndexMap::new(),
            total_token_count: 0,
        }
    }

    /// Add one occurrence of `token`.
    #[inline]
    pub fn add_token(&mut self, token: &str) -> &mut Self {
        let count = self.token_count.entry(token.to_string()).or_insert(0);
        *count += 1;
        self.total_token_count += 1;
        self
    }

    /// Add one occurrence of every token in `tokens`.
    #[inline]
    pub fn add_tokens<T>(&mut self, tokens: &[T]) -> &mut Self
    where
        T: AsRef<str>,
    {
        for token in tokens {
            self.add_token(token.as_ref());
        }
        self
    }
}

impl<T> FromIterator<T> for TokenFrequency
where
    T: AsRef<str>,
{
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut freq = TokenFrequency::new();
        for token in iter {
            freq.add_token(token.as_ref());
        }
        freq
    }
}

/// Read access
impl TokenFrequency {
    /// Occurrences of `token`, `0` when absent.
    #[inline]
    pub fn token_count(&self, token: &str) -> u32 {
        self.token_count.get(token).copied().unwrap_or(0)
    }

    /// Total number of tokens counted, duplicates included.
    #[inline]
    pub fn token_sum(&self) -> u64 {
        self.total_token_count
    }

    #[inline]
    pub fn contains_token(&self, token: &str) -> bool {
        self.token_count.contains_key(token)
    }

    /// Distinct tokens in first-seen order.
    #[inline]
    pub fn token_set_ref_str(&self) -> Vec<&str> {
        self.token_count.keys().map(String::as_str).collect()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.total_token_count == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokenize_lowercases_and_splits_on_punctuation() {
        let tokens = tokenize("Hello World! It's a (small) test.");
        assert_eq!(tokens, vec!["hello", "world", "it", "s", "a", "small", "test"]);
    }

    #[test]
    fn tokenize_keeps_characters_outside_the_separator_set() {
        // comma and backslash are not separators
        assert_eq!(tokenize("Hello, World!"), vec!["hello,", "world"]);
        assert_eq!(tokenize("a,b c\\d"), vec!["a,b", "c\\d"]);
        assert!(!SEPARATORS.contains(&','));
    }

    #[test]
    fn tokenize_never_emits_separators_or_empty_tokens() {
        let text = "a!!b\"c#d$e%f&g(h)i*j+k-l.m/n:o;p<q=r>s?t@u[v]w^x_y`z{1|2}3~4\n5'6\r\n7\t8  9";
        let tokens = tokenize(text);
        assert!(!tokens.is_empty());
        for token in &tokens {
            assert!(!token.is_empty());
            assert!(!token.contains(SEPARATORS), "separator leaked into {token:?}");
        }
        assert_eq!(tokens.len(), 35);
    }

    #[test]
    fn tokenize_is_deterministic() {
        let text = "The quick brown fox -- jumps over the lazy dog.";
        assert_eq!(tokenize(text), tokenize(text));
    }

    #[test]
    fn tokenize_empty_and_separator_only_inputs() {
        assert!(tokenize("").is_empty());
        assert!(tokenize("  ...\n!!  ").is_empty());
    }

    #[test]
    fn tokenize_only_lowercases_ascii() {
        assert_eq!(tokenize("ÉCOLE Rust"), vec!["École", "rust"]);
    }

    #[test]
    fn token_frequency_counts() {
        let mut freq = TokenFrequency::new();
        freq.add_tokens(&["the", "cat", "the"]).add_token("sat");

        assert_eq!(freq.token_count("the"), 2);
        assert_eq!(freq.token_count("cat"), 1);
        assert_eq!(freq.token_count("dog"), 0);
        assert_eq!(freq.token_sum(), 4);
        assert!(freq.contains_token("sat"));
        assert!(!freq.contains_token("dog"));
        assert_eq!(freq.token_set_ref_str(), vec!["the", "cat", "sat"]);
    }

    #[test]
    fn token_frequency_from_iter() {
        let freq: TokenFrequency = tokenize("b a b").into_iter().collect();
        assert_eq!(freq.token_count("b"), 2);
        assert_eq!(freq.token_sum(), 3);
        assert!(TokenFrequency::new().is_empty());
    }
}
