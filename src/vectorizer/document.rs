use std::fmt;

use crate::vectorizer::token::{tokenize, TokenFrequency};

/// One ingested text (or one query).
///
/// Identity is the name: two documents with the same name are the same
/// document as far as the corpus is concerned, whatever their content.
/// Immutable once built.
#[derive(Debug, Clone)]
pub struct Document {
    name: String,
    /// tokens in text order, duplicates kept
    tokens: Vec<String>,
    freq: TokenFrequency,
    /// original text, only used for display
    content: String,
}

impl Document {
    /// Tokenize `content` and count its terms. Never fails.
    pub fn new(name: impl Into<String>, content: impl Into<String>) -> Self {
        let content = content.into();
        let tokens = tokenize(&content);
        let freq = tokens.iter().collect::<TokenFrequency>();
        Document {
            name: name.into(),
            tokens,
            freq,
            content,
        }
    }

    /// Term frequency of `word` in this document.
    ///
    /// `count(word) / total tokens`, and `0.0` for a word that does not occur
    /// or for a document without tokens.
    ///
    /// # Returns
    /// * `f64` - TF value (0.0~1.0)
    #[inline]
    pub fn tf(&self, word: &str) -> f64 {
        if self.freq.is_empty() {
            return 0.0;
        }
        self.freq.token_count(word) as f64 / self.freq.token_sum() as f64
    }

    #[inline]
    pub fn contains(&self, word: &str) -> bool {
        self.freq.contains_token(word)
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn content(&self) -> &str {
        &self.content
    }

    #[inline]
    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    #[inline]
    pub fn token_count(&self) -> usize {
        self.tokens.len()
    }

    /// Per-term counts backing [`Document::tf`].
    #[inline]
    pub fn term_counts(&self) -> &TokenFrequency {
        &self.freq
    }
}

impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}
