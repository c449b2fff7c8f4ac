use std::fmt;

use serde::{Deserialize, Serialize};

use crate::vectorizer::document::Document;

/// TF and IDF formulas used by a [`Corpus`](crate::Corpus).
///
/// Both functions are pure, so the corpus is free to evaluate them from
/// several threads at once.
pub trait TFIDFEngine {
    /// TF of `word` in `doc`
    /// # Arguments
    /// * `doc` - document
    /// * `word` - vocabulary word
    /// # Returns
    /// * `f64` - TF value, `0.0` when `word` does not occur in `doc`
    fn tf(doc: &Document, word: &str) -> f64;

    /// IDF of a word
    /// # Arguments
    /// * `doc_num` - number of documents in the corpus
    /// * `doc_freq` - number of documents containing the word (>= 1 for vocabulary words)
    /// # Returns
    /// * `f64` - IDF value
    fn idf(doc_num: usize, doc_freq: usize) -> f64;
}

/// Default engine: relative term counts and `log10(N / df)`.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultTFIDFEngine;

impl TFIDFEngine for DefaultTFIDFEngine {
    #[inline]
    fn tf(doc: &Document, word: &str) -> f64 {
        doc.tf(word)
    }

    #[inline]
    fn idf(doc_num: usize, doc_freq: usize) -> f64 {
        if doc_freq == 0 {
            return 0.0;
        }
        // float division: idf(3, 2) == log10(1.5)
        (doc_num as f64 / doc_freq as f64).log10()
    }
}

/// TF-IDF weight of one word in one document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Score {
    pub word: String,
    pub document: String,
    pub score: f64,
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "word: {}, doc: {}, score: {}", self.word, self.document, self.score)
    }
}
