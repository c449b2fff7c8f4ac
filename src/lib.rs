//! This crate is a small document search engine using TF-IDF vectors and
//! cosine similarity.

pub mod error;
pub mod server;
pub mod utils;
pub mod vectorizer;

pub use error::{Error, Result};

/// Corpus
/// The top-level struct of this crate. It owns the documents, the shared
/// vocabulary and, once fitted, the TF / IDF / TF-IDF matrices.
///
/// Documents are unique by name and kept in insertion order.
/// `fit_transform` computes every matrix in one step; adding a document
/// afterwards drops the matrices until the next fit, and any ranking call
/// on an unfitted corpus returns `Error::NotFitted`.
///
/// `Corpus<E>` has one generic parameter:
/// - `E`: TF-IDF calculation engine type (e.g., DefaultTFIDFEngine)
///
/// # Thread Safety
/// A fitted corpus is read-only; share it as `Arc<Corpus>`. Queries are
/// scored on a private snapshot, never on the shared matrices.
pub use vectorizer::corpus::{Corpus, FittedMatrix};

/// Document
/// One named text with its tokens and per-term counts.
/// Used both for library texts and for queries.
pub use vectorizer::document::Document;

/// Tokenizer and Token Frequency structure
/// `tokenize` lower-cases text and splits it on punctuation and whitespace.
/// `TokenFrequency` counts token occurrences within one document and is the
/// base data for TF calculation.
pub use vectorizer::token::{tokenize, TokenFrequency};

/// TF IDF Calculation Engine Trait
/// Defines the TF and IDF formulas used by `Corpus<E>`.
/// `DefaultTFIDFEngine` uses `count / total` for TF and `log10(N / df)` for IDF.
///
/// `Score` is one `(word, document, score)` entry of the TF-IDF matrix.
pub use vectorizer::tfidf::{DefaultTFIDFEngine, Score, TFIDFEngine};

/// Query vectorization
/// `transform` turns a query string into a `QueryVector` scored against a
/// snapshot of the corpus.
pub use vectorizer::evaluate::query::{transform, QueryVector};

/// Search Hits and Hit Entry structures
/// Data structures for managing search results.
/// - `Hits`: ranked list of results with sorting and filtering helpers
/// - `HitEntry`: a single result, the document name and its similarity
pub use vectorizer::evaluate::scoring::{HitEntry, Hits};
