use crate::vectorizer::{corpus::Corpus, document::Document, tfidf::{Score, TFIDFEngine}};

/// Name given to the transient query document.
/// NUL never appears in a file name, so library documents cannot clash with it.
pub const QUERY_DOCUMENT_NAME: &str = "\0moogle_query";

/// TF-IDF weights of a query against a corpus.
///
/// Holds one [`Score`] per word of the query-extended vocabulary (the
/// corpus vocabulary followed by any unseen query terms), zeros included.
#[derive(Debug, Clone)]
pub struct QueryVector {
    /// name the query was scored under
    pub name: String,
    /// number of tokens the query produced
    pub token_count: usize,
    pub scores: Vec<Score>,
}

impl QueryVector {
    /// True when the query has no weight on any word.
    pub fn is_zero(&self) -> bool {
        self.scores.iter().all(|s| s.score == 0.0)
    }

    pub fn weights(&self) -> impl Iterator<Item = f64> + '_ {
        self.scores.iter().map(|s| s.score)
    }
}

/// Vectorize `query` against `corpus` without mutating it.
///
/// The query becomes a document of its own inside a snapshot of the
/// corpus; the snapshot is refitted, so TF and IDF are computed over the
/// corpus documents plus the query and over the vocabulary extended by the
/// query terms.
pub fn transform<E>(corpus: &Corpus<E>, query: &str) -> QueryVector
where
    E: TFIDFEngine + Send + Sync,
{
    let name = query_document_name(corpus);
    let doc = Document::new(name.as_str(), query);
    let token_count = doc.token_count();

    let mut scratch = corpus.snapshot();
    scratch.fit_transform([doc]);

    // a freshly fitted snapshot always has its matrix
    let scores: Vec<Score> = scratch
        .as_vector()
        .map(|all| all.into_iter().filter(|s| s.document == name).collect())
        .unwrap_or_default();

    QueryVector {
        name,
        token_count,
        scores,
    }
}

fn query_document_name<E>(corpus: &Corpus<E>) -> String
where
    E: TFIDFEngine + Send + Sync,
{
    let mut name = QUERY_DOCUMENT_NAME.to_string();
    let mut suffix = 0usize;
    while corpus.contains(&name) {
        suffix += 1;
        name = format!("{QUERY_DOCUMENT_NAME}#{suffix}");
    }
    name
}
