use std::marker::PhantomData;
use std::sync::Arc;

use indexmap::{IndexMap, IndexSet};
use rayon::prelude::*;

use crate::error::{Error, Result};
use crate::vectorizer::document::Document;
use crate::vectorizer::tfidf::{DefaultTFIDFEngine, Score, TFIDFEngine};

/// word -> one value per document, in corpus document order
pub type TermMatrix = IndexMap<String, Vec<f64>>;

/// Derived state of a fitted corpus.
///
/// Rows follow vocabulary order, columns follow document order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FittedMatrix {
    pub tf: TermMatrix,
    pub idf: IndexMap<String, f64>,
    pub tfidf: TermMatrix,
}

/// Document collection with its vocabulary and TF-IDF matrices.
///
/// Documents are unique by name and kept in insertion order. The matrices
/// are only present after [`Corpus::fit_transform`] / [`Corpus::transform`];
/// any later [`Corpus::add`] drops them again, so scoring never sees a
/// matrix that disagrees with the document set.
///
/// Every fit recomputes the full `|vocabulary| x |documents|` matrix. That
/// is the scaling ceiling of this type: it is meant for corpora that fit in
/// memory and are small enough to refit per query.
///
/// `Corpus<E>` takes the TF-IDF engine as a type parameter:
/// - `E`: TF / IDF formulas (e.g., `DefaultTFIDFEngine`)
#[derive(Debug)]
pub struct Corpus<E = DefaultTFIDFEngine>
where
    E: TFIDFEngine + Send + Sync,
{
    documents: IndexMap<String, Arc<Document>>,
    /// distinct tokens in first-seen order
    vocabulary: IndexSet<String>,
    fitted: Option<FittedMatrix>,
    _marker: PhantomData<E>,
}

impl<E> Default for Corpus<E>
where
    E: TFIDFEngine + Send + Sync,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<E> Corpus<E>
where
    E: TFIDFEngine + Send + Sync,
{
    /// Create an empty, unfitted corpus
    pub fn new() -> Self {
        Self {
            documents: IndexMap::new(),
            vocabulary: IndexSet::new(),
            fitted: None,
            _marker: PhantomData,
        }
    }

    /// Add a document.
    ///
    /// Returns `false` and leaves the corpus untouched when a document with
    /// the same name is already present. On success the document's terms are
    /// merged into the vocabulary and the fitted matrices are dropped.
    pub fn add(&mut self, doc: impl Into<Arc<Document>>) -> bool {
        let doc = doc.into();
        if self.documents.contains_key(doc.name()) {
            return false;
        }
        for token in doc.term_counts().token_set_ref_str() {
            if !self.vocabulary.contains(token) {
                self.vocabulary.insert(token.to_string());
            }
        }
        self.documents.insert(doc.name().to_string(), doc);
        self.fitted = None;
        true
    }

    /// Add every document of `docs`, then compute TF, IDF and TF-IDF.
    ///
    /// Duplicate names are skipped the same way [`Corpus::add`] skips them.
    pub fn fit_transform<I, D>(&mut self, docs: I)
    where
        I: IntoIterator<Item = D>,
        D: Into<Arc<Document>>,
    {
        for doc in docs {
            if !self.add(doc) {
                tracing::debug!("duplicate document skipped during fit");
            }
        }
        self.transform();
    }

    /// Recompute TF, IDF and TF-IDF for the current document set.
    ///
    /// TF and IDF are computed concurrently and committed together, so the
    /// corpus ends up either fully fitted or exactly as it was.
    pub fn transform(&mut self) {
        let this = &*self;
        let (tf, idf) = rayon::join(|| this.compute_tf(), || this.compute_idf());
        let tfidf: TermMatrix = tf
            .iter()
            .zip(idf.values())
            .map(|((word, row), &idf_w)| (word.clone(), row.iter().map(|tf_w| tf_w * idf_w).collect()))
            .collect();
        tracing::debug!(
            documents = self.documents.len(),
            vocabulary = self.vocabulary.len(),
            "corpus fitted"
        );
        self.fitted = Some(FittedMatrix { tf, idf, tfidf });
    }

    /// TF of every vocabulary word in every document.
    /// Full recomputation, O(|vocabulary| x |documents|).
    pub fn compute_tf(&self) -> TermMatrix {
        let docs: Vec<&Arc<Document>> = self.documents.values().collect();
        let rows: Vec<(String, Vec<f64>)> = self
            .vocabulary
            .par_iter()
            .map(|word| (word.clone(), docs.iter().map(|doc| E::tf(doc, word)).collect()))
            .collect();
        rows.into_iter().collect()
    }

    /// IDF of every vocabulary word.
    pub fn compute_idf(&self) -> IndexMap<String, f64> {
        let doc_num = self.documents.len();
        self.vocabulary
            .iter()
            .map(|word| {
                let doc_freq = self.documents.values().filter(|doc| doc.contains(word)).count();
                (word.clone(), E::idf(doc_num, doc_freq))
            })
            .collect()
    }

    /// Copy of the document handles and vocabulary without any fitted state.
    ///
    /// Used to score a query without touching this corpus; documents are
    /// shared, not duplicated.
    pub fn snapshot(&self) -> Self {
        Self {
            documents: self.documents.clone(),
            vocabulary: self.vocabulary.clone(),
            fitted: None,
            _marker: PhantomData,
        }
    }
}

/// Read access
impl<E> Corpus<E>
where
    E: TFIDFEngine + Send + Sync,
{
    /// Documents in insertion order
    pub fn documents(&self) -> impl ExactSizeIterator<Item = &Arc<Document>> + '_ {
        self.documents.values()
    }

    /// Document names in insertion order
    pub fn names(&self) -> Vec<&str> {
        self.documents.keys().map(String::as_str).collect()
    }

    pub fn get(&self, name: &str) -> Option<&Arc<Document>> {
        self.documents.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.documents.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    pub fn vocabulary(&self) -> &IndexSet<String> {
        &self.vocabulary
    }

    /// Every token of every document, duplicates kept, in document order.
    pub fn words(&self) -> Vec<&str> {
        self.documents
            .values()
            .flat_map(|doc| doc.tokens().iter().map(String::as_str))
            .collect()
    }

    pub fn is_fitted(&self) -> bool {
        self.fitted.is_some()
    }

    /// Fitted matrices, or [`Error::NotFitted`].
    pub fn matrix(&self) -> Result<&FittedMatrix> {
        self.fitted.as_ref().ok_or(Error::NotFitted)
    }

    /// IDF of `word`; `None` when it is not in the vocabulary.
    pub fn idf(&self, word: &str) -> Result<Option<f64>> {
        Ok(self.matrix()?.idf.get(word).copied())
    }

    /// TF-IDF of `word` in document `name`; `None` when either is unknown.
    pub fn tfidf(&self, word: &str, name: &str) -> Result<Option<f64>> {
        let matrix = self.matrix()?;
        let Some(pos) = self.documents.get_index_of(name) else {
            return Ok(None);
        };
        Ok(matrix.tfidf.get(word).and_then(|row| row.get(pos).copied()))
    }

    /// Flatten the TF-IDF matrix into one [`Score`] per (word, document).
    ///
    /// Words follow vocabulary order and documents corpus order, but callers
    /// should treat the result as a set.
    pub fn as_vector(&self) -> Result<Vec<Score>> {
        let matrix = self.matrix()?;
        let mut scores = Vec::with_capacity(matrix.tfidf.len() * self.documents.len());
        for (word, row) in &matrix.tfidf {
            for (name, &score) in self.documents.keys().zip(row) {
                scores.push(Score {
                    word: word.clone(),
                    document: name.clone(),
                    score,
                });
            }
        }
        Ok(scores)
    }

    /// [`Corpus::as_vector`] grouped by document: one full-vocabulary vector each.
    pub fn vectorize(&self) -> Result<IndexMap<String, Vec<Score>>> {
        let mut vectors: IndexMap<String, Vec<Score>> = self
            .documents
            .keys()
            .map(|name| (name.clone(), Vec::with_capacity(self.vocabulary.len())))
            .collect();
        for score in self.as_vector()? {
            if let Some(vector) = vectors.get_mut(&score.document) {
                vector.push(score);
            }
        }
        Ok(vectors)
    }
}
