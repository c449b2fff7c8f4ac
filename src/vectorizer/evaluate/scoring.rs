use std::fmt::{self, Debug, Display};

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::utils::math::cosine_similarity;
use crate::vectorizer::{corpus::Corpus, evaluate::query::{transform, QueryVector}, tfidf::TFIDFEngine};

/// One ranked document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HitEntry {
    pub document: String,
    pub similarity: f64,
}

/// Structure to store search results
#[derive(Clone, Default)]
pub struct Hits {
    pub list: Vec<HitEntry>,
}

impl Hits {
    pub fn new(list: Vec<HitEntry>) -> Self {
        Hits { list }
    }

    /// Sort by descending similarity.
    /// Stable, so equal scores keep corpus order. NaN scores are removed.
    pub fn sort_by_score(&mut self) -> &mut Self {
        self.list.retain(|hit| !hit.similarity.is_nan());
        self.list.sort_by(|a, b| b.similarity.total_cmp(&a.similarity));
        self
    }

    /// Drop every hit whose similarity is not strictly positive.
    pub fn retain_positive(&mut self) -> &mut Self {
        self.list.retain(|hit| hit.similarity > 0.0);
        self
    }

    pub fn truncate(&mut self, len: usize) -> &mut Self {
        self.list.truncate(len);
        self
    }

    /// Document names in list order
    pub fn names(&self) -> Vec<String> {
        self.list.iter().map(|hit| hit.document.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.list.len()
    }

    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, HitEntry> {
        self.list.iter()
    }
}

impl IntoIterator for Hits {
    type Item = HitEntry;
    type IntoIter = std::vec::IntoIter<HitEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.list.into_iter()
    }
}

impl Debug for Hits {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if f.alternate() {
            // one hit per line
            writeln!(f, "Hits [")?;
            for hit in &self.list {
                writeln!(f, "    {:?}: {:.6}", hit.document, hit.similarity)?;
            }
            write!(f, "]")
        } else {
            f.debug_list().entries(&self.list).finish()
        }
    }
}

impl Display for Hits {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (rank, hit) in self.list.iter().enumerate() {
            writeln!(f, "{:>3}. {} ({:.6})", rank + 1, hit.document, hit.similarity)?;
        }
        Ok(())
    }
}

/// Ranking
impl<E> Corpus<E>
where
    E: TFIDFEngine + Send + Sync,
{
    /// Cosine similarity of every document against `query`, in corpus order.
    ///
    /// Document vectors come from this corpus's TF-IDF matrix, lined up with
    /// the query's dimensions; words the corpus has never seen weigh `0` on
    /// the document side.
    pub fn similarity(&self, query: &QueryVector) -> Result<Hits> {
        let matrix = self.matrix()?;
        let query_vec: Vec<f64> = query.weights().collect();
        let rows: Vec<Option<&Vec<f64>>> = query.scores.iter().map(|s| matrix.tfidf.get(&s.word)).collect();
        let docs: Vec<&str> = self.names();

        let list = docs
            .par_iter()
            .enumerate()
            .map(|(pos, name)| {
                let doc_vec: Vec<f64> = rows
                    .iter()
                    .map(|&row| row.and_then(|r| r.get(pos)).copied().unwrap_or(0.0))
                    .collect();
                HitEntry {
                    document: name.to_string(),
                    similarity: cosine_similarity(&doc_vec, &query_vec),
                }
            })
            .collect();
        Ok(Hits::new(list))
    }

    /// Documents matching `query`, most similar first.
    ///
    /// Ties keep corpus order and documents with similarity `<= 0` are dropped.
    pub fn rank(&self, query: &QueryVector) -> Result<Hits> {
        let mut hits = self.similarity(query)?;
        hits.sort_by_score().retain_positive();
        Ok(hits)
    }

    /// Names of the documents matching `query`, most similar first.
    pub fn rank_documents(&self, query: &QueryVector) -> Result<Vec<String>> {
        Ok(self.rank(query)?.names())
    }

    /// Vectorize `query` and rank the documents against it.
    ///
    /// An empty query, or an empty corpus, gives an empty result.
    pub fn search(&self, query: &str) -> Result<Hits> {
        // precondition first: an unfitted corpus is an error even for an empty query
        self.matrix()?;
        if self.is_empty() {
            return Ok(Hits::default());
        }
        let query = transform(self, query);
        if query.token_count == 0 {
            return Ok(Hits::default());
        }
        self.rank(&query)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::vectorizer::document::Document;

    fn corpus() -> Corpus {
        let mut corpus = Corpus::new();
        corpus.fit_transform([
            Document::new("a", "the cat sat"),
            Document::new("b", "the dog sat"),
            Document::new("c", "completely unrelated text"),
        ]);
        corpus
    }

    #[test]
    fn cat_sat_ranks_a_then_b() {
        let corpus = corpus();
        let query = transform(&corpus, "cat sat");
        assert_eq!(corpus.rank_documents(&query).unwrap(), vec!["a", "b"]);

        let hits = corpus.search("cat sat").unwrap();
        assert_eq!(hits.names(), vec!["a", "b"]);
        assert!(hits.list[0].similarity > hits.list[1].similarity);
    }

    #[test]
    fn unrelated_document_scores_zero() {
        let corpus = corpus();
        let query = transform(&corpus, "cat sat");
        let all = corpus.similarity(&query).unwrap();
        assert_eq!(all.len(), 3);
        let c = all.iter().find(|h| h.document == "c").unwrap();
        assert_eq!(c.similarity, 0.0);
    }

    #[test]
    fn ranked_results_are_strictly_positive() {
        let corpus = corpus();
        for q in ["cat", "the", "sat dog", "text", "zebra", "the cat the dog"] {
            for hit in corpus.search(q).unwrap() {
                assert!(hit.similarity > 0.0, "{q}: {hit:?}");
            }
        }
    }

    #[test]
    fn ranking_is_deterministic() {
        let corpus = corpus();
        let first = corpus.search("the cat sat").unwrap();
        for _ in 0..10 {
            assert_eq!(corpus.search("the cat sat").unwrap().list, first.list);
        }
    }

    #[test]
    fn empty_query_gives_no_results() {
        let corpus = corpus();
        assert!(corpus.search("").unwrap().is_empty());
        assert!(corpus.search(" ?! ").unwrap().is_empty());
        let query = transform(&corpus, "");
        assert!(corpus.rank_documents(&query).unwrap().is_empty());
    }

    #[test]
    fn unknown_terms_give_no_results() {
        assert!(corpus().search("zebra giraffe").unwrap().is_empty());
    }

    #[test]
    fn empty_corpus_gives_no_results() {
        let mut corpus: Corpus = Corpus::new();
        corpus.transform();
        assert!(corpus.search("cat").unwrap().is_empty());
        let query = transform(&corpus, "cat");
        assert!(corpus.rank_documents(&query).unwrap().is_empty());
    }

    #[test]
    fn ranking_requires_fitted_corpus() {
        let mut corpus: Corpus = Corpus::new();
        corpus.add(Document::new("a", "the cat sat"));
        assert!(matches!(corpus.search("cat"), Err(Error::NotFitted)));
        assert!(matches!(corpus.search(""), Err(Error::NotFitted)));
        let query = transform(&corpus, "cat");
        assert!(matches!(corpus.rank_documents(&query), Err(Error::NotFitted)));
    }

    #[test]
    fn ties_keep_corpus_order() {
        let mut corpus: Corpus = Corpus::new();
        corpus.fit_transform([
            Document::new("x", "red apple"),
            Document::new("y", "red apple"),
            Document::new("z", "green pear"),
        ]);
        let hits = corpus.search("apple").unwrap();
        assert_eq!(hits.names(), vec!["x", "y"]);
        assert_eq!(hits.list[0].similarity, hits.list[1].similarity);
    }

    #[test]
    fn hits_sorting_and_filtering() {
        let mut hits = Hits::new(vec![
            HitEntry { document: "a".into(), similarity: 0.2 },
            HitEntry { document: "b".into(), similarity: f64::NAN },
            HitEntry { document: "c".into(), similarity: 0.9 },
            HitEntry { document: "d".into(), similarity: 0.0 },
            HitEntry { document: "e".into(), similarity: -0.4 },
        ]);
        hits.sort_by_score().retain_positive();
        assert_eq!(hits.names(), vec!["c", "a"]);
        hits.truncate(1);
        assert_eq!(hits.names(), vec!["c"]);
        assert_eq!(format!("{hits:#?}"), "Hits [\n    \"c\": 0.900000\n]");
        assert_eq!(hits.to_string(), "  1. c (0.900000)\n");
    }
}
