//! Okapi BM25 ranking.

use crate::corpus::Corpus;
use crate::index::InvertedIndex;
use crate::normalize::{Normalizer, SimpleNormalizer};
use crate::rank::{sorted_hits, SearchHit};
use serde::{Deserialize, Serialize};

/// BM25 tuning knobs.
///
/// `k1` controls how quickly repeated occurrences of a term stop adding
/// score (`k1 >= 0`; 0 reduces term frequency to presence). `b` controls
/// length normalization (`0.0..=1.0`; 0 ignores document length, 1 scales
/// fully by it).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bm25Params {
    pub k1: f32,
    pub b: f32,
}

impl Default for Bm25Params {
    fn default() -> Self {
        Self { k1: 1.5, b: 0.75 }
    }
}

/// Ranked retrieval with the Okapi BM25 scoring function.
///
/// Per query term, `idf = ln((N - df + 0.5) / (df + 0.5) + 1)`, which never
/// goes negative even for terms in most documents. Term contribution
/// saturates with `k1` and is normalized against average document length
/// with `b`. A query token appearing twice contributes twice.
pub struct Bm25Model<N = SimpleNormalizer> {
    index: InvertedIndex,
    params: Bm25Params,
    normalizer: N,
}

impl Bm25Model<SimpleNormalizer> {
    /// Build the model over `corpus` with the default [`SimpleNormalizer`]
    /// and default parameters.
    pub fn new(corpus: &Corpus) -> Self {
        Self::with_normalizer(corpus, SimpleNormalizer)
    }
}

impl<N: Normalizer> Bm25Model<N> {
    /// Build the model with a caller-supplied normalizer. The same normalizer
    /// is applied to queries at rank time.
    pub fn with_normalizer(corpus: &Corpus, normalizer: N) -> Self {
        Self {
            index: InvertedIndex::build(corpus, &normalizer),
            params: Bm25Params::default(),
            normalizer,
        }
    }

    /// Replace the default parameters for subsequent [`rank`](Self::rank) and
    /// [`rank_all`](Self::rank_all) calls.
    pub fn with_params(mut self, params: Bm25Params) -> Self {
        self.params = params;
        self
    }

    pub fn params(&self) -> Bm25Params {
        self.params
    }

    /// BM25 score of `query` against every document, best first. Every
    /// document appears, zero-scored ones included; ties break toward the
    /// document indexed earlier.
    pub fn rank_all(&self, query: &str) -> Vec<SearchHit> {
        self.rank_with(query, self.params)
    }

    /// The top `n` hits of [`rank_all`](Self::rank_all).
    pub fn rank(&self, query: &str, n: usize) -> Vec<SearchHit> {
        let mut hits = self.rank_all(query);
        hits.truncate(n);
        hits
    }

    /// Like [`rank_all`](Self::rank_all) but with one-off parameters, leaving
    /// the model's own untouched.
    pub fn rank_with(&self, query: &str, params: Bm25Params) -> Vec<SearchHit> {
        let scores = self.score_all(query, params);
        sorted_hits(&self.index, scores)
    }

    fn score_all(&self, query: &str, params: Bm25Params) -> Vec<f32> {
        let mut scores = vec![0.0f32; self.index.num_docs()];
        let n_docs = self.index.num_docs() as f32;
        let avgdl = self.index.avg_doc_len();
        if self.index.num_docs() == 0 || avgdl == 0.0 {
            return scores;
        }

        let Bm25Params { k1, b } = params;
        for token in self.normalizer.normalize(query) {
            let Some(postings) = self.index.postings(&token) else {
                continue;
            };
            let df = postings.len() as f32;
            let idf = ((n_docs - df + 0.5) / (df + 0.5) + 1.0).ln();
            for (&doc, &tf) in postings {
                let tf = tf as f32;
                let dl = self.index.doc_len(doc) as f32;
                let denom = tf + k1 * (1.0 - b + b * dl / avgdl);
                scores[doc as usize] += idf * (tf * (k1 + 1.0)) / denom;
            }
        }
        scores
    }

    pub fn index(&self) -> &InvertedIndex {
        &self.index
    }
}
