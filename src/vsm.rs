//! TF-IDF vector-space ranking with cosine similarity.

use crate::corpus::Corpus;
use crate::index::InvertedIndex;
use crate::normalize::{Normalizer, SimpleNormalizer};
use crate::rank::{sorted_hits, SearchHit};
use std::collections::{BTreeMap, HashMap};

/// Ranked retrieval over TF-IDF document vectors.
///
/// Each document is a vector of `tf * idf` weights with
/// `idf = log2(N / (df + 1)) + 1`; queries are weighted the same way and
/// compared by cosine similarity. Idf stays strictly positive, so a term in
/// every document still contributes a little instead of vanishing.
pub struct VectorSpaceModel<N = SimpleNormalizer> {
    index: InvertedIndex,
    idf: HashMap<String, f32>,
    doc_norms: Vec<f32>,
    normalizer: N,
}

impl VectorSpaceModel<SimpleNormalizer> {
    /// Build the model over `corpus` with the default [`SimpleNormalizer`].
    pub fn new(corpus: &Corpus) -> Self {
        Self::with_normalizer(corpus, SimpleNormalizer)
    }
}

impl<N: Normalizer> VectorSpaceModel<N> {
    /// Build the model with a caller-supplied normalizer. The same normalizer
    /// is applied to queries at rank time.
    pub fn with_normalizer(corpus: &Corpus, normalizer: N) -> Self {
        let index = InvertedIndex::build(corpus, &normalizer);
        let n_docs = index.num_docs() as f32;

        let mut idf = HashMap::with_capacity(index.num_terms());
        let mut doc_norms = vec![0.0f32; index.num_docs()];
        // sorted term order fixes the accumulation sequence, so rebuilding
        // over the same corpus reproduces every norm bitwise
        let mut terms: Vec<_> = index.iter().collect();
        terms.sort_unstable_by_key(|&(term, _)| term);
        for (term, postings) in terms {
            let df = postings.len() as f32;
            let idf_t = (n_docs / (df + 1.0)).log2() + 1.0;
            for (&doc, &tf) in postings {
                let weight = tf as f32 * idf_t;
                doc_norms[doc as usize] += weight * weight;
            }
            idf.insert(term.to_string(), idf_t);
        }
        for norm in &mut doc_norms {
            *norm = norm.sqrt();
        }
        tracing::debug!(
            num_docs = index.num_docs(),
            num_terms = index.num_terms(),
            "computed tf-idf document vectors"
        );

        Self {
            index,
            idf,
            doc_norms,
            normalizer,
        }
    }

    /// Cosine similarity of `query` against every document, best first.
    ///
    /// Every document appears in the output, zero-scored ones included. Ties
    /// break toward the document indexed earlier, so a given corpus and query
    /// always produce the same ordering.
    pub fn rank_all(&self, query: &str) -> Vec<SearchHit> {
        let mut scores = vec![0.0f32; self.index.num_docs()];

        // BTreeMap keeps term iteration ordered, so the float accumulation
        // below runs in the same sequence on every call
        let mut q_tf: BTreeMap<String, u32> = BTreeMap::new();
        for token in self.normalizer.normalize(query) {
            *q_tf.entry(token).or_insert(0) += 1;
        }

        let mut q_norm = 0.0f32;
        for (term, &tf_q) in &q_tf {
            let Some(&idf_t) = self.idf.get(term) else {
                continue;
            };
            let wq = tf_q as f32 * idf_t;
            q_norm += wq * wq;
            if let Some(postings) = self.index.postings(term) {
                for (&doc, &tf_d) in postings {
                    scores[doc as usize] += wq * (tf_d as f32 * idf_t);
                }
            }
        }
        let q_norm = q_norm.sqrt();

        if q_norm > 0.0 {
            for (score, &doc_norm) in scores.iter_mut().zip(&self.doc_norms) {
                if doc_norm > 0.0 {
                    *score /= q_norm * doc_norm;
                }
            }
        }

        sorted_hits(&self.index, scores)
    }

    /// The top `n` hits of [`rank_all`](Self::rank_all).
    pub fn rank(&self, query: &str, n: usize) -> Vec<SearchHit> {
        let mut hits = self.rank_all(query);
        hits.truncate(n);
        hits
    }

    pub fn index(&self) -> &InvertedIndex {
        &self.index
    }
}
