use crate::corpus::Corpus;
use crate::normalize::Normalizer;
use std::collections::{HashMap, HashSet};

/// Dense internal document ordinal, assigned in corpus iteration order.
/// External string ids are resolved back through [`InvertedIndex::id_of`].
pub type DocId = u32;

/// Term -> (document -> raw term frequency), plus per-document token counts.
///
/// One structure serves both query families: Boolean matching reads the key
/// set of a term's inner map, the ranked models read the counts. Built once
/// from a corpus snapshot and never mutated; every document in the corpus is
/// registered here, including documents that normalize to zero tokens.
#[derive(Debug, Clone, Default)]
pub struct InvertedIndex {
    postings: HashMap<String, HashMap<DocId, u32>>,
    doc_ids: Vec<String>,
    ords: HashMap<String, DocId>,
    doc_lengths: Vec<u32>,
    total_tokens: u64,
}

impl InvertedIndex {
    /// Normalize every document and record per-term occurrence counts.
    ///
    /// Deterministic for a fixed corpus and normalizer: ordinals follow the
    /// corpus' id-ordered iteration, and map contents do not depend on any
    /// iteration order.
    pub fn build<N: Normalizer>(corpus: &Corpus, normalizer: &N) -> Self {
        let mut index = InvertedIndex::default();
        for (id, text) in corpus.iter() {
            let ord = index.doc_ids.len() as DocId;
            index.doc_ids.push(id.to_string());
            index.ords.insert(id.to_string(), ord);

            let tokens = normalizer.normalize(text);
            index.doc_lengths.push(tokens.len() as u32);
            index.total_tokens += tokens.len() as u64;

            let mut tf: HashMap<String, u32> = HashMap::new();
            for token in tokens {
                *tf.entry(token).or_insert(0) += 1;
            }
            for (term, count) in tf {
                index.postings.entry(term).or_default().insert(ord, count);
            }
        }
        tracing::info!(
            num_docs = index.doc_ids.len(),
            num_terms = index.postings.len(),
            total_tokens = index.total_tokens,
            "built inverted index"
        );
        index
    }

    pub fn num_docs(&self) -> usize {
        self.doc_ids.len()
    }

    /// Number of distinct terms in the index.
    pub fn num_terms(&self) -> usize {
        self.postings.len()
    }

    /// External ids in ordinal order.
    pub fn doc_ids(&self) -> &[String] {
        &self.doc_ids
    }

    pub fn id_of(&self, doc: DocId) -> Option<&str> {
        self.doc_ids.get(doc as usize).map(String::as_str)
    }

    pub fn ord_of(&self, doc_id: &str) -> Option<DocId> {
        self.ords.get(doc_id).copied()
    }

    /// The term's postings, `None` for terms the corpus never produced.
    pub fn postings(&self, term: &str) -> Option<&HashMap<DocId, u32>> {
        self.postings.get(term)
    }

    /// All (term, postings) pairs, in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &HashMap<DocId, u32>)> {
        self.postings.iter().map(|(term, map)| (term.as_str(), map))
    }

    /// Set of documents containing `term`. Unknown terms match nothing;
    /// a miss here is soft, never an error.
    pub fn doc_set(&self, term: &str) -> HashSet<DocId> {
        self.postings
            .get(term)
            .map(|map| map.keys().copied().collect())
            .unwrap_or_default()
    }

    /// Raw occurrence count of `term` in the document named `doc_id`,
    /// zero for absent pairs or unknown documents.
    pub fn frequency(&self, term: &str, doc_id: &str) -> u32 {
        let Some(ord) = self.ord_of(doc_id) else { return 0 };
        self.postings
            .get(term)
            .and_then(|map| map.get(&ord))
            .copied()
            .unwrap_or(0)
    }

    /// Number of documents containing `term` at least once.
    pub fn doc_frequency(&self, term: &str) -> usize {
        self.postings.get(term).map(HashMap::len).unwrap_or(0)
    }

    /// Post-normalization token count of a document, repeats included.
    pub fn doc_len(&self, doc: DocId) -> u32 {
        self.doc_lengths.get(doc as usize).copied().unwrap_or(0)
    }

    /// Mean token count across all documents, 0.0 for an empty corpus.
    pub fn avg_doc_len(&self) -> f32 {
        if self.doc_ids.is_empty() {
            return 0.0;
        }
        self.total_tokens as f32 / self.doc_ids.len() as f32
    }

    /// The full document set, for `NOT` complements.
    pub fn all_docs(&self) -> HashSet<DocId> {
        (0..self.doc_ids.len() as DocId).collect()
    }
}
