use crate::index::{DocId, InvertedIndex};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// One ranked result. Zero-score documents are reported too; whether to show
/// them is the caller's choice.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchHit {
    pub doc_id: String,
    pub score: f32,
}

/// Order a full score vector (one slot per document ordinal) into hits:
/// descending score, ties broken by ordinal so repeated runs and permuted
/// corpora rank identically.
pub(crate) fn sorted_hits(index: &InvertedIndex, scores: Vec<f32>) -> Vec<SearchHit> {
    let mut scored: Vec<(DocId, f32)> = scores
        .into_iter()
        .enumerate()
        .map(|(ord, score)| (ord as DocId, score))
        .collect();
    scored.sort_by(|a, b| {
        b.1.partial_cmp(&a.1)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.0.cmp(&b.0))
    });
    scored
        .into_iter()
        .filter_map(|(ord, score)| {
            index.id_of(ord).map(|id| SearchHit {
                doc_id: id.to_string(),
                score,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::corpus::Corpus;
    use crate::normalize::WhitespaceNormalizer;

    fn index_of(pairs: &[(&str, &str)]) -> InvertedIndex {
        let corpus = Corpus::from_pairs(pairs.iter().copied());
        InvertedIndex::build(&corpus, &WhitespaceNormalizer)
    }

    #[test]
    fn sorts_descending_then_by_ordinal() {
        let index = index_of(&[("a", "x"), ("b", "x"), ("c", "x")]);
        let hits = sorted_hits(&index, vec![0.5, 0.9, 0.5]);
        let ids: Vec<&str> = hits.iter().map(|h| h.doc_id.as_str()).collect();
        assert_eq!(ids, vec!["b", "a", "c"]);
    }

    #[test]
    fn zero_scores_are_kept() {
        let index = index_of(&[("a", "x"), ("b", "x")]);
        let hits = sorted_hits(&index, vec![0.0, 1.0]);
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[1].doc_id, "a");
        assert_eq!(hits[1].score, 0.0);
    }

    #[test]
    fn hit_serializes_flat() {
        let hit = SearchHit {
            doc_id: "d1".to_string(),
            score: 0.5,
        };
        let json = serde_json::to_value(&hit).unwrap();
        assert_eq!(json, serde_json::json!({"doc_id": "d1", "score": 0.5}));
    }
}
