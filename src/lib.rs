//! Three classic text retrieval models over one in-memory inverted index:
//! exact Boolean matching, TF-IDF cosine ranking, and Okapi BM25.
//!
//! ```
//! use trove::{Bm25Model, BooleanModel, Corpus};
//!
//! let mut corpus = Corpus::new();
//! corpus.insert("a.txt", "the cat sat on the mat");
//! corpus.insert("b.txt", "a dog barked at the cat");
//!
//! let matches = BooleanModel::new(&corpus).query("cat AND dog")?;
//! assert_eq!(matches.len(), 1);
//!
//! let ranked = Bm25Model::new(&corpus).rank("cat", 2);
//! assert_eq!(ranked[0].doc_id, "a.txt");
//! # Ok::<(), trove::QueryError>(())
//! ```

pub mod bm25;
pub mod boolean;
pub mod corpus;
pub mod index;
pub mod normalize;
pub mod rank;
pub mod vsm;

pub use bm25::{Bm25Model, Bm25Params};
pub use boolean::{BooleanModel, QueryError};
pub use corpus::{Corpus, DEFAULT_DOC_CAP};
pub use index::{DocId, InvertedIndex};
pub use normalize::{Normalizer, SimpleNormalizer, WhitespaceNormalizer};
pub use rank::SearchHit;
pub use vsm::VectorSpaceModel;
