use anyhow::{Context, Result};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use walkdir::WalkDir;

/// Per-document character cap applied by [`Corpus::from_dir_capped`] callers
/// that want the historical default.
pub const DEFAULT_DOC_CAP: usize = 100_000;

/// An immutable snapshot of documents: external id -> raw text.
///
/// Ids are expected to be non-empty and unique; inserting an id twice keeps
/// the latest text. Documents are held in a `BTreeMap`, so iteration order is
/// a function of the ids alone. Models derive their internal document
/// ordinals from this order, which keeps rankings reproducible and
/// independent of insertion order.
#[derive(Debug, Clone, Default)]
pub struct Corpus {
    docs: BTreeMap<String, String>,
}

impl Corpus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add (or replace) one document.
    pub fn insert(&mut self, id: impl Into<String>, text: impl Into<String>) {
        self.docs.insert(id.into(), text.into());
    }

    /// Build a corpus from any (id, text) iterator.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut corpus = Self::new();
        for (id, text) in pairs {
            corpus.insert(id, text);
        }
        corpus
    }

    /// Load every `.txt` file under `root` (recursively), keyed by file name.
    ///
    /// File names, not full paths, become document ids; if two files share a
    /// name the one walked last wins.
    pub fn from_dir(root: impl AsRef<Path>) -> Result<Self> {
        Self::load_dir(root.as_ref(), None)
    }

    /// Like [`Corpus::from_dir`], truncating each document to at most
    /// `max_len` characters (on a char boundary).
    pub fn from_dir_capped(root: impl AsRef<Path>, max_len: usize) -> Result<Self> {
        Self::load_dir(root.as_ref(), Some(max_len))
    }

    fn load_dir(root: &Path, max_len: Option<usize>) -> Result<Self> {
        let mut corpus = Self::new();
        for entry in WalkDir::new(root).sort_by_file_name() {
            let entry =
                entry.with_context(|| format!("walking corpus directory {}", root.display()))?;
            let path = entry.path();
            if !path.is_file() || path.extension().and_then(|s| s.to_str()) != Some("txt") {
                continue;
            }
            let name = match path.file_name().and_then(|s| s.to_str()) {
                Some(name) => name.to_string(),
                None => continue,
            };
            let mut text = fs::read_to_string(path)
                .with_context(|| format!("reading corpus document {}", path.display()))?;
            if let Some(cap) = max_len {
                text = cap_chars(text, cap);
            }
            tracing::debug!(doc = %name, bytes = text.len(), "loaded corpus document");
            corpus.insert(name, text);
        }
        tracing::info!(num_docs = corpus.len(), root = %root.display(), "loaded corpus");
        Ok(corpus)
    }

    pub fn get(&self, id: &str) -> Option<&str> {
        self.docs.get(id).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.docs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.docs.is_empty()
    }

    /// Documents in id order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.docs.iter().map(|(id, text)| (id.as_str(), text.as_str()))
    }

    /// Document ids in iteration order.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.docs.keys().map(String::as_str)
    }
}

fn cap_chars(text: String, max_len: usize) -> String {
    match text.char_indices().nth(max_len) {
        Some((byte, _)) => {
            let mut text = text;
            text.truncate(byte);
            text
        }
        None => text,
    }
}
