use lazy_static::lazy_static;
use regex::Regex;
use rust_stemmers::{Algorithm, Stemmer};
use std::collections::HashSet;
use unicode_normalization::UnicodeNormalization;

/// English stopwords (the NLTK set, contractions included).
///
/// Checked against the raw lowercased token, before stemming.
const STOPWORDS: &[&str] = &[
    "a", "about", "above", "after", "again", "against", "all", "am", "an", "and", "any", "are",
    "aren't", "as", "at", "be", "because", "been", "before", "being", "below", "between", "both",
    "but", "by", "can", "can't", "cannot", "could", "couldn't", "did", "didn't", "do", "does",
    "doesn't", "doing", "don't", "down", "during", "each", "few", "for", "from", "further", "had",
    "hadn't", "has", "hasn't", "have", "haven't", "having", "he", "he'd", "he'll", "he's", "her",
    "here", "here's", "hers", "herself", "him", "himself", "his", "how", "how's", "i", "i'd",
    "i'll", "i'm", "i've", "if", "in", "into", "is", "isn't", "it", "it's", "its", "itself",
    "let's", "me", "more", "most", "mustn't", "my", "myself", "no", "nor", "not", "of", "off",
    "on", "once", "only", "or", "other", "ought", "our", "ours", "ourselves", "out", "over",
    "own", "same", "she", "she'd", "she'll", "she's", "should", "shouldn't", "so", "some", "such",
    "than", "that", "that's", "the", "their", "theirs", "them", "themselves", "then", "there",
    "there's", "these", "they", "they'd", "they'll", "they're", "they've", "this", "those",
    "through", "to", "too", "under", "until", "up", "very", "was", "wasn't", "we", "we'd",
    "we'll", "we're", "we've", "were", "weren't", "what", "what's", "when", "when's", "where",
    "where's", "which", "while", "who", "who's", "whom", "why", "why's", "with", "won't",
    "would", "wouldn't", "you", "you'd", "you'll", "you're", "you've", "your", "yours",
    "yourself", "yourselves",
];

lazy_static! {
    static ref TOKEN_RE: Regex = Regex::new(r"(?u)\p{L}[\p{L}\p{N}_']*").expect("valid regex");
    static ref URL_RE: Regex = Regex::new(r"https?://\S+").expect("valid regex");
    static ref EMAIL_RE: Regex = Regex::new(r"\S+@\S+\.\S+").expect("valid regex");
    static ref STEMMER: Stemmer = Stemmer::create(Algorithm::English);
    static ref STOPWORD_SET: HashSet<&'static str> = STOPWORDS.iter().copied().collect();
}

fn is_stopword(token: &str) -> bool {
    STOPWORD_SET.contains(token)
}

/// Turns raw text into the ordered token sequence the indexes are built from.
///
/// Every model normalizes documents through one of these, and the ranked
/// models normalize queries through the same instance, so document and query
/// vocabularies always agree. Implementations must produce lowercase,
/// punctuation-free tokens; beyond that the pipeline is theirs to choose.
pub trait Normalizer {
    fn normalize(&self, text: &str) -> Vec<String>;
}

/// Full normalization pipeline: NFKC fold, lowercase, URL and e-mail removal,
/// Unicode word tokenization, English stopword removal, Snowball stemming.
#[derive(Debug, Clone, Copy, Default)]
pub struct SimpleNormalizer;

impl Normalizer for SimpleNormalizer {
    fn normalize(&self, text: &str) -> Vec<String> {
        let folded = text.nfkc().collect::<String>().to_lowercase();
        let stripped = URL_RE.replace_all(&folded, " ");
        let stripped = EMAIL_RE.replace_all(&stripped, " ");

        let mut tokens = Vec::new();
        for mat in TOKEN_RE.find_iter(&stripped) {
            let token = mat.as_str();
            if is_stopword(token) {
                continue;
            }
            tokens.push(STEMMER.stem(token).to_string());
        }
        tokens
    }
}

/// Lowercase + whitespace split, nothing else. No stopword removal, no
/// stemming, numbers kept. Useful where the exact token stream matters.
#[derive(Debug, Clone, Copy, Default)]
pub struct WhitespaceNormalizer;

impl Normalizer for WhitespaceNormalizer {
    fn normalize(&self, text: &str) -> Vec<String> {
        text.to_lowercase()
            .split_whitespace()
            .map(str::to_string)
            .collect()
    }
}
