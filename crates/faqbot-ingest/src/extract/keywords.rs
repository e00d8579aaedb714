//! Keyword extraction: stopword-filtered tokenization of question + answer.

use once_cell::sync::Lazy;
use std::collections::HashSet;

/// Upper bound on stored keywords per FAQ.
pub const MAX_KEYWORDS: usize = 10;

/// Standard English stopword list.
static STOPWORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "about", "above", "after", "again", "all", "also", "am", "an", "and", "another",
        "any", "are", "as", "at", "be", "because", "been", "before", "being", "below",
        "between", "both", "but", "by", "came", "can", "cannot", "come", "could", "did",
        "do", "does", "doing", "during", "each", "few", "for", "from", "further", "get",
        "got", "has", "had", "he", "have", "her", "here", "him", "himself", "his", "how",
        "i", "if", "in", "into", "is", "it", "its", "itself", "like", "make", "many", "me",
        "might", "more", "most", "much", "must", "my", "myself", "never", "now", "of",
        "on", "only", "or", "other", "our", "ours", "ourselves", "out", "over", "own",
        "said", "same", "see", "should", "since", "so", "some", "still", "such", "take",
        "than", "that", "the", "their", "theirs", "them", "themselves", "then", "there",
        "these", "they", "this", "those", "through", "to", "too", "under", "until", "up",
        "very", "was", "way", "we", "well", "were", "what", "where", "when", "which",
        "while", "who", "whom", "with", "would", "why", "you", "your", "yours",
        "yourself", "a", "b", "c", "d", "e", "f", "g", "h", "j", "k", "l", "m", "n", "o",
        "p", "q", "r", "s", "t", "u", "v", "w", "x", "y", "z",
    ]
    .into_iter()
    .collect()
});

/// Extract up to [`MAX_KEYWORDS`] keywords from a question and its answer.
///
/// Lowercased word tokens are kept only if purely alphabetic and not a
/// stopword; duplicates are dropped keeping first-seen order.
pub fn extract_keywords(question: &str, answer: &str) -> Vec<String> {
    let text = format!("{} {}", question, answer).to_lowercase();
    let mut seen = HashSet::new();
    let mut keywords = Vec::new();

    for token in text.split(|c: char| !(c.is_alphanumeric() || c == '_')) {
        if token.is_empty() || !is_ascii_alpha(token) || STOPWORDS.contains(token) {
            continue;
        }
        if seen.insert(token) {
            keywords.push(token.to_string());
            if keywords.len() == MAX_KEYWORDS {
                break;
            }
        }
    }

    keywords
}

/// Bring caller-supplied keywords to the stored form: lowercase alphabetic
/// tokens, deduplicated, at most [`MAX_KEYWORDS`]. Stopwords are kept.
pub fn normalize_keywords<S: AsRef<str>>(entries: &[S]) -> Vec<String> {
    let mut keywords: Vec<String> = Vec::new();

    for entry in entries {
        let lower = entry.as_ref().to_lowercase();
        for token in lower.split(|c: char| !c.is_alphanumeric()) {
            if token.is_empty() || !is_ascii_alpha(token) {
                continue;
            }
            if !keywords.iter().any(|k| k == token) {
                keywords.push(token.to_string());
                if keywords.len() == MAX_KEYWORDS {
                    return keywords;
                }
            }
        }
    }

    keywords
}

fn is_ascii_alpha(token: &str) -> bool {
    token.bytes().all(|b| b.is_ascii_lowercase())
}
