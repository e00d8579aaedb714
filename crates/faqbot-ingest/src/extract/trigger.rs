//! Command trigger detection for free-text FAQ input.

use once_cell::sync::Lazy;
use regex::Regex;

/// Lowercase command phrases that mark text as an FAQ-creation command.
pub const TRIGGER_PHRASES: &[&str] = &[
    "/faq",
    "slash faq",
    "add faq",
    "new faq",
    "hey coco add faq",
    "hey coco new faq",
];

/// Minimum Jaro-Winkler similarity for a fuzzy trigger match.
pub const FUZZY_THRESHOLD: f64 = 0.8;

static QA_SHAPE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)\bQ:\s*\S.*?\bA:\s*\S").unwrap());

/// True if the text starts with a trigger phrase, or is close enough to one.
///
/// Prefix and similarity are independent checks; either one suffices.
pub fn is_trigger_match(input: Option<&str>) -> bool {
    let normalized = match input {
        Some(text) => text.trim().to_lowercase(),
        None => return false,
    };
    if normalized.is_empty() {
        return false;
    }

    TRIGGER_PHRASES.iter().any(|phrase| {
        normalized.starts_with(phrase)
            || strsim::jaro_winkler(&normalized, phrase) >= FUZZY_THRESHOLD
    })
}

/// True if the text carries a `Q:` marker followed by an `A:` marker, both with content.
pub fn looks_like_qa(input: &str) -> bool {
    QA_SHAPE.is_match(input.trim())
}
