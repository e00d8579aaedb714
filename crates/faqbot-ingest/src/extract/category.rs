//! Category inference from question text.
//!
//! Known category names (from the category table) are matched first as plain
//! substrings; otherwise a fixed, ordered rule list decides, ending in
//! [`DEFAULT_CATEGORY`].

use once_cell::sync::Lazy;
use regex::Regex;

/// Bucket used when nothing else matches.
pub const DEFAULT_CATEGORY: &str = "general";

/// Fallback rules in priority order: (category, whole-word pattern).
pub const FALLBACK_RULES: &[(&str, &str)] = &[
    (
        "amenities & facilities",
        r"\b(rooms?|hotel|stay|check-?in|check-?out|pool|wifi|parking|gym|spa)\b",
    ),
    (
        "dining",
        r"\b(food|drinks?|restaurants?|menu|breakfast|lunch|dinner|bar)\b",
    ),
    (
        "activities",
        r"\b(bikes?|kayaks?|snorkel(ing)?|tours?|trips?|dive|diving)\b",
    ),
    (
        "policies",
        r"\b(policy|policies|rules?|pets?|dogs?|cats?|smoke|smoking|cancel|cancellation)\b",
    ),
    (
        "weather",
        r"\b(weather|rain|sun|sunny|temperature|climate)\b",
    ),
    (
        "beach & safety",
        r"\b(beach|swim|swimming|lifeguards?|jellyfish|safety|tides?)\b",
    ),
];

static COMPILED_RULES: Lazy<Vec<(&'static str, Regex)>> = Lazy::new(|| {
    FALLBACK_RULES
        .iter()
        .map(|(category, pattern)| (*category, Regex::new(pattern).unwrap()))
        .collect()
});

/// First known category whose name appears (case-insensitively) in the question.
///
/// `names` is scanned in the order given, so the caller's ordering breaks ties.
pub fn match_known_category<'a, I>(question: &str, names: I) -> Option<&'a str>
where
    I: IntoIterator<Item = &'a str>,
{
    let question = question.to_lowercase();
    if question.trim().is_empty() {
        return None;
    }
    names.into_iter().find(|name| {
        let name = name.trim().to_lowercase();
        !name.is_empty() && question.contains(&name)
    })
}

/// Apply the fixed rule list; the first matching rule wins.
pub fn fallback_category(question: &str) -> &'static str {
    let question = question.to_lowercase();
    COMPILED_RULES
        .iter()
        .find(|(_, re)| re.is_match(&question))
        .map(|(category, _)| *category)
        .unwrap_or(DEFAULT_CATEGORY)
}
