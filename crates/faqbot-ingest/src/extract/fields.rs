//! `Q: ... A: ... K: ...` field extraction from raw command text.
//!
//! Markers are case-insensitive and must begin a word, so the `q:` at the end
//! of `faq:` in `add faq: Q: ...` is not taken as the question marker.

use once_cell::sync::Lazy;
use regex::Regex;

use super::ParsedFaq;

static MARKER: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\b([QAK]):").unwrap());

/// Pull question, answer and keywords out of raw text.
///
/// Each section runs from its marker to the next marker of any kind (or end),
/// so `K:` may appear before or after `A:`. Only the first occurrence of each
/// marker is used.
///
/// - question: after `Q:`
/// - answer: after `A:`
/// - keywords: comma-separated list after `K:`, entries trimmed, empties dropped
///
/// A missing marker or an empty section yields `None` for that field.
pub fn extract_fields(raw: &str) -> ParsedFaq {
    let markers: Vec<(char, usize, usize)> = MARKER
        .captures_iter(raw)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            let label = caps.get(1)?.as_str().chars().next()?.to_ascii_uppercase();
            Some((label, whole.start(), whole.end()))
        })
        .collect();

    ParsedFaq {
        question: section(raw, &markers, 'Q').and_then(non_empty),
        answer: section(raw, &markers, 'A').and_then(non_empty),
        keywords: section(raw, &markers, 'K')
            .map(split_keywords)
            .filter(|list| !list.is_empty()),
    }
}

/// Text after the first `label` marker, up to the following marker (or end).
fn section<'a>(raw: &'a str, markers: &[(char, usize, usize)], label: char) -> Option<&'a str> {
    let index = markers.iter().position(|(l, _, _)| *l == label)?;
    let start = markers[index].2;
    let end = markers.get(index + 1).map(|m| m.1).unwrap_or(raw.len());
    Some(&raw[start..end])
}

fn split_keywords(list: &str) -> Vec<String> {
    list.split(',')
        .map(str::trim)
        .filter(|k| !k.is_empty())
        .map(str::to_string)
        .collect()
}

fn non_empty(text: &str) -> Option<String> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
