//! Faqbot Ingest: trigger detection, field extraction, keywords and category inference.

pub mod extract;

pub use extract::category::{fallback_category, match_known_category, DEFAULT_CATEGORY};
pub use extract::fields::extract_fields;
pub use extract::keywords::{extract_keywords, normalize_keywords, MAX_KEYWORDS};
pub use extract::trigger::{is_trigger_match, looks_like_qa};
pub use extract::{is_faq_command, ParsedFaq};
