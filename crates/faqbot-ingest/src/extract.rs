//! Heuristic FAQ extraction from chatbot input.
//!
//! Decides whether free text is an FAQ-creation command, pulls the
//! question/answer/keyword sections out of it, derives keywords when none
//! were given, and infers a category from the question.

pub mod category;
pub mod fields;
pub mod keywords;
pub mod trigger;

use serde::{Deserialize, Serialize};

/// Fields recovered from a raw command. Any of them may be missing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedFaq {
    pub question: Option<String>,
    pub answer: Option<String>,
    pub keywords: Option<Vec<String>>,
}

/// Raw text is accepted as a command if it carries a trigger phrase or is Q/A-shaped.
pub fn is_faq_command(raw: &str) -> bool {
    trigger::is_trigger_match(Some(raw)) || trigger::looks_like_qa(raw)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_acceptance() {
        assert!(is_faq_command("add faq"));
        assert!(is_faq_command("Q: What time is breakfast? A: 7am to 10am"));
        assert!(!is_faq_command("hello there"));
        assert!(!is_faq_command(""));
    }
}
