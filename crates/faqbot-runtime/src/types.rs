//! Runtime types.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use faqbot_store::FaqEntry;

/// Body of a create request. Structured fields take precedence over fields
/// parsed out of `raw`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateFaqRequest {
    pub category: Option<String>,
    pub question: Option<String>,
    pub answer: Option<String>,
    pub keywords: Option<Vec<String>>,
    pub is_active: Option<bool>,
    pub image_url: Option<String>,
    pub raw: Option<String>,
}

/// Which optional pipeline steps run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineOptions {
    /// Accept and parse `raw` command text. When off, `raw` is ignored.
    pub parse_raw: bool,
    /// Consult the category table before the fallback rules.
    pub category_lookup: bool,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            parse_raw: true,
            category_lookup: true,
        }
    }
}

/// Pipeline stages, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Stage {
    Received,
    Normalized,
    Validated,
    Classified,
    Persisted,
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Received => write!(f, "received"),
            Self::Normalized => write!(f, "normalized"),
            Self::Validated => write!(f, "validated"),
            Self::Classified => write!(f, "classified"),
            Self::Persisted => write!(f, "persisted"),
        }
    }
}

/// A stored FAQ plus the message echoed back to the chat user.
#[derive(Debug, Clone, Serialize)]
pub struct CreatedFaq {
    #[serde(flatten)]
    pub faq: FaqEntry,
    pub confirmation_message: String,
}

/// Client-side input problems (reported as 400).
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    #[error("Invalid FAQ format")]
    InvalidFormat,

    #[error("Missing required fields: question and answer")]
    MissingFields,
}

impl Rejection {
    /// Chat-facing explanation, distinct from the technical error string.
    pub fn confirmation_message(&self) -> &'static str {
        match self {
            Self::InvalidFormat => {
                "Please provide FAQ in Q: ... A: ... format or include a trigger phrase."
            }
            Self::MissingFields => "Please provide both a question and an answer.",
        }
    }
}

/// Why a create did not produce a row.
#[derive(Error, Debug)]
pub enum CreateError {
    #[error(transparent)]
    Rejected(#[from] Rejection),

    #[error("Store error: {0}")]
    Store(#[from] faqbot_core::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_accepts_partial_body() {
        let req: CreateFaqRequest =
            serde_json::from_value(serde_json::json!({ "raw": "add faq Q: a A: b" })).unwrap();
        assert!(req.question.is_none());
        assert!(req.is_active.is_none());
        assert_eq!(req.raw.as_deref(), Some("add faq Q: a A: b"));
    }

    #[test]
    fn test_rejection_messages_differ_from_errors() {
        for r in [Rejection::InvalidFormat, Rejection::MissingFields] {
            assert_ne!(r.to_string(), r.confirmation_message());
        }
    }
}
