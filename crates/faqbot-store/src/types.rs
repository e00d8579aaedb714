//! Row types for FAQ entries and categories.

use serde::{Deserialize, Deserializer, Serialize};

/// Server-assigned row identifier. Integer in SQLite, either form in Postgres.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FaqId {
    Int(i64),
    Text(String),
}

impl std::fmt::Display for FaqId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Int(id) => write!(f, "{}", id),
            Self::Text(id) => write!(f, "{}", id),
        }
    }
}

/// An FAQ row as stored in `chatbot_faqs`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FaqEntry {
    pub id: FaqId,
    /// Null only on legacy rows; rows written by this service always carry one.
    #[serde(default)]
    pub category: Option<String>,
    pub question: String,
    pub answer: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub keywords: Vec<String>,
    #[serde(default = "default_active")]
    pub is_active: bool,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// Insert payload for `chatbot_faqs`. Built by the create pipeline after validation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewFaq {
    pub category: String,
    pub question: String,
    pub answer: String,
    pub keywords: Vec<String>,
    pub is_active: bool,
    pub image_url: Option<String>,
}

/// A row of `faq_categories`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub name: String,
}

impl Category {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// Filters for the FAQ search endpoint.
#[derive(Debug, Clone, Default)]
pub struct FaqQuery {
    /// Substring of the question, or an exact keyword.
    pub text: String,
    /// Restrict to one category (exact match).
    pub category: Option<String>,
}

fn default_active() -> bool {
    true
}

fn null_as_empty<'de, D>(deserializer: D) -> std::result::Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_from_rest_row() {
        let row = serde_json::json!({
            "id": 42,
            "category": null,
            "question": "Is there parking?",
            "answer": "Yes, free on site.",
            "keywords": null,
            "is_active": true,
            "image_url": null,
            "created_at": "2024-05-01T12:00:00.123456+00:00",
            "updated_at": "2024-05-01T12:00:00.123456+00:00"
        });

        let entry: FaqEntry = serde_json::from_value(row).unwrap();
        assert_eq!(entry.id, FaqId::Int(42));
        assert!(entry.category.is_none());
        assert!(entry.keywords.is_empty());
        assert!(entry.is_active);
    }

    #[test]
    fn test_uuid_id() {
        let row = serde_json::json!({
            "id": "0b8c8f4e-2a8e-4c1e-9d44-1f0c8f1b7a11",
            "question": "q",
            "answer": "a",
        });
        let entry: FaqEntry = serde_json::from_value(row).unwrap();
        assert_eq!(entry.id.to_string(), "0b8c8f4e-2a8e-4c1e-9d44-1f0c8f1b7a11");
        assert!(entry.is_active);
    }
}
