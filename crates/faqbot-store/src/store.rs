//! Store capabilities consumed by the pipeline and the HTTP layer.

use async_trait::async_trait;

use crate::types::{Category, FaqEntry, FaqQuery, NewFaq};
use faqbot_core::Result;

/// Read access to the pre-seeded category table.
#[async_trait]
pub trait CategorySource: Send + Sync {
    /// All categories, ordered by name.
    async fn list_categories(&self) -> Result<Vec<Category>>;
}

/// Full FAQ persistence contract. Every call is a single round-trip with no retry.
#[async_trait]
pub trait FaqStore: CategorySource {
    /// Insert one row and return it as stored (with id and timestamp).
    async fn insert_faq(&self, faq: &NewFaq) -> Result<FaqEntry>;

    /// Active rows whose question contains `query.text` (case-insensitive)
    /// or whose keywords contain it exactly. `%` and `_` in the text match literally.
    async fn search_faqs(&self, query: &FaqQuery) -> Result<Vec<FaqEntry>>;

    /// Most recently created rows, newest first.
    async fn recent_faqs(&self, limit: usize) -> Result<Vec<FaqEntry>>;

    /// Non-null `category` values present on FAQ rows (may repeat).
    async fn faq_categories(&self) -> Result<Vec<String>>;

    /// Cheapest possible query against `chatbot_faqs`.
    async fn ping(&self) -> Result<()>;

    /// Short backend label for health output.
    fn backend(&self) -> &'static str;
}
