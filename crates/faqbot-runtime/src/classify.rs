//! Category resolution against the category table with rule fallback.

use tracing::{debug, warn};

use faqbot_ingest::{fallback_category, match_known_category};
use faqbot_store::CategorySource;

/// Resolve the category for a question. Never fails.
///
/// 1. a non-blank `provided` category is returned unchanged
/// 2. with `lookup`, the first table category contained in the question
/// 3. the fixed fallback rules, ending in `"general"`
///
/// A failing table lookup is logged and skipped.
pub async fn resolve_category<C>(
    source: &C,
    question: &str,
    provided: Option<&str>,
    lookup: bool,
) -> String
where
    C: CategorySource + ?Sized,
{
    if let Some(category) = provided.filter(|c| !c.trim().is_empty()) {
        return category.to_string();
    }

    if lookup && !question.trim().is_empty() {
        match source.list_categories().await {
            Ok(categories) => {
                let names = categories.iter().map(|c| c.name.as_str());
                if let Some(name) = match_known_category(question, names) {
                    debug!("Category {:?} matched from table", name);
                    return name.to_string();
                }
            }
            Err(e) => {
                warn!("Category lookup failed, using fallback rules: {}", e);
            }
        }
    }

    let category = fallback_category(question);
    debug!("Category {:?} from fallback rules", category);
    category.to_string()
}
