//! FAQ routes: create, search, categories, recent list.

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;
use tracing::{debug, warn};

use crate::error::ApiError;
use crate::state::AppState;
use faqbot_runtime::{CreateFaqRequest, CreatedFaq};
use faqbot_store::{FaqEntry, FaqQuery};

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/faq", post(create_faq))
        .route("/faq/search", get(search_faqs))
        .route("/faq/categories", get(list_categories))
        .route("/faq/list", get(list_recent))
}

// ---------------------------------------------------------------
// Create
// ---------------------------------------------------------------

/// POST /api/faq: structured fields or a raw chat command.
async fn create_faq(
    State(state): State<Arc<AppState>>,
    body: Result<Json<CreateFaqRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<CreatedFaq>), ApiError> {
    let Json(req) = body.map_err(|e| {
        debug!("Rejected create body: {}", e);
        ApiError::bad_request(
            "Invalid request body",
            "Please send the FAQ as a JSON object.",
        )
    })?;

    let created = state.pipeline.create(state.store.as_ref(), req).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

// ---------------------------------------------------------------
// Search
// ---------------------------------------------------------------

#[derive(Deserialize)]
struct SearchParams {
    query: Option<String>,
    category: Option<String>,
}

/// GET /api/faq/search?query=&category=: active FAQs only.
async fn search_faqs(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SearchParams>,
) -> Result<Json<Vec<FaqEntry>>, ApiError> {
    let text = match params.query.map(|q| q.trim().to_string()) {
        Some(q) if !q.is_empty() => q,
        _ => {
            return Err(ApiError::bad_request(
                "Missing query parameter",
                "Please provide a search query.",
            ))
        }
    };

    let query = FaqQuery {
        text,
        category: params
            .category
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty()),
    };

    let results = state.store.search_faqs(&query).await.map_err(|e| {
        ApiError::store(
            &e,
            "Failed to search FAQs",
            "Sorry, there was an error while searching FAQs.",
        )
    })?;
    debug!("Search {:?} returned {} rows", query.text, results.len());
    Ok(Json(results))
}

// ---------------------------------------------------------------
// Categories
// ---------------------------------------------------------------

/// GET /api/faq/categories: category table, else categories seen on FAQs.
async fn list_categories(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<String>>, ApiError> {
    match state.store.list_categories().await {
        Ok(categories) if !categories.is_empty() => {
            return Ok(Json(categories.into_iter().map(|c| c.name).collect()));
        }
        Ok(_) => debug!("Category table empty, using FAQ categories"),
        Err(e) => warn!("Category table unavailable, using FAQ categories: {}", e),
    }

    let mut names = state.store.faq_categories().await.map_err(|e| {
        ApiError::store(
            &e,
            "Failed to fetch categories",
            "Sorry, there was an error while fetching categories.",
        )
    })?;
    names.sort();
    names.dedup();
    Ok(Json(names))
}

// ---------------------------------------------------------------
// Recent
// ---------------------------------------------------------------

/// GET /api/faq/list: most recent FAQs.
async fn list_recent(
    State(state): State<Arc<AppState>>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let faqs = state
        .store
        .recent_faqs(state.config.list_limit)
        .await
        .map_err(|e| {
            ApiError::store(
                &e,
                "Failed to list FAQs",
                "Sorry, there was an error while listing FAQs.",
            )
        })?;

    Ok(Json(serde_json::json!({
        "count": faqs.len(),
        "faqs": faqs,
    })))
}
