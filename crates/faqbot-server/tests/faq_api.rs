//! Router tests for the FAQ API.
//!
//! Each test builds the full router over an in-memory SQLite store (or a
//! failing fixture) and drives it with `oneshot`, no listener needed.
//!
//! Run with: `cargo test -p faqbot-server --test faq_api`

use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use faqbot_core::{Error, FaqConfig, Result};
use faqbot_server::{build_router, AppState};
use faqbot_store::{
    Category, CategorySource, FaqEntry, FaqQuery, FaqStore, NewFaq, SqliteStore,
};

// ── harness ──

fn sqlite_config() -> FaqConfig {
    FaqConfig::from_vars(|key| match key {
        "FAQ_STORE" => Some("sqlite".to_string()),
        "FAQ_LIST_LIMIT" => Some("3".to_string()),
        _ => None,
    })
    .expect("sqlite config")
}

fn app_with(store: Arc<dyn FaqStore>) -> Router {
    build_router(Arc::new(AppState::new(sqlite_config(), store)))
}

fn app() -> (Router, Arc<SqliteStore>) {
    let store = Arc::new(SqliteStore::open_in_memory().expect("in-memory store"));
    (app_with(store.clone()), store)
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

async fn send(app: &Router, req: Request<Body>) -> (StatusCode, Value) {
    let resp = app.clone().oneshot(req).await.unwrap();
    let status = resp.status();
    let bytes = resp.into_body().collect().await.unwrap().to_bytes();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, body)
}

/// Every call fails as if the database were down.
struct DownStore;

#[async_trait]
impl CategorySource for DownStore {
    async fn list_categories(&self) -> Result<Vec<Category>> {
        Err(Error::Http("connection refused".into()))
    }
}

#[async_trait]
impl FaqStore for DownStore {
    async fn insert_faq(&self, _faq: &NewFaq) -> Result<FaqEntry> {
        Err(Error::Http("connection refused".into()))
    }
    async fn search_faqs(&self, _query: &FaqQuery) -> Result<Vec<FaqEntry>> {
        Err(Error::Http("connection refused".into()))
    }
    async fn recent_faqs(&self, _limit: usize) -> Result<Vec<FaqEntry>> {
        Err(Error::Http("connection refused".into()))
    }
    async fn faq_categories(&self) -> Result<Vec<String>> {
        Err(Error::Http("connection refused".into()))
    }
    async fn ping(&self) -> Result<()> {
        Err(Error::Http("connection refused".into()))
    }
    fn backend(&self) -> &'static str {
        "down"
    }
}

// ── create ──

#[tokio::test]
async fn test_create_structured_fills_category_and_keywords() {
    let (app, _store) = app();
    let (status, body) = send(
        &app,
        post_json(
            "/api/faq",
            json!({
                "question": "Do you have WiFi?",
                "answer": "Yes, free WiFi everywhere.",
                "category": "",
                "keywords": [],
            }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["question"], "Do you have WiFi?");
    assert_eq!(body["category"], "amenities & facilities");
    assert!(!body["keywords"].as_array().unwrap().is_empty());
    assert_eq!(body["is_active"], true);
    assert!(body["id"].is_number());
    assert!(body["created_at"].is_string());
    assert!(body["confirmation_message"]
        .as_str()
        .unwrap()
        .contains("Do you have WiFi?"));
}

#[tokio::test]
async fn test_create_from_raw_command() {
    let (app, store) = app();
    store.add_category("dining").unwrap();

    let (status, body) = send(
        &app,
        post_json(
            "/api/faq",
            json!({ "raw": "hey coco add faq Q: What time is breakfast? A: 7am to 10am K: breakfast, hours" }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["question"], "What time is breakfast?");
    assert_eq!(body["answer"], "7am to 10am");
    assert_eq!(body["keywords"], json!(["breakfast", "hours"]));
    assert_eq!(body["category"], "dining");
}

#[tokio::test]
async fn test_create_rejects_unrecognized_raw() {
    let (app, store) = app();
    let (status, body) = send(&app, post_json("/api/faq", json!({ "raw": "hello there" }))).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid FAQ format");
    assert!(body["confirmation_message"].as_str().unwrap().contains("Q:"));
    assert_eq!(store.count_faqs().unwrap(), 0);
}

#[tokio::test]
async fn test_create_rejects_missing_answer() {
    let (app, _store) = app();
    let (status, body) = send(
        &app,
        post_json("/api/faq", json!({ "question": "Is there a gym?" })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Missing required fields: question and answer");
    assert_eq!(
        body["confirmation_message"],
        "Please provide both a question and an answer."
    );
}

#[tokio::test]
async fn test_create_rejects_malformed_body() {
    let (app, _store) = app();
    let req = Request::builder()
        .method(Method::POST)
        .uri("/api/faq")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let (status, body) = send(&app, req).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["confirmation_message"].is_string());
}

#[tokio::test]
async fn test_create_store_failure_is_generic_500() {
    let app = app_with(Arc::new(DownStore));
    let (status, body) = send(
        &app,
        post_json(
            "/api/faq",
            json!({ "question": "Is there a gym?", "answer": "Yes." }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "Failed to save FAQ");
    assert!(!body["error"].as_str().unwrap().contains("refused"));
    assert_eq!(
        body["confirmation_message"],
        "Sorry, there was an error while adding your FAQ."
    );
}

#[tokio::test]
async fn test_wrong_method_is_405() {
    let (app, _store) = app();
    let (status, _) = send(&app, get("/api/faq")).await;
    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
}

// ── search ──

#[tokio::test]
async fn test_search_filters_active_and_category() {
    let (app, _store) = app();
    for body in [
        json!({ "question": "Is the pool heated?", "answer": "Yes.", "category": "amenities" }),
        json!({ "question": "Pool towels?", "answer": "At the desk.", "category": "front desk" }),
        json!({ "question": "Old pool hours?", "answer": "Gone.", "is_active": false }),
    ] {
        let (status, _) = send(&app, post_json("/api/faq", body)).await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (status, body) = send(&app, get("/api/faq/search?query=pool")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 2);

    let (status, body) = send(&app, get("/api/faq/search?query=pool&category=amenities")).await;
    assert_eq!(status, StatusCode::OK);
    let rows = body.as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["question"], "Is the pool heated?");
}

#[tokio::test]
async fn test_search_requires_query() {
    let (app, _store) = app();
    let (status, body) = send(&app, get("/api/faq/search")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Missing query parameter");

    let (status, _) = send(&app, get("/api/faq/search?query=%20")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

// ── categories ──

#[tokio::test]
async fn test_categories_prefer_table() {
    let (app, store) = app();
    store.add_category("weather").unwrap();
    store.add_category("dining").unwrap();

    let (status, body) = send(&app, get("/api/faq/categories")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!(["dining", "weather"]));
}

#[tokio::test]
async fn test_categories_fall_back_to_faq_rows() {
    let (app, _store) = app();
    for (q, c) in [("Spa hours?", "spa"), ("Bar hours?", "dining"), ("Spa prices?", "spa")] {
        send(
            &app,
            post_json("/api/faq", json!({ "question": q, "answer": "See desk.", "category": c })),
        )
        .await;
    }

    let (status, body) = send(&app, get("/api/faq/categories")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!(["dining", "spa"]));
}

#[tokio::test]
async fn test_categories_store_down_is_500() {
    let app = app_with(Arc::new(DownStore));
    let (status, body) = send(&app, get("/api/faq/categories")).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["confirmation_message"].is_string());
}

// ── list ──

#[tokio::test]
async fn test_list_returns_most_recent_up_to_limit() {
    let (app, _store) = app();
    for i in 0..5 {
        send(
            &app,
            post_json(
                "/api/faq",
                json!({ "question": format!("Question {}?", i), "answer": "Answer." }),
            ),
        )
        .await;
    }

    let (status, body) = send(&app, get("/api/faq/list")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 3);
    assert_eq!(body["faqs"][0]["question"], "Question 4?");
}

// ── health ──

#[tokio::test]
async fn test_health_reports_latency() {
    let (app, _store) = app();
    let (status, body) = send(&app, get("/api/health")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert!(body["timestamp"].is_string());
    assert_eq!(body["database"]["connected"], true);
    assert_eq!(body["database"]["backend"], "sqlite");
    assert!(body["database"]["response_time_ms"].is_number());
}

#[tokio::test]
async fn test_health_unhealthy_when_store_down() {
    let app = app_with(Arc::new(DownStore));
    let (status, body) = send(&app, get("/api/health")).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["status"], "unhealthy");
    assert_eq!(body["database"]["connected"], false);
}

// ── cors ──

#[tokio::test]
async fn test_preflight_is_empty_200() {
    let (app, _store) = app();
    let req = Request::builder()
        .method(Method::OPTIONS)
        .uri("/api/faq")
        .header(header::ORIGIN, "https://chat.example.com")
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
        .header(header::ACCESS_CONTROL_REQUEST_HEADERS, "content-type")
        .body(Body::empty())
        .unwrap();

    let resp = app.oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
        resp.headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .unwrap(),
        "*"
    );
    let bytes = resp.into_body().collect().await.unwrap().to_bytes();
    assert!(bytes.is_empty());
}
