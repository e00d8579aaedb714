//! Health route: store connectivity probe.

use std::sync::Arc;
use std::time::Instant;

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use chrono::{SecondsFormat, Utc};
use tracing::error;

use crate::state::AppState;
use faqbot_core::StoreBackend;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/health", get(get_health))
}

/// GET /api/health: round-trip one query and report its latency.
async fn get_health(State(state): State<Arc<AppState>>) -> (StatusCode, Json<serde_json::Value>) {
    let started = Instant::now();
    let probe = state.store.ping().await;
    let response_time_ms = started.elapsed().as_millis() as u64;
    let timestamp = Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true);
    let environment = environment(&state.config.backend);

    match probe {
        Ok(()) => (
            StatusCode::OK,
            Json(serde_json::json!({
                "status": "healthy",
                "timestamp": timestamp,
                "version": env!("CARGO_PKG_VERSION"),
                "environment": environment,
                "database": {
                    "backend": state.store.backend(),
                    "connected": true,
                    "response_time_ms": response_time_ms,
                },
            })),
        ),
        Err(e) => {
            error!("Health check failed: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(serde_json::json!({
                    "status": "unhealthy",
                    "timestamp": timestamp,
                    "error": "Store unreachable",
                    "environment": environment,
                    "database": {
                        "backend": state.store.backend(),
                        "connected": false,
                    },
                })),
            )
        }
    }
}

/// Which credentials are present, without revealing them.
fn environment(backend: &StoreBackend) -> serde_json::Value {
    let presence = |value: &str| if value.is_empty() { "missing" } else { "configured" };
    match backend {
        StoreBackend::Supabase { url, service_key } => serde_json::json!({
            "store": backend.name(),
            "supabase_url": presence(url),
            "supabase_key": presence(service_key),
        }),
        StoreBackend::Sqlite { .. } => serde_json::json!({
            "store": backend.name(),
        }),
    }
}
