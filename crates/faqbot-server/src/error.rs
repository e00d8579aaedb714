//! HTTP error responses.
//!
//! Every error body carries a technical `error` and a chat-facing
//! `confirmation_message`. Store failures are logged in full and reported
//! to the client with a fixed message.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use tracing::error;

use faqbot_runtime::{CreateError, Rejection};

#[derive(Debug)]
pub enum ApiError {
    /// Bad client input (400).
    BadRequest { error: String, message: String },
    /// Store or other server-side failure (500).
    Internal {
        error: &'static str,
        message: &'static str,
    },
}

impl ApiError {
    pub fn bad_request(error: impl Into<String>, message: impl Into<String>) -> Self {
        Self::BadRequest {
            error: error.into(),
            message: message.into(),
        }
    }

    /// Log a store failure and hide its detail from the client.
    pub fn store(source: &faqbot_core::Error, error: &'static str, message: &'static str) -> Self {
        error!("{}: {}", error, source);
        Self::Internal { error, message }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::BadRequest { .. } => StatusCode::BAD_REQUEST,
            Self::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<Rejection> for ApiError {
    fn from(rejection: Rejection) -> Self {
        Self::bad_request(rejection.to_string(), rejection.confirmation_message())
    }
}

impl From<CreateError> for ApiError {
    fn from(err: CreateError) -> Self {
        match err {
            CreateError::Rejected(rejection) => rejection.into(),
            CreateError::Store(e) => Self::store(
                &e,
                "Failed to save FAQ",
                "Sorry, there was an error while adding your FAQ.",
            ),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let (error, message) = match self {
            Self::BadRequest { error, message } => (error, message),
            Self::Internal { error, message } => (error.to_string(), message.to_string()),
        };

        (
            status,
            Json(serde_json::json!({
                "error": error,
                "confirmation_message": message,
            })),
        )
            .into_response()
    }
}
