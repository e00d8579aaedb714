//! Faqbot Server: HTTP surface of the resort chatbot FAQ store.

pub mod error;
pub mod routes;
pub mod state;

pub use error::ApiError;
pub use routes::build_router;
pub use state::{open_store, AppState};
