//! Faqbot Store: FAQ persistence behind the `FaqStore` capability.
//!
//! Two backends share one contract: `PostgrestStore` talks to the hosted
//! database through its REST gateway, `SqliteStore` keeps the same two tables
//! in a local file for development and tests.

pub mod postgrest;
pub mod schema;
pub mod sqlite;
pub mod store;
pub mod types;

pub use postgrest::PostgrestStore;
pub use sqlite::SqliteStore;
pub use store::{CategorySource, FaqStore};
pub use types::*;
