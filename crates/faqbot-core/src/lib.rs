//! Faqbot Core: service configuration and the shared error type.

pub mod config;
pub mod error;

pub use config::{FaqConfig, StoreBackend};
pub use error::{Error, Result};
