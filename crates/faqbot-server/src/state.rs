//! Shared application state.

use std::sync::Arc;

use faqbot_core::{FaqConfig, Result, StoreBackend};
use faqbot_runtime::{FaqPipeline, PipelineOptions};
use faqbot_store::{FaqStore, PostgrestStore, SqliteStore};

/// Shared application state accessible from all route handlers.
pub struct AppState {
    pub config: FaqConfig,
    pub store: Arc<dyn FaqStore>,
    pub pipeline: FaqPipeline,
}

impl AppState {
    pub fn new(config: FaqConfig, store: Arc<dyn FaqStore>) -> Self {
        let pipeline = FaqPipeline::new(PipelineOptions {
            parse_raw: config.parse_raw,
            category_lookup: config.category_lookup,
        });

        Self {
            config,
            store,
            pipeline,
        }
    }
}

/// Build the store selected by the configuration. Called once at startup.
pub fn open_store(config: &FaqConfig) -> Result<Arc<dyn FaqStore>> {
    let store: Arc<dyn FaqStore> = match &config.backend {
        StoreBackend::Supabase { url, service_key } => {
            Arc::new(PostgrestStore::new(url, service_key))
        }
        StoreBackend::Sqlite { dir } => Arc::new(SqliteStore::open(dir)?),
    };
    Ok(store)
}
