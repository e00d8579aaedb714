//! Configuration loaded from the process environment.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::warn;

use crate::error::{Error, Result};

/// Where FAQ rows are persisted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum StoreBackend {
    /// Hosted Postgres reached through its REST gateway.
    Supabase {
        url: String,
        #[serde(skip_serializing)]
        service_key: String,
    },
    /// Local SQLite file under `dir` (development and offline use).
    Sqlite { dir: PathBuf },
}

impl StoreBackend {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Supabase { .. } => "supabase",
            Self::Sqlite { .. } => "sqlite",
        }
    }
}

/// Top-level FAQ service configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FaqConfig {
    /// HTTP server port.
    pub port: u16,
    /// Persistence backend.
    pub backend: StoreBackend,
    /// Number of rows returned by the recent-FAQ listing.
    pub list_limit: usize,
    /// Accept free-text `raw` commands on create.
    pub parse_raw: bool,
    /// Consult the category table before the fallback rules.
    pub category_lookup: bool,
}

impl FaqConfig {
    /// Create configuration from the process environment.
    ///
    /// Fails fast when the hosted backend is selected without credentials.
    pub fn from_env() -> Result<Self> {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Create configuration from an arbitrary variable lookup.
    pub fn from_vars<F>(var: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| var(key).filter(|v| !v.trim().is_empty());

        let port = non_empty("PORT")
            .and_then(|p| p.trim().parse().ok())
            .unwrap_or(3000);

        let backend = match non_empty("FAQ_STORE")
            .map(|s| s.trim().to_lowercase())
            .as_deref()
        {
            None | Some("supabase") => {
                let url = non_empty("SUPABASE_URL");
                let service_key = non_empty("SUPABASE_SERVICE_ROLE_KEY");
                match (url, service_key) {
                    (Some(url), Some(service_key)) => StoreBackend::Supabase {
                        url: url.trim().trim_end_matches('/').to_string(),
                        service_key: service_key.trim().to_string(),
                    },
                    (url, key) => {
                        let mut missing = Vec::new();
                        if url.is_none() {
                            missing.push("SUPABASE_URL");
                        }
                        if key.is_none() {
                            missing.push("SUPABASE_SERVICE_ROLE_KEY");
                        }
                        return Err(Error::Config(format!(
                            "missing store credentials: {}",
                            missing.join(", ")
                        )));
                    }
                }
            }
            Some("sqlite") => StoreBackend::Sqlite {
                dir: non_empty("FAQ_DB_PATH")
                    .map(PathBuf::from)
                    .unwrap_or_else(|| PathBuf::from("data")),
            },
            Some(other) => {
                return Err(Error::Config(format!("unknown FAQ_STORE backend: {}", other)));
            }
        };

        let list_limit = non_empty("FAQ_LIST_LIMIT")
            .and_then(|v| v.trim().parse().ok())
            .filter(|n: &usize| *n > 0)
            .unwrap_or(10);

        Ok(Self {
            port,
            backend,
            list_limit,
            parse_raw: flag(non_empty("FAQ_PARSE_RAW"), "FAQ_PARSE_RAW"),
            category_lookup: flag(non_empty("FAQ_CATEGORY_LOOKUP"), "FAQ_CATEGORY_LOOKUP"),
        })
    }
}

/// Parse a boolean switch; unset means enabled.
fn flag(value: Option<String>, key: &str) -> bool {
    match value.map(|v| v.trim().to_lowercase()).as_deref() {
        None => true,
        Some("1" | "true" | "yes" | "on") => true,
        Some("0" | "false" | "no" | "off") => false,
        Some(other) => {
            warn!("Ignoring unrecognized value {:?} for {}", other, key);
            true
        }
    }
}
