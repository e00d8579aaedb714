//! Hosted backend: the managed Postgres database through its PostgREST gateway.
//!
//! Every method is a single HTTP round-trip. Non-2xx responses become
//! `Error::Rejected` with the gateway's body for the server log.

use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::debug;

use crate::store::{CategorySource, FaqStore};
use crate::types::*;
use faqbot_core::{Error, Result};

const FAQ_TABLE: &str = "chatbot_faqs";
const CATEGORY_TABLE: &str = "faq_categories";

/// Client for the hosted `chatbot_faqs` / `faq_categories` tables.
pub struct PostgrestStore {
    client: Client,
    base_url: String,
    service_key: String,
}

#[derive(Deserialize)]
struct CategoryCell {
    category: Option<String>,
}

impl PostgrestStore {
    /// `base_url` is the project URL (e.g. `https://xyz.supabase.co`).
    pub fn new(base_url: &str, service_key: &str) -> Self {
        Self::with_client(Client::new(), base_url, service_key)
    }

    pub fn with_client(client: Client, base_url: &str, service_key: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            service_key: service_key.to_string(),
        }
    }

    fn table_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{}", self.base_url, table)
    }

    fn request(&self, method: Method, table: &str) -> RequestBuilder {
        self.client
            .request(method, self.table_url(table))
            .header("apikey", &self.service_key)
            .header("Authorization", format!("Bearer {}", self.service_key))
            .header("Accept", "application/json")
    }

    async fn fetch<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T> {
        let response = request
            .send()
            .await
            .map_err(|e| Error::Http(format!("Request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        response
            .json::<T>()
            .await
            .map_err(|e| Error::Decode(e.to_string()))
    }
}

/// Query parameters for the FAQ search.
pub(crate) fn search_params(query: &FaqQuery) -> Vec<(String, String)> {
    let mut params = vec![
        ("select".to_string(), "*".to_string()),
        ("is_active".to_string(), "eq.true".to_string()),
    ];
    if let Some(category) = &query.category {
        params.push(("category".to_string(), format!("eq.{}", category)));
    }
    params.push((
        "or".to_string(),
        format!(
            "(question.ilike.{},keywords.cs.{{{}}})",
            quote_reserved(&format!("*{}*", escape_like(&query.text))),
            quote_array_element(&query.text)
        ),
    ));
    params
}

/// Make `%`, `_` and `\` literal inside an `ilike` pattern (Postgres escapes with `\`).
fn escape_like(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        if matches!(c, '%' | '_' | '\\') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

/// Double-quote a filter value if it contains characters the `or=(...)` grammar reserves.
fn quote_reserved(value: &str) -> String {
    if value.chars().any(|c| matches!(c, ',' | '(' | ')' | '"' | ':' | '\\')) {
        format!("\"{}\"", escape_quotes(value))
    } else {
        value.to_string()
    }
}

/// Array literal elements are always quoted.
fn quote_array_element(value: &str) -> String {
    format!("\"{}\"", escape_quotes(value))
}

fn escape_quotes(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}

#[async_trait]
impl CategorySource for PostgrestStore {
    async fn list_categories(&self) -> Result<Vec<Category>> {
        let request = self
            .request(Method::GET, CATEGORY_TABLE)
            .query(&[("select", "name"), ("order", "name.asc")]);
        self.fetch(request).await
    }
}

#[async_trait]
impl FaqStore for PostgrestStore {
    async fn insert_faq(&self, faq: &NewFaq) -> Result<FaqEntry> {
        debug!("POST {} question={:?}", FAQ_TABLE, faq.question);
        let request = self
            .request(Method::POST, FAQ_TABLE)
            .header("Prefer", "return=representation")
            .json(&[faq]);
        let mut rows: Vec<FaqEntry> = self.fetch(request).await?;
        if rows.is_empty() {
            return Err(Error::Decode("insert returned no rows".into()));
        }
        Ok(rows.swap_remove(0))
    }

    async fn search_faqs(&self, query: &FaqQuery) -> Result<Vec<FaqEntry>> {
        let request = self
            .request(Method::GET, FAQ_TABLE)
            .query(&search_params(query));
        self.fetch(request).await
    }

    async fn recent_faqs(&self, limit: usize) -> Result<Vec<FaqEntry>> {
        let limit = limit.to_string();
        let request = self.request(Method::GET, FAQ_TABLE).query(&[
            ("select", "*"),
            ("order", "created_at.desc"),
            ("limit", limit.as_str()),
        ]);
        self.fetch(request).await
    }

    async fn faq_categories(&self) -> Result<Vec<String>> {
        let request = self
            .request(Method::GET, FAQ_TABLE)
            .query(&[("select", "category"), ("category", "not.is.null")]);
        let cells: Vec<CategoryCell> = self.fetch(request).await?;
        Ok(cells.into_iter().filter_map(|c| c.category).collect())
    }

    async fn ping(&self) -> Result<()> {
        let request = self
            .request(Method::GET, FAQ_TABLE)
            .query(&[("select", "id"), ("limit", "1")]);
        let _: Vec<serde_json::Value> = self.fetch(request).await?;
        Ok(())
    }

    fn backend(&self) -> &'static str {
        "supabase"
    }
}
