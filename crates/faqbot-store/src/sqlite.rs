//! SQLite-backed FAQ store for local development and tests.
//!
//! Same tables and query semantics as the hosted backend. Keywords are kept
//! as a JSON array so containment can be checked with `json_each`.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::{SecondsFormat, Utc};
use parking_lot::Mutex;
use rusqlite::{params, Connection, OptionalExtension};
use tracing::{debug, info};

use crate::schema::SCHEMA_SQL;
use crate::store::{CategorySource, FaqStore};
use crate::types::*;
use faqbot_core::{Error, Result};

/// SQLite store holding `chatbot_faqs` and `faq_categories`.
pub struct SqliteStore {
    conn: Mutex<Connection>,
    db_path: Option<PathBuf>,
}

impl SqliteStore {
    /// Open or create the store.
    ///
    /// `db_dir` is the directory (e.g., `data/`). The file will be `db_dir/faqs.db`.
    pub fn open(db_dir: impl AsRef<Path>) -> Result<Self> {
        let db_dir = db_dir.as_ref();
        std::fs::create_dir_all(db_dir)?;
        let db_path = db_dir.join("faqs.db");

        let conn = Connection::open(&db_path).map_err(|e| Error::Database(e.to_string()))?;
        conn.execute_batch(
            "PRAGMA journal_mode = WAL;
             PRAGMA synchronous = NORMAL;",
        )
        .map_err(|e| Error::Database(e.to_string()))?;

        let store = Self::with_connection(conn, Some(db_path))?;
        info!(
            "SqliteStore initialized: {} faqs, path={}",
            store.count_faqs()?,
            db_dir.display()
        );
        Ok(store)
    }

    /// In-memory store, discarded on drop.
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().map_err(|e| Error::Database(e.to_string()))?;
        Self::with_connection(conn, None)
    }

    fn with_connection(conn: Connection, db_path: Option<PathBuf>) -> Result<Self> {
        conn.execute_batch(SCHEMA_SQL)
            .map_err(|e| Error::Database(format!("Schema init failed: {}", e)))?;
        Ok(Self {
            conn: Mutex::new(conn),
            db_path,
        })
    }

    /// Path of the database file, `None` when in memory.
    pub fn db_path(&self) -> Option<&Path> {
        self.db_path.as_deref()
    }

    // ---------------------------------------------------------------
    // Categories
    // ---------------------------------------------------------------

    /// Seed a category. Returns false if the name already exists (any case).
    pub fn add_category(&self, name: &str) -> Result<bool> {
        let conn = self.conn.lock();
        let count = conn
            .execute(
                "INSERT OR IGNORE INTO faq_categories (name) VALUES (?1)",
                params![name],
            )
            .map_err(|e| Error::Database(e.to_string()))?;
        Ok(count > 0)
    }

    /// All categories ordered by name.
    pub fn get_categories(&self) -> Result<Vec<Category>> {
        let conn = self.conn.lock();
        let mut stmt = conn
            .prepare_cached("SELECT name FROM faq_categories ORDER BY name")
            .map_err(|e| Error::Database(e.to_string()))?;
        let rows = stmt
            .query_map([], |row| row.get::<_, String>(0))
            .map_err(|e| Error::Database(e.to_string()))?;
        Ok(rows.filter_map(|r| r.ok()).map(Category::new).collect())
    }

    // ---------------------------------------------------------------
    // FAQ rows
    // ---------------------------------------------------------------

    /// Insert a row and read it back.
    pub fn add_faq(&self, faq: &NewFaq) -> Result<FaqEntry> {
        let keywords_json = serde_json::to_string(&faq.keywords)?;
        let now = Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true);

        let conn = self.conn.lock();
        let id = conn
            .prepare_cached(
                "INSERT INTO chatbot_faqs \
                 (category, question, answer, keywords_json, is_active, image_url, created_at) \
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            )
            .map_err(|e| Error::Database(e.to_string()))?
            .insert(params![
                faq.category,
                faq.question,
                faq.answer,
                keywords_json,
                faq.is_active,
                faq.image_url,
                now,
            ])
            .map_err(|e| Error::Database(e.to_string()))?;

        let row = conn
            .prepare_cached("SELECT * FROM chatbot_faqs WHERE id = ?1")
            .map_err(|e| Error::Database(e.to_string()))?
            .query_row(params![id], |row| Ok(Self::row_to_faq(row)))
            .optional()
            .map_err(|e| Error::Database(e.to_string()))?;

        debug!("Inserted faq id={}", id);
        row.ok_or_else(|| Error::Database(format!("inserted row {} not found", id)))
    }

    /// Search active rows by question substring or exact keyword.
    pub fn find_faqs(&self, query: &FaqQuery) -> Result<Vec<FaqEntry>> {
        let pattern = format!("%{}%", escape_like(&query.text));
        let conn = self.conn.lock();
        let mut stmt = conn
            .prepare_cached(
                "SELECT * FROM chatbot_faqs \
                 WHERE is_active = 1 \
                   AND (?2 IS NULL OR category = ?2) \
                   AND (question LIKE ?1 ESCAPE '\\' \
                        OR EXISTS (SELECT 1 FROM json_each(chatbot_faqs.keywords_json) \
                                   WHERE json_each.value = ?3)) \
                 ORDER BY created_at DESC, id DESC",
            )
            .map_err(|e| Error::Database(e.to_string()))?;
        let rows = stmt
            .query_map(params![pattern, query.category, query.text], |row| {
                Ok(Self::row_to_faq(row))
            })
            .map_err(|e| Error::Database(e.to_string()))?;
        Ok(rows.filter_map(|r| r.ok()).collect())
    }

    /// Newest rows first.
    pub fn get_recent_faqs(&self, limit: usize) -> Result<Vec<FaqEntry>> {
        let conn = self.conn.lock();
        let mut stmt = conn
            .prepare_cached("SELECT * FROM chatbot_faqs ORDER BY created_at DESC, id DESC LIMIT ?1")
            .map_err(|e| Error::Database(e.to_string()))?;
        let rows = stmt
            .query_map(params![limit as i64], |row| Ok(Self::row_to_faq(row)))
            .map_err(|e| Error::Database(e.to_string()))?;
        Ok(rows.filter_map(|r| r.ok()).collect())
    }

    /// Non-null category values on FAQ rows.
    pub fn get_faq_categories(&self) -> Result<Vec<String>> {
        let conn = self.conn.lock();
        let mut stmt = conn
            .prepare_cached("SELECT category FROM chatbot_faqs WHERE category IS NOT NULL")
            .map_err(|e| Error::Database(e.to_string()))?;
        let rows = stmt
            .query_map([], |row| row.get::<_, String>(0))
            .map_err(|e| Error::Database(e.to_string()))?;
        Ok(rows.filter_map(|r| r.ok()).collect())
    }

    /// Count FAQ rows.
    pub fn count_faqs(&self) -> Result<i64> {
        let conn = self.conn.lock();
        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM chatbot_faqs", [], |row| row.get(0))
            .map_err(|e| Error::Database(e.to_string()))?;
        Ok(count)
    }

    // ---------------------------------------------------------------
    // Row Mapping Helpers
    // ---------------------------------------------------------------

    fn row_to_faq(row: &rusqlite::Row<'_>) -> FaqEntry {
        FaqEntry {
            id: FaqId::Int(row.get("id").unwrap_or(0)),
            category: row.get("category").ok().flatten(),
            question: row.get("question").unwrap_or_default(),
            answer: row.get("answer").unwrap_or_default(),
            keywords: row
                .get::<_, String>("keywords_json")
                .ok()
                .and_then(|s| serde_json::from_str(&s).ok())
                .unwrap_or_default(),
            is_active: row.get("is_active").unwrap_or(true),
            image_url: row.get("image_url").ok().flatten(),
            created_at: row.get("created_at").ok(),
        }
    }
}

/// Escape `%`, `_` and the escape character itself for a `LIKE ... ESCAPE '\'` pattern.
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

#[async_trait]
impl CategorySource for SqliteStore {
    async fn list_categories(&self) -> Result<Vec<Category>> {
        self.get_categories()
    }
}

#[async_trait]
impl FaqStore for SqliteStore {
    async fn insert_faq(&self, faq: &NewFaq) -> Result<FaqEntry> {
        self.add_faq(faq)
    }

    async fn search_faqs(&self, query: &FaqQuery) -> Result<Vec<FaqEntry>> {
        self.find_faqs(query)
    }

    async fn recent_faqs(&self, limit: usize) -> Result<Vec<FaqEntry>> {
        self.get_recent_faqs(limit)
    }

    async fn faq_categories(&self) -> Result<Vec<String>> {
        self.get_faq_categories()
    }

    async fn ping(&self) -> Result<()> {
        let conn = self.conn.lock();
        conn.query_row("SELECT id FROM chatbot_faqs LIMIT 1", [], |_| Ok(()))
            .optional()
            .map_err(|e| Error::Database(e.to_string()))?;
        Ok(())
    }

    fn backend(&self) -> &'static str {
        "sqlite"
    }
}
