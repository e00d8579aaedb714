//! Database schema SQL for the local backend: mirrors the hosted tables.

/// `chatbot_faqs` and `faq_categories`.
pub const SCHEMA_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS chatbot_faqs (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    category TEXT,
    question TEXT NOT NULL,
    answer TEXT NOT NULL,
    keywords_json TEXT NOT NULL DEFAULT '[]',
    is_active INTEGER NOT NULL DEFAULT 1,
    image_url TEXT,
    created_at TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_faqs_created_at ON chatbot_faqs(created_at);
CREATE INDEX IF NOT EXISTS idx_faqs_category ON chatbot_faqs(category);

CREATE TABLE IF NOT EXISTS faq_categories (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL UNIQUE COLLATE NOCASE
);
"#;
