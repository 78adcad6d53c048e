//! Database schema SQL.

/// Topics table. `embedding` is NULL for legacy rows that predate embeddings.
pub const SCHEMA_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS topics (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    title TEXT NOT NULL,
    group_leader TEXT NOT NULL,
    group_members_json TEXT,
    faculty TEXT NOT NULL,
    class_year TEXT NOT NULL,
    submission_date INTEGER NOT NULL,
    status TEXT NOT NULL DEFAULT 'pending',
    embedding BLOB
);

CREATE INDEX IF NOT EXISTS idx_topics_submission_date ON topics(submission_date);
"#;
