//! SQLite-backed topic store.
//!
//! One `topics` table holds every submitted title together with its
//! embedding. Search reads the whole table (the corpus is a few thousand
//! rows at most), so there is no vector index.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use rusqlite::{params, Connection, OptionalExtension};
use tracing::{debug, info};

use crate::embedding::{decode_embedding, encode_embedding};
use crate::schema::SCHEMA_SQL;
use crate::types::*;
use topicvault_core::{Error, Result};

/// Rows whose embedding is missing or undecodable.
const MISSING_EMBEDDING_SQL: &str =
    "embedding IS NULL OR length(embedding) = 0 OR length(embedding) % 8 != 0";

/// SQLite store for research topics.
pub struct SqliteStore {
    conn: Mutex<Connection>,
    db_path: PathBuf,
}

impl SqliteStore {
    /// Open or create the SQLite store.
    ///
    /// `db_dir` is the directory (e.g., `data/db/`). The file will be `db_dir/topicvault.db`.
    pub fn open(db_dir: impl AsRef<Path>) -> Result<Self> {
        let db_dir = db_dir.as_ref();
        std::fs::create_dir_all(db_dir).map_err(|e| Error::Storage(e.to_string()))?;
        let db_path = db_dir.join("topicvault.db");

        let conn = Self::create_connection(&db_path)?;
        conn.execute_batch(SCHEMA_SQL)
            .map_err(|e| Error::Database(format!("Schema init failed: {}", e)))?;

        let store = Self {
            conn: Mutex::new(conn),
            db_path,
        };

        let stats = store.get_stats()?;
        info!(
            "SqliteStore initialized: {} topics ({} embedded), path={}",
            stats.total_topics,
            stats.embedded_topics,
            store.db_path.display()
        );

        Ok(store)
    }

    fn create_connection(db_path: &Path) -> Result<Connection> {
        let conn = Connection::open(db_path).map_err(|e| Error::Database(e.to_string()))?;
        conn.execute_batch(
            "PRAGMA journal_mode = WAL;
             PRAGMA foreign_keys = ON;
             PRAGMA synchronous = NORMAL;",
        )
        .map_err(|e| Error::Database(e.to_string()))?;
        Ok(conn)
    }

    // ---------------------------------------------------------------
    // Topic CRUD
    // ---------------------------------------------------------------

    /// Insert a topic. `embedding` may be `None` to record a legacy row.
    pub fn add_topic(&self, topic: &NewTopic, embedding: Option<&[f64]>) -> Result<Topic> {
        let submission_date = topic.submission_date.unwrap_or_else(Utc::now);
        let status = topic
            .status
            .clone()
            .unwrap_or_else(|| DEFAULT_STATUS.to_string());
        let members_json = serde_json::to_string(&topic.group_members)?;
        let blob = embedding.map(encode_embedding);

        let conn = self.conn.lock();
        let id = conn
            .prepare_cached(
                "INSERT INTO topics (title, group_leader, group_members_json, faculty, \
                 class_year, submission_date, status, embedding) \
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            )
            .map_err(|e| Error::Database(e.to_string()))?
            .insert(params![
                topic.title,
                topic.group_leader,
                members_json,
                topic.faculty,
                topic.class_year,
                submission_date.timestamp_millis(),
                status,
                blob,
            ])
            .map_err(|e| Error::Database(e.to_string()))?;

        debug!("Inserted topic {}: {:?}", id, topic.title);

        Ok(Topic {
            id,
            title: topic.title.clone(),
            group_leader: topic.group_leader.clone(),
            group_members: topic.group_members.clone(),
            faculty: topic.faculty.clone(),
            class_year: topic.class_year.clone(),
            submission_date: from_millis(submission_date.timestamp_millis()),
            status,
            embedding: embedding.map(|e| e.to_vec()),
        })
    }

    /// Get a topic by ID.
    pub fn get_topic(&self, id: i64) -> Result<Option<Topic>> {
        let conn = self.conn.lock();
        Self::fetch_topic(&conn, id)
    }

    /// Apply a partial update. Returns `None` if the topic does not exist.
    ///
    /// `embedding` replaces the stored vector when given; callers pass one
    /// whenever the title changes.
    pub fn update_topic(
        &self,
        id: i64,
        update: &TopicUpdate,
        embedding: Option<&[f64]>,
    ) -> Result<Option<Topic>> {
        let conn = self.conn.lock();
        let mut topic = match Self::fetch_topic(&conn, id)? {
            Some(t) => t,
            None => return Ok(None),
        };

        if let Some(title) = &update.title {
            topic.title = title.clone();
        }
        if let Some(leader) = &update.group_leader {
            topic.group_leader = leader.clone();
        }
        if let Some(members) = &update.group_members {
            topic.group_members = members.clone();
        }
        if let Some(faculty) = &update.faculty {
            topic.faculty = faculty.clone();
        }
        if let Some(year) = &update.class_year {
            topic.class_year = year.clone();
        }
        if let Some(date) = update.submission_date {
            topic.submission_date = from_millis(date.timestamp_millis());
        }
        if let Some(status) = &update.status {
            topic.status = status.clone();
        }
        if let Some(e) = embedding {
            topic.embedding = Some(e.to_vec());
        }

        let members_json = serde_json::to_string(&topic.group_members)?;
        let blob = topic.embedding.as_deref().map(encode_embedding);
        conn.execute(
            "UPDATE topics SET title = ?1, group_leader = ?2, group_members_json = ?3, \
             faculty = ?4, class_year = ?5, submission_date = ?6, status = ?7, embedding = ?8 \
             WHERE id = ?9",
            params![
                topic.title,
                topic.group_leader,
                members_json,
                topic.faculty,
                topic.class_year,
                topic.submission_date.timestamp_millis(),
                topic.status,
                blob,
                id,
            ],
        )
        .map_err(|e| Error::Database(e.to_string()))?;

        Ok(Some(topic))
    }

    /// Delete a topic.
    pub fn delete_topic(&self, id: i64) -> Result<bool> {
        let conn = self.conn.lock();
        let count = conn
            .execute("DELETE FROM topics WHERE id = ?1", params![id])
            .map_err(|e| Error::Database(e.to_string()))?;
        Ok(count > 0)
    }

    /// Replace the stored embedding of a topic.
    pub fn set_topic_embedding(&self, id: i64, embedding: &[f64]) -> Result<bool> {
        let conn = self.conn.lock();
        let count = conn
            .execute(
                "UPDATE topics SET embedding = ?1 WHERE id = ?2",
                params![encode_embedding(embedding), id],
            )
            .map_err(|e| Error::Database(e.to_string()))?;
        Ok(count > 0)
    }

    /// Count total topics.
    pub fn count_topics(&self) -> Result<i64> {
        let conn = self.conn.lock();
        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM topics", [], |row| row.get(0))
            .map_err(|e| Error::Database(e.to_string()))?;
        Ok(count)
    }

    // ---------------------------------------------------------------
    // Listing
    // ---------------------------------------------------------------

    /// All topics, most recent submission first.
    pub fn list_topics(&self) -> Result<Vec<Topic>> {
        self.query_topics(
            "SELECT * FROM topics ORDER BY submission_date DESC, id DESC",
            [],
        )
    }

    /// All topics in insertion order. This is the corpus scanned by search.
    pub fn all_topics(&self) -> Result<Vec<Topic>> {
        self.query_topics("SELECT * FROM topics ORDER BY id ASC", [])
    }

    /// Topics with no usable embedding, oldest first.
    pub fn topics_without_embedding(&self, limit: usize) -> Result<Vec<Topic>> {
        let sql = format!(
            "SELECT * FROM topics WHERE {} ORDER BY id ASC LIMIT ?1",
            MISSING_EMBEDDING_SQL
        );
        let limit = i64::try_from(limit).unwrap_or(i64::MAX);
        self.query_topics(&sql, params![limit])
    }

    /// Id and title of every topic, in insertion order.
    pub fn list_titles(&self) -> Result<Vec<TopicTitle>> {
        let conn = self.conn.lock();
        let mut stmt = conn
            .prepare_cached("SELECT id, title FROM topics ORDER BY id ASC")
            .map_err(|e| Error::Database(e.to_string()))?;
        let rows = stmt
            .query_map([], |row| {
                Ok(TopicTitle {
                    id: row.get(0)?,
                    title: row.get(1)?,
                })
            })
            .map_err(|e| Error::Database(e.to_string()))?;
        rows.collect::<rusqlite::Result<Vec<_>>>()
            .map_err(|e| Error::Database(e.to_string()))
    }

    fn query_topics<P: rusqlite::Params>(&self, sql: &str, params: P) -> Result<Vec<Topic>> {
        let conn = self.conn.lock();
        let mut stmt = conn
            .prepare_cached(sql)
            .map_err(|e| Error::Database(e.to_string()))?;
        let rows = stmt
            .query_map(params, Self::row_to_topic)
            .map_err(|e| Error::Database(e.to_string()))?;
        rows.collect::<rusqlite::Result<Vec<_>>>()
            .map_err(|e| Error::Database(e.to_string()))
    }

    // ---------------------------------------------------------------
    // Stats
    // ---------------------------------------------------------------

    /// Get store statistics.
    pub fn get_stats(&self) -> Result<StoreStats> {
        let total_topics = self.count_topics()?;

        let conn = self.conn.lock();
        let sql = format!(
            "SELECT COUNT(*) FROM topics WHERE NOT ({})",
            MISSING_EMBEDDING_SQL
        );
        let embedded_topics: i64 = conn
            .query_row(&sql, [], |row| row.get(0))
            .map_err(|e| Error::Database(e.to_string()))?;
        drop(conn);

        let db_size = std::fs::metadata(&self.db_path)
            .map(|m| m.len())
            .unwrap_or(0);

        Ok(StoreStats {
            total_topics,
            embedded_topics,
            db_path: self.db_path.to_string_lossy().to_string(),
            db_size_mb: db_size as f64 / (1024.0 * 1024.0),
        })
    }

    // ---------------------------------------------------------------
    // Row Mapping Helpers
    // ---------------------------------------------------------------

    fn fetch_topic(conn: &Connection, id: i64) -> Result<Option<Topic>> {
        conn.prepare_cached("SELECT * FROM topics WHERE id = ?1")
            .map_err(|e| Error::Database(e.to_string()))?
            .query_row(params![id], Self::row_to_topic)
            .optional()
            .map_err(|e| Error::Database(e.to_string()))
    }

    fn row_to_topic(row: &rusqlite::Row<'_>) -> rusqlite::Result<Topic> {
        let group_members = row
            .get::<_, Option<String>>("group_members_json")?
            .and_then(|s| serde_json::from_str(&s).ok())
            .unwrap_or_default();
        let embedding = row
            .get::<_, Option<Vec<u8>>>("embedding")?
            .and_then(|b| decode_embedding(&b));

        Ok(Topic {
            id: row.get("id")?,
            title: row.get("title")?,
            group_leader: row.get("group_leader")?,
            group_members,
            faculty: row.get("faculty")?,
            class_year: row.get("class_year")?,
            submission_date: from_millis(row.get("submission_date")?),
            status: row.get("status")?,
            embedding,
        })
    }
}

fn from_millis(ms: i64) -> DateTime<Utc> {
    DateTime::from_timestamp_millis(ms).unwrap_or_default()
}
