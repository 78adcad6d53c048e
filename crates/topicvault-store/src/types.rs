//! Data types for stored research topics.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Status assigned to newly submitted topics.
pub const DEFAULT_STATUS: &str = "pending";

/// A topic row from the database.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Topic {
    pub id: i64,
    pub title: String,
    pub group_leader: String,
    #[serde(default)]
    pub group_members: Vec<String>,
    pub faculty: String,
    pub class_year: String,
    pub submission_date: DateTime<Utc>,
    pub status: String,
    /// Unit-normalized bag-of-words vector of `title`. `None` on legacy rows.
    #[serde(default, skip_serializing)]
    pub embedding: Option<Vec<f64>>,
}

impl Topic {
    /// The stored embedding, if present and non-empty.
    pub fn stored_embedding(&self) -> Option<&[f64]> {
        self.embedding.as_deref().filter(|e| !e.is_empty())
    }
}

/// Fields for inserting a topic.
#[derive(Debug, Clone, Default)]
pub struct NewTopic {
    pub title: String,
    pub group_leader: String,
    pub group_members: Vec<String>,
    pub faculty: String,
    pub class_year: String,
    /// Defaults to now.
    pub submission_date: Option<DateTime<Utc>>,
    /// Defaults to `DEFAULT_STATUS`.
    pub status: Option<String>,
}

/// Partial update. `None` leaves the stored value untouched.
#[derive(Debug, Clone, Default)]
pub struct TopicUpdate {
    pub title: Option<String>,
    pub group_leader: Option<String>,
    pub group_members: Option<Vec<String>>,
    pub faculty: Option<String>,
    pub class_year: Option<String>,
    pub submission_date: Option<DateTime<Utc>>,
    pub status: Option<String>,
}

/// Minimal projection used by evaluator title pickers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopicTitle {
    pub id: i64,
    pub title: String,
}

/// Store-level statistics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreStats {
    pub total_topics: i64,
    pub embedded_topics: i64,
    pub db_path: String,
    pub db_size_mb: f64,
}
