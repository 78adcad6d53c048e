//! TopicVault Store: SQLite persistence for research topics and their embeddings.

pub mod embedding;
pub mod schema;
pub mod sqlite;
pub mod types;

pub use sqlite::SqliteStore;
pub use types::*;
