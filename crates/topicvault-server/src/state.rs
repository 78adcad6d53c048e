//! Shared application state.

use std::sync::Arc;

use topicvault_core::TopicVaultConfig;
use topicvault_infer::EmbedderBackend;
use topicvault_ingest::TopicIngester;
use topicvault_resolve::{SimilarityRanker, TopicSearch};
use topicvault_store::SqliteStore;

/// Shared application state accessible from all route handlers.
pub struct AppState {
    pub config: TopicVaultConfig,
    pub store: SqliteStore,
    pub embedder: Arc<dyn EmbedderBackend>,
    pub ranker: SimilarityRanker,
}

impl AppState {
    pub fn new(
        config: TopicVaultConfig,
        store: SqliteStore,
        embedder: Arc<dyn EmbedderBackend>,
    ) -> Self {
        Self {
            config,
            store,
            embedder,
            ranker: SimilarityRanker::default(),
        }
    }

    pub fn ingester(&self) -> TopicIngester<'_> {
        TopicIngester::new(&self.store, self.embedder.as_ref())
    }

    pub fn search(&self) -> TopicSearch<'_> {
        TopicSearch::new(&self.store, self.embedder.as_ref(), self.ranker)
            .with_persist_backfill(self.config.persist_backfill)
    }
}
