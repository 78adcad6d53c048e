//! Duplicate-topic search: validate → embed → rank against every stored topic.

use ndarray::Array1;
use tracing::{debug, info, warn};

use crate::ranker::SimilarityRanker;
use crate::types::SearchOutcome;
use topicvault_core::Result;
use topicvault_infer::EmbedderBackend;
use topicvault_ingest::validate_topic;
use topicvault_store::SqliteStore;

/// Runs similarity searches over the topic store.
pub struct TopicSearch<'a> {
    store: &'a SqliteStore,
    embedder: &'a dyn EmbedderBackend,
    ranker: SimilarityRanker,
    persist_backfill: bool,
}

impl<'a> TopicSearch<'a> {
    pub fn new(
        store: &'a SqliteStore,
        embedder: &'a dyn EmbedderBackend,
        ranker: SimilarityRanker,
    ) -> Self {
        Self {
            store,
            embedder,
            ranker,
            persist_backfill: false,
        }
    }

    /// Write embeddings computed for legacy topics back to the store.
    pub fn with_persist_backfill(mut self, persist: bool) -> Self {
        self.persist_backfill = persist;
        self
    }

    /// Search for topics similar to `query`.
    ///
    /// Only storage failures are errors; a rejected query is a normal outcome.
    pub fn run(&self, query: &str) -> Result<SearchOutcome> {
        if let Err(rejection) = validate_topic(query) {
            debug!("Search query rejected: {}", rejection);
            return Ok(SearchOutcome::Rejected(rejection));
        }

        let query_vector = self.embedder.embed(query);
        let topics = self.store.all_topics()?;
        info!(
            "Searching {} topics (query_len={})",
            topics.len(),
            query.len()
        );

        if topics.is_empty() {
            return Ok(SearchOutcome::NoTopics);
        }

        let mut computed: Vec<(i64, Vec<f64>)> = Vec::new();
        let matches = self
            .ranker
            .rank(query_vector.view(), topics, |topic| match topic.stored_embedding() {
                Some(stored) => Array1::from(stored.to_vec()),
                None => {
                    let vector = self.embedder.embed(&topic.title);
                    computed.push((topic.id, vector.to_vec()));
                    vector
                }
            });

        if !computed.is_empty() {
            debug!("Computed {} missing embeddings during search", computed.len());
            if self.persist_backfill {
                self.persist(&computed);
            }
        }

        info!("Similar topics found: {}", matches.len());

        if matches.is_empty() {
            Ok(SearchOutcome::NoMatch)
        } else {
            Ok(SearchOutcome::Found(matches))
        }
    }

    /// Best-effort write-back; failures are logged, never surfaced.
    fn persist(&self, computed: &[(i64, Vec<f64>)]) {
        for (id, embedding) in computed {
            if let Err(e) = self.store.set_topic_embedding(*id, embedding) {
                warn!("Failed to persist embedding for topic {}: {}", id, e);
            }
        }
    }
}
