//! Topic submission pipeline: validate → embed → store.

use tracing::{debug, info};

use crate::validate::validate_topic;
use topicvault_core::{Error, Result};
use topicvault_infer::EmbedderBackend;
use topicvault_store::{NewTopic, SqliteStore, Topic, TopicUpdate};

/// Handles topic submission and revision.
pub struct TopicIngester<'a> {
    store: &'a SqliteStore,
    embedder: &'a dyn EmbedderBackend,
}

impl<'a> TopicIngester<'a> {
    pub fn new(store: &'a SqliteStore, embedder: &'a dyn EmbedderBackend) -> Self {
        Self { store, embedder }
    }

    /// Validate and store a new topic with its embedding.
    ///
    /// A rejected title returns `Error::Validation` and nothing is written.
    pub fn submit(&self, topic: NewTopic) -> Result<Topic> {
        if let Err(rejection) = validate_topic(&topic.title) {
            debug!("Rejected topic {:?}: {}", topic.title, rejection);
            return Err(Error::Validation(rejection.message()));
        }

        let embedding = self.embedder.embed(&topic.title).to_vec();
        let stored = self.store.add_topic(&topic, Some(&embedding))?;
        info!("Stored topic {}: {}", stored.id, stored.title);
        Ok(stored)
    }

    /// Apply a partial update. A new title is validated and re-embedded;
    /// other fields are written as given. Returns `None` for an unknown id.
    pub fn revise(&self, id: i64, update: TopicUpdate) -> Result<Option<Topic>> {
        let embedding = match &update.title {
            Some(title) => {
                if let Err(rejection) = validate_topic(title) {
                    debug!("Rejected revised title {:?}: {}", title, rejection);
                    return Err(Error::Validation(rejection.message()));
                }
                Some(self.embedder.embed(title).to_vec())
            }
            None => None,
        };

        self.store.update_topic(id, &update, embedding.as_deref())
    }

    /// Compute and store embeddings for up to `limit` topics that lack one.
    /// Returns the number of topics updated.
    pub fn backfill(&self, limit: usize) -> Result<usize> {
        let pending = self.store.topics_without_embedding(limit)?;
        let mut written = 0;
        for topic in &pending {
            let embedding = self.embedder.embed(&topic.title).to_vec();
            if self.store.set_topic_embedding(topic.id, &embedding)? {
                written += 1;
            }
        }
        if written > 0 {
            info!("Backfilled embeddings for {} topics", written);
        }
        Ok(written)
    }
}
