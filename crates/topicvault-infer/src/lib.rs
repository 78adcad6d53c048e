//! TopicVault Infer: vocabulary and embedding engine.
//!
//! Provides the `EmbedderBackend` trait for turning topic titles into
//! fixed-length vectors. The only backend is `BagOfWordsEmbedder`, a
//! term-frequency vector over the fixed `Vocabulary`.

pub mod embedder;
pub mod vocabulary;

pub use embedder::{BagOfWordsEmbedder, EmbedderBackend};
pub use vocabulary::{Vocabulary, DEFAULT_TERMS};

use std::sync::Arc;

/// Create the embedder used by the server and CLI.
pub fn create_embedder(vocabulary: Arc<Vocabulary>) -> Arc<dyn EmbedderBackend> {
    let embedder = BagOfWordsEmbedder::new(vocabulary);
    tracing::info!("Using bag-of-words embedder (dim={})", embedder.dimension());
    Arc::new(embedder)
}
