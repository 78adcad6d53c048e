//! TopicVault Resolve: similarity ranking over stored topics.
//!
//! A search validates the query, embeds it, scores it against every stored
//! topic by cosine similarity and keeps the best few above a fixed threshold.

pub mod ranker;
pub mod search;
pub mod similarity;
pub mod types;

pub use ranker::{SimilarityRanker, MAX_RESULTS, SIMILARITY_THRESHOLD};
pub use search::TopicSearch;
pub use similarity::cosine_similarity;
pub use types::*;
