//! Search outcome types.

use serde::Serialize;
use topicvault_ingest::Rejection;
use topicvault_store::Topic;

pub const FOUND_MESSAGE: &str = "Similar research topics found in the database.";
pub const NO_TOPICS_MESSAGE: &str = "No research topics found. This idea appears to be unique!";
pub const NO_MATCH_MESSAGE: &str =
    "No similar research topics found. This idea appears to be unique!";

/// A stored topic paired with its similarity to the query.
#[derive(Debug, Clone, Serialize)]
pub struct ScoredTopic {
    pub topic: Topic,
    pub similarity: f64,
}

/// Result of a topic search.
#[derive(Debug, Clone)]
pub enum SearchOutcome {
    /// The query failed validation; storage was not consulted.
    Rejected(Rejection),
    /// No topics are stored at all.
    NoTopics,
    /// Topics exist but none scored above the threshold.
    NoMatch,
    /// Matches in descending similarity order.
    Found(Vec<ScoredTopic>),
}

impl SearchOutcome {
    pub fn found(&self) -> bool {
        matches!(self, Self::Found(_))
    }

    /// User-facing message for this outcome.
    pub fn message(&self) -> String {
        match self {
            Self::Rejected(rejection) => rejection.message(),
            Self::NoTopics => NO_TOPICS_MESSAGE.to_string(),
            Self::NoMatch => NO_MATCH_MESSAGE.to_string(),
            Self::Found(_) => FOUND_MESSAGE.to_string(),
        }
    }

    /// Matched topics; empty unless `Found`.
    pub fn matches(&self) -> &[ScoredTopic] {
        match self {
            Self::Found(matches) => matches,
            _ => &[],
        }
    }
}
