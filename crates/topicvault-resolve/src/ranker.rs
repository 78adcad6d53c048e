//! Threshold-and-top-k ranking of topics by cosine similarity.

use std::cmp::Ordering;

use ndarray::{Array1, ArrayView1};
use topicvault_store::Topic;

use crate::similarity::cosine_similarity;
use crate::types::ScoredTopic;

/// Scores must be strictly greater than this to count as similar.
pub const SIMILARITY_THRESHOLD: f64 = 0.3;

/// Maximum number of matches returned.
pub const MAX_RESULTS: usize = 5;

/// Ranks candidate topics against a query vector.
#[derive(Debug, Clone, Copy)]
pub struct SimilarityRanker {
    threshold: f64,
    max_results: usize,
}

impl SimilarityRanker {
    pub fn new(threshold: f64, max_results: usize) -> Self {
        Self {
            threshold,
            max_results,
        }
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    pub fn max_results(&self) -> usize {
        self.max_results
    }

    /// Score every candidate, keep those above the threshold, and return the
    /// best `max_results` in descending order.
    ///
    /// `resolve` supplies each candidate's vector: the stored embedding when
    /// present, otherwise one computed on the spot. The ranker itself never
    /// writes anything back.
    ///
    /// The sort is stable, so equal scores keep candidate order.
    pub fn rank<F>(
        &self,
        query: ArrayView1<'_, f64>,
        candidates: Vec<Topic>,
        mut resolve: F,
    ) -> Vec<ScoredTopic>
    where
        F: FnMut(&Topic) -> Array1<f64>,
    {
        let mut scored: Vec<ScoredTopic> = candidates
            .into_iter()
            .filter_map(|topic| {
                let vector = resolve(&topic);
                let similarity = cosine_similarity(query, vector.view());
                (similarity > self.threshold).then_some(ScoredTopic { topic, similarity })
            })
            .collect();

        scored.sort_by(|a, b| {
            b.similarity
                .partial_cmp(&a.similarity)
                .unwrap_or(Ordering::Equal)
        });
        scored.truncate(self.max_results);
        scored
    }
}

impl Default for SimilarityRanker {
    fn default() -> Self {
        Self::new(SIMILARITY_THRESHOLD, MAX_RESULTS)
    }
}
