//! Embedding engine trait and the bag-of-words implementation.
//!
//! `BagOfWordsEmbedder` counts how often each vocabulary term occurs in the
//! text and unit-normalizes the counts. Tokens outside the vocabulary are
//! ignored entirely, and there are no corpus statistics (no IDF).

use std::collections::HashMap;
use std::sync::Arc;

use ndarray::Array1;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::vocabulary::Vocabulary;

/// ASCII word runs, applied after lower-casing. Punctuation is dropped.
static WORD_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[a-z0-9_]+").expect("valid word regex"));

/// Trait for embedding backends.
pub trait EmbedderBackend: Send + Sync {
    /// Embed a text string. Always returns a vector of length `dimension()`.
    fn embed(&self, text: &str) -> Array1<f64>;

    /// Embed a batch of texts.
    fn embed_batch(&self, texts: &[&str]) -> Vec<Array1<f64>> {
        texts.iter().map(|t| self.embed(t)).collect()
    }

    /// Get the embedding dimension.
    fn dimension(&self) -> usize;
}

/// Term-frequency embedder over a closed vocabulary.
#[derive(Debug, Clone)]
pub struct BagOfWordsEmbedder {
    vocabulary: Arc<Vocabulary>,
}

impl BagOfWordsEmbedder {
    pub fn new(vocabulary: Arc<Vocabulary>) -> Self {
        Self { vocabulary }
    }

    /// Raw (unnormalized) term counts, in vocabulary order.
    pub fn term_counts(&self, text: &str) -> Vec<u32> {
        let lower = text.to_lowercase();
        let mut counts: HashMap<&str, u32> = HashMap::new();
        for m in WORD_RE.find_iter(&lower) {
            *counts.entry(m.as_str()).or_insert(0) += 1;
        }
        self.vocabulary
            .terms()
            .iter()
            .map(|term| counts.get(term.as_str()).copied().unwrap_or(0))
            .collect()
    }
}

impl Default for BagOfWordsEmbedder {
    fn default() -> Self {
        Self::new(Arc::new(Vocabulary::default()))
    }
}

impl EmbedderBackend for BagOfWordsEmbedder {
    fn embed(&self, text: &str) -> Array1<f64> {
        let counts = self.term_counts(text);
        let norm = counts
            .iter()
            .map(|&c| (c as f64) * (c as f64))
            .sum::<f64>()
            .sqrt();

        // No vocabulary term present: the zero vector is returned as-is.
        if norm == 0.0 {
            return Array1::zeros(counts.len());
        }

        Array1::from_iter(counts.iter().map(|&c| c as f64 / norm))
    }

    fn dimension(&self) -> usize {
        self.vocabulary.len()
    }
}
