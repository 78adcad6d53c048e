//! The fixed term list that defines embedding dimensions.
//!
//! Order matters: position `i` of every embedding counts `terms()[i]`, so a
//! stored vector and a query vector are only comparable when both were built
//! from the same list in the same order.

/// Common English function words followed by academic/technology terms.
pub const DEFAULT_TERMS: &[&str] = &[
    "the", "be", "to", "of", "and", "a", "in", "that", "have", "i",
    "it", "for", "not", "on", "with", "he", "as", "you", "do", "at",
    "this", "but", "his", "by", "from", "they", "we", "say", "her", "she",
    "or", "an", "will", "my", "one", "all", "would", "there", "their", "system",
    "development", "application", "using", "analysis", "study", "research", "impact", "effect", "method", "approach",
    "technology", "data", "information", "management", "design", "implementation", "performance", "evaluation", "assessment", "comparison",
    "model", "algorithm", "framework", "solution", "problem", "issue", "factor", "influence", "improvement", "enhancement",
    "optimization", "innovation", "mobile", "web", "software", "hardware", "network", "database", "security", "artificial",
    "intelligence", "machine", "learning", "computer", "science", "engineering", "medical", "health", "education", "business",
    "social", "economic", "environmental", "sustainable", "smart", "digital", "online", "internet", "cloud", "blockchain",
];

/// An immutable, ordered list of lower-case terms.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Vocabulary {
    terms: Vec<String>,
}

impl Vocabulary {
    /// Build a vocabulary from an explicit term list. Terms are lower-cased;
    /// order is preserved.
    pub fn new<I, S>(terms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            terms: terms
                .into_iter()
                .map(|t| t.as_ref().to_lowercase())
                .collect(),
        }
    }

    pub fn terms(&self) -> &[String] {
        &self.terms
    }

    /// Number of embedding dimensions.
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }
}

impl Default for Vocabulary {
    fn default() -> Self {
        Self::new(DEFAULT_TERMS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_default_vocabulary_shape() {
        let vocab = Vocabulary::default();
        assert_eq!(vocab.len(), 100);
        let unique: HashSet<&String> = vocab.terms().iter().collect();
        assert_eq!(unique.len(), 100);
        assert_eq!(vocab.terms()[0], "the");
        assert_eq!(vocab.terms()[99], "blockchain");
        assert!(!unique.contains(&"somalia".to_string()));
    }

    #[test]
    fn test_custom_terms_are_lowercased() {
        let vocab = Vocabulary::new(["Rust", "SQLite"]);
        assert_eq!(vocab.terms(), &["rust".to_string(), "sqlite".to_string()]);
    }
}
