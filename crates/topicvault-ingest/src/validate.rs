//! Research-topic admissibility heuristic.
//!
//! A shallow screen, not language understanding: it rejects empty input,
//! bare numbers, gibberish and titles without an academic hook. Keyword and
//! connective checks are plain substring tests on the lower-cased text, so
//! "impactful" counts as containing "impact" and "design" matches inside
//! "redesigned". Accept/reject behaviour depends on that, so it is kept.

use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

/// Characters allowed anywhere in a title.
static DISALLOWED_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^a-zA-Z0-9\s\-.,!?()]").expect("valid charset regex"));

/// Minimum trimmed length, in characters.
const MIN_LENGTH: usize = 10;

/// Minimum number of whitespace-separated tokens longer than one character.
const MIN_WORDS: usize = 3;

/// A run of this many identical characters marks the input as gibberish.
const MAX_REPEAT_RUN: usize = 5;

/// Stripped along with whitespace at either end of the input.
const BYTE_ORDER_MARK: char = '\u{feff}';

/// Substrings that signal an academic focus.
pub const RESEARCH_KEYWORDS: &[&str] = &[
    "impact",
    "effect",
    "analysis",
    "study",
    "research",
    "investigation",
    "evaluation",
    "assessment",
    "development",
    "implementation",
    "design",
    "system",
    "application",
    "using",
    "based",
    "approach",
    "method",
    "technique",
    "algorithm",
    "model",
    "framework",
    "performance",
    "optimization",
    "comparison",
    "review",
    "survey",
    "case study",
    "experimental",
    "theoretical",
    "practical",
    "innovative",
    "improvement",
    "enhancement",
    "solution",
    "problem",
    "challenge",
    "issue",
    "factor",
    "influence",
];

/// Connectives that give a title "X of Y" style structure.
pub const CONNECTIVES: &[&str] = &[" of ", " on ", " in ", " for "];

/// Why a title was rejected. `Display` is the user-facing message.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    #[error("Please enter a topic")]
    Empty,

    #[error("Numbers alone are not valid research topics")]
    NumbersOnly,

    #[error("Please enter a proper research topic title")]
    NotATitle,

    #[error("Research topic should be more descriptive")]
    TooShort,

    #[error("Please enter a proper research topic with clear academic focus")]
    NoAcademicFocus,
}

impl Rejection {
    pub fn message(&self) -> String {
        self.to_string()
    }
}

/// Check whether `text` is an admissible research topic.
///
/// Checks run in a fixed order and the first failure wins.
pub fn validate_topic(text: &str) -> Result<(), Rejection> {
    let trimmed = text.trim_matches(|c: char| c.is_whitespace() || c == BYTE_ORDER_MARK);

    if trimmed.is_empty() {
        return Err(Rejection::Empty);
    }

    if trimmed.chars().all(|c| c.is_ascii_digit()) {
        return Err(Rejection::NumbersOnly);
    }

    let words = trimmed
        .split_whitespace()
        .filter(|w| w.chars().count() > 1)
        .count();
    if words < MIN_WORDS || DISALLOWED_RE.is_match(trimmed) || has_repeat_run(trimmed) {
        return Err(Rejection::NotATitle);
    }

    if trimmed.chars().count() < MIN_LENGTH {
        return Err(Rejection::TooShort);
    }

    let lower = trimmed.to_lowercase();
    let structured = RESEARCH_KEYWORDS.iter().any(|kw| lower.contains(kw))
        || CONNECTIVES.iter().any(|c| lower.contains(c));
    if !structured {
        return Err(Rejection::NoAcademicFocus);
    }

    Ok(())
}

/// Wire form of a verdict: `{ isValid, error }`, `error` empty when valid.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Verdict {
    pub is_valid: bool,
    pub error: String,
}

impl From<Result<(), Rejection>> for Verdict {
    fn from(result: Result<(), Rejection>) -> Self {
        match result {
            Ok(()) => Self {
                is_valid: true,
                error: String::new(),
            },
            Err(rejection) => Self {
                is_valid: false,
                error: rejection.message(),
            },
        }
    }
}

/// True when some character other than a line terminator repeats
/// `MAX_REPEAT_RUN` times in a row.
fn has_repeat_run(text: &str) -> bool {
    let mut prev = None;
    let mut run = 0;
    for c in text.chars() {
        if matches!(c, '\n' | '\r' | '\u{2028}' | '\u{2029}') {
            prev = None;
            run = 0;
            continue;
        }
        if Some(c) == prev {
            run += 1;
        } else {
            prev = Some(c);
            run = 1;
        }
        if run >= MAX_REPEAT_RUN {
            return true;
        }
    }
    false
}
