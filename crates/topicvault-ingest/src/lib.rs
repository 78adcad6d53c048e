//! TopicVault Ingest: topic validation and submission.

pub mod ingest;
pub mod validate;

pub use ingest::TopicIngester;
pub use validate::{validate_topic, Rejection, Verdict};
