//! TopicVault Core: shared error type and configuration.

pub mod config;
pub mod error;

pub use config::{DataPaths, TopicVaultConfig};
pub use error::{Error, Result};
