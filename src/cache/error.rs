//! Error types for cache warming.

use thiserror::Error;

use crate::store::StoreError;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum CacheError {
    #[error("Cache source error: {0}")]
    Source(#[from] StoreError),

    #[error("Space {0} has no locales to cache")]
    MissingLocales(String),

    #[error("Cache serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for CacheError {
    fn from(e: serde_json::Error) -> Self {
        CacheError::Serialization(e.to_string())
    }
}
