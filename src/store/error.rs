//! Error types for the content store actor.

use thiserror::Error;

use crate::clients::ResolveError;
use crate::model::LinkType;

/// Errors that can occur while talking to the content store.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum StoreError {
    #[error("Store actor closed")]
    ActorClosed,

    #[error("Store actor dropped response channel")]
    ActorDropped,

    #[error("Resource not found: {link_type} {id}")]
    NotFound { link_type: LinkType, id: String },

    /// A locale-specific read named a locale the resource's space lacks.
    #[error("Invalid locale: {0}")]
    InvalidLocale(String),
}

impl From<StoreError> for ResolveError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::NotFound { link_type, id } => ResolveError::NotFound { link_type, id },
            other => ResolveError::Communication(other.to_string()),
        }
    }
}
