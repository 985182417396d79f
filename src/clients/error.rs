//! Error types for the resolver boundary.

use thiserror::Error;

use crate::model::LinkType;

/// Errors a [`LinkResolver`](super::LinkResolver) or provider can return.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ResolveError {
    /// No resource of this kind exists with this id.
    #[error("{link_type} not found: {id}")]
    NotFound { link_type: LinkType, id: String },

    /// The collaborator could not be reached or answered out of protocol.
    #[error("Resolver communication error: {0}")]
    Communication(String),
}

impl ResolveError {
    pub fn not_found(link_type: LinkType, id: impl Into<String>) -> Self {
        ResolveError::NotFound {
            link_type,
            id: id.into(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, ResolveError::NotFound { .. })
    }
}

impl From<String> for ResolveError {
    fn from(msg: String) -> Self {
        ResolveError::Communication(msg)
    }
}
