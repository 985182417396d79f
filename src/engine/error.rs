//! Error types for field access, link resolution and serialization.

use thiserror::Error;

use crate::clients::ResolveError;
use crate::model::{LinkType, ModelError};

/// Errors surfaced by [`Entry`](super::Entry).
#[derive(Debug, Clone, Error, PartialEq)]
pub enum EntryError {
    /// No schema field matches the requested name, with or without an `Id` suffix.
    #[error("Unknown field: {0}")]
    UnknownField(String),

    /// An id-only read was made against a field that holds no links.
    #[error("Field {field} of type {field_type} has no link ids")]
    InvalidAccessorShape { field: String, field_type: String },

    /// The resolver has no resource behind a link.
    #[error("Link target not found: {link_type} {id}")]
    LinkTargetNotFound { link_type: LinkType, id: String },

    /// The schema names a type outside the closed set the API defines.
    #[error("Unexpected field type {field_type} on field {field} while serializing")]
    UnsupportedFieldType { field: String, field_type: String },

    /// A stored value does not have the shape its schema declares.
    #[error("Field {field} holds a value that is not a valid {expected}")]
    MalformedValue { field: String, expected: String },

    #[error("Unknown locale: {0}")]
    UnknownLocale(String),

    /// A space or content type needed for hydration is not registered.
    #[error("Missing schema: {0}")]
    MissingSchema(String),

    /// The entry was built without a resolver and a link needed resolving.
    #[error("No link resolver attached to entry {0}")]
    ResolverUnavailable(String),

    /// The resolver failed for a reason other than a missing target.
    #[error("Resolver error: {0}")]
    Resolver(ResolveError),

    #[error("Model error: {0}")]
    Model(#[from] ModelError),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<ResolveError> for EntryError {
    fn from(e: ResolveError) -> Self {
        match e {
            ResolveError::NotFound { link_type, id } => {
                EntryError::LinkTargetNotFound { link_type, id }
            }
            other => EntryError::Resolver(other),
        }
    }
}

impl From<serde_json::Error> for EntryError {
    fn from(e: serde_json::Error) -> Self {
        EntryError::Serialization(e.to_string())
    }
}
