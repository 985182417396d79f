//! Error types for the content model.

use thiserror::Error;

/// Errors raised while decoding wire payloads or validating model invariants.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ModelError {
    /// A timestamp or Date field value could not be parsed.
    #[error("Invalid date: {0}")]
    InvalidDate(String),

    /// A `sys` link envelope was malformed.
    #[error("Invalid link: {0}")]
    InvalidLink(String),

    /// A payload did not have the expected shape.
    #[error("Invalid payload: {0}")]
    InvalidPayload(String),

    /// A field value does not match the shape its schema declares.
    #[error("Field {field} expected {expected}")]
    ValueShape { field: String, expected: String },

    /// An `Array` of links that does not say what the links point to.
    #[error("Field {0} holds links but its items name no link type")]
    MissingItemsLinkType(String),

    #[error("Locale graph has no default locale")]
    MissingDefaultLocale,

    #[error("Locale graph has more than one default locale: {0} and {1}")]
    MultipleDefaultLocales(String, String),

    #[error("Default locale {0} must not declare a fallback")]
    DefaultHasFallback(String),

    #[error("Locale {locale} falls back to unknown locale {fallback}")]
    UnknownFallback { locale: String, fallback: String },

    /// Following fallbacks from this locale never reaches the default.
    #[error("Fallback chain starting at {0} does not terminate at the default locale")]
    FallbackCycle(String),

    #[error("Duplicate locale code: {0}")]
    DuplicateLocale(String),
}

impl From<serde_json::Error> for ModelError {
    fn from(e: serde_json::Error) -> Self {
        ModelError::InvalidPayload(e.to_string())
    }
}
