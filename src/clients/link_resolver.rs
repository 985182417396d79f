use async_trait::async_trait;
use std::fmt;
use std::sync::Arc;

use crate::clients::ResolveError;
use crate::engine::Entry;
use crate::model::{ContentType, Link, LocaleGraph};

/// Which locales a resolved resource should be hydrated for.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum LocaleSelector {
    /// Every locale of the space at once (`locale=*`).
    All,
    Locale(String),
}

impl fmt::Display for LocaleSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LocaleSelector::All => f.write_str("*"),
            LocaleSelector::Locale(code) => f.write_str(code),
        }
    }
}

/// Exchanges links for hydrated resources.
///
/// Implementations own transport, retries and timeouts. The engine only
/// distinguishes [`ResolveError::NotFound`] from every other failure.
#[async_trait]
pub trait LinkResolver: Send + Sync {
    async fn resolve(&self, link: &Link, locale: LocaleSelector) -> Result<Entry, ResolveError>;
}

/// Looks up content types by id.
#[async_trait]
pub trait ContentTypeProvider: Send + Sync {
    async fn content_type(&self, id: &str) -> Result<Option<Arc<ContentType>>, ResolveError>;
}

/// Exposes the locale graph of a space.
#[async_trait]
pub trait LocaleProvider: Send + Sync {
    async fn locales(&self, space_id: &str) -> Result<Option<Arc<LocaleGraph>>, ResolveError>;
}
