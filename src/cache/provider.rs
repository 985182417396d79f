use async_trait::async_trait;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use tracing::debug;

use crate::cache::{content_type_key, locales_key, CacheStore};
use crate::clients::{ContentTypeProvider, LocaleProvider, ResolveError};
use crate::model::{ContentType, LocaleGraph};

/// Serves schemas of one space from a warmed [`CacheStore`].
///
/// A cache miss reads as "unknown", exactly like a registry that has never
/// heard of the id.
pub struct CachedProvider {
    space_id: String,
    cache: Arc<dyn CacheStore>,
}

impl CachedProvider {
    pub fn new(space_id: impl Into<String>, cache: Arc<dyn CacheStore>) -> Self {
        Self {
            space_id: space_id.into(),
            cache,
        }
    }

    async fn read<T: DeserializeOwned>(&self, key: &str) -> Result<Option<Arc<T>>, ResolveError> {
        let Some(raw) = self.cache.get(key).await else {
            debug!(key, "Cache miss");
            return Ok(None);
        };
        let value = serde_json::from_str(&raw)
            .map_err(|e| ResolveError::Communication(format!("corrupt cache item {}: {}", key, e)))?;
        Ok(Some(Arc::new(value)))
    }
}

#[async_trait]
impl ContentTypeProvider for CachedProvider {
    async fn content_type(&self, id: &str) -> Result<Option<Arc<ContentType>>, ResolveError> {
        self.read(&content_type_key(&self.space_id, id)).await
    }
}

#[async_trait]
impl LocaleProvider for CachedProvider {
    async fn locales(&self, space_id: &str) -> Result<Option<Arc<LocaleGraph>>, ResolveError> {
        if space_id != self.space_id {
            return Ok(None);
        }
        self.read(&locales_key(space_id)).await
    }
}
