use std::sync::Arc;
use tracing::{info, instrument};

use crate::cache::{content_type_key, locales_key, CacheError, CacheStore};
use crate::store::StoreClient;

/// Persists a space's locale graph and content types into a [`CacheStore`].
pub struct CacheWarmer {
    space_id: String,
    source: StoreClient,
    cache: Arc<dyn CacheStore>,
}

impl CacheWarmer {
    pub fn new(space_id: impl Into<String>, source: StoreClient, cache: Arc<dyn CacheStore>) -> Self {
        Self {
            space_id: space_id.into(),
            source,
            cache,
        }
    }

    /// Writes every schema object of the space. Returns how many were cached.
    #[instrument(skip(self), fields(space_id = %self.space_id))]
    pub async fn warm_up(&self) -> Result<usize, CacheError> {
        let locales = self
            .source
            .get_locales(&self.space_id)
            .await?
            .ok_or_else(|| CacheError::MissingLocales(self.space_id.clone()))?;
        self.cache
            .set(&locales_key(&self.space_id), serde_json::to_string(&*locales)?)
            .await;

        let content_types = self.source.content_types().await?;
        for content_type in &content_types {
            self.cache
                .set(
                    &content_type_key(&self.space_id, content_type.id()),
                    serde_json::to_string(&**content_type)?,
                )
                .await;
        }

        let cached = content_types.len() + 1;
        info!(cached, "Cache warmed");
        Ok(cached)
    }

    /// Drops everything from the cache.
    pub async fn clear(&self) {
        self.cache.clear().await;
        info!(space_id = %self.space_id, "Cache cleared");
    }
}
