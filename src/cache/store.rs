//! Key/value storage for pre-fetched schemas.

use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

/// A string key/value store. Keys are opaque; values are JSON documents.
#[async_trait]
pub trait CacheStore: Send + Sync {
    async fn get(&self, key: &str) -> Option<String>;
    async fn set(&self, key: &str, value: String);
    async fn clear(&self);
}

/// Process-local [`CacheStore`].
#[derive(Debug, Default)]
pub struct MemoryCache {
    items: RwLock<HashMap<String, String>>,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.items.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.items.read().await.is_empty()
    }
}

#[async_trait]
impl CacheStore for MemoryCache {
    async fn get(&self, key: &str) -> Option<String> {
        self.items.read().await.get(key).cloned()
    }

    async fn set(&self, key: &str, value: String) {
        self.items.write().await.insert(key.to_string(), value);
    }

    async fn clear(&self) {
        self.items.write().await.clear();
    }
}

/// Key under which the locale graph of `space_id` is cached.
pub fn locales_key(space_id: &str) -> String {
    format!("delivery-{}-Locales", space_id)
}

/// Key under which content type `id` of `space_id` is cached.
pub fn content_type_key(space_id: &str, id: &str) -> String {
    format!("delivery-{}-ContentType-{}", space_id, id)
}
