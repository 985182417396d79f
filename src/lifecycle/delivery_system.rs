use serde_json::Value;
use std::sync::Arc;
use tracing::{error, info, instrument};

use crate::engine::{Entry, EntryError, Hydrator};
use crate::model::{ContentType, LocaleGraph};
use crate::store::{StoreActor, StoreClient, StoreError};

const DEFAULT_BUFFER: usize = 32;

/// Runs the content store and hands out the pieces that talk to it.
///
/// Entries hydrated through [`DeliverySystem::ingest`] resolve their links
/// against the store. They hold only a weak handle to it, so dropping the
/// system's clients is enough to stop the actor.
///
/// # Example
///
/// ```ignore
/// let system = DeliverySystem::new();
/// system.register_space("cfexampleapi", locales).await?;
/// system.register_content_type(cat_type).await?;
/// let nyancat = system.ingest(payload).await?;
/// system.shutdown().await?;
/// ```
pub struct DeliverySystem {
    /// Client for the store actor.
    pub store: StoreClient,

    /// Hydrates payloads with schemas and locales from the store.
    pub hydrator: Hydrator,

    handle: tokio::task::JoinHandle<()>,
}

impl DeliverySystem {
    pub fn new() -> Self {
        Self::with_buffer(DEFAULT_BUFFER)
    }

    /// Starts the store with a request channel of `buffer` slots.
    pub fn with_buffer(buffer: usize) -> Self {
        let (actor, store) = StoreActor::new(buffer);
        let handle = tokio::spawn(actor.run());

        let provider = Arc::new(store.clone());
        let hydrator = Hydrator::new(provider.clone(), provider)
            .with_resolver(Arc::new(store.downgrade()));

        Self {
            store,
            hydrator,
            handle,
        }
    }

    pub async fn register_space(&self, space_id: &str, locales: LocaleGraph) -> Result<(), StoreError> {
        self.store.put_locales(space_id, locales).await
    }

    pub async fn register_content_type(&self, content_type: ContentType) -> Result<(), StoreError> {
        self.store.put_content_type(content_type).await
    }

    /// Hydrates `payload` and stores the result.
    #[instrument(skip(self, payload))]
    pub async fn ingest(&self, payload: Value) -> Result<Entry, EntryError> {
        let entry = self.hydrator.hydrate(payload).await?;
        self.store
            .put_entry(entry.clone())
            .await
            .map_err(|e| EntryError::Resolver(e.into()))?;
        Ok(entry)
    }

    /// Drops the system's clients and waits for the store to stop.
    ///
    /// Clones of [`DeliverySystem::store`] held elsewhere keep the actor
    /// alive; drop them first.
    pub async fn shutdown(self) -> Result<(), String> {
        info!("Shutting down delivery system...");

        drop(self.hydrator);
        drop(self.store);

        if let Err(e) = self.handle.await {
            error!("Store task failed: {:?}", e);
            return Err(format!("Store task failed: {:?}", e));
        }

        info!("Delivery system shutdown complete.");
        Ok(())
    }
}

impl Default for DeliverySystem {
    fn default() -> Self {
        Self::new()
    }
}
