use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, instrument};

use crate::clients::{ContentTypeProvider, LinkResolver, LocaleProvider, LocaleSelector, ResolveError};
use crate::engine::Entry;
use crate::model::{ContentType, Link, LocaleGraph};
use crate::query::Query;
use crate::store::{Response, StoreError, StoreRequest};

/// A type-safe client for the [`StoreActor`](super::StoreActor).
#[derive(Clone)]
pub struct StoreClient {
    sender: mpsc::Sender<StoreRequest>,
}

impl StoreClient {
    pub fn new(sender: mpsc::Sender<StoreRequest>) -> Self {
        Self { sender }
    }

    /// A handle that does not keep the actor alive.
    ///
    /// Entries stored in the actor resolve their links through this handle,
    /// so dropping every strong client still shuts the actor down.
    pub fn downgrade(&self) -> WeakStoreClient {
        WeakStoreClient {
            sender: self.sender.downgrade(),
        }
    }

    #[instrument(skip(self, entry), fields(entry_id = %entry.id()))]
    pub async fn put_entry(&self, entry: Entry) -> Result<(), StoreError> {
        debug!("Sending request");
        self.request(|respond_to| StoreRequest::PutEntry { entry, respond_to })
            .await
    }

    #[instrument(skip(self))]
    pub async fn get_entry(&self, link: Link, locale: LocaleSelector) -> Result<Entry, StoreError> {
        debug!("Sending request");
        self.request(|respond_to| StoreRequest::GetEntry {
            link,
            locale,
            respond_to,
        })
        .await
    }

    #[instrument(skip(self))]
    pub async fn remove_entry(&self, link: Link) -> Result<(), StoreError> {
        debug!("Sending request");
        self.request(|respond_to| StoreRequest::RemoveEntry { link, respond_to })
            .await
    }

    /// Entries matching `query`, ordered by id.
    #[instrument(skip(self))]
    pub async fn entries(&self, query: Query) -> Result<Vec<Entry>, StoreError> {
        debug!("Sending request");
        self.request(|respond_to| StoreRequest::Find { query, respond_to })
            .await
    }

    /// Entries that link to `entry`.
    pub async fn references(&self, entry: &Entry, query: Query) -> Result<Vec<Entry>, StoreError> {
        self.entries(query.links_to_entry(entry.id())).await
    }

    #[instrument(skip(self, content_type), fields(content_type = %content_type.id()))]
    pub async fn put_content_type(&self, content_type: ContentType) -> Result<(), StoreError> {
        debug!("Sending request");
        self.request(|respond_to| StoreRequest::PutContentType {
            content_type,
            respond_to,
        })
        .await
    }

    pub async fn get_content_type(&self, id: &str) -> Result<Option<Arc<ContentType>>, StoreError> {
        let id = id.to_string();
        self.request(|respond_to| StoreRequest::GetContentType { id, respond_to })
            .await
    }

    /// Every registered content type, in registration order.
    pub async fn content_types(&self) -> Result<Vec<Arc<ContentType>>, StoreError> {
        self.request(|respond_to| StoreRequest::ListContentTypes { respond_to })
            .await
    }

    #[instrument(skip(self, locales))]
    pub async fn put_locales(&self, space_id: &str, locales: LocaleGraph) -> Result<(), StoreError> {
        debug!("Sending request");
        let space_id = space_id.to_string();
        self.request(|respond_to| StoreRequest::PutLocales {
            space_id,
            locales,
            respond_to,
        })
        .await
    }

    pub async fn get_locales(&self, space_id: &str) -> Result<Option<Arc<LocaleGraph>>, StoreError> {
        let space_id = space_id.to_string();
        self.request(|respond_to| StoreRequest::GetLocales {
            space_id,
            respond_to,
        })
        .await
    }

    async fn request<T>(
        &self,
        build: impl FnOnce(Response<T>) -> StoreRequest,
    ) -> Result<T, StoreError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(build(respond_to))
            .await
            .map_err(|_| StoreError::ActorClosed)?;
        response.await.map_err(|_| StoreError::ActorDropped)?
    }
}

#[async_trait]
impl LinkResolver for StoreClient {
    async fn resolve(&self, link: &Link, locale: LocaleSelector) -> Result<Entry, ResolveError> {
        self.get_entry(link.clone(), locale).await.map_err(ResolveError::from)
    }
}

#[async_trait]
impl ContentTypeProvider for StoreClient {
    async fn content_type(&self, id: &str) -> Result<Option<Arc<ContentType>>, ResolveError> {
        self.get_content_type(id).await.map_err(ResolveError::from)
    }
}

#[async_trait]
impl LocaleProvider for StoreClient {
    async fn locales(&self, space_id: &str) -> Result<Option<Arc<LocaleGraph>>, ResolveError> {
        self.get_locales(space_id).await.map_err(ResolveError::from)
    }
}

/// Non-owning [`StoreClient`], see [`StoreClient::downgrade`].
#[derive(Clone)]
pub struct WeakStoreClient {
    sender: mpsc::WeakSender<StoreRequest>,
}

#[async_trait]
impl LinkResolver for WeakStoreClient {
    async fn resolve(&self, link: &Link, locale: LocaleSelector) -> Result<Entry, ResolveError> {
        let sender = self
            .sender
            .upgrade()
            .ok_or_else(|| ResolveError::from(StoreError::ActorClosed))?;
        StoreClient::new(sender).resolve(link, locale).await
    }
}
