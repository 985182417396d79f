//! # Store Actor
//!
//! Owns every hydrated resource, content type and locale graph of the
//! in-memory delivery backend. Requests are processed sequentially, so the
//! maps need no locking.

use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info, warn};

use crate::clients::LocaleSelector;
use crate::engine::Entry;
use crate::model::{ContentType, FieldValue, Link, LocaleGraph};
use crate::query::Query;
use crate::store::{StoreClient, StoreError};

/// One-shot response channel used by the store actor.
pub type Response<T> = oneshot::Sender<Result<T, StoreError>>;

/// Messages understood by the [`StoreActor`].
#[derive(Debug)]
pub enum StoreRequest {
    PutEntry {
        entry: Entry,
        respond_to: Response<()>,
    },
    GetEntry {
        link: Link,
        locale: LocaleSelector,
        respond_to: Response<Entry>,
    },
    RemoveEntry {
        link: Link,
        respond_to: Response<()>,
    },
    Find {
        query: Query,
        respond_to: Response<Vec<Entry>>,
    },
    PutContentType {
        content_type: ContentType,
        respond_to: Response<()>,
    },
    GetContentType {
        id: String,
        respond_to: Response<Option<Arc<ContentType>>>,
    },
    ListContentTypes {
        respond_to: Response<Vec<Arc<ContentType>>>,
    },
    PutLocales {
        space_id: String,
        locales: LocaleGraph,
        respond_to: Response<()>,
    },
    GetLocales {
        space_id: String,
        respond_to: Response<Option<Arc<LocaleGraph>>>,
    },
}

pub struct StoreActor {
    receiver: mpsc::Receiver<StoreRequest>,
    resources: HashMap<Link, Entry>,
    content_types: HashMap<String, Arc<ContentType>>,
    // Insertion order for listing.
    content_type_order: Vec<String>,
    spaces: HashMap<String, Arc<LocaleGraph>>,
}

impl StoreActor {
    pub fn new(buffer_size: usize) -> (Self, StoreClient) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let actor = Self {
            receiver,
            resources: HashMap::new(),
            content_types: HashMap::new(),
            content_type_order: Vec::new(),
            spaces: HashMap::new(),
        };
        (actor, StoreClient::new(sender))
    }

    /// Processes requests until every strong client is dropped.
    pub async fn run(mut self) {
        info!("Store actor started");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                StoreRequest::PutEntry { entry, respond_to } => {
                    let link = entry.as_link();
                    debug!(%link, "PutEntry");
                    self.resources.insert(link, entry);
                    let _ = respond_to.send(Ok(()));
                }
                StoreRequest::GetEntry { link, locale, respond_to } => {
                    let _ = respond_to.send(self.get_entry(&link, &locale));
                }
                StoreRequest::RemoveEntry { link, respond_to } => {
                    let result = match self.resources.remove(&link) {
                        Some(_) => {
                            info!(%link, size = self.resources.len(), "Removed");
                            Ok(())
                        }
                        None => Err(not_found(&link)),
                    };
                    let _ = respond_to.send(result);
                }
                StoreRequest::Find { query, respond_to } => {
                    let _ = respond_to.send(self.find(&query));
                }
                StoreRequest::PutContentType { content_type, respond_to } => {
                    let id = content_type.id().to_string();
                    debug!(content_type = %id, "PutContentType");
                    if !self.content_types.contains_key(&id) {
                        self.content_type_order.push(id.clone());
                    }
                    self.content_types.insert(id, Arc::new(content_type));
                    let _ = respond_to.send(Ok(()));
                }
                StoreRequest::GetContentType { id, respond_to } => {
                    let _ = respond_to.send(Ok(self.content_types.get(&id).cloned()));
                }
                StoreRequest::ListContentTypes { respond_to } => {
                    let all = self
                        .content_type_order
                        .iter()
                        .filter_map(|id| self.content_types.get(id).cloned())
                        .collect();
                    let _ = respond_to.send(Ok(all));
                }
                StoreRequest::PutLocales { space_id, locales, respond_to } => {
                    debug!(%space_id, "PutLocales");
                    self.spaces.insert(space_id, Arc::new(locales));
                    let _ = respond_to.send(Ok(()));
                }
                StoreRequest::GetLocales { space_id, respond_to } => {
                    let _ = respond_to.send(Ok(self.spaces.get(&space_id).cloned()));
                }
            }
        }

        info!(size = self.resources.len(), "Store actor shutdown");
    }

    fn get_entry(&self, link: &Link, locale: &LocaleSelector) -> Result<Entry, StoreError> {
        let Some(entry) = self.resources.get(link) else {
            warn!(%link, "Not found");
            return Err(not_found(link));
        };
        debug!(%link, %locale, "GetEntry");
        // Never hand out the stored entry's link cache.
        let entry = entry.detached();
        match locale {
            LocaleSelector::All => Ok(entry),
            LocaleSelector::Locale(code) => entry
                .with_locale(code)
                .map_err(|_| StoreError::InvalidLocale(code.clone())),
        }
    }

    fn find(&self, query: &Query) -> Result<Vec<Entry>, StoreError> {
        let mut found: Vec<&Entry> = self
            .resources
            .values()
            .filter(|entry| entry.system_properties().resource_type() == "Entry")
            .filter(|entry| matches_query(entry, query))
            .collect();
        found.sort_by(|a, b| a.id().cmp(b.id()));
        debug!(query = %query.query_string(), hits = found.len(), "Find");

        match query.get("locale").filter(|code| *code != "*") {
            Some(code) => found
                .into_iter()
                .map(|entry| {
                    entry
                        .with_locale(code)
                        .map_err(|_| StoreError::InvalidLocale(code.to_string()))
                })
                .collect(),
            None => Ok(found.into_iter().cloned().collect()),
        }
    }
}

fn not_found(link: &Link) -> StoreError {
    StoreError::NotFound {
        link_type: link.link_type().clone(),
        id: link.id().to_string(),
    }
}

fn matches_query(entry: &Entry, query: &Query) -> bool {
    if let Some(ct) = query.get("content_type") {
        if entry.system_properties().content_type_id() != Some(ct) {
            return false;
        }
    }
    if let Some(id) = query.get("links_to_entry") {
        if !links_to(entry, &Link::entry(id)) {
            return false;
        }
    }
    if let Some(id) = query.get("links_to_asset") {
        if !links_to(entry, &Link::asset(id)) {
            return false;
        }
    }
    query.filters().all(|(key, expected)| match key.split_once('.') {
        Some(("sys", "id")) => entry.id() == expected,
        Some(("fields", field_id)) => entry
            .raw_fields()
            .get(field_id)
            .and_then(|values| values.get(entry.locales().default_code()))
            .is_some_and(|value| scalar_equals(value, expected)),
        _ => true,
    })
}

fn links_to(entry: &Entry, target: &Link) -> bool {
    entry.raw_fields().iter().any(|(_, values)| {
        values.values().any(|value| match value {
            FieldValue::Link(link) => link == target,
            FieldValue::Array(items) => items.iter().any(|item| item.as_link() == Some(target)),
            _ => false,
        })
    })
}

fn scalar_equals(value: &FieldValue, expected: &str) -> bool {
    match value {
        FieldValue::Scalar(serde_json::Value::String(s)) => s == expected,
        FieldValue::Scalar(other) => other.to_string() == expected,
        FieldValue::Date(at) => at.to_string() == expected,
        FieldValue::Link(link) => link.id() == expected,
        FieldValue::Array(items) => items.iter().any(|item| scalar_equals(item, expected)),
    }
}
