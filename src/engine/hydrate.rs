//! Turns raw delivery payloads into [`Entry`] values.

use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, instrument};

use crate::clients::{ContentTypeProvider, LinkResolver, LocaleProvider};
use crate::engine::{Entry, EntryError};
use crate::model::{ContentType, FieldValue, ModelError, SystemProperties};

/// Hydrates entries and assets using schemas and locales from providers.
#[derive(Clone)]
pub struct Hydrator {
    content_types: Arc<dyn ContentTypeProvider>,
    locales: Arc<dyn LocaleProvider>,
    resolver: Option<Arc<dyn LinkResolver>>,
    asset_type: Arc<ContentType>,
}

impl Hydrator {
    pub fn new(content_types: Arc<dyn ContentTypeProvider>, locales: Arc<dyn LocaleProvider>) -> Self {
        Self {
            content_types,
            locales,
            resolver: None,
            asset_type: Arc::new(ContentType::asset()),
        }
    }

    /// Resolver attached to every hydrated entry.
    pub fn with_resolver(mut self, resolver: Arc<dyn LinkResolver>) -> Self {
        self.resolver = Some(resolver);
        self
    }

    /// Hydrates one `{"sys": ..., "fields": ...}` payload.
    ///
    /// A payload whose `sys.locale` is set holds plain values per field and is
    /// stored under that locale. Otherwise each field holds an object keyed
    /// by locale code. `null` values are skipped.
    #[instrument(skip(self, payload))]
    pub async fn hydrate(&self, payload: Value) -> Result<Entry, EntryError> {
        let Value::Object(mut payload) = payload else {
            return Err(ModelError::InvalidPayload("resource must be an object".into()).into());
        };
        let sys: SystemProperties = payload
            .remove("sys")
            .map(serde_json::from_value)
            .transpose()
            .map_err(ModelError::from)?
            .ok_or_else(|| ModelError::InvalidPayload("missing sys".into()))?;

        let space_id = sys
            .space_id()
            .ok_or_else(|| ModelError::InvalidPayload(format!("{} has no space", sys.id())))?;
        let locales = self
            .locales
            .locales(space_id)
            .await?
            .ok_or_else(|| EntryError::MissingSchema(format!("space {}", space_id)))?;

        let content_type = if sys.resource_type() == "Asset" {
            self.asset_type.clone()
        } else {
            let id = sys.content_type_id().ok_or_else(|| {
                ModelError::InvalidPayload(format!("{} has no content type", sys.id()))
            })?;
            self.content_types
                .content_type(id)
                .await?
                .ok_or_else(|| EntryError::MissingSchema(format!("content type {}", id)))?
        };
        debug!(entry_id = sys.id(), content_type = content_type.id(), "Hydrating");

        let single_locale = sys.locale().map(str::to_string);
        let mut builder = Entry::builder(sys, content_type.clone(), locales);
        if let Some(resolver) = &self.resolver {
            builder = builder.resolver(resolver.clone());
        }

        let fields = match payload.remove("fields") {
            Some(Value::Object(fields)) => fields,
            Some(Value::Null) | None => Default::default(),
            Some(_) => return Err(ModelError::InvalidPayload("fields must be an object".into()).into()),
        };
        for (field_id, raw) in fields {
            let field = content_type
                .field(&field_id)
                .ok_or_else(|| EntryError::UnknownField(field_id.clone()))?;
            match &single_locale {
                Some(locale) => {
                    if let Some(value) = FieldValue::decode(field, raw)? {
                        builder = builder.field(&field_id, locale, value);
                    }
                }
                None => {
                    let Value::Object(per_locale) = raw else {
                        return Err(ModelError::ValueShape {
                            field: field_id,
                            expected: "an object keyed by locale".into(),
                        }
                        .into());
                    };
                    for (locale, raw) in per_locale {
                        if let Some(value) = FieldValue::decode(field, raw)? {
                            builder = builder.field(&field_id, &locale, value);
                        }
                    }
                }
            }
        }
        builder.build()
    }
}
