//! # Entry
//!
//! A hydrated, schema-typed resource. Entries and assets are both represented
//! by [`Entry`]; assets carry the built-in asset schema.
//!
//! ## Field access
//!
//! [`Entry::get_field`] resolves a field by name in a locale:
//!
//! 1. The name is matched against the schema with its first letter lowercased,
//!    then verbatim. A name ending in `Id` that matches nothing is retried
//!    without the suffix as an id-only read.
//! 2. Id-only reads are allowed on `Link` and `Array<Link>` fields only.
//! 3. The effective locale comes from the fallback walk in
//!    [`LocalizedResource`]. A walk that finds nothing yields
//!    [`Resolved::Absent`]; an unset array field yields an empty sequence.
//! 4. Links are exchanged for entries through the attached
//!    [`LinkResolver`], at most once per target for the lifetime of the
//!    entry. Missing members of a link array are dropped; a missing single
//!    link is an error.
//!
//! Cloning an `Entry` is cheap. Clones share field data and the link cache
//! and differ only in their locale cursor.

use std::fmt;
use std::sync::Arc;
use tracing::{debug, instrument, warn};

use crate::clients::{LinkResolver, LocaleSelector};
use crate::engine::{EntryError, LinkCache};
use crate::localized::{LocalizedResource, LocalizedValues};
use crate::model::{
    ApiDateTime, ContentType, Field, FieldType, FieldValue, Link, LocaleGraph, SystemProperties,
};

/// Options for a single field read.
#[derive(Debug, Clone, Default)]
pub struct FieldOptions {
    /// Locale to read; the entry's cursor when unset.
    pub locale: Option<String>,
    /// Return link target ids instead of resolving the targets.
    pub as_id: bool,
}

impl FieldOptions {
    pub fn locale(code: impl Into<String>) -> Self {
        Self {
            locale: Some(code.into()),
            as_id: false,
        }
    }

    pub fn ids() -> Self {
        Self {
            locale: None,
            as_id: true,
        }
    }

    pub fn as_id(mut self) -> Self {
        self.as_id = true;
        self
    }
}

/// Result of a field read.
#[derive(Debug, Clone)]
pub enum Resolved {
    /// Nothing stored along the whole fallback chain.
    Absent,
    /// A stored scalar, date or scalar array, returned unchanged.
    Value(FieldValue),
    Id(String),
    Ids(Vec<String>),
    Entry(Entry),
    Entries(Vec<Entry>),
}

impl Resolved {
    pub fn is_absent(&self) -> bool {
        matches!(self, Resolved::Absent)
    }

    pub fn as_value(&self) -> Option<&FieldValue> {
        match self {
            Resolved::Value(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Resolved::Value(value) => value.as_str(),
            Resolved::Id(id) => Some(id),
            _ => None,
        }
    }

    pub fn into_entry(self) -> Option<Entry> {
        match self {
            Resolved::Entry(entry) => Some(entry),
            _ => None,
        }
    }

    pub fn into_entries(self) -> Option<Vec<Entry>> {
        match self {
            Resolved::Entries(entries) => Some(entries),
            _ => None,
        }
    }

    pub fn into_ids(self) -> Option<Vec<String>> {
        match self {
            Resolved::Ids(ids) => Some(ids),
            _ => None,
        }
    }
}

/// Raw field data in insertion order: field id to per-locale values.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawFields(Vec<(String, LocalizedValues)>);

impl RawFields {
    pub fn insert(&mut self, field_id: &str, locale: &str, value: FieldValue) {
        let values = match self.0.iter().position(|(id, _)| id == field_id) {
            Some(index) => &mut self.0[index].1,
            None => {
                self.0.push((field_id.to_string(), LocalizedValues::new()));
                let last = self.0.len() - 1;
                &mut self.0[last].1
            }
        };
        values.insert(locale.to_string(), value);
    }

    pub fn get(&self, field_id: &str) -> Option<&LocalizedValues> {
        self.0
            .iter()
            .find(|(id, _)| id == field_id)
            .map(|(_, values)| values)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &LocalizedValues)> {
        self.0.iter().map(|(id, values)| (id.as_str(), values))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

struct EntryData {
    sys: SystemProperties,
    content_type: Arc<ContentType>,
    fields: Arc<RawFields>,
    resolver: Option<Arc<dyn LinkResolver>>,
    links: LinkCache,
}

/// A hydrated entry or asset.
#[derive(Clone)]
pub struct Entry {
    data: Arc<EntryData>,
    localized: LocalizedResource,
}

impl fmt::Debug for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Entry")
            .field("sys", &self.data.sys)
            .field("content_type", &self.data.content_type.id())
            .field("fields", &self.data.fields)
            .field("locale", &self.localized.locale())
            .finish()
    }
}

impl Entry {
    pub fn builder(
        sys: SystemProperties,
        content_type: Arc<ContentType>,
        locales: Arc<LocaleGraph>,
    ) -> EntryBuilder {
        EntryBuilder {
            sys,
            content_type,
            locales,
            fields: RawFields::default(),
            resolver: None,
        }
    }

    pub fn id(&self) -> &str {
        self.data.sys.id()
    }

    pub fn revision(&self) -> u64 {
        self.data.sys.revision()
    }

    pub fn created_at(&self) -> Option<ApiDateTime> {
        self.data.sys.created_at()
    }

    pub fn updated_at(&self) -> Option<ApiDateTime> {
        self.data.sys.updated_at()
    }

    pub fn space_id(&self) -> Option<&str> {
        self.data.sys.space_id()
    }

    /// Id of the schema the entry was hydrated with.
    pub fn content_type_id(&self) -> &str {
        self.data.content_type.id()
    }

    pub fn system_properties(&self) -> &SystemProperties {
        &self.data.sys
    }

    pub fn content_type(&self) -> &ContentType {
        &self.data.content_type
    }

    pub fn raw_fields(&self) -> &RawFields {
        &self.data.fields
    }

    pub fn as_link(&self) -> Link {
        self.data.sys.as_link()
    }

    /// The locale reads default to.
    pub fn locale(&self) -> &str {
        self.localized.locale()
    }

    pub fn locales(&self) -> &LocaleGraph {
        self.localized.locales()
    }

    /// Moves the locale cursor of this handle.
    pub fn set_locale(&mut self, code: &str) -> Result<(), EntryError> {
        self.localized.set_locale(code)
    }

    /// A handle on the same entry with a different cursor.
    pub fn with_locale(&self, code: &str) -> Result<Entry, EntryError> {
        let mut entry = self.clone();
        entry.set_locale(code)?;
        Ok(entry)
    }

    /// A handle on the same data with its own, empty link cache.
    ///
    /// Resolvers hand these out, so a cached target never holds the cache
    /// that holds it and link cycles between entries stay collectable.
    pub fn detached(&self) -> Entry {
        Entry {
            data: Arc::new(EntryData {
                sys: self.data.sys.clone(),
                content_type: self.data.content_type.clone(),
                fields: self.data.fields.clone(),
                resolver: self.data.resolver.clone(),
                links: LinkCache::new(),
            }),
            localized: self.localized.clone(),
        }
    }

    /// Whether the entry was hydrated for a single locale.
    pub fn is_single_locale(&self) -> bool {
        self.data.sys.locale().is_some()
    }

    /// Number of link targets resolved through this entry so far.
    pub fn resolved_links(&self) -> usize {
        self.data.links.len()
    }

    /// The display field's value in the cursor locale.
    pub async fn display_value(&self) -> Result<Resolved, EntryError> {
        match self.data.content_type.display_field() {
            Some(field) => {
                let name = field.id().to_string();
                self.get_field(&name, FieldOptions::default()).await
            }
            None => Ok(Resolved::Absent),
        }
    }

    /// Reads a field by name. See the module documentation for the rules.
    #[instrument(skip(self, options), fields(entry_id = %self.id(), locale = ?options.locale, as_id = options.as_id))]
    pub async fn get_field(&self, name: &str, options: FieldOptions) -> Result<Resolved, EntryError> {
        let locale = self.localized.locale_from_input(options.locale.as_deref())?;

        let (field, as_id) = match self.field_for_name(name) {
            Some(field) => (field, options.as_id),
            None => {
                let field = name
                    .strip_suffix("Id")
                    .and_then(|stripped| self.field_for_name(stripped))
                    .ok_or_else(|| EntryError::UnknownField(name.to_string()))?;
                (field, true)
            }
        };

        if as_id && !(field.is_link() || field.is_link_array()) {
            return Err(EntryError::InvalidAccessorShape {
                field: field.id().to_string(),
                field_type: field.field_type().to_string(),
            });
        }

        let Some(values) = self.data.fields.get(field.id()) else {
            return Ok(empty_for(field, as_id));
        };

        let Some(effective) = self
            .localized
            .effective_locale(values, locale, field.is_localized())
        else {
            debug!(field = field.id(), "Fallback chain has no value");
            return Ok(Resolved::Absent);
        };
        let Some(value) = values.get(effective) else {
            return Ok(Resolved::Absent);
        };

        match value {
            FieldValue::Link(link) if as_id => Ok(Resolved::Id(link.id().to_string())),
            FieldValue::Link(link) => {
                let target = self.resolve_link(link).await?;
                Ok(Resolved::Entry(target))
            }
            FieldValue::Array(items) if field.is_link_array() => {
                if as_id {
                    let ids = items
                        .iter()
                        .map(|item| link_of(field, item).map(|link| link.id().to_string()))
                        .collect::<Result<Vec<_>, _>>()?;
                    return Ok(Resolved::Ids(ids));
                }
                let mut entries = Vec::with_capacity(items.len());
                for item in items {
                    let link = link_of(field, item)?;
                    match self.resolve_link(link).await {
                        Ok(target) => entries.push(target),
                        Err(EntryError::LinkTargetNotFound { link_type, id }) => {
                            warn!(field = field.id(), %link_type, link_id = %id, "Dropping missing link target");
                        }
                        Err(e) => return Err(e),
                    }
                }
                Ok(Resolved::Entries(entries))
            }
            other => Ok(Resolved::Value(other.clone())),
        }
    }

    /// Resolves `link` through the cache and points the target at this
    /// entry's cursor. A locale passed to a single read does not carry over.
    pub async fn resolve_link(&self, link: &Link) -> Result<Entry, EntryError> {
        let resolver = self
            .data
            .resolver
            .as_ref()
            .ok_or_else(|| EntryError::ResolverUnavailable(self.id().to_string()))?;
        let target = self
            .data
            .links
            .get_or_resolve(link, || resolver.resolve(link, LocaleSelector::All))
            .await?;
        Ok(target.pointed_at(self.localized.locale()))
    }

    fn pointed_at(mut self, locale: &str) -> Entry {
        if self.localized.set_locale(locale).is_err() {
            debug!(entry_id = %self.id(), locale, "Target space lacks locale, keeping its own cursor");
        }
        self
    }

    fn field_for_name(&self, name: &str) -> Option<&Field> {
        let ct = &self.data.content_type;
        ct.field(&lowercase_first(name)).or_else(|| ct.field(name))
    }
}

fn lowercase_first(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn empty_for(field: &Field, as_id: bool) -> Resolved {
    if !field.is_array() {
        return Resolved::Absent;
    }
    if as_id {
        Resolved::Ids(Vec::new())
    } else if field.is_link_array() {
        Resolved::Entries(Vec::new())
    } else {
        Resolved::Value(FieldValue::Array(Vec::new()))
    }
}

fn link_of<'a>(field: &Field, item: &'a FieldValue) -> Result<&'a Link, EntryError> {
    item.as_link().ok_or_else(|| EntryError::MalformedValue {
        field: field.id().to_string(),
        expected: FieldType::Link.to_string(),
    })
}

/// Assembles an [`Entry`] from already-decoded parts.
pub struct EntryBuilder {
    sys: SystemProperties,
    content_type: Arc<ContentType>,
    locales: Arc<LocaleGraph>,
    fields: RawFields,
    resolver: Option<Arc<dyn LinkResolver>>,
}

impl EntryBuilder {
    /// Stores `value` for `field_id` in `locale`.
    pub fn field(mut self, field_id: &str, locale: &str, value: impl Into<FieldValue>) -> Self {
        self.fields.insert(field_id, locale, value.into());
        self
    }

    pub fn resolver(mut self, resolver: Arc<dyn LinkResolver>) -> Self {
        self.resolver = Some(resolver);
        self
    }

    /// Checks every stored field and locale against the schema and space.
    pub fn build(self) -> Result<Entry, EntryError> {
        for (field_id, values) in self.fields.iter() {
            if self.content_type.field(field_id).is_none() {
                return Err(EntryError::UnknownField(field_id.to_string()));
            }
            if let Some(code) = values.keys().find(|code| !self.locales.contains(code)) {
                return Err(EntryError::UnknownLocale(code.clone()));
            }
        }

        let mut localized = LocalizedResource::new(self.locales);
        if let Some(code) = self.sys.locale() {
            localized.set_locale(code)?;
        }

        Ok(Entry {
            data: Arc::new(EntryData {
                sys: self.sys,
                content_type: self.content_type,
                fields: Arc::new(self.fields),
                resolver: self.resolver,
                links: LinkCache::new(),
            }),
            localized,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::mock::MockResolver;
    use crate::model::{Locale, LinkType};
    use serde_json::json;

    fn locales() -> Arc<LocaleGraph> {
        Arc::new(
            LocaleGraph::new(vec![
                Locale::new("en-US", "English").as_default(),
                Locale::new("de-DE", "German").with_fallback("en-US"),
                Locale::new("tlh", "Klingon").with_fallback("en-US"),
            ])
            .unwrap(),
        )
    }

    fn cat_type() -> Arc<ContentType> {
        Arc::new(
            ContentType::new(SystemProperties::new("cat", "ContentType"), "Cat")
                .with_display_field("name")
                .with_field(Field::new("name", "Name", FieldType::Text).localized())
                .with_field(Field::new("lives", "Lives", FieldType::Integer))
                .with_field(Field::array("likes", "Likes", FieldType::Symbol))
                .with_field(Field::link("bestFriend", "Best Friend", LinkType::Entry))
                .with_field(Field::link_array("friends", "Friends", LinkType::Entry))
                .with_field(Field::link_array("image", "Image", LinkType::Asset).disabled()),
        )
    }

    fn sys(id: &str) -> SystemProperties {
        SystemProperties::new(id, "Entry")
            .with_space("cfexampleapi")
            .with_content_type("cat")
    }

    fn target(id: &str) -> Entry {
        Entry::builder(sys(id), cat_type(), locales())
            .field("name", "en-US", id)
            .build()
            .unwrap()
    }

    fn nyancat(resolver: Arc<MockResolver>) -> Entry {
        Entry::builder(sys("nyancat"), cat_type(), locales())
            .field("name", "en-US", "Nyan Cat")
            .field("name", "tlh", "Nyan vIghro'")
            .field("lives", "en-US", FieldValue::from(json!(1337)))
            .field("bestFriend", "en-US", Link::entry("happycat"))
            .field(
                "friends",
                "en-US",
                FieldValue::Array(vec![
                    Link::entry("happycat").into(),
                    Link::entry("ghost").into(),
                    Link::entry("garfield").into(),
                ]),
            )
            .resolver(resolver)
            .build()
            .unwrap()
    }

    #[tokio::test]
    async fn localized_field_uses_fallback() {
        let entry = nyancat(Arc::new(MockResolver::new()));
        let name = entry.get_field("name", FieldOptions::locale("de-DE")).await.unwrap();
        assert_eq!(name.as_str(), Some("Nyan Cat"));
        let name = entry.get_field("Name", FieldOptions::locale("tlh")).await.unwrap();
        assert_eq!(name.as_str(), Some("Nyan vIghro'"));
    }

    #[tokio::test]
    async fn non_localized_field_reads_default_for_any_locale() {
        let entry = nyancat(Arc::new(MockResolver::new()));
        let en = entry.get_field("lives", FieldOptions::default()).await.unwrap();
        let tlh = entry.get_field("lives", FieldOptions::locale("tlh")).await.unwrap();
        assert_eq!(en.as_value(), tlh.as_value());
        assert_eq!(tlh.as_value(), Some(&FieldValue::from(json!(1337))));
    }

    #[tokio::test]
    async fn unset_array_is_empty_not_absent() {
        let entry = nyancat(Arc::new(MockResolver::new()));
        let likes = entry.get_field("likes", FieldOptions::default()).await.unwrap();
        assert_eq!(likes.as_value(), Some(&FieldValue::Array(vec![])));
        let images = entry.get_field("image", FieldOptions::default()).await.unwrap();
        assert!(images.into_entries().unwrap().is_empty());
    }

    #[tokio::test]
    async fn id_suffix_on_text_field_is_invalid() {
        let entry = nyancat(Arc::new(MockResolver::new()));
        let err = entry.get_field("nameId", FieldOptions::default()).await.unwrap_err();
        assert!(matches!(err, EntryError::InvalidAccessorShape { .. }));
        let err = entry.get_field("name", FieldOptions::ids()).await.unwrap_err();
        assert!(matches!(err, EntryError::InvalidAccessorShape { .. }));
    }

    #[tokio::test]
    async fn unknown_field_fails() {
        let entry = nyancat(Arc::new(MockResolver::new()));
        let err = entry.get_field("whiskers", FieldOptions::default()).await.unwrap_err();
        assert_eq!(err, EntryError::UnknownField("whiskers".to_string()));
        let err = entry.get_field("whiskersId", FieldOptions::default()).await.unwrap_err();
        assert_eq!(err, EntryError::UnknownField("whiskersId".to_string()));
    }

    #[tokio::test]
    async fn link_id_does_not_resolve() {
        let resolver = Arc::new(MockResolver::new());
        let entry = nyancat(resolver.clone());
        let id = entry.get_field("BestFriendId", FieldOptions::default()).await.unwrap();
        assert_eq!(id.as_str(), Some("happycat"));
        assert_eq!(resolver.calls(), 0);
    }

    #[tokio::test]
    async fn link_is_resolved_once_and_gets_entry_cursor() {
        let resolver = Arc::new(MockResolver::new());
        resolver.expect_resolve(Link::entry("happycat")).return_ok(target("happycat"));
        let entry = nyancat(resolver.clone()).with_locale("tlh").unwrap();

        let first = entry.get_field("bestFriend", FieldOptions::default()).await.unwrap();
        let first = first.into_entry().unwrap();
        assert_eq!(first.id(), "happycat");
        assert_eq!(first.locale(), "tlh");

        let second = entry
            .get_field("bestFriend", FieldOptions::locale("de-DE"))
            .await
            .unwrap()
            .into_entry()
            .unwrap();
        // The read's own locale is not the entry's cursor.
        assert_eq!(second.locale(), "tlh");
        assert_eq!(resolver.calls(), 1);
        assert_eq!(resolver.calls_for(&Link::entry("happycat")), 1);
        assert_eq!(entry.resolved_links(), 1);
    }

    #[tokio::test]
    async fn detached_copy_starts_with_empty_cache() {
        let resolver = Arc::new(MockResolver::new());
        resolver.expect_resolve(Link::entry("happycat")).return_ok(target("happycat"));
        let entry = nyancat(resolver.clone()).with_locale("tlh").unwrap();
        entry.get_field("bestFriend", FieldOptions::default()).await.unwrap();
        assert_eq!(entry.resolved_links(), 1);

        let copy = entry.detached();
        assert_eq!(copy.resolved_links(), 0);
        assert_eq!(copy.locale(), "tlh");
        assert_eq!(copy.raw_fields(), entry.raw_fields());

        copy.get_field("bestFriend", FieldOptions::default()).await.unwrap();
        assert_eq!(resolver.calls(), 2);
        assert_eq!(entry.resolved_links(), 1);
    }

    #[tokio::test]
    async fn missing_array_member_is_dropped() {
        let resolver = Arc::new(MockResolver::new());
        resolver.expect_resolve(Link::entry("happycat")).return_ok(target("happycat"));
        resolver.expect_resolve(Link::entry("garfield")).return_ok(target("garfield"));
        resolver
            .expect_resolve(Link::entry("ghost"))
            .return_err(crate::clients::ResolveError::not_found(LinkType::Entry, "ghost"));
        let entry = nyancat(resolver.clone());

        let ids = entry.get_field("friendsId", FieldOptions::default()).await.unwrap();
        assert_eq!(ids.into_ids().unwrap(), vec!["happycat", "ghost", "garfield"]);

        let friends = entry
            .get_field("friends", FieldOptions::default())
            .await
            .unwrap()
            .into_entries()
            .unwrap();
        let ids: Vec<_> = friends.iter().map(Entry::id).collect();
        assert_eq!(ids, vec!["happycat", "garfield"]);
        resolver.verify();
    }

    #[tokio::test]
    async fn missing_single_link_fails() {
        let resolver = Arc::new(MockResolver::new());
        resolver
            .expect_resolve(Link::entry("happycat"))
            .return_err(crate::clients::ResolveError::not_found(LinkType::Entry, "happycat"));
        let entry = nyancat(resolver);
        let err = entry.get_field("bestFriend", FieldOptions::default()).await.unwrap_err();
        assert!(matches!(err, EntryError::LinkTargetNotFound { .. }));
        // Sibling fields are unaffected.
        let name = entry.get_field("name", FieldOptions::default()).await.unwrap();
        assert_eq!(name.as_str(), Some("Nyan Cat"));
    }

    #[tokio::test]
    async fn other_resolver_errors_propagate_from_arrays() {
        let resolver = Arc::new(MockResolver::new());
        resolver
            .expect_resolve(Link::entry("happycat"))
            .return_err(crate::clients::ResolveError::Communication("timeout".into()));
        let entry = nyancat(resolver);
        let err = entry.get_field("friends", FieldOptions::default()).await.unwrap_err();
        assert!(matches!(err, EntryError::Resolver(_)));
    }

    #[tokio::test]
    async fn unknown_locale_is_rejected() {
        let entry = nyancat(Arc::new(MockResolver::new()));
        let err = entry.get_field("name", FieldOptions::locale("fr-FR")).await.unwrap_err();
        assert_eq!(err, EntryError::UnknownLocale("fr-FR".to_string()));
    }

    #[tokio::test]
    async fn link_without_resolver_fails() {
        let entry = Entry::builder(sys("lonely"), cat_type(), locales())
            .field("bestFriend", "en-US", Link::entry("happycat"))
            .build()
            .unwrap();
        let err = entry.get_field("bestFriend", FieldOptions::default()).await.unwrap_err();
        assert_eq!(err, EntryError::ResolverUnavailable("lonely".to_string()));
    }

    #[tokio::test]
    async fn display_value_reads_display_field() {
        let entry = nyancat(Arc::new(MockResolver::new())).with_locale("tlh").unwrap();
        let display = entry.display_value().await.unwrap();
        assert_eq!(display.as_str(), Some("Nyan vIghro'"));
    }

    #[test]
    fn builder_rejects_unknown_fields() {
        let err = Entry::builder(sys("x"), cat_type(), locales())
            .field("whiskers", "en-US", "long")
            .build()
            .unwrap_err();
        assert_eq!(err, EntryError::UnknownField("whiskers".to_string()));
    }
}
