//! The `sys` envelope shared by every delivery resource, and links.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

use crate::model::ApiDateTime;

/// The kind of resource a [`Link`] points to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum LinkType {
    Entry,
    Asset,
    ContentType,
    Space,
    Environment,
    Other(String),
}

impl LinkType {
    pub fn as_str(&self) -> &str {
        match self {
            LinkType::Entry => "Entry",
            LinkType::Asset => "Asset",
            LinkType::ContentType => "ContentType",
            LinkType::Space => "Space",
            LinkType::Environment => "Environment",
            LinkType::Other(name) => name,
        }
    }
}

impl From<&str> for LinkType {
    fn from(s: &str) -> Self {
        match s {
            "Entry" => LinkType::Entry,
            "Asset" => LinkType::Asset,
            "ContentType" => LinkType::ContentType,
            "Space" => LinkType::Space,
            "Environment" => LinkType::Environment,
            other => LinkType::Other(other.to_string()),
        }
    }
}

impl fmt::Display for LinkType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for LinkType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for LinkType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(LinkType::from(raw.as_str()))
    }
}

/// An unresolved reference to another resource.
///
/// Links are exchanged for hydrated objects through a
/// [`LinkResolver`](crate::clients::LinkResolver); they never resolve themselves.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Link {
    link_type: LinkType,
    id: String,
}

impl Link {
    pub fn new(link_type: LinkType, id: impl Into<String>) -> Self {
        Self {
            link_type,
            id: id.into(),
        }
    }

    pub fn entry(id: impl Into<String>) -> Self {
        Self::new(LinkType::Entry, id)
    }

    pub fn asset(id: impl Into<String>) -> Self {
        Self::new(LinkType::Asset, id)
    }

    pub fn link_type(&self) -> &LinkType {
        &self.link_type
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Decodes a `{"sys": {"type": "Link", ...}}` envelope.
    pub fn from_envelope(value: &serde_json::Value) -> Option<Self> {
        let sys = value.get("sys")?;
        if sys.get("type")?.as_str()? != "Link" {
            return None;
        }
        let link_type = sys.get("linkType")?.as_str()?;
        let id = sys.get("id")?.as_str()?;
        Some(Self::new(LinkType::from(link_type), id))
    }

    /// Encodes the link as the API's minimal envelope object.
    pub fn to_envelope(&self) -> serde_json::Value {
        serde_json::json!({
            "sys": {
                "type": "Link",
                "linkType": self.link_type.as_str(),
                "id": self.id,
            }
        })
    }
}

impl fmt::Display for Link {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.link_type, self.id)
    }
}

impl Serialize for Link {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_envelope().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Link {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = serde_json::Value::deserialize(deserializer)?;
        Link::from_envelope(&value)
            .ok_or_else(|| serde::de::Error::custom(format!("not a link envelope: {}", value)))
    }
}

/// Metadata carried by every resource. Immutable once built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SystemProperties {
    id: String,
    #[serde(rename = "type")]
    resource_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    space: Option<Link>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    content_type: Option<Link>,
    #[serde(default)]
    revision: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    created_at: Option<ApiDateTime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    updated_at: Option<ApiDateTime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    deleted_at: Option<ApiDateTime>,
    /// Set only when the resource was fetched for exactly one locale.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    locale: Option<String>,
}

impl SystemProperties {
    pub fn new(id: impl Into<String>, resource_type: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            resource_type: resource_type.into(),
            space: None,
            content_type: None,
            revision: 0,
            created_at: None,
            updated_at: None,
            deleted_at: None,
            locale: None,
        }
    }

    pub fn with_space(mut self, space_id: impl Into<String>) -> Self {
        self.space = Some(Link::new(LinkType::Space, space_id));
        self
    }

    pub fn with_content_type(mut self, content_type_id: impl Into<String>) -> Self {
        self.content_type = Some(Link::new(LinkType::ContentType, content_type_id));
        self
    }

    pub fn with_revision(mut self, revision: u64) -> Self {
        self.revision = revision;
        self
    }

    pub fn with_created_at(mut self, at: ApiDateTime) -> Self {
        self.created_at = Some(at);
        self
    }

    pub fn with_updated_at(mut self, at: ApiDateTime) -> Self {
        self.updated_at = Some(at);
        self
    }

    pub fn with_deleted_at(mut self, at: ApiDateTime) -> Self {
        self.deleted_at = Some(at);
        self
    }

    pub fn with_locale(mut self, locale: impl Into<String>) -> Self {
        self.locale = Some(locale.into());
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn resource_type(&self) -> &str {
        &self.resource_type
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn created_at(&self) -> Option<ApiDateTime> {
        self.created_at
    }

    pub fn updated_at(&self) -> Option<ApiDateTime> {
        self.updated_at
    }

    pub fn deleted_at(&self) -> Option<ApiDateTime> {
        self.deleted_at
    }

    pub fn space_id(&self) -> Option<&str> {
        self.space.as_ref().map(Link::id)
    }

    pub fn content_type_id(&self) -> Option<&str> {
        self.content_type.as_ref().map(Link::id)
    }

    pub fn locale(&self) -> Option<&str> {
        self.locale.as_deref()
    }

    /// The link that refers back to this resource.
    pub fn as_link(&self) -> Link {
        Link::new(LinkType::from(self.resource_type.as_str()), self.id.clone())
    }
}
