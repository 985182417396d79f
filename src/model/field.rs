//! Per-field schema descriptors.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

use crate::model::{LinkType, ModelError};

/// The declared type of a content type field.
///
/// The delivery API defines a closed set of tags. Anything else is kept as
/// [`FieldType::Unknown`] so the offending tag can be reported when the value
/// is formatted.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FieldType {
    Symbol,
    Text,
    Integer,
    Number,
    Boolean,
    Date,
    Location,
    Object,
    Link,
    Array,
    Unknown(String),
}

impl FieldType {
    pub fn as_str(&self) -> &str {
        match self {
            FieldType::Symbol => "Symbol",
            FieldType::Text => "Text",
            FieldType::Integer => "Integer",
            FieldType::Number => "Number",
            FieldType::Boolean => "Boolean",
            FieldType::Date => "Date",
            FieldType::Location => "Location",
            FieldType::Object => "Object",
            FieldType::Link => "Link",
            FieldType::Array => "Array",
            FieldType::Unknown(tag) => tag,
        }
    }
}

impl From<&str> for FieldType {
    fn from(s: &str) -> Self {
        match s {
            "Symbol" => FieldType::Symbol,
            "Text" => FieldType::Text,
            "Integer" => FieldType::Integer,
            "Number" => FieldType::Number,
            "Boolean" => FieldType::Boolean,
            "Date" => FieldType::Date,
            "Location" => FieldType::Location,
            "Object" => FieldType::Object,
            "Link" => FieldType::Link,
            "Array" => FieldType::Array,
            other => FieldType::Unknown(other.to_string()),
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for FieldType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for FieldType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(FieldType::from(raw.as_str()))
    }
}

/// Item descriptor of an `Array` field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldItems {
    #[serde(rename = "type")]
    pub item_type: FieldType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link_type: Option<LinkType>,
}

/// Schema of a single field of a content type.
///
/// Decoding rejects an `Array` of `Link` items that does not name the
/// items' link type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "WireField")]
pub struct Field {
    id: String,
    name: String,
    #[serde(rename = "type")]
    field_type: FieldType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    link_type: Option<LinkType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    items: Option<FieldItems>,
    #[serde(default)]
    required: bool,
    #[serde(default)]
    localized: bool,
    #[serde(default)]
    disabled: bool,
}

/// `Field` as it arrives on the wire, before validation.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireField {
    id: String,
    name: String,
    #[serde(rename = "type")]
    field_type: FieldType,
    #[serde(default)]
    link_type: Option<LinkType>,
    #[serde(default)]
    items: Option<FieldItems>,
    #[serde(default)]
    required: bool,
    #[serde(default)]
    localized: bool,
    #[serde(default)]
    disabled: bool,
}

impl TryFrom<WireField> for Field {
    type Error = ModelError;

    fn try_from(wire: WireField) -> Result<Self, Self::Error> {
        if let Some(items) = &wire.items {
            if items.item_type == FieldType::Link && items.link_type.is_none() {
                return Err(ModelError::MissingItemsLinkType(wire.id));
            }
        }
        Ok(Self {
            id: wire.id,
            name: wire.name,
            field_type: wire.field_type,
            link_type: wire.link_type,
            items: wire.items,
            required: wire.required,
            localized: wire.localized,
            disabled: wire.disabled,
        })
    }
}

impl Field {
    pub fn new(id: impl Into<String>, name: impl Into<String>, field_type: FieldType) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            field_type,
            link_type: None,
            items: None,
            required: false,
            localized: false,
            disabled: false,
        }
    }

    /// Shorthand for a `Link` field pointing at `link_type`.
    pub fn link(id: impl Into<String>, name: impl Into<String>, link_type: LinkType) -> Self {
        let mut field = Self::new(id, name, FieldType::Link);
        field.link_type = Some(link_type);
        field
    }

    /// Shorthand for an `Array` of scalar items.
    pub fn array(id: impl Into<String>, name: impl Into<String>, item_type: FieldType) -> Self {
        let mut field = Self::new(id, name, FieldType::Array);
        field.items = Some(FieldItems {
            item_type,
            link_type: None,
        });
        field
    }

    /// Shorthand for an `Array` of links. Always carries both item tags.
    pub fn link_array(id: impl Into<String>, name: impl Into<String>, link_type: LinkType) -> Self {
        let mut field = Self::new(id, name, FieldType::Array);
        field.items = Some(FieldItems {
            item_type: FieldType::Link,
            link_type: Some(link_type),
        });
        field
    }

    pub fn localized(mut self) -> Self {
        self.localized = true;
        self
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn disabled(mut self) -> Self {
        self.disabled = true;
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn field_type(&self) -> &FieldType {
        &self.field_type
    }

    pub fn link_type(&self) -> Option<&LinkType> {
        self.link_type.as_ref()
    }

    pub fn items_type(&self) -> Option<&FieldType> {
        self.items.as_ref().map(|items| &items.item_type)
    }

    pub fn items_link_type(&self) -> Option<&LinkType> {
        self.items.as_ref().and_then(|items| items.link_type.as_ref())
    }

    pub fn is_localized(&self) -> bool {
        self.localized
    }

    pub fn is_required(&self) -> bool {
        self.required
    }

    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    pub fn is_array(&self) -> bool {
        self.field_type == FieldType::Array
    }

    pub fn is_link(&self) -> bool {
        self.field_type == FieldType::Link
    }

    pub fn is_link_array(&self) -> bool {
        self.is_array() && self.items_type() == Some(&FieldType::Link)
    }
}
