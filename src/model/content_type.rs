//! Content types: the runtime schema of entries.

use serde::{Deserialize, Serialize};

use crate::model::{Field, FieldType, SystemProperties};

/// A named, ordered collection of field schemas.
///
/// Field order is the order the API returned them in and is preserved when
/// the content type is written back out.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentType {
    sys: SystemProperties,
    name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    #[serde(default)]
    display_field: Option<String>,
    #[serde(default)]
    fields: Vec<Field>,
}

impl ContentType {
    pub fn new(sys: SystemProperties, name: impl Into<String>) -> Self {
        Self {
            sys,
            name: name.into(),
            description: None,
            display_field: None,
            fields: Vec::new(),
        }
    }

    /// Schema used for assets, which have no content type of their own.
    pub fn asset() -> Self {
        Self::new(SystemProperties::new("Asset", "ContentType"), "Asset")
            .with_display_field("title")
            .with_field(Field::new("title", "Title", FieldType::Symbol).localized())
            .with_field(Field::new("description", "Description", FieldType::Text).localized())
            .with_field(Field::new("file", "File", FieldType::Object).localized())
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_display_field(mut self, field_id: impl Into<String>) -> Self {
        self.display_field = Some(field_id.into());
        self
    }

    /// Appends a field, replacing any existing field with the same id in place.
    pub fn with_field(mut self, field: Field) -> Self {
        match self.fields.iter_mut().find(|f| f.id() == field.id()) {
            Some(existing) => *existing = field,
            None => self.fields.push(field),
        }
        self
    }

    pub fn id(&self) -> &str {
        self.sys.id()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn system_properties(&self) -> &SystemProperties {
        &self.sys
    }

    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    /// Exact lookup by field id.
    pub fn field(&self, id: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.id() == id)
    }

    pub fn display_field(&self) -> Option<&Field> {
        self.display_field.as_deref().and_then(|id| self.field(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Link, LinkType};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn human() -> ContentType {
        let sys = SystemProperties::new("human", "ContentType")
            .with_revision(3)
            .with_created_at("2013-06-27T22:46:14.133Z".parse().unwrap())
            .with_updated_at("2013-09-02T15:10:26.818Z".parse().unwrap());
        ContentType::new(sys, "Human")
            .with_description("Also called homo sapiens")
            .with_display_field("name")
            .with_field(Field::new("name", "Name", FieldType::Text).required())
            .with_field(Field::array("likes", "Likes", FieldType::Symbol))
            .with_field(Field::link_array("image", "Image", LinkType::Asset).disabled())
    }

    #[test]
    fn getters() {
        let ct = human();
        assert_eq!(ct.id(), "human");
        assert_eq!(ct.name(), "Human");
        assert_eq!(ct.description(), Some("Also called homo sapiens"));
        assert_eq!(ct.display_field().map(Field::id), Some("name"));
        assert_eq!(ct.system_properties().revision(), 3);
        assert_eq!(
            ct.system_properties().created_at().unwrap().to_string(),
            "2013-06-27T22:46:14.133Z"
        );
        assert_eq!(ct.field("likes").map(Field::name), Some("Likes"));
        let ids: Vec<_> = ct.fields().iter().map(Field::id).collect();
        assert_eq!(ids, vec!["name", "likes", "image"]);
        assert_eq!(ct.system_properties().as_link(), Link::new(LinkType::ContentType, "human"));
    }

    #[test]
    fn missing_optional_parts() {
        let ct = ContentType::new(SystemProperties::new("human", "ContentType"), "Human")
            .with_field(Field::array("likes", "Likes", FieldType::Symbol));
        assert_eq!(ct.description(), None);
        assert!(ct.field("notExisting").is_none());
        assert!(ct.display_field().is_none());
    }

    #[test]
    fn serializes_in_wire_shape() {
        let value = serde_json::to_value(human()).unwrap();
        assert_eq!(
            value,
            json!({
                "sys": {
                    "id": "human",
                    "type": "ContentType",
                    "revision": 3,
                    "createdAt": "2013-06-27T22:46:14.133Z",
                    "updatedAt": "2013-09-02T15:10:26.818Z"
                },
                "name": "Human",
                "description": "Also called homo sapiens",
                "displayField": "name",
                "fields": [
                    {"id": "name", "name": "Name", "type": "Text", "required": true, "localized": false, "disabled": false},
                    {"id": "likes", "name": "Likes", "type": "Array", "items": {"type": "Symbol"}, "required": false, "localized": false, "disabled": false},
                    {"id": "image", "name": "Image", "type": "Array", "items": {"type": "Link", "linkType": "Asset"}, "required": false, "localized": false, "disabled": true}
                ]
            })
        );
    }
}
