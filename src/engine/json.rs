//! Writes entries back out in the delivery API's wire shape.
//!
//! Serialization walks the raw stored values only. Links come out as link
//! envelopes even when their targets have been resolved and cached.

use serde::{Serialize, Serializer};
use serde_json::{json, Map, Value};

use crate::engine::{Entry, EntryError};
use crate::model::{Field, FieldType, FieldValue, LinkType};

impl Entry {
    /// `{"sys": ..., "fields": ...}` as the API returned it.
    ///
    /// Single-locale entries map field ids straight to values. Multi-locale
    /// entries nest one object per field keyed by locale code.
    pub fn to_json(&self) -> Result<Value, EntryError> {
        let content_type = self.content_type();
        let single_locale = self.system_properties().locale();

        let mut fields = Map::new();
        for (field_id, values) in self.raw_fields().iter() {
            let field = content_type
                .field(field_id)
                .ok_or_else(|| EntryError::UnknownField(field_id.to_string()))?;
            let formatted = match single_locale {
                Some(locale) => match values.get(locale) {
                    Some(value) => format_value(value, field)?,
                    None => Value::Null,
                },
                None => {
                    let mut per_locale = Map::new();
                    for (code, value) in values {
                        per_locale.insert(code.clone(), format_value(value, field)?);
                    }
                    Value::Object(per_locale)
                }
            };
            fields.insert(field_id.to_string(), formatted);
        }

        Ok(json!({
            "sys": serde_json::to_value(self.system_properties())?,
            "fields": fields,
        }))
    }
}

impl Serialize for Entry {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_json()
            .map_err(serde::ser::Error::custom)?
            .serialize(serializer)
    }
}

fn format_value(value: &FieldValue, field: &Field) -> Result<Value, EntryError> {
    if field.is_array() {
        let FieldValue::Array(items) = value else {
            return Err(malformed(field, "Array"));
        };
        let item_type = field.items_type().cloned().unwrap_or(FieldType::Symbol);
        return items
            .iter()
            .map(|item| format_simple(item, &item_type, field.items_link_type(), field))
            .collect::<Result<Vec<_>, _>>()
            .map(Value::Array);
    }
    format_simple(value, field.field_type(), field.link_type(), field)
}

fn format_simple(
    value: &FieldValue,
    field_type: &FieldType,
    link_type: Option<&LinkType>,
    field: &Field,
) -> Result<Value, EntryError> {
    match field_type {
        FieldType::Symbol
        | FieldType::Text
        | FieldType::Integer
        | FieldType::Number
        | FieldType::Boolean
        | FieldType::Location
        | FieldType::Object => Ok(pass_through(value)),
        FieldType::Date => match value {
            FieldValue::Date(at) => Ok(Value::String(at.to_string())),
            FieldValue::Scalar(Value::String(raw)) => Ok(Value::String(raw.clone())),
            _ => Err(malformed(field, "Date")),
        },
        FieldType::Link => match value {
            FieldValue::Link(link) => Ok(json!({
                "sys": {
                    "type": "Link",
                    "linkType": link_type.unwrap_or(link.link_type()).as_str(),
                    "id": link.id(),
                }
            })),
            FieldValue::Scalar(Value::Null) => Ok(Value::Null),
            _ => Err(malformed(field, "Link")),
        },
        FieldType::Array | FieldType::Unknown(_) => Err(EntryError::UnsupportedFieldType {
            field: field.id().to_string(),
            field_type: field_type.to_string(),
        }),
    }
}

fn pass_through(value: &FieldValue) -> Value {
    match value {
        FieldValue::Scalar(raw) => raw.clone(),
        FieldValue::Date(at) => Value::String(at.to_string()),
        FieldValue::Link(link) => link.to_envelope(),
        FieldValue::Array(items) => Value::Array(items.iter().map(pass_through).collect()),
    }
}

fn malformed(field: &Field, expected: &str) -> EntryError {
    EntryError::MalformedValue {
        field: field.id().to_string(),
        expected: expected.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::mock::MockResolver;
    use crate::engine::FieldOptions;
    use crate::model::{ContentType, Link, Locale, LocaleGraph, SystemProperties};
    use pretty_assertions::assert_eq;
    use std::sync::Arc;

    fn locales() -> Arc<LocaleGraph> {
        Arc::new(
            LocaleGraph::new(vec![
                Locale::new("en-US", "English").as_default(),
                Locale::new("tlh", "Klingon").with_fallback("en-US"),
            ])
            .unwrap(),
        )
    }

    fn cat_type() -> Arc<ContentType> {
        Arc::new(
            ContentType::new(SystemProperties::new("cat", "ContentType"), "Cat")
                .with_field(Field::new("name", "Name", FieldType::Text).localized())
                .with_field(Field::new("birthday", "Birthday", FieldType::Date))
                .with_field(Field::link("bestFriend", "Best Friend", LinkType::Entry))
                .with_field(Field::array("likes", "Likes", FieldType::Symbol))
                .with_field(Field::link_array("image", "Image", LinkType::Asset)),
        )
    }

    fn sys() -> SystemProperties {
        SystemProperties::new("nyancat", "Entry")
            .with_space("cfexampleapi")
            .with_content_type("cat")
            .with_revision(5)
    }

    #[test]
    fn multi_locale_nests_by_locale() {
        let entry = Entry::builder(sys(), cat_type(), locales())
            .field("name", "en-US", "Nyan Cat")
            .field("name", "tlh", "Nyan vIghro'")
            .field("birthday", "en-US", "2011-04-04T22:00:00.000Z".parse::<crate::model::ApiDateTime>().unwrap())
            .field("bestFriend", "en-US", Link::entry("happycat"))
            .field(
                "likes",
                "en-US",
                FieldValue::Array(vec!["rainbows".into(), "fish".into()]),
            )
            .field("image", "en-US", FieldValue::Array(vec![Link::asset("nyancat").into()]))
            .build()
            .unwrap();

        assert_eq!(
            entry.to_json().unwrap(),
            json!({
                "sys": {
                    "id": "nyancat",
                    "type": "Entry",
                    "space": {"sys": {"type": "Link", "linkType": "Space", "id": "cfexampleapi"}},
                    "contentType": {"sys": {"type": "Link", "linkType": "ContentType", "id": "cat"}},
                    "revision": 5
                },
                "fields": {
                    "name": {"en-US": "Nyan Cat", "tlh": "Nyan vIghro'"},
                    "birthday": {"en-US": "2011-04-04T22:00:00Z"},
                    "bestFriend": {"en-US": {"sys": {"type": "Link", "linkType": "Entry", "id": "happycat"}}},
                    "likes": {"en-US": ["rainbows", "fish"]},
                    "image": {"en-US": [{"sys": {"type": "Link", "linkType": "Asset", "id": "nyancat"}}]}
                }
            })
        );
    }

    #[test]
    fn single_locale_is_flat() {
        let entry = Entry::builder(sys().with_locale("tlh"), cat_type(), locales())
            .field("name", "tlh", "Nyan vIghro'")
            .field("bestFriend", "tlh", Link::entry("happycat"))
            .build()
            .unwrap();

        let value = entry.to_json().unwrap();
        assert_eq!(
            value["fields"],
            json!({
                "name": "Nyan vIghro'",
                "bestFriend": {"sys": {"type": "Link", "linkType": "Entry", "id": "happycat"}}
            })
        );
        assert_eq!(value["sys"]["locale"], json!("tlh"));
    }

    #[tokio::test]
    async fn resolved_links_still_serialize_as_envelopes() {
        let target = Entry::builder(SystemProperties::new("happycat", "Entry"), cat_type(), locales())
            .field("name", "en-US", "Happy Cat")
            .build()
            .unwrap();
        let resolver = Arc::new(MockResolver::new());
        resolver.expect_resolve(Link::entry("happycat")).return_ok(target);
        let entry = Entry::builder(sys(), cat_type(), locales())
            .field("bestFriend", "en-US", Link::entry("happycat"))
            .resolver(resolver)
            .build()
            .unwrap();

        entry.get_field("bestFriend", FieldOptions::default()).await.unwrap();
        assert_eq!(
            entry.to_json().unwrap()["fields"]["bestFriend"]["en-US"],
            json!({"sys": {"type": "Link", "linkType": "Entry", "id": "happycat"}})
        );
    }

    #[test]
    fn unsupported_type_fails_whole_document() {
        let ct = Arc::new(
            ContentType::new(SystemProperties::new("doc", "ContentType"), "Doc")
                .with_field(Field::new("title", "Title", FieldType::Symbol))
                .with_field(Field::new("body", "Body", FieldType::from("RichText"))),
        );
        let entry = Entry::builder(sys(), ct, locales())
            .field("title", "en-US", "Hello")
            .field("body", "en-US", FieldValue::from(json!({"nodeType": "document"})))
            .build()
            .unwrap();

        let err = entry.to_json().unwrap_err();
        assert_eq!(
            err,
            EntryError::UnsupportedFieldType {
                field: "body".to_string(),
                field_type: "RichText".to_string()
            }
        );
        assert!(serde_json::to_string(&entry).is_err());
    }
}
