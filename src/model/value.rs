//! Raw stored field values.

use serde_json::Value;

use crate::model::{ApiDateTime, Field, FieldType, Link, ModelError};

/// A single raw value as stored for one field in one locale.
///
/// The variant is chosen from the field's schema when the payload is decoded,
/// never from the JSON shape alone: a Symbol field holding an object stays a
/// scalar, a Link field must hold a link envelope.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Scalar(Value),
    Date(ApiDateTime),
    Link(Link),
    Array(Vec<FieldValue>),
}

impl FieldValue {
    /// Decodes one wire value for `field`. JSON `null` is an absent value.
    pub fn decode(field: &Field, raw: Value) -> Result<Option<FieldValue>, ModelError> {
        if raw.is_null() {
            return Ok(None);
        }
        let value = match field.field_type() {
            FieldType::Array => {
                let Value::Array(items) = raw else {
                    return Err(shape(field, "an array"));
                };
                let item_type = field.items_type().cloned().unwrap_or(FieldType::Symbol);
                let decoded = items
                    .into_iter()
                    .map(|item| decode_simple(field, &item_type, item))
                    .collect::<Result<Vec<_>, _>>()?;
                FieldValue::Array(decoded)
            }
            other => decode_simple(field, other, raw)?,
        };
        Ok(Some(value))
    }

    pub fn as_link(&self) -> Option<&Link> {
        match self {
            FieldValue::Link(link) => Some(link),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            FieldValue::Scalar(value) => value.as_str(),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[FieldValue]> {
        match self {
            FieldValue::Array(items) => Some(items),
            _ => None,
        }
    }
}

impl From<Value> for FieldValue {
    fn from(value: Value) -> Self {
        FieldValue::Scalar(value)
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Scalar(Value::String(value.to_string()))
    }
}

impl From<Link> for FieldValue {
    fn from(link: Link) -> Self {
        FieldValue::Link(link)
    }
}

impl From<ApiDateTime> for FieldValue {
    fn from(at: ApiDateTime) -> Self {
        FieldValue::Date(at)
    }
}

fn decode_simple(field: &Field, field_type: &FieldType, raw: Value) -> Result<FieldValue, ModelError> {
    match field_type {
        FieldType::Link => Link::from_envelope(&raw)
            .map(FieldValue::Link)
            .ok_or_else(|| shape(field, "a link envelope")),
        FieldType::Date => {
            let text = raw.as_str().ok_or_else(|| shape(field, "a date string"))?;
            Ok(FieldValue::Date(text.parse()?))
        }
        _ => Ok(FieldValue::Scalar(raw)),
    }
}

fn shape(field: &Field, expected: &str) -> ModelError {
    ModelError::ValueShape {
        field: field.id().to_string(),
        expected: expected.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::LinkType;
    use serde_json::json;

    #[test]
    fn decodes_link_arrays() {
        let field = Field::link_array("friends", "Friends", LinkType::Entry);
        let value = FieldValue::decode(
            &field,
            json!([
                {"sys": {"type": "Link", "linkType": "Entry", "id": "happycat"}},
                {"sys": {"type": "Link", "linkType": "Entry", "id": "garfield"}}
            ]),
        )
        .unwrap()
        .unwrap();
        assert_eq!(
            value,
            FieldValue::Array(vec![
                FieldValue::Link(Link::entry("happycat")),
                FieldValue::Link(Link::entry("garfield")),
            ])
        );
    }

    #[test]
    fn null_is_absent() {
        let field = Field::new("name", "Name", FieldType::Text);
        assert_eq!(FieldValue::decode(&field, Value::Null).unwrap(), None);
    }

    #[test]
    fn dates_are_parsed() {
        let field = Field::new("birthday", "Birthday", FieldType::Date);
        let value = FieldValue::decode(&field, json!("1979-06-18T23:00:00.000Z")).unwrap();
        assert!(matches!(value, Some(FieldValue::Date(_))));
    }

    #[test]
    fn link_field_requires_envelope() {
        let field = Field::link("bestFriend", "Best Friend", LinkType::Entry);
        let err = FieldValue::decode(&field, json!("happycat")).unwrap_err();
        assert!(matches!(err, ModelError::ValueShape { .. }));
    }
}
