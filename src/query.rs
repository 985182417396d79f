//! Query options for listing resources.
//!
//! Parameters keep the order they were first set in, so the generated query
//! string is stable.

use serde::Serialize;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Query {
    params: Vec<(String, String)>,
}

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    /// Depth of linked resources to include alongside the results.
    pub fn include(self, depth: u32) -> Self {
        self.set("include", depth.to_string())
    }

    /// Locale code, or `*` for every locale.
    pub fn locale(self, code: impl Into<String>) -> Self {
        self.set("locale", code.into())
    }

    pub fn content_type(self, id: impl Into<String>) -> Self {
        self.set("content_type", id.into())
    }

    /// Restricts results to entries holding a link to entry `id`.
    pub fn links_to_entry(self, id: impl Into<String>) -> Self {
        self.set("links_to_entry", id.into())
    }

    /// Restricts results to entries holding a link to asset `id`.
    pub fn links_to_asset(self, id: impl Into<String>) -> Self {
        self.set("links_to_asset", id.into())
    }

    /// Arbitrary equality filter, e.g. `fields.name` or `sys.id`.
    pub fn where_field(self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(key.into(), value.into())
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Filters on field or system values, in insertion order.
    pub fn filters(&self) -> impl Iterator<Item = (&str, &str)> {
        self.params
            .iter()
            .filter(|(k, _)| k.starts_with("fields.") || k.starts_with("sys."))
            .map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn query_string(&self) -> String {
        // Pairs of strings always encode.
        serde_urlencoded::to_string(&self.params).unwrap_or_default()
    }

    fn set(mut self, key: impl Into<String>, value: String) -> Self {
        let key = key.into();
        match self.params.iter_mut().find(|(k, _)| *k == key) {
            Some(param) => param.1 = value,
            None => self.params.push((key, value)),
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_string_include() {
        assert_eq!(Query::new().include(50).query_string(), "include=50");
    }

    #[test]
    fn query_string_locale() {
        assert_eq!(Query::new().locale("de-DE").query_string(), "locale=de-DE");
    }

    #[test]
    fn keeps_insertion_order_and_replaces() {
        let query = Query::new()
            .content_type("cat")
            .where_field("fields.name", "Nyan Cat")
            .include(2)
            .content_type("dog");
        assert_eq!(
            query.query_string(),
            "content_type=dog&fields.name=Nyan+Cat&include=2"
        );
        assert_eq!(query.filters().collect::<Vec<_>>(), vec![("fields.name", "Nyan Cat")]);
    }

    #[test]
    fn empty_query() {
        assert_eq!(Query::new().query_string(), "");
        assert_eq!(Query::new().get("locale"), None);
    }
}
