//! # Mock Resolver
//!
//! A [`LinkResolver`] for tests that answers from registered expectations and
//! counts every call it receives.
//!
//! ```ignore
//! let resolver = Arc::new(MockResolver::new());
//! resolver.expect_resolve(Link::entry("happycat")).return_ok(happycat);
//! resolver.expect_resolve(Link::entry("ghost")).return_err(ResolveError::not_found(LinkType::Entry, "ghost"));
//!
//! let entry = Entry::builder(sys, content_type, locales).resolver(resolver.clone()).build()?;
//! // Exercise the entry...
//! assert_eq!(resolver.calls(), 2);
//! resolver.verify(); // Every expectation was hit at least once
//! ```

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::clients::{LinkResolver, LocaleSelector, ResolveError};
use crate::engine::Entry;
use crate::model::Link;

/// A registered answer for one link.
struct Expectation {
    response: Result<Entry, ResolveError>,
    hits: usize,
}

#[derive(Default)]
pub struct MockResolver {
    expectations: Arc<Mutex<HashMap<Link, Expectation>>>,
    calls: Arc<Mutex<Vec<(Link, LocaleSelector)>>>,
    delay: Option<Duration>,
}

impl MockResolver {
    /// Creates a new mock resolver with no expectations.
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every resolution sleep first, to widen race windows in tests.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Expects `link` to be resolved.
    pub fn expect_resolve(&self, link: Link) -> ResolveExpectationBuilder {
        ResolveExpectationBuilder {
            link,
            expectations: self.expectations.clone(),
        }
    }

    /// Total number of `resolve` calls received.
    pub fn calls(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    /// Number of `resolve` calls received for `link`.
    pub fn calls_for(&self, link: &Link) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|(called, _)| called == link)
            .count()
    }

    /// Locale selectors passed to each call, in order.
    pub fn selectors(&self) -> Vec<LocaleSelector> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .map(|(_, selector)| selector.clone())
            .collect()
    }

    /// Verifies that every expectation was hit.
    pub fn verify(&self) {
        let exps = self.expectations.lock().unwrap();
        let missed: Vec<_> = exps
            .iter()
            .filter(|(_, exp)| exp.hits == 0)
            .map(|(link, _)| link.to_string())
            .collect();
        if !missed.is_empty() {
            panic!("Not all expectations were met. Never resolved: {}", missed.join(", "));
        }
    }
}

#[async_trait]
impl LinkResolver for MockResolver {
    async fn resolve(&self, link: &Link, locale: LocaleSelector) -> Result<Entry, ResolveError> {
        self.calls.lock().unwrap().push((link.clone(), locale));
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        let mut exps = self.expectations.lock().unwrap();
        match exps.get_mut(link) {
            Some(exp) => {
                exp.hits += 1;
                exp.response.clone()
            }
            None => panic!("Unexpected resolve request for {}", link),
        }
    }
}

/// Builder for `resolve` expectations.
pub struct ResolveExpectationBuilder {
    link: Link,
    expectations: Arc<Mutex<HashMap<Link, Expectation>>>,
}

impl ResolveExpectationBuilder {
    /// Sets the expectation to return a resolved entry.
    pub fn return_ok(self, entry: Entry) {
        self.push(Ok(entry));
    }

    /// Sets the expectation to return an error.
    pub fn return_err(self, error: ResolveError) {
        self.push(Err(error));
    }

    fn push(self, response: Result<Entry, ResolveError>) {
        let mut exps = self.expectations.lock().unwrap();
        exps.insert(self.link, Expectation { response, hits: 0 });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ContentType, Locale, LocaleGraph, SystemProperties};

    fn entry(id: &str) -> Entry {
        let locales = LocaleGraph::new(vec![Locale::new("en-US", "English").as_default()]).unwrap();
        Entry::builder(
            SystemProperties::new(id, "Entry"),
            Arc::new(ContentType::new(SystemProperties::new("cat", "ContentType"), "Cat")),
            Arc::new(locales),
        )
        .build()
        .unwrap()
    }

    #[tokio::test]
    async fn test_mock_resolver_with_expectations() {
        let mock = MockResolver::new();
        mock.expect_resolve(Link::entry("happycat")).return_ok(entry("happycat"));

        let resolved = mock.resolve(&Link::entry("happycat"), LocaleSelector::All).await.unwrap();
        assert_eq!(resolved.id(), "happycat");
        assert_eq!(mock.calls(), 1);
        assert_eq!(mock.selectors(), vec![LocaleSelector::All]);
        mock.verify();
    }

    #[test]
    #[should_panic(expected = "Not all expectations were met")]
    fn test_verify_reports_unmet() {
        let mock = MockResolver::new();
        mock.expect_resolve(Link::entry("happycat")).return_ok(entry("happycat"));
        mock.verify();
    }
}
