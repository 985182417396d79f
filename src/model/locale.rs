//! Locales of a space and their fallback graph.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::model::ModelError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Locale {
    code: String,
    name: String,
    #[serde(default)]
    fallback_code: Option<String>,
    #[serde(default)]
    default: bool,
}

impl Locale {
    pub fn new(code: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
            fallback_code: None,
            default: false,
        }
    }

    pub fn with_fallback(mut self, code: impl Into<String>) -> Self {
        self.fallback_code = Some(code.into());
        self
    }

    pub fn as_default(mut self) -> Self {
        self.default = true;
        self
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn fallback_code(&self) -> Option<&str> {
        self.fallback_code.as_deref()
    }

    pub fn is_default(&self) -> bool {
        self.default
    }
}

/// The ordered locales of a space.
///
/// Invariants checked at construction:
/// - exactly one default locale, which has no fallback
/// - every fallback names a locale of the graph
/// - following fallbacks never revisits a locale
///
/// A non-default locale without a fallback is accepted, see
/// [`LocaleGraph::chain`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Locale>", into = "Vec<Locale>")]
pub struct LocaleGraph {
    locales: Vec<Locale>,
    default_index: usize,
}

impl LocaleGraph {
    pub fn new(locales: Vec<Locale>) -> Result<Self, ModelError> {
        let mut seen = HashSet::new();
        let mut default_index = None;
        for (index, locale) in locales.iter().enumerate() {
            if !seen.insert(locale.code()) {
                return Err(ModelError::DuplicateLocale(locale.code().to_string()));
            }
            if locale.is_default() {
                if let Some(previous) = default_index {
                    let previous: &Locale = &locales[previous];
                    return Err(ModelError::MultipleDefaultLocales(
                        previous.code().to_string(),
                        locale.code().to_string(),
                    ));
                }
                if locale.fallback_code().is_some() {
                    return Err(ModelError::DefaultHasFallback(locale.code().to_string()));
                }
                default_index = Some(index);
            }
        }
        let default_index = default_index.ok_or(ModelError::MissingDefaultLocale)?;

        for locale in &locales {
            if let Some(fallback) = locale.fallback_code() {
                if !seen.contains(fallback) {
                    return Err(ModelError::UnknownFallback {
                        locale: locale.code().to_string(),
                        fallback: fallback.to_string(),
                    });
                }
            }
        }

        let graph = Self {
            locales,
            default_index,
        };
        for locale in &graph.locales {
            // A chain can visit each locale at most once.
            if graph.chain(locale.code()).count() > graph.locales.len() {
                return Err(ModelError::FallbackCycle(locale.code().to_string()));
            }
        }
        Ok(graph)
    }

    pub fn locales(&self) -> &[Locale] {
        &self.locales
    }

    pub fn codes(&self) -> impl Iterator<Item = &str> {
        self.locales.iter().map(Locale::code)
    }

    pub fn default_locale(&self) -> &Locale {
        &self.locales[self.default_index]
    }

    pub fn default_code(&self) -> &str {
        self.default_locale().code()
    }

    pub fn locale(&self, code: &str) -> Option<&Locale> {
        self.locales.iter().find(|l| l.code() == code)
    }

    pub fn contains(&self, code: &str) -> bool {
        self.locale(code).is_some()
    }

    /// Walks `code` and then its fallbacks, in order.
    ///
    /// The walk ends at the first locale without a fallback. The graph is a
    /// forest: a non-default locale may declare no fallback, and then its
    /// chain stops there without reaching the default locale. Reads of
    /// localized fields in such a locale never see default-locale values.
    /// An unknown starting code yields just itself.
    pub fn chain<'a>(&'a self, code: &'a str) -> FallbackChain<'a> {
        FallbackChain {
            graph: self,
            next: Some(code),
            steps: 0,
        }
    }
}

impl TryFrom<Vec<Locale>> for LocaleGraph {
    type Error = ModelError;

    fn try_from(locales: Vec<Locale>) -> Result<Self, Self::Error> {
        Self::new(locales)
    }
}

impl From<LocaleGraph> for Vec<Locale> {
    fn from(graph: LocaleGraph) -> Self {
        graph.locales
    }
}

/// Iterator over a locale fallback chain, see [`LocaleGraph::chain`].
pub struct FallbackChain<'a> {
    graph: &'a LocaleGraph,
    next: Option<&'a str>,
    steps: usize,
}

impl<'a> Iterator for FallbackChain<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        let current = self.next.take()?;
        self.steps += 1;
        // Bounded so validation can detect cycles with this same iterator.
        if self.steps <= self.graph.locales.len() + 1 {
            self.next = self
                .graph
                .locale(current)
                .and_then(Locale::fallback_code);
        }
        Some(current)
    }
}
