//! Locale cursor and fallback walk shared by every localized resource.

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::engine::EntryError;
use crate::model::{FieldValue, LocaleGraph};

/// Raw values of one field, keyed by locale code.
pub type LocalizedValues = BTreeMap<String, FieldValue>;

/// A resource whose field reads are locale-dependent.
///
/// Holds the owning space's locale graph and an optional cursor. Reads that
/// name no locale use the cursor, then the space default.
#[derive(Debug, Clone)]
pub struct LocalizedResource {
    locales: Arc<LocaleGraph>,
    cursor: Option<String>,
}

impl LocalizedResource {
    pub fn new(locales: Arc<LocaleGraph>) -> Self {
        Self {
            locales,
            cursor: None,
        }
    }

    pub fn locales(&self) -> &LocaleGraph {
        &self.locales
    }

    pub fn locale_graph(&self) -> Arc<LocaleGraph> {
        self.locales.clone()
    }

    /// The locale reads default to.
    pub fn locale(&self) -> &str {
        self.cursor
            .as_deref()
            .unwrap_or_else(|| self.locales.default_code())
    }

    pub fn set_locale(&mut self, code: &str) -> Result<(), EntryError> {
        self.check_locale(code)?;
        self.cursor = Some(code.to_string());
        Ok(())
    }

    /// Picks the locale for a read: the explicit input, else the cursor.
    pub fn locale_from_input<'a>(&'a self, input: Option<&'a str>) -> Result<&'a str, EntryError> {
        match input {
            Some(code) => {
                self.check_locale(code)?;
                Ok(code)
            }
            None => Ok(self.locale()),
        }
    }

    /// The locale whose stored value a read of `requested` should return.
    ///
    /// Non-localized fields live under the default locale only. Localized
    /// fields walk the fallback chain and stop at the first locale with a
    /// value; `None` means nothing along the chain is set.
    pub fn effective_locale<'a>(
        &'a self,
        values: &LocalizedValues,
        requested: &'a str,
        localized: bool,
    ) -> Option<&'a str> {
        if !localized {
            if values.contains_key(requested) {
                return Some(requested);
            }
            let default = self.locales.default_code();
            return values.contains_key(default).then_some(default);
        }
        self.locales
            .chain(requested)
            .find(|code| values.contains_key(*code))
    }

    fn check_locale(&self, code: &str) -> Result<(), EntryError> {
        if self.locales.contains(code) {
            Ok(())
        } else {
            Err(EntryError::UnknownLocale(code.to_string()))
        }
    }
}
