#![forbid(unsafe_code)]

//! Label catalog with locale fallback.
//!
//! # Invariants
//!
//! 1. **Fallback chain terminates**: a lookup tries the exact locale, then
//!    its language subtag, then each fallback locale once.
//!
//! 2. **Labels are total**: [`LabelCatalog::label`] always yields a string;
//!    when no locale provides the key the built-in English text is used.
//!
//! # Failure Modes
//!
//! | Failure | Cause | Behavior |
//! |---------|-------|----------|
//! | Missing key | Key not in any locale | `get` returns `None`, `label` returns English |
//! | Missing locale | Locale not loaded | Falls through chain |
//! | Empty locale tag | `add_locale("")` | `Err(I18nError::InvalidLocale)` |

use std::collections::HashMap;

use crate::locale::{Locale, language_of, normalize_locale};

/// Errors from i18n operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum I18nError {
    /// A locale string was empty or malformed.
    InvalidLocale(String),
}

impl std::fmt::Display for I18nError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidLocale(l) => write!(f, "invalid locale: {l:?}"),
        }
    }
}

impl std::error::Error for I18nError {}

/// Labels a dialog may need to localize.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LabelKey {
    /// Single button of a force dialog.
    Ok,
    /// Submit button of a confirm dialog.
    Submit,
    /// Cancel button of a confirm dialog.
    Cancel,
}

impl LabelKey {
    /// Built-in English text, used when no catalog entry exists.
    #[must_use]
    pub const fn english(self) -> &'static str {
        match self {
            Self::Ok | Self::Submit => "OK",
            Self::Cancel => "Cancel",
        }
    }
}

/// Labels for a single locale.
#[derive(Debug, Clone, Default)]
pub struct LocaleLabels {
    labels: HashMap<LabelKey, String>,
}

impl LocaleLabels {
    /// Create an empty label set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a label, builder style.
    #[must_use]
    pub fn with(mut self, key: LabelKey, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    /// Insert a label.
    pub fn insert(&mut self, key: LabelKey, value: impl Into<String>) {
        self.labels.insert(key, value.into());
    }

    /// Look up a label.
    #[must_use]
    pub fn get(&self, key: LabelKey) -> Option<&str> {
        self.labels.get(&key).map(String::as_str)
    }

    /// Number of labels.
    #[must_use]
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// Whether the set has no labels.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

/// Label catalog keyed by normalized locale.
///
/// # Example
///
/// ```
/// use notice_i18n::{LabelCatalog, LabelKey};
///
/// let catalog = LabelCatalog::builtin();
/// assert_eq!(catalog.label("en", LabelKey::Ok), "OK");
/// assert_eq!(catalog.label("zh-CN", LabelKey::Cancel), "取消");
/// assert_eq!(catalog.label("fr", LabelKey::Cancel), "Cancel");
/// ```
#[derive(Debug, Clone)]
pub struct LabelCatalog {
    locales: HashMap<Locale, LocaleLabels>,
    fallback_chain: Vec<Locale>,
}

impl Default for LabelCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

impl LabelCatalog {
    /// Create an empty catalog with no fallback chain.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            locales: HashMap::new(),
            fallback_chain: Vec::new(),
        }
    }

    /// Catalog with the bundled `en` and `zh` labels, falling back to `en`.
    #[must_use]
    pub fn builtin() -> Self {
        let mut catalog = Self::empty();
        catalog.locales.insert(
            "en".into(),
            LocaleLabels::new()
                .with(LabelKey::Ok, "OK")
                .with(LabelKey::Submit, "OK")
                .with(LabelKey::Cancel, "Cancel"),
        );
        catalog.locales.insert(
            "zh".into(),
            LocaleLabels::new()
                .with(LabelKey::Ok, "确定")
                .with(LabelKey::Submit, "确定")
                .with(LabelKey::Cancel, "取消"),
        );
        catalog.fallback_chain = vec!["en".into()];
        catalog
    }

    /// Add (or replace) labels for a locale.
    ///
    /// # Errors
    ///
    /// [`I18nError::InvalidLocale`] if the tag is blank.
    pub fn add_locale(&mut self, locale: &str, labels: LocaleLabels) -> Result<(), I18nError> {
        if locale.trim().is_empty() {
            return Err(I18nError::InvalidLocale(locale.to_string()));
        }
        self.locales.insert(normalize_locale(locale), labels);
        Ok(())
    }

    /// Set the fallback chain (tried in order when a key is missing).
    pub fn set_fallback_chain(&mut self, chain: Vec<Locale>) {
        self.fallback_chain = chain.iter().map(|l| normalize_locale(l)).collect();
    }

    /// Look up a label, walking language and fallback locales.
    #[must_use]
    pub fn get(&self, locale: &str, key: LabelKey) -> Option<&str> {
        let locale = normalize_locale(locale);
        let tags = std::iter::once(locale.as_str())
            .chain(self.fallback_chain.iter().map(String::as_str));

        for tag in tags {
            let language = language_of(tag);
            let candidates = std::iter::once(tag).chain((language != tag).then_some(language));
            for candidate in candidates {
                if let Some(label) = self.locales.get(candidate).and_then(|ls| ls.get(key)) {
                    return Some(label);
                }
            }
        }
        None
    }

    /// Like [`get`](Self::get) but never fails.
    #[must_use]
    pub fn label(&self, locale: &str, key: LabelKey) -> &str {
        self.get(locale, key).unwrap_or(key.english())
    }

    /// All registered locale tags.
    #[must_use]
    pub fn locales(&self) -> Vec<&str> {
        self.locales.keys().map(String::as_str).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn builtin_has_en_and_zh() {
        let catalog = LabelCatalog::builtin();
        let mut locales = catalog.locales();
        locales.sort_unstable();
        assert_eq!(locales, vec!["en", "zh"]);
        assert_eq!(catalog.get("zh", LabelKey::Submit), Some("确定"));
    }

    #[test]
    fn region_falls_back_to_language() {
        let catalog = LabelCatalog::builtin();
        assert_eq!(catalog.get("zh_TW.UTF-8", LabelKey::Ok), Some("确定"));
    }

    #[test]
    fn unknown_locale_uses_chain() {
        let catalog = LabelCatalog::builtin();
        assert_eq!(catalog.get("de-DE", LabelKey::Cancel), Some("Cancel"));
    }

    #[test]
    fn empty_catalog_returns_none_but_label_is_total() {
        let catalog = LabelCatalog::empty();
        assert_eq!(catalog.get("en", LabelKey::Ok), None);
        assert_eq!(catalog.label("en", LabelKey::Cancel), "Cancel");
    }

    #[test]
    fn added_locale_wins_over_chain() {
        let mut catalog = LabelCatalog::builtin();
        catalog
            .add_locale("fr", LocaleLabels::new().with(LabelKey::Cancel, "Annuler"))
            .unwrap();
        assert_eq!(catalog.label("fr-CA", LabelKey::Cancel), "Annuler");
        // Missing key in `fr` still walks to `en`.
        assert_eq!(catalog.label("fr", LabelKey::Ok), "OK");
    }

    #[test]
    fn blank_locale_is_rejected() {
        let mut catalog = LabelCatalog::empty();
        let err = catalog.add_locale("  ", LocaleLabels::new()).unwrap_err();
        assert_eq!(err, I18nError::InvalidLocale("  ".into()));
    }

    #[test]
    fn custom_chain_is_normalized() {
        let mut catalog = LabelCatalog::builtin();
        catalog.set_fallback_chain(vec!["zh_CN".into()]);
        assert_eq!(catalog.label("ja", LabelKey::Ok), "确定");
    }

    proptest! {
        #[test]
        fn label_never_empty(locale in "[a-zA-Z_.-]{0,12}") {
            let catalog = LabelCatalog::builtin();
            for key in [LabelKey::Ok, LabelKey::Submit, LabelKey::Cancel] {
                prop_assert!(!catalog.label(&locale, key).is_empty());
            }
        }
    }
}
