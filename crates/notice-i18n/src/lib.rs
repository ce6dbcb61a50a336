#![forbid(unsafe_code)]

//! Localization support for ui-notice.
//!
//! - [`catalog::LabelCatalog`]: label lookup with locale fallback
//! - [`locale`]: locale tag normalization and language extraction

pub mod catalog;
pub mod locale;

pub use catalog::{I18nError, LabelCatalog, LabelKey, LocaleLabels};
pub use locale::{Locale, language_of, normalize_locale};
