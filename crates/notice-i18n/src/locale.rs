#![forbid(unsafe_code)]

//! Locale tag normalization.
//!
//! Hosts hand us locale tags in whatever shape their platform uses:
//! `zh_CN.UTF-8` from a POSIX environment, `zh-CN` from
//! `navigator.language`, `C` from a bare container. Everything is folded to
//! a dash-separated BCP-47-ish tag before it reaches the catalog.

/// Locale identifier (e.g., `"en"`, `"en-US"`, `"zh"`).
pub type Locale = String;

/// Normalize a raw locale tag. Unknown or empty input becomes `"en"`.
#[must_use]
pub fn normalize_locale(raw: &str) -> Locale {
    normalize_locale_raw(raw).unwrap_or_else(|| "en".to_string())
}

/// Primary language subtag of a normalized locale (`"zh-CN"` -> `"zh"`).
#[must_use]
pub fn language_of(locale: &str) -> &str {
    locale.split('-').next().unwrap_or(locale)
}

fn normalize_locale_raw(raw: &str) -> Option<Locale> {
    let raw = raw.trim();
    let raw = raw.split('@').next().unwrap_or(raw);
    let raw = raw.split('.').next().unwrap_or(raw).trim();
    if raw.is_empty() {
        return None;
    }
    if raw.eq_ignore_ascii_case("c") || raw.eq_ignore_ascii_case("posix") {
        return Some("en".to_string());
    }

    let mut parts = raw.split(['_', '-']).filter(|p| !p.is_empty());
    let language = parts.next()?.to_ascii_lowercase();
    let mut normalized = language;
    for part in parts {
        normalized.push('-');
        // Region subtags are upper-case, script subtags title-case.
        if part.len() == 2 {
            normalized.push_str(&part.to_ascii_uppercase());
        } else {
            normalized.push_str(part);
        }
    }
    Some(normalized)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn posix_tags_are_folded() {
        assert_eq!(normalize_locale("zh_CN.UTF-8"), "zh-CN");
        assert_eq!(normalize_locale("en_US@euro"), "en-US");
    }

    #[test]
    fn browser_tags_keep_shape() {
        assert_eq!(normalize_locale("zh-CN"), "zh-CN");
        assert_eq!(normalize_locale("EN-gb"), "en-GB");
        assert_eq!(normalize_locale("zh-Hant-TW"), "zh-Hant-TW");
    }

    #[test]
    fn c_and_empty_default_to_en() {
        assert_eq!(normalize_locale("C"), "en");
        assert_eq!(normalize_locale("POSIX"), "en");
        assert_eq!(normalize_locale("   "), "en");
        assert_eq!(normalize_locale(".UTF-8"), "en");
    }

    #[test]
    fn language_subtag() {
        assert_eq!(language_of("zh-CN"), "zh");
        assert_eq!(language_of("en"), "en");
    }
}
