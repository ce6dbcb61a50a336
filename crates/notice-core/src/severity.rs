#![forbid(unsafe_code)]

//! Severity levels and their background classes.
//!
//! Every severity is addressable by a numeric alias (`1..=5`) or by name.
//! The mapping to a background class is total over [`Severity`]; anything
//! that does not parse into a variant is rejected with
//! [`NoticeError::InvalidSeverity`].

use std::fmt;
use std::str::FromStr;

use crate::config::ClassNames;
use crate::error::NoticeError;

/// Semantic category driving a dialog's background styling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    Success,
    Warning,
    Error,
    Info,
    Neutral,
}

impl Severity {
    /// All variants in alias order.
    pub const ALL: [Severity; 5] = [
        Self::Success,
        Self::Warning,
        Self::Error,
        Self::Info,
        Self::Neutral,
    ];

    /// Numeric alias (`1..=5`).
    #[must_use]
    pub const fn code(self) -> u8 {
        match self {
            Self::Success => 1,
            Self::Warning => 2,
            Self::Error => 3,
            Self::Info => 4,
            Self::Neutral => 5,
        }
    }

    /// Lower-case name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Warning => "warning",
            Self::Error => "error",
            Self::Info => "info",
            Self::Neutral => "neutral",
        }
    }

    /// Background class for this severity under the given class names.
    #[must_use]
    pub fn background_class(self, classes: &ClassNames) -> &str {
        match self {
            Self::Success => classes.background_success.as_str(),
            Self::Warning => classes.background_warning.as_str(),
            Self::Error => classes.background_error.as_str(),
            Self::Info => classes.background_info.as_str(),
            Self::Neutral => classes.background_neutral.as_str(),
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl TryFrom<u8> for Severity {
    type Error = NoticeError;

    fn try_from(code: u8) -> Result<Self, NoticeError> {
        Self::ALL
            .into_iter()
            .find(|s| s.code() == code)
            .ok_or_else(|| NoticeError::InvalidSeverity(code.to_string()))
    }
}

impl FromStr for Severity {
    type Err = NoticeError;

    /// Accepts a name or a numeric alias written as a string (`"3"`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if let Ok(code) = trimmed.parse::<u8>() {
            return Self::try_from(code);
        }
        Self::ALL
            .into_iter()
            .find(|sev| sev.name().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| NoticeError::InvalidSeverity(s.to_string()))
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Severity {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(serde::Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Code(u64),
            Name(String),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Code(code) => u8::try_from(code)
                .map_err(|_| NoticeError::InvalidSeverity(code.to_string()))
                .and_then(Severity::try_from)
                .map_err(serde::de::Error::custom),
            Raw::Name(name) => name.parse().map_err(serde::de::Error::custom),
        }
    }
}
