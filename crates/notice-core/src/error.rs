#![forbid(unsafe_code)]

//! Error type for construction-time misuse.
//!
//! Displaying a dialog is fire-and-forget once it has been built; errors are
//! only returned for input that could never render correctly.

/// Errors returned by [`Notifier`](crate::Notifier) operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NoticeError {
    /// A severity was neither a numeric alias `1..=5` nor a known name.
    InvalidSeverity(String),
    /// A required option was not supplied.
    MissingRequiredField(&'static str),
    /// A configuration value failed validation.
    InvalidOption {
        /// Option name in its camelCase form (`transitionDuration`, ...).
        field: &'static str,
        /// Human-readable reason.
        reason: String,
    },
}

impl NoticeError {
    pub(crate) fn invalid_option(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidOption {
            field,
            reason: reason.into(),
        }
    }
}

impl std::fmt::Display for NoticeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidSeverity(value) => write!(f, "invalid severity: {value}"),
            Self::MissingRequiredField(field) => write!(f, "missing required field `{field}`"),
            Self::InvalidOption { field, reason } => {
                write!(f, "invalid option `{field}`: {reason}")
            }
        }
    }
}

impl std::error::Error for NoticeError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_messages() {
        assert_eq!(
            NoticeError::InvalidSeverity("7".into()).to_string(),
            "invalid severity: 7"
        );
        assert_eq!(
            NoticeError::MissingRequiredField("text").to_string(),
            "missing required field `text`"
        );
        assert_eq!(
            NoticeError::invalid_option("overlayOpacity", "not a number").to_string(),
            "invalid option `overlayOpacity`: not a number"
        );
    }
}
