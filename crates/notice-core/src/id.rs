#![forbid(unsafe_code)]

//! Dialog identifiers.

use std::fmt;

use uuid::Uuid;

/// Namespace tag prefixed to every generated id.
pub const ID_PREFIX: &str = "ui-notice-";

/// DOM id of a dialog: `ui-notice-` followed by a random RFC 4122 v4 UUID.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DialogId(String);

impl DialogId {
    /// Generate a fresh random id.
    #[must_use]
    pub fn generate() -> Self {
        Self(format!("{ID_PREFIX}{}", Uuid::new_v4()))
    }

    /// Borrow the id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DialogId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for DialogId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for DialogId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}
