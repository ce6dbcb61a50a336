#![forbid(unsafe_code)]

//! Errors surfaced by the browser host.

use notice_core::NoticeError;

/// Errors from the browser host and its bindings.
#[derive(Debug)]
pub enum WebError {
    /// The core rejected the request.
    Notice(NoticeError),
    /// An options object could not be parsed.
    Json(serde_json::Error),
    /// A DOM call threw, or a required global was missing.
    Dom(String),
    /// The notifier was re-entered while already borrowed.
    Busy,
}

impl std::fmt::Display for WebError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Notice(err) => write!(f, "{err}"),
            Self::Json(err) => write!(f, "invalid options: {err}"),
            Self::Dom(msg) => write!(f, "DOM error: {msg}"),
            Self::Busy => f.write_str("notifier is busy"),
        }
    }
}

impl std::error::Error for WebError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Notice(err) => Some(err),
            Self::Json(err) => Some(err),
            Self::Dom(_) | Self::Busy => None,
        }
    }
}

impl From<NoticeError> for WebError {
    fn from(err: NoticeError) -> Self {
        Self::Notice(err)
    }
}

impl From<serde_json::Error> for WebError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err)
    }
}

#[cfg(target_arch = "wasm32")]
impl From<wasm_bindgen::JsValue> for WebError {
    fn from(value: wasm_bindgen::JsValue) -> Self {
        Self::Dom(value.as_string().unwrap_or_else(|| format!("{value:?}")))
    }
}

#[cfg(target_arch = "wasm32")]
impl From<WebError> for wasm_bindgen::JsValue {
    fn from(err: WebError) -> Self {
        js_sys::Error::new(&err.to_string()).into()
    }
}
