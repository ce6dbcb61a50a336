#![forbid(unsafe_code)]

//! JSON shapes accepted by the JavaScript bindings.
//!
//! Field names follow the camelCase option objects callers already pass
//! (`{"type": 1, "text": "Saved", "time": 2}`). Function-valued fields are
//! not representable in JSON; the bindings pick them off the JS object
//! separately.

use notice_core::{AlertOptions, ConfirmOptions, Content, ForceOptions, Severity};
use serde::Deserialize;

use crate::error::WebError;

fn content(text: Option<String>, markup: bool) -> Option<Content> {
    text.map(|t| if markup { Content::Markup(t) } else { Content::Text(t) })
}

/// `alert({ type, text, time, stay, markup })`.
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AlertDto {
    #[serde(rename = "type")]
    pub severity: Option<Severity>,
    pub text: Option<String>,
    pub time: Option<f64>,
    pub stay: bool,
    /// Insert `text` as raw markup instead of escaping it.
    pub markup: bool,
}

impl From<AlertDto> for AlertOptions {
    fn from(dto: AlertDto) -> Self {
        Self {
            severity: dto.severity,
            text: content(dto.text, dto.markup),
            time: dto.time,
            stay: dto.stay,
        }
    }
}

/// `force({ type, text, buttonText, markup })`.
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ForceDto {
    #[serde(rename = "type")]
    pub severity: Option<Severity>,
    pub text: Option<String>,
    pub button_text: Option<String>,
    pub markup: bool,
}

impl From<ForceDto> for ForceOptions {
    fn from(dto: ForceDto) -> Self {
        Self {
            severity: dto.severity,
            text: content(dto.text, dto.markup),
            button_text: content(dto.button_text, dto.markup),
            callback: None,
        }
    }
}

/// `confirm({ text, submitText, cancelText, markup })`.
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ConfirmDto {
    pub text: Option<String>,
    pub submit_text: Option<String>,
    pub cancel_text: Option<String>,
    pub markup: bool,
}

impl From<ConfirmDto> for ConfirmOptions {
    fn from(dto: ConfirmDto) -> Self {
        Self {
            text: content(dto.text, dto.markup),
            submit_text: content(dto.submit_text, dto.markup),
            cancel_text: content(dto.cancel_text, dto.markup),
            submit_callback: None,
            cancel_callback: None,
        }
    }
}

/// Parse an options object. An empty string is treated as `{}`.
///
/// # Errors
///
/// [`WebError::Json`] for malformed JSON, unknown severities included.
pub fn parse<T>(json: &str) -> Result<T, WebError>
where
    T: for<'de> Deserialize<'de> + Default,
{
    if json.trim().is_empty() {
        return Ok(T::default());
    }
    serde_json::from_str(json).map_err(WebError::from)
}
