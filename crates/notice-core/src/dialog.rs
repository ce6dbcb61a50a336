#![forbid(unsafe_code)]

//! Dialog options and element builders.
//!
//! Three dialog kinds are supported:
//! - Alert: auto-dismissing toast, no overlay
//! - Force: single-button modal
//! - Confirm: submit/cancel modal
//!
//! The builders here are pure: they turn options plus the current
//! [`Options`] into an [`Element`] tree. Inserting, timing and dismissal
//! live on [`Notifier`](crate::Notifier).

use std::fmt;
use std::time::Duration;

use crate::config::{Options, seconds};
use crate::element::{ClickAction, Content, Element};
use crate::id::DialogId;
use crate::severity::Severity;

/// Action run when a dialog button is pressed.
pub type Callback = Box<dyn FnOnce() + 'static>;

/// Dialog type variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogKind {
    /// Toast with optional auto-dismiss.
    Alert,
    /// Modal with a single button.
    Force,
    /// Modal with submit and cancel buttons.
    Confirm,
}

/// Options for [`Notifier::alert`](crate::Notifier::alert).
#[derive(Default)]
pub struct AlertOptions {
    /// Background severity. Defaults to [`Severity::Info`].
    pub severity: Option<Severity>,
    /// Body. Required.
    pub text: Option<Content>,
    /// Seconds before auto-dismiss. Defaults to the configured `alert_time`.
    pub time: Option<f64>,
    /// Never auto-dismiss.
    pub stay: bool,
}

impl AlertOptions {
    pub fn new(text: impl Into<Content>) -> Self {
        Self {
            text: Some(text.into()),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn severity(mut self, severity: Severity) -> Self {
        self.severity = Some(severity);
        self
    }

    #[must_use]
    pub fn time(mut self, seconds: f64) -> Self {
        self.time = Some(seconds);
        self
    }

    #[must_use]
    pub fn stay(mut self, stay: bool) -> Self {
        self.stay = stay;
        self
    }
}

impl fmt::Debug for AlertOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AlertOptions")
            .field("severity", &self.severity)
            .field("text", &self.text)
            .field("time", &self.time)
            .field("stay", &self.stay)
            .finish()
    }
}

/// Options for [`Notifier::force`](crate::Notifier::force).
#[derive(Default)]
pub struct ForceOptions {
    /// Button background severity. Defaults to [`Severity::Neutral`].
    pub severity: Option<Severity>,
    /// Body. Required.
    pub text: Option<Content>,
    /// Button label. Defaults to the localized "OK".
    pub button_text: Option<Content>,
    /// Run on click. Takes precedence over the positional callback.
    pub callback: Option<Callback>,
}

impl ForceOptions {
    pub fn new(text: impl Into<Content>) -> Self {
        Self {
            text: Some(text.into()),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn severity(mut self, severity: Severity) -> Self {
        self.severity = Some(severity);
        self
    }

    #[must_use]
    pub fn button_text(mut self, label: impl Into<Content>) -> Self {
        self.button_text = Some(label.into());
        self
    }

    #[must_use]
    pub fn callback(mut self, callback: impl FnOnce() + 'static) -> Self {
        self.callback = Some(Box::new(callback));
        self
    }
}

impl fmt::Debug for ForceOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ForceOptions")
            .field("severity", &self.severity)
            .field("text", &self.text)
            .field("button_text", &self.button_text)
            .field("callback", &self.callback.is_some())
            .finish()
    }
}

/// Options for [`Notifier::confirm`](crate::Notifier::confirm).
#[derive(Default)]
pub struct ConfirmOptions {
    /// Body. Required.
    pub text: Option<Content>,
    /// Submit label. Defaults to the localized submit text.
    pub submit_text: Option<Content>,
    /// Cancel label. Defaults to the localized cancel text.
    pub cancel_text: Option<Content>,
    pub submit_callback: Option<Callback>,
    pub cancel_callback: Option<Callback>,
}

impl ConfirmOptions {
    pub fn new(text: impl Into<Content>) -> Self {
        Self {
            text: Some(text.into()),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn submit_text(mut self, label: impl Into<Content>) -> Self {
        self.submit_text = Some(label.into());
        self
    }

    #[must_use]
    pub fn cancel_text(mut self, label: impl Into<Content>) -> Self {
        self.cancel_text = Some(label.into());
        self
    }

    #[must_use]
    pub fn on_submit(mut self, callback: impl FnOnce() + 'static) -> Self {
        self.submit_callback = Some(Box::new(callback));
        self
    }

    #[must_use]
    pub fn on_cancel(mut self, callback: impl FnOnce() + 'static) -> Self {
        self.cancel_callback = Some(Box::new(callback));
        self
    }
}

impl fmt::Debug for ConfirmOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConfirmOptions")
            .field("text", &self.text)
            .field("submit_text", &self.submit_text)
            .field("cancel_text", &self.cancel_text)
            .field("submit_callback", &self.submit_callback.is_some())
            .field("cancel_callback", &self.cancel_callback.is_some())
            .finish()
    }
}

/// Auto-dismiss delay for an alert, or `None` if it should stay.
///
/// `time` falls back to `default`. A zero or NaN time never dismisses;
/// any other time below one second is raised to one second.
#[must_use]
pub fn alert_delay(time: Option<f64>, stay: bool, default: f64) -> Option<Duration> {
    let time = time.unwrap_or(default);
    if stay || time == 0.0 || time.is_nan() {
        return None;
    }
    Some(seconds(if time < 1.0 { 1.0 } else { time }))
}

fn textbox(options: &Options, background: &str, text: Content) -> Element {
    let classes = &options.classes;
    Element::div()
        .class(&classes.textbox)
        .class(background)
        .child(Element::div().class(&classes.textbox_inner).content(text))
}

pub(crate) fn alert_element(
    options: &Options,
    id: &DialogId,
    severity: Severity,
    text: Content,
) -> Element {
    let classes = &options.classes;
    textbox(options, severity.background_class(classes), text)
        .id(id.as_str())
        .class(&classes.alert)
        .on_click(ClickAction::Dismiss(id.clone()))
}

pub(crate) fn force_element(
    options: &Options,
    id: &DialogId,
    severity: Severity,
    text: Content,
    label: Content,
) -> Element {
    let classes = &options.classes;
    Element::div()
        .id(id.as_str())
        .child(textbox(options, &classes.background_info, text))
        .child(
            Element::div()
                .class(&classes.button)
                .class(severity.background_class(classes))
                .content(label)
                .on_click(ClickAction::Acknowledge(id.clone())),
        )
}

pub(crate) fn confirm_element(
    options: &Options,
    id: &DialogId,
    text: Content,
    submit: Content,
    cancel: Content,
) -> Element {
    let classes = &options.classes;
    let button = |background: &str, label: Content, action: ClickAction| {
        Element::div()
            .class(&classes.button)
            .class(&classes.element_half)
            .class(background)
            .content(label)
            .on_click(action)
    };
    Element::div()
        .id(id.as_str())
        .child(textbox(options, &classes.background_info, text))
        .child(button(
            &classes.background_success,
            submit,
            ClickAction::Submit(id.clone()),
        ))
        .child(button(
            &classes.background_error,
            cancel,
            ClickAction::Cancel(id.clone()),
        ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    #[test]
    fn alert_delay_defaults_and_clamps() {
        assert_eq!(alert_delay(None, false, 3.0), Some(Duration::from_secs(3)));
        assert_eq!(alert_delay(Some(0.2), false, 3.0), Some(Duration::from_secs(1)));
        assert_eq!(alert_delay(Some(-4.0), false, 3.0), Some(Duration::from_secs(1)));
        assert_eq!(alert_delay(Some(2.5), false, 3.0), Some(Duration::from_millis(2500)));
    }

    #[test]
    fn alert_delay_zero_or_stay_never_dismisses() {
        assert_eq!(alert_delay(Some(0.0), false, 3.0), None);
        assert_eq!(alert_delay(Some(f64::NAN), false, 3.0), None);
        assert_eq!(alert_delay(None, false, 0.0), None);
        assert_eq!(alert_delay(Some(5.0), true, 3.0), None);
    }

    #[test]
    fn alert_element_shape() {
        let options = Options::default();
        let id = DialogId::from("ui-notice-test");
        let el = alert_element(&options, &id, Severity::Warning, Content::text("hi"));
        assert_eq!(
            el.classes,
            vec!["ui-notice-textbox", "ui-notice-warning", "ui-notice-alert"]
        );
        assert_eq!(el.on_click, Some(ClickAction::Dismiss(id)));
        assert_eq!(el.children[0].classes, vec!["ui-notice-textbox-inner"]);
        assert_eq!(el.children[0].content, Some(Content::text("hi")));
    }

    #[test]
    fn force_element_shape() {
        let options = Options::default();
        let id = DialogId::from("ui-notice-f");
        let el = force_element(
            &options,
            &id,
            Severity::Error,
            Content::text("body"),
            Content::text("OK"),
        );
        assert!(!el.has_class("ui-notice-alert"));
        assert!(el.children[0].has_class("ui-notice-info"));
        let button = &el.children[1];
        assert_eq!(button.classes, vec!["ui-notice-button", "ui-notice-error"]);
        assert_eq!(el.click_actions(), vec![ClickAction::Acknowledge(id)]);
    }

    #[test]
    fn confirm_element_shape() {
        let options = Options::default();
        let id = DialogId::from("ui-notice-c");
        let el = confirm_element(
            &options,
            &id,
            Content::text("sure?"),
            Content::text("Yes"),
            Content::text("No"),
        );
        assert_eq!(el.children.len(), 3);
        assert!(el.children[1].has_class("ui-notice-success"));
        assert!(el.children[1].has_class("ui-notice-element-half"));
        assert!(el.children[2].has_class("ui-notice-error"));
        assert_eq!(
            el.click_actions(),
            vec![ClickAction::Submit(id.clone()), ClickAction::Cancel(id)]
        );
    }

    #[test]
    fn options_debug_hides_callbacks() {
        let opts = ForceOptions::new("x").callback(|| {});
        let debug = format!("{opts:?}");
        assert!(debug.contains("callback: true"));
    }

    proptest! {
        #[test]
        fn alert_delay_is_at_least_one_second(time in -100.0f64..100.0) {
            if let Some(delay) = alert_delay(Some(time), false, 3.0) {
                prop_assert!(delay >= Duration::from_secs(1));
            } else {
                prop_assert!(time == 0.0);
            }
        }
    }
}
