#![forbid(unsafe_code)]

//! Notifier configuration and partial updates.
//!
//! [`Options`] is the full configuration a [`Notifier`](crate::Notifier)
//! reads at call time. [`OptionsPatch`] is what callers hand to
//! [`Notifier::set_options`](crate::Notifier::set_options).
//!
//! # Merge rules
//!
//! - Scalar fields present in the patch overwrite.
//! - `classes` and `ids` merge role by role; roles the patch leaves out keep
//!   their previous value.
//! - `positions`, when present, replaces the previous value wholesale.
//!
//! # Invariants
//!
//! A stored `Options` always passes [`Options::validate`]. A patch that would
//! produce an invalid configuration is rejected and leaves the stored value
//! untouched.

use std::time::Duration;

use crate::error::NoticeError;

/// Free-form placement hints, replaced wholesale on update.
pub type Positions = std::collections::HashMap<String, String, ahash::RandomState>;

/// CSS class names for every logical role a dialog element can play.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassNames {
    pub container: String,
    pub textbox: String,
    pub textbox_inner: String,
    pub button: String,
    pub element: String,
    pub element_half: String,
    pub element_third: String,
    pub overlay: String,
    pub background_success: String,
    pub background_warning: String,
    pub background_error: String,
    pub background_info: String,
    pub background_neutral: String,
    pub background_overlay: String,
    pub alert: String,
}

impl Default for ClassNames {
    fn default() -> Self {
        Self {
            container: "ui-notice-container".into(),
            textbox: "ui-notice-textbox".into(),
            textbox_inner: "ui-notice-textbox-inner".into(),
            button: "ui-notice-button".into(),
            element: "ui-notice-element".into(),
            element_half: "ui-notice-element-half".into(),
            element_third: "ui-notice-element-third".into(),
            overlay: "ui-notice-overlay".into(),
            background_success: "ui-notice-success".into(),
            background_warning: "ui-notice-warning".into(),
            background_error: "ui-notice-error".into(),
            background_info: "ui-notice-info".into(),
            background_neutral: "ui-notice-neutral".into(),
            background_overlay: "ui-notice-overlay".into(),
            alert: "ui-notice-alert".into(),
        }
    }
}

impl ClassNames {
    fn roles(&self) -> [(&'static str, &str); 15] {
        [
            ("container", self.container.as_str()),
            ("textbox", self.textbox.as_str()),
            ("textboxInner", self.textbox_inner.as_str()),
            ("button", self.button.as_str()),
            ("element", self.element.as_str()),
            ("elementHalf", self.element_half.as_str()),
            ("elementThird", self.element_third.as_str()),
            ("overlay", self.overlay.as_str()),
            ("backgroundSuccess", self.background_success.as_str()),
            ("backgroundWarning", self.background_warning.as_str()),
            ("backgroundError", self.background_error.as_str()),
            ("backgroundInfo", self.background_info.as_str()),
            ("backgroundNeutral", self.background_neutral.as_str()),
            ("backgroundOverlay", self.background_overlay.as_str()),
            ("alert", self.alert.as_str()),
        ]
    }

    fn apply(&mut self, patch: ClassNamesPatch) {
        let ClassNamesPatch {
            container,
            textbox,
            textbox_inner,
            button,
            element,
            element_half,
            element_third,
            overlay,
            background_success,
            background_warning,
            background_error,
            background_info,
            background_neutral,
            background_overlay,
            alert,
        } = patch;
        overwrite(&mut self.container, container);
        overwrite(&mut self.textbox, textbox);
        overwrite(&mut self.textbox_inner, textbox_inner);
        overwrite(&mut self.button, button);
        overwrite(&mut self.element, element);
        overwrite(&mut self.element_half, element_half);
        overwrite(&mut self.element_third, element_third);
        overwrite(&mut self.overlay, overlay);
        overwrite(&mut self.background_success, background_success);
        overwrite(&mut self.background_warning, background_warning);
        overwrite(&mut self.background_error, background_error);
        overwrite(&mut self.background_info, background_info);
        overwrite(&mut self.background_neutral, background_neutral);
        overwrite(&mut self.background_overlay, background_overlay);
        overwrite(&mut self.alert, alert);
    }
}

/// DOM ids for singleton elements.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdNames {
    pub overlay: String,
}

impl Default for IdNames {
    fn default() -> Self {
        Self {
            overlay: "ui-notice-overlay".into(),
        }
    }
}

/// Full notifier configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct Options {
    /// Seconds before an alert auto-dismisses.
    pub alert_time: f64,
    /// Whether clicking the overlay dismisses the dialog that owns it.
    pub overlay_click_dismiss: bool,
    /// CSS opacity the overlay fades in to.
    pub overlay_opacity: String,
    /// CSS timing function.
    pub transition_curve: String,
    /// Seconds a fade takes; also the delay before a faded element is detached.
    pub transition_duration: f64,
    /// CSS `transition-property` value.
    pub transition_selector: String,
    pub classes: ClassNames,
    pub ids: IdNames,
    pub positions: Option<Positions>,
    /// Route Enter/Escape to the most recent dialog.
    pub keyboard_dismiss: bool,
    /// Locale for default button labels.
    pub locale: String,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            alert_time: 3.0,
            overlay_click_dismiss: true,
            overlay_opacity: "0.75".into(),
            transition_curve: "ease".into(),
            transition_duration: 0.3,
            transition_selector: "all".into(),
            classes: ClassNames::default(),
            ids: IdNames::default(),
            positions: None,
            keyboard_dismiss: false,
            locale: "en".into(),
        }
    }
}

impl Options {
    /// CSS `transition` shorthand, e.g. `all 0.3s ease`.
    #[must_use]
    pub fn transition(&self) -> String {
        format!(
            "{} {}s {}",
            self.transition_selector, self.transition_duration, self.transition_curve
        )
    }

    /// Delay between starting a fade-out and detaching the element.
    #[must_use]
    pub fn transition_delay(&self) -> Duration {
        seconds(self.transition_duration)
    }

    /// Merge a patch into a copy of `self` and validate the result.
    ///
    /// # Errors
    ///
    /// [`NoticeError::InvalidOption`] if the merged configuration is invalid.
    pub fn merged(&self, patch: OptionsPatch) -> Result<Self, NoticeError> {
        let mut next = self.clone();
        next.apply(patch);
        next.validate()?;
        Ok(next)
    }

    fn apply(&mut self, patch: OptionsPatch) {
        let OptionsPatch {
            alert_time,
            overlay_click_dismiss,
            overlay_opacity,
            transition_curve,
            transition_duration,
            transition_selector,
            classes,
            ids,
            positions,
            keyboard_dismiss,
            locale,
        } = patch;
        overwrite(&mut self.alert_time, alert_time);
        overwrite(&mut self.overlay_click_dismiss, overlay_click_dismiss);
        overwrite(&mut self.overlay_opacity, overlay_opacity);
        overwrite(&mut self.transition_curve, transition_curve);
        overwrite(&mut self.transition_duration, transition_duration);
        overwrite(&mut self.transition_selector, transition_selector);
        self.classes.apply(classes);
        overwrite(&mut self.ids.overlay, ids.overlay);
        if positions.is_some() {
            self.positions = positions;
        }
        overwrite(&mut self.keyboard_dismiss, keyboard_dismiss);
        overwrite(&mut self.locale, locale);
    }

    /// Check every field a host would choke on.
    ///
    /// # Errors
    ///
    /// [`NoticeError::InvalidOption`] naming the first offending field.
    pub fn validate(&self) -> Result<(), NoticeError> {
        non_negative_seconds("alertTime", self.alert_time)?;
        non_negative_seconds("transitionDuration", self.transition_duration)?;

        match self.overlay_opacity.trim().parse::<f32>() {
            Ok(v) if (0.0..=1.0).contains(&v) => {}
            _ => {
                return Err(NoticeError::invalid_option(
                    "overlayOpacity",
                    format!("{:?} is not a number in [0, 1]", self.overlay_opacity),
                ));
            }
        }

        // DOMTokenList rejects empty tokens and tokens containing whitespace.
        for (role, class) in self.classes.roles() {
            if class.is_empty() || class.chars().any(char::is_whitespace) {
                return Err(NoticeError::invalid_option(
                    "classes",
                    format!("class for `{role}` must be a single non-empty token, got {class:?}"),
                ));
            }
        }

        if self.ids.overlay.trim().is_empty() {
            return Err(NoticeError::invalid_option(
                "ids",
                "overlay id must not be empty",
            ));
        }
        Ok(())
    }
}

fn non_negative_seconds(field: &'static str, value: f64) -> Result<(), NoticeError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(NoticeError::invalid_option(
            field,
            format!("{value} is not a finite, non-negative number of seconds"),
        ))
    }
}

/// Convert validated seconds to a millisecond-granular duration.
pub(crate) fn seconds(value: f64) -> Duration {
    Duration::from_millis((value * 1000.0).round() as u64)
}

fn overwrite<T>(slot: &mut T, value: Option<T>) {
    if let Some(value) = value {
        *slot = value;
    }
}

/// Partial class-name update. Roles left as `None` keep their value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, rename_all = "camelCase"))]
pub struct ClassNamesPatch {
    pub container: Option<String>,
    pub textbox: Option<String>,
    pub textbox_inner: Option<String>,
    pub button: Option<String>,
    pub element: Option<String>,
    pub element_half: Option<String>,
    pub element_third: Option<String>,
    pub overlay: Option<String>,
    pub background_success: Option<String>,
    pub background_warning: Option<String>,
    pub background_error: Option<String>,
    pub background_info: Option<String>,
    pub background_neutral: Option<String>,
    pub background_overlay: Option<String>,
    pub alert: Option<String>,
}

impl ClassNamesPatch {
    /// Layer `later` on top of `self`, key by key.
    #[must_use]
    pub fn and(self, later: Self) -> Self {
        Self {
            container: later.container.or(self.container),
            textbox: later.textbox.or(self.textbox),
            textbox_inner: later.textbox_inner.or(self.textbox_inner),
            button: later.button.or(self.button),
            element: later.element.or(self.element),
            element_half: later.element_half.or(self.element_half),
            element_third: later.element_third.or(self.element_third),
            overlay: later.overlay.or(self.overlay),
            background_success: later.background_success.or(self.background_success),
            background_warning: later.background_warning.or(self.background_warning),
            background_error: later.background_error.or(self.background_error),
            background_info: later.background_info.or(self.background_info),
            background_neutral: later.background_neutral.or(self.background_neutral),
            background_overlay: later.background_overlay.or(self.background_overlay),
            alert: later.alert.or(self.alert),
        }
    }
}

/// Partial id update.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, rename_all = "camelCase"))]
pub struct IdNamesPatch {
    pub overlay: Option<String>,
}

/// Partial configuration update accepted by `set_options`.
///
/// With the `serde` feature this deserializes from the camelCase JSON shape
/// (`{"alertTime": 5, "classes": {"button": "x"}}`).
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, rename_all = "camelCase"))]
pub struct OptionsPatch {
    pub alert_time: Option<f64>,
    pub overlay_click_dismiss: Option<bool>,
    pub overlay_opacity: Option<String>,
    pub transition_curve: Option<String>,
    pub transition_duration: Option<f64>,
    pub transition_selector: Option<String>,
    pub classes: ClassNamesPatch,
    pub ids: IdNamesPatch,
    pub positions: Option<Positions>,
    pub keyboard_dismiss: Option<bool>,
    pub locale: Option<String>,
}

impl OptionsPatch {
    /// Layer `later` on top of `self` with the same rules `set_options` uses,
    /// so applying `a` then `b` equals applying `a.and(b)`.
    #[must_use]
    pub fn and(self, later: Self) -> Self {
        Self {
            alert_time: later.alert_time.or(self.alert_time),
            overlay_click_dismiss: later.overlay_click_dismiss.or(self.overlay_click_dismiss),
            overlay_opacity: later.overlay_opacity.or(self.overlay_opacity),
            transition_curve: later.transition_curve.or(self.transition_curve),
            transition_duration: later.transition_duration.or(self.transition_duration),
            transition_selector: later.transition_selector.or(self.transition_selector),
            classes: self.classes.and(later.classes),
            ids: IdNamesPatch {
                overlay: later.ids.overlay.or(self.ids.overlay),
            },
            positions: later.positions.or(self.positions),
            keyboard_dismiss: later.keyboard_dismiss.or(self.keyboard_dismiss),
            locale: later.locale.or(self.locale),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    #[test]
    fn defaults_are_valid() {
        let options = Options::default();
        options.validate().unwrap();
        assert_eq!(options.transition(), "all 0.3s ease");
        assert_eq!(options.transition_delay(), Duration::from_millis(300));
    }

    #[test]
    fn class_patch_keeps_other_roles() {
        let options = Options::default()
            .merged(OptionsPatch {
                classes: ClassNamesPatch {
                    button: Some("x".into()),
                    ..Default::default()
                },
                ..Default::default()
            })
            .unwrap();
        let expected = ClassNames {
            button: "x".into(),
            ..ClassNames::default()
        };
        assert_eq!(options.classes, expected);
    }

    #[test]
    fn positions_replace_wholesale() {
        let mut first = Positions::default();
        first.insert("alert".into(), "top".into());
        first.insert("force".into(), "center".into());
        let mut second = Positions::default();
        second.insert("alert".into(), "bottom".into());

        let options = Options::default()
            .merged(OptionsPatch {
                positions: Some(first),
                ..Default::default()
            })
            .unwrap()
            .merged(OptionsPatch {
                positions: Some(second.clone()),
                ..Default::default()
            })
            .unwrap();
        assert_eq!(options.positions, Some(second));

        // Absent positions leave the previous value alone.
        let untouched = options.merged(OptionsPatch::default()).unwrap();
        assert_eq!(untouched.positions, options.positions);
    }

    #[test]
    fn invalid_values_are_rejected() {
        let base = Options::default();
        let cases = [
            (
                OptionsPatch {
                    transition_duration: Some(-1.0),
                    ..Default::default()
                },
                "transitionDuration",
            ),
            (
                OptionsPatch {
                    alert_time: Some(f64::INFINITY),
                    ..Default::default()
                },
                "alertTime",
            ),
            (
                OptionsPatch {
                    overlay_opacity: Some("dim".into()),
                    ..Default::default()
                },
                "overlayOpacity",
            ),
            (
                OptionsPatch {
                    overlay_opacity: Some("1.5".into()),
                    ..Default::default()
                },
                "overlayOpacity",
            ),
            (
                OptionsPatch {
                    classes: ClassNamesPatch {
                        alert: Some("two words".into()),
                        ..Default::default()
                    },
                    ..Default::default()
                },
                "classes",
            ),
            (
                OptionsPatch {
                    ids: IdNamesPatch {
                        overlay: Some(" ".into()),
                    },
                    ..Default::default()
                },
                "ids",
            ),
        ];
        for (patch, field) in cases {
            match base.merged(patch) {
                Err(NoticeError::InvalidOption { field: f, .. }) => assert_eq!(f, field),
                other => panic!("expected InvalidOption for {field}, got {other:?}"),
            }
        }
    }

    #[cfg(feature = "serde")]
    #[test]
    fn patch_deserializes_from_camel_case() {
        let patch: OptionsPatch = serde_json::from_str(
            r#"{"alertTime": 5, "overlayClickDismiss": false,
                "classes": {"textboxInner": "inner"}, "ids": {"overlay": "shade"}}"#,
        )
        .unwrap();
        assert_eq!(patch.alert_time, Some(5.0));
        assert_eq!(patch.overlay_click_dismiss, Some(false));
        assert_eq!(patch.classes.textbox_inner.as_deref(), Some("inner"));
        assert_eq!(patch.ids.overlay.as_deref(), Some("shade"));
        assert_eq!(patch.classes.button, None);
    }

    fn token() -> impl Strategy<Value = Option<String>> {
        proptest::option::of("[a-z][a-z0-9-]{0,8}")
    }

    prop_compose! {
        fn patch()(
            alert_time in proptest::option::of(0.0f64..30.0),
            duration in proptest::option::of(0.0f64..2.0),
            dismiss in proptest::option::of(any::<bool>()),
            button in token(),
            alert in token(),
            overlay_class in token(),
            overlay_id in token(),
            curve in token(),
        ) -> OptionsPatch {
            OptionsPatch {
                alert_time,
                transition_duration: duration,
                overlay_click_dismiss: dismiss,
                transition_curve: curve,
                classes: ClassNamesPatch {
                    button,
                    alert,
                    overlay: overlay_class,
                    ..Default::default()
                },
                ids: IdNamesPatch { overlay: overlay_id },
                ..Default::default()
            }
        }
    }

    proptest! {
        #[test]
        fn sequential_patches_equal_combined_patch(a in patch(), b in patch()) {
            let base = Options::default();
            let sequential = base.merged(a.clone()).unwrap().merged(b.clone()).unwrap();
            let combined = base.merged(a.and(b)).unwrap();
            prop_assert_eq!(sequential, combined);
        }
    }
}
