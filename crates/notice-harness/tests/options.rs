#![forbid(unsafe_code)]

//! `set_options` merging as observed by dialogs created afterwards.

use std::time::Duration;

use notice_core::{
    AlertOptions, ClassNamesPatch, ConfirmOptions, IdNamesPatch, NoticeError, Options,
    OptionsPatch,
};
use notice_harness::Harness;
use pretty_assertions::assert_eq;
use proptest::prelude::*;

#[test]
fn class_override_keeps_other_roles() {
    let mut h = Harness::new();
    let before = h.notifier_mut().alert(AlertOptions::new("before").stay(true)).unwrap();

    h.notifier_mut()
        .set_options(OptionsPatch {
            classes: ClassNamesPatch {
                background_success: Some("toast-green".into()),
                ..ClassNamesPatch::default()
            },
            ..OptionsPatch::default()
        })
        .unwrap();

    let options = h.notifier().options();
    assert_eq!(options.classes.background_success, "toast-green");
    assert_eq!(options.classes.background_error, "ui-notice-error");
    assert_eq!(options.alert_time, 3.0);

    let after = h
        .notifier_mut()
        .alert(AlertOptions::new("after").severity(notice_core::Severity::Success))
        .unwrap();
    assert!(h.doc().element(after.as_str()).unwrap().has_class("toast-green"));
    // Existing elements keep their classes.
    assert!(h.doc().element(before.as_str()).unwrap().has_class("ui-notice-info"));
}

#[test]
fn button_class_override_applies_to_every_button() {
    let mut h = Harness::new();
    h.notifier_mut()
        .set_options(OptionsPatch {
            classes: ClassNamesPatch {
                button: Some("x".into()),
                ..ClassNamesPatch::default()
            },
            ..OptionsPatch::default()
        })
        .unwrap();
    let id = h.notifier_mut().confirm(ConfirmOptions::new("?"), None, None).unwrap();
    let root = h.doc().element(id.as_str()).unwrap();
    assert!(root.children[1].has_class("x"));
    assert!(root.children[2].has_class("x"));
    assert!(root.children[1].has_class("ui-notice-element-half"));
    assert!(root.children[0].has_class("ui-notice-textbox"));
    assert_eq!(h.doc().count_with_class("ui-notice-button"), 0);
}

#[test]
fn alert_time_override_changes_default_dismissal() {
    let mut h = Harness::new();
    h.notifier_mut()
        .set_options(OptionsPatch {
            alert_time: Some(5.0),
            ..OptionsPatch::default()
        })
        .unwrap();
    let id = h.notifier_mut().alert(AlertOptions::new("x")).unwrap();
    h.advance(Duration::from_millis(4999));
    assert!(h.notifier().is_showing(&id));
    h.advance(Duration::from_millis(1));
    assert!(!h.notifier().is_showing(&id));
}

#[test]
fn transition_settings_drive_timing_and_style() {
    let mut h = Harness::new();
    h.notifier_mut()
        .set_options(OptionsPatch {
            transition_duration: Some(0.5),
            transition_curve: Some("linear".into()),
            transition_selector: Some("opacity".into()),
            ..OptionsPatch::default()
        })
        .unwrap();
    let id = h.notifier_mut().alert(AlertOptions::new("x").stay(true)).unwrap();
    h.tick();
    assert_eq!(h.doc().style(id.as_str(), "transition"), Some("opacity 0.5s linear"));

    h.notifier_mut().hide_alerts(None);
    h.advance(Duration::from_millis(499));
    assert!(h.doc().contains_id(id.as_str()));
    h.advance(Duration::from_millis(1));
    assert!(!h.doc().contains_id(id.as_str()));
}

#[test]
fn overlay_id_and_opacity_overrides() {
    let mut h = Harness::new();
    h.notifier_mut()
        .set_options(OptionsPatch {
            overlay_opacity: Some("0.4".into()),
            ids: IdNamesPatch {
                overlay: Some("backdrop".into()),
            },
            ..OptionsPatch::default()
        })
        .unwrap();
    h.notifier_mut().confirm(ConfirmOptions::new("?"), None, None).unwrap();
    h.tick();
    assert_eq!(h.doc().style("backdrop", "opacity"), Some("0.4"));
    assert!(!h.doc().contains_id("ui-notice-overlay"));
}

#[test]
fn overlay_id_change_while_visible_does_not_orphan() {
    let mut h = Harness::new();
    let id = h.notifier_mut().confirm(ConfirmOptions::new("?"), None, None).unwrap();
    h.notifier_mut()
        .set_options(OptionsPatch {
            ids: IdNamesPatch {
                overlay: Some("renamed".into()),
            },
            ..OptionsPatch::default()
        })
        .unwrap();
    h.click(notice_core::ClickAction::Cancel(id));
    h.settle();
    assert!(h.doc().is_empty());
}

#[test]
fn invalid_patch_is_rejected_and_state_kept() {
    let mut h = Harness::new();
    let bad = [
        OptionsPatch {
            overlay_opacity: Some("dark".into()),
            ..OptionsPatch::default()
        },
        OptionsPatch {
            transition_duration: Some(-1.0),
            ..OptionsPatch::default()
        },
        OptionsPatch {
            alert_time: Some(f64::INFINITY),
            ..OptionsPatch::default()
        },
        OptionsPatch {
            classes: ClassNamesPatch {
                button: Some("two words".into()),
                ..ClassNamesPatch::default()
            },
            ..OptionsPatch::default()
        },
    ];
    for patch in bad {
        let err = h.notifier_mut().set_options(patch).unwrap_err();
        assert!(matches!(err, NoticeError::InvalidOption { .. }), "{err}");
        assert_eq!(h.notifier().options(), &Options::default());
    }
}

#[test]
fn json_patch_uses_camel_case_names() {
    let patch: OptionsPatch = serde_json::from_str(
        r#"{
            "alertTime": 2,
            "overlayClickDismiss": false,
            "classes": { "backgroundWarning": "amber", "textboxInner": "inner" },
            "positions": { "force": "top" }
        }"#,
    )
    .unwrap();
    let mut h = Harness::new();
    h.notifier_mut().set_options(patch).unwrap();

    let options = h.notifier().options();
    assert_eq!(options.alert_time, 2.0);
    assert!(!options.overlay_click_dismiss);
    assert_eq!(options.classes.background_warning, "amber");
    assert_eq!(options.classes.textbox_inner, "inner");
    assert_eq!(options.classes.button, "ui-notice-button");
    let positions = options.positions.as_ref().unwrap();
    assert_eq!(positions.get("force").map(String::as_str), Some("top"));
}

fn class_token() -> impl Strategy<Value = Option<String>> {
    prop::option::of("[a-z][a-z0-9-]{0,8}")
}

proptest! {
    #[test]
    fn valid_class_patches_always_apply(
        success in class_token(),
        alert in class_token(),
        button in class_token(),
    ) {
        let mut h = Harness::new();
        let patch = OptionsPatch {
            classes: ClassNamesPatch {
                background_success: success.clone(),
                alert: alert.clone(),
                button: button.clone(),
                ..ClassNamesPatch::default()
            },
            ..OptionsPatch::default()
        };
        prop_assert!(h.notifier_mut().set_options(patch).is_ok());
        let classes = &h.notifier().options().classes;
        prop_assert_eq!(
            &classes.background_success,
            success.as_deref().unwrap_or("ui-notice-success")
        );
        prop_assert_eq!(&classes.alert, alert.as_deref().unwrap_or("ui-notice-alert"));
        prop_assert_eq!(&classes.button, button.as_deref().unwrap_or("ui-notice-button"));
        prop_assert_eq!(&classes.background_error, "ui-notice-error");
    }
}
