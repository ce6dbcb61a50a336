#![forbid(unsafe_code)]

//! Random operation sequences against the structural invariants.

use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;

use notice_core::{AlertOptions, ClickAction, ConfirmOptions, ForceOptions, Key, Options};
use notice_harness::Harness;
use proptest::prelude::*;

const OVERLAY: &str = "ui-notice-overlay";

#[derive(Debug, Clone)]
enum Op {
    Alert { time: f64, stay: bool },
    Force,
    Confirm,
    HideAlerts,
    /// Click the n-th currently clickable target.
    Click(usize),
    ClickOverlay,
    Key(bool),
    Advance(u64),
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        (prop_oneof![Just(0.0), -1.0f64..6.0], any::<bool>())
            .prop_map(|(time, stay)| Op::Alert { time, stay }),
        Just(Op::Force),
        Just(Op::Confirm),
        Just(Op::HideAlerts),
        (0usize..8).prop_map(Op::Click),
        Just(Op::ClickOverlay),
        any::<bool>().prop_map(Op::Key),
        (0u64..4000).prop_map(Op::Advance),
    ]
}

fn clickable(h: &Harness) -> Vec<ClickAction> {
    h.doc()
        .body()
        .iter()
        .flat_map(|e| e.click_actions())
        .collect()
}

fn apply(h: &mut Harness, op: &Op, calls: &Rc<Cell<u32>>) {
    let bump = || {
        let calls = Rc::clone(calls);
        Box::new(move || calls.set(calls.get() + 1)) as Box<dyn FnOnce()>
    };
    match *op {
        Op::Alert { time, stay } => {
            h.notifier_mut()
                .alert(AlertOptions::new("a").time(time).stay(stay))
                .unwrap();
        }
        Op::Force => {
            h.notifier_mut().force(ForceOptions::new("f"), Some(bump())).unwrap();
        }
        Op::Confirm => {
            h.notifier_mut()
                .confirm(ConfirmOptions::new("c"), Some(bump()), Some(bump()))
                .unwrap();
        }
        Op::HideAlerts => {
            h.notifier_mut().hide_alerts(None);
        }
        Op::Click(n) => {
            let targets = clickable(h);
            if !targets.is_empty() {
                h.click(targets[n % targets.len()].clone());
            }
        }
        Op::ClickOverlay => h.click(ClickAction::Overlay),
        Op::Key(enter) => h.key(if enter { Key::Enter } else { Key::Escape }),
        Op::Advance(ms) => {
            h.advance(Duration::from_millis(ms));
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn at_most_one_overlay_node(
        ops in prop::collection::vec(op(), 1..40),
        keyboard in any::<bool>(),
    ) {
        let mut h = Harness::with_options(Options {
            keyboard_dismiss: keyboard,
            ..Options::default()
        });
        let calls = Rc::new(Cell::new(0));
        for op in &ops {
            apply(&mut h, op, &calls);
            prop_assert!(h.doc().count_with_id(OVERLAY) <= 1);
            if h.notifier().active_modal().is_some() {
                prop_assert!(h.notifier().has_overlay());
            }
        }
    }

    #[test]
    fn settles_to_a_consistent_state(ops in prop::collection::vec(op(), 1..40)) {
        let mut h = Harness::new();
        let calls = Rc::new(Cell::new(0));
        let mut modals = 0u32;
        for op in &ops {
            if matches!(op, Op::Force | Op::Confirm) {
                modals += 1;
            }
            apply(&mut h, op, &calls);
        }
        h.settle();

        // Each modal runs at most one callback.
        prop_assert!(calls.get() <= modals);
        prop_assert!(h.doc().count_with_class("ui-notice-alert") <= 1);
        prop_assert_eq!(h.notifier().pending_timers(), 0);
        prop_assert_eq!(h.notifier().scheduler().pending(), 0);

        let overlay_attached = h.doc().contains_id(OVERLAY);
        prop_assert_eq!(overlay_attached, h.notifier().has_overlay());
        prop_assert_eq!(overlay_attached, h.notifier().active_modal().is_some());
        if overlay_attached {
            prop_assert_eq!(h.doc().style(OVERLAY, "opacity"), Some("0.75"));
        }
    }
}
