#![forbid(unsafe_code)]

//! Late-bound handle from browser callbacks back to the notifier.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use notice_core::Callback;

use crate::WebNotifier;

/// Shared by the document, the scheduler and the key listener. Bound once
/// the notifier has been allocated; until then (and after it is dropped)
/// events are discarded.
#[derive(Clone, Default)]
pub(crate) struct Link(Rc<RefCell<Weak<RefCell<WebNotifier>>>>);

impl Link {
    pub(crate) fn bind(&self, notifier: &Rc<RefCell<WebNotifier>>) {
        *self.0.borrow_mut() = Rc::downgrade(notifier);
    }

    /// Run `event` against the notifier, then run whatever callback it
    /// yields after the borrow is released.
    pub(crate) fn dispatch(&self, event: impl FnOnce(&mut WebNotifier) -> Option<Callback>) {
        let Some(notifier) = self.0.borrow().upgrade() else {
            tracing::debug!("event after notifier was dropped");
            return;
        };
        let callback = match notifier.try_borrow_mut() {
            Ok(mut guard) => event(&mut guard),
            Err(_) => {
                tracing::warn!("notifier busy, event dropped");
                return;
            }
        };
        if let Some(callback) = callback {
            callback();
        }
    }
}
