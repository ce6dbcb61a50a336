#![forbid(unsafe_code)]

//! Seams between the notifier and whatever actually shows pixels.
//!
//! A host supplies a [`Document`] (element insertion, lookup, removal, inline
//! style) and a [`Scheduler`] (deferred wake-ups). The notifier owns all
//! bookkeeping; hosts only report back three kinds of input:
//!
//! - a timer elapsed: [`Notifier::fire`](crate::Notifier::fire)
//! - an element was clicked: [`Notifier::click`](crate::Notifier::click)
//! - a key was pressed: [`Notifier::key`](crate::Notifier::key)

use std::time::Duration;

use crate::element::Element;

/// The subset of a document object model the notifier needs.
pub trait Document {
    /// Append `element` as the last child of the body.
    fn append(&mut self, element: Element);

    /// Whether an element with `id` is currently attached.
    fn contains(&self, id: &str) -> bool;

    /// Detach the element with `id`. Returns `false` when nothing was attached.
    fn detach(&mut self, id: &str) -> bool;

    /// Set an inline style property. Returns `false` when `id` is absent.
    fn set_style(&mut self, id: &str, property: &str, value: &str) -> bool;

    /// Ids of attached elements carrying `class`, at any depth, in document
    /// order (`getElementsByClassName`). Elements without an id are skipped.
    fn ids_with_class(&self, class: &str) -> Vec<String>;
}

/// Handle for one scheduled wake-up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(u64);

impl TimerId {
    pub(crate) const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Raw value, for hosts that key their own tables by it.
    #[inline]
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

/// Deferred execution facility.
///
/// Implementations call [`Notifier::fire`](crate::Notifier::fire) with the
/// timer id once `delay` has elapsed. Firing a cancelled timer is harmless:
/// the notifier forgets the task on cancel and ignores unknown ids.
pub trait Scheduler {
    /// Request a wake-up for `timer` after `delay`. A zero delay means
    /// "next tick", after the current call stack unwinds.
    fn schedule(&mut self, timer: TimerId, delay: Duration);

    /// Best-effort cancellation.
    fn cancel(&mut self, _timer: TimerId) {}
}

/// Keys the notifier reacts to when keyboard dismissal is enabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Enter,
    Escape,
}

impl Key {
    /// Map a DOM `KeyboardEvent.key` value.
    #[must_use]
    pub fn from_dom_key(key: &str) -> Option<Self> {
        match key {
            "Enter" => Some(Self::Enter),
            "Escape" | "Esc" => Some(Self::Escape),
            _ => None,
        }
    }

    /// Map a legacy `KeyboardEvent.keyCode` value.
    #[must_use]
    pub fn from_key_code(code: u32) -> Option<Self> {
        match code {
            13 => Some(Self::Enter),
            27 => Some(Self::Escape),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_mapping() {
        assert_eq!(Key::from_dom_key("Enter"), Some(Key::Enter));
        assert_eq!(Key::from_dom_key("Esc"), Some(Key::Escape));
        assert_eq!(Key::from_dom_key("a"), None);
        assert_eq!(Key::from_key_code(13), Some(Key::Enter));
        assert_eq!(Key::from_key_code(27), Some(Key::Escape));
        assert_eq!(Key::from_key_code(32), None);
    }
}
