#![forbid(unsafe_code)]

//! Fade lifecycle: two-phase insertion and delayed detachment.
//!
//! Insertion appends the element with no transition, then enables the
//! transition on the next tick so the initial style does not animate.
//! Removal waits one transition delay (letting any fade-out finish) and then
//! detaches, provided the element still belongs to the same dialog instance.
//!
//! # Failure Modes
//!
//! | Situation | Behavior |
//! |-----------|----------|
//! | Remove an id that is not attached | No-op, record forgotten |
//! | Remove a dialog that is already fading | No-op |
//! | Remove the overlay when none exists | No-op |
//! | Timer fires for a replaced dialog | Ignored (serial mismatch) |

use std::time::Duration;

use crate::dialog::DialogKind;
use crate::element::Element;
use crate::host::{Document, Scheduler, TimerId};
use crate::id::DialogId;
use crate::notifier::{Actions, DialogRecord, Notifier, Task};
use crate::overlay::{OverlayRecord, overlay_element};

impl<D: Document, S: Scheduler> Notifier<D, S> {
    pub(crate) fn schedule(&mut self, delay: Duration, task: Task) -> TimerId {
        self.next_timer += 1;
        let timer = TimerId::new(self.next_timer);
        self.tasks.insert(timer, task);
        self.scheduler.schedule(timer, delay);
        timer
    }

    pub(crate) fn cancel(&mut self, timer: TimerId) {
        if self.tasks.remove(&timer).is_some() {
            self.scheduler.cancel(timer);
        }
    }

    fn next_serial(&mut self) -> u64 {
        self.next_serial += 1;
        self.next_serial
    }

    /// Append a dialog and schedule its transition enable. Returns the
    /// instance serial.
    pub(crate) fn insert(
        &mut self,
        id: &DialogId,
        element: Element,
        kind: DialogKind,
        actions: Actions,
    ) -> u64 {
        let serial = self.next_serial();
        let element = element.class(&self.options.classes.container);
        self.document.append(element);

        let enable = self.schedule(
            Duration::ZERO,
            Task::EnableTransition {
                id: id.clone(),
                serial,
            },
        );
        if self.options.keyboard_dismiss {
            self.key_targets.push(id.clone());
        }
        self.dialogs.insert(
            id.clone(),
            DialogRecord {
                kind,
                serial,
                actions,
                enable_transition: Some(enable),
                auto_dismiss: None,
                detach: None,
            },
        );
        serial
    }

    /// Start removing a dialog. Returns `false` when there was nothing to do.
    pub(crate) fn remove(&mut self, id: &DialogId) -> bool {
        if !self.document.contains(id.as_str()) {
            tracing::debug!(%id, "remove: not in document");
            self.forget(id);
            return false;
        }

        let serial = match self.dialogs.get_mut(id) {
            Some(record) if record.detach.is_some() => return false,
            Some(record) => {
                record.actions = Actions::None;
                if let Some(auto) = record.auto_dismiss.take() {
                    self.tasks.remove(&auto);
                    self.scheduler.cancel(auto);
                }
                Some(record.serial)
            }
            None => None,
        };
        self.release(id);

        let delay = self.options.transition_delay();
        let timer = self.schedule(
            delay,
            Task::Detach {
                id: id.clone(),
                serial,
            },
        );
        if let Some(record) = self.dialogs.get_mut(id) {
            record.detach = Some(timer);
        }
        true
    }

    /// Drop key routing and modal ownership for `id`.
    fn release(&mut self, id: &DialogId) {
        self.key_targets.retain(|k| k != id);
        if self.active_modal.as_ref() == Some(id) {
            self.active_modal = None;
        }
    }

    /// Drop all bookkeeping for `id` and cancel its timers.
    fn forget(&mut self, id: &DialogId) {
        if let Some(record) = self.dialogs.remove(id) {
            for timer in record.timers() {
                self.cancel(timer);
            }
        }
        self.release(id);
    }

    pub(crate) fn finish_detach(&mut self, id: &DialogId, serial: Option<u64>) {
        let tracked = self.dialogs.get(id).map(|record| record.serial);
        match (serial, tracked) {
            (Some(serial), Some(current)) if serial == current => self.forget(id),
            (Some(_), _) => {
                tracing::trace!(%id, "detach skipped: dialog replaced");
                return;
            }
            (None, Some(_)) => {
                tracing::trace!(%id, "detach skipped: id now tracked");
                return;
            }
            (None, None) => {}
        }
        if self.document.detach(id.as_str()) {
            tracing::debug!(%id, "dialog detached");
        }
    }

    /// Attach a fresh overlay, detaching any previous one immediately.
    pub(crate) fn add_overlay(&mut self, owner: Option<DialogId>) {
        if let Some(previous) = self.overlay.take() {
            for timer in previous.timers() {
                self.cancel(timer);
            }
            self.document.detach(&previous.id);
            tracing::debug!(id = %previous.id, "previous overlay detached");
        }

        // Without click dismissal the overlay has no owner to dismiss.
        let owner = owner.filter(|_| self.options.overlay_click_dismiss);
        let serial = self.next_serial();
        let element = overlay_element(&self.options, owner.as_ref());
        let id = self.options.ids.overlay.clone();
        self.document.append(element);
        let fade_in = self.schedule(Duration::ZERO, Task::FadeInOverlay { serial });
        self.overlay = Some(OverlayRecord {
            id,
            serial,
            owner,
            fade_in: Some(fade_in),
            detach: None,
        });
    }

    /// Fade the overlay out and detach it after the transition delay.
    pub(crate) fn remove_overlay(&mut self) {
        let Some(overlay) = self.overlay.as_mut() else {
            tracing::debug!("remove overlay: none present");
            return;
        };
        if overlay.is_fading_out() {
            return;
        }
        if !self.document.contains(&overlay.id) {
            tracing::debug!(id = %overlay.id, "remove overlay: not in document");
            if let Some(stale) = self.overlay.take() {
                for timer in stale.timers() {
                    self.cancel(timer);
                }
            }
            return;
        }

        let id = overlay.id.clone();
        let serial = overlay.serial;
        if let Some(fade_in) = overlay.fade_in.take() {
            self.cancel(fade_in);
        }
        self.document.set_style(&id, "opacity", "0");
        let delay = self.options.transition_delay();
        let timer = self.schedule(delay, Task::DetachOverlay { serial });
        if let Some(overlay) = self.overlay.as_mut() {
            overlay.detach = Some(timer);
        }
    }

    pub(crate) fn fade_in_overlay(&mut self, serial: u64) {
        let Some(overlay) = self.overlay.as_mut() else {
            return;
        };
        if overlay.serial != serial {
            return;
        }
        overlay.fade_in = None;
        let id = overlay.id.clone();
        let transition = self.options.transition();
        self.document.set_style(&id, "transition", &transition);
        self.document
            .set_style(&id, "opacity", &self.options.overlay_opacity);
    }

    pub(crate) fn finish_overlay_detach(&mut self, serial: u64) {
        if self.overlay.as_ref().is_some_and(|o| o.serial == serial)
            && let Some(overlay) = self.overlay.take()
        {
            self.document.detach(&overlay.id);
            tracing::debug!(id = %overlay.id, "overlay detached");
        }
    }
}
