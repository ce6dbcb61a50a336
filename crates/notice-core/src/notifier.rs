#![forbid(unsafe_code)]

//! The notification engine.
//!
//! A [`Notifier`] owns its configuration, the host [`Document`] and
//! [`Scheduler`], and every piece of bookkeeping about visible dialogs.
//!
//! # Invariants
//!
//! - At most one alert stays visible: `alert` hides existing alerts first.
//! - At most one modal (force or confirm) is active, and at most one
//!   overlay node is attached. Opening a modal while another is active
//!   dismisses the previous one without running its callbacks.
//! - A dialog's callbacks are taken on the first button press; later
//!   presses during the fade-out do nothing, so submit and cancel are
//!   mutually exclusive.
//! - Every timer task is keyed by a [`TimerId`] and re-checked against the
//!   owning dialog's serial when it fires; cancelled or stale timers are
//!   ignored.
//!
//! # Re-entrancy
//!
//! [`click`](Notifier::click), [`fire`](Notifier::fire) and
//! [`key`](Notifier::key) never invoke user callbacks themselves. They
//! return the callback for the host to run once it has released its borrow
//! of the notifier, so callbacks are free to open new dialogs.

use std::fmt;

use ahash::AHashMap;
use notice_i18n::{LabelCatalog, LabelKey};

use crate::config::{Options, OptionsPatch};
use crate::dialog::{
    AlertOptions, Callback, ConfirmOptions, DialogKind, ForceOptions, alert_delay,
    alert_element, confirm_element, force_element,
};
use crate::element::{ClickAction, Content};
use crate::error::NoticeError;
use crate::host::{Document, Key, Scheduler, TimerId};
use crate::id::DialogId;
use crate::overlay::OverlayRecord;
use crate::severity::Severity;

/// Callbacks still owed to a dialog.
pub(crate) enum Actions {
    None,
    Force(Option<Callback>),
    Confirm {
        submit: Option<Callback>,
        cancel: Option<Callback>,
    },
}

/// Which button resolved a modal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Choice {
    Acknowledge,
    Submit,
    Cancel,
}

/// Bookkeeping for one dialog in the document.
pub(crate) struct DialogRecord {
    pub(crate) kind: DialogKind,
    pub(crate) serial: u64,
    pub(crate) actions: Actions,
    pub(crate) enable_transition: Option<TimerId>,
    pub(crate) auto_dismiss: Option<TimerId>,
    /// Set once removal has started.
    pub(crate) detach: Option<TimerId>,
}

impl DialogRecord {
    pub(crate) fn timers(&self) -> impl Iterator<Item = TimerId> {
        self.enable_transition
            .into_iter()
            .chain(self.auto_dismiss)
            .chain(self.detach)
    }
}

/// Deferred work, keyed by [`TimerId`].
pub(crate) enum Task {
    EnableTransition { id: DialogId, serial: u64 },
    AutoDismiss { id: DialogId, serial: u64 },
    /// `serial` is `None` for alert-class elements the notifier did not create.
    Detach { id: DialogId, serial: Option<u64> },
    FadeInOverlay { serial: u64 },
    DetachOverlay { serial: u64 },
    Notify(Callback),
}

impl fmt::Debug for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EnableTransition { id, serial } => {
                write!(f, "EnableTransition({id}, #{serial})")
            }
            Self::AutoDismiss { id, serial } => write!(f, "AutoDismiss({id}, #{serial})"),
            Self::Detach { id, serial } => write!(f, "Detach({id}, {serial:?})"),
            Self::FadeInOverlay { serial } => write!(f, "FadeInOverlay(#{serial})"),
            Self::DetachOverlay { serial } => write!(f, "DetachOverlay(#{serial})"),
            Self::Notify(_) => f.write_str("Notify"),
        }
    }
}

/// Shows alerts, force dialogs and confirm dialogs in a host document.
///
/// # Example
///
/// ```ignore
/// let mut notifier = Notifier::new(document, scheduler, Options::default())?;
/// notifier.alert(AlertOptions::new("Saved").severity(Severity::Success))?;
///
/// // Host glue:
/// if let Some(callback) = notifier.fire(timer) { callback() }
/// if let Some(callback) = notifier.click(action) { callback() }
/// ```
pub struct Notifier<D, S> {
    pub(crate) document: D,
    pub(crate) scheduler: S,
    pub(crate) options: Options,
    pub(crate) labels: LabelCatalog,
    pub(crate) dialogs: AHashMap<DialogId, DialogRecord>,
    pub(crate) overlay: Option<OverlayRecord>,
    pub(crate) tasks: AHashMap<TimerId, Task>,
    /// Modal currently owning the overlay.
    pub(crate) active_modal: Option<DialogId>,
    /// Dialogs listening for keys, most recent last.
    pub(crate) key_targets: Vec<DialogId>,
    pub(crate) next_timer: u64,
    pub(crate) next_serial: u64,
}

impl<D, S> fmt::Debug for Notifier<D, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Notifier")
            .field("options", &self.options)
            .field("dialogs", &self.dialogs.len())
            .field("overlay", &self.overlay)
            .field("tasks", &self.tasks.len())
            .field("active_modal", &self.active_modal)
            .finish()
    }
}

impl<D: Document, S: Scheduler> Notifier<D, S> {
    /// Create a notifier over a host document and scheduler.
    ///
    /// # Errors
    ///
    /// [`NoticeError::InvalidOption`] if `options` fails validation.
    pub fn new(document: D, scheduler: S, options: Options) -> Result<Self, NoticeError> {
        options.validate()?;
        Ok(Self {
            document,
            scheduler,
            options,
            labels: LabelCatalog::builtin(),
            dialogs: AHashMap::new(),
            overlay: None,
            tasks: AHashMap::new(),
            active_modal: None,
            key_targets: Vec::new(),
            next_timer: 0,
            next_serial: 0,
        })
    }

    /// Replace the label catalog used for default button text.
    #[must_use]
    pub fn with_labels(mut self, labels: LabelCatalog) -> Self {
        self.labels = labels;
        self
    }

    // --- Configuration ---

    /// Current configuration.
    #[must_use]
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Merge `patch` into the configuration.
    ///
    /// Affects dialogs created afterwards; elements already in the document
    /// keep their classes.
    ///
    /// # Errors
    ///
    /// [`NoticeError::InvalidOption`]; the configuration is left unchanged.
    pub fn set_options(&mut self, patch: OptionsPatch) -> Result<(), NoticeError> {
        match self.options.merged(patch) {
            Ok(next) => {
                self.options = next;
                tracing::debug!("options updated");
                Ok(())
            }
            Err(err) => {
                tracing::warn!(%err, "rejected options update");
                Err(err)
            }
        }
    }

    // --- Dialogs ---

    /// Show a toast. Hides any visible alert first.
    ///
    /// # Errors
    ///
    /// [`NoticeError::MissingRequiredField`] when `text` is absent.
    pub fn alert(&mut self, options: AlertOptions) -> Result<DialogId, NoticeError> {
        let AlertOptions {
            severity,
            text,
            time,
            stay,
        } = options;
        let text = text.ok_or(NoticeError::MissingRequiredField("text"))?;
        let severity = severity.unwrap_or(Severity::Info);

        self.hide_alerts(None);

        let id = DialogId::generate();
        let element = alert_element(&self.options, &id, severity, text);
        let serial = self.insert(&id, element, DialogKind::Alert, Actions::None);

        if let Some(delay) = alert_delay(time, stay, self.options.alert_time) {
            let timer = self.schedule(
                delay,
                Task::AutoDismiss {
                    id: id.clone(),
                    serial,
                },
            );
            if let Some(record) = self.dialogs.get_mut(&id) {
                record.auto_dismiss = Some(timer);
            }
        }

        tracing::debug!(%id, %severity, "alert shown");
        Ok(id)
    }

    /// Show a single-button modal.
    ///
    /// `callback_arg` runs on click when `options.callback` is absent.
    ///
    /// # Errors
    ///
    /// [`NoticeError::MissingRequiredField`] when `text` is absent.
    pub fn force(
        &mut self,
        options: ForceOptions,
        callback_arg: Option<Callback>,
    ) -> Result<DialogId, NoticeError> {
        let ForceOptions {
            severity,
            text,
            button_text,
            callback,
        } = options;
        let text = text.ok_or(NoticeError::MissingRequiredField("text"))?;
        let severity = severity.unwrap_or(Severity::Neutral);
        let label = button_text.unwrap_or_else(|| self.default_label(LabelKey::Ok));

        self.hide_alerts(None);
        self.close_active_modal();

        let id = DialogId::generate();
        let element = force_element(&self.options, &id, severity, text, label);
        self.insert(
            &id,
            element,
            DialogKind::Force,
            Actions::Force(callback.or(callback_arg)),
        );
        self.add_overlay(None);
        self.active_modal = Some(id.clone());

        tracing::debug!(%id, %severity, "force dialog shown");
        Ok(id)
    }

    /// Show a submit/cancel modal.
    ///
    /// Positional callbacks run when the matching option callback is absent.
    /// Clicking the overlay (if enabled) dismisses without running either.
    ///
    /// # Errors
    ///
    /// [`NoticeError::MissingRequiredField`] when `text` is absent.
    pub fn confirm(
        &mut self,
        options: ConfirmOptions,
        submit_callback_arg: Option<Callback>,
        cancel_callback_arg: Option<Callback>,
    ) -> Result<DialogId, NoticeError> {
        let ConfirmOptions {
            text,
            submit_text,
            cancel_text,
            submit_callback,
            cancel_callback,
        } = options;
        let text = text.ok_or(NoticeError::MissingRequiredField("text"))?;
        let submit = submit_text.unwrap_or_else(|| self.default_label(LabelKey::Submit));
        let cancel = cancel_text.unwrap_or_else(|| self.default_label(LabelKey::Cancel));

        self.hide_alerts(None);
        self.close_active_modal();

        let id = DialogId::generate();
        let element = confirm_element(&self.options, &id, text, submit, cancel);
        self.insert(
            &id,
            element,
            DialogKind::Confirm,
            Actions::Confirm {
                submit: submit_callback.or(submit_callback_arg),
                cancel: cancel_callback.or(cancel_callback_arg),
            },
        );
        self.add_overlay(Some(id.clone()));
        self.active_modal = Some(id.clone());

        tracing::debug!(%id, "confirm dialog shown");
        Ok(id)
    }

    /// Fade out every alert-class element in the document.
    ///
    /// When at least one was found and `callback` is given, the callback is
    /// delivered through [`fire`](Self::fire) once, one transition delay
    /// later. Returns the number of alerts found.
    pub fn hide_alerts(&mut self, callback: Option<Callback>) -> usize {
        let ids = self.document.ids_with_class(&self.options.classes.alert);
        if ids.is_empty() {
            return 0;
        }
        for id in &ids {
            self.remove(&DialogId::from(id.as_str()));
        }
        if let Some(callback) = callback {
            let delay = self.options.transition_delay();
            self.schedule(delay, Task::Notify(callback));
        }
        tracing::trace!(count = ids.len(), "alerts hidden");
        ids.len()
    }

    // --- Host input ---

    /// Handle a click routed from the host.
    #[must_use = "the returned callback must be run by the host"]
    pub fn click(&mut self, action: ClickAction) -> Option<Callback> {
        match action {
            ClickAction::Dismiss(id) => {
                self.remove(&id);
                None
            }
            ClickAction::Acknowledge(id) => self.resolve(&id, Choice::Acknowledge),
            ClickAction::Submit(id) => self.resolve(&id, Choice::Submit),
            ClickAction::Cancel(id) => self.resolve(&id, Choice::Cancel),
            ClickAction::Overlay => {
                let owner = self.overlay.as_ref().and_then(|o| o.owner.clone());
                if let Some(owner) = owner {
                    tracing::debug!(%owner, "overlay clicked");
                    self.remove(&owner);
                    self.remove_overlay();
                }
                None
            }
        }
    }

    /// Handle an elapsed timer.
    #[must_use = "the returned callback must be run by the host"]
    pub fn fire(&mut self, timer: TimerId) -> Option<Callback> {
        let Some(task) = self.tasks.remove(&timer) else {
            tracing::trace!(timer = timer.get(), "ignoring stale timer");
            return None;
        };
        tracing::trace!(timer = timer.get(), ?task, "timer fired");
        self.run(task)
    }

    /// Handle a key press. Ignored unless `keyboard_dismiss` is enabled.
    ///
    /// The most recently shown dialog owns the keys. Alerts: Enter or Escape
    /// hides alerts. Force: Enter presses the button. Confirm: Enter submits,
    /// Escape cancels.
    #[must_use = "the returned callback must be run by the host"]
    pub fn key(&mut self, key: Key) -> Option<Callback> {
        if !self.options.keyboard_dismiss {
            return None;
        }
        let id = self.key_targets.last()?.clone();
        let kind = self.dialogs.get(&id)?.kind;
        match (kind, key) {
            (DialogKind::Alert, _) => {
                self.hide_alerts(None);
                None
            }
            (DialogKind::Force, Key::Enter) => self.click(ClickAction::Acknowledge(id)),
            (DialogKind::Force, Key::Escape) => None,
            (DialogKind::Confirm, Key::Enter) => self.click(ClickAction::Submit(id)),
            (DialogKind::Confirm, Key::Escape) => self.click(ClickAction::Cancel(id)),
        }
    }

    // --- Introspection ---

    /// Whether `id` is attached and not fading out.
    #[must_use]
    pub fn is_showing(&self, id: &DialogId) -> bool {
        self.dialogs.get(id).is_some_and(|r| r.detach.is_none())
            && self.document.contains(id.as_str())
    }

    /// Kind of a tracked dialog.
    #[must_use]
    pub fn dialog_kind(&self, id: &DialogId) -> Option<DialogKind> {
        self.dialogs.get(id).map(|r| r.kind)
    }

    /// Modal currently owning the overlay.
    #[must_use]
    pub fn active_modal(&self) -> Option<&DialogId> {
        self.active_modal.as_ref()
    }

    /// Whether an overlay record exists (possibly fading out).
    #[must_use]
    pub fn has_overlay(&self) -> bool {
        self.overlay.is_some()
    }

    /// Number of timer tasks not yet fired or cancelled.
    #[must_use]
    pub fn pending_timers(&self) -> usize {
        self.tasks.len()
    }

    pub fn document(&self) -> &D {
        &self.document
    }

    pub fn document_mut(&mut self) -> &mut D {
        &mut self.document
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }

    // --- Internals ---

    fn default_label(&self, key: LabelKey) -> Content {
        Content::text(self.labels.label(&self.options.locale, key))
    }

    /// Resolve a modal button press: dismiss dialog and overlay, hand back
    /// the callback owed for `choice`.
    fn resolve(&mut self, id: &DialogId, choice: Choice) -> Option<Callback> {
        let record = self.dialogs.get_mut(id)?;
        if record.detach.is_some() {
            tracing::trace!(%id, "dialog already dismissing");
            return None;
        }
        let actions = std::mem::replace(&mut record.actions, Actions::None);
        let callback = match (actions, choice) {
            (Actions::Force(callback), Choice::Acknowledge) => callback,
            (Actions::Confirm { submit, .. }, Choice::Submit) => submit,
            (Actions::Confirm { cancel, .. }, Choice::Cancel) => cancel,
            _ => None,
        };
        tracing::debug!(%id, ?choice, "modal resolved");
        self.remove(id);
        self.remove_overlay();
        callback
    }

    fn close_active_modal(&mut self) {
        if let Some(previous) = self.active_modal.take() {
            tracing::debug!(%previous, "replacing active modal");
            self.remove(&previous);
        }
    }

    fn run(&mut self, task: Task) -> Option<Callback> {
        match task {
            Task::EnableTransition { id, serial } => {
                if let Some(record) = self.dialogs.get_mut(&id)
                    && record.serial == serial
                {
                    record.enable_transition = None;
                    let transition = self.options.transition();
                    self.document
                        .set_style(id.as_str(), "transition", &transition);
                }
                None
            }
            Task::AutoDismiss { id, serial } => {
                if let Some(record) = self.dialogs.get_mut(&id)
                    && record.serial == serial
                {
                    record.auto_dismiss = None;
                    tracing::trace!(%id, "auto-dismiss");
                    self.remove(&id);
                }
                None
            }
            Task::Detach { id, serial } => {
                self.finish_detach(&id, serial);
                None
            }
            Task::FadeInOverlay { serial } => {
                self.fade_in_overlay(serial);
                None
            }
            Task::DetachOverlay { serial } => {
                self.finish_overlay_detach(serial);
                None
            }
            Task::Notify(callback) => Some(callback),
        }
    }
}
