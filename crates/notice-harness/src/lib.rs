#![forbid(unsafe_code)]

//! Deterministic host for exercising a [`Notifier`] without a browser.
//!
//! - [`MemoryDocument`]: element trees kept in a `Vec`, with `getElementById`
//!   and `getElementsByClassName` semantics
//! - [`ManualScheduler`]: a virtual clock; nothing fires until the test
//!   advances time
//! - [`Harness`]: owns a notifier over both and runs due timers and returned
//!   callbacks in order
//!
//! # Example
//!
//! ```
//! use std::time::Duration;
//! use notice_core::{AlertOptions, Severity};
//! use notice_harness::Harness;
//!
//! let mut h = Harness::new();
//! let id = h.notifier_mut().alert(AlertOptions::new("Saved").severity(Severity::Success)).unwrap();
//! assert!(h.doc().contains_id(id.as_str()));
//!
//! // Default alert time is 3s, then a 0.3s fade.
//! h.advance(Duration::from_millis(3300));
//! assert!(!h.doc().contains_id(id.as_str()));
//! ```

mod document;
mod scheduler;

use std::time::Duration;

use notice_core::{ClickAction, Key, Notifier, Options, TimerId};

pub use document::MemoryDocument;
pub use scheduler::ManualScheduler;

/// Notifier type driven by the harness.
pub type MemoryNotifier = Notifier<MemoryDocument, ManualScheduler>;

/// Upper bound on timers run by a single [`Harness::settle`].
const SETTLE_LIMIT: usize = 10_000;

/// Test driver: a notifier plus a virtual clock.
#[derive(Debug)]
pub struct Harness {
    notifier: MemoryNotifier,
}

impl Default for Harness {
    fn default() -> Self {
        Self::new()
    }
}

impl Harness {
    /// Harness with default options.
    #[must_use]
    pub fn new() -> Self {
        Self::with_options(Options::default())
    }

    /// Harness with the given options.
    ///
    /// # Panics
    ///
    /// If `options` fail validation.
    #[must_use]
    pub fn with_options(options: Options) -> Self {
        let notifier = Notifier::new(MemoryDocument::new(), ManualScheduler::new(), options)
            .expect("harness options must be valid");
        Self { notifier }
    }

    pub fn notifier(&self) -> &MemoryNotifier {
        &self.notifier
    }

    pub fn notifier_mut(&mut self) -> &mut MemoryNotifier {
        &mut self.notifier
    }

    pub fn doc(&self) -> &MemoryDocument {
        self.notifier.document()
    }

    pub fn doc_mut(&mut self) -> &mut MemoryDocument {
        self.notifier.document_mut()
    }

    /// Current virtual time.
    #[must_use]
    pub fn now(&self) -> Duration {
        self.notifier.scheduler().now()
    }

    /// Run everything due now (zero-delay ticks included).
    pub fn tick(&mut self) -> usize {
        self.advance(Duration::ZERO)
    }

    /// Move the clock forward by `by`, firing due timers in order.
    ///
    /// Timers scheduled by fired tasks or callbacks also run if they fall due
    /// inside the window. Returns the number of timers fired.
    pub fn advance(&mut self, by: Duration) -> usize {
        let target = self.now() + by;
        let mut fired = 0;
        while let Some(timer) = self.notifier.scheduler_mut().pop_due(target) {
            self.fire(timer);
            fired += 1;
        }
        self.notifier.scheduler_mut().set_now(target);
        fired
    }

    /// Run timers until none remain. Returns the number fired.
    ///
    /// # Panics
    ///
    /// If timers keep rescheduling past an internal limit.
    pub fn settle(&mut self) -> usize {
        let mut fired = 0;
        while let Some(timer) = self.notifier.scheduler_mut().pop_next() {
            self.fire(timer);
            fired += 1;
            assert!(fired < SETTLE_LIMIT, "timers did not settle");
        }
        fired
    }

    /// Deliver a click and run any callback it yields.
    pub fn click(&mut self, action: ClickAction) {
        if let Some(callback) = self.notifier.click(action) {
            callback();
        }
    }

    /// Deliver a key press and run any callback it yields.
    pub fn key(&mut self, key: Key) {
        if let Some(callback) = self.notifier.key(key) {
            callback();
        }
    }

    fn fire(&mut self, timer: TimerId) {
        tracing::trace!(timer = timer.get(), now = ?self.now(), "harness firing timer");
        if let Some(callback) = self.notifier.fire(timer) {
            callback();
        }
    }
}
