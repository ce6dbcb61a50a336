#![forbid(unsafe_code)]

//! [`Scheduler`] backed by `window.setTimeout`.

use std::time::Duration;

use notice_core::{Scheduler, TimerId};
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;

use crate::link::Link;

/// One-shot `setTimeout` per timer.
///
/// Cancellation is left to the notifier: a cancelled timer still fires, the
/// notifier ignores its id, and the one-shot closure frees itself.
pub struct WebScheduler {
    window: web_sys::Window,
    link: Link,
}

impl WebScheduler {
    pub(crate) fn new(window: web_sys::Window, link: Link) -> Self {
        Self { window, link }
    }
}

impl Scheduler for WebScheduler {
    fn schedule(&mut self, timer: TimerId, delay: Duration) {
        let link = self.link.clone();
        let callback = Closure::once_into_js(move || {
            link.dispatch(|notifier| notifier.fire(timer));
        });
        let millis = i32::try_from(delay.as_millis()).unwrap_or(i32::MAX);
        if let Err(err) = self
            .window
            .set_timeout_with_callback_and_timeout_and_arguments_0(callback.unchecked_ref(), millis)
        {
            tracing::warn!(?err, timer = timer.get(), "setTimeout failed");
        }
    }
}
