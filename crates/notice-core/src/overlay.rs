#![forbid(unsafe_code)]

//! The shared dimmed backdrop behind modal dialogs.
//!
//! # Invariants
//!
//! - At most one overlay record exists, and therefore at most one overlay
//!   node is attached at a time. Opening a new overlay detaches the previous
//!   one synchronously.
//! - The overlay is inserted at opacity `0` and fades in to the configured
//!   opacity on the next tick; removal sets opacity `0` and detaches after
//!   the transition delay.
//!
//! # Failure Modes
//!
//! - Removing when no overlay exists is a no-op.

use crate::config::Options;
use crate::element::{ClickAction, Element};
use crate::host::TimerId;
use crate::id::DialogId;

/// Bookkeeping for the overlay currently attached.
#[derive(Debug)]
pub(crate) struct OverlayRecord {
    /// DOM id captured at creation, so a later `ids` change cannot orphan it.
    pub(crate) id: String,
    pub(crate) serial: u64,
    /// Dialog dismissed together with the overlay on backdrop click.
    pub(crate) owner: Option<DialogId>,
    pub(crate) fade_in: Option<TimerId>,
    pub(crate) detach: Option<TimerId>,
}

impl OverlayRecord {
    pub(crate) fn is_fading_out(&self) -> bool {
        self.detach.is_some()
    }

    pub(crate) fn timers(&self) -> impl Iterator<Item = TimerId> {
        self.fade_in.into_iter().chain(self.detach)
    }
}

/// Build the overlay node. A click action is attached only when the owner
/// may be dismissed from the backdrop.
pub(crate) fn overlay_element(options: &Options, owner: Option<&DialogId>) -> Element {
    let classes = &options.classes;
    let element = Element::div()
        .id(&options.ids.overlay)
        .class(&classes.overlay)
        .class(&classes.background_overlay)
        .style("opacity", "0");
    if owner.is_some() && options.overlay_click_dismiss {
        element.on_click(ClickAction::Overlay)
    } else {
        element
    }
}
