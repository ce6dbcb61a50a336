#![forbid(unsafe_code)]

//! Transient alerts, force dialogs, and confirm dialogs over a host document.
//!
//! This crate provides:
//! - [`Notifier`]: the engine behind `alert`, `force`, `confirm`,
//!   `hide_alerts`, and `set_options`
//! - [`Options`] / [`OptionsPatch`]: configuration with role-by-role merging
//! - [`Severity`]: the five background categories and their aliases
//! - [`Document`] / [`Scheduler`]: the seams a host implements
//!
//! The engine never touches a real DOM or clock. Hosts render [`Element`]
//! trees, schedule wake-ups, and feed clicks, keys and elapsed timers back
//! in. See `notice-web` for the browser host and `notice-harness` for an
//! in-memory one.

pub mod config;
pub mod dialog;
pub mod element;
pub mod error;
pub mod host;
pub mod id;
mod lifecycle;
pub mod notifier;
mod overlay;
pub mod severity;

pub use config::{
    ClassNames, ClassNamesPatch, IdNames, IdNamesPatch, Options, OptionsPatch, Positions,
};
pub use dialog::{AlertOptions, Callback, ConfirmOptions, DialogKind, ForceOptions, alert_delay};
pub use element::{ClickAction, Content, Element, escape_html};
pub use error::NoticeError;
pub use host::{Document, Key, Scheduler, TimerId};
pub use id::{DialogId, ID_PREFIX};
pub use notice_i18n::{LabelCatalog, LabelKey, LocaleLabels};
pub use notifier::Notifier;
pub use severity::Severity;
