#![forbid(unsafe_code)]

//! Browser host for `notice-core`.
//!
//! On `wasm32` this crate provides:
//! - `WebDocument`: renders element trees into `document.body` and routes
//!   clicks back to the notifier
//! - `WebScheduler`: one `setTimeout` per timer
//! - `NoticeApp`: owns the notifier, listens for Enter/Escape, and exports
//!   `alert`, `force`, `confirm`, `hideAlerts` and `setOptions` to
//!   JavaScript
//!
//! ```js
//! const notice = new NoticeApp({ alertTime: 2 });
//! notice.alert({ type: "success", text: "Saved" });
//! notice.confirm({ text: "Delete?" }, () => remove(), () => {});
//! ```
//!
//! The option-object parsing in [`dto`] is target independent.

pub mod dto;
pub mod error;

#[cfg(target_arch = "wasm32")]
mod app;
#[cfg(target_arch = "wasm32")]
mod document;
#[cfg(target_arch = "wasm32")]
mod link;
#[cfg(target_arch = "wasm32")]
mod scheduler;

#[cfg(target_arch = "wasm32")]
pub use app::NoticeApp;
#[cfg(target_arch = "wasm32")]
pub use document::WebDocument;
#[cfg(target_arch = "wasm32")]
pub use scheduler::WebScheduler;

pub use error::WebError;

/// Notifier over the live DOM.
#[cfg(target_arch = "wasm32")]
pub type WebNotifier = notice_core::Notifier<WebDocument, WebScheduler>;
