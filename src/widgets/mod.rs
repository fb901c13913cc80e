//! Interactive widget state for lesson views
//!
//! Every lesson view owns one [`DisclosureController`] and one
//! [`ClipboardController`]. The rendering host binds user actions to their
//! commands (`toggle`, `copy`) and reads their queries (`is_open`,
//! `is_copied`) when drawing. Nothing here knows how a lesson is rendered.
//!
//! ```text
//!   key press ──► LessonView ──► toggle(id) ──► DisclosureController
//!                     │
//!                     └────────► copy(id, text) ──► ClipboardWriter (async)
//!                                      │
//!                                      └─► ResetTimers ── window ──► is_copied = false
//! ```
//!
//! A controller instance is the identifier namespace of its view: two views
//! may both use `"q1"` without interfering.

mod clipboard;
mod disclosure;
mod id;
mod timers;

pub use clipboard::{ClipboardController, ClipboardWriter, CopyOutcome, DEFAULT_CONFIRMATION};
pub use disclosure::DisclosureController;
pub use id::WidgetId;
pub use timers::ResetTimers;

#[cfg(test)]
pub(crate) mod testing;
