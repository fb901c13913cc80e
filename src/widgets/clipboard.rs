//! Copy-to-clipboard buttons with a transient "Copied!" confirmation
//!
//! Per snippet: `Idle` → (write ok) → `Confirmed` → (window elapses) → `Idle`.
//! A failed write leaves the snippet where it was. Clipboard errors are
//! logged and never reach the caller as an error.

use super::{ResetTimers, WidgetId};
use anyhow::Result;
use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

/// How long the confirmation stays visible after a successful copy
pub const DEFAULT_CONFIRMATION: Duration = Duration::from_millis(2000);

/// Something that can put text on the system clipboard
///
/// The write may suspend (permission prompts, a clipboard daemon) and may
/// fail. Implementations never read the clipboard back.
pub trait ClipboardWriter {
    fn write_text(&self, text: &str) -> impl Future<Output = Result<()>> + Send;
}

/// What happened to a copy request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CopyOutcome {
    /// Text is on the clipboard and the confirmation is showing
    Copied,
    /// The clipboard rejected the write (message already logged)
    Failed(String),
}

impl CopyOutcome {
    pub fn is_copied(&self) -> bool {
        matches!(self, Self::Copied)
    }
}

#[derive(Debug, Default, Clone, Copy)]
struct CopySlot {
    copied: bool,
    /// Bumped on every confirmation; a reset only applies to its own copy
    generation: u64,
}

type Slots = Mutex<HashMap<WidgetId, CopySlot>>;

fn lock(slots: &Slots) -> MutexGuard<'_, HashMap<WidgetId, CopySlot>> {
    slots.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Copy buttons for the snippets of one view
///
/// Reset timers hold only a weak reference to the state and are aborted when
/// the controller is shut down or dropped, so a view that goes away can't be
/// touched by a late reset.
pub struct ClipboardController<W> {
    writer: W,
    window: Duration,
    slots: Arc<Slots>,
    timers: ResetTimers<WidgetId>,
}

impl<W: ClipboardWriter> ClipboardController<W> {
    /// Controller with the standard 2 second confirmation
    pub fn new(writer: W) -> Self {
        Self::with_window(writer, DEFAULT_CONFIRMATION)
    }

    pub fn with_window(writer: W, window: Duration) -> Self {
        Self {
            writer,
            window,
            slots: Arc::new(Mutex::new(HashMap::new())),
            timers: ResetTimers::new(),
        }
    }

    /// Write `text` to the clipboard and confirm it under `id`
    ///
    /// `text` must be exactly what the reader sees for that snippet. A new
    /// copy of the same snippet restarts its confirmation window.
    pub async fn copy(&mut self, id: impl Into<WidgetId>, text: &str) -> CopyOutcome {
        let id = id.into();

        if let Err(e) = self.writer.write_text(text).await {
            tracing::warn!(snippet = %id, "Clipboard write failed: {:#}", e);
            return CopyOutcome::Failed(format!("{:#}", e));
        }

        let generation = {
            let mut slots = lock(&self.slots);
            let slot = slots.entry(id.clone()).or_default();
            slot.copied = true;
            slot.generation = slot.generation.wrapping_add(1);
            slot.generation
        };

        let slots = Arc::downgrade(&self.slots);
        let reset_id = id.clone();
        self.timers.schedule(id.clone(), self.window, move || {
            let Some(slots) = slots.upgrade() else {
                return;
            };
            let mut slots = lock(&slots);
            if let Some(slot) = slots.get_mut(&reset_id) {
                if slot.generation == generation {
                    slot.copied = false;
                }
            }
        });

        tracing::debug!(snippet = %id, chars = text.chars().count(), "Copied snippet");
        CopyOutcome::Copied
    }

    /// Whether the "Copied!" confirmation is showing for `id`
    pub fn is_copied(&self, id: impl Into<WidgetId>) -> bool {
        lock(&self.slots)
            .get(&id.into())
            .map(|slot| slot.copied)
            .unwrap_or(false)
    }

    pub fn confirmation_window(&self) -> Duration {
        self.window
    }

    /// Confirmations still waiting for their reset
    pub fn pending_resets(&self) -> usize {
        self.timers.pending()
    }

    /// Abort every outstanding reset (the view is going away)
    pub fn shutdown(&mut self) {
        let pending = self.timers.pending();
        self.timers.cancel_all();
        if pending > 0 {
            tracing::debug!(pending, "Cancelled pending copy confirmations");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::widgets::testing::FakeClipboard;

    async fn wait(ms: u64) {
        tokio::time::sleep(Duration::from_millis(ms)).await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_confirmation_clears_after_window() {
        let clipboard = FakeClipboard::default();
        let mut buttons = ClipboardController::new(clipboard.clone());

        let outcome = buttons.copy("dto", "public class Foo {}").await;
        assert_eq!(outcome, CopyOutcome::Copied);
        assert!(buttons.is_copied("dto"));
        assert_eq!(clipboard.contents(), vec!["public class Foo {}"]);

        wait(1999).await;
        assert!(buttons.is_copied("dto"));

        wait(2).await;
        assert!(!buttons.is_copied("dto"));
        assert_eq!(buttons.pending_resets(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_failed_write_never_confirms() {
        let mut buttons = ClipboardController::new(FakeClipboard::failing());

        let outcome = buttons.copy("bad", "text").await;
        assert!(!outcome.is_copied());
        assert!(matches!(outcome, CopyOutcome::Failed(msg) if msg.contains("secure context")));
        assert!(!buttons.is_copied("bad"));
        assert_eq!(buttons.pending_resets(), 0);

        wait(2500).await;
        assert!(!buttons.is_copied("bad"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_recopy_restarts_window() {
        let mut buttons = ClipboardController::new(FakeClipboard::default());

        buttons.copy("dto", "v1").await;
        wait(1500).await;
        buttons.copy("dto", "v2").await;
        assert_eq!(buttons.pending_resets(), 1);

        // The first copy's reset would have fired here
        wait(600).await;
        assert!(buttons.is_copied("dto"));

        // Within one window of the last copy
        wait(1401).await;
        assert!(!buttons.is_copied("dto"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_many_rapid_copies_never_stick() {
        let mut buttons = ClipboardController::new(FakeClipboard::default());

        for _ in 0..10 {
            buttons.copy("dto", "x").await;
            wait(100).await;
        }
        assert!(buttons.is_copied("dto"));

        wait(2000).await;
        assert!(!buttons.is_copied("dto"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_snippets_are_independent() {
        let mut buttons = ClipboardController::new(FakeClipboard::default());

        buttons.copy("entity", "a").await;
        wait(1000).await;
        buttons.copy(3, "b").await;
        assert!(buttons.is_copied("entity"));
        assert!(buttons.is_copied(3));
        assert!(!buttons.is_copied("dto"));

        wait(1001).await;
        assert!(!buttons.is_copied("entity"));
        assert!(buttons.is_copied(3));
    }

    #[tokio::test(start_paused = true)]
    async fn test_failure_keeps_earlier_confirmation() {
        let clipboard = FakeClipboard::default();
        let mut buttons = ClipboardController::new(clipboard);
        buttons.copy("dto", "ok").await;

        // Swap in a clipboard that rejects writes
        buttons.writer.fail = true;
        assert!(!buttons.copy("dto", "nope").await.is_copied());
        assert!(buttons.is_copied("dto"));

        wait(2001).await;
        assert!(!buttons.is_copied("dto"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_shutdown_discards_pending_resets() {
        let mut buttons = ClipboardController::new(FakeClipboard::default());
        buttons.copy("dto", "x").await;
        buttons.copy("entity", "y").await;
        assert_eq!(buttons.pending_resets(), 2);

        buttons.shutdown();
        assert_eq!(buttons.pending_resets(), 0);

        // No reset ran after teardown
        wait(5000).await;
        assert!(buttons.is_copied("dto"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_custom_window() {
        let mut buttons =
            ClipboardController::with_window(FakeClipboard::default(), Duration::from_millis(500));
        assert_eq!(buttons.confirmation_window(), Duration::from_millis(500));

        buttons.copy("dto", "x").await;
        wait(501).await;
        assert!(!buttons.is_copied("dto"));
    }
}
