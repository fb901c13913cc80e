//! System clipboard backed by `arboard`
//!
//! Works on Windows, macOS and Linux (X11/Wayland). On Linux the copying
//! process owns the clipboard contents and serves them to other apps, so the
//! text disappears when the handle that set it is dropped. One handle is
//! therefore kept for the life of the viewer. Writes run on a blocking thread
//! so a slow clipboard owner can't stall the event loop.

use crate::widgets::ClipboardWriter;
use anyhow::{Context, Result};
use arboard::Clipboard;
use std::sync::{Arc, Mutex, PoisonError};

/// [`ClipboardWriter`] for the real desktop clipboard
///
/// Clones share the same handle. It is opened on the first copy; a failed
/// write drops it so the next copy reconnects.
#[derive(Clone, Default)]
pub struct SystemClipboard {
    handle: Arc<Mutex<Option<Clipboard>>>,
}

impl SystemClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a clipboard handle is currently held
    pub fn is_connected(&self) -> bool {
        self.handle
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }
}

/// Set `text` through the held handle, opening one if needed
///
/// Common failure cases: no display server (headless Linux), permission denied.
fn copy_to_clipboard(slot: &mut Option<Clipboard>, text: &str) -> Result<()> {
    let mut clipboard = match slot.take() {
        Some(clipboard) => clipboard,
        None => Clipboard::new().context("Failed to access clipboard")?,
    };
    clipboard
        .set_text(text)
        .context("Failed to set clipboard text")?;
    *slot = Some(clipboard);
    Ok(())
}

impl ClipboardWriter for SystemClipboard {
    async fn write_text(&self, text: &str) -> Result<()> {
        let text = text.to_string();
        let handle = Arc::clone(&self.handle);
        tokio::task::spawn_blocking(move || {
            let mut slot = handle.lock().unwrap_or_else(PoisonError::into_inner);
            copy_to_clipboard(&mut slot, &text)
        })
        .await
        .context("Clipboard task panicked")?
    }
}
