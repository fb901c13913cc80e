//! Test doubles for the clipboard seam

use super::ClipboardWriter;
use anyhow::Result;
use std::sync::{Arc, Mutex};

/// Records writes, or rejects them all when `fail` is set
#[derive(Debug, Default, Clone)]
pub(crate) struct FakeClipboard {
    written: Arc<Mutex<Vec<String>>>,
    pub fail: bool,
}

impl FakeClipboard {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn contents(&self) -> Vec<String> {
        self.written.lock().unwrap().clone()
    }
}

impl ClipboardWriter for FakeClipboard {
    async fn write_text(&self, text: &str) -> Result<()> {
        if self.fail {
            anyhow::bail!("clipboard unavailable: not a secure context");
        }
        self.written.lock().unwrap().push(text.to_string());
        Ok(())
    }
}
