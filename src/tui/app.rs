//! Lesson view state
//!
//! One `LessonView` per open lesson. It owns the lesson content and the two
//! widget controllers, so everything it tracks lives exactly as long as the
//! view does.

use super::scroll::ScrollState;
use crate::lesson::{Block, Lesson};
use crate::widgets::{ClipboardController, ClipboardWriter, CopyOutcome, DisclosureController};
use std::time::Duration;

/// A lesson on screen plus the reader's interaction state
pub struct LessonView<W> {
    pub lesson: Lesson,
    pub panels: DisclosureController,
    pub snippets: ClipboardController<W>,
    /// Block positions the cursor can land on, in display order
    interactive: Vec<usize>,
    /// Index into `interactive`
    cursor: usize,
    /// Viewport over the lesson body
    pub scroll: ScrollState,
    pub should_quit: bool,
}

impl<W: ClipboardWriter> LessonView<W> {
    pub fn new(lesson: Lesson, writer: W, confirmation: Duration) -> Self {
        let interactive = lesson.interactive_blocks();
        Self {
            lesson,
            panels: DisclosureController::new(),
            snippets: ClipboardController::with_window(writer, confirmation),
            interactive,
            cursor: 0,
            scroll: ScrollState::new(),
            should_quit: false,
        }
    }

    /// Block under the cursor (None when the lesson has nothing interactive)
    pub fn selected_block(&self) -> Option<usize> {
        self.interactive.get(self.cursor).copied()
    }

    /// Move to the next interactive block
    ///
    /// Past the last one the body scrolls instead, so trailing content stays
    /// reachable.
    pub fn select_next(&mut self) {
        if self.cursor + 1 < self.interactive.len() {
            self.cursor += 1;
            self.scroll.follow_selection();
        } else {
            self.scroll.scroll_down();
        }
    }

    pub fn select_prev(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
            self.scroll.follow_selection();
        } else {
            self.scroll.scroll_up();
        }
    }

    pub fn select_first(&mut self) {
        self.cursor = 0;
        self.scroll.follow_selection();
    }

    pub fn select_last(&mut self) {
        self.cursor = self.interactive.len().saturating_sub(1);
        self.scroll.follow_selection();
    }

    /// Whether the reveal panel at block `index` is open
    pub fn is_open(&self, index: usize) -> bool {
        self.lesson.blocks[index]
            .widget_id(index)
            .is_some_and(|id| self.panels.is_open(id))
    }

    /// Whether the snippet at block `index` is showing its confirmation
    pub fn is_copied(&self, index: usize) -> bool {
        self.lesson.blocks[index]
            .widget_id(index)
            .is_some_and(|id| self.snippets.is_copied(id))
    }

    /// Enter/space: reveal panels toggle, snippets copy
    pub async fn activate(&mut self) {
        let Some(index) = self.selected_block() else {
            return;
        };
        match self.lesson.blocks[index] {
            Block::Reveal { .. } => self.toggle_selected(),
            Block::Snippet { .. } => {
                self.copy_selected().await;
            }
            Block::Prose { .. } | Block::Table { .. } => {}
        }
    }

    /// Toggle the reveal panel under the cursor
    pub fn toggle_selected(&mut self) {
        let Some(index) = self.selected_block() else {
            return;
        };
        let block = &self.lesson.blocks[index];
        if !matches!(block, Block::Reveal { .. }) {
            return;
        }
        if let Some(id) = block.widget_id(index) {
            self.panels.toggle(id);
        }
    }

    /// Copy the snippet under the cursor
    ///
    /// Returns None when the cursor isn't on a snippet.
    pub async fn copy_selected(&mut self) -> Option<CopyOutcome> {
        let index = self.selected_block()?;
        let block = &self.lesson.blocks[index];
        let Block::Snippet { code, .. } = block else {
            return None;
        };
        let id = block.widget_id(index)?;
        Some(self.snippets.copy(id, code).await)
    }

    pub fn collapse_all(&mut self) {
        self.panels.collapse_all();
    }

    /// Leave the view: pending confirmations are discarded
    pub fn close(&mut self) {
        self.snippets.shutdown();
        self.should_quit = true;
    }
}
