// Scroll state for the lesson body
//
// The body scrolls two ways: moving the selection pulls the selected block
// into view, and the scroll keys move the viewport directly. Once the reader
// scrolls by hand the selection stops steering the viewport until it moves
// again.

/// Viewport position over the laid-out lesson lines
#[derive(Debug, Clone)]
pub struct ScrollState {
    /// First visible line
    offset: usize,

    /// Lines in the laid-out lesson (0 until the first draw)
    total: usize,

    /// Lines the body area can show
    viewport: usize,

    /// Whether the next draw should bring the selected block into view
    follow_selection: bool,
}

impl ScrollState {
    pub fn new() -> Self {
        Self {
            offset: 0,
            total: 0,
            viewport: 0,
            follow_selection: true,
        }
    }

    /// Record the sizes of the current frame and clamp the offset to them
    pub fn update_dimensions(&mut self, total: usize, viewport: usize) {
        self.total = total;
        self.viewport = viewport;
        self.offset = self.offset.min(self.max_offset());
    }

    /// Hand the viewport back to the selection
    pub fn follow_selection(&mut self) {
        self.follow_selection = true;
    }

    /// Bring the selected line range into view, unless the reader has
    /// scrolled since the selection last moved
    pub fn reveal(&mut self, selected: Option<(usize, usize)>) {
        if self.follow_selection {
            self.offset = keep_visible(self.offset, selected, self.viewport, self.total);
        }
    }

    pub fn scroll_up(&mut self) {
        self.follow_selection = false;
        self.offset = self.offset.saturating_sub(1);
    }

    pub fn scroll_down(&mut self) {
        self.follow_selection = false;
        // Before the first draw the size is unknown; the draw clamps
        if self.total == 0 || self.offset < self.max_offset() {
            self.offset += 1;
        }
    }

    pub fn page_up(&mut self) {
        self.follow_selection = false;
        self.offset = self.offset.saturating_sub(self.page());
    }

    pub fn page_down(&mut self) {
        self.follow_selection = false;
        self.offset = (self.offset + self.page()).min(self.max_offset().max(self.offset));
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Keep one line of context when paging
    fn page(&self) -> usize {
        self.viewport.saturating_sub(1).max(1)
    }

    fn max_offset(&self) -> usize {
        self.total.saturating_sub(self.viewport)
    }
}

impl Default for ScrollState {
    fn default() -> Self {
        Self::new()
    }
}

/// Scroll offset that keeps `selected` (a line range) inside the viewport
pub fn keep_visible(
    scroll: usize,
    selected: Option<(usize, usize)>,
    height: usize,
    total: usize,
) -> usize {
    let max_scroll = total.saturating_sub(height);
    let scroll = scroll.min(max_scroll);
    let Some((start, end)) = selected else {
        return scroll;
    };

    if start < scroll {
        start
    } else if end > scroll + height {
        // Show the end of the block, but never push its start off the top
        end.saturating_sub(height).min(start)
    } else {
        scroll
    }
}
