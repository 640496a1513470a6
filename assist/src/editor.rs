//! Text buffer with a cursor and a transient highlight. Offsets are UTF-8
//! byte offsets and are always clamped onto char boundaries.

use std::time::Duration;
use std::time::Instant;

use crate::config::AssistConfig;

const DEFAULT_INSERT_HIGHLIGHT: Duration = Duration::from_millis(2000);
const DEFAULT_FOCUS_HIGHLIGHT: Duration = Duration::from_millis(3000);
const DEFAULT_FOCUS_WINDOW: usize = 50;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Highlight {
    pub start: usize,
    pub end: usize,
    pub expires_at: Instant,
}

#[derive(Clone, Debug)]
pub struct EditorSurface {
    content: String,
    cursor: usize,
    highlight: Option<Highlight>,
    insert_highlight: Duration,
    focus_highlight: Duration,
    focus_window: usize,
}

impl Default for EditorSurface {
    fn default() -> Self {
        Self::new()
    }
}

impl EditorSurface {
    pub fn new() -> Self {
        Self {
            content: String::new(),
            cursor: 0,
            highlight: None,
            insert_highlight: DEFAULT_INSERT_HIGHLIGHT,
            focus_highlight: DEFAULT_FOCUS_HIGHLIGHT,
            focus_window: DEFAULT_FOCUS_WINDOW,
        }
    }

    pub fn from_config(config: &AssistConfig) -> Self {
        Self {
            insert_highlight: config.insert_highlight(),
            focus_highlight: config.focus_highlight(),
            focus_window: config.focus_window,
            ..Self::new()
        }
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn cursor_position(&self) -> usize {
        self.cursor
    }

    /// Replace the whole buffer, as a user edit does.
    pub fn set_content(&mut self, text: impl Into<String>, cursor: usize) {
        self.content = text.into();
        self.highlight = None;
        self.cursor = self.clamp(cursor);
    }

    pub fn set_cursor(&mut self, pos: usize) {
        self.cursor = self.clamp(pos);
    }

    /// Insert at the cursor and move the cursor past the inserted text.
    /// Returns the inserted span.
    pub fn insert_text(&mut self, s: &str) -> (usize, usize) {
        let at = self.cursor;
        self.insert_at(at, s)
    }

    pub fn insert_with_highlight(&mut self, s: &str) -> (usize, usize) {
        let span = self.insert_text(s);
        self.highlight_span(span, self.insert_highlight);
        span
    }

    /// Splice at `offset`; the cursor lands after the inserted text.
    pub fn insert_at(&mut self, offset: usize, s: &str) -> (usize, usize) {
        let at = self.clamp(offset);
        self.content.insert_str(at, s);
        self.cursor = at + s.len();
        if let Some(h) = &mut self.highlight
            && h.start >= at
        {
            h.start += s.len();
            h.end += s.len();
        }
        (at, self.cursor)
    }

    /// Highlight a region around `pos` and move the cursor there. Returns
    /// the 1-based line to scroll to.
    pub fn focus_at_position(&mut self, pos: usize) -> usize {
        let pos = self.clamp(pos);
        self.cursor = pos;
        let start = self.clamp(pos.saturating_sub(self.focus_window));
        let end = self.clamp(pos.saturating_add(self.focus_window));
        self.highlight_span((start, end), self.focus_highlight);
        self.content[..pos].matches('\n').count() + 1
    }

    pub fn highlight_at(&self, now: Instant) -> Option<Highlight> {
        self.highlight.filter(|h| now < h.expires_at)
    }

    pub fn highlight(&self) -> Option<Highlight> {
        self.highlight_at(Instant::now())
    }

    fn highlight_span(&mut self, (start, end): (usize, usize), ttl: Duration) {
        self.highlight = Some(Highlight {
            start,
            end,
            expires_at: Instant::now() + ttl,
        });
    }

    fn clamp(&self, pos: usize) -> usize {
        let mut pos = pos.min(self.content.len());
        while !self.content.is_char_boundary(pos) {
            pos -= 1;
        }
        pos
    }
}
