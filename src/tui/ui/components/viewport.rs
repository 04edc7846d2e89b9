use crate::tui::constants::VIEWPORT_PAGE_LINES;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Vertical scroll state over a block of rendered lines.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Viewport {
    offset: usize,
    content_lines: usize,
    height: usize,
}

impl Viewport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Update the dimensions, keeping the offset in range.
    pub fn set_dimensions(&mut self, content_lines: usize, height: usize) {
        self.content_lines = content_lines;
        self.height = height;
        self.offset = self.offset.min(self.max_offset());
    }

    fn max_offset(&self) -> usize {
        self.content_lines.saturating_sub(self.height)
    }

    fn page_lines(&self) -> usize {
        if self.height > 0 {
            self.height
        } else {
            VIEWPORT_PAGE_LINES
        }
    }

    pub fn scroll_up(&mut self, lines: usize) {
        self.offset = self.offset.saturating_sub(lines);
    }

    pub fn scroll_down(&mut self, lines: usize) {
        self.offset = (self.offset + lines).min(self.max_offset());
    }

    pub fn goto_top(&mut self) {
        self.offset = 0;
    }

    pub fn goto_bottom(&mut self) {
        self.offset = self.max_offset();
    }

    /// How far down the content the view is, from 0.0 to 1.0. Content that
    /// fits entirely counts as fully scrolled.
    pub fn scroll_percent(&self) -> f64 {
        let max = self.max_offset();
        if max == 0 {
            1.0
        } else {
            self.offset as f64 / max as f64
        }
    }

    /// Apply a scrolling key. Returns whether the key was a scrolling key.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Up | KeyCode::Char('k') if !ctrl => self.scroll_up(1),
            KeyCode::Down | KeyCode::Char('j') if !ctrl => self.scroll_down(1),
            KeyCode::Char('u') if ctrl => self.scroll_up(self.page_lines() / 2),
            KeyCode::Char('d') if ctrl => self.scroll_down(self.page_lines() / 2),
            KeyCode::PageUp | KeyCode::Char('b') if !ctrl => self.scroll_up(self.page_lines()),
            KeyCode::PageDown | KeyCode::Char(' ') if !ctrl => {
                self.scroll_down(self.page_lines())
            }
            KeyCode::Home => self.goto_top(),
            KeyCode::End => self.goto_bottom(),
            _ => return false,
        }
        true
    }
}
