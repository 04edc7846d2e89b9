use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    style::{Color, Style},
    text::Span,
};

/// A reusable text input component that handles cursor positioning and text editing
#[derive(Debug, Clone, Default)]
pub struct TextInput {
    text: String,
    cursor_position: usize,
    /// Maximum number of characters, if any
    limit: Option<usize>,
}

impl TextInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_limit(limit: usize) -> Self {
        Self {
            limit: Some(limit),
            ..Self::default()
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn cursor_position(&self) -> usize {
        self.cursor_position
    }

    /// Set the text (cut to the limit) and move cursor to the end
    pub fn set_text(&mut self, text: String) {
        self.text = match self.limit {
            Some(limit) => text.chars().take(limit).collect(),
            None => text,
        };
        self.cursor_position = self.char_count();
    }

    pub fn clear(&mut self) {
        self.text.clear();
        self.cursor_position = 0;
    }

    pub fn set_cursor_position(&mut self, position: usize) {
        self.cursor_position = position.min(self.char_count());
    }

    fn char_count(&self) -> usize {
        self.text.chars().count()
    }

    fn byte_index(&self, char_pos: usize) -> usize {
        self.text
            .char_indices()
            .nth(char_pos)
            .map_or(self.text.len(), |(i, _)| i)
    }

    /// Find the previous word boundary from the given position
    fn find_prev_word_boundary(&self, from: usize) -> usize {
        let chars: Vec<char> = self.text.chars().collect();
        let mut pos = from;

        while pos > 0 && chars[pos - 1].is_whitespace() {
            pos -= 1;
        }
        while pos > 0 && !chars[pos - 1].is_whitespace() {
            pos -= 1;
        }
        pos
    }

    /// Find the next word boundary from the given position
    fn find_next_word_boundary(&self, from: usize) -> usize {
        let chars: Vec<char> = self.text.chars().collect();
        let mut pos = from;

        while pos < chars.len() && !chars[pos].is_whitespace() {
            pos += 1;
        }
        while pos < chars.len() && chars[pos].is_whitespace() {
            pos += 1;
        }
        pos
    }

    /// Delete the char range `start..end` and return if text changed
    fn delete_range(&mut self, start: usize, end: usize) -> bool {
        if start >= end || end > self.char_count() {
            return false;
        }
        let byte_start = self.byte_index(start);
        let byte_end = self.byte_index(end);
        self.text.drain(byte_start..byte_end);
        self.cursor_position = start;
        true
    }

    fn insert_char(&mut self, c: char) -> bool {
        if self.limit.is_some_and(|limit| self.char_count() >= limit) {
            return false;
        }
        let byte_pos = self.byte_index(self.cursor_position);
        self.text.insert(byte_pos, c);
        self.cursor_position += 1;
        true
    }

    /// Render the text with cursor as styled spans. Unfocused inputs show
    /// no cursor.
    pub fn render_cursor_spans(&self, focused: bool) -> Vec<Span<'_>> {
        let cursor_style = Style::default().bg(Color::White).fg(Color::Black);
        if !focused {
            return vec![Span::raw(self.text.as_str())];
        }

        let split = self.byte_index(self.cursor_position);
        let (before, after) = self.text.split_at(split);
        let mut spans = Vec::new();
        if !before.is_empty() {
            spans.push(Span::raw(before));
        }

        let mut rest = after.chars();
        match rest.next() {
            Some(c) => {
                spans.push(Span::styled(c.to_string(), cursor_style));
                let remaining = rest.as_str();
                if !remaining.is_empty() {
                    spans.push(Span::raw(remaining));
                }
            }
            None => spans.push(Span::styled(" ", cursor_style)),
        }
        spans
    }

    /// Handle a key event and return true if the text changed
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            return match key.code {
                KeyCode::Char('a') => {
                    self.cursor_position = 0;
                    false
                }
                KeyCode::Char('e') => {
                    self.cursor_position = self.char_count();
                    false
                }
                KeyCode::Char('b') => {
                    self.cursor_position = self.cursor_position.saturating_sub(1);
                    false
                }
                KeyCode::Char('f') => {
                    self.cursor_position = (self.cursor_position + 1).min(self.char_count());
                    false
                }
                // Same as backspace
                KeyCode::Char('h') => self.delete_range(
                    self.cursor_position.saturating_sub(1),
                    self.cursor_position,
                ),
                KeyCode::Char('d') => {
                    self.delete_range(self.cursor_position, self.cursor_position + 1)
                }
                KeyCode::Char('w') => {
                    let start = self.find_prev_word_boundary(self.cursor_position);
                    self.delete_range(start, self.cursor_position)
                }
                KeyCode::Char('u') => self.delete_range(0, self.cursor_position),
                KeyCode::Char('k') => self.delete_range(self.cursor_position, self.char_count()),
                _ => false,
            };
        }

        if key.modifiers.contains(KeyModifiers::ALT) {
            match key.code {
                KeyCode::Char('b') => {
                    self.cursor_position = self.find_prev_word_boundary(self.cursor_position);
                }
                KeyCode::Char('f') => {
                    self.cursor_position = self.find_next_word_boundary(self.cursor_position);
                }
                _ => {}
            }
            return false;
        }

        match key.code {
            KeyCode::Char(c) => self.insert_char(c),
            KeyCode::Backspace => self.delete_range(
                self.cursor_position.saturating_sub(1),
                self.cursor_position,
            ),
            KeyCode::Delete => self.delete_range(self.cursor_position, self.cursor_position + 1),
            KeyCode::Left => {
                self.cursor_position = self.cursor_position.saturating_sub(1);
                false
            }
            KeyCode::Right => {
                self.cursor_position = (self.cursor_position + 1).min(self.char_count());
                false
            }
            KeyCode::Home => {
                self.cursor_position = 0;
                false
            }
            KeyCode::End => {
                self.cursor_position = self.char_count();
                false
            }
            _ => false,
        }
    }
}
