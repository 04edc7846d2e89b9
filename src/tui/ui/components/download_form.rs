use crate::tui::ui::components::text_input::TextInput;
use crate::tui::ui::components::{Component, dialog_area, help_style, label_style, render_dialog_frame};
use crate::tui::ui::events::Message;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    Frame,
    layout::Rect,
    text::{Line, Span},
    widgets::Paragraph,
};
use std::path::{Component as PathComponent, Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PathError {
    #[error("path is empty")]
    Empty,
    #[error("path contains a NUL byte")]
    Nul,
    #[error("path does not name a file")]
    NotAFile,
    #[error("home directory is unknown")]
    NoHome,
}

/// Check that `input` names a file and expand a leading `~/`.
///
/// Only the syntax is checked; whether the directory exists is left to the
/// export itself.
pub fn validate_path(input: &str, home: Option<&Path>) -> Result<PathBuf, PathError> {
    let text = input.trim();
    if text.is_empty() {
        return Err(PathError::Empty);
    }
    if text.contains('\0') {
        return Err(PathError::Nul);
    }
    if text.ends_with('/') || text.ends_with(std::path::MAIN_SEPARATOR) || text == "~" {
        return Err(PathError::NotAFile);
    }

    let path = match text.strip_prefix("~/") {
        Some(rest) => home.ok_or(PathError::NoHome)?.join(rest),
        None => PathBuf::from(text),
    };
    match path.components().next_back() {
        Some(PathComponent::Normal(_)) => Ok(path),
        _ => Err(PathError::NotAFile),
    }
}

#[derive(Debug, Clone)]
pub struct DownloadForm {
    stream: String,
    path: TextInput,
}

impl DownloadForm {
    pub fn new(stream: impl Into<String>) -> Self {
        Self {
            stream: stream.into(),
            path: TextInput::new(),
        }
    }

    pub fn stream(&self) -> &str {
        &self.stream
    }

    pub fn path_text(&self) -> &str {
        self.path.text()
    }
}

impl Component for DownloadForm {
    fn render(&mut self, f: &mut Frame, area: Rect) {
        let area = dialog_area(area, 8);
        let inner = render_dialog_frame(f, area, &format!("Download {}", self.stream));

        let mut input = vec![Span::raw("  ")];
        input.extend(self.path.render_cursor_spans(true));
        let lines = vec![
            Line::from(""),
            Line::from(Span::styled("File path:", label_style(true))),
            Line::from(input),
            Line::from(""),
            Line::from(Span::styled("enter: download • esc: cancel", help_style())),
        ];
        f.render_widget(Paragraph::new(lines), inner);
    }

    fn handle_key(&mut self, key: KeyEvent) -> Option<Message> {
        if key.code == KeyCode::Enter {
            let home = dirs::home_dir();
            return Some(match validate_path(self.path.text(), home.as_deref()) {
                Ok(path) => Message::SubmitExport {
                    stream: self.stream.clone(),
                    path,
                },
                Err(err) => Message::FormInvalid(format!("Error! Download path is not valid: {err}")),
            });
        }
        self.path.handle_key(key);
        None
    }
}
