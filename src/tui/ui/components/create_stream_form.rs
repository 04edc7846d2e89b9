use crate::tui::constants::TEXT_FIELD_LIMIT;
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

#[derive(Debug, Clone)]
pub struct CreateStreamForm {
    name: TextInput,
}

impl Default for CreateStreamForm {
    fn default() -> Self {
        Self::new()
    }
}

impl CreateStreamForm {
    pub fn new() -> Self {
        Self {
            name: TextInput::with_limit(TEXT_FIELD_LIMIT),
        }
    }

    pub fn name(&self) -> &str {
        self.name.text()
    }
}

impl Component for CreateStreamForm {
    fn render(&mut self, f: &mut Frame, area: Rect) {
        let area = dialog_area(area, 7);
        let inner = render_dialog_frame(f, area, "Create new stream");

        let mut input = vec![Span::styled("Name: ", label_style(true))];
        input.extend(self.name.render_cursor_spans(true));
        let lines = vec![
            Line::from(""),
            Line::from(input),
            Line::from(""),
            Line::from(Span::styled("enter: create • esc: cancel", help_style())),
        ];
        f.render_widget(Paragraph::new(lines), inner);
    }

    fn handle_key(&mut self, key: KeyEvent) -> Option<Message> {
        match key.code {
            KeyCode::Enter => {
                let name = self.name.text().trim();
                if name.is_empty() {
                    None
                } else {
                    Some(Message::SubmitCreateStream(name.to_string()))
                }
            }
            // stream names never contain spaces
            KeyCode::Char(' ') => None,
            _ => {
                self.name.handle_key(key);
                None
            }
        }
    }
}
