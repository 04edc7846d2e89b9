use crate::tui::ui::components::{Component, dialog_area, help_style, render_dialog_frame};
use crate::tui::ui::events::Message;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

#[derive(Debug, Clone)]
pub struct DeleteStreamForm {
    stream: String,
}

impl DeleteStreamForm {
    pub fn new(stream: impl Into<String>) -> Self {
        Self {
            stream: stream.into(),
        }
    }

    pub fn stream(&self) -> &str {
        &self.stream
    }
}

impl Component for DeleteStreamForm {
    fn render(&mut self, f: &mut Frame, area: Rect) {
        let area = dialog_area(area, 7);
        let inner = render_dialog_frame(f, area, "Delete stream");

        let lines = vec![
            Line::from(""),
            Line::from(vec![
                Span::raw("Delete stream "),
                Span::styled(
                    self.stream.as_str(),
                    Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                ),
                Span::raw("? This cannot be undone."),
            ]),
            Line::from(""),
            Line::from(Span::styled("y: delete • n/esc: cancel", help_style())),
        ];
        f.render_widget(Paragraph::new(lines), inner);
    }

    fn handle_key(&mut self, key: KeyEvent) -> Option<Message> {
        match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') => {
                Some(Message::SubmitDeleteStream(self.stream.clone()))
            }
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => Some(Message::CloseOverlay),
            _ => None,
        }
    }
}
