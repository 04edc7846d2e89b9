pub mod create_stream_form;
pub mod delete_stream_form;
pub mod download_form;
pub mod produce_form;
pub mod stream_list;
pub mod text_input;
pub mod viewport;

#[cfg(test)]
mod create_stream_form_test;
#[cfg(test)]
mod produce_form_test;
#[cfg(test)]
mod stream_list_test;
#[cfg(test)]
mod text_input_test;

use crate::tui::constants::DIALOG_MAX_WIDTH;
use crate::tui::ui::events::Message;
use crossterm::event::KeyEvent;
use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::Span,
    widgets::{Block, Borders, Clear},
};

pub trait Component {
    fn render(&mut self, f: &mut Frame, area: Rect);
    fn handle_key(&mut self, key: KeyEvent) -> Option<Message>;
}

/// A `height`-row dialog centred in `area`, clipped to it.
pub fn dialog_area(area: Rect, height: u16) -> Rect {
    let width = DIALOG_MAX_WIDTH.min(area.width.saturating_sub(4)).max(area.width.min(20));
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width.saturating_sub(width)) / 2,
        y: area.y + (area.height.saturating_sub(height)) / 2,
        width,
        height,
    }
}

/// Clear `area` and draw a titled dialog frame over it. Returns the inner area.
pub fn render_dialog_frame(f: &mut Frame, area: Rect, title: &str) -> Rect {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(Span::styled(
            format!(" {title} "),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ));
    let inner = block.inner(area);
    f.render_widget(Clear, area);
    f.render_widget(block, area);
    inner
}

pub fn help_style() -> Style {
    Style::default().fg(Color::DarkGray)
}

pub fn label_style(focused: bool) -> Style {
    if focused {
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Gray)
    }
}
