use crate::tui::ui::app_state::{AppState, View};
use crate::tui::ui::components::Component;
use ratatui::{
    Frame,
    style::{Color, Style},
    widgets::Paragraph,
};

/// Draw the whole frame: the current view, then the overlay over it, then
/// the toast over everything.
pub fn render(f: &mut Frame, state: &mut AppState) {
    let area = f.area();

    match &state.view {
        View::StreamList => state.stream_list.render(f, area),
        View::StreamDetail(stream) => match state.browsers.get_mut(stream) {
            Some(browser) => browser.render(f, area),
            None => f.render_widget(
                Paragraph::new("Error: stream view not found").style(Style::default().fg(Color::Red)),
                area,
            ),
        },
    }

    state.overlay.render(f, area);
    state.toasts.render(f, area);
}
