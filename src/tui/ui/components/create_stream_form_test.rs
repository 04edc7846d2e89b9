#[cfg(test)]
mod tests {
    use super::super::create_stream_form::CreateStreamForm;
    use crate::tui::ui::components::Component;
    use crate::tui::ui::events::Message;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use ratatui::{Terminal, backend::TestBackend, buffer::Buffer};

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::empty())
    }

    fn render_component(component: &mut CreateStreamForm, width: u16, height: u16) -> Buffer {
        let backend = TestBackend::new(width, height);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|f| {
                component.render(f, f.area());
            })
            .unwrap();
        terminal.backend().buffer().clone()
    }

    fn buffer_contains(buffer: &Buffer, text: &str) -> bool {
        let content = buffer
            .content
            .iter()
            .map(|cell| cell.symbol())
            .collect::<String>();
        content.contains(text)
    }

    #[test]
    fn test_empty_submit_is_noop() {
        let mut form = CreateStreamForm::new();
        assert!(form.handle_key(key(KeyCode::Enter)).is_none());
    }

    #[test]
    fn test_submit_name() {
        let mut form = CreateStreamForm::new();
        for c in "orders".chars() {
            assert!(form.handle_key(key(KeyCode::Char(c))).is_none());
        }
        match form.handle_key(key(KeyCode::Enter)) {
            Some(Message::SubmitCreateStream(name)) => assert_eq!(name, "orders"),
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn test_spaces_are_ignored() {
        let mut form = CreateStreamForm::new();
        for c in "my topic".chars() {
            form.handle_key(key(KeyCode::Char(c)));
        }
        assert_eq!(form.name(), "mytopic");
    }

    #[test]
    fn test_name_limited_to_100_chars() {
        let mut form = CreateStreamForm::new();
        for _ in 0..150 {
            form.handle_key(key(KeyCode::Char('a')));
        }
        assert_eq!(form.name().chars().count(), 100);
    }

    #[test]
    fn test_render_shows_title_and_input() {
        let mut form = CreateStreamForm::new();
        for c in "payments".chars() {
            form.handle_key(key(KeyCode::Char(c)));
        }
        let buffer = render_component(&mut form, 80, 24);
        assert!(buffer_contains(&buffer, "Create new stream"));
        assert!(buffer_contains(&buffer, "Name: payments"));
    }
}
