#[cfg(test)]
mod tests {
    use super::super::stream_list::StreamList;
    use crate::tui::ui::components::Component;
    use crate::tui::ui::events::Message;
    use crate::tui::ui::overlay::OverlayKind;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use ratatui::{Terminal, backend::TestBackend, buffer::Buffer};

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::empty())
    }

    fn render_component(component: &mut StreamList, width: u16, height: u16) -> Buffer {
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

    fn list() -> StreamList {
        let mut list = StreamList::new("memory://local");
        list.set_streams(vec![
            "payments".to_string(),
            "orders".to_string(),
            "audit-log".to_string(),
        ]);
        list
    }

    #[test]
    fn test_streams_are_sorted() {
        let list = list();
        assert_eq!(list.visible_names(), vec!["audit-log", "orders", "payments"]);
        assert_eq!(list.selected_name(), Some("audit-log"));
    }

    #[test]
    fn test_navigation_is_bounded() {
        let mut list = list();
        list.handle_key(key(KeyCode::Char('k')));
        assert_eq!(list.selected_name(), Some("audit-log"));
        list.handle_key(key(KeyCode::Char('j')));
        list.handle_key(key(KeyCode::Down));
        list.handle_key(key(KeyCode::Down));
        assert_eq!(list.selected_name(), Some("payments"));
        list.handle_key(key(KeyCode::Home));
        assert_eq!(list.selected_name(), Some("audit-log"));
        list.handle_key(key(KeyCode::End));
        assert_eq!(list.selected_name(), Some("payments"));
    }

    #[test]
    fn test_enter_opens_selected_stream() {
        let mut list = list();
        list.handle_key(key(KeyCode::Down));
        match list.handle_key(key(KeyCode::Enter)) {
            Some(Message::OpenStream(name)) => assert_eq!(name, "orders"),
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn test_enter_on_empty_list_does_nothing() {
        let mut list = StreamList::new("memory://local");
        list.set_streams(Vec::new());
        assert!(list.handle_key(key(KeyCode::Enter)).is_none());
    }

    #[test]
    fn test_action_keys() {
        let mut list = list();
        assert!(matches!(
            list.handle_key(key(KeyCode::Char('c'))),
            Some(Message::OpenOverlay(OverlayKind::CreateTopic))
        ));
        assert!(matches!(
            list.handle_key(key(KeyCode::Char('X'))),
            Some(Message::OpenOverlay(OverlayKind::DeleteTopic))
        ));
        assert!(matches!(
            list.handle_key(key(KeyCode::Char('p'))),
            Some(Message::OpenOverlay(OverlayKind::ProduceMessage))
        ));
        assert!(matches!(
            list.handle_key(key(KeyCode::Char('d'))),
            Some(Message::OpenOverlay(OverlayKind::DownloadTopic))
        ));
        assert!(matches!(
            list.handle_key(key(KeyCode::Char('r'))),
            Some(Message::RefreshStreams)
        ));
        assert!(matches!(
            list.handle_key(key(KeyCode::Char('q'))),
            Some(Message::Quit)
        ));
    }

    #[test]
    fn test_filter_narrows_and_esc_clears() {
        let mut list = list();
        list.handle_key(key(KeyCode::Char('/')));
        assert!(list.is_filtering());
        for c in "pay".chars() {
            // action keys are plain text while filtering
            assert!(list.handle_key(key(KeyCode::Char(c))).is_none());
        }
        assert_eq!(list.visible_names(), vec!["payments"]);

        list.handle_key(key(KeyCode::Enter));
        assert!(!list.is_filtering());
        assert_eq!(list.filter_text(), "pay");
        assert_eq!(list.selected_name(), Some("payments"));

        list.handle_key(key(KeyCode::Esc));
        assert_eq!(list.filter_text(), "");
        assert_eq!(list.visible_names().len(), 3);
    }

    #[test]
    fn test_refresh_keeps_selection() {
        let mut list = list();
        list.handle_key(key(KeyCode::End));
        list.set_streams(vec![
            "payments".to_string(),
            "aaa".to_string(),
            "orders".to_string(),
            "audit-log".to_string(),
        ]);
        assert_eq!(list.selected_name(), Some("payments"));
    }

    #[test]
    fn test_selection_clamped_when_list_shrinks() {
        let mut list = list();
        list.handle_key(key(KeyCode::End));
        list.set_streams(vec!["orders".to_string()]);
        assert_eq!(list.selected_name(), Some("orders"));
    }

    #[test]
    fn test_render_shows_bootstrap_and_streams() {
        let mut list = list();
        let buffer = render_component(&mut list, 120, 20);
        assert!(buffer_contains(&buffer, "lazystream → memory://local"));
        assert!(buffer_contains(&buffer, "Streams (3)"));
        assert!(buffer_contains(&buffer, "orders"));
        assert!(buffer_contains(&buffer, "q: quit"));
    }

    #[test]
    fn test_render_loading_before_first_fetch() {
        let mut list = StreamList::new("memory://local");
        let buffer = render_component(&mut list, 80, 10);
        assert!(buffer_contains(&buffer, "Loading..."));
    }
}
