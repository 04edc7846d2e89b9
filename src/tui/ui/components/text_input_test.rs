#[cfg(test)]
mod tests {
    use super::super::text_input::TextInput;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::empty())
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    fn alt(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::ALT)
    }

    fn type_text(input: &mut TextInput, text: &str) {
        for c in text.chars() {
            input.handle_key(key(KeyCode::Char(c)));
        }
    }

    #[test]
    fn test_text_input_creation() {
        let input = TextInput::new();
        assert_eq!(input.text(), "");
        assert_eq!(input.cursor_position(), 0);
        assert!(input.is_empty());
    }

    #[test]
    fn test_set_text_moves_cursor_to_end() {
        let mut input = TextInput::new();
        input.set_text("hello world".to_string());
        assert_eq!(input.text(), "hello world");
        assert_eq!(input.cursor_position(), 11);
    }

    #[test]
    fn test_character_input() {
        let mut input = TextInput::new();
        assert!(input.handle_key(key(KeyCode::Char('h'))));
        assert!(input.handle_key(key(KeyCode::Char('i'))));
        assert_eq!(input.text(), "hi");
        assert_eq!(input.cursor_position(), 2);
    }

    #[test]
    fn test_insert_in_middle() {
        let mut input = TextInput::new();
        input.set_text("hllo".to_string());
        input.set_cursor_position(1);
        input.handle_key(key(KeyCode::Char('e')));
        assert_eq!(input.text(), "hello");
        assert_eq!(input.cursor_position(), 2);
    }

    #[test]
    fn test_backspace_and_delete() {
        let mut input = TextInput::new();
        input.set_text("hello".to_string());

        assert!(input.handle_key(key(KeyCode::Backspace)));
        assert_eq!(input.text(), "hell");

        input.set_cursor_position(0);
        assert!(!input.handle_key(key(KeyCode::Backspace)));
        assert!(input.handle_key(key(KeyCode::Delete)));
        assert_eq!(input.text(), "ell");
        assert_eq!(input.cursor_position(), 0);
    }

    #[test]
    fn test_multibyte_editing() {
        let mut input = TextInput::new();
        type_text(&mut input, "日本語");
        assert_eq!(input.cursor_position(), 3);

        input.handle_key(key(KeyCode::Left));
        input.handle_key(key(KeyCode::Backspace));
        assert_eq!(input.text(), "日語");
        assert_eq!(input.cursor_position(), 1);
    }

    #[test]
    fn test_cursor_movement() {
        let mut input = TextInput::new();
        input.set_text("abc".to_string());

        input.handle_key(key(KeyCode::Home));
        assert_eq!(input.cursor_position(), 0);
        input.handle_key(key(KeyCode::Left));
        assert_eq!(input.cursor_position(), 0);
        input.handle_key(key(KeyCode::End));
        assert_eq!(input.cursor_position(), 3);
        input.handle_key(key(KeyCode::Right));
        assert_eq!(input.cursor_position(), 3);
        input.handle_key(ctrl('a'));
        assert_eq!(input.cursor_position(), 0);
        input.handle_key(ctrl('e'));
        assert_eq!(input.cursor_position(), 3);
    }

    #[test]
    fn test_control_deletions() {
        let mut input = TextInput::new();
        input.set_text("hello brave world".to_string());

        assert!(input.handle_key(ctrl('w')));
        assert_eq!(input.text(), "hello brave ");

        input.set_cursor_position(6);
        assert!(input.handle_key(ctrl('k')));
        assert_eq!(input.text(), "hello ");

        assert!(input.handle_key(ctrl('u')));
        assert_eq!(input.text(), "");
        assert!(!input.handle_key(ctrl('u')));
    }

    #[test]
    fn test_alt_word_jumps() {
        let mut input = TextInput::new();
        input.set_text("one two three".to_string());

        input.handle_key(alt('b'));
        assert_eq!(input.cursor_position(), 8);
        input.handle_key(alt('b'));
        assert_eq!(input.cursor_position(), 4);
        input.handle_key(alt('f'));
        assert_eq!(input.cursor_position(), 8);
        // alt chars never insert text
        assert!(!input.handle_key(alt('x')));
        assert_eq!(input.text(), "one two three");
    }

    #[test]
    fn test_limit_rejects_extra_characters() {
        let mut input = TextInput::with_limit(3);
        type_text(&mut input, "abcd");
        assert_eq!(input.text(), "abc");
        assert!(!input.handle_key(key(KeyCode::Char('e'))));

        input.set_text("toolong".to_string());
        assert_eq!(input.text(), "too");
    }

    #[test]
    fn test_render_cursor_spans() {
        let mut input = TextInput::new();
        let spans = input.render_cursor_spans(true);
        assert_eq!(spans.len(), 1);
        assert_eq!(spans[0].content, " ");

        input.set_text("abc".to_string());
        input.set_cursor_position(1);
        let spans = input.render_cursor_spans(true);
        let contents: Vec<&str> = spans.iter().map(|s| s.content.as_ref()).collect();
        assert_eq!(contents, vec!["a", "b", "c"]);

        let spans = input.render_cursor_spans(false);
        assert_eq!(spans.len(), 1);
        assert_eq!(spans[0].content, "abc");
    }

    #[test]
    fn test_clear() {
        let mut input = TextInput::new();
        input.set_text("abc".to_string());
        input.clear();
        assert!(input.is_empty());
        assert_eq!(input.cursor_position(), 0);
    }
}
