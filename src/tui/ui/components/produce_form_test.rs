#[cfg(test)]
mod tests {
    use super::super::produce_form::*;
    use crate::schemas::RecordHeader;
    use crate::tui::ui::components::Component;
    use crate::tui::ui::events::Message;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use ratatui::{Terminal, backend::TestBackend, buffer::Buffer};

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::empty())
    }

    fn type_text(form: &mut ProduceForm, text: &str) {
        for c in text.chars() {
            form.handle_key(key(KeyCode::Char(c)));
        }
    }

    fn buffer_contains(buffer: &Buffer, text: &str) -> bool {
        let content = buffer
            .content
            .iter()
            .map(|cell| cell.symbol())
            .collect::<String>();
        content.contains(text)
    }

    fn values(value: &str) -> ProduceValues {
        ProduceValues {
            value: value.to_string(),
            ..ProduceValues::default()
        }
    }

    #[test]
    fn test_focus_cycles_both_ways() {
        let mut form = ProduceForm::new("orders");
        assert_eq!(form.focused(), 0);
        for expected in [1, 2, 3, 4, 5, 0] {
            form.handle_key(key(KeyCode::Tab));
            assert_eq!(form.focused(), expected);
        }
        form.handle_key(key(KeyCode::BackTab));
        assert_eq!(form.focused(), 5);
    }

    #[test]
    fn test_typing_goes_to_focused_field() {
        let mut form = ProduceForm::new("orders");
        type_text(&mut form, "2");
        for _ in 0..3 {
            form.handle_key(key(KeyCode::Tab));
        }
        type_text(&mut form, "user-1");
        form.handle_key(key(KeyCode::Tab));
        type_text(&mut form, "hello world");

        let values = form.values();
        assert_eq!(values.partition, "2");
        assert_eq!(values.key, "user-1");
        assert_eq!(values.value, "hello world");
    }

    #[test]
    fn test_submit_builds_record() {
        let mut form = ProduceForm::new("orders");
        for _ in 0..4 {
            form.handle_key(key(KeyCode::Tab));
        }
        type_text(&mut form, "payload");

        match form.handle_key(key(KeyCode::Enter)) {
            Some(Message::SubmitPublish(record)) => {
                assert_eq!(record.stream, "orders");
                assert_eq!(record.partition, None);
                assert_eq!(record.key, None);
                assert_eq!(record.value, b"payload");
            }
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn test_submit_without_value_is_invalid() {
        let mut form = ProduceForm::new("orders");
        match form.handle_key(key(KeyCode::Enter)) {
            Some(Message::FormInvalid(msg)) => assert!(msg.contains("value must not be empty")),
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn test_partition_validation() {
        let mut v = values("x");
        v.partition = "3".to_string();
        assert_eq!(v.build_record("s").unwrap().partition, Some(3));

        for bad in ["-1", "abc", "1.5"] {
            v.partition = bad.to_string();
            assert_eq!(
                v.build_record("s").unwrap_err(),
                ProduceError::InvalidPartition(bad.to_string())
            );
        }
    }

    #[test]
    fn test_json_value_is_compacted() {
        let mut v = values("{ \"a\" : 1,  \"b\": [1, 2] }");
        v.value_encoding = "JSON".to_string();
        assert_eq!(v.build_record("s").unwrap().value, br#"{"a":1,"b":[1,2]}"#);

        v.value = "{broken".to_string();
        assert!(matches!(
            v.build_record("s"),
            Err(ProduceError::InvalidJson { field: "value", .. })
        ));
    }

    #[test]
    fn test_base64_key() {
        let mut v = values("x");
        v.key_encoding = "base64".to_string();
        v.key = "aGVsbG8=".to_string();
        assert_eq!(v.build_record("s").unwrap().key, Some(b"hello".to_vec()));

        v.key = "***".to_string();
        assert!(matches!(
            v.build_record("s"),
            Err(ProduceError::InvalidBase64 { field: "key", .. })
        ));
    }

    #[test]
    fn test_encoding_names() {
        for name in ["", "string", "UTF8", "text"] {
            assert_eq!(Encoding::parse(name).unwrap(), Encoding::Utf8);
        }
        assert_eq!(
            Encoding::parse("avro").unwrap_err(),
            ProduceError::UnknownEncoding("avro".to_string())
        );
    }

    #[test]
    fn test_headers() {
        assert_eq!(
            parse_headers("trace=abc, source = web ,").unwrap(),
            vec![
                RecordHeader::new("trace", "abc"),
                RecordHeader::new("source", "web"),
            ]
        );
        assert!(parse_headers("").unwrap().is_empty());
        assert_eq!(
            parse_headers("novalue").unwrap_err(),
            ProduceError::InvalidHeader("novalue".to_string())
        );
        assert!(parse_headers("=v").is_err());
    }

    #[test]
    fn test_render_lists_fields() {
        let mut form = ProduceForm::new("orders");
        let mut terminal = Terminal::new(TestBackend::new(80, 30)).unwrap();
        terminal.draw(|f| form.render(f, f.area())).unwrap();
        let buffer = terminal.backend().buffer().clone();

        assert!(buffer_contains(&buffer, "Produce message to orders"));
        for label in FIELD_LABELS {
            assert!(buffer_contains(&buffer, label), "missing {label}");
        }
    }
}
