#[cfg(test)]
mod tests {
    use super::super::background::*;
    use crate::broker::{AdminClient, MemoryBroker};
    use crate::schemas::OutboundRecord;
    use crate::tui::ui::events::Message;
    use crossbeam::channel::{self, Receiver};
    use std::sync::Arc;
    use std::time::Duration;
    use tempfile::tempdir;

    fn service(broker: &MemoryBroker) -> (BackgroundService, Receiver<Message>) {
        let (tx, rx) = channel::unbounded();
        let service = BackgroundService::new(
            Arc::new(broker.clone()),
            Arc::new(broker.clone()),
            tx,
            Duration::from_millis(100),
        );
        (service, rx)
    }

    fn next(rx: &Receiver<Message>) -> Message {
        rx.recv_timeout(Duration::from_secs(5)).unwrap()
    }

    #[test]
    fn test_fetch_streams() {
        let broker = MemoryBroker::new();
        broker.create_stream("b").unwrap();
        broker.create_stream("a").unwrap();
        let (service, rx) = service(&broker);

        service.fetch_streams();
        match next(&rx) {
            Message::StreamsLoaded(Ok(streams)) => {
                let names: Vec<&str> = streams.iter().map(|s| s.name.as_str()).collect();
                assert_eq!(names, vec!["a", "b"]);
            }
            other => panic!("unexpected message: {other:?}"),
        }
    }

    #[test]
    fn test_create_then_duplicate() {
        let broker = MemoryBroker::new();
        let (service, rx) = service(&broker);

        service.create_stream("orders".to_string());
        assert!(matches!(
            next(&rx),
            Message::StreamCreated { result: Ok(()), .. }
        ));

        service.create_stream("orders".to_string());
        match next(&rx) {
            Message::StreamCreated { name, result: Err(err) } => {
                assert_eq!(name, "orders");
                assert!(err.contains("already exists"));
            }
            other => panic!("unexpected message: {other:?}"),
        }
    }

    #[test]
    fn test_delete_missing_stream_reports_error() {
        let broker = MemoryBroker::new();
        let (service, rx) = service(&broker);

        service.delete_stream("ghost".to_string());
        assert!(matches!(
            next(&rx),
            Message::StreamDeleted { result: Err(_), .. }
        ));
    }

    #[test]
    fn test_publish_reports_delivery() {
        let broker = MemoryBroker::new();
        broker.create_stream("orders").unwrap();
        let (service, rx) = service(&broker);

        service.publish(OutboundRecord {
            stream: "orders".to_string(),
            partition: Some(0),
            key: None,
            value: b"hello".to_vec(),
            headers: Vec::new(),
        });
        match next(&rx) {
            Message::PublishCompleted { stream, result: Ok(delivery) } => {
                assert_eq!(stream, "orders");
                assert_eq!(delivery.offset, 0);
            }
            other => panic!("unexpected message: {other:?}"),
        }
        assert_eq!(broker.record_count("orders"), Some(1));
    }

    #[test]
    fn test_export_writes_file() {
        let broker = MemoryBroker::new();
        broker.create_stream("orders").unwrap();
        let (service, rx) = service(&broker);
        let dir = tempdir().unwrap();
        let path = dir.path().join("orders.json");

        service.export("orders".to_string(), path.clone());
        match next(&rx) {
            Message::ExportCompleted { result: Ok(summary), .. } => {
                assert_eq!(summary.path, path);
                assert_eq!(summary.records, 0);
            }
            other => panic!("unexpected message: {other:?}"),
        }
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "[\n]");
    }
}
