//! One-shot admin and producer operations run off the UI thread.

use crate::broker::{AdminClient, BrokerError, ClientFactory, ExportSummary};
use crate::schemas::{Delivery, OutboundRecord, StreamDetails};
use crate::tui::ui::events::Message;
use crossbeam::channel::Sender;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

/// Dispatches collaborator calls onto short-lived threads and posts each
/// outcome back into the UI inbox.
#[derive(Clone)]
pub struct BackgroundService {
    admin: Arc<dyn AdminClient>,
    clients: Arc<dyn ClientFactory>,
    inbox: Sender<Message>,
    export_timeout: Duration,
}

impl BackgroundService {
    pub fn new(
        admin: Arc<dyn AdminClient>,
        clients: Arc<dyn ClientFactory>,
        inbox: Sender<Message>,
        export_timeout: Duration,
    ) -> Self {
        Self {
            admin,
            clients,
            inbox,
            export_timeout,
        }
    }

    pub fn clients(&self) -> Arc<dyn ClientFactory> {
        Arc::clone(&self.clients)
    }

    fn spawn<F>(&self, task: F)
    where
        F: FnOnce() -> Message + Send + 'static,
    {
        let inbox = self.inbox.clone();
        thread::spawn(move || {
            let _ = inbox.send(task());
        });
    }

    pub fn fetch_streams(&self) {
        let admin = Arc::clone(&self.admin);
        self.spawn(move || Message::StreamsLoaded(list_streams(admin.as_ref())));
    }

    pub fn create_stream(&self, name: String) {
        let admin = Arc::clone(&self.admin);
        self.spawn(move || {
            let result = admin.create_stream(&name).map_err(|err| report("create stream", &err));
            Message::StreamCreated { name, result }
        });
    }

    pub fn delete_stream(&self, name: String) {
        let admin = Arc::clone(&self.admin);
        self.spawn(move || {
            let result = admin.delete_stream(&name).map_err(|err| report("delete stream", &err));
            Message::StreamDeleted { name, result }
        });
    }

    pub fn publish(&self, record: OutboundRecord) {
        let clients = Arc::clone(&self.clients);
        self.spawn(move || {
            let stream = record.stream.clone();
            let result = publish(clients.as_ref(), record).map_err(|err| report("publish", &err));
            Message::PublishCompleted { stream, result }
        });
    }

    pub fn export(&self, stream: String, path: PathBuf) {
        let clients = Arc::clone(&self.clients);
        let timeout = self.export_timeout;
        self.spawn(move || {
            let result = export(clients.as_ref(), &stream, &path, timeout)
                .map_err(|err| report("export", &err));
            Message::ExportCompleted { stream, result }
        });
    }
}

fn list_streams(admin: &dyn AdminClient) -> Result<Vec<StreamDetails>, String> {
    admin
        .list_streams()
        .map(|streams| streams.into_values().collect())
        .map_err(|err| report("list streams", &err))
}

fn publish(clients: &dyn ClientFactory, record: OutboundRecord) -> Result<Delivery, BrokerError> {
    let client = clients.connect()?;
    client.publish(record)
}

fn export(
    clients: &dyn ClientFactory,
    stream: &str,
    path: &Path,
    timeout: Duration,
) -> Result<ExportSummary, BrokerError> {
    let client = clients.connect()?;
    client.export_to_file(stream, path, timeout)
}

fn report(operation: &str, err: &BrokerError) -> String {
    tracing::error!(operation, error = %err, transient = err.is_transient(), "operation failed");
    err.to_string()
}
