//! Boundary between the browser core and the backing stream system.
//!
//! The core only ever talks to the backing system through these traits.
//! Every call is blocking; the TUI runs them on background threads and
//! reports completions back into its inbox.

pub mod cancel;
pub mod error;
pub mod export;
pub mod memory;
pub mod seed;

use crate::schemas::{Delivery, OutboundRecord, Record, StreamDetails};
use crossbeam::channel::Sender;
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

pub use cancel::CancellationToken;
pub use error::BrokerError;
pub use export::{ExportSummary, JsonArrayWriter};
pub use memory::MemoryBroker;

/// Destination for records pulled by [`StreamClient::consume`].
pub trait RecordSink {
    /// Hand one record to the sink. Returns `false` when the sink will not
    /// accept more records; the consumer must then stop.
    fn push(&mut self, record: Record) -> bool;
}

impl RecordSink for Vec<Record> {
    fn push(&mut self, record: Record) -> bool {
        Vec::push(self, record);
        true
    }
}

/// Sink feeding a bounded inter-thread queue.
///
/// A full queue blocks the producing worker, but never past cancellation.
pub struct ChannelSink {
    sender: Sender<Record>,
    cancel: CancellationToken,
}

impl ChannelSink {
    pub fn new(sender: Sender<Record>, cancel: CancellationToken) -> Self {
        Self { sender, cancel }
    }
}

impl RecordSink for ChannelSink {
    fn push(&mut self, record: Record) -> bool {
        if self.cancel.is_cancelled() {
            return false;
        }
        crossbeam::select! {
            send(self.sender, record) -> sent => sent.is_ok(),
            recv(self.cancel.signal()) -> _ => false,
        }
    }
}

/// Administrative operations. Shared read-mostly by the whole application.
pub trait AdminClient: Send + Sync {
    fn list_streams(&self) -> Result<BTreeMap<String, StreamDetails>, BrokerError>;
    fn create_stream(&self, name: &str) -> Result<(), BrokerError>;
    fn delete_stream(&self, name: &str) -> Result<(), BrokerError>;
}

/// A dedicated producer/consumer client, scoped to a single operation.
pub trait StreamClient: Send {
    fn publish(&self, record: OutboundRecord) -> Result<Delivery, BrokerError>;

    /// Pull records from the start of `stream` into `sink` until the token
    /// fires, the sink refuses a record, or the stream ends. Cancellation is
    /// not an error.
    fn consume(
        &self,
        stream: &str,
        cancel: &CancellationToken,
        sink: &mut dyn RecordSink,
    ) -> Result<(), BrokerError>;

    /// Dump `stream` into a JSON array file, giving up after `timeout`.
    fn export_to_file(
        &self,
        stream: &str,
        path: &Path,
        timeout: Duration,
    ) -> Result<ExportSummary, BrokerError> {
        export::export_stream(self, stream, path, timeout)
    }
}

/// Opens dedicated [`StreamClient`]s.
pub trait ClientFactory: Send + Sync {
    fn connect(&self) -> Result<Box<dyn StreamClient>, BrokerError>;
}

/// Handles produced by [`connect`].
#[derive(Clone)]
pub struct Connection {
    pub bootstrap: String,
    pub admin: Arc<dyn AdminClient>,
    pub clients: Arc<dyn ClientFactory>,
}

pub const MEMORY_SCHEME: &str = "memory://";

/// Resolve a bootstrap address to collaborator handles.
///
/// Only the in-process `memory://` transport is built in.
pub fn connect(bootstrap: &str, default_partitions: i32) -> Result<Connection, BrokerError> {
    let bootstrap = bootstrap.trim();
    if bootstrap.starts_with(MEMORY_SCHEME) {
        let broker = MemoryBroker::with_default_partitions(default_partitions);
        tracing::info!(bootstrap, default_partitions, "using in-memory broker");
        return Ok(Connection {
            bootstrap: bootstrap.to_string(),
            admin: Arc::new(broker.clone()),
            clients: Arc::new(broker),
        });
    }

    Err(BrokerError::Connection(format!(
        "unsupported bootstrap address '{bootstrap}' (expected {MEMORY_SCHEME}<name>)"
    )))
}
