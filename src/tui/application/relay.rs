use crate::broker::{BrokerError, CancellationToken, ChannelSink, ClientFactory};
use crate::schemas::Record;
use crate::tui::constants::{DEFAULT_MAX_BATCH, DEFAULT_MAX_WAIT_MS, DEFAULT_QUEUE_CAPACITY};
use crate::tui::ui::events::Message;
use crossbeam::channel::{self, Receiver, Sender};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RelayConfig {
    pub max_batch: usize,
    pub max_wait: Duration,
    pub queue_capacity: usize,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            max_batch: DEFAULT_MAX_BATCH,
            max_wait: Duration::from_millis(DEFAULT_MAX_WAIT_MS),
            queue_capacity: DEFAULT_QUEUE_CAPACITY,
        }
    }
}

#[derive(Debug, PartialEq, Eq)]
pub enum RelayPoll {
    Batch(Vec<Record>),
    /// No more batches will follow.
    Closed,
}

/// Turns a queue of single records into size- and time-bounded batches.
///
/// The relay only ever receives; the queue is closed by the worker dropping
/// its sender.
pub struct BatchingRelay {
    receiver: Receiver<Record>,
    cancel: CancellationToken,
    max_batch: usize,
    max_wait: Duration,
    closed: bool,
}

impl BatchingRelay {
    pub fn new(receiver: Receiver<Record>, cancel: CancellationToken, config: RelayConfig) -> Self {
        Self {
            receiver,
            cancel,
            max_batch: config.max_batch.max(1),
            max_wait: config.max_wait,
            closed: false,
        }
    }

    /// Block until the next batch is ready or the relay terminates.
    ///
    /// An idle relay parks on the queue; the max-wait timer is armed by the
    /// first record of a batch. A closed queue flushes what was accumulated
    /// before reporting [`RelayPoll::Closed`] on the following poll;
    /// cancellation drops the partial batch.
    pub fn next_batch(&mut self) -> RelayPoll {
        if self.closed {
            return RelayPoll::Closed;
        }

        let mut batch = Vec::new();
        let mut deadline: Option<Instant> = None;
        loop {
            if self.cancel.is_cancelled() {
                self.closed = true;
                return RelayPoll::Closed;
            }

            let received = if batch.is_empty() {
                crossbeam::select! {
                    recv(self.receiver) -> received => Some(received),
                    recv(self.cancel.signal()) -> _ => None,
                }
            } else {
                let timeout = deadline
                    .map_or(Duration::ZERO, |d| d.saturating_duration_since(Instant::now()));
                crossbeam::select! {
                    recv(self.receiver) -> received => Some(received),
                    recv(self.cancel.signal()) -> _ => None,
                    default(timeout) => return RelayPoll::Batch(batch),
                }
            };

            match received {
                Some(Ok(record)) => {
                    if batch.is_empty() {
                        deadline = Some(Instant::now() + self.max_wait);
                    }
                    batch.push(record);
                    if batch.len() >= self.max_batch {
                        return RelayPoll::Batch(batch);
                    }
                }
                Some(Err(_)) => {
                    self.closed = true;
                    return if batch.is_empty() {
                        RelayPoll::Closed
                    } else {
                        RelayPoll::Batch(batch)
                    };
                }
                None => {
                    self.closed = true;
                    return RelayPoll::Closed;
                }
            }
        }
    }
}

/// Background threads feeding one stream's browser.
pub struct IngestionHandle {
    stream: String,
    cancel: CancellationToken,
    forwarder: Option<JoinHandle<()>>,
}

impl IngestionHandle {
    pub fn stream(&self) -> &str {
        &self.stream
    }

    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    /// Cancel and wait for both threads to exit.
    pub fn shutdown(mut self) {
        self.cancel.cancel();
        if let Some(forwarder) = self.forwarder.take() {
            if forwarder.join().is_err() {
                tracing::error!(stream = %self.stream, "relay thread panicked");
            }
        }
    }
}

/// Start consuming `stream` on a dedicated client and relay its records into
/// `inbox` as [`Message::RecordsReceived`] batches, finishing with one
/// [`Message::IngestionStopped`].
pub fn spawn_ingestion(
    stream: &str,
    clients: Arc<dyn ClientFactory>,
    config: RelayConfig,
    inbox: Sender<Message>,
) -> IngestionHandle {
    let cancel = CancellationToken::new();
    let (sender, receiver) = channel::bounded(config.queue_capacity.max(1));

    let worker = {
        let stream = stream.to_string();
        let cancel = cancel.clone();
        thread::spawn(move || -> Result<(), BrokerError> {
            let client = clients.connect()?;
            let mut sink = ChannelSink::new(sender, cancel.clone());
            client.consume(&stream, &cancel, &mut sink)
            // sink (and with it the queue's only sender) drops here
        })
    };

    let forwarder = {
        let stream = stream.to_string();
        let cancel = cancel.clone();
        thread::spawn(move || {
            let mut relay = BatchingRelay::new(receiver, cancel.clone(), config);
            while let RelayPoll::Batch(records) = relay.next_batch() {
                let message = Message::RecordsReceived {
                    stream: stream.clone(),
                    records,
                };
                if inbox.send(message).is_err() {
                    break;
                }
            }
            // the worker may still be parked waiting for data
            cancel.cancel();
            drop(relay);

            let error = match worker.join() {
                Ok(Ok(())) => None,
                Ok(Err(err)) => {
                    tracing::error!(stream = %stream, error = %err, "consumer failed");
                    Some(err.to_string())
                }
                Err(_) => Some("consumer thread panicked".to_string()),
            };
            tracing::info!(stream = %stream, "ingestion stopped");
            let _ = inbox.send(Message::IngestionStopped { stream, error });
        })
    };

    tracing::info!(stream, "ingestion started");
    IngestionHandle {
        stream: stream.to_string(),
        cancel,
        forwarder: Some(forwarder),
    }
}
