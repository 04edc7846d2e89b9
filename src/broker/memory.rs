//! In-process broker behind the `memory://` bootstrap address.
//!
//! Streams are partitioned append-only logs kept in memory. Consumers wait on
//! a condition variable for new records, re-checking their cancellation
//! token at a short interval.

use super::{AdminClient, BrokerError, CancellationToken, ClientFactory, RecordSink, StreamClient};
use crate::schemas::{Delivery, OutboundRecord, Record, StreamDetails};
use chrono::Utc;
use std::collections::BTreeMap;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::sync::{Arc, Condvar, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

const CONSUMER_WAKE_INTERVAL: Duration = Duration::from_millis(50);
const MAX_RECORDS_PER_PARTITION_FETCH: usize = 500;

#[derive(Clone)]
pub struct MemoryBroker {
    shared: Arc<Shared>,
}

struct Shared {
    state: Mutex<BrokerState>,
    changed: Condvar,
    default_partitions: i32,
}

#[derive(Default)]
struct BrokerState {
    streams: BTreeMap<String, MemoryStream>,
    next_incarnation: u64,
}

struct MemoryStream {
    /// Distinguishes a re-created stream from a deleted one of the same name.
    incarnation: u64,
    partitions: Vec<Vec<Record>>,
    next_partition: usize,
}

impl Default for MemoryBroker {
    fn default() -> Self {
        Self::with_default_partitions(1)
    }
}

impl MemoryBroker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_default_partitions(partitions: i32) -> Self {
        Self {
            shared: Arc::new(Shared {
                state: Mutex::new(BrokerState::default()),
                changed: Condvar::new(),
                default_partitions: partitions.max(1),
            }),
        }
    }

    /// Create a stream with an explicit partition count.
    pub fn create_stream_with_partitions(
        &self,
        name: &str,
        partitions: i32,
    ) -> Result<(), BrokerError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(BrokerError::Broker("stream name must not be empty".to_string()));
        }
        let mut state = self.shared.lock();
        if state.streams.contains_key(name) {
            return Err(BrokerError::AlreadyExists(name.to_string()));
        }
        state.next_incarnation += 1;
        let incarnation = state.next_incarnation;
        state.streams.insert(
            name.to_string(),
            MemoryStream {
                incarnation,
                partitions: vec![Vec::new(); partitions.max(1) as usize],
                next_partition: 0,
            },
        );
        tracing::debug!(stream = name, partitions, "created stream");
        Ok(())
    }

    /// Total number of records held for `stream`.
    pub fn record_count(&self, stream: &str) -> Option<usize> {
        let state = self.shared.lock();
        state
            .streams
            .get(stream)
            .map(|s| s.partitions.iter().map(Vec::len).sum())
    }
}

impl Shared {
    fn lock(&self) -> MutexGuard<'_, BrokerState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl AdminClient for MemoryBroker {
    fn list_streams(&self) -> Result<BTreeMap<String, StreamDetails>, BrokerError> {
        let state = self.shared.lock();
        Ok(state
            .streams
            .iter()
            .map(|(name, stream)| {
                (
                    name.clone(),
                    StreamDetails {
                        name: name.clone(),
                        partitions: stream.partitions.len() as i32,
                        replication_factor: 1,
                    },
                )
            })
            .collect())
    }

    fn create_stream(&self, name: &str) -> Result<(), BrokerError> {
        self.create_stream_with_partitions(name, self.shared.default_partitions)
    }

    fn delete_stream(&self, name: &str) -> Result<(), BrokerError> {
        let removed = self.shared.lock().streams.remove(name);
        match removed {
            Some(_) => {
                self.shared.changed.notify_all();
                tracing::debug!(stream = name, "deleted stream");
                Ok(())
            }
            None => Err(BrokerError::NotFound(name.to_string())),
        }
    }
}

impl ClientFactory for MemoryBroker {
    fn connect(&self) -> Result<Box<dyn StreamClient>, BrokerError> {
        Ok(Box::new(MemoryClient {
            shared: Arc::clone(&self.shared),
        }))
    }
}

/// Client handle scoped to one operation.
pub struct MemoryClient {
    shared: Arc<Shared>,
}

impl MemoryClient {
    /// Pull everything past `positions`, advancing them. `None` once the
    /// stream (this incarnation of it) is gone.
    fn fetch(
        state: &BrokerState,
        stream: &str,
        incarnation: u64,
        positions: &mut Vec<usize>,
    ) -> Option<Vec<Record>> {
        let log = state
            .streams
            .get(stream)
            .filter(|s| s.incarnation == incarnation)?;

        positions.resize(log.partitions.len(), 0);
        let mut fetched = Vec::new();
        for (partition, records) in log.partitions.iter().enumerate() {
            let start = positions[partition];
            let end = records.len().min(start + MAX_RECORDS_PER_PARTITION_FETCH);
            if start < end {
                fetched.extend_from_slice(&records[start..end]);
                positions[partition] = end;
            }
        }
        Some(fetched)
    }
}

impl StreamClient for MemoryClient {
    fn publish(&self, record: OutboundRecord) -> Result<Delivery, BrokerError> {
        let delivery = {
            let mut state = self.shared.lock();
            let log = state
                .streams
                .get_mut(&record.stream)
                .ok_or_else(|| BrokerError::NotFound(record.stream.clone()))?;

            let count = log.partitions.len();
            let partition = match record.partition {
                Some(p) if p >= 0 && (p as usize) < count => p as usize,
                Some(p) => {
                    return Err(BrokerError::Broker(format!(
                        "partition {p} out of range for '{}' ({count} partitions)",
                        record.stream
                    )));
                }
                None => match &record.key {
                    Some(key) => {
                        let mut hasher = DefaultHasher::new();
                        key.hash(&mut hasher);
                        (hasher.finish() % count as u64) as usize
                    }
                    None => {
                        let p = log.next_partition % count;
                        log.next_partition = log.next_partition.wrapping_add(1);
                        p
                    }
                },
            };

            let offset = log.partitions[partition].len() as i64;
            log.partitions[partition].push(Record {
                partition: partition as i32,
                offset,
                timestamp: Utc::now(),
                key: record.key,
                value: record.value,
                headers: record.headers,
            });
            Delivery {
                partition: partition as i32,
                offset,
            }
        };
        self.shared.changed.notify_all();
        Ok(delivery)
    }

    fn consume(
        &self,
        stream: &str,
        cancel: &CancellationToken,
        sink: &mut dyn RecordSink,
    ) -> Result<(), BrokerError> {
        let incarnation = {
            let state = self.shared.lock();
            state
                .streams
                .get(stream)
                .map(|s| s.incarnation)
                .ok_or_else(|| BrokerError::NotFound(stream.to_string()))?
        };
        let mut positions = Vec::new();

        loop {
            let batch = {
                let mut state = self.shared.lock();
                loop {
                    if cancel.is_cancelled() {
                        return Ok(());
                    }
                    match Self::fetch(&state, stream, incarnation, &mut positions) {
                        None => {
                            tracing::debug!(stream, "stream removed, ending consumer");
                            return Ok(());
                        }
                        Some(records) if !records.is_empty() => break records,
                        Some(_) => {}
                    }
                    let (guard, _) = self
                        .shared
                        .changed
                        .wait_timeout(state, CONSUMER_WAKE_INTERVAL)
                        .unwrap_or_else(PoisonError::into_inner);
                    state = guard;
                }
            };

            for record in batch {
                if !sink.push(record) {
                    return Ok(());
                }
            }
        }
    }
}
