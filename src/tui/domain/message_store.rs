use crate::schemas::Record;
use std::sync::Arc;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("index {index} out of range for store of {len} records")]
    OutOfRange { index: usize, len: usize },
}

/// Append-only buffer of every record received for one stream, in arrival
/// order. Records are shared with in-flight searches through `Arc`.
#[derive(Debug, Default, Clone)]
pub struct MessageStore {
    records: Vec<Arc<Record>>,
}

impl MessageStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, record: Record) {
        self.records.push(Arc::new(record));
    }

    pub fn append_batch(&mut self, batch: Vec<Record>) {
        self.records.reserve(batch.len());
        self.records.extend(batch.into_iter().map(Arc::new));
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn at(&self, index: usize) -> Result<&Arc<Record>, StoreError> {
        self.records.get(index).ok_or(StoreError::OutOfRange {
            index,
            len: self.records.len(),
        })
    }

    /// Point-in-time view for a search task. Later appends are not visible
    /// through it.
    pub fn snapshot(&self) -> Vec<Arc<Record>> {
        self.records.clone()
    }
}
