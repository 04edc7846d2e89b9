use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;

/// A single header attached to a record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordHeader {
    pub key: String,
    pub value: Vec<u8>,
}

impl RecordHeader {
    pub fn new(key: impl Into<String>, value: impl Into<Vec<u8>>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// One record consumed from a stream.
///
/// Records are produced once by an ingestion worker and never mutated after
/// they reach the message store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub partition: i32,
    pub offset: i64,
    pub timestamp: DateTime<Utc>,
    pub key: Option<Vec<u8>>,
    pub value: Vec<u8>,
    pub headers: Vec<RecordHeader>,
}

impl Record {
    pub fn new(partition: i32, offset: i64, value: impl Into<Vec<u8>>) -> Self {
        Self {
            partition,
            offset,
            timestamp: Utc::now(),
            key: None,
            value: value.into(),
            headers: Vec::new(),
        }
    }

    pub fn with_key(mut self, key: impl Into<Vec<u8>>) -> Self {
        self.key = Some(key.into());
        self
    }

    pub fn with_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = timestamp;
        self
    }

    /// Key decoded as UTF-8 (lossy). Empty when the record has no key.
    pub fn key_text(&self) -> Cow<'_, str> {
        match &self.key {
            Some(key) => String::from_utf8_lossy(key),
            None => Cow::Borrowed(""),
        }
    }

    /// Value decoded as UTF-8 (lossy).
    pub fn value_text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.value)
    }
}

/// A record on its way to the broker, built by the produce form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundRecord {
    pub stream: String,
    /// `None` lets the broker pick the partition.
    pub partition: Option<i32>,
    pub key: Option<Vec<u8>>,
    pub value: Vec<u8>,
    pub headers: Vec<RecordHeader>,
}

/// Broker acknowledgement of a published record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Delivery {
    pub partition: i32,
    pub offset: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreamDetails {
    pub name: String,
    pub partitions: i32,
    pub replication_factor: i16,
}
