use crate::schemas::Record;
use std::sync::Arc;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum BrowserMode {
    Browsing,
    SearchEditing,
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub enum IngestionStatus {
    Running,
    Ended,
    Failed(String),
}

// Search request and response for async communication
#[derive(Clone, Debug)]
pub struct SearchRequest {
    pub id: u64,
    pub stream: String,
    pub query: String,
    pub records: Vec<Arc<Record>>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchResponse {
    pub id: u64,
    pub stream: String,
    pub query: String,
    /// Store indices, best match first.
    pub hits: Vec<usize>,
}
