use crate::broker::ExportSummary;
use crate::schemas::{Delivery, OutboundRecord, Record, StreamDetails};
use crate::tui::domain::models::SearchResponse;
use crate::tui::ui::overlay::OverlayKind;
use crossterm::event::KeyEvent;
use std::path::PathBuf;

#[derive(Clone, Debug)]
pub enum Message {
    // Terminal events
    Key(KeyEvent),
    Quit,

    // Navigation
    OpenStream(String),
    RefreshStreams,
    OpenOverlay(OverlayKind),
    CloseOverlay,

    // Form submissions
    SubmitCreateStream(String),
    SubmitDeleteStream(String),
    SubmitPublish(OutboundRecord),
    SubmitExport { stream: String, path: PathBuf },
    FormInvalid(String),

    // Background completions
    StreamsLoaded(Result<Vec<StreamDetails>, String>),
    StreamCreated { name: String, result: Result<(), String> },
    StreamDeleted { name: String, result: Result<(), String> },
    PublishCompleted { stream: String, result: Result<Delivery, String> },
    ExportCompleted { stream: String, result: Result<ExportSummary, String> },
    RecordsReceived { stream: String, records: Vec<Record> },
    IngestionStopped { stream: String, error: Option<String> },
    SearchCompleted(SearchResponse),

    // Timers
    ToastExpired(u64),
}
