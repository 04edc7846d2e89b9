pub mod broker;
pub mod config;
pub mod logging;
pub mod schemas;
pub mod tui;

pub use broker::{BrokerError, CancellationToken, Connection, MemoryBroker, connect};
pub use config::BrowserConfig;
pub use schemas::{Delivery, OutboundRecord, Record, RecordHeader, StreamDetails};
pub use tui::StreamBrowser;
