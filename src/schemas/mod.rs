pub mod record;

pub use record::{Delivery, OutboundRecord, Record, RecordHeader, StreamDetails};
