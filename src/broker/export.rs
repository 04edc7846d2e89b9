use super::{BrokerError, CancellationToken, RecordSink, StreamClient};
use crate::schemas::Record;
use chrono::SecondsFormat;
use serde::Serialize;
use std::borrow::Cow;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::thread;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportSummary {
    pub path: PathBuf,
    pub records: usize,
    /// The export stopped because its time budget ran out.
    pub timed_out: bool,
}

#[derive(Serialize)]
struct ExportRow<'a> {
    partition: i32,
    offset: i64,
    timestamp: String,
    key: Cow<'a, str>,
    value: Cow<'a, str>,
}

impl<'a> From<&'a Record> for ExportRow<'a> {
    fn from(record: &'a Record) -> Self {
        Self {
            partition: record.partition,
            offset: record.offset,
            timestamp: record.timestamp.to_rfc3339_opts(SecondsFormat::Secs, true),
            key: record.key_text(),
            value: record.value_text(),
        }
    }
}

/// Incremental writer for a JSON array of records.
///
/// The opening bracket is written on construction and every record is
/// written as soon as it arrives, so [`JsonArrayWriter::finish`] always
/// yields a syntactically closed array no matter when it is called.
pub struct JsonArrayWriter<W: Write> {
    out: W,
    written: usize,
    error: Option<io::Error>,
}

impl<W: Write> JsonArrayWriter<W> {
    pub fn new(mut out: W) -> io::Result<Self> {
        out.write_all(b"[")?;
        Ok(Self {
            out,
            written: 0,
            error: None,
        })
    }

    pub fn write_record(&mut self, record: &Record) -> io::Result<()> {
        let separator: &[u8] = if self.written == 0 { b"\n" } else { b",\n" };
        self.out.write_all(separator)?;
        serde_json::to_writer_pretty(&mut self.out, &ExportRow::from(record))?;
        self.written += 1;
        Ok(())
    }

    /// First write error swallowed by [`RecordSink::push`], if any.
    pub fn take_error(&mut self) -> Option<io::Error> {
        self.error.take()
    }

    /// Close the array and flush. Returns the number of records written.
    pub fn finish(mut self) -> io::Result<usize> {
        self.out.write_all(b"\n]")?;
        self.out.flush()?;
        Ok(self.written)
    }
}

impl<W: Write> RecordSink for JsonArrayWriter<W> {
    fn push(&mut self, record: Record) -> bool {
        match self.write_record(&record) {
            Ok(()) => true,
            Err(err) => {
                self.error = Some(err);
                false
            }
        }
    }
}

/// Consume `stream` from the start into a JSON array at `path`.
///
/// A watchdog cancels the consumer once `timeout` elapses; the array is
/// closed in every outcome before an error is returned.
pub fn export_stream<C: StreamClient + ?Sized>(
    client: &C,
    stream: &str,
    path: &Path,
    timeout: Duration,
) -> Result<ExportSummary, BrokerError> {
    let file = File::create(path)?;
    let mut writer = JsonArrayWriter::new(BufWriter::new(file))?;

    let cancel = CancellationToken::new();
    let watchdog = {
        let cancel = cancel.clone();
        thread::spawn(move || {
            if cancel.wait_timeout(timeout) {
                false
            } else {
                cancel.cancel();
                true
            }
        })
    };

    let consumed = client.consume(stream, &cancel, &mut writer);
    cancel.cancel();
    let timed_out = watchdog.join().unwrap_or(false);

    let write_error = writer.take_error();
    let records = writer.finish()?;
    if let Some(err) = write_error {
        return Err(err.into());
    }
    consumed?;

    tracing::info!(stream, path = %path.display(), records, timed_out, "export finished");
    Ok(ExportSummary {
        path: path.to_path_buf(),
        records,
        timed_out,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn record(offset: i64, key: Option<&str>, value: &str) -> Record {
        let mut record = Record::new(1, offset, value)
            .with_timestamp(Utc.with_ymd_and_hms(2024, 5, 1, 12, 30, 0).unwrap());
        record.key = key.map(|k| k.as_bytes().to_vec());
        record
    }

    #[test]
    fn test_records_form_valid_json_array() {
        let mut buffer = Vec::new();
        let mut writer = JsonArrayWriter::new(&mut buffer).unwrap();
        assert!(writer.push(record(0, Some("k0"), "first")));
        assert!(writer.push(record(1, None, "second")));
        assert_eq!(writer.finish().unwrap(), 2);

        let text = String::from_utf8(buffer).unwrap();
        assert!(text.starts_with("[\n{"));
        assert!(text.ends_with("}\n]"));

        let rows: Vec<serde_json::Value> = serde_json::from_str(&text).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0]["partition"], 1);
        assert_eq!(rows[0]["offset"], 0);
        assert_eq!(rows[0]["timestamp"], "2024-05-01T12:30:00Z");
        assert_eq!(rows[0]["key"], "k0");
        assert_eq!(rows[0]["value"], "first");
        assert_eq!(rows[1]["key"], "");
    }

    #[test]
    fn test_finish_without_records_is_empty_array() {
        let mut buffer = Vec::new();
        let writer = JsonArrayWriter::new(&mut buffer).unwrap();
        writer.finish().unwrap();
        assert_eq!(buffer, b"[\n]");
        let rows: Vec<serde_json::Value> = serde_json::from_slice(&buffer).unwrap();
        assert!(rows.is_empty());
    }
}
