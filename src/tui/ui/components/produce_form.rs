use crate::schemas::{OutboundRecord, RecordHeader};
use crate::tui::constants::TEXT_FIELD_LIMIT;
use crate::tui::ui::components::text_input::TextInput;
use crate::tui::ui::components::{Component, dialog_area, help_style, label_style, render_dialog_frame};
use crate::tui::ui::events::Message;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    Frame,
    layout::Rect,
    text::{Line, Span},
    widgets::Paragraph,
};
use thiserror::Error;

pub const FIELD_LABELS: [&str; 6] = [
    "Partition",
    "Key encoding",
    "Value encoding",
    "Key",
    "Value",
    "Headers",
];

const PARTITION: usize = 0;
const KEY_ENCODING: usize = 1;
const VALUE_ENCODING: usize = 2;
const KEY: usize = 3;
const VALUE: usize = 4;
const HEADERS: usize = 5;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ProduceError {
    #[error("invalid partition '{0}' (expected a non-negative integer)")]
    InvalidPartition(String),

    #[error("unknown encoding '{0}' (expected string, json or base64)")]
    UnknownEncoding(String),

    #[error("{field} is not valid JSON: {reason}")]
    InvalidJson { field: &'static str, reason: String },

    #[error("{field} is not valid base64: {reason}")]
    InvalidBase64 { field: &'static str, reason: String },

    #[error("invalid header '{0}' (expected key=value)")]
    InvalidHeader(String),

    #[error("value must not be empty")]
    EmptyValue,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Encoding {
    Utf8,
    Json,
    Base64,
}

impl Encoding {
    pub fn parse(name: &str) -> Result<Self, ProduceError> {
        match name.trim().to_ascii_lowercase().as_str() {
            "" | "string" | "utf8" | "utf-8" | "text" => Ok(Encoding::Utf8),
            "json" => Ok(Encoding::Json),
            "base64" => Ok(Encoding::Base64),
            other => Err(ProduceError::UnknownEncoding(other.to_string())),
        }
    }

    /// Turn the typed text into payload bytes.
    pub fn encode(self, field: &'static str, text: &str) -> Result<Vec<u8>, ProduceError> {
        match self {
            Encoding::Utf8 => Ok(text.as_bytes().to_vec()),
            Encoding::Json => {
                let value: serde_json::Value =
                    serde_json::from_str(text).map_err(|err| ProduceError::InvalidJson {
                        field,
                        reason: err.to_string(),
                    })?;
                Ok(value.to_string().into_bytes())
            }
            Encoding::Base64 => {
                STANDARD
                    .decode(text.trim())
                    .map_err(|err| ProduceError::InvalidBase64 {
                        field,
                        reason: err.to_string(),
                    })
            }
        }
    }
}

/// Parse `k1=v1,k2=v2`. Blank entries are skipped.
pub fn parse_headers(text: &str) -> Result<Vec<RecordHeader>, ProduceError> {
    text.split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(|entry| match entry.split_once('=') {
            Some((key, value)) if !key.trim().is_empty() => {
                Ok(RecordHeader::new(key.trim(), value.trim()))
            }
            _ => Err(ProduceError::InvalidHeader(entry.to_string())),
        })
        .collect()
}

/// The form's raw field values, in focus order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProduceValues {
    pub partition: String,
    pub key_encoding: String,
    pub value_encoding: String,
    pub key: String,
    pub value: String,
    pub headers: String,
}

impl ProduceValues {
    pub fn build_record(&self, stream: &str) -> Result<OutboundRecord, ProduceError> {
        let partition = match self.partition.trim() {
            "" => None,
            text => Some(
                text.parse::<i32>()
                    .ok()
                    .filter(|p| *p >= 0)
                    .ok_or_else(|| ProduceError::InvalidPartition(text.to_string()))?,
            ),
        };

        let key_encoding = Encoding::parse(&self.key_encoding)?;
        let value_encoding = Encoding::parse(&self.value_encoding)?;

        let key = if self.key.is_empty() {
            None
        } else {
            Some(key_encoding.encode("key", &self.key)?)
        };

        if self.value.trim().is_empty() {
            return Err(ProduceError::EmptyValue);
        }
        let value = value_encoding.encode("value", &self.value)?;

        Ok(OutboundRecord {
            stream: stream.to_string(),
            partition,
            key,
            value,
            headers: parse_headers(&self.headers)?,
        })
    }
}

#[derive(Debug, Clone)]
pub struct ProduceForm {
    stream: String,
    fields: Vec<TextInput>,
    focused: usize,
}

impl ProduceForm {
    pub fn new(stream: impl Into<String>) -> Self {
        let fields = (0..FIELD_LABELS.len())
            .map(|i| {
                if i == VALUE {
                    TextInput::new()
                } else {
                    TextInput::with_limit(TEXT_FIELD_LIMIT)
                }
            })
            .collect();
        Self {
            stream: stream.into(),
            fields,
            focused: PARTITION,
        }
    }

    pub fn stream(&self) -> &str {
        &self.stream
    }

    pub fn focused(&self) -> usize {
        self.focused
    }

    pub fn values(&self) -> ProduceValues {
        let text = |i: usize| self.fields[i].text().to_string();
        ProduceValues {
            partition: text(PARTITION),
            key_encoding: text(KEY_ENCODING),
            value_encoding: text(VALUE_ENCODING),
            key: text(KEY),
            value: text(VALUE),
            headers: text(HEADERS),
        }
    }

    fn focus_next(&mut self) {
        self.focused = (self.focused + 1) % self.fields.len();
    }

    fn focus_prev(&mut self) {
        self.focused = (self.focused + self.fields.len() - 1) % self.fields.len();
    }
}

impl Component for ProduceForm {
    fn render(&mut self, f: &mut Frame, area: Rect) {
        let area = dialog_area(area, 2 * FIELD_LABELS.len() as u16 + 6);
        let inner = render_dialog_frame(f, area, &format!("Produce message to {}", self.stream));

        let mut lines = vec![Line::from("")];
        for (i, (label, field)) in FIELD_LABELS.iter().zip(&self.fields).enumerate() {
            let focused = i == self.focused;
            let marker = if focused { "▸ " } else { "  " };
            lines.push(Line::from(Span::styled(
                format!("{marker}{label}"),
                label_style(focused),
            )));
            let mut input = vec![Span::raw("    ")];
            input.extend(field.render_cursor_spans(focused));
            lines.push(Line::from(input));
        }
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "enter: produce message • esc: cancel • tab: switch focus",
            help_style(),
        )));
        f.render_widget(Paragraph::new(lines), inner);
    }

    fn handle_key(&mut self, key: KeyEvent) -> Option<Message> {
        match key.code {
            KeyCode::Tab => self.focus_next(),
            KeyCode::BackTab => self.focus_prev(),
            KeyCode::Enter => {
                return Some(match self.values().build_record(&self.stream) {
                    Ok(record) => Message::SubmitPublish(record),
                    Err(err) => Message::FormInvalid(format!("Cannot produce message: {err}")),
                });
            }
            _ => {
                self.fields[self.focused].handle_key(key);
            }
        }
        None
    }
}
