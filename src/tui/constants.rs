//! Constants for the interactive browser
//!
//! Defaults for everything the CLI can override live here too, so the
//! config layer and the tests agree on one set of numbers.

// Ingestion
/// Largest batch handed from the relay to the UI in one message
pub const DEFAULT_MAX_BATCH: usize = 10_000;

/// Longest a non-empty batch waits before being flushed, in milliseconds
pub const DEFAULT_MAX_WAIT_MS: u64 = 100;

/// Capacity of the worker-to-relay record queue
pub const DEFAULT_QUEUE_CAPACITY: usize = 10_000;

// Browsing
/// Records per page in a stream browser
pub const DEFAULT_PAGE_SIZE: usize = 500;

/// Characters of a record value shown on a card before truncation
pub const DEFAULT_VALUE_PREVIEW_CHARS: usize = 200;

/// Rows taken by one message card, including its separator
pub const CARD_HEIGHT: u16 = 7;

/// Lines moved by PageUp/PageDown inside the viewport
pub const VIEWPORT_PAGE_LINES: usize = 20;

// Export
/// Time budget for a topic download, in seconds
pub const DEFAULT_EXPORT_TIMEOUT_SECS: u64 = 10;

// Timing
/// Event polling interval in milliseconds
pub const EVENT_POLL_INTERVAL_MS: u64 = 50;

/// Double Ctrl+C timeout in seconds
pub const DOUBLE_CTRL_C_TIMEOUT_SECS: u64 = 1;

/// Background completions applied per frame
pub const MAX_INBOX_MESSAGES_PER_TICK: usize = 64;

// Toasts
pub const SUCCESS_TOAST_MS: u64 = 3000;
pub const ERROR_TOAST_MS: u64 = 5000;
pub const INFO_TOAST_MS: u64 = 3000;

/// Gap between a toast and the frame edge
pub const TOAST_MARGIN_X: u16 = 2;
pub const TOAST_MARGIN_Y: u16 = 1;

// Forms
/// Maximum characters accepted by a form text field
pub const TEXT_FIELD_LIMIT: usize = 100;

/// Maximum width for modal dialogs
pub const DIALOG_MAX_WIDTH: u16 = 70;

/// Exit prompt shown after the first Ctrl+C
pub const EXIT_PROMPT: &str = "Press Ctrl+C again to exit";
