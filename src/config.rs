use crate::tui::application::relay::RelayConfig;
use crate::tui::constants::{
    DEFAULT_EXPORT_TIMEOUT_SECS, DEFAULT_PAGE_SIZE, DEFAULT_VALUE_PREVIEW_CHARS,
};
use std::time::Duration;

/// Runtime settings of the interactive browser, resolved from the CLI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrowserConfig {
    /// Records per page. `0` means a single unbounded page.
    pub page_size: usize,
    pub relay: RelayConfig,
    pub export_timeout: Duration,
    pub value_preview_chars: usize,
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            relay: RelayConfig::default(),
            export_timeout: Duration::from_secs(DEFAULT_EXPORT_TIMEOUT_SECS),
            value_preview_chars: DEFAULT_VALUE_PREVIEW_CHARS,
        }
    }
}
