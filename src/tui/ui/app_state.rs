use crate::config::BrowserConfig;
use crate::tui::domain::models::{BrowserMode, IngestionStatus};
use crate::tui::ui::browser::TopicBrowser;
use crate::tui::ui::commands::Command;
use crate::tui::ui::components::Component;
use crate::tui::ui::components::stream_list::StreamList;
use crate::tui::ui::events::Message;
use crate::tui::ui::overlay::{OverlayKind, OverlayManager};
use crate::tui::ui::toast::ToastManager;
use crossterm::event::{KeyCode, KeyEvent};
use std::collections::HashMap;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum View {
    StreamList,
    StreamDetail(String),
}

/// All UI state. Lives on the UI thread; background work only reaches it
/// through [`Message`]s.
pub struct AppState {
    pub view: View,
    pub config: BrowserConfig,
    pub stream_list: StreamList,
    /// One browser per stream ever opened, kept until shutdown
    pub browsers: HashMap<String, TopicBrowser>,
    pub overlay: OverlayManager,
    pub toasts: ToastManager,
}

impl AppState {
    pub fn new(bootstrap: impl Into<String>, config: BrowserConfig) -> Self {
        Self {
            view: View::StreamList,
            config,
            stream_list: StreamList::new(bootstrap),
            browsers: HashMap::new(),
            overlay: OverlayManager::new(),
            toasts: ToastManager::new(),
        }
    }

    pub fn browser(&self, stream: &str) -> Option<&TopicBrowser> {
        self.browsers.get(stream)
    }

    pub fn update(&mut self, msg: Message) -> Command {
        match msg {
            Message::Key(key) => self.handle_key(key),
            Message::Quit => Command::Quit,

            Message::OpenStream(stream) => self.open_stream(stream),
            Message::RefreshStreams => Command::FetchStreams,
            Message::OpenOverlay(kind) => self.open_overlay(kind),
            Message::CloseOverlay => {
                self.overlay.close();
                Command::None
            }

            Message::SubmitCreateStream(name) => {
                self.overlay.close();
                Command::CreateStream(name)
            }
            Message::SubmitDeleteStream(name) => {
                self.overlay.close();
                Command::DeleteStream(name)
            }
            Message::SubmitPublish(record) => {
                self.overlay.close();
                Command::Publish(record)
            }
            Message::SubmitExport { stream, path } => {
                self.overlay.close();
                self.toasts
                    .info("Download started...")
                    .and(Command::Export { stream, path })
            }
            Message::FormInvalid(reason) => {
                self.overlay.close();
                self.toasts.error(reason)
            }

            Message::StreamsLoaded(Ok(streams)) => {
                self.stream_list
                    .set_streams(streams.into_iter().map(|s| s.name).collect());
                Command::None
            }
            Message::StreamsLoaded(Err(err)) => {
                self.toasts.error(format!("Failed to list streams: {err}"))
            }
            Message::StreamCreated { name, result } => match result {
                Ok(()) => self
                    .toasts
                    .success(format!("Stream '{name}' created"))
                    .and(Command::FetchStreams),
                Err(err) => self.toasts.error(format!("Failed to create stream: {err}")),
            },
            Message::StreamDeleted { name, result } => match result {
                Ok(()) => self
                    .toasts
                    .success(format!("Stream '{name}' deleted"))
                    .and(Command::FetchStreams),
                Err(err) => self.toasts.error(format!("Failed to delete stream: {err}")),
            },
            Message::PublishCompleted { result, .. } => match result {
                Ok(_) => self.toasts.success("Message produced successfully!"),
                Err(err) => self.toasts.error(format!("Failed to produce message: {err}")),
            },
            Message::ExportCompleted { result, .. } => match result {
                Ok(_) => self.toasts.success("Download completed successfully!"),
                Err(err) => self.toasts.error(format!("Download failed: {err}")),
            },

            Message::RecordsReceived { stream, records } => {
                match self.browsers.get_mut(&stream) {
                    Some(browser) => browser.append_batch(records),
                    None => {
                        tracing::debug!(%stream, count = records.len(), "dropping batch for unknown stream")
                    }
                }
                Command::None
            }
            Message::IngestionStopped { stream, error } => {
                let Some(browser) = self.browsers.get_mut(&stream) else {
                    return Command::None;
                };
                match error {
                    None => {
                        browser.set_status(IngestionStatus::Ended);
                        Command::None
                    }
                    Some(err) => {
                        browser.set_status(IngestionStatus::Failed(err.clone()));
                        self.toasts
                            .error(format!("Consumer for '{stream}' stopped: {err}"))
                    }
                }
            }
            Message::SearchCompleted(response) => {
                match self.browsers.get_mut(&response.stream) {
                    Some(browser) => {
                        browser.apply_search(response);
                    }
                    None => {
                        tracing::debug!(stream = %response.stream, "dropping search result for unknown stream")
                    }
                }
                Command::None
            }

            Message::ToastExpired(id) => {
                self.toasts.expire(id);
                Command::None
            }
        }
    }

    /// Exactly one of overlay, stream browser or stream list gets the key.
    fn handle_key(&mut self, key: KeyEvent) -> Command {
        if self.overlay.is_active() {
            return match self.overlay.handle_key(key) {
                Some(msg) => self.update(msg),
                None => Command::None,
            };
        }

        if let View::StreamDetail(stream) = &self.view {
            let Some(browser) = self.browsers.get_mut(stream) else {
                if key.code == KeyCode::Esc {
                    self.view = View::StreamList;
                }
                return Command::None;
            };
            if key.code == KeyCode::Esc && browser.mode() == BrowserMode::Browsing {
                self.view = View::StreamList;
                return Command::None;
            }
            return browser.handle_key(key);
        }

        match self.stream_list.handle_key(key) {
            Some(msg) => self.update(msg),
            None => Command::None,
        }
    }

    fn open_stream(&mut self, stream: String) -> Command {
        self.view = View::StreamDetail(stream.clone());
        if self.browsers.contains_key(&stream) {
            return Command::None;
        }
        tracing::info!(%stream, "opening stream browser");
        self.browsers
            .insert(stream.clone(), TopicBrowser::new(stream.clone(), &self.config));
        Command::StartIngestion(stream)
    }

    fn open_overlay(&mut self, kind: OverlayKind) -> Command {
        let target = match &self.view {
            View::StreamDetail(stream) => Some(stream.clone()),
            View::StreamList => self.stream_list.selected_name().map(str::to_string),
        };
        match target {
            Some(stream) => self.overlay.open(kind, &stream),
            None if !kind.needs_stream() => self.overlay.open(kind, ""),
            None => return self.toasts.error("No stream selected"),
        }
        Command::None
    }
}
