use anyhow::Result;
use crossbeam::channel::{self, Receiver, Sender};
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyModifiers, poll},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::collections::HashMap;
use std::io::{self, Stdout};
use std::time::{Duration, Instant};

use crate::broker::Connection;
use crate::config::BrowserConfig;

pub mod application;
pub mod constants;
pub mod domain;
pub mod ui;


use self::application::{
    background::BackgroundService,
    relay::{IngestionHandle, spawn_ingestion},
    search_service::start_search_worker,
};
use self::constants::{
    DOUBLE_CTRL_C_TIMEOUT_SECS, EVENT_POLL_INTERVAL_MS, EXIT_PROMPT, MAX_INBOX_MESSAGES_PER_TICK,
};
use self::domain::models::SearchRequest;
use self::ui::{app_state::AppState, commands::Command, events::Message, renderer};

/// The interactive stream browser: owns the terminal, the UI inbox and
/// every background thread started on behalf of the UI.
pub struct StreamBrowser {
    state: AppState,
    background: BackgroundService,
    inbox_sender: Sender<Message>,
    inbox: Receiver<Message>,
    search_sender: Sender<SearchRequest>,
    ingestion: HashMap<String, IngestionHandle>,
    /// Pending expiry of the visible toast: (toast id, deadline)
    toast_timer: Option<(u64, Instant)>,
    last_ctrl_c_press: Option<Instant>,
    should_quit: bool,
}

impl StreamBrowser {
    pub fn new(connection: &Connection, config: BrowserConfig) -> Self {
        let (inbox_sender, inbox) = channel::unbounded();
        let background = BackgroundService::new(
            connection.admin.clone(),
            connection.clients.clone(),
            inbox_sender.clone(),
            config.export_timeout,
        );
        let search_sender = start_search_worker(inbox_sender.clone());

        Self {
            state: AppState::new(connection.bootstrap.clone(), config),
            background,
            inbox_sender,
            inbox,
            search_sender,
            ingestion: HashMap::new(),
            toast_timer: None,
            last_ctrl_c_press: None,
            should_quit: false,
        }
    }

    pub fn run(&mut self) -> Result<()> {
        let mut terminal = self.setup_terminal()?;
        tracing::info!("browser started");

        self.execute_command(Command::FetchStreams);
        let result = self.run_app(&mut terminal);

        self.shutdown();
        self.cleanup_terminal(&mut terminal)?;
        result
    }

    fn setup_terminal(&self) -> Result<Terminal<CrosstermBackend<Stdout>>> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;
        Ok(terminal)
    }

    fn cleanup_terminal(&self, terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;
        Ok(())
    }

    fn run_app(&mut self, terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
        while !self.should_quit {
            terminal.draw(|f| renderer::render(f, &mut self.state))?;

            self.drain_inbox();
            self.check_toast_timer();
            if self.should_quit {
                break;
            }

            if poll(Duration::from_millis(EVENT_POLL_INTERVAL_MS))? {
                if let Event::Key(key) = event::read()? {
                    self.handle_input(key);
                }
            }
        }
        Ok(())
    }

    /// Apply pending background completions without blocking. Bounded per
    /// frame so a flood of batches cannot starve input handling.
    fn drain_inbox(&mut self) {
        for _ in 0..MAX_INBOX_MESSAGES_PER_TICK {
            match self.inbox.try_recv() {
                Ok(message) => self.handle_message(message),
                Err(_) => break,
            }
        }
    }

    fn check_toast_timer(&mut self) {
        if let Some((id, deadline)) = self.toast_timer {
            if Instant::now() >= deadline {
                self.toast_timer = None;
                self.handle_message(Message::ToastExpired(id));
            }
        }
    }

    fn handle_input(&mut self, key: KeyEvent) {
        // Global Ctrl+C handling for exit
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            if let Some(last_press) = self.last_ctrl_c_press {
                if last_press.elapsed() < Duration::from_secs(DOUBLE_CTRL_C_TIMEOUT_SECS) {
                    self.should_quit = true;
                    return;
                }
            }
            self.last_ctrl_c_press = Some(Instant::now());
            let command = self.state.toasts.info(EXIT_PROMPT);
            self.execute_command(command);
            return;
        }

        self.handle_message(Message::Key(key));
    }

    fn handle_message(&mut self, message: Message) {
        let command = self.state.update(message);
        self.execute_command(command);
    }

    fn execute_command(&mut self, command: Command) {
        match command {
            Command::None => {}
            Command::Batch(commands) => {
                for command in commands {
                    self.execute_command(command);
                }
            }
            Command::FetchStreams => self.background.fetch_streams(),
            Command::CreateStream(name) => self.background.create_stream(name),
            Command::DeleteStream(name) => self.background.delete_stream(name),
            Command::Publish(record) => self.background.publish(record),
            Command::Export { stream, path } => self.background.export(stream, path),
            Command::StartIngestion(stream) => {
                if !self.ingestion.contains_key(&stream) {
                    let handle = spawn_ingestion(
                        &stream,
                        self.background.clients(),
                        self.state.config.relay,
                        self.inbox_sender.clone(),
                    );
                    self.ingestion.insert(stream, handle);
                }
            }
            Command::ExecuteSearch(request) => {
                if self.search_sender.send(request).is_err() {
                    tracing::error!("search worker is gone");
                }
            }
            Command::ScheduleToastExpiry { id, after } => {
                self.toast_timer = Some((id, Instant::now() + after));
            }
            Command::Quit => self.should_quit = true,
        }
    }

    /// Cancel and join every ingestion worker.
    fn shutdown(&mut self) {
        if self.ingestion.is_empty() {
            return;
        }
        tracing::info!(streams = self.ingestion.len(), "stopping ingestion");
        // signal every worker before joining any of them
        for handle in self.ingestion.values() {
            handle.cancel();
        }
        for (_, handle) in self.ingestion.drain() {
            handle.shutdown();
        }
    }
}

impl Drop for StreamBrowser {
    fn drop(&mut self) {
        self.shutdown();
    }
}
