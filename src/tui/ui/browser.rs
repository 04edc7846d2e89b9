use crate::config::BrowserConfig;
use crate::schemas::Record;
use crate::tui::constants::CARD_HEIGHT;
use crate::tui::domain::message_store::MessageStore;
use crate::tui::domain::models::{BrowserMode, IngestionStatus, SearchRequest, SearchResponse};
use crate::tui::domain::pagination::Pager;
use crate::tui::ui::commands::Command;
use crate::tui::ui::components::text_input::TextInput;
use crate::tui::ui::components::viewport::Viewport;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

/// Per-stream browsing state: the buffered records, the page being shown,
/// the active search and the scroll position inside the page.
///
/// One browser exists per opened stream for the lifetime of the app, so
/// leaving and re-opening a stream lands on exactly the same state.
#[derive(Debug)]
pub struct TopicBrowser {
    stream: String,
    store: MessageStore,
    pager: Pager,
    mode: BrowserMode,
    search_input: TextInput,
    /// Query of the current search; empty when none is active
    active_query: String,
    /// Bumped on every submit and clear so late results can be recognised
    search_id: u64,
    /// `None` while the current search is still running
    results: Option<Vec<usize>>,
    viewport: Viewport,
    status: IngestionStatus,
    preview_chars: usize,
}

impl TopicBrowser {
    pub fn new(stream: impl Into<String>, config: &BrowserConfig) -> Self {
        Self {
            stream: stream.into(),
            store: MessageStore::new(),
            pager: Pager::new(config.page_size),
            mode: BrowserMode::Browsing,
            search_input: TextInput::new(),
            active_query: String::new(),
            search_id: 0,
            results: None,
            viewport: Viewport::new(),
            status: IngestionStatus::Running,
            preview_chars: config.value_preview_chars,
        }
    }

    pub fn stream(&self) -> &str {
        &self.stream
    }

    pub fn mode(&self) -> BrowserMode {
        self.mode
    }

    pub fn store(&self) -> &MessageStore {
        &self.store
    }

    pub fn active_query(&self) -> &str {
        &self.active_query
    }

    pub fn search_input(&self) -> &str {
        self.search_input.text()
    }

    pub fn is_searching(&self) -> bool {
        !self.active_query.is_empty() && self.results.is_none()
    }

    pub fn status(&self) -> &IngestionStatus {
        &self.status
    }

    pub fn set_status(&mut self, status: IngestionStatus) {
        self.status = status;
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn current_page(&self) -> usize {
        self.pager.current()
    }

    pub fn total_pages(&self) -> usize {
        self.pager.total(self.active_len())
    }

    /// Length of the active set: the search results while a query is
    /// active (nothing while it runs), the whole buffer otherwise.
    pub fn active_len(&self) -> usize {
        if self.active_query.is_empty() {
            self.store.len()
        } else {
            self.results.as_ref().map_or(0, Vec::len)
        }
    }

    /// Store indices shown on the current page, in display order.
    pub fn page_indices(&self) -> Vec<usize> {
        let (start, end) = self.pager.window(self.active_len());
        if self.active_query.is_empty() {
            (start..end).collect()
        } else {
            match &self.results {
                Some(hits) => hits[start..end].to_vec(),
                None => Vec::new(),
            }
        }
    }

    pub fn append_batch(&mut self, records: Vec<Record>) {
        self.store.append_batch(records);
    }

    /// Accept a finished search if it still belongs to the current query.
    /// Returns `false` for stale results, which are dropped.
    pub fn apply_search(&mut self, response: SearchResponse) -> bool {
        if response.id != self.search_id
            || response.query != self.active_query
            || self.active_query.is_empty()
        {
            tracing::debug!(
                stream = %self.stream,
                id = response.id,
                current = self.search_id,
                "dropping stale search result"
            );
            return false;
        }
        self.results = Some(response.hits);
        self.pager.clamp(self.active_len());
        true
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Command {
        match self.mode {
            BrowserMode::SearchEditing => self.handle_search_key(key),
            BrowserMode::Browsing => self.handle_browse_key(key),
        }
    }

    fn handle_search_key(&mut self, key: KeyEvent) -> Command {
        match key.code {
            KeyCode::Enter => {
                self.mode = BrowserMode::Browsing;
                self.submit_search()
            }
            KeyCode::Esc => {
                self.search_input.set_text(self.active_query.clone());
                self.mode = BrowserMode::Browsing;
                Command::None
            }
            _ => {
                self.search_input.handle_key(key);
                Command::None
            }
        }
    }

    fn handle_browse_key(&mut self, key: KeyEvent) -> Command {
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            self.viewport.handle_key(key);
            return Command::None;
        }

        match key.code {
            KeyCode::Char('/') => {
                self.search_input.set_text(self.active_query.clone());
                self.mode = BrowserMode::SearchEditing;
            }
            KeyCode::Char('c') => {
                if !self.active_query.is_empty() {
                    self.search_input.clear();
                    self.clear_search();
                }
            }
            KeyCode::Char('n') => {
                if self.pager.next(self.active_len()) {
                    self.viewport.goto_top();
                }
            }
            KeyCode::Char('p') => {
                if self.pager.prev() {
                    self.viewport.goto_top();
                }
            }
            KeyCode::Char('g') => self.viewport.goto_top(),
            KeyCode::Char('G') => self.viewport.goto_bottom(),
            _ => {
                self.viewport.handle_key(key);
            }
        }
        Command::None
    }

    fn submit_search(&mut self) -> Command {
        let query = self.search_input.text().trim().to_string();
        if query.is_empty() {
            self.search_input.clear();
            self.clear_search();
            return Command::None;
        }

        self.search_id += 1;
        self.active_query = query.clone();
        self.results = None;
        self.pager.reset();
        self.viewport.goto_top();
        tracing::debug!(stream = %self.stream, id = self.search_id, %query, "search submitted");

        Command::ExecuteSearch(SearchRequest {
            id: self.search_id,
            stream: self.stream.clone(),
            query,
            records: self.store.snapshot(),
        })
    }

    fn clear_search(&mut self) {
        self.search_id += 1;
        self.active_query.clear();
        self.results = None;
        self.pager.reset();
        self.viewport.goto_top();
    }

    pub fn render(&mut self, f: &mut Frame, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // Header
                Constraint::Length(1), // Search bar
                Constraint::Min(0),    // Cards
                Constraint::Length(1), // Footer
            ])
            .split(area);

        let len = self.active_len();
        self.pager.clamp(len);

        self.render_header(f, chunks[0]);
        self.render_search_bar(f, chunks[1]);
        self.render_cards(f, chunks[2]);
        self.render_footer(f, chunks[3]);
    }

    fn render_header(&self, f: &mut Frame, area: Rect) {
        let mut text = format!("{} • {} total", self.stream, self.store.len());
        if !self.active_query.is_empty() {
            text.push_str(&format!(" • {} filtered", self.active_len()));
        }
        text.push_str(&format!(
            " • Page {}/{}",
            self.pager.current() + 1,
            self.total_pages()
        ));
        let header = Paragraph::new(text).style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        );
        f.render_widget(header, area);
    }

    fn render_search_bar(&self, f: &mut Frame, area: Rect) {
        let line = match self.mode {
            BrowserMode::SearchEditing => {
                let mut spans = vec![Span::styled("Search: ", Style::default().fg(Color::Yellow))];
                spans.extend(self.search_input.render_cursor_spans(true));
                Line::from(spans)
            }
            BrowserMode::Browsing if !self.active_query.is_empty() => Line::from(vec![
                Span::styled("Search: ", Style::default().fg(Color::Yellow)),
                Span::raw(self.active_query.as_str()),
            ]),
            BrowserMode::Browsing => Line::from(Span::styled(
                "Press / to search",
                Style::default().fg(Color::DarkGray),
            )),
        };
        f.render_widget(Paragraph::new(line), area);
    }

    fn render_cards(&mut self, f: &mut Frame, area: Rect) {
        let block = Block::default().borders(Borders::ALL);
        let inner = block.inner(area);
        f.render_widget(block, area);

        let placeholder = if self.store.is_empty() {
            Some("Waiting for messages...".to_string())
        } else if self.is_searching() {
            Some("Searching…".to_string())
        } else if !self.active_query.is_empty() && self.active_len() == 0 {
            Some(format!("No messages found matching '{}'", self.active_query))
        } else {
            None
        };
        if let Some(text) = placeholder {
            self.viewport.set_dimensions(0, inner.height as usize);
            f.render_widget(
                Paragraph::new(text).style(Style::default().fg(Color::DarkGray)),
                inner,
            );
            return;
        }

        let indices = self.page_indices();
        let card_height = CARD_HEIGHT as usize;
        self.viewport
            .set_dimensions(indices.len() * card_height, inner.height as usize);

        // Only build the cards that intersect the visible rows.
        let offset = self.viewport.offset();
        let first_card = offset / card_height;
        let visible_cards = (inner.height as usize).div_ceil(card_height) + 1;

        let mut lines = Vec::new();
        for &index in indices.iter().skip(first_card).take(visible_cards) {
            let Ok(record) = self.store.at(index) else {
                continue;
            };
            lines.extend(card_lines(index + 1, record, self.preview_chars));
        }

        let scroll = (offset % card_height) as u16;
        f.render_widget(Paragraph::new(lines).scroll((scroll, 0)), inner);
    }

    fn render_footer(&self, f: &mut Frame, area: Rect) {
        let help = "/: search • c: clear • n/p: page • g/G: top/bottom • ↑/↓: scroll • esc: back";
        let percent = (self.viewport.scroll_percent() * 100.0).round() as u32;
        let status = match &self.status {
            IngestionStatus::Running => Span::styled("● live", Style::default().fg(Color::Green)),
            IngestionStatus::Ended => Span::styled("ended", Style::default().fg(Color::Gray)),
            IngestionStatus::Failed(err) => {
                Span::styled(format!("failed: {err}"), Style::default().fg(Color::Red))
            }
        };
        let line = Line::from(vec![
            Span::styled(help, Style::default().fg(Color::DarkGray)),
            Span::styled(format!(" • {percent}% • "), Style::default().fg(Color::DarkGray)),
            status,
        ]);
        f.render_widget(Paragraph::new(line), area);
    }
}

/// The `CARD_HEIGHT` lines describing one record.
fn card_lines(number: usize, record: &Record, preview_chars: usize) -> Vec<Line<'static>> {
    let label = Style::default().fg(Color::Yellow);
    let key = flatten_control(&record.key_text());
    let key = if key.is_empty() {
        "(null)".to_string()
    } else {
        key
    };
    let value = truncate_chars(&flatten_control(&record.value_text()), preview_chars);

    vec![
        Line::from(Span::styled(
            format!("Message #{number}"),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(vec![
            Span::styled("  Timestamp: ", label),
            Span::raw(record.timestamp.format("%Y-%m-%d %H:%M:%S").to_string()),
        ]),
        Line::from(vec![
            Span::styled("  Partition: ", label),
            Span::raw(record.partition.to_string()),
        ]),
        Line::from(vec![
            Span::styled("  Offset: ", label),
            Span::raw(record.offset.to_string()),
        ]),
        Line::from(vec![Span::styled("  Key: ", label), Span::raw(key)]),
        Line::from(vec![Span::styled("  Value: ", label), Span::raw(value)]),
        Line::default(),
    ]
}

/// Replace control characters (newlines, tabs, escapes) with spaces so a
/// value always stays on its card line.
pub fn flatten_control(text: &str) -> String {
    text.chars()
        .map(|c| if c.is_control() { ' ' } else { c })
        .collect()
}

/// Cut `text` to `max` characters, marking the cut with `...`.
pub fn truncate_chars(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        text.to_string()
    } else {
        let mut cut: String = text.chars().take(max).collect();
        cut.push_str("...");
        cut
    }
}
