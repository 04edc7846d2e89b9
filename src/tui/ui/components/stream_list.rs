use crate::tui::ui::components::Component;
use crate::tui::ui::components::text_input::TextInput;
use crate::tui::ui::events::Message;
use crate::tui::ui::overlay::OverlayKind;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use fuzzy_matcher::FuzzyMatcher;
use fuzzy_matcher::skim::SkimMatcherV2;
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
};

/// Root screen: the selectable, filterable list of stream names.
pub struct StreamList {
    bootstrap: String,
    streams: Vec<String>,
    /// Indices into `streams` that pass the filter
    visible: Vec<usize>,
    selected_index: usize,
    scroll_offset: usize,
    filter: TextInput,
    filtering: bool,
    is_loading: bool,
    matcher: SkimMatcherV2,
}

impl StreamList {
    pub fn new(bootstrap: impl Into<String>) -> Self {
        Self {
            bootstrap: bootstrap.into(),
            streams: Vec::new(),
            visible: Vec::new(),
            selected_index: 0,
            scroll_offset: 0,
            filter: TextInput::new(),
            filtering: false,
            is_loading: true,
            matcher: SkimMatcherV2::default().ignore_case(),
        }
    }

    /// Replace the list, keeping the selection on the same name if it is
    /// still present.
    pub fn set_streams(&mut self, mut streams: Vec<String>) {
        let previous = self.selected_name().map(str::to_string);
        streams.sort();
        self.streams = streams;
        self.is_loading = false;
        self.apply_filter();
        if let Some(previous) = previous {
            if let Some(pos) = self
                .visible
                .iter()
                .position(|&i| self.streams[i] == previous)
            {
                self.selected_index = pos;
            }
        }
    }

    pub fn streams(&self) -> &[String] {
        &self.streams
    }

    pub fn visible_names(&self) -> Vec<&str> {
        self.visible.iter().map(|&i| self.streams[i].as_str()).collect()
    }

    pub fn selected_name(&self) -> Option<&str> {
        self.visible
            .get(self.selected_index)
            .map(|&i| self.streams[i].as_str())
    }

    pub fn is_filtering(&self) -> bool {
        self.filtering
    }

    pub fn filter_text(&self) -> &str {
        self.filter.text()
    }

    fn apply_filter(&mut self) {
        let query = self.filter.text().trim();
        self.visible = if query.is_empty() {
            (0..self.streams.len()).collect()
        } else {
            self.streams
                .iter()
                .enumerate()
                .filter(|(_, name)| self.matcher.fuzzy_match(name, query).is_some())
                .map(|(i, _)| i)
                .collect()
        };
        self.selected_index = self
            .selected_index
            .min(self.visible.len().saturating_sub(1));
    }

    fn select_prev(&mut self) {
        self.selected_index = self.selected_index.saturating_sub(1);
    }

    fn select_next(&mut self) {
        if self.selected_index + 1 < self.visible.len() {
            self.selected_index += 1;
        }
    }

    fn handle_filter_key(&mut self, key: KeyEvent) -> Option<Message> {
        match key.code {
            KeyCode::Enter => self.filtering = false,
            KeyCode::Esc => {
                self.filtering = false;
                self.filter.clear();
                self.apply_filter();
            }
            KeyCode::Up => self.select_prev(),
            KeyCode::Down => self.select_next(),
            _ => {
                if self.filter.handle_key(key) {
                    self.selected_index = 0;
                    self.apply_filter();
                }
            }
        }
        None
    }
}

impl Component for StreamList {
    fn render(&mut self, f: &mut Frame, area: Rect) {
        let show_filter = self.filtering || !self.filter.is_empty();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),                            // Title
                Constraint::Length(if show_filter { 1 } else { 0 }), // Filter
                Constraint::Min(0),                               // Streams
                Constraint::Length(1),                            // Help
            ])
            .split(area);

        let title = Line::from(vec![
            Span::styled(
                "lazystream",
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(format!(" → {}", self.bootstrap)),
        ]);
        f.render_widget(Paragraph::new(title), chunks[0]);

        if show_filter {
            let mut spans = vec![Span::styled("Filter: ", Style::default().fg(Color::Yellow))];
            spans.extend(self.filter.render_cursor_spans(self.filtering));
            f.render_widget(Paragraph::new(Line::from(spans)), chunks[1]);
        }

        let block = Block::default()
            .borders(Borders::ALL)
            .title(format!("Streams ({})", self.visible.len()));

        if self.is_loading {
            let loading = List::new(vec![ListItem::new("Loading...")]).block(block);
            f.render_widget(loading, chunks[2]);
        } else if self.visible.is_empty() {
            let text = if self.streams.is_empty() {
                "No streams found"
            } else {
                "No streams match the filter"
            };
            f.render_widget(List::new(vec![ListItem::new(text)]).block(block), chunks[2]);
        } else {
            let visible_height = chunks[2].height.saturating_sub(2) as usize; // -2 for borders

            // Adjust scroll offset to keep selected item visible
            if self.selected_index < self.scroll_offset {
                self.scroll_offset = self.selected_index;
            } else if visible_height > 0 && self.selected_index >= self.scroll_offset + visible_height
            {
                self.scroll_offset = self.selected_index + 1 - visible_height;
            }

            let items: Vec<ListItem> = self
                .visible
                .iter()
                .enumerate()
                .skip(self.scroll_offset)
                .take(visible_height)
                .map(|(i, &stream)| {
                    let style = if i == self.selected_index {
                        Style::default()
                            .bg(Color::Rgb(60, 60, 60))
                            .add_modifier(Modifier::BOLD)
                    } else {
                        Style::default()
                    };
                    ListItem::new(self.streams[stream].as_str()).style(style)
                })
                .collect();

            f.render_widget(List::new(items).block(block), chunks[2]);
        }

        let help = "↑/↓ j/k: navigate • /: filter • enter: open • c: create • x: delete • p: produce • d: download • r: refresh • q: quit";
        f.render_widget(
            Paragraph::new(help).style(Style::default().fg(Color::DarkGray)),
            chunks[3],
        );
    }

    fn handle_key(&mut self, key: KeyEvent) -> Option<Message> {
        if self.filtering {
            return self.handle_filter_key(key);
        }
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            return None;
        }

        match key.code {
            KeyCode::Up | KeyCode::Char('k') => self.select_prev(),
            KeyCode::Down | KeyCode::Char('j') => self.select_next(),
            KeyCode::Home => self.selected_index = 0,
            KeyCode::End => self.selected_index = self.visible.len().saturating_sub(1),
            KeyCode::Char('/') => self.filtering = true,
            KeyCode::Esc if !self.filter.is_empty() => {
                self.filter.clear();
                self.apply_filter();
            }
            KeyCode::Enter => return self.selected_name().map(|n| Message::OpenStream(n.to_string())),
            KeyCode::Char('c') => return Some(Message::OpenOverlay(OverlayKind::CreateTopic)),
            KeyCode::Char('x') | KeyCode::Char('X') => {
                return Some(Message::OpenOverlay(OverlayKind::DeleteTopic));
            }
            KeyCode::Char('p') => return Some(Message::OpenOverlay(OverlayKind::ProduceMessage)),
            KeyCode::Char('d') => return Some(Message::OpenOverlay(OverlayKind::DownloadTopic)),
            KeyCode::Char('r') => return Some(Message::RefreshStreams),
            KeyCode::Char('q') => return Some(Message::Quit),
            _ => {}
        }
        None
    }
}
