use crate::tui::constants::{
    ERROR_TOAST_MS, INFO_TOAST_MS, SUCCESS_TOAST_MS, TOAST_MARGIN_X, TOAST_MARGIN_Y,
};
use crate::tui::ui::commands::Command;
use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};
use std::time::Duration;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Severity {
    Success,
    Error,
    Info,
}

impl Severity {
    fn color(self) -> Color {
        match self {
            Severity::Success => Color::Green,
            Severity::Error => Color::Red,
            Severity::Info => Color::Blue,
        }
    }

    fn icon(self) -> &'static str {
        match self {
            Severity::Success => "✓",
            Severity::Error => "✗",
            Severity::Info => "ℹ",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Anchor {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
    Center,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Toast {
    pub id: u64,
    pub message: String,
    pub severity: Severity,
    pub anchor: Anchor,
    pub lifetime: Duration,
    pub visible: bool,
}

/// Holds the one toast slot. Showing a toast replaces the previous one.
#[derive(Debug, Default)]
pub struct ToastManager {
    current: Option<Toast>,
    next_id: u64,
}

impl ToastManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Show a toast and return the command that schedules its expiry.
    pub fn show(
        &mut self,
        message: impl Into<String>,
        severity: Severity,
        anchor: Anchor,
        lifetime: Duration,
    ) -> Command {
        self.next_id += 1;
        let id = self.next_id;
        self.current = Some(Toast {
            id,
            message: message.into(),
            severity,
            anchor,
            lifetime,
            visible: true,
        });
        Command::ScheduleToastExpiry {
            id,
            after: lifetime,
        }
    }

    pub fn success(&mut self, message: impl Into<String>) -> Command {
        self.show(
            message,
            Severity::Success,
            Anchor::TopRight,
            Duration::from_millis(SUCCESS_TOAST_MS),
        )
    }

    pub fn error(&mut self, message: impl Into<String>) -> Command {
        self.show(
            message,
            Severity::Error,
            Anchor::TopRight,
            Duration::from_millis(ERROR_TOAST_MS),
        )
    }

    pub fn info(&mut self, message: impl Into<String>) -> Command {
        self.show(
            message,
            Severity::Info,
            Anchor::TopRight,
            Duration::from_millis(INFO_TOAST_MS),
        )
    }

    /// Hide the toast if `id` is still the current one. Returns whether
    /// anything changed; expiries of superseded toasts are ignored.
    pub fn expire(&mut self, id: u64) -> bool {
        match &mut self.current {
            Some(toast) if toast.id == id && toast.visible => {
                toast.visible = false;
                true
            }
            _ => false,
        }
    }

    /// The toast to draw, if one is visible.
    pub fn visible(&self) -> Option<&Toast> {
        self.current.as_ref().filter(|toast| toast.visible)
    }

    /// Composite the visible toast over the already-drawn frame.
    pub fn render(&self, f: &mut Frame, area: Rect) {
        let Some(toast) = self.visible() else {
            return;
        };

        let text = format!("{} {}", toast.severity.icon(), toast.message);
        let max_width = area.width.saturating_sub(2 * TOAST_MARGIN_X);
        let width = u16::try_from(text.chars().count())
            .unwrap_or(u16::MAX)
            .saturating_add(4)
            .min(max_width);
        let height = 3.min(area.height);
        if width == 0 || height == 0 {
            return;
        }
        let rect = toast_rect(area, toast.anchor, width, height);

        let color = toast.severity.color();
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(color));
        let line = Line::from(Span::styled(
            text,
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ));
        f.render_widget(Clear, rect);
        f.render_widget(Paragraph::new(line).block(block), rect);
    }
}

/// Position a `width`×`height` box at `anchor` inside `area`, inset by the
/// toast margins and clipped to `area`.
pub fn toast_rect(area: Rect, anchor: Anchor, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    let left = area.x + TOAST_MARGIN_X.min(area.width - width);
    let right = area.x + area.width.saturating_sub(width + TOAST_MARGIN_X);
    let top = area.y + TOAST_MARGIN_Y.min(area.height - height);
    let bottom = area.y + area.height.saturating_sub(height + TOAST_MARGIN_Y);

    let (x, y) = match anchor {
        Anchor::TopLeft => (left, top),
        Anchor::TopRight => (right, top),
        Anchor::BottomLeft => (left, bottom),
        Anchor::BottomRight => (right, bottom),
        Anchor::Center => (
            area.x + (area.width - width) / 2,
            area.y + (area.height - height) / 2,
        ),
    };
    Rect {
        x,
        y,
        width,
        height,
    }
}
