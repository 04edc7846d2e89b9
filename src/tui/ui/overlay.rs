use crate::tui::ui::components::Component;
use crate::tui::ui::components::create_stream_form::CreateStreamForm;
use crate::tui::ui::components::delete_stream_form::DeleteStreamForm;
use crate::tui::ui::components::download_form::DownloadForm;
use crate::tui::ui::components::produce_form::ProduceForm;
use crate::tui::ui::events::Message;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{Frame, layout::Rect};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OverlayKind {
    CreateTopic,
    DeleteTopic,
    ProduceMessage,
    DownloadTopic,
}

impl OverlayKind {
    /// Whether opening this overlay needs a target stream.
    pub fn needs_stream(self) -> bool {
        !matches!(self, OverlayKind::CreateTopic)
    }
}

/// The single active modal, carrying its own form state.
#[derive(Debug, Clone, Default)]
pub enum Overlay {
    #[default]
    None,
    CreateTopic(CreateStreamForm),
    DeleteTopic(DeleteStreamForm),
    ProduceMessage(ProduceForm),
    DownloadTopic(DownloadForm),
}

impl Overlay {
    pub fn kind(&self) -> Option<OverlayKind> {
        match self {
            Overlay::None => None,
            Overlay::CreateTopic(_) => Some(OverlayKind::CreateTopic),
            Overlay::DeleteTopic(_) => Some(OverlayKind::DeleteTopic),
            Overlay::ProduceMessage(_) => Some(OverlayKind::ProduceMessage),
            Overlay::DownloadTopic(_) => Some(OverlayKind::DownloadTopic),
        }
    }

    fn form(&mut self) -> Option<&mut dyn Component> {
        match self {
            Overlay::None => None,
            Overlay::CreateTopic(form) => Some(form),
            Overlay::DeleteTopic(form) => Some(form),
            Overlay::ProduceMessage(form) => Some(form),
            Overlay::DownloadTopic(form) => Some(form),
        }
    }
}

#[derive(Debug, Default)]
pub struct OverlayManager {
    active: Overlay,
}

impl OverlayManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_active(&self) -> bool {
        !matches!(self.active, Overlay::None)
    }

    pub fn active(&self) -> &Overlay {
        &self.active
    }

    pub fn kind(&self) -> Option<OverlayKind> {
        self.active.kind()
    }

    /// Open a fresh form, replacing whatever was open. `stream` is the
    /// target of every overlay except CreateTopic.
    pub fn open(&mut self, kind: OverlayKind, stream: &str) {
        self.active = match kind {
            OverlayKind::CreateTopic => Overlay::CreateTopic(CreateStreamForm::new()),
            OverlayKind::DeleteTopic => Overlay::DeleteTopic(DeleteStreamForm::new(stream)),
            OverlayKind::ProduceMessage => Overlay::ProduceMessage(ProduceForm::new(stream)),
            OverlayKind::DownloadTopic => Overlay::DownloadTopic(DownloadForm::new(stream)),
        };
    }

    pub fn close(&mut self) {
        self.active = Overlay::None;
    }

    /// Route a key to the active form. `Esc` closes any overlay before the
    /// form sees it.
    pub fn handle_key(&mut self, key: KeyEvent) -> Option<Message> {
        if !self.is_active() {
            return None;
        }
        if key.code == KeyCode::Esc {
            self.close();
            return None;
        }
        self.active.form().and_then(|form| form.handle_key(key))
    }

    pub fn render(&mut self, f: &mut Frame, area: Rect) {
        if let Some(form) = self.active.form() {
            form.render(f, area);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::empty())
    }

    #[test]
    fn test_starts_closed() {
        let manager = OverlayManager::new();
        assert!(!manager.is_active());
        assert_eq!(manager.kind(), None);
    }

    #[test]
    fn test_esc_closes_every_overlay() {
        for kind in [
            OverlayKind::CreateTopic,
            OverlayKind::DeleteTopic,
            OverlayKind::ProduceMessage,
            OverlayKind::DownloadTopic,
        ] {
            let mut manager = OverlayManager::new();
            manager.open(kind, "orders");
            assert_eq!(manager.kind(), Some(kind));

            assert!(manager.handle_key(key(KeyCode::Esc)).is_none());
            assert!(!manager.is_active());
        }
    }

    #[test]
    fn test_esc_without_overlay_is_noop() {
        let mut manager = OverlayManager::new();
        for _ in 0..3 {
            assert!(manager.handle_key(key(KeyCode::Esc)).is_none());
            assert!(!manager.is_active());
        }
    }

    #[test]
    fn test_open_replaces_active_overlay() {
        let mut manager = OverlayManager::new();
        manager.open(OverlayKind::CreateTopic, "");
        manager.handle_key(key(KeyCode::Char('a')));
        manager.open(OverlayKind::DeleteTopic, "orders");
        match manager.active() {
            Overlay::DeleteTopic(form) => assert_eq!(form.stream(), "orders"),
            other => panic!("unexpected overlay: {other:?}"),
        }

        // reopening starts from a blank form
        manager.open(OverlayKind::CreateTopic, "");
        match manager.active() {
            Overlay::CreateTopic(form) => assert_eq!(form.name(), ""),
            other => panic!("unexpected overlay: {other:?}"),
        }
    }

    #[test]
    fn test_keys_reach_active_form() {
        let mut manager = OverlayManager::new();
        manager.open(OverlayKind::DeleteTopic, "orders");
        assert!(matches!(
            manager.handle_key(key(KeyCode::Char('y'))),
            Some(Message::SubmitDeleteStream(name)) if name == "orders"
        ));
    }

    #[test]
    fn test_needs_stream() {
        assert!(!OverlayKind::CreateTopic.needs_stream());
        assert!(OverlayKind::DownloadTopic.needs_stream());
    }
}
