//! Modal overlays.
//!
//! An overlay is a blocking dialog rendered over the active screen. While
//! one is open it captures all key input; the screen underneath receives
//! nothing until it is dismissed.

use crossterm::event::{KeyCode, KeyEvent};

/// Active overlay variants.
pub enum Overlay {
    /// Blocking error alert (auth failures, failed saves).
    Alert { title: String, message: String },
    /// Save confirmation. Dismissing it navigates back to the previous
    /// screen.
    Saved { message: String },
}

/// What the reducer does after an overlay handles a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlayOutcome {
    Stay,
    Dismiss,
    /// Dismiss and pop the active screen.
    DismissAndBack,
}

impl Overlay {
    pub fn alert(title: impl Into<String>, message: impl Into<String>) -> Self {
        Overlay::Alert {
            title: title.into(),
            message: message.into(),
        }
    }

    pub fn saved(message: impl Into<String>) -> Self {
        Overlay::Saved {
            message: message.into(),
        }
    }

    pub fn handle_key(&self, key: KeyEvent) -> OverlayOutcome {
        match key.code {
            KeyCode::Enter | KeyCode::Esc | KeyCode::Char(' ') => match self {
                Overlay::Alert { .. } => OverlayOutcome::Dismiss,
                Overlay::Saved { .. } => OverlayOutcome::DismissAndBack,
            },
            _ => OverlayOutcome::Stay,
        }
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::KeyModifiers;

    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn alert_dismisses_in_place() {
        let overlay = Overlay::alert("Login failed", "Invalid credentials");
        assert_eq!(overlay.handle_key(key(KeyCode::Enter)), OverlayOutcome::Dismiss);
        assert_eq!(overlay.handle_key(key(KeyCode::Char('x'))), OverlayOutcome::Stay);
    }

    #[test]
    fn saved_dialog_navigates_back_on_dismiss() {
        let overlay = Overlay::saved("Todo saved.");
        assert_eq!(
            overlay.handle_key(key(KeyCode::Esc)),
            OverlayOutcome::DismissAndBack
        );
    }
}
