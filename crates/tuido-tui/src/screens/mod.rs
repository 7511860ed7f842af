//! Screen stack and per-screen state machines.
//!
//! Each screen owns its local state and handles its own keys and request
//! completions, returning a `ScreenUpdate` the reducer applies after the
//! screen borrow ends. Navigation is expressed as data (`Nav`), never
//! performed inside a screen.

mod detail;
mod login;
mod register;
mod todos;

pub use detail::{DetailField, DetailPhase, DetailScreen};
pub use login::{LoginField, LoginScreen};
pub use register::{RegisterField, RegisterScreen};
pub use todos::{ListPhase, TodosScreen};

use crate::common::TaskId;
use crate::effects::UiEffect;
use crate::overlays::Overlay;

/// Active screen variants on the navigation stack.
pub enum Screen {
    Login(LoginScreen),
    Register(RegisterScreen),
    Todos(TodosScreen),
    Detail(DetailScreen),
}

/// Navigation request produced by a screen.
pub enum Nav {
    /// Push a new screen on top of the stack.
    Push(Screen),
    /// Replace the active screen.
    Replace(Screen),
    /// Clear the stack and make this the only screen. Used after login so
    /// back-navigation cannot return to the login screen.
    ReplaceAll(Screen),
    /// Pop the active screen, returning to the previous one.
    Pop,
}

/// Result of handling an event inside a screen.
///
/// Applied by the reducer in order: effects are queued, then the overlay is
/// shown, then navigation runs (cancelling the departing screen's tasks).
#[derive(Default)]
pub struct ScreenUpdate {
    pub effects: Vec<UiEffect>,
    pub nav: Option<Nav>,
    pub overlay: Option<Overlay>,
}

impl ScreenUpdate {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn effects(effects: Vec<UiEffect>) -> Self {
        Self {
            effects,
            ..Self::default()
        }
    }

    pub fn nav(nav: Nav) -> Self {
        Self {
            nav: Some(nav),
            ..Self::default()
        }
    }

    pub fn overlay(overlay: Overlay) -> Self {
        Self {
            overlay: Some(overlay),
            ..Self::default()
        }
    }
}

/// Submission lifecycle shared by the auth screens:
/// `Idle -> Submitting -> {navigated, back to Idle with an alert}`.
///
/// While `Submitting`, the submit key is ignored, so a second press can
/// never issue a duplicate request.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum SubmitPhase {
    #[default]
    Idle,
    Submitting {
        task: TaskId,
    },
}

impl SubmitPhase {
    pub fn is_submitting(&self) -> bool {
        matches!(self, SubmitPhase::Submitting { .. })
    }
}

impl Screen {
    /// Cancellation effects for every task this screen may have in flight.
    /// Emitted when the screen leaves the stack so late responses are
    /// dropped instead of landing on whatever screen replaced it.
    pub fn cancel_tasks(&self, tasks: &mut crate::common::Tasks) -> Vec<UiEffect> {
        let kinds: &[crate::common::TaskKind] = match self {
            Screen::Login(_) => &[crate::common::TaskKind::Login],
            Screen::Register(_) => &[crate::common::TaskKind::Register],
            Screen::Todos(_) => &[crate::common::TaskKind::TodoList],
            Screen::Detail(_) => &[
                crate::common::TaskKind::TodoFetch,
                crate::common::TaskKind::TodoUpdate,
            ],
        };
        kinds
            .iter()
            .flat_map(|kind| cancel_kind(tasks, *kind))
            .collect()
    }
}

/// Cancels the active task of `kind`, if any, returning the effect that
/// fires its cancellation token.
pub(crate) fn cancel_kind(
    tasks: &mut crate::common::Tasks,
    kind: crate::common::TaskKind,
) -> Vec<UiEffect> {
    let state = tasks.state_mut(kind);
    let Some(token) = state.cancel.take() else {
        return Vec::new();
    };
    state.clear();
    vec![UiEffect::CancelTask { kind, token }]
}

/// Appends `c` to a text field, or pops on backspace. Shared single-line
/// editing used by every screen with input fields.
pub(crate) fn edit_field(field: &mut String, key: crossterm::event::KeyCode) {
    match key {
        crossterm::event::KeyCode::Char(c) => field.push(c),
        crossterm::event::KeyCode::Backspace => {
            field.pop();
        }
        _ => {}
    }
}
