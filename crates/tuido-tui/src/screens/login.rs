//! Login screen.
//!
//! Two input fields and a submit action. Credentials are sent as-is; the
//! server is the only validator. Success replaces the whole navigation
//! stack with the todo list so back-navigation cannot return here.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tuido_core::Credentials;

use crate::common::{TaskKind, TaskSeq, Tasks};
use crate::effects::UiEffect;
use crate::overlays::Overlay;
use crate::screens::{
    Nav, RegisterScreen, Screen, ScreenUpdate, SubmitPhase, TodosScreen, edit_field,
};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LoginField {
    #[default]
    Username,
    Password,
}

#[derive(Default)]
pub struct LoginScreen {
    pub username: String,
    pub password: String,
    pub focus: LoginField,
    /// One-line status shown above the form (e.g. after registration).
    pub notice: Option<String>,
    pub phase: SubmitPhase,
}

impl LoginScreen {
    /// Login screen pre-filled with a status notice.
    pub fn with_notice(notice: impl Into<String>) -> Self {
        Self {
            notice: Some(notice.into()),
            ..Self::default()
        }
    }

    pub fn handle_key(
        &mut self,
        key: KeyEvent,
        tasks: &mut Tasks,
        seq: &mut TaskSeq,
    ) -> ScreenUpdate {
        if self.phase.is_submitting() {
            // Esc cancels the in-flight attempt; everything else is ignored
            // so a second Enter cannot double-submit.
            if key.code == KeyCode::Esc {
                self.phase = SubmitPhase::Idle;
                return ScreenUpdate::effects(super::cancel_kind(tasks, TaskKind::Login));
            }
            return ScreenUpdate::none();
        }

        if key.code == KeyCode::Char('r') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return ScreenUpdate::nav(Nav::Push(Screen::Register(RegisterScreen::default())));
        }

        match key.code {
            KeyCode::Esc => ScreenUpdate::effects(vec![UiEffect::Quit]),
            KeyCode::Tab | KeyCode::BackTab | KeyCode::Down | KeyCode::Up => {
                self.focus = match self.focus {
                    LoginField::Username => LoginField::Password,
                    LoginField::Password => LoginField::Username,
                };
                ScreenUpdate::none()
            }
            KeyCode::Enter => self.submit(tasks, seq),
            code => {
                self.notice = None;
                match self.focus {
                    LoginField::Username => edit_field(&mut self.username, code),
                    LoginField::Password => edit_field(&mut self.password, code),
                }
                ScreenUpdate::none()
            }
        }
    }

    fn submit(&mut self, tasks: &mut Tasks, seq: &mut TaskSeq) -> ScreenUpdate {
        let (task, cancel) = tasks.begin(seq, TaskKind::Login);
        self.phase = SubmitPhase::Submitting { task };
        self.notice = None;
        ScreenUpdate::effects(vec![UiEffect::SpawnLogin {
            task,
            cancel,
            credentials: Credentials {
                username: self.username.clone(),
                password: self.password.clone(),
            },
        }])
    }

    /// Applies the login result. On success the stack is replaced with the
    /// todo list; on failure a blocking alert shows the server's message.
    pub fn handle_finished(
        &mut self,
        result: Result<(), String>,
        tasks: &mut Tasks,
        seq: &mut TaskSeq,
    ) -> ScreenUpdate {
        self.phase = SubmitPhase::Idle;
        match result {
            Ok(()) => {
                let (screen, effects) = TodosScreen::open(tasks, seq);
                let mut update = ScreenUpdate::effects(effects);
                update.nav = Some(Nav::ReplaceAll(Screen::Todos(screen)));
                update
            }
            Err(message) => ScreenUpdate::overlay(Overlay::alert("Login failed", message)),
        }
    }
}
