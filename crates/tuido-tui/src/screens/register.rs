//! Registration screen.
//!
//! Three input fields, no client-side format validation. A successful
//! registration does not log the user in: it returns to the login screen
//! with a notice, and the user signs in with the new credentials.

use crossterm::event::{KeyCode, KeyEvent};
use tuido_core::Registration;

use crate::common::{TaskKind, TaskSeq, Tasks};
use crate::overlays::Overlay;
use crate::screens::{LoginScreen, Nav, Screen, ScreenUpdate, SubmitPhase, edit_field};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RegisterField {
    #[default]
    Username,
    Email,
    Password,
}

impl RegisterField {
    fn next(self) -> Self {
        match self {
            RegisterField::Username => RegisterField::Email,
            RegisterField::Email => RegisterField::Password,
            RegisterField::Password => RegisterField::Username,
        }
    }

    fn prev(self) -> Self {
        match self {
            RegisterField::Username => RegisterField::Password,
            RegisterField::Email => RegisterField::Username,
            RegisterField::Password => RegisterField::Email,
        }
    }
}

#[derive(Default)]
pub struct RegisterScreen {
    pub username: String,
    pub email: String,
    pub password: String,
    pub focus: RegisterField,
    pub phase: SubmitPhase,
}

impl RegisterScreen {
    pub fn handle_key(
        &mut self,
        key: KeyEvent,
        tasks: &mut Tasks,
        seq: &mut TaskSeq,
    ) -> ScreenUpdate {
        if self.phase.is_submitting() {
            if key.code == KeyCode::Esc {
                self.phase = SubmitPhase::Idle;
                return ScreenUpdate::effects(super::cancel_kind(tasks, TaskKind::Register));
            }
            return ScreenUpdate::none();
        }

        match key.code {
            KeyCode::Esc => ScreenUpdate::nav(Nav::Pop),
            KeyCode::Tab | KeyCode::Down => {
                self.focus = self.focus.next();
                ScreenUpdate::none()
            }
            KeyCode::BackTab | KeyCode::Up => {
                self.focus = self.focus.prev();
                ScreenUpdate::none()
            }
            KeyCode::Enter => self.submit(tasks, seq),
            code => {
                match self.focus {
                    RegisterField::Username => edit_field(&mut self.username, code),
                    RegisterField::Email => edit_field(&mut self.email, code),
                    RegisterField::Password => edit_field(&mut self.password, code),
                }
                ScreenUpdate::none()
            }
        }
    }

    fn submit(&mut self, tasks: &mut Tasks, seq: &mut TaskSeq) -> ScreenUpdate {
        let (task, cancel) = tasks.begin(seq, TaskKind::Register);
        self.phase = SubmitPhase::Submitting { task };
        ScreenUpdate::effects(vec![crate::effects::UiEffect::SpawnRegister {
            task,
            cancel,
            registration: Registration {
                username: self.username.clone(),
                email: self.email.clone(),
                password: self.password.clone(),
            },
        }])
    }

    /// Applies the registration result. Success lands on the login screen
    /// with no token stored; failure shows a blocking alert.
    pub fn handle_finished(&mut self, result: Result<(), String>) -> ScreenUpdate {
        self.phase = SubmitPhase::Idle;
        match result {
            Ok(()) => ScreenUpdate::nav(Nav::ReplaceAll(Screen::Login(LoginScreen::with_notice(
                "Account created. Sign in to continue.",
            )))),
            Err(message) => ScreenUpdate::overlay(Overlay::alert("Registration failed", message)),
        }
    }
}
