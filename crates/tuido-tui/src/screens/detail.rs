//! Todo detail and edit screen.
//!
//! Fetches the todo on open, populates the edit buffers from the server's
//! record, and saves with an explicit action. Edits live only in the
//! buffers: navigating away before saving discards them.
//!
//! State machine:
//! `Loading -> Loaded -> Saving -> {Saved (dialog) -> back, failure -> Loaded}`
//! plus `Loading -> LoadFailed` with a retry affordance, so no failure ever
//! leaves the screen stuck on a blank loading state.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tuido_core::{Todo, TodoEdit, TodoList};

use crate::common::{TaskId, TaskKind, TaskSeq, Tasks};
use crate::effects::UiEffect;
use crate::overlays::Overlay;
use crate::screens::{Nav, ScreenUpdate, edit_field};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DetailField {
    #[default]
    Title,
    Description,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DetailPhase {
    Loading { task: TaskId },
    Loaded,
    Saving { task: TaskId },
    LoadFailed { error: String },
}

pub struct DetailScreen {
    /// Server-assigned id, immutable for the life of the screen.
    pub id: String,
    pub phase: DetailPhase,
    /// Edit buffers, populated from the fetched record.
    pub title: String,
    pub description: String,
    pub focus: DetailField,
}

impl DetailScreen {
    /// Opens the screen and starts fetching the todo.
    pub fn open(id: String, tasks: &mut Tasks, seq: &mut TaskSeq) -> (Self, Vec<UiEffect>) {
        let (task, cancel) = tasks.begin(seq, TaskKind::TodoFetch);
        let screen = Self {
            id: id.clone(),
            phase: DetailPhase::Loading { task },
            title: String::new(),
            description: String::new(),
            focus: DetailField::default(),
        };
        (
            screen,
            vec![UiEffect::SpawnTodoFetch { task, cancel, id }],
        )
    }

    pub fn handle_key(
        &mut self,
        key: KeyEvent,
        tasks: &mut Tasks,
        seq: &mut TaskSeq,
    ) -> ScreenUpdate {
        match &self.phase {
            DetailPhase::Loading { .. } => match key.code {
                // Back cancels the fetch; the stale response is dropped.
                KeyCode::Esc => ScreenUpdate::nav(Nav::Pop),
                _ => ScreenUpdate::none(),
            },
            DetailPhase::Saving { .. } => {
                // Edits and a second save are ignored while one is in flight.
                if key.code == KeyCode::Esc {
                    self.phase = DetailPhase::Loaded;
                    return ScreenUpdate::effects(super::cancel_kind(tasks, TaskKind::TodoUpdate));
                }
                ScreenUpdate::none()
            }
            DetailPhase::LoadFailed { .. } => match key.code {
                KeyCode::Esc => ScreenUpdate::nav(Nav::Pop),
                KeyCode::Char('r') => self.retry_fetch(tasks, seq),
                _ => ScreenUpdate::none(),
            },
            DetailPhase::Loaded => {
                if key.code == KeyCode::Char('s') && key.modifiers.contains(KeyModifiers::CONTROL) {
                    return self.save(tasks, seq);
                }
                match key.code {
                    // Unsaved edits are discarded, matching the explicit-save
                    // contract.
                    KeyCode::Esc => ScreenUpdate::nav(Nav::Pop),
                    KeyCode::Tab | KeyCode::BackTab => {
                        self.focus = match self.focus {
                            DetailField::Title => DetailField::Description,
                            DetailField::Description => DetailField::Title,
                        };
                        ScreenUpdate::none()
                    }
                    code => {
                        match self.focus {
                            DetailField::Title => edit_field(&mut self.title, code),
                            DetailField::Description => edit_field(&mut self.description, code),
                        }
                        ScreenUpdate::none()
                    }
                }
            }
        }
    }

    fn retry_fetch(&mut self, tasks: &mut Tasks, seq: &mut TaskSeq) -> ScreenUpdate {
        let (task, cancel) = tasks.begin(seq, TaskKind::TodoFetch);
        self.phase = DetailPhase::Loading { task };
        ScreenUpdate::effects(vec![UiEffect::SpawnTodoFetch {
            task,
            cancel,
            id: self.id.clone(),
        }])
    }

    fn save(&mut self, tasks: &mut Tasks, seq: &mut TaskSeq) -> ScreenUpdate {
        let (task, cancel) = tasks.begin(seq, TaskKind::TodoUpdate);
        self.phase = DetailPhase::Saving { task };
        ScreenUpdate::effects(vec![UiEffect::SpawnTodoUpdate {
            task,
            cancel,
            id: self.id.clone(),
            edit: TodoEdit {
                title: self.title.clone(),
                description: self.description.clone(),
            },
        }])
    }

    /// Applies the fetch result, populating the edit buffers exactly with
    /// the server's values.
    pub fn handle_fetched(&mut self, result: Result<Todo, String>) -> ScreenUpdate {
        match result {
            Ok(todo) => {
                self.title = todo.title;
                self.description = todo.description;
                self.phase = DetailPhase::Loaded;
            }
            Err(error) => {
                self.phase = DetailPhase::LoadFailed { error };
            }
        }
        ScreenUpdate::none()
    }

    /// Applies the save result. Success pushes the updated record into the
    /// shared list (so the list screen under this one reflects it) and shows
    /// a confirmation dialog; dismissing the dialog navigates back. Failure
    /// returns to `Loaded` with a blocking alert, keeping the edits.
    pub fn handle_saved(
        &mut self,
        result: Result<Todo, String>,
        todos: &mut TodoList,
    ) -> ScreenUpdate {
        self.phase = DetailPhase::Loaded;
        match result {
            Ok(todo) => {
                self.title = todo.title.clone();
                self.description = todo.description.clone();
                todos.update_todo(todo);
                ScreenUpdate::overlay(Overlay::saved("Todo saved."))
            }
            Err(message) => ScreenUpdate::overlay(Overlay::alert("Save failed", message)),
        }
    }
}
