//! Todo list screen.
//!
//! The authenticated landing screen. Loads the list on open, lets the user
//! pick a todo to view or edit, and re-renders when the detail screen pushes
//! a saved todo back into the shared list.

use crossterm::event::{KeyCode, KeyEvent};
use tuido_core::{Todo, TodoList};

use crate::common::{TaskId, TaskKind, TaskSeq, Tasks};
use crate::effects::UiEffect;
use crate::screens::{DetailScreen, Nav, Screen, ScreenUpdate};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListPhase {
    Loading { task: TaskId },
    Ready,
    Failed { error: String },
}

pub struct TodosScreen {
    pub selected: usize,
    pub phase: ListPhase,
}

impl TodosScreen {
    /// Opens the screen and starts the initial list load.
    pub fn open(tasks: &mut Tasks, seq: &mut TaskSeq) -> (Self, Vec<UiEffect>) {
        let (task, cancel) = tasks.begin(seq, TaskKind::TodoList);
        let screen = Self {
            selected: 0,
            phase: ListPhase::Loading { task },
        };
        (screen, vec![UiEffect::SpawnTodoList { task, cancel }])
    }

    pub fn handle_key(
        &mut self,
        key: KeyEvent,
        tasks: &mut Tasks,
        seq: &mut TaskSeq,
        todos: &TodoList,
    ) -> ScreenUpdate {
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => ScreenUpdate::effects(vec![UiEffect::Quit]),
            KeyCode::Char('r') => self.reload(tasks, seq),
            KeyCode::Down | KeyCode::Char('j') => {
                if !todos.is_empty() {
                    self.selected = (self.selected + 1).min(todos.len() - 1);
                }
                ScreenUpdate::none()
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.selected = self.selected.saturating_sub(1);
                ScreenUpdate::none()
            }
            KeyCode::Enter => {
                if self.phase != ListPhase::Ready {
                    return ScreenUpdate::none();
                }
                let Some(todo) = todos.todos().get(self.selected) else {
                    return ScreenUpdate::none();
                };
                let (screen, effects) = DetailScreen::open(todo.id.clone(), tasks, seq);
                let mut update = ScreenUpdate::effects(effects);
                update.nav = Some(Nav::Push(Screen::Detail(screen)));
                update
            }
            _ => ScreenUpdate::none(),
        }
    }

    /// Restarts the list load, cancelling any load already in flight.
    fn reload(&mut self, tasks: &mut Tasks, seq: &mut TaskSeq) -> ScreenUpdate {
        let mut effects = super::cancel_kind(tasks, TaskKind::TodoList);
        let (task, cancel) = tasks.begin(seq, TaskKind::TodoList);
        self.phase = ListPhase::Loading { task };
        effects.push(UiEffect::SpawnTodoList { task, cancel });
        ScreenUpdate::effects(effects)
    }

    /// Applies the list load result, replacing the shared collection.
    pub fn handle_loaded(
        &mut self,
        result: Result<Vec<Todo>, String>,
        todos: &mut TodoList,
    ) -> ScreenUpdate {
        match result {
            Ok(items) => {
                todos.replace_all(items);
                if !todos.is_empty() {
                    self.selected = self.selected.min(todos.len() - 1);
                }
                self.phase = ListPhase::Ready;
            }
            Err(error) => {
                self.phase = ListPhase::Failed { error };
            }
        }
        ScreenUpdate::none()
    }
}
