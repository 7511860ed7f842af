//! Application state composition.
//!
//! The TUI is a stack of screens plus an optional modal overlay:
//!
//! ```text
//! AppState
//! ├── screens: Vec<Screen>     (navigation stack, top is active)
//! ├── overlay: Option<Overlay> (modal dialog over the active screen)
//! ├── todos: TodoList          (shared in-memory todo collection)
//! ├── tasks: Tasks             (in-flight request bookkeeping)
//! └── task_seq: TaskSeq        (task id generator)
//! ```
//!
//! Screens and overlay are stored separately so the reducer can hand a
//! screen `&mut self` while still borrowing the shared collections.

use tuido_core::TodoList;

use crate::common::{TaskSeq, Tasks};
use crate::effects::UiEffect;
use crate::overlays::Overlay;
use crate::screens::{LoginScreen, Screen, TodosScreen};

/// Combined application state for the TUI.
pub struct AppState {
    /// Navigation stack. Never empty; the last entry is the active screen.
    pub screens: Vec<Screen>,
    /// Active modal overlay, if any. Overlays capture all key input.
    pub overlay: Option<Overlay>,
    /// Shared todo collection, updated by list loads and saves.
    pub todos: TodoList,
    /// Task lifecycle state for async operations.
    pub tasks: Tasks,
    /// Task id sequence for async operations.
    pub task_seq: TaskSeq,
    /// Flag indicating the app should quit.
    pub should_quit: bool,
    /// Spinner animation frame counter.
    pub spinner_frame: usize,
}

impl AppState {
    /// State starting at the login screen (no stored session).
    pub fn at_login() -> Self {
        Self::with_screen(Screen::Login(LoginScreen::default()))
    }

    /// State starting at the todo list (stored session found). Returns the
    /// initial load effects alongside the state.
    pub fn at_todos() -> (Self, Vec<UiEffect>) {
        let mut tasks = Tasks::default();
        let mut task_seq = TaskSeq::default();
        let (screen, effects) = TodosScreen::open(&mut tasks, &mut task_seq);
        let mut state = Self::with_screen(Screen::Todos(screen));
        state.tasks = tasks;
        state.task_seq = task_seq;
        (state, effects)
    }

    fn with_screen(screen: Screen) -> Self {
        Self {
            screens: vec![screen],
            overlay: None,
            todos: TodoList::new(),
            tasks: Tasks::default(),
            task_seq: TaskSeq::default(),
            should_quit: false,
            spinner_frame: 0,
        }
    }

    /// The active screen (top of the navigation stack).
    pub fn active_screen(&self) -> Option<&Screen> {
        self.screens.last()
    }
}
