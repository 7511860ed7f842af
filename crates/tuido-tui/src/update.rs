//! TUI reducer (update function).
//!
//! All state mutations happen here. The runtime calls `update(app, event)`
//! and executes the returned effects.
//!
//! Completion events are gated twice before reaching a screen: the task id
//! must match the active task of its kind, and the active screen must still
//! be the one that issued the request. Everything stale is dropped, so a
//! response can never mutate a screen the user already left.

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::common::{TaskId, TaskKind};
use crate::effects::UiEffect;
use crate::events::UiEvent;
use crate::overlays::OverlayOutcome;
use crate::screens::{Nav, Screen, ScreenUpdate};
use crate::state::AppState;

/// The main reducer function.
///
/// Takes the current state and an event, mutates state, and returns effects
/// for the runtime to execute.
pub fn update(app: &mut AppState, event: UiEvent) -> Vec<UiEffect> {
    match event {
        UiEvent::Tick => {
            app.spinner_frame = app.spinner_frame.wrapping_add(1);
            vec![]
        }
        UiEvent::Terminal(term_event) => handle_terminal_event(app, term_event),
        UiEvent::LoginFinished { task, result } => {
            if !finish(app, TaskKind::Login, task) {
                return vec![];
            }
            let AppState {
                screens,
                tasks,
                task_seq,
                ..
            } = app;
            let Some(Screen::Login(screen)) = screens.last_mut() else {
                tracing::debug!("dropping login result, login screen no longer active");
                return vec![];
            };
            let screen_update = screen.handle_finished(result, tasks, task_seq);
            apply_screen_update(app, screen_update)
        }
        UiEvent::RegisterFinished { task, result } => {
            if !finish(app, TaskKind::Register, task) {
                return vec![];
            }
            let Some(Screen::Register(screen)) = app.screens.last_mut() else {
                tracing::debug!("dropping register result, register screen no longer active");
                return vec![];
            };
            let screen_update = screen.handle_finished(result);
            apply_screen_update(app, screen_update)
        }
        UiEvent::TodosLoaded { task, result } => {
            if !finish(app, TaskKind::TodoList, task) {
                return vec![];
            }
            let AppState { screens, todos, .. } = app;
            let Some(Screen::Todos(screen)) = screens.last_mut() else {
                tracing::debug!("dropping todo list result, list screen no longer active");
                return vec![];
            };
            let screen_update = screen.handle_loaded(result, todos);
            apply_screen_update(app, screen_update)
        }
        UiEvent::TodoFetched { task, result } => {
            if !finish(app, TaskKind::TodoFetch, task) {
                return vec![];
            }
            let Some(Screen::Detail(screen)) = app.screens.last_mut() else {
                tracing::debug!("dropping todo fetch result, detail screen no longer active");
                return vec![];
            };
            let screen_update = screen.handle_fetched(result);
            apply_screen_update(app, screen_update)
        }
        UiEvent::TodoSaved { task, result } => {
            if !finish(app, TaskKind::TodoUpdate, task) {
                return vec![];
            }
            let AppState { screens, todos, .. } = app;
            let Some(Screen::Detail(screen)) = screens.last_mut() else {
                tracing::debug!("dropping todo save result, detail screen no longer active");
                return vec![];
            };
            let screen_update = screen.handle_saved(result, todos);
            apply_screen_update(app, screen_update)
        }
    }
}

/// Clears the task state if `task` is still the active one of `kind`.
/// Returns false for stale completions, which are dropped.
fn finish(app: &mut AppState, kind: TaskKind, task: TaskId) -> bool {
    let current = app.tasks.state_mut(kind).finish_if_active(task);
    if !current {
        tracing::debug!(?kind, ?task, "dropping stale task completion");
    }
    current
}

fn handle_terminal_event(app: &mut AppState, event: Event) -> Vec<UiEffect> {
    match event {
        Event::Key(key) if key.kind == KeyEventKind::Press => handle_key(app, key),
        _ => vec![],
    }
}

fn handle_key(app: &mut AppState, key: KeyEvent) -> Vec<UiEffect> {
    // Ctrl+C always quits, regardless of screen or overlay.
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        app.should_quit = true;
        return vec![UiEffect::Quit];
    }

    // An open overlay captures all input.
    if let Some(overlay) = &app.overlay {
        return match overlay.handle_key(key) {
            OverlayOutcome::Stay => vec![],
            OverlayOutcome::Dismiss => {
                app.overlay = None;
                vec![]
            }
            OverlayOutcome::DismissAndBack => {
                app.overlay = None;
                pop_screen(app)
            }
        };
    }

    let AppState {
        screens,
        todos,
        tasks,
        task_seq,
        ..
    } = app;
    let Some(screen) = screens.last_mut() else {
        return vec![];
    };
    let screen_update = match screen {
        Screen::Login(s) => s.handle_key(key, tasks, task_seq),
        Screen::Register(s) => s.handle_key(key, tasks, task_seq),
        Screen::Todos(s) => s.handle_key(key, tasks, task_seq, todos),
        Screen::Detail(s) => s.handle_key(key, tasks, task_seq),
    };
    apply_screen_update(app, screen_update)
}

/// Applies a screen's result: overlay first, then navigation (which cancels
/// the departing screens' tasks), then returns the combined effects.
fn apply_screen_update(app: &mut AppState, screen_update: ScreenUpdate) -> Vec<UiEffect> {
    let ScreenUpdate {
        mut effects,
        nav,
        overlay,
    } = screen_update;
    if let Some(overlay) = overlay {
        app.overlay = Some(overlay);
    }
    if let Some(nav) = nav {
        effects.extend(apply_nav(app, nav));
    }
    for effect in &effects {
        if matches!(effect, UiEffect::Quit) {
            app.should_quit = true;
        }
    }
    effects
}

fn apply_nav(app: &mut AppState, nav: Nav) -> Vec<UiEffect> {
    match nav {
        Nav::Push(screen) => {
            app.screens.push(screen);
            vec![]
        }
        Nav::Replace(screen) => {
            let effects = pop_any(app);
            app.screens.push(screen);
            effects
        }
        Nav::ReplaceAll(screen) => {
            let mut effects = Vec::new();
            while let Some(old) = app.screens.pop() {
                effects.extend(old.cancel_tasks(&mut app.tasks));
            }
            app.screens.push(screen);
            effects
        }
        Nav::Pop => pop_screen(app),
    }
}

/// Pops the active screen unless it is the last one on the stack.
fn pop_screen(app: &mut AppState) -> Vec<UiEffect> {
    if app.screens.len() <= 1 {
        return vec![];
    }
    pop_any(app)
}

fn pop_any(app: &mut AppState) -> Vec<UiEffect> {
    let Some(old) = app.screens.pop() else {
        return vec![];
    };
    old.cancel_tasks(&mut app.tasks)
}
