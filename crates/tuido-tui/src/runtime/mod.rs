//! TUI runtime - owns terminal, runs event loop, executes effects.
//!
//! This is the "Elm runtime" boundary: all side effects happen here. The
//! reducer stays pure and produces effects; this module executes them.
//!
//! Async results use an inbox pattern: handlers send `UiEvent`s to
//! `inbox_tx`, and the runtime drains `inbox_rx` each frame. Cancellable
//! requests are wrapped in a `select!` against their token, so a cancelled
//! request never posts a result.

mod handlers;

use std::future::Future;
use std::io::Stdout;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event;
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tuido_core::{ApiClient, SessionStore};

use crate::effects::UiEffect;
use crate::events::UiEvent;
use crate::state::AppState;
use crate::{render, terminal, update};

/// Tick cadence while requests are in flight (spinner animation).
const ACTIVE_TICK: Duration = Duration::from_millis(80);

/// Tick cadence when idle. Longer timeout reduces CPU usage.
const IDLE_TICK: Duration = Duration::from_millis(250);

/// Full-screen TUI runtime.
///
/// Owns the terminal and state. Runs the event loop and executes effects.
/// Terminal state is restored on drop and on panic.
pub struct TuiRuntime {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    pub state: AppState,
    client: ApiClient,
    sessions: SessionStore,
    inbox_tx: mpsc::UnboundedSender<UiEvent>,
    inbox_rx: mpsc::UnboundedReceiver<UiEvent>,
    /// Effects produced while choosing the start screen, run before the loop.
    startup_effects: Vec<UiEffect>,
    last_tick: Instant,
}

impl TuiRuntime {
    /// Creates the runtime. Starts on the todo list when a stored session
    /// exists, otherwise on the login screen.
    pub fn new(client: ApiClient, sessions: SessionStore) -> Result<Self> {
        terminal::install_panic_hook();
        let terminal = terminal::setup_terminal().context("Failed to setup terminal")?;

        let (state, startup_effects) = match sessions.token() {
            Ok(Some(_)) => {
                let (state, effects) = AppState::at_todos();
                (state, effects)
            }
            Ok(None) => (AppState::at_login(), Vec::new()),
            Err(err) => {
                tracing::warn!(error = %err, "unreadable session file, starting at login");
                (AppState::at_login(), Vec::new())
            }
        };

        let (inbox_tx, inbox_rx) = mpsc::unbounded_channel();
        Ok(Self {
            terminal,
            state,
            client,
            sessions,
            inbox_tx,
            inbox_rx,
            startup_effects,
            last_tick: Instant::now(),
        })
    }

    /// Runs the main event loop until the reducer requests quit.
    pub fn run(&mut self) -> Result<()> {
        let effects = std::mem::take(&mut self.startup_effects);
        self.execute_effects(effects);

        self.terminal.draw(|frame| render::render(&self.state, frame))?;

        while !self.state.should_quit {
            let events = self.collect_events()?;
            let redraw = needs_redraw(&events);

            for event in events {
                let effects = update::update(&mut self.state, event);
                self.execute_effects(effects);
            }

            if redraw {
                self.terminal.draw(|frame| render::render(&self.state, frame))?;
            }
        }

        Ok(())
    }

    /// Collects pending events: drains the inbox, polls the terminal until
    /// the next tick is due, then emits the tick.
    fn collect_events(&mut self) -> Result<Vec<UiEvent>> {
        let mut events = Vec::new();

        while let Ok(event) = self.inbox_rx.try_recv() {
            events.push(event);
        }

        let tick_interval = if self.state.tasks.is_any_running() {
            ACTIVE_TICK
        } else {
            IDLE_TICK
        };

        // Block for terminal input until the tick is due, unless events are
        // already waiting.
        let poll_duration = if events.is_empty() {
            tick_interval.saturating_sub(self.last_tick.elapsed())
        } else {
            Duration::ZERO
        };

        if event::poll(poll_duration)? {
            events.push(UiEvent::Terminal(event::read()?));
            while event::poll(Duration::ZERO)? {
                events.push(UiEvent::Terminal(event::read()?));
            }
        }

        if self.last_tick.elapsed() >= tick_interval {
            events.push(UiEvent::Tick);
            self.last_tick = Instant::now();
        }

        Ok(events)
    }

    fn execute_effects(&mut self, effects: Vec<UiEffect>) {
        for effect in effects {
            self.execute_effect(effect);
        }
    }

    /// Spawns a cancellable handler future. If the token fires first, the
    /// result is never posted to the inbox.
    fn spawn_cancellable<F>(&self, cancel: CancellationToken, future: F)
    where
        F: Future<Output = UiEvent> + Send + 'static,
    {
        let tx = self.inbox_tx.clone();
        tokio::spawn(async move {
            tokio::select! {
                () = cancel.cancelled() => {}
                event = future => {
                    let _ = tx.send(event);
                }
            }
        });
    }

    fn execute_effect(&mut self, effect: UiEffect) {
        match effect {
            UiEffect::Quit => {
                self.state.should_quit = true;
            }
            UiEffect::CancelTask { kind, token } => {
                tracing::debug!(?kind, "cancelling in-flight task");
                token.cancel();
            }
            UiEffect::SpawnLogin {
                task,
                cancel,
                credentials,
            } => {
                let client = self.client.clone();
                let sessions = self.sessions.clone();
                self.spawn_cancellable(cancel, handlers::login(client, sessions, task, credentials));
            }
            UiEffect::SpawnRegister {
                task,
                cancel,
                registration,
            } => {
                let client = self.client.clone();
                self.spawn_cancellable(cancel, handlers::register(client, task, registration));
            }
            UiEffect::SpawnTodoList { task, cancel } => {
                let client = self.client.clone();
                let sessions = self.sessions.clone();
                self.spawn_cancellable(cancel, handlers::todo_list(client, sessions, task));
            }
            UiEffect::SpawnTodoFetch { task, cancel, id } => {
                let client = self.client.clone();
                let sessions = self.sessions.clone();
                self.spawn_cancellable(cancel, handlers::todo_fetch(client, sessions, task, id));
            }
            UiEffect::SpawnTodoUpdate {
                task,
                cancel,
                id,
                edit,
            } => {
                let client = self.client.clone();
                let sessions = self.sessions.clone();
                self.spawn_cancellable(
                    cancel,
                    handlers::todo_update(client, sessions, task, id, edit),
                );
            }
        }
    }
}

impl Drop for TuiRuntime {
    fn drop(&mut self) {
        let _ = terminal::restore_terminal();
    }
}

/// Any non-empty batch redraws: typed input must echo on the frame that
/// processes it, not wait for the next tick. `collect_events` blocks when
/// idle, so this keeps the redraw rate bounded by the tick cadence plus
/// actual input.
fn needs_redraw(events: &[UiEvent]) -> bool {
    !events.is_empty()
}

#[cfg(test)]
mod tests {
    use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers};

    use super::*;

    #[test]
    fn key_input_redraws_without_waiting_for_a_tick() {
        let key = UiEvent::Terminal(Event::Key(KeyEvent::new(
            KeyCode::Char('a'),
            KeyModifiers::NONE,
        )));
        assert!(needs_redraw(&[key]));
    }

    #[test]
    fn empty_batch_skips_the_redraw() {
        assert!(!needs_redraw(&[]));
    }
}
