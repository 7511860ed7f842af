//! UI event types.
//!
//! Everything the reducer reacts to arrives as a `UiEvent`: terminal input,
//! the frame tick, and completion results sent by effect handlers through
//! the runtime inbox. Completion events carry the `TaskId` of the request
//! that produced them so stale results can be rejected.
//!
//! Failure payloads are the user-facing message (already reduced via
//! `ApiError::user_message`); the detailed error is logged by the handler.

use tuido_core::Todo;

use crate::common::TaskId;

#[derive(Debug)]
pub enum UiEvent {
    /// Periodic tick (spinner animation, render cadence).
    Tick,
    /// Raw terminal input.
    Terminal(crossterm::event::Event),

    /// Login attempt finished (token already persisted on success).
    LoginFinished {
        task: TaskId,
        result: Result<(), String>,
    },
    /// Registration attempt finished.
    RegisterFinished {
        task: TaskId,
        result: Result<(), String>,
    },
    /// Todo list fetch finished.
    TodosLoaded {
        task: TaskId,
        result: Result<Vec<Todo>, String>,
    },
    /// Single todo fetch finished.
    TodoFetched {
        task: TaskId,
        result: Result<Todo, String>,
    },
    /// Todo update finished.
    TodoSaved {
        task: TaskId,
        result: Result<Todo, String>,
    },
}
