//! UI effect types.
//!
//! Effects are commands returned by the reducer that the runtime executes.
//! They represent I/O and task spawning only (no direct UI mutations).
//!
//! This keeps the reducer pure: it only mutates state and returns effects,
//! never performs I/O or spawns tasks directly.
//!
//! Each spawn effect carries the `TaskId` allocated by the reducer and the
//! `CancellationToken` the runtime scopes the request to. Cancellation is
//! also reducer-initiated, via `UiEffect::CancelTask`: the reducer decides
//! when to cancel (navigation away, user Esc), the runtime executes it.

use tokio_util::sync::CancellationToken;
use tuido_core::{Credentials, Registration, TodoEdit};

use crate::common::{TaskId, TaskKind};

/// Effects returned by the reducer for the runtime to execute.
#[derive(Debug)]
pub enum UiEffect {
    /// Quit the application.
    Quit,

    /// Spawn the login request; on success the handler persists the token.
    SpawnLogin {
        task: TaskId,
        cancel: CancellationToken,
        credentials: Credentials,
    },

    /// Spawn the registration request.
    SpawnRegister {
        task: TaskId,
        cancel: CancellationToken,
        registration: Registration,
    },

    /// Spawn the todo list fetch.
    SpawnTodoList {
        task: TaskId,
        cancel: CancellationToken,
    },

    /// Spawn a single todo fetch.
    SpawnTodoFetch {
        task: TaskId,
        cancel: CancellationToken,
        id: String,
    },

    /// Spawn a todo update.
    SpawnTodoUpdate {
        task: TaskId,
        cancel: CancellationToken,
        id: String,
        edit: TodoEdit,
    },

    /// Cancel an in-flight task. The pending response is discarded.
    CancelTask {
        kind: TaskKind,
        token: CancellationToken,
    },
}
