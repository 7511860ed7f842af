//! Effect handlers.
//!
//! Pure async functions: each performs one API round trip (plus session
//! storage where the operation calls for it) and returns the `UiEvent` the
//! runtime puts in the inbox. No handler touches UI state.
//!
//! Errors are logged here with full detail; the event carries only the
//! user-facing message the screen renders.

use tuido_core::{ApiClient, Credentials, Registration, SessionStore, SessionToken, TodoEdit};

use crate::common::TaskId;
use crate::events::UiEvent;

pub async fn login(
    client: ApiClient,
    sessions: SessionStore,
    task: TaskId,
    credentials: Credentials,
) -> UiEvent {
    let result = async {
        let token = client.login(&credentials).await.map_err(|err| {
            tracing::warn!(error = %err, "login request failed");
            err.user_message()
        })?;
        // Storage failures surface like any other: no token means the user
        // must know the session did not stick.
        sessions.save_token(&token).map_err(|err| {
            tracing::error!(error = %err, "failed to persist session token");
            err.to_string()
        })
    }
    .await;
    UiEvent::LoginFinished { task, result }
}

pub async fn register(client: ApiClient, task: TaskId, registration: Registration) -> UiEvent {
    let result = client.register(&registration).await.map_err(|err| {
        tracing::warn!(error = %err, "registration request failed");
        err.user_message()
    });
    UiEvent::RegisterFinished { task, result }
}

pub async fn todo_list(client: ApiClient, sessions: SessionStore, task: TaskId) -> UiEvent {
    let result = async {
        let token = stored_token(&sessions)?;
        client.list_todos(&token).await.map_err(|err| {
            tracing::warn!(error = %err, "todo list request failed");
            err.user_message()
        })
    }
    .await;
    UiEvent::TodosLoaded { task, result }
}

pub async fn todo_fetch(
    client: ApiClient,
    sessions: SessionStore,
    task: TaskId,
    id: String,
) -> UiEvent {
    let result = async {
        let token = stored_token(&sessions)?;
        client.fetch_todo(&token, &id).await.map_err(|err| {
            tracing::warn!(error = %err, todo_id = %id, "todo fetch failed");
            err.user_message()
        })
    }
    .await;
    UiEvent::TodoFetched { task, result }
}

pub async fn todo_update(
    client: ApiClient,
    sessions: SessionStore,
    task: TaskId,
    id: String,
    edit: TodoEdit,
) -> UiEvent {
    let result = async {
        let token = stored_token(&sessions)?;
        client.update_todo(&token, &id, &edit).await.map_err(|err| {
            tracing::warn!(error = %err, todo_id = %id, "todo update failed");
            err.user_message()
        })
    }
    .await;
    UiEvent::TodoSaved { task, result }
}

fn stored_token(sessions: &SessionStore) -> Result<SessionToken, String> {
    match sessions.token() {
        Ok(Some(token)) => Ok(token),
        Ok(None) => Err("Not signed in. Restart and log in again.".to_string()),
        Err(err) => {
            tracing::error!(error = %err, "failed to read session token");
            Err(err.to_string())
        }
    }
}
