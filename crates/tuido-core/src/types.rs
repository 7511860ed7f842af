//! Wire types for the todo API.
//!
//! Successful responses arrive wrapped in a `{ "data": ... }` envelope;
//! error responses carry `{ "message": ... }`. Todos are identified by a
//! server-assigned `_id` that never changes after creation.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A single todo as the server returns it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Todo {
    /// Server-assigned identifier, immutable.
    #[serde(rename = "_id")]
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
}

/// Login request body. Transient: lives only in screen-local form state.
#[derive(Clone, Serialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl fmt::Debug for Credentials {
    // Password never lands in logs.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Registration request body. Same lifecycle as [`Credentials`].
#[derive(Clone, Serialize)]
pub struct Registration {
    pub username: String,
    pub email: String,
    pub password: String,
}

impl fmt::Debug for Registration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registration")
            .field("username", &self.username)
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// The two editable fields sent on update. The id travels in the URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TodoEdit {
    pub title: String,
    pub description: String,
}

impl TodoEdit {
    /// Edit buffer pre-filled from a fetched todo. A save without further
    /// editing round-trips the fetched fields unchanged.
    pub fn from_todo(todo: &Todo) -> Self {
        Self {
            title: todo.title.clone(),
            description: todo.description.clone(),
        }
    }
}

/// Success envelope: `{ "data": T }`.
#[derive(Debug, Deserialize)]
pub struct Data<T> {
    pub data: T,
}

/// Error body: `{ "message": "..." }`. Absence falls back to a generic text.
#[derive(Debug, Deserialize)]
pub struct ErrorBody {
    pub message: String,
}

/// Payload inside the login envelope.
#[derive(Debug, Deserialize)]
pub(crate) struct LoginData {
    pub token: String,
}
