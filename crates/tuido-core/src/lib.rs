//! Core library for tuido: configuration, session storage, and the typed
//! HTTP layer for the todo API.
//!
//! Nothing in this crate touches a terminal. Screens (the `tuido-tui` crate)
//! and headless commands (the `tuido` binary) both sit on top of the same
//! request/response layer here, so every flow can be tested without a
//! rendering environment.

pub mod api;
pub mod config;
pub mod logging;
pub mod session;
pub mod todos;
pub mod types;

pub use api::{ApiClient, ApiError};
pub use config::Config;
pub use session::{SessionError, SessionStore, SessionToken};
pub use todos::TodoList;
pub use types::{Credentials, Registration, Todo, TodoEdit};
