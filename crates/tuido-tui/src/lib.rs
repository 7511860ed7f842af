//! Terminal UI for the tuido client.
//!
//! Elm-style architecture: a pure reducer ([`update::update`]) mutates
//! [`state::AppState`] and returns effects, and the [`runtime`] executes
//! them, feeding results back through an inbox channel.

pub mod common;
pub mod effects;
pub mod events;
pub mod overlays;
pub mod render;
pub mod runtime;
pub mod screens;
pub mod state;
pub mod terminal;
pub mod update;

use anyhow::Result;
use tuido_core::{ApiClient, Config, SessionStore};

/// Launches the full-screen TUI and blocks until the user quits.
///
/// Must be called from within a tokio runtime; request handlers are spawned
/// onto it while the event loop occupies the calling thread.
pub fn run(config: &Config) -> Result<()> {
    let client = ApiClient::new(config)?;
    let sessions = SessionStore::open_default();
    let mut runtime = runtime::TuiRuntime::new(client, sessions)?;
    runtime.run()
}
