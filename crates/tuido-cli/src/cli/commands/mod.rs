//! Subcommand handlers.

pub mod auth;
pub mod config;
pub mod todo;

use anyhow::{Context, Result};
use tuido_core::{SessionStore, SessionToken};

/// Resolves a password argument, falling back to a line read from stdin.
pub(crate) fn resolve_password(password: Option<String>) -> Result<String> {
    if let Some(password) = password {
        return Ok(password);
    }
    eprint!("Password: ");
    let mut line = String::new();
    std::io::stdin()
        .read_line(&mut line)
        .context("read password from stdin")?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

/// The stored session token, or a hint to log in first.
pub(crate) fn require_token(sessions: &SessionStore) -> Result<SessionToken> {
    sessions
        .token()?
        .context("Not logged in. Run `tuido login` first.")
}
