//! Auth command handlers.

use anyhow::{Context, Result};
use tuido_core::config::Config;
use tuido_core::{ApiClient, Credentials, Registration, SessionStore};

use super::resolve_password;

pub async fn login(config: &Config, username: String, password: Option<String>) -> Result<()> {
    let password = resolve_password(password)?;
    let client = ApiClient::new(config)?;
    let sessions = SessionStore::open_default();

    let token = client
        .login(&Credentials {
            username: username.clone(),
            password,
        })
        .await
        .context("login failed")?;
    sessions.save_token(&token).context("store session token")?;

    println!("Logged in as {username}.");
    Ok(())
}

pub async fn register(
    config: &Config,
    username: String,
    email: String,
    password: Option<String>,
) -> Result<()> {
    let password = resolve_password(password)?;
    let client = ApiClient::new(config)?;

    client
        .register(&Registration {
            username,
            email,
            password,
        })
        .await
        .context("registration failed")?;

    println!("Account created. Run `tuido login` to sign in.");
    Ok(())
}

pub fn logout() -> Result<()> {
    let sessions = SessionStore::open_default();
    sessions.clear().context("clear session token")?;
    println!("Logged out.");
    Ok(())
}
