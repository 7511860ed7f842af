//! Todo command handlers.

use anyhow::{Context, Result};
use tuido_core::config::Config;
use tuido_core::{ApiClient, SessionStore, Todo, TodoEdit};

use super::require_token;

pub async fn list(config: &Config) -> Result<()> {
    let client = ApiClient::new(config)?;
    let token = require_token(&SessionStore::open_default())?;

    let todos = client.list_todos(&token).await.context("list todos")?;
    if todos.is_empty() {
        println!("No todos.");
        return Ok(());
    }
    for todo in &todos {
        println!("{}  {}", todo.id, todo.title);
    }
    Ok(())
}

pub async fn show(config: &Config, id: &str) -> Result<()> {
    let client = ApiClient::new(config)?;
    let token = require_token(&SessionStore::open_default())?;

    let todo = client
        .fetch_todo(&token, id)
        .await
        .with_context(|| format!("fetch todo {id}"))?;
    print_todo(&todo);
    Ok(())
}

pub async fn edit(
    config: &Config,
    id: &str,
    title: Option<String>,
    description: Option<String>,
) -> Result<()> {
    let client = ApiClient::new(config)?;
    let token = require_token(&SessionStore::open_default())?;

    // Fetch first so an omitted field keeps its server-side value. With no
    // flags this round-trips the fetched fields unchanged.
    let current = client
        .fetch_todo(&token, id)
        .await
        .with_context(|| format!("fetch todo {id}"))?;
    let mut edit = TodoEdit::from_todo(&current);
    if let Some(title) = title {
        edit.title = title;
    }
    if let Some(description) = description {
        edit.description = description;
    }

    let saved = client
        .update_todo(&token, id, &edit)
        .await
        .with_context(|| format!("update todo {id}"))?;
    println!("Saved.");
    print_todo(&saved);
    Ok(())
}

fn print_todo(todo: &Todo) {
    println!("id:          {}", todo.id);
    println!("title:       {}", todo.title);
    println!("description: {}", todo.description);
}
