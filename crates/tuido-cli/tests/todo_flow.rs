//! Integration tests for the todo commands against a mock API server.

use std::fs;

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use tempfile::TempDir;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates a temp TUIDO_HOME with a stored session token.
fn logged_in_home() -> TempDir {
    let home = TempDir::new().expect("create temp tuido home");
    fs::write(home.path().join("session.json"), r#"{"token":"tok123"}"#).unwrap();
    home
}

fn can_bind_localhost() -> bool {
    std::net::TcpListener::bind("127.0.0.1:0").is_ok()
}

#[tokio::test]
async fn test_todo_list_prints_ids_and_titles() {
    if !can_bind_localhost() {
        eprintln!("Skipping: cannot bind localhost TCP port in this environment.");
        return;
    }
    let home = logged_in_home();
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/todos"))
        .and(header("authorization", "Bearer tok123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "data": [
                {"_id": "1", "title": "Buy milk", "description": "2%"},
                {"_id": "2", "title": "Walk dog"}
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    cargo_bin_cmd!("tuido")
        .env("TUIDO_HOME", home.path())
        .env("TUIDO_API_URL", server.uri())
        .args(["todo", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Buy milk"))
        .stdout(predicate::str::contains("Walk dog"));
}

#[tokio::test]
async fn test_todo_show_prints_server_fields() {
    if !can_bind_localhost() {
        eprintln!("Skipping: cannot bind localhost TCP port in this environment.");
        return;
    }
    let home = logged_in_home();
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/todos/42"))
        .and(header("authorization", "Bearer tok123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "data": {"_id": "42", "title": "Buy milk", "description": "2%"}
        })))
        .expect(1)
        .mount(&server)
        .await;

    cargo_bin_cmd!("tuido")
        .env("TUIDO_HOME", home.path())
        .env("TUIDO_API_URL", server.uri())
        .args(["todo", "show", "42"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Buy milk"))
        .stdout(predicate::str::contains("2%"));
}

/// Editing only the title keeps the fetched description in the PUT body.
#[tokio::test]
async fn test_todo_edit_merges_with_fetched_fields() {
    if !can_bind_localhost() {
        eprintln!("Skipping: cannot bind localhost TCP port in this environment.");
        return;
    }
    let home = logged_in_home();
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/todos/42"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "data": {"_id": "42", "title": "Buy milk", "description": "2%"}
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/api/todos/42"))
        .and(header("authorization", "Bearer tok123"))
        .and(body_json(serde_json::json!({
            "title": "Buy oat milk",
            "description": "2%"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "data": {"_id": "42", "title": "Buy oat milk", "description": "2%"}
        })))
        .expect(1)
        .mount(&server)
        .await;

    cargo_bin_cmd!("tuido")
        .env("TUIDO_HOME", home.path())
        .env("TUIDO_API_URL", server.uri())
        .args(["todo", "edit", "42", "--title", "Buy oat milk"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Saved."))
        .stdout(predicate::str::contains("Buy oat milk"));
}

/// With no flags, edit PUTs the fetched fields back unchanged.
#[tokio::test]
async fn test_todo_edit_without_flags_round_trips_fetched_fields() {
    if !can_bind_localhost() {
        eprintln!("Skipping: cannot bind localhost TCP port in this environment.");
        return;
    }
    let home = logged_in_home();
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/todos/42"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "data": {"_id": "42", "title": "Buy milk", "description": "2%"}
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/api/todos/42"))
        .and(body_json(serde_json::json!({
            "title": "Buy milk",
            "description": "2%"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "data": {"_id": "42", "title": "Buy milk", "description": "2%"}
        })))
        .expect(1)
        .mount(&server)
        .await;

    cargo_bin_cmd!("tuido")
        .env("TUIDO_HOME", home.path())
        .env("TUIDO_API_URL", server.uri())
        .args(["todo", "edit", "42"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Saved."));
}

#[test]
fn test_todo_commands_require_login() {
    let home = TempDir::new().unwrap();

    cargo_bin_cmd!("tuido")
        .env("TUIDO_HOME", home.path())
        .args(["todo", "show", "42"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Not logged in"));
}

#[tokio::test]
async fn test_server_error_surfaces_message_on_stderr() {
    if !can_bind_localhost() {
        eprintln!("Skipping: cannot bind localhost TCP port in this environment.");
        return;
    }
    let home = logged_in_home();
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/todos/42"))
        .respond_with(
            ResponseTemplate::new(404)
                .set_body_json(serde_json::json!({"message": "Todo not found"})),
        )
        .mount(&server)
        .await;

    cargo_bin_cmd!("tuido")
        .env("TUIDO_HOME", home.path())
        .env("TUIDO_API_URL", server.uri())
        .args(["todo", "show", "42"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Todo not found"));
}
