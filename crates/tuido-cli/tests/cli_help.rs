use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;

#[test]
fn test_help_shows_all_commands() {
    cargo_bin_cmd!("tuido")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("login"))
        .stdout(predicate::str::contains("register"))
        .stdout(predicate::str::contains("logout"))
        .stdout(predicate::str::contains("todo"))
        .stdout(predicate::str::contains("config"));
}

#[test]
fn test_todo_help_shows_subcommands() {
    cargo_bin_cmd!("tuido")
        .args(["todo", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("list"))
        .stdout(predicate::str::contains("show"))
        .stdout(predicate::str::contains("edit"));
}

#[test]
fn test_version_flag() {
    cargo_bin_cmd!("tuido")
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("0.1"));
}
