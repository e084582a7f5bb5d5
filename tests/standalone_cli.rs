//! Binary-level tests of the standalone invocation mode.

use assert_cmd::Command;
use predicates::prelude::*;

/// A command running in an empty temp directory, so no settings file or
/// inherited environment variable leaks into the test.
fn command(dir: &tempfile::TempDir) -> Command {
    let mut cmd = Command::cargo_bin("gotify-alert").unwrap();
    cmd.current_dir(dir.path())
        .env_remove("GOTIFY_ALERT_GOTIFY_URL")
        .env_remove("GOTIFY_ALERT_GOTIFY_TOKEN")
        .env_remove("GOTIFY_ALERT_LOG_LEVEL")
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn missing_execute_flag_is_a_fatal_noop() {
    let dir = tempfile::tempdir().unwrap();
    command(&dir)
        .assert()
        .success()
        .stderr(predicate::str::contains("no execute flag given"));
}

#[test]
fn malformed_document_exits_with_integration_code() {
    let dir = tempfile::tempdir().unwrap();
    command(&dir)
        .arg("--execute")
        .write_stdin("{not json")
        .assert()
        .code(4)
        .stderr(predicate::str::contains("Invalid alert document"));
}

#[test]
fn missing_mandatory_fields_exit_with_validation_code() {
    let dir = tempfile::tempdir().unwrap();
    command(&dir)
        .arg("--execute")
        .write_stdin(r#"{"configuration": {}}"#)
        .assert()
        .code(3)
        .stderr(predicate::str::contains("message is a mandatory parameter"));
}

#[test]
fn complete_document_is_delivered() {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("POST", "/message")
        .match_header("x-gotify-key", "tok")
        .with_status(200)
        .create();

    let dir = tempfile::tempdir().unwrap();
    let document = format!(
        r#"{{"configuration": {{"url": "{}", "token": "tok", "message": "m", "priority": "5"}}}}"#,
        server.url()
    );
    command(&dir)
        .arg("--execute")
        .write_stdin(document)
        .assert()
        .success()
        .stderr(predicate::str::contains("Successfully sent Gotify message"));

    mock.assert();
}

#[test]
fn global_settings_come_from_the_environment() {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("POST", "/message")
        .match_header("x-gotify-key", "env-tok")
        .with_status(200)
        .create();

    let dir = tempfile::tempdir().unwrap();
    command(&dir)
        .arg("--execute")
        .env("GOTIFY_ALERT_GOTIFY_URL", server.url())
        .env("GOTIFY_ALERT_GOTIFY_TOKEN", "env-tok")
        .write_stdin(r#"{"configuration": {"message": "m", "priority": "5"}}"#)
        .assert()
        .success();

    mock.assert();
}

#[test]
fn global_settings_come_from_the_settings_file() {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("POST", "/message")
        .match_header("x-gotify-key", "file-tok")
        .with_status(200)
        .create();

    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("gotify-alert.toml"),
        format!(
            "gotify_url = \"{}\"\ngotify_token = \"file-tok\"\n",
            server.url()
        ),
    )
    .unwrap();

    command(&dir)
        .arg("--execute")
        .write_stdin(r#"{"configuration": {"message": "m", "priority": "5"}}"#)
        .assert()
        .success();

    mock.assert();
}

#[test]
fn server_rejection_exits_with_delivery_failure() {
    let mut server = mockito::Server::new();
    server
        .mock("POST", "/message")
        .with_status(400)
        .with_body("bad")
        .create();

    let dir = tempfile::tempdir().unwrap();
    let document = format!(
        r#"{{"configuration": {{"url": "{}", "token": "tok", "message": "m", "priority": "5"}}}}"#,
        server.url()
    );
    command(&dir)
        .arg("--execute")
        .write_stdin(document)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("400").and(predicate::str::contains("bad")));
}

#[test]
fn non_numeric_priority_exits_with_delivery_failure() {
    let dir = tempfile::tempdir().unwrap();
    command(&dir)
        .arg("--execute")
        .write_stdin(
            r#"{"configuration": {"url": "https://h", "token": "tok", "message": "m", "priority": "urgent"}}"#,
        )
        .assert()
        .code(1)
        .stderr(predicate::str::contains("not a base-10 integer"));
}

#[test]
fn missing_settings_file_path_exits_with_integration_code() {
    let dir = tempfile::tempdir().unwrap();
    command(&dir)
        .args(["--execute", "--config", "/does/not/exist.toml"])
        .assert()
        .code(4)
        .stderr(predicate::str::contains("Settings file not found"));
}
