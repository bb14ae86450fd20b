use std::path::Path;
use std::process::{Command, Output};

use serde_json::Value;
use tempfile::TempDir;

fn git(dir: &Path, args: &[&str]) {
    let output = Command::new("git")
        .args(args)
        .current_dir(dir)
        .output()
        .unwrap();
    assert!(
        output.status.success(),
        "git {args:?} failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
}

fn setup_repo() -> TempDir {
    let dir = TempDir::new().unwrap();
    git(dir.path(), &["init", "-q"]);
    git(dir.path(), &["config", "user.email", "test@test.com"]);
    git(dir.path(), &["config", "user.name", "Test User"]);
    git(dir.path(), &["config", "commit.gpgsign", "false"]);
    dir
}

fn commit_file(dir: &Path, path: &str, content: &str, seconds: i64) {
    std::fs::write(dir.join(path), content).unwrap();
    git(dir, &["add", "-A"]);
    let date = format!("@{seconds} +0000");
    let output = Command::new("git")
        .args(["commit", "-q", "-m", &format!("update {path}")])
        .env("GIT_AUTHOR_DATE", &date)
        .env("GIT_COMMITTER_DATE", &date)
        .current_dir(dir)
        .output()
        .unwrap();
    assert!(output.status.success(), "commit failed");
}

fn docstory(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_docstory"))
        .args(args)
        .arg("--repo")
        .arg(dir)
        .env_remove("RUST_LOG")
        .output()
        .unwrap()
}

fn stdout_json(output: &Output) -> Value {
    serde_json::from_slice(&output.stdout).unwrap()
}

#[test]
fn prints_story_as_json() {
    let dir = setup_repo();
    commit_file(dir.path(), "app.json", r#"{"port":80}"#, 1_000);
    commit_file(dir.path(), "app.json", r#"{"port":81}"#, 2_000);

    let output = docstory(dir.path(), &["app.json"]);
    assert!(output.status.success());
    assert!(output.stderr.is_empty(), "{}", String::from_utf8_lossy(&output.stderr));

    let story = stdout_json(&output);
    assert_eq!(story["path"], "app.json");
    assert_eq!(story["commits"].as_array().unwrap().len(), 2);
    assert_eq!(story["tree"]["tree"]["port"]["value"], 81);
    assert_eq!(story["tree"]["tree"]["port"]["history"][1]["type"], "modified");
}

#[test]
fn limit_flag_overrides_config() {
    let dir = setup_repo();
    std::fs::write(dir.path().join("docstory.toml"), "[history]\nlimit = 1\n").unwrap();
    commit_file(dir.path(), "app.json", r#"{"a":1}"#, 1_000);
    commit_file(dir.path(), "app.json", r#"{"a":2}"#, 2_000);
    commit_file(dir.path(), "app.json", r#"{"a":3}"#, 3_000);

    let from_config = stdout_json(&docstory(dir.path(), &["app.json"]));
    assert_eq!(from_config["commits"].as_array().unwrap().len(), 1);

    let from_flag = stdout_json(&docstory(dir.path(), &["app.json", "--limit", "2"]));
    assert_eq!(from_flag["commits"].as_array().unwrap().len(), 2);
}

#[test]
fn parse_failures_are_summarized_on_stderr() {
    let dir = setup_repo();
    commit_file(dir.path(), "app.json", r#"{"a":1}"#, 1_000);
    commit_file(dir.path(), "app.json", "{", 2_000);

    let output = docstory(dir.path(), &["app.json"]);
    assert!(output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("1 commit of app.json could not be parsed"), "{stderr}");
    assert!(stderr.contains("EPARSE"), "{stderr}");
    assert_eq!(stdout_json(&output)["errors"][0]["code"], "EPARSE");
}

#[test]
fn missing_document_fails() {
    let dir = setup_repo();
    commit_file(dir.path(), "app.json", "{}", 1_000);

    let output = docstory(dir.path(), &["nope.json"]);
    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("ENOENT"), "{stderr}");
}

#[test]
fn invalid_config_is_reported() {
    let dir = setup_repo();
    commit_file(dir.path(), "app.json", "{}", 1_000);
    std::fs::write(dir.path().join("docstory.toml"), "[history]\nunknown = 1\n").unwrap();

    let output = docstory(dir.path(), &["app.json"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("docstory.toml"), "{stderr}");
}
