// Author: Eshan Roy
// SPDX-License-Identifier: MIT

use assert_cmd::Command;
use predicates::prelude::*;
use std::path::Path;
use tempfile::TempDir;

fn git(dir: &Path, args: &[&str]) -> String {
    let output = std::process::Command::new("git")
        .args(args)
        .current_dir(dir)
        .output()
        .unwrap();
    assert!(output.status.success(), "git {:?} failed", args);
    String::from_utf8_lossy(&output.stdout).trim().to_string()
}

fn init_repo() -> TempDir {
    let dir = TempDir::new().unwrap();
    git(dir.path(), &["init", "-q"]);
    git(dir.path(), &["config", "user.email", "test@example.com"]);
    git(dir.path(), &["config", "user.name", "Test User"]);
    git(dir.path(), &["config", "commit.gpgsign", "false"]);
    dir
}

fn scribe_cmd(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("scribe").unwrap();
    cmd.current_dir(dir)
        .env("SCRIBE_LLM_ENABLED", "false")
        .env_remove("SCRIBE_LLM_HOST")
        .env_remove("SCRIBE_LLM_MODEL");
    cmd
}

#[test]
fn test_version() {
    let dir = TempDir::new().unwrap();
    scribe_cmd(dir.path())
        .arg("version")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("scribe "));
}

#[test]
fn test_init_writes_parseable_config() {
    let dir = TempDir::new().unwrap();
    scribe_cmd(dir.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("[OK] init -> scribe.toml"));

    let written = std::fs::read_to_string(dir.path().join("scribe.toml")).unwrap();
    assert!(scribe::config::parse_config(&written).is_ok());

    scribe_cmd(dir.path())
        .arg("init")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("[ERR] init -> scribe.toml"));

    scribe_cmd(dir.path()).args(["init", "--force"]).assert().success();
}

#[test]
fn test_commit_without_staged_changes_fails() {
    let dir = init_repo();
    scribe_cmd(dir.path())
        .arg("commit")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("[ERR] commit"))
        .stderr(predicate::str::contains("no staged changes"));
}

#[test]
fn test_commit_outside_repository_fails() {
    let dir = TempDir::new().unwrap();
    scribe_cmd(dir.path())
        .args(["commit", "--no-llm"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Not a git repository"));
}

#[test]
fn test_add_then_heuristic_commit() {
    let dir = init_repo();
    std::fs::create_dir_all(dir.path().join("src")).unwrap();
    std::fs::write(dir.path().join("src/lib.rs"), "pub fn hello() {}\n").unwrap();

    scribe_cmd(dir.path())
        .arg("add")
        .assert()
        .success()
        .stdout(predicate::str::contains("[OK] add -> all"));

    scribe_cmd(dir.path())
        .args(["preview", "--no-llm"])
        .assert()
        .success()
        .stdout("feat(src): auto summary [+1/-0]\n");

    scribe_cmd(dir.path())
        .args(["commit", "--no-llm"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("[OK] commit -> "));

    assert_eq!(
        git(dir.path(), &["log", "-1", "--pretty=%B"]),
        "feat(src): auto summary [+1/-0]"
    );
}

#[test]
fn test_add_from_subdirectory() {
    let dir = init_repo();
    let src = dir.path().join("src");
    std::fs::create_dir_all(src.join("util")).unwrap();
    std::fs::write(src.join("lib.rs"), "pub fn hello() {}\n").unwrap();
    std::fs::write(src.join("util/mod.rs"), "pub fn help() {}\n").unwrap();
    std::fs::write(dir.path().join("lib.rs"), "// decoy\n").unwrap();

    scribe_cmd(&src)
        .args(["add", "lib.rs"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[OK] add -> lib.rs"));
    assert_eq!(git(dir.path(), &["diff", "--cached", "--name-only"]), "src/lib.rs");

    scribe_cmd(&src).args(["add", "util"]).assert().success();
    assert_eq!(
        git(dir.path(), &["diff", "--cached", "--name-only"]),
        "src/lib.rs\nsrc/util/mod.rs"
    );

    scribe_cmd(&src)
        .args(["add", "missing.rs"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("did not match any files"));
}

#[test]
fn test_literal_message() {
    let dir = init_repo();
    std::fs::write(dir.path().join("notes.txt"), "remember\n").unwrap();
    scribe_cmd(dir.path()).args(["add", "notes.txt"]).assert().success();

    scribe_cmd(dir.path())
        .args(["commit", "-m", "   "])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Empty commit message"));

    scribe_cmd(dir.path())
        .args(["commit", "-m", "chore: keep notes"])
        .assert()
        .success();

    assert_eq!(git(dir.path(), &["log", "-1", "--pretty=%s"]), "chore: keep notes");
}

#[test]
fn test_unreachable_model_falls_back_to_heuristics() {
    let dir = init_repo();
    std::fs::write(
        dir.path().join("scribe.toml"),
        "[llm]\nhost = \"http://127.0.0.1:9\"\nmax_attempts = 1\nbackoff_step_secs = 0\ntimeout_secs = 2\n",
    )
    .unwrap();
    std::fs::write(dir.path().join("README.md"), "# demo\n").unwrap();
    scribe_cmd(dir.path()).args(["add", "README.md"]).assert().success();

    scribe_cmd(dir.path())
        .args(["preview", "--llm"])
        .assert()
        .success()
        .stdout("docs(README.md): auto summary [+1/-0]\n");
}

#[test]
fn test_invalid_config_is_reported() {
    let dir = init_repo();
    std::fs::write(dir.path().join("scribe.toml"), "[llm]\nmax_attempts = 0\n").unwrap();
    scribe_cmd(dir.path())
        .arg("preview")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("llm.max_attempts"));
}
