// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! End-to-end tests: the cg binary against real temporary repositories.

use assert_cmd::Command;
use predicates::prelude::*;
use std::path::Path;
use tempfile::TempDir;

fn init_repo(dir: &TempDir) -> git2::Repository {
    git2::Repository::init(dir.path()).unwrap()
}

fn stage_file(repo: &git2::Repository, dir: &TempDir, name: &str, content: &[u8]) {
    std::fs::write(dir.path().join(name), content).unwrap();
    let mut index = repo.index().unwrap();
    index.add_path(Path::new(name)).unwrap();
    index.write().unwrap();
}

fn write_message(dir: &TempDir, message: &str) -> std::path::PathBuf {
    let path = dir.path().join("COMMIT_EDITMSG");
    std::fs::write(&path, message).unwrap();
    path
}

fn cg(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("cg").unwrap();
    cmd.current_dir(dir.path());
    cmd
}

#[test]
fn commit_msg_without_jira_id_blocks() {
    let dir = TempDir::new().unwrap();
    init_repo(&dir);
    let msg = write_message(&dir, "Fix bug\n");

    cg(&dir)
        .args(["commit-msg", msg.to_str().unwrap()])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("jira-id-required"));
}

#[test]
fn missing_trailing_newline_in_tracked_extension_blocks() {
    let dir = TempDir::new().unwrap();
    let repo = init_repo(&dir);
    // Pull .txt into the newline-checked set for this repository.
    std::fs::write(
        dir.path().join("cg.toml"),
        "[rules]\nnewline_extensions = [\".c\", \".txt\"]\n",
    )
    .unwrap();
    stage_file(&repo, &dir, "a.txt", b"last line without newline");
    let msg = write_message(&dir, "ABC-42 Fix bug\n");

    cg(&dir)
        .args(["commit-msg", msg.to_str().unwrap()])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("missing-trailing-newline"));
}

#[test]
fn reserved_filename_blocks_even_with_jira_override() {
    let dir = TempDir::new().unwrap();
    let repo = init_repo(&dir);
    stage_file(&repo, &dir, "CON.txt", b"hello\n");
    let msg = write_message(&dir, "Cleanup NO_JIRA\n");

    cg(&dir)
        .args(["commit-msg", msg.to_str().unwrap()])
        .assert()
        .code(1)
        .stdout(
            predicate::str::contains("invalid-windows-filename")
                .and(predicate::str::contains("jira-id-required").not()),
        );
}

#[test]
fn clean_commit_passes() {
    let dir = TempDir::new().unwrap();
    let repo = init_repo(&dir);
    stage_file(&repo, &dir, "main.py", b"print('ok')\n");
    let msg = write_message(&dir, "ABC-1 ok\n");

    cg(&dir)
        .args(["commit-msg", msg.to_str().unwrap()])
        .assert()
        .success();
}

#[test]
fn pre_commit_flags_staged_tab() {
    let dir = TempDir::new().unwrap();
    let repo = init_repo(&dir);
    stage_file(&repo, &dir, "mod.py", b"def f():\n\treturn 1\n");

    cg(&dir)
        .arg("pre-commit")
        .assert()
        .code(1)
        .stdout(predicate::str::contains("tab-character").and(predicate::str::contains("mod.py:2")));
}

#[test]
fn pre_commit_ignores_commit_message_rules() {
    let dir = TempDir::new().unwrap();
    let repo = init_repo(&dir);
    stage_file(&repo, &dir, "main.py", b"print('ok')\n");

    cg(&dir).arg("pre-commit").assert().success();
}

#[test]
fn outside_a_repository_is_a_fatal_error() {
    let dir = TempDir::new().unwrap();
    let msg = write_message(&dir, "ABC-1 ok\n");

    cg(&dir)
        .args(["commit-msg", msg.to_str().unwrap()])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("could not run checks"));
}

#[test]
fn json_output_reports_verdict() {
    let dir = TempDir::new().unwrap();
    let repo = init_repo(&dir);
    stage_file(&repo, &dir, "note.py", b"x = 1\r\n");

    let output = cg(&dir)
        .args(["--format", "json", "pre-commit"])
        .assert()
        .code(1)
        .get_output()
        .stdout
        .clone();

    let json: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(json["passed"], serde_json::json!(false));
    assert_eq!(json["violations"][0]["rule"], "crlf-line-ending");
    assert_eq!(json["violations"][0]["line"], 1);
}

#[test]
fn hooks_install_and_status() {
    let dir = TempDir::new().unwrap();
    init_repo(&dir);

    cg(&dir)
        .args(["hooks", "install"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Installed all hooks"));

    cg(&dir)
        .args(["hooks", "status"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("pre-commit")
                .and(predicate::str::contains("commit-msg"))
                .and(predicate::str::contains("pre-merge-commit")),
        );

    let script =
        std::fs::read_to_string(dir.path().join(".git").join("hooks").join("commit-msg")).unwrap();
    assert!(script.contains("cg commit-msg"));
}

#[test]
fn size_threshold_env_override_warns_but_passes() {
    let dir = TempDir::new().unwrap();
    let repo = init_repo(&dir);
    stage_file(&repo, &dir, "big.py", b"data = '0123456789' * 3\n");
    let msg = write_message(&dir, "ABC-5 add data\n");

    cg(&dir)
        .env("CG_SIZE_THRESHOLD_BYTES", "8")
        .args(["commit-msg", msg.to_str().unwrap()])
        .assert()
        .code(0)
        .stdout(predicate::str::contains("commit-message-size"));
}

#[test]
fn ci_mode_checks_range_and_message() {
    let dir = TempDir::new().unwrap();
    let repo = init_repo(&dir);

    // Base commit on the default branch.
    stage_file(&repo, &dir, "base.py", b"x = 0\n");
    let sig = git2::Signature::now("Test", "test@example.com").unwrap();
    let tree_id = {
        let mut index = repo.index().unwrap();
        index.write_tree().unwrap()
    };
    let tree = repo.find_tree(tree_id).unwrap();
    let base_oid = repo
        .commit(Some("HEAD"), &sig, &sig, "ABC-1 base", &tree, &[])
        .unwrap();

    // One more commit adding a tab.
    stage_file(&repo, &dir, "feature.py", b"def f():\n\treturn 1\n");
    let tree_id = {
        let mut index = repo.index().unwrap();
        index.write_tree().unwrap()
    };
    let tree = repo.find_tree(tree_id).unwrap();
    let parent = repo.find_commit(base_oid).unwrap();
    repo.commit(Some("HEAD"), &sig, &sig, "ABC-2 feature", &tree, &[&parent])
        .unwrap();

    cg(&dir)
        .args([
            "ci",
            "--commit-message",
            "ABC-2 feature",
            "--base",
            &base_oid.to_string(),
        ])
        .assert()
        .code(1)
        .stdout(
            predicate::str::contains("tab-character")
                .and(predicate::str::contains("base.py").not()),
        );
}
