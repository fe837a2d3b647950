//! End-to-end tests for the `pf` binary
//!
//! Each test points the store, export directory and log directory at its own
//! temp dir via a config file and XDG_DATA_HOME.

use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

struct Sandbox {
    dir: TempDir,
    config: PathBuf,
}

impl Sandbox {
    fn new() -> Self {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let config = dir.path().join("pf.yml");
        fs::write(
            &config,
            format!(
                "storage:\n  path: {}\nexport:\n  dir: {}\n",
                dir.path().join("store").display(),
                dir.path().join("exports").display()
            ),
        )
        .expect("Failed to write config");
        Self { dir, config }
    }

    fn pf(&self) -> Command {
        let mut cmd = Command::cargo_bin("pf").expect("pf binary");
        cmd.arg("--config")
            .arg(&self.config)
            .env("XDG_DATA_HOME", self.dir.path().join("data"))
            .env("NO_COLOR", "1")
            .current_dir(self.dir.path());
        cmd
    }

    fn exports(&self) -> PathBuf {
        self.dir.path().join("exports")
    }

    /// First saved prompt id as printed by `pf list`
    fn first_saved_id(&self) -> String {
        let output = self.pf().arg("list").output().expect("pf list");
        let stdout = String::from_utf8_lossy(&output.stdout).to_string();
        stdout
            .split_whitespace()
            .next()
            .expect("at least one saved prompt")
            .to_string()
    }
}

fn read(path: &Path) -> String {
    fs::read_to_string(path).expect("Failed to read file")
}

#[test]
fn test_templates_and_roles() {
    let sandbox = Sandbox::new();
    sandbox
        .pf()
        .arg("templates")
        .assert()
        .success()
        .stdout(predicate::str::contains("Code Review").and(predicate::str::contains("Market Analysis")));

    sandbox
        .pf()
        .arg("roles")
        .assert()
        .success()
        .stdout(predicate::str::contains("20. Innovation Strategist"));

    sandbox
        .pf()
        .arg("tips")
        .assert()
        .success()
        .stdout(predicate::str::contains("Pro Tips"));
}

#[test]
fn test_compose_prints_prompt() {
    let sandbox = Sandbox::new();
    sandbox
        .pf()
        .args(["compose", "--role", "Data Analyst", "--task", "Summarize Q3"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Role: Data Analyst\n\nTask: Summarize Q3\n\nContext: "))
        .stdout(predicate::str::contains("in progress"));
}

#[test]
fn test_compose_from_template_is_complete() {
    let sandbox = Sandbox::new();
    sandbox
        .pf()
        .args(["compose", "--template", "code review"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Role: Senior Software Engineer"))
        .stdout(predicate::str::contains("in progress").not());
}

#[test]
fn test_unknown_template_fails() {
    let sandbox = Sandbox::new();
    sandbox
        .pf()
        .args(["compose", "--template", "nope"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown template"));
}

#[test]
fn test_save_list_show_delete() {
    let sandbox = Sandbox::new();
    sandbox.pf().arg("list").assert().success().stdout(predicate::str::contains("No saved prompts"));

    sandbox
        .pf()
        .args(["compose", "--task", "Write release notes", "--save", "Release"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Saved Release"));

    sandbox.pf().arg("list").assert().success().stdout(predicate::str::contains("Release"));

    let id = sandbox.first_saved_id();
    sandbox
        .pf()
        .args(["show", &id])
        .assert()
        .success()
        .stdout(predicate::str::contains("Task: Write release notes"));

    sandbox.pf().args(["delete", &id]).assert().success();
    sandbox.pf().arg("list").assert().success().stdout(predicate::str::contains("No saved prompts"));
    sandbox.pf().args(["delete", &id]).assert().failure();
}

#[test]
fn test_saving_blank_prompt_fails() {
    let sandbox = Sandbox::new();
    sandbox.pf().args(["compose", "--save", "Empty"]).assert().failure();
    sandbox.pf().arg("list").assert().success().stdout(predicate::str::contains("No saved prompts"));
}

#[test]
fn test_show_unknown_id_fails() {
    let sandbox = Sandbox::new();
    sandbox
        .pf()
        .args(["show", "42"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No saved prompt with id 42"));
}

#[test]
fn test_compose_export() {
    let sandbox = Sandbox::new();
    sandbox
        .pf()
        .args(["compose", "--role", "UX/UI Designer", "--task", "Audit the signup flow", "--export"])
        .assert()
        .success();

    let content = read(&sandbox.exports().join("UX_UI Designer.txt"));
    assert!(content.starts_with("# UX/UI Designer Prompt\n\nRole: UX/UI Designer"));
}

#[test]
fn test_export_saved_prompt_to_dir() {
    let sandbox = Sandbox::new();
    sandbox
        .pf()
        .args(["compose", "--task", "Plan the sprint", "--save", "Sprint"])
        .assert()
        .success();

    let id = sandbox.first_saved_id();
    let out = sandbox.dir.path().join("elsewhere");
    sandbox
        .pf()
        .args(["export", &id, "--out"])
        .arg(&out)
        .assert()
        .success();

    let content = read(&out.join("prompt.txt"));
    assert!(content.starts_with("# Untitled Prompt\n\n"));
    assert!(content.contains("Task: Plan the sprint"));
}

#[test]
fn test_defaults_prefill_new_prompts() {
    let sandbox = Sandbox::new();
    sandbox
        .pf()
        .args(["compose", "--role", "Legal Expert", "--format", "Bullet points", "--set-defaults"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Preferences saved!"));

    sandbox
        .pf()
        .arg("prefs")
        .assert()
        .success()
        .stdout(predicate::str::contains("Legal Expert").and(predicate::str::contains("Bullet points")));

    sandbox
        .pf()
        .args(["compose", "--task", "Review the NDA"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Role: Legal Expert"))
        .stdout(predicate::str::contains("Output Format: Bullet points"));
}
