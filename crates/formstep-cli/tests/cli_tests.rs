use std::{fs, path::PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const QUOTE_FORM: &str = r#"{
  "tag": "form",
  "attrs": { "id": "quote", "data-form": "multistep" },
  "children": [
    { "tag": "div", "attrs": { "data-form": "step" },
      "children": [
        { "tag": "label", "attrs": { "for": "email" }, "text": "Email *" },
        { "tag": "input", "attrs": { "id": "email", "name": "email", "type": "email", "required": "" } },
        { "tag": "input", "attrs": { "type": "radio", "name": "plan", "value": "basic" } },
        { "tag": "input", "attrs": { "type": "radio", "name": "plan", "value": "pro" } }
      ] },
    { "tag": "div", "attrs": { "data-form": "step", "data-skip-if": "plan=pro" },
      "children": [
        { "tag": "input", "attrs": { "name": "seats", "type": "number" } }
      ] },
    { "tag": "div", "attrs": { "data-form": "step" },
      "children": [
        { "tag": "textarea", "attrs": { "name": "notes" } }
      ] },
    { "tag": "button", "attrs": { "data-form": "next-btn" }, "text": "Next" },
    { "tag": "button", "attrs": { "data-form": "submit-btn" }, "text": "Send" }
  ]
}"#;

const BASIC_SCRIPT: &str = r#"[
  { "action": "next" },
  { "action": "input", "name": "email", "text": "ada@example.com" },
  { "action": "check", "name": "plan", "value": "basic" },
  { "action": "click", "button": "next" },
  { "action": "submit" }
]"#;

/// Helper function to create a temporary directory for CLI tests
fn create_cli_test_environment() -> TempDir {
    TempDir::new().expect("Failed to create temporary directory")
}

fn write_file(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, contents).expect("Failed to write fixture");
    path
}

/// Helper function to create a Command with --no-color flag for testing
fn formstep_cmd() -> Command {
    let mut cmd = Command::cargo_bin("formstep").expect("Failed to find formstep binary");
    cmd.arg("--no-color");
    cmd
}

#[test]
fn test_cli_inspect_lists_steps() {
    let temp_dir = create_cli_test_environment();
    let store_path = temp_dir.path().join("cli_test.db");
    let document = write_file(&temp_dir, "quote.json", QUOTE_FORM);

    formstep_cmd()
        .args([
            "--store-file",
            store_path.to_str().unwrap(),
            "inspect",
            document.to_str().unwrap(),
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("# Form quote (3 steps)"))
        .stdout(predicate::str::contains("Skipped when: `plan=pro`"))
        .stdout(predicate::str::contains("email* (email)"));
}

#[test]
fn test_cli_inspect_unknown_form_fails() {
    let temp_dir = create_cli_test_environment();
    let store_path = temp_dir.path().join("cli_test.db");
    let document = write_file(&temp_dir, "quote.json", QUOTE_FORM);

    formstep_cmd()
        .args([
            "--store-file",
            store_path.to_str().unwrap(),
            "inspect",
            document.to_str().unwrap(),
            "--form",
            "missing",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no form with id 'missing'"));
}

#[test]
fn test_cli_run_records_submission() {
    let temp_dir = create_cli_test_environment();
    let store_path = temp_dir.path().join("cli_test.db");
    let store_arg = store_path.to_str().unwrap();
    let document = write_file(&temp_dir, "quote.json", QUOTE_FORM);
    let script = write_file(&temp_dir, "script.json", BASIC_SCRIPT);

    formstep_cmd()
        .args([
            "--store-file",
            store_arg,
            "run",
            document.to_str().unwrap(),
            script.to_str().unwrap(),
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("## 1. next"))
        .stdout(predicate::str::contains("Step 1 has incomplete fields:\n- Email"))
        .stdout(predicate::str::contains("Moved forward from step 1 to step 3 of 3"))
        .stdout(predicate::str::contains("Submitted form quote"))
        .stdout(predicate::str::contains("Success: Recorded submission 1"));

    formstep_cmd()
        .args(["--store-file", store_arg, "submissions", "show", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("# Submission 1 (quote)"))
        .stdout(predicate::str::contains("**email**: ada@example.com"))
        .stdout(predicate::str::contains("**plan**: basic"));
}

#[test]
fn test_cli_run_mirrors_form_data() {
    let temp_dir = create_cli_test_environment();
    let store_path = temp_dir.path().join("cli_test.db");
    let document = write_file(&temp_dir, "quote.json", QUOTE_FORM);
    let script = write_file(&temp_dir, "script.json", BASIC_SCRIPT);
    let config = write_file(
        &temp_dir,
        "config.json",
        r#"{ "mirror_storage": true, "mirror_key": "quoteData" }"#,
    );

    formstep_cmd()
        .args([
            "--store-file",
            store_path.to_str().unwrap(),
            "run",
            document.to_str().unwrap(),
            script.to_str().unwrap(),
            "--config",
            config.to_str().unwrap(),
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Mirrored form data under `quoteData`"));
}

#[test]
fn test_cli_run_reports_missing_control() {
    let temp_dir = create_cli_test_environment();
    let store_path = temp_dir.path().join("cli_test.db");
    let document = write_file(&temp_dir, "quote.json", QUOTE_FORM);
    let script = write_file(
        &temp_dir,
        "script.json",
        r#"[{ "action": "input", "name": "phone", "text": "555" }]"#,
    );

    formstep_cmd()
        .args([
            "--store-file",
            store_path.to_str().unwrap(),
            "run",
            document.to_str().unwrap(),
            script.to_str().unwrap(),
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Action 1 (input `phone`) failed"));
}

#[test]
fn test_cli_list_empty_submissions() {
    let temp_dir = create_cli_test_environment();
    let store_path = temp_dir.path().join("cli_test.db");

    formstep_cmd()
        .args(["--store-file", store_path.to_str().unwrap(), "submissions", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No submissions found."));
}

#[test]
fn test_cli_default_command_lists_submissions() {
    let temp_dir = create_cli_test_environment();
    let store_path = temp_dir.path().join("cli_test.db");

    formstep_cmd()
        .args(["--store-file", store_path.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("# Submissions"));
}

#[test]
fn test_cli_delete_requires_confirmation() {
    let temp_dir = create_cli_test_environment();
    let store_path = temp_dir.path().join("cli_test.db");
    let store_arg = store_path.to_str().unwrap();
    let document = write_file(&temp_dir, "quote.json", QUOTE_FORM);
    let script = write_file(&temp_dir, "script.json", BASIC_SCRIPT);

    formstep_cmd()
        .args([
            "--store-file",
            store_arg,
            "run",
            document.to_str().unwrap(),
            script.to_str().unwrap(),
        ])
        .assert()
        .success();

    formstep_cmd()
        .args(["--store-file", store_arg, "submissions", "delete", "1"])
        .assert()
        .failure();

    formstep_cmd()
        .args(["--store-file", store_arg, "submissions", "delete", "1", "--confirm"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Success: Deleted submission 1 of form quote"));

    formstep_cmd()
        .args(["--store-file", store_arg, "submissions", "list", "--form", "quote"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No submissions found."));
}

#[test]
fn test_cli_invalid_submission_id() {
    let temp_dir = create_cli_test_environment();
    let store_path = temp_dir.path().join("cli_test.db");

    formstep_cmd()
        .args([
            "--store-file",
            store_path.to_str().unwrap(),
            "submissions",
            "show",
            "99999",
        ])
        .assert()
        .failure();
}

#[test]
fn test_cli_help_output() {
    formstep_cmd()
        .args(["--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Commands:"))
        .stdout(predicate::str::contains("inspect"))
        .stdout(predicate::str::contains("run"))
        .stdout(predicate::str::contains("submissions"));
}

#[test]
fn test_cli_version_output() {
    formstep_cmd()
        .args(["--version"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("formstep "));
}
