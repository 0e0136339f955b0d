use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

fn binary() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_fieldcheck"))
}

const RULES: &str = r#"
[rules]
apples = ["required", "num:null:10"]
bob = ["required", "sameAs:apples"]
flag = ["bool"]
"#;

fn write_rules(dir: &Path) -> PathBuf {
    let path = dir.join("rules.toml");
    fs::write(&path, RULES).expect("write rules");
    path
}

fn run_check(dir: &Path, input: &str) -> std::process::Output {
    let rules = write_rules(dir);
    let rules = rules.to_string_lossy();
    run_in(dir, &["check", "--format", "json", "--rules", &*rules], input)
}

fn run_in(dir: &Path, args: &[&str], input: &str) -> std::process::Output {
    let mut child = Command::new(binary())
        .current_dir(dir)
        .args(args)
        .env("NO_COLOR", "1")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("failed to run binary");
    child
        .stdin
        .take()
        .expect("stdin")
        .write_all(input.as_bytes())
        .expect("write stdin");
    child.wait_with_output().expect("wait for binary")
}

#[test]
fn check_passes_and_normalizes() {
    let dir = tempfile::tempdir().unwrap();
    let out = run_check(dir.path(), r#"{"apples": 5, "bob": "5", "flag": "TRUE"}"#);

    assert!(out.status.success(), "exit status: {:?}", out.status);
    let output: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(output["success"], true);
    assert!(output["errors"].is_null());
    assert_eq!(output["input"]["flag"], true);
}

#[test]
fn check_reports_failures_with_exit_code_one() {
    let dir = tempfile::tempdir().unwrap();
    let out = run_check(dir.path(), r#"{"apples": 12, "flag": "maybe"}"#);

    assert_eq!(out.status.code(), Some(1));
    let output: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(output["success"], false);
    assert_eq!(output["errors"]["apples"][0]["type"], "num");
    assert_eq!(output["errors"]["bob"][0]["type"], "required");
    assert_eq!(output["errors"]["flag"][0]["type"], "bool");
}

#[test]
fn check_rejects_non_object_input() {
    let dir = tempfile::tempdir().unwrap();
    let out = run_check(dir.path(), "[1, 2, 3]");
    assert!(!out.status.success());
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("JSON object"), "stderr: {}", stderr);
}

#[test]
fn check_finds_rule_file_in_working_directory() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join(".fieldcheck.toml"), RULES).unwrap();

    let out = run_in(
        dir.path(),
        &["check", "--format", "json"],
        r#"{"apples": 3, "bob": 3}"#,
    );
    assert!(out.status.success(), "exit status: {:?}", out.status);
    let output: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(output["success"], true);
}

#[test]
fn check_human_format_summarizes() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join(".fieldcheck.toml"), RULES).unwrap();

    let passed = run_in(dir.path(), &["check"], r#"{"apples": 3, "bob": 3}"#);
    assert!(passed.status.success(), "exit status: {:?}", passed.status);
    let stdout = String::from_utf8_lossy(&passed.stdout);
    assert!(stdout.contains("All 3 fields passed!"), "stdout: {}", stdout);

    let failed = run_in(dir.path(), &["check"], r#"{"apples": 12, "bob": 12}"#);
    assert_eq!(failed.status.code(), Some(1));
    let stdout = String::from_utf8_lossy(&failed.stdout);
    assert!(stdout.contains("apples"), "stdout: {}", stdout);
    assert!(stdout.contains("Found 1 failure in 1 of 3 fields"), "stdout: {}", stdout);
}

#[test]
fn unknown_rules_flag_sets_policy() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join(".fieldcheck.toml"),
        "[rules]\nname = [\"required\", \"mystery\"]\n",
    )
    .unwrap();
    let input = r#"{"name": "bob"}"#;

    let ignored = run_in(dir.path(), &["check", "--format", "json"], input);
    assert!(ignored.status.success(), "exit status: {:?}", ignored.status);

    let rejected = run_in(
        dir.path(),
        &["check", "--format", "json", "--unknown-rules", "error"],
        input,
    );
    assert!(!rejected.status.success());
    assert!(rejected.stdout.is_empty());
    let stderr = String::from_utf8_lossy(&rejected.stderr);
    assert!(stderr.contains("mystery"), "stderr: {}", stderr);

    let invalid = run_in(dir.path(), &["check", "--unknown-rules", "panic"], input);
    assert!(!invalid.status.success());
    let stderr = String::from_utf8_lossy(&invalid.stderr);
    assert!(stderr.contains("--unknown-rules"), "stderr: {}", stderr);
}

#[test]
fn validators_lists_builtins_as_json() {
    let out = Command::new(binary())
        .args(["validators", "--format", "json"])
        .output()
        .expect("failed to run binary");

    assert!(out.status.success(), "exit status: {:?}", out.status);
    let listed: Vec<serde_json::Value> = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(listed.len(), 12);
    assert!(listed
        .iter()
        .any(|v| v["name"] == "date" && v["params"] == serde_json::json!(["after?", "before?"])));
}

#[test]
fn init_writes_starter_rules_once() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("starter.toml");

    let out = Command::new(binary())
        .arg("init")
        .arg(&path)
        .output()
        .expect("failed to run binary");
    assert!(out.status.success(), "exit status: {:?}", out.status);
    assert!(fs::read_to_string(&path).unwrap().contains("[rules]"));

    let again = Command::new(binary())
        .arg("init")
        .arg(&path)
        .output()
        .expect("failed to run binary");
    assert!(!again.status.success());
}
