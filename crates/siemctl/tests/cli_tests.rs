//! CLI integration tests for siemctl
//!
//! Tests the CLI surface against the built binary:
//! - siemctl --help            lists every subcommand
//! - protected commands without a session redirect to login (exit 64)
//! - logout always succeeds, with or without a session
//! - whoami renders a persisted session without touching the network
//! - login while already authenticated redirects to the dashboard

use std::env;
use std::path::PathBuf;
use std::process::Command;

fn get_binary_path() -> Option<PathBuf> {
    let manifest_dir = env::var("CARGO_MANIFEST_DIR").unwrap();
    let target = PathBuf::from(manifest_dir)
        .parent()
        .unwrap()
        .parent()
        .unwrap()
        .join("target");

    for profile in ["debug", "release"] {
        let path = target.join(profile).join("siemctl");
        if path.exists() {
            return Some(path);
        }
    }
    None
}

const SESSION_JSON: &str = r#"{
  "token": "tok123456789",
  "user": {
    "id": "u1",
    "email": "analyst@example.com",
    "first_name": "Ada",
    "last_name": "Byron"
  }
}"#;

/// Command against an isolated state/cache sandbox. Nothing listens on
/// the configured manager port, so any network access fails fast.
fn sandboxed(binary: &PathBuf, dir: &tempfile::TempDir) -> Command {
    let mut cmd = Command::new(binary);
    cmd.env("SIEMCTL_SESSION_FILE", dir.path().join("session.json"))
        .env("SIEMCTL_LOG_FILE", dir.path().join("ctl.jsonl"))
        .env("XDG_CACHE_HOME", dir.path().join("cache"))
        .env("SIEMPLUS_URL", "http://127.0.0.1:9");
    cmd
}

#[test]
fn test_help_lists_subcommands() {
    let Some(binary) = get_binary_path() else {
        eprintln!("Skipping: siemctl binary not built");
        return;
    };

    let output = Command::new(&binary)
        .arg("--help")
        .output()
        .expect("Failed to run siemctl");

    let stdout = String::from_utf8_lossy(&output.stdout);
    for subcommand in ["login", "logout", "whoami", "dashboard", "agents", "alerts", "rules", "cases"] {
        assert!(
            stdout.contains(subcommand),
            "help output missing '{}'",
            subcommand
        );
    }
}

#[test]
fn test_protected_command_without_session_redirects_to_login() {
    let Some(binary) = get_binary_path() else {
        eprintln!("Skipping: siemctl binary not built");
        return;
    };
    let dir = tempfile::tempdir().unwrap();

    let output = sandboxed(&binary, &dir)
        .arg("agents")
        .output()
        .expect("Failed to run siemctl");

    assert_eq!(output.status.code(), Some(64));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("siemctl login"), "got: {}", stdout);
}

#[test]
fn test_logout_without_session_succeeds() {
    let Some(binary) = get_binary_path() else {
        eprintln!("Skipping: siemctl binary not built");
        return;
    };
    let dir = tempfile::tempdir().unwrap();

    let output = sandboxed(&binary, &dir)
        .arg("logout")
        .output()
        .expect("Failed to run siemctl");

    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Logged out"));
}

#[test]
fn test_whoami_reads_persisted_session_offline() {
    let Some(binary) = get_binary_path() else {
        eprintln!("Skipping: siemctl binary not built");
        return;
    };
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("session.json"), SESSION_JSON).unwrap();

    let output = sandboxed(&binary, &dir)
        .arg("whoami")
        .output()
        .expect("Failed to run siemctl");

    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("analyst@example.com"));
    assert!(stdout.contains("Ada Byron"));
    // The bearer token is previewed, never rendered in full.
    assert!(!stdout.contains("tok123456789"));
}

#[test]
fn test_login_while_authenticated_redirects_to_dashboard() {
    let Some(binary) = get_binary_path() else {
        eprintln!("Skipping: siemctl binary not built");
        return;
    };
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("session.json"), SESSION_JSON).unwrap();

    let output = sandboxed(&binary, &dir)
        .arg("login")
        .output()
        .expect("Failed to run siemctl");

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(
        stdout.contains("Already logged in as analyst@example.com"),
        "got: {}",
        stdout
    );
    // The dashboard fetch itself fails: the manager is unreachable and
    // the cache sandbox is empty.
    assert_eq!(output.status.code(), Some(70));
}

#[test]
fn test_unknown_severity_filter_is_rejected_locally() {
    let Some(binary) = get_binary_path() else {
        eprintln!("Skipping: siemctl binary not built");
        return;
    };
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("session.json"), SESSION_JSON).unwrap();

    let output = sandboxed(&binary, &dir)
        .args(["alerts", "--severity", "urgent"])
        .output()
        .expect("Failed to run siemctl");

    assert_eq!(output.status.code(), Some(1));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("unknown severity"), "got: {}", stdout);
}
