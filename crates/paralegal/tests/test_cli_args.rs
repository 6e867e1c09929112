//! CLI argument and fail-fast behavior tests

use assert_cmd::Command;
use predicates::prelude::*;
use serial_test::serial;

fn cmd() -> Command {
    let mut cmd = Command::cargo_bin("paralegal").unwrap();
    cmd.env_remove("BOT_API_URL").env_remove("BOT_API_TOKEN");
    cmd
}

#[test]
fn test_help_lists_subcommands() {
    cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("status"))
        .stdout(predicate::str::contains("schedule"))
        .stdout(predicate::str::contains("watch"));
}

#[test]
fn test_version_flag() {
    cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("paralegal"));
}

#[test]
#[serial]
fn test_status_fails_fast_without_configuration() {
    cmd()
        .arg("status")
        .assert()
        .failure()
        .stdout(predicate::str::contains("BOT_API_URL"));
}

#[test]
#[serial]
fn test_tools_degrades_gracefully_without_configuration() {
    // The tool factory contract: missing configuration yields no tools,
    // not an error.
    cmd()
        .arg("tools")
        .assert()
        .success()
        .stdout(predicate::str::contains("no tools"));
}

#[test]
fn test_schedule_add_requires_flags() {
    cmd()
        .args(["schedule", "add", "--name", "briefing"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("required"));
}

#[test]
fn test_unknown_subcommand_fails() {
    cmd()
        .arg("frobnicate")
        .assert()
        .failure()
        .stderr(predicate::str::contains("unrecognized subcommand"));
}
