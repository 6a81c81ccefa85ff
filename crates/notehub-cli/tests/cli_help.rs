use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;

#[test]
fn test_help_shows_all_commands() {
    cargo_bin_cmd!("notehub")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("login"))
        .stdout(predicate::str::contains("register"))
        .stdout(predicate::str::contains("ls"))
        .stdout(predicate::str::contains("config"));
}

#[test]
fn test_config_help_shows_subcommands() {
    cargo_bin_cmd!("notehub")
        .args(["config", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("path"))
        .stdout(predicate::str::contains("init"))
        .stdout(predicate::str::contains("set-server"));
}

#[test]
fn test_version_flag() {
    cargo_bin_cmd!("notehub")
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("notehub"));
}

#[test]
fn test_ls_semester_requires_stream() {
    cargo_bin_cmd!("notehub")
        .args(["ls", "--semester", "3"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--stream"));
}
