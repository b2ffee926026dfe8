//! CLI integration tests
//!
//! Network-free: only argument handling and failure paths are exercised.
use predicates::prelude::*;

fn cmd() -> assert_cmd::Command {
    assert_cmd::Command::cargo_bin("pentaudit").unwrap()
}

#[test]
fn test_cli_help() {
    cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("five-pillar on-page SEO audit"))
        .stdout(predicate::str::contains("--keyword"))
        .stdout(predicate::str::contains("--pagespeed-key"));
}

#[test]
fn test_cli_version() {
    cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("pentaudit"));
}

#[test]
fn test_cli_requires_url() {
    cmd().assert().failure().stderr(predicate::str::contains("URL"));
}

#[test]
fn test_cli_invalid_url_fails() {
    cmd()
        .arg("not-a-url")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid URL"));
}

#[test]
fn test_cli_non_http_scheme_fails() {
    cmd().arg("ftp://example.com/page").assert().failure();
}

#[test]
fn test_cli_rejects_unknown_format() {
    cmd()
        .args(["-f", "yaml", "https://example.com"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid format"));
}
