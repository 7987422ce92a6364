//! Command-line behavior of `unilogd`.

use crate::prelude::*;

#[test]
fn help_prints_usage() {
    let output = run_unilogd(&["--help"]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("USAGE:"), "{}", stdout);
    assert!(stdout.contains("UNILOG_CONFIG"), "{}", stdout);
}

#[test]
fn version_prints_package_version() {
    let output = run_unilogd(&["--version"]);
    assert!(output.status.success());
    similar_asserts::assert_eq!(
        String::from_utf8_lossy(&output.stdout).trim(),
        format!("unilogd {}", env!("CARGO_PKG_VERSION"))
    );
}

#[test]
fn unexpected_argument_exits_nonzero() {
    let output = run_unilogd(&["--bogus"]);
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("unexpected argument '--bogus'"), "{}", stderr);
}

#[test]
fn invalid_config_refuses_to_start() {
    let output = unilogd_cmd()
        .env("MAX_FILE_SIZE_MB", "0")
        .env("UNILOG_CONFIG", "/nonexistent/logging.json")
        .output()
        .unwrap();
    assert!(!output.status.success());
}
