//! Shared test utilities for CLI integration tests.

#![allow(dead_code)]

use assert_cmd::Command;
use expect_test::Expect;

/// Create a new command for the tally binary.
pub fn tally() -> Command {
    Command::new(env!("CARGO_BIN_EXE_tally"))
}

/// Run a command and check that stdout matches the expected output.
pub fn check_stdout(args: &[&str], expected: Expect) {
    let output = tally().args(args).output().expect("failed to execute command");
    let stdout = String::from_utf8_lossy(&output.stdout);
    expected.assert_eq(&stdout);
}

/// Run a command with colors disabled and return its stderr.
pub fn stderr_of(args: &[&str]) -> String {
    let output = tally()
        .arg("--no-color")
        .args(args)
        .output()
        .expect("failed to execute command");
    String::from_utf8_lossy(&output.stderr).into_owned()
}
