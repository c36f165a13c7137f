//! Shared E2E test helpers for `maplink` binary tests.

use assert_cmd::cargo::cargo_bin_cmd;
use std::time::Duration;

/// Default timeout for CLI tests.
pub const TIMEOUT_BASIC: Duration = Duration::from_secs(10);

/// Overrides that would leak the caller's environment into the tests.
const MAPLINK_ENV_VARS: &[&str] = &[
    "MAPLINK_DEBUG",
    "MAPLINK_DOUBLE_TAP_MS",
    "MAPLINK_RECORD_CAPACITY",
    "MAPLINK_EVENT_QUEUE_CAPACITY",
    "MAPLINK_EXECUTOR_QUEUE_CAPACITY",
    "MAPLINK_BRIDGE_DEADLINE_MS",
    "RUST_LOG",
];

/// Build a Command for the `maplink` binary isolated in a tempdir.
///
/// The tempdir serves as both `$HOME` and the project root, so neither
/// the global nor a stray project config is picked up. Keep the guard
/// alive for the test's duration.
pub fn maplink_cmd() -> (assert_cmd::Command, tempfile::TempDir) {
    let tmp = tempfile::tempdir().expect("create temp dir");
    let mut cmd: assert_cmd::Command = cargo_bin_cmd!("maplink");
    cmd.timeout(TIMEOUT_BASIC);
    for var in MAPLINK_ENV_VARS {
        cmd.env_remove(var);
    }
    cmd.env("HOME", tmp.path());
    cmd.args(["-C", tmp.path().to_str().expect("valid utf8")]);
    (cmd, tmp)
}
