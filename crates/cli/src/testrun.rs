// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Test-runner collaborator.
//!
//! Runs the external test command in the working tree, captures its stdout
//! for the parser, and bounds the whole run with a timeout. A timeout or a
//! spawn failure is a soft outcome with empty output, never an error: the
//! pipeline degrades to an empty snapshot and the report explains itself.

use std::path::Path;
use std::process::Stdio;
use std::time::{Duration, Instant};
use tokio::process::Command;

/// Flags forcing serial, unbuffered execution so per-test lines appear in
/// order and timings are not skewed by parallelism.
const TEST_ARGS: [&str; 6] = [
    "test",
    "--all-features",
    "--workspace",
    "--",
    "--test-threads=1",
    "--nocapture",
];

/// Outcome of one captured command invocation.
#[derive(Clone, Debug)]
pub struct RunOutcome {
    /// Captured stdout; empty after a timeout or spawn failure.
    pub stdout: String,
    /// Whether the command ran to completion with exit code zero.
    pub success: bool,
    /// Whether the command was killed for exceeding the timeout.
    pub timed_out: bool,
    /// Wall time spent on the invocation.
    pub elapsed: Duration,
}

impl RunOutcome {
    fn empty(timed_out: bool, elapsed: Duration) -> Self {
        Self {
            stdout: String::new(),
            success: false,
            timed_out,
            elapsed,
        }
    }
}

/// Run the full test suite in `repo`, bounded by `timeout`.
pub async fn run_test_suite(repo: &Path, timeout: Duration) -> RunOutcome {
    run_captured("cargo", &TEST_ARGS, repo, timeout).await
}

/// Spawn a command, capture its stdout, and kill it on timeout.
pub async fn run_captured(
    program: &str,
    args: &[&str],
    cwd: &Path,
    timeout: Duration,
) -> RunOutcome {
    let started = Instant::now();
    let child = Command::new(program)
        .args(args)
        .current_dir(cwd)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true)
        .spawn();

    let child = match child {
        Ok(child) => child,
        Err(_) => return RunOutcome::empty(false, started.elapsed()),
    };

    match tokio::time::timeout(timeout, child.wait_with_output()).await {
        Ok(Ok(output)) => RunOutcome {
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            success: output.status.success(),
            timed_out: false,
            elapsed: started.elapsed(),
        },
        Ok(Err(_)) => RunOutcome::empty(false, started.elapsed()),
        // kill_on_drop reaps the child when the handle is dropped here
        Err(_) => RunOutcome::empty(true, started.elapsed()),
    }
}

#[cfg(test)]
#[path = "testrun_tests.rs"]
mod tests;
