// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Test inventory and runtime comparison primitives.
//!
//! This crate holds the pure core of testdrift: qualified test identifiers,
//! per-ref snapshots of a test suite, the source scanner and runner-output
//! parser that populate them, the reconciler that diffs two snapshots, and
//! the Markdown report renderer. Nothing in here touches the filesystem,
//! spawns processes, or talks to version control; those collaborators live
//! in the `testdrift` CLI crate.

mod reconcile;
mod report;
mod runner;
mod scanner;
mod snapshot;

pub use reconcile::{reconcile, DurationDelta, Reconciliation};
pub use report::render;
pub use runner::{
    line_records, merge_records, parse_runner_output, summary_records, ParsedTimings, TestStatus,
    TimingRecord,
};
pub use scanner::scan_source;
pub use snapshot::{Snapshot, TestIdent, SCOPE_DELIMITER};
