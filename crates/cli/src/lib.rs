// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Branch-to-branch unit-test comparison tool.
//!
//! testdrift checks out two refs of a Rust working tree in turn, captures a
//! test snapshot from each (either by scanning test declarations or by
//! running the suite and parsing its output), reconciles the two snapshots,
//! and writes a Markdown comparison report. The pure comparison logic lives
//! in the `testdrift-compare` crate; this crate supplies the CLI, the
//! configuration layer, and the git/test-runner/filesystem collaborators.

pub mod cli;
pub mod config;
pub mod diag;
pub mod files;
pub mod git;
pub mod pipeline;
pub mod testrun;
