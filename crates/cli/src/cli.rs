// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! CLI argument parsing.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Compare unit-test inventories and runtimes between two refs
#[derive(Parser, Debug, Clone)]
#[command(name = "testdrift", version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Compare test inventories by scanning test declarations (no execution)
    Scan(CompareArgs),
    /// Run the test suite on both refs and compare per-test runtimes
    Run(CompareArgs),
}

/// Options shared by both pipelines.
///
/// Every option can also come from a config file; a flag given on the
/// command line wins over the file, which wins over the built-in default.
#[derive(Args, Debug, Clone, Default)]
pub struct CompareArgs {
    /// Baseline ref (left side of the comparison)
    #[arg(long, value_name = "REF", env = "TESTDRIFT_SOURCE_REF")]
    pub source_ref: Option<String>,

    /// Ref to compare against (right side; default: master)
    #[arg(long, value_name = "REF", env = "TESTDRIFT_TARGET_REF")]
    pub target_ref: Option<String>,

    /// Where to write the Markdown report (default: docs/slow_test_analysis.md,
    /// relative to the working tree)
    #[arg(long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Working tree to analyze (default: current directory)
    #[arg(long, value_name = "DIR")]
    pub repo: Option<PathBuf>,

    /// Timeout for one test-suite run, in seconds (default: 3600)
    #[arg(long, value_name = "SECS")]
    pub timeout_secs: Option<u64>,

    /// Config file (TOML or JSON) supplying any of the above
    #[arg(long, value_name = "FILE", env = "TESTDRIFT_CONFIG")]
    pub config: Option<PathBuf>,
}

#[cfg(test)]
#[path = "cli_tests.rs"]
mod tests;
