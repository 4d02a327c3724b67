// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Parsing of captured test-runner output into per-test durations.
//!
//! The parser is an ordered list of independent matcher strategies over
//! the runner's stdout text:
//!
//! 1. Three line-level patterns (parenthesized seconds, bracketed seconds,
//!    and a loose trailing-number form) each yield timing records; a
//!    combinator merges them, keeping the larger duration when an
//!    identifier repeats.
//! 2. Only when no line yields a duration, a summary-line fallback
//!    extracts the passed count and total elapsed time from the aggregate
//!    result line and assigns every reported test the arithmetic mean.
//!    These durations are approximations, flagged as such.
//! 3. When neither strategy fires the result is an empty mapping; the
//!    caller reports the absence of timing data, it is not an error.
//!
//! The parser is pure: running the external test command and capturing its
//! output is the invoking collaborator's job.

use crate::snapshot::TestIdent;
use regex::Regex;
use std::collections::btree_map::Entry;
use std::collections::BTreeMap;
use std::sync::LazyLock;

/// Outcome of a single test as reported by the runner.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TestStatus {
    /// Reported as `ok`.
    Ok,
    /// Reported as `FAILED`.
    Failed,
    /// Reported as `ignored`.
    Ignored,
}

impl TestStatus {
    fn parse(word: &str) -> Option<Self> {
        match word {
            "ok" => Some(TestStatus::Ok),
            "FAILED" => Some(TestStatus::Failed),
            "ignored" => Some(TestStatus::Ignored),
            _ => None,
        }
    }
}

/// One record emitted by a matcher strategy.
#[derive(Clone, Debug, PartialEq)]
pub struct TimingRecord {
    pub ident: TestIdent,
    pub status: TestStatus,
    /// Seconds, absent when the matched line carried no duration.
    pub duration: Option<f64>,
}

/// Parsed timing data for one runner invocation.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ParsedTimings {
    /// Per-test durations in seconds.
    pub durations: BTreeMap<TestIdent, f64>,
    /// True when durations came from the summary-line fallback and are an
    /// even split of the total rather than measurements.
    pub approximate: bool,
}

// `test mod::path::name ... ok (0.123s)` and variants. The identifier is
// one or more `::`-separated segments without whitespace or lone colons.
static LINE_PATTERNS: LazyLock<[Regex; 3]> = LazyLock::new(|| {
    // SAFETY: these patterns are compile-time constants and known valid
    #[allow(clippy::expect_used)]
    let compile = |pattern: &str| Regex::new(pattern).expect("runner line pattern is invalid");
    [
        compile(r"test\s+([^\s:]+(?:::[^\s:]+)*)\s+\.\.\.\s+(ok|FAILED|ignored)\s+\(([\d.]+)s\)"),
        compile(r"test\s+([^\s:]+(?:::[^\s:]+)*)\s+\.\.\.\s+(ok|FAILED|ignored)\s+\[([\d.]+)s\]"),
        compile(r"test\s+([^\s:]+(?:::[^\s:]+)*)\s+\.\.\.\s+(ok|FAILED|ignored).*?([\d.]+)\s*s"),
    ]
});

// Aggregate result line, e.g.
// `test result: ok. 12 passed; 0 failed; ... finished in 1.23s`,
// with a looser second form for runners that phrase the total differently.
static SUMMARY_PATTERNS: LazyLock<[Regex; 2]> = LazyLock::new(|| {
    // SAFETY: these patterns are compile-time constants and known valid
    #[allow(clippy::expect_used)]
    let compile = |pattern: &str| Regex::new(pattern).expect("summary pattern is invalid");
    [
        compile(r"(?i)(\d+)\s+passed.*?finished\s+in\s+([\d.]+)s"),
        compile(r"(?i)(\d+)\s+passed.*?(\d+\.\d+)\s*s"),
    ]
});

static TEST_NAME: LazyLock<Regex> = LazyLock::new(|| {
    // SAFETY: this pattern is a compile-time constant and known valid
    #[allow(clippy::expect_used)]
    Regex::new(r"test\s+([^\s:]+(?:::[^\s:]+)*)").expect("test name pattern is invalid")
});

/// Apply the three line-level patterns to every line of `stdout`.
///
/// Patterns are tried independently, so one line can contribute a record
/// per pattern; `merge_records` resolves the repeats.
pub fn line_records(stdout: &str) -> Vec<TimingRecord> {
    let mut records = Vec::new();
    for pattern in LINE_PATTERNS.iter() {
        for line in stdout.lines() {
            let Some(caps) = pattern.captures(line) else {
                continue;
            };
            let (Some(name), Some(status), Some(secs)) = (caps.get(1), caps.get(2), caps.get(3))
            else {
                continue;
            };
            let Some(status) = TestStatus::parse(status.as_str()) else {
                continue;
            };
            // A malformed number (e.g. bare dots matched by `[\d.]+`) is
            // skipped, mirroring the lenient extraction this replaces.
            let Ok(duration) = secs.as_str().parse::<f64>() else {
                continue;
            };
            records.push(TimingRecord {
                ident: TestIdent::new(name.as_str()),
                status,
                duration: Some(duration),
            });
        }
    }
    records
}

/// Summary-line fallback: when no per-test durations exist, spread the
/// total elapsed time evenly over every reported `ok`/`FAILED` test line.
pub fn summary_records(stdout: &str) -> Vec<TimingRecord> {
    let Some((passed, total_elapsed)) = summary_totals(stdout) else {
        return Vec::new();
    };
    if passed == 0 {
        return Vec::new();
    }

    let mut reported = Vec::new();
    for line in stdout.lines() {
        if !line.contains("test ") {
            continue;
        }
        let status = if line.contains("... ok") {
            TestStatus::Ok
        } else if line.contains("... FAILED") {
            TestStatus::Failed
        } else {
            continue;
        };
        if let Some(name) = TEST_NAME.captures(line).and_then(|caps| caps.get(1)) {
            reported.push((TestIdent::new(name.as_str()), status));
        }
    }
    if reported.is_empty() {
        return Vec::new();
    }

    let mean = total_elapsed / reported.len() as f64;
    reported
        .into_iter()
        .map(|(ident, status)| TimingRecord {
            ident,
            status,
            duration: Some(mean),
        })
        .collect()
}

/// Extract `(passed_count, total_elapsed_seconds)` from the aggregate
/// result line, if present.
fn summary_totals(stdout: &str) -> Option<(u64, f64)> {
    for pattern in SUMMARY_PATTERNS.iter() {
        let Some(caps) = pattern.captures(stdout) else {
            continue;
        };
        let passed = caps.get(1).and_then(|m| m.as_str().parse::<u64>().ok());
        let elapsed = caps.get(2).and_then(|m| m.as_str().parse::<f64>().ok());
        if let (Some(passed), Some(elapsed)) = (passed, elapsed) {
            return Some((passed, elapsed));
        }
    }
    None
}

/// Merge timing records into a per-identifier duration map.
///
/// Records without a duration are dropped; when an identifier repeats the
/// larger duration wins, so retried or re-printed tests report the worst
/// observed case.
pub fn merge_records(records: impl IntoIterator<Item = TimingRecord>) -> BTreeMap<TestIdent, f64> {
    let mut merged = BTreeMap::new();
    for record in records {
        let Some(duration) = record.duration else {
            continue;
        };
        match merged.entry(record.ident) {
            Entry::Vacant(slot) => {
                slot.insert(duration);
            }
            Entry::Occupied(mut slot) => {
                if duration > *slot.get() {
                    slot.insert(duration);
                }
            }
        }
    }
    merged
}

/// Parse one captured runner invocation into per-test durations.
///
/// Runs the line strategies first and falls back to the summary strategy
/// only when they yield nothing; an output with no recognizable timing at
/// all parses to an empty mapping.
pub fn parse_runner_output(stdout: &str) -> ParsedTimings {
    let durations = merge_records(line_records(stdout));
    if !durations.is_empty() {
        return ParsedTimings {
            durations,
            approximate: false,
        };
    }
    let durations = merge_records(summary_records(stdout));
    let approximate = !durations.is_empty();
    ParsedTimings {
        durations,
        approximate,
    }
}

#[cfg(test)]
#[path = "runner_tests.rs"]
mod tests;
