// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Markdown rendering of a reconciliation result.
//!
//! Pure serialization: which sections appear depends only on what data the
//! reconciliation carries. Timed comparisons get difference tables, untimed
//! ones get identifier tables plus an explanation of how to obtain timings,
//! and an empty reconciliation gets a degraded report instead of failing.

use crate::reconcile::{DurationDelta, Reconciliation};
use chrono::{DateTime, Local};
use std::fmt::Write;

/// Number of entries in the "largest differences" table.
const TOP_DIFFERENCES: usize = 5;

/// Render a reconciliation as a Markdown report.
pub fn render(recon: &Reconciliation, generated_at: DateTime<Local>) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "# Unit Test Performance Comparison");
    let _ = writeln!(out);
    let _ = writeln!(out, "## Compared Refs");
    let _ = writeln!(out);
    let _ = writeln!(out, "- **Source**: `{}`", recon.left_name);
    let _ = writeln!(out, "- **Target**: `{}`", recon.right_name);
    let _ = writeln!(
        out,
        "- **Generated**: {}",
        generated_at.format("%Y-%m-%d %H:%M:%S")
    );
    let _ = writeln!(out);

    if recon.is_empty() {
        render_no_data(&mut out);
        return out;
    }

    render_summary(&mut out, recon);

    if recon.timed {
        render_difference_tables(&mut out, recon);
    } else {
        render_untimed(&mut out, recon);
    }

    out
}

fn render_summary(out: &mut String, recon: &Reconciliation) {
    let _ = writeln!(out, "## Summary");
    let _ = writeln!(out);
    let _ = writeln!(
        out,
        "- Tests on `{}`: {}",
        recon.left_name,
        recon.left_count()
    );
    let _ = writeln!(
        out,
        "- Tests on `{}`: {}",
        recon.right_name,
        recon.right_count()
    );
    let _ = writeln!(out, "- Common tests: {}", recon.common.len());
    let _ = writeln!(
        out,
        "- Only on `{}`: {}",
        recon.left_name,
        recon.only_left.len()
    );
    let _ = writeln!(
        out,
        "- Only on `{}`: {}",
        recon.right_name,
        recon.only_right.len()
    );

    if recon.timed {
        let delta = recon.right_total - recon.left_total;
        let percent = if recon.left_total > 0.0 {
            delta / recon.left_total * 100.0
        } else {
            0.0
        };
        let _ = writeln!(
            out,
            "- Total runtime on `{}`: {:.3}s",
            recon.left_name, recon.left_total
        );
        let _ = writeln!(
            out,
            "- Total runtime on `{}`: {:.3}s",
            recon.right_name, recon.right_total
        );
        let _ = writeln!(
            out,
            "- Total runtime delta: {:.3}s ({:+.2}%)",
            delta.abs(),
            percent
        );
    }
    let _ = writeln!(out);

    if recon.approximate {
        let _ = writeln!(
            out,
            "> Note: per-test durations were approximated by splitting the suite's \
             total elapsed time evenly across reported tests. Treat them as \
             estimates, not measurements."
        );
        let _ = writeln!(out);
    }
}

fn render_difference_tables(out: &mut String, recon: &Reconciliation) {
    let _ = writeln!(out, "## Top {} Largest Differences", TOP_DIFFERENCES);
    let _ = writeln!(out);
    render_delta_table(out, recon, recon.deltas.iter().take(TOP_DIFFERENCES));

    let _ = writeln!(out, "## Full Comparison");
    let _ = writeln!(out);
    render_delta_table(out, recon, recon.deltas.iter());
}

fn render_delta_table<'a>(
    out: &mut String,
    recon: &Reconciliation,
    deltas: impl Iterator<Item = &'a DurationDelta>,
) {
    let _ = writeln!(
        out,
        "| Test | `{}` (s) | `{}` (s) | Diff (s) | Diff % |",
        recon.left_name, recon.right_name
    );
    let _ = writeln!(out, "|------|----------|----------|----------|--------|");
    for delta in deltas {
        let _ = writeln!(
            out,
            "| `{}` | {:.3} | {:.3} | {:.3} | {:+.2}% |",
            delta.ident, delta.left, delta.right, delta.abs_diff, delta.percent_diff
        );
    }
    let _ = writeln!(out);
}

fn render_untimed(out: &mut String, recon: &Reconciliation) {
    let _ = writeln!(out, "## Timing Not Measured");
    let _ = writeln!(out);
    let _ = writeln!(
        out,
        "This report was produced by static analysis of test declarations; no \
         tests were executed, so runtimes are unavailable."
    );
    let _ = writeln!(out);
    let _ = writeln!(out, "To obtain a runtime comparison:");
    let _ = writeln!(out);
    let _ = writeln!(
        out,
        "1. Resolve any build or dependency issues on both refs."
    );
    let _ = writeln!(
        out,
        "2. Run the suite with time reporting, e.g. `cargo test -- --report-time`."
    );
    let _ = writeln!(
        out,
        "3. Re-run the timed pipeline to parse durations from the runner output."
    );
    let _ = writeln!(out);

    render_ident_table(out, "Common Tests", recon.common.iter());
    render_ident_table(
        out,
        &format!("Only on `{}`", recon.left_name),
        recon.only_left.iter(),
    );
    render_ident_table(
        out,
        &format!("Only on `{}`", recon.right_name),
        recon.only_right.iter(),
    );
}

fn render_ident_table<'a>(
    out: &mut String,
    title: &str,
    idents: impl ExactSizeIterator<Item = &'a crate::snapshot::TestIdent>,
) {
    // Empty sections are omitted entirely
    if idents.len() == 0 {
        return;
    }
    let _ = writeln!(out, "## {title}");
    let _ = writeln!(out);
    let _ = writeln!(out, "| Test |");
    let _ = writeln!(out, "|------|");
    for ident in idents {
        let _ = writeln!(out, "| `{ident}` |");
    }
    let _ = writeln!(out);
}

fn render_no_data(out: &mut String) {
    let _ = writeln!(out, "## No Test Data");
    let _ = writeln!(out);
    let _ = writeln!(
        out,
        "Neither ref yielded a test inventory or timing data. The suite may \
         have failed to build, or the run may have exceeded its timeout."
    );
    let _ = writeln!(out);
    let _ = writeln!(out, "To produce a full comparison:");
    let _ = writeln!(out);
    let _ = writeln!(
        out,
        "1. Make sure the workspace builds on both refs (`cargo build --workspace`)."
    );
    let _ = writeln!(
        out,
        "2. Update the Rust toolchain if the build fails with edition or \
         dependency errors."
    );
    let _ = writeln!(
        out,
        "3. Re-run the analysis once `cargo test` completes on both refs."
    );
}

#[cfg(test)]
#[path = "report_tests.rs"]
mod tests;
