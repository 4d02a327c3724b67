// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Reconciliation of two snapshots into a structured comparison.

use crate::snapshot::{Snapshot, TestIdent};
use std::collections::BTreeSet;

/// Per-test duration comparison between two snapshots.
#[derive(Clone, Debug, PartialEq)]
pub struct DurationDelta {
    pub ident: TestIdent,
    /// Duration on the left ref in seconds; 0.0 when unmeasured.
    pub left: f64,
    /// Duration on the right ref in seconds; 0.0 when unmeasured.
    pub right: f64,
    /// `abs(right - left)`.
    pub abs_diff: f64,
    /// Signed percent change relative to the left duration.
    ///
    /// `(right - left) / left * 100` when `left > 0`; `100.0` when the
    /// left duration is zero but the right is not; `0.0` when both are
    /// zero. The zero-baseline cases are sentinels, not measurements.
    pub percent_diff: f64,
}

/// Read-only comparison of two snapshots.
///
/// `common`, `only_left`, and `only_right` partition the union of both
/// snapshots' identifiers. `deltas` is populated when either snapshot
/// carries durations, covers the full union (missing durations read as
/// 0.0), and is ordered by absolute difference descending with ties
/// broken by identifier ascending.
#[derive(Clone, Debug, Default)]
pub struct Reconciliation {
    pub left_name: String,
    pub right_name: String,
    pub common: BTreeSet<TestIdent>,
    pub only_left: BTreeSet<TestIdent>,
    pub only_right: BTreeSet<TestIdent>,
    pub deltas: Vec<DurationDelta>,
    pub left_total: f64,
    pub right_total: f64,
    /// Whether any duration data was present at all.
    pub timed: bool,
    /// Whether either side's durations came from the summary fallback.
    pub approximate: bool,
}

impl Reconciliation {
    /// Number of identifiers on the left ref.
    pub fn left_count(&self) -> usize {
        self.common.len() + self.only_left.len()
    }

    /// Number of identifiers on the right ref.
    pub fn right_count(&self) -> usize {
        self.common.len() + self.only_right.len()
    }

    /// Whether neither snapshot yielded any identifiers.
    pub fn is_empty(&self) -> bool {
        self.common.is_empty() && self.only_left.is_empty() && self.only_right.is_empty()
    }
}

/// Compare two snapshots.
pub fn reconcile(left: &Snapshot, right: &Snapshot) -> Reconciliation {
    let left_keys: BTreeSet<&TestIdent> = left.idents().collect();
    let right_keys: BTreeSet<&TestIdent> = right.idents().collect();

    let common = left_keys
        .intersection(&right_keys)
        .map(|i| (*i).clone())
        .collect();
    let only_left = left_keys
        .difference(&right_keys)
        .map(|i| (*i).clone())
        .collect();
    let only_right = right_keys
        .difference(&left_keys)
        .map(|i| (*i).clone())
        .collect();

    let timed = left.has_timings() || right.has_timings();
    let mut deltas = Vec::new();
    if timed {
        for ident in left_keys.union(&right_keys) {
            let left_secs = left.duration_of(ident).unwrap_or(0.0);
            let right_secs = right.duration_of(ident).unwrap_or(0.0);
            deltas.push(DurationDelta {
                ident: (*ident).clone(),
                left: left_secs,
                right: right_secs,
                abs_diff: (right_secs - left_secs).abs(),
                percent_diff: percent_diff(left_secs, right_secs),
            });
        }
        deltas.sort_by(|a, b| {
            b.abs_diff
                .total_cmp(&a.abs_diff)
                .then_with(|| a.ident.cmp(&b.ident))
        });
    }

    Reconciliation {
        left_name: left.name().to_string(),
        right_name: right.name().to_string(),
        common,
        only_left,
        only_right,
        deltas,
        left_total: left.total_duration(),
        right_total: right.total_duration(),
        timed,
        approximate: left.is_approximate() || right.is_approximate(),
    }
}

fn percent_diff(left: f64, right: f64) -> f64 {
    if left > 0.0 {
        (right - left) / left * 100.0
    } else if right > 0.0 {
        100.0
    } else {
        0.0
    }
}

#[cfg(test)]
#[path = "reconcile_tests.rs"]
mod tests;
