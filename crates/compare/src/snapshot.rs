// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Qualified test identifiers and per-ref snapshots.

use std::collections::BTreeMap;
use std::fmt;

/// Delimiter joining path segments and function name into one identifier.
pub const SCOPE_DELIMITER: &str = "::";

/// A qualified test identifier, e.g. `mod_a::tests::alpha_beta`.
///
/// Identifiers are opaque strings: two identifiers are equal iff their
/// strings are equal, and no normalization is performed.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TestIdent(String);

impl TestIdent {
    /// Create an identifier from an already-qualified name.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// The identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TestIdent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TestIdent {
    fn from(name: &str) -> Self {
        Self(name.to_string())
    }
}

impl From<String> for TestIdent {
    fn from(name: String) -> Self {
        Self(name)
    }
}

/// A named collection of test identifiers captured from one ref, each with
/// an optional measured duration in seconds.
///
/// A snapshot is built once per pipeline run and treated as immutable
/// afterwards. Static scanning inserts identifiers without durations;
/// runtime parsing records durations with a max-wins merge for repeated
/// output lines.
#[derive(Clone, Debug, Default)]
pub struct Snapshot {
    name: String,
    entries: BTreeMap<TestIdent, Option<f64>>,
    approximate: bool,
}

impl Snapshot {
    /// Create an empty snapshot named after a ref.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            entries: BTreeMap::new(),
            approximate: false,
        }
    }

    /// The ref this snapshot was captured from.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Insert an identifier with no duration.
    ///
    /// An already-recorded duration for the same identifier is kept.
    pub fn insert_ident(&mut self, ident: TestIdent) {
        self.entries.entry(ident).or_insert(None);
    }

    /// Record a measured duration for an identifier.
    ///
    /// When the identifier already has a duration the larger of the two
    /// wins, so repeated or retried output lines report the worst case.
    pub fn record_duration(&mut self, ident: TestIdent, seconds: f64) {
        let slot = self.entries.entry(ident).or_insert(None);
        match slot {
            Some(existing) if *existing >= seconds => {}
            _ => *slot = Some(seconds),
        }
    }

    /// Mark this snapshot's durations as derived from an aggregate summary
    /// line rather than per-test measurements.
    pub fn mark_approximate(&mut self) {
        self.approximate = true;
    }

    /// Whether durations are an even split of a total, not measurements.
    pub fn is_approximate(&self) -> bool {
        self.approximate
    }

    /// Number of identifiers in the snapshot.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the snapshot holds no identifiers.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether the snapshot contains an identifier.
    pub fn contains(&self, ident: &TestIdent) -> bool {
        self.entries.contains_key(ident)
    }

    /// Iterate over identifiers in sorted order.
    pub fn idents(&self) -> impl Iterator<Item = &TestIdent> {
        self.entries.keys()
    }

    /// The recorded duration for an identifier, if any.
    pub fn duration_of(&self, ident: &TestIdent) -> Option<f64> {
        self.entries.get(ident).copied().flatten()
    }

    /// Whether any identifier carries a duration.
    pub fn has_timings(&self) -> bool {
        self.entries.values().any(Option::is_some)
    }

    /// Sum of all recorded durations in seconds.
    pub fn total_duration(&self) -> f64 {
        self.entries.values().filter_map(|d| *d).sum()
    }
}

#[cfg(test)]
#[path = "snapshot_tests.rs"]
mod tests;
