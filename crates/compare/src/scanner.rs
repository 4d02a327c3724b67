// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Static extraction of test identifiers from source text.
//!
//! Scans a source file for test-attribute markers and derives one
//! qualified identifier per marked function from the file's logical path.
//! No code is executed; this is the static-analysis half of the pipeline,
//! used when the suite cannot be run.

use crate::snapshot::{TestIdent, SCOPE_DELIMITER};
use regex::Regex;
use std::sync::LazyLock;

/// Test-declaration markers, tried independently: the plain test attribute
/// and the two async-runtime variants. A function matched by more than one
/// pattern is emitted once per match (a retained quirk of the extraction,
/// not corrected here).
static TEST_ATTR_PATTERNS: LazyLock<[Regex; 3]> = LazyLock::new(|| {
    // SAFETY: these patterns are compile-time constants and known valid
    #[allow(clippy::expect_used)]
    let compile = |pattern: &str| Regex::new(pattern).expect("test attribute pattern is invalid");
    [
        compile(r"#\[test[^\]]*\]\s+(?:async\s+)?fn\s+([A-Za-z_][A-Za-z0-9_]*)"),
        compile(r"#\[tokio::test[^\]]*\]\s+(?:async\s+)?fn\s+([A-Za-z_][A-Za-z0-9_]*)"),
        compile(r"#\[async_std::test[^\]]*\]\s+(?:async\s+)?fn\s+([A-Za-z_][A-Za-z0-9_]*)"),
    ]
});

/// Scan one source file's text for test functions, yielding a qualified
/// identifier for each match.
///
/// `logical_path` is the file's path as reported by the enumerating
/// collaborator; `source_root` is the prefix stripped from it (e.g.
/// `src/`). The remainder, minus the `.rs` extension and with path
/// separators replaced by `::`, becomes the module path of every
/// identifier the file yields.
///
/// The returned iterator is lazy, finite, and single-pass.
pub fn scan_source<'t>(
    text: &'t str,
    logical_path: &str,
    source_root: &str,
) -> impl Iterator<Item = TestIdent> + 't {
    let module = module_path(logical_path, source_root);
    TEST_ATTR_PATTERNS.iter().flat_map(move |pattern| {
        let module = module.clone();
        pattern.captures_iter(text).filter_map(move |caps| {
            caps.get(1)
                .map(|name| TestIdent::new(format!("{module}{SCOPE_DELIMITER}{}", name.as_str())))
        })
    })
}

/// Derive a `::`-joined module path from a file path.
fn module_path(logical_path: &str, source_root: &str) -> String {
    let path = logical_path
        .strip_prefix(source_root)
        .unwrap_or(logical_path);
    let path = path.strip_suffix(".rs").unwrap_or(path);
    path.replace('/', SCOPE_DELIMITER)
}

#[cfg(test)]
#[path = "scanner_tests.rs"]
mod tests;
