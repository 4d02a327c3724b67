// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Test-file enumeration.
//!
//! Supplies the scanner with candidate file paths, filtered to the usual
//! test-file naming conventions and excluding build output. The scanner
//! itself never walks the filesystem.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

/// Naming conventions for files that declare tests.
const TEST_FILE_PATTERNS: [&str; 3] = ["**/*test*.rs", "**/tests.rs", "**/tests/*.rs"];

/// Enumerate candidate test files under `root`, deduplicated and sorted.
///
/// Paths inside `target/` are excluded. Patterns that fail to expand
/// contribute nothing rather than failing the scan.
pub fn discover_test_files(root: &Path) -> Vec<PathBuf> {
    let mut found = BTreeSet::new();
    for pattern in TEST_FILE_PATTERNS {
        let full = root.join(pattern);
        let Some(full) = full.to_str() else {
            continue;
        };
        let Ok(paths) = glob::glob(full) else {
            continue;
        };
        for path in paths.flatten() {
            if !path.is_file() {
                continue;
            }
            if path.components().any(|c| c.as_os_str() == "target") {
                continue;
            }
            found.insert(path);
        }
    }
    found.into_iter().collect()
}

#[cfg(test)]
#[path = "files_tests.rs"]
mod tests;
