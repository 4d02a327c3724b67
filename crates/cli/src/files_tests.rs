#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
use super::*;
use tempfile::TempDir;

fn touch(root: &Path, rel: &str) {
    let path = root.join(rel);
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(path, "").unwrap();
}

#[test]
fn test_matches_test_file_conventions() {
    let dir = TempDir::new().unwrap();
    touch(dir.path(), "src/mod_a/tests.rs");
    touch(dir.path(), "src/parser_tests.rs");
    touch(dir.path(), "tests/integration.rs");
    touch(dir.path(), "src/lib.rs");

    let found = discover_test_files(dir.path());
    let rel: Vec<String> = found
        .iter()
        .map(|p| {
            p.strip_prefix(dir.path())
                .unwrap()
                .to_string_lossy()
                .into_owned()
        })
        .collect();

    assert!(rel.contains(&"src/mod_a/tests.rs".to_string()));
    assert!(rel.contains(&"src/parser_tests.rs".to_string()));
    assert!(rel.contains(&"tests/integration.rs".to_string()));
    assert!(!rel.contains(&"src/lib.rs".to_string()));
}

#[test]
fn test_target_directory_is_excluded() {
    let dir = TempDir::new().unwrap();
    touch(dir.path(), "target/debug/build/foo_tests.rs");
    touch(dir.path(), "src/real_tests.rs");

    let found = discover_test_files(dir.path());
    assert_eq!(found.len(), 1);
    assert!(found[0].ends_with("src/real_tests.rs"));
}

#[test]
fn test_overlapping_patterns_deduplicate() {
    let dir = TempDir::new().unwrap();
    // Matches both `**/*test*.rs` and `**/tests.rs`
    touch(dir.path(), "src/core/tests.rs");

    let found = discover_test_files(dir.path());
    assert_eq!(found.len(), 1);
}

#[test]
fn test_results_are_sorted() {
    let dir = TempDir::new().unwrap();
    touch(dir.path(), "src/z_tests.rs");
    touch(dir.path(), "src/a_tests.rs");

    let found = discover_test_files(dir.path());
    assert!(found[0].ends_with("src/a_tests.rs"));
    assert!(found[1].ends_with("src/z_tests.rs"));
}

#[test]
fn test_empty_tree() {
    let dir = TempDir::new().unwrap();
    assert!(discover_test_files(dir.path()).is_empty());
}
