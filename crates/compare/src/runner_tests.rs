#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
use super::*;
use rstest::rstest;

fn durations_of(stdout: &str) -> BTreeMap<TestIdent, f64> {
    parse_runner_output(stdout).durations
}

#[test]
fn test_parenthesized_seconds_line() {
    let stdout = "test mod_a::tests::alpha_beta ... ok (0.042s)\n";
    let durations = durations_of(stdout);
    assert_eq!(durations.len(), 1);
    assert_eq!(
        durations.get(&TestIdent::new("mod_a::tests::alpha_beta")),
        Some(&0.042)
    );
}

#[rstest]
#[case("test a::b ... ok (0.500s)", 0.5)]
#[case("test a::b ... ok [0.500s]", 0.5)]
#[case("test a::b ... ok in 0.500 s", 0.5)]
fn test_each_line_form_is_recognized(#[case] line: &str, #[case] expected: f64) {
    let durations = durations_of(line);
    assert_eq!(durations.get(&TestIdent::new("a::b")), Some(&expected));
}

#[rstest]
#[case("ok", TestStatus::Ok)]
#[case("FAILED", TestStatus::Failed)]
#[case("ignored", TestStatus::Ignored)]
fn test_statuses_are_parsed(#[case] word: &str, #[case] expected: TestStatus) {
    let line = format!("test x::y ... {word} (0.100s)");
    let records = line_records(&line);
    assert!(records.iter().any(|r| r.status == expected));
}

#[test]
fn test_repeated_test_keeps_larger_duration() {
    let stdout = "\
test slow::case ... FAILED (0.100s)
test slow::case ... ok (0.250s)
";
    let durations = durations_of(stdout);
    assert_eq!(durations.get(&TestIdent::new("slow::case")), Some(&0.25));
}

#[test]
fn test_merge_keeps_max_across_patterns() {
    let records = vec![
        TimingRecord {
            ident: TestIdent::new("t"),
            status: TestStatus::Ok,
            duration: Some(0.3),
        },
        TimingRecord {
            ident: TestIdent::new("t"),
            status: TestStatus::Ok,
            duration: Some(0.9),
        },
        TimingRecord {
            ident: TestIdent::new("t"),
            status: TestStatus::Ok,
            duration: None,
        },
    ];
    let merged = merge_records(records);
    assert_eq!(merged.get(&TestIdent::new("t")), Some(&0.9));
}

#[test]
fn test_summary_fallback_assigns_mean() {
    let stdout = "\
test mod_a::one ... ok
test mod_a::two ... ok
test mod_b::three ... FAILED

test result: FAILED. 2 passed; 1 failed; 0 ignored; 0 measured; 0 filtered out; finished in 3.00s
";
    let parsed = parse_runner_output(stdout);
    assert!(parsed.approximate);
    assert_eq!(parsed.durations.len(), 3);
    for duration in parsed.durations.values() {
        assert!((duration - 1.0).abs() < 1e-9);
    }
}

#[test]
fn test_fallback_not_used_when_lines_have_durations() {
    let stdout = "\
test mod_a::one ... ok (0.200s)

test result: ok. 1 passed; 0 failed; 0 ignored; 0 measured; 0 filtered out; finished in 9.00s
";
    let parsed = parse_runner_output(stdout);
    assert!(!parsed.approximate);
    assert_eq!(parsed.durations.get(&TestIdent::new("mod_a::one")), Some(&0.2));
}

#[test]
fn test_loose_summary_form() {
    let stdout = "\
test a::x ... ok
test a::y ... ok
2 passed, 0 failed, took 4.20 s overall
";
    let parsed = parse_runner_output(stdout);
    assert!(parsed.approximate);
    assert!((parsed.durations[&TestIdent::new("a::x")] - 2.1).abs() < 1e-9);
}

#[test]
fn test_summary_with_zero_passed_yields_nothing() {
    let stdout = "\
test a::x ... FAILED

test result: FAILED. 0 passed; 1 failed; 0 ignored; 0 measured; 0 filtered out; finished in 1.00s
";
    assert!(durations_of(stdout).is_empty());
}

#[test]
fn test_ignored_lines_do_not_feed_the_fallback() {
    let stdout = "\
test a::x ... ok
test a::y ... ignored

test result: ok. 1 passed; 0 failed; 1 ignored; 0 measured; 0 filtered out; finished in 2.00s
";
    let parsed = parse_runner_output(stdout);
    // Only the ok line is enumerated, so it receives the whole total.
    assert_eq!(parsed.durations.len(), 1);
    assert!((parsed.durations[&TestIdent::new("a::x")] - 2.0).abs() < 1e-9);
}

#[test]
fn test_no_timing_data_is_empty_not_error() {
    let parsed = parse_runner_output("error[E0433]: failed to resolve\n");
    assert!(parsed.durations.is_empty());
    assert!(!parsed.approximate);
}

#[test]
fn test_empty_output() {
    assert!(durations_of("").is_empty());
}

#[test]
fn test_unrelated_lines_are_ignored() {
    let stdout = "\
   Compiling foo v0.1.0
    Finished test profile in 2.31s
     Running unittests src/lib.rs

test core::parse::roundtrip ... ok (1.900s)
";
    let durations = durations_of(stdout);
    assert_eq!(durations.len(), 1);
    assert_eq!(
        durations.get(&TestIdent::new("core::parse::roundtrip")),
        Some(&1.9)
    );
}
