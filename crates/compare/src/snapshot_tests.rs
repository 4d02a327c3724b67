#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
use super::*;

#[test]
fn test_ident_equality_is_string_equality() {
    let a = TestIdent::new("mod_a::tests::alpha");
    let b = TestIdent::from("mod_a::tests::alpha");
    assert_eq!(a, b);
    assert_ne!(a, TestIdent::new("mod_a::tests::Alpha"));
}

#[test]
fn test_ident_display_round_trips() {
    let ident = TestIdent::new("a::b::c");
    assert_eq!(ident.to_string(), "a::b::c");
    assert_eq!(ident.as_str(), "a::b::c");
}

#[test]
fn test_insert_ident_has_no_duration() {
    let mut snap = Snapshot::new("main");
    snap.insert_ident(TestIdent::new("a::b"));
    assert_eq!(snap.len(), 1);
    assert!(snap.contains(&TestIdent::new("a::b")));
    assert_eq!(snap.duration_of(&TestIdent::new("a::b")), None);
    assert!(!snap.has_timings());
}

#[test]
fn test_insert_ident_keeps_existing_duration() {
    let mut snap = Snapshot::new("main");
    snap.record_duration(TestIdent::new("a::b"), 0.5);
    snap.insert_ident(TestIdent::new("a::b"));
    assert_eq!(snap.duration_of(&TestIdent::new("a::b")), Some(0.5));
}

#[test]
fn test_record_duration_max_wins() {
    let mut snap = Snapshot::new("main");
    snap.record_duration(TestIdent::new("a::b"), 0.2);
    snap.record_duration(TestIdent::new("a::b"), 0.7);
    snap.record_duration(TestIdent::new("a::b"), 0.3);
    assert_eq!(snap.duration_of(&TestIdent::new("a::b")), Some(0.7));
    assert_eq!(snap.len(), 1);
}

#[test]
fn test_record_duration_overwrites_unmeasured_entry() {
    let mut snap = Snapshot::new("main");
    snap.insert_ident(TestIdent::new("a::b"));
    snap.record_duration(TestIdent::new("a::b"), 0.1);
    assert_eq!(snap.duration_of(&TestIdent::new("a::b")), Some(0.1));
    assert!(snap.has_timings());
}

#[test]
fn test_total_duration_ignores_unmeasured() {
    let mut snap = Snapshot::new("main");
    snap.record_duration(TestIdent::new("a"), 1.0);
    snap.record_duration(TestIdent::new("b"), 2.5);
    snap.insert_ident(TestIdent::new("c"));
    assert!((snap.total_duration() - 3.5).abs() < f64::EPSILON);
}

#[test]
fn test_idents_are_sorted() {
    let mut snap = Snapshot::new("main");
    snap.insert_ident(TestIdent::new("z"));
    snap.insert_ident(TestIdent::new("a"));
    snap.insert_ident(TestIdent::new("m"));
    let names: Vec<&str> = snap.idents().map(TestIdent::as_str).collect();
    assert_eq!(names, vec!["a", "m", "z"]);
}

#[test]
fn test_approximate_flag() {
    let mut snap = Snapshot::new("main");
    assert!(!snap.is_approximate());
    snap.mark_approximate();
    assert!(snap.is_approximate());
}
