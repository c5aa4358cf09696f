//! Custom Test Assertions
//!
//! Assertion helpers for violation sets and snapshot pages that give more
//! meaningful failure messages than standard assertions.

use std::collections::BTreeSet;

use domain_party::{SnapshotPage, Violation, ViolationKind};

/// Asserts that the set contains a violation at the path with the kind
///
/// # Panics
///
/// Panics with the full set listed when no such violation exists.
pub fn assert_has_violation(violations: &BTreeSet<Violation>, path: &str, kind: ViolationKind) {
    assert!(
        violations
            .iter()
            .any(|violation| violation.path == path && violation.kind == kind),
        "expected {:?} at '{}', got: {:#?}",
        kind,
        path,
        violations
    );
}

/// Asserts the exact number of violations of one kind
pub fn assert_violation_count(violations: &BTreeSet<Violation>, kind: ViolationKind, expected: usize) {
    let actual = violations
        .iter()
        .filter(|violation| violation.kind == kind)
        .count();
    assert_eq!(
        actual, expected,
        "expected {} violations of {:?}, got {}: {:#?}",
        expected, kind, actual, violations
    );
}

/// Asserts that validation found nothing
pub fn assert_no_violations(violations: &BTreeSet<Violation>) {
    assert!(
        violations.is_empty(),
        "expected no violations, got: {:#?}",
        violations
    );
}

/// Asserts that a snapshot page is ordered by (timestamp, sequence)
pub fn assert_page_ascending(page: &SnapshotPage) {
    let ordered = page
        .records
        .windows(2)
        .all(|pair| (pair[0].recorded_at, pair[0].sequence) <= (pair[1].recorded_at, pair[1].sequence));
    assert!(ordered, "page is not in ascending order: {:#?}", page.records);
}

/// Asserts that a snapshot page is ordered newest first
pub fn assert_page_descending(page: &SnapshotPage) {
    let ordered = page
        .records
        .windows(2)
        .all(|pair| (pair[0].recorded_at, pair[0].sequence) >= (pair[1].recorded_at, pair[1].sequence));
    assert!(ordered, "page is not in descending order: {:#?}", page.records);
}
