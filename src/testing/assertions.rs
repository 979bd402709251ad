//! Assertion functions for comparing record collections.

use crate::record::Record;

/// Assert that two record sequences are equal, in order.
///
/// # Panics
/// Panics if the sequences differ in length or content.
pub fn assert_records_equal(actual: &[Record], expected: &[Record]) {
    assert_eq!(
        actual.len(),
        expected.len(),
        "record count mismatch:\n  expected: {expected:?}\n  actual: {actual:?}"
    );
    for (i, (a, e)) in actual.iter().zip(expected.iter()).enumerate() {
        assert_eq!(a, e, "record mismatch at index {i}:\n  expected: {e:?}\n  actual: {a:?}");
    }
}

/// Assert that two record sequences contain the same records, ignoring
/// order. `Record` has no `Hash` impl (its fields are unordered by
/// design), so this compares via removal rather than a `HashSet`.
///
/// # Panics
/// Panics if the sequences differ in length or content.
pub fn assert_records_unordered_equal(actual: &[Record], expected: &[Record]) {
    assert_eq!(
        actual.len(),
        expected.len(),
        "record count mismatch:\n  expected: {expected:?}\n  actual: {actual:?}"
    );
    let mut remaining: Vec<&Record> = expected.iter().collect();
    for record in actual {
        let Some(pos) = remaining.iter().position(|e| *e == record) else {
            panic!("unexpected record not found in expected set: {record:?}\n  expected: {expected:?}\n  actual: {actual:?}");
        };
        remaining.remove(pos);
    }
}

/// Assert that every record satisfies `predicate`.
///
/// # Panics
/// Panics on the first record that does not satisfy `predicate`.
pub fn assert_all<F: Fn(&Record) -> bool>(records: &[Record], predicate: F) {
    for record in records {
        assert!(predicate(record), "predicate failed for record: {record:?}");
    }
}

/// Assert that at least one record satisfies `predicate`.
///
/// # Panics
/// Panics if no record satisfies `predicate`.
pub fn assert_any<F: Fn(&Record) -> bool>(records: &[Record], predicate: F) {
    assert!(
        records.iter().any(predicate),
        "no record satisfied the predicate: {records:?}"
    );
}

/// Assert that no record satisfies `predicate`.
///
/// # Panics
/// Panics on the first record that satisfies `predicate`.
pub fn assert_none<F: Fn(&Record) -> bool>(records: &[Record], predicate: F) {
    for record in records {
        assert!(!predicate(record), "predicate unexpectedly matched record: {record:?}");
    }
}
