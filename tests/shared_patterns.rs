//! A compiled pattern is shared read-only across threads.

use std::sync::Arc;
use std::thread;

use kodegen_regex::{MatchOptions, compile_or_fail};

#[test]
fn one_pattern_many_threads() {
    let pattern = Arc::new(compile_or_fail(r"(\d+)-(\d+)", ""));
    let handles: Vec<_> = (0..8)
        .map(|n| {
            let pattern = Arc::clone(&pattern);
            thread::spawn(move || {
                let subject = format!("{n}-{} and {}-{n}", n * 2, n * 3);
                let found = pattern
                    .scan(&subject, &MatchOptions::default())
                    .expect("scan should succeed");
                assert_eq!(found.len(), 2);
                found[0][1].to_string()
            })
        })
        .collect();

    for (n, handle) in handles.into_iter().enumerate() {
        assert_eq!(handle.join().expect("thread should finish"), n.to_string());
    }
    assert_eq!(pattern.source(), r"(\d+)-(\d+)");
}

#[test]
fn clones_are_independent_values() {
    let original = compile_or_fail("a(?<x>b)", "g");
    let copy = original.clone();
    drop(original);
    assert!(copy.test("ab"));
    assert_eq!(copy.group_names(), Some(&["x".to_string()][..]));
}
