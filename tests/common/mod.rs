//! Shared test utilities for all integration test suites.
//!
//! Import via `#[path = "../common/mod.rs"] mod common;` from a suite's
//! main.rs.

#![allow(dead_code)]
#![allow(unused_imports)]

use std::sync::{Arc, Once};

pub use simpletest::{
    drain, run, Assert, CaseError, CaseMarker, CaseOutput, GroupBuilder, GroupRegistration,
    Registry, Step, StepSequence, TestCase, TestGroup, Value,
};

static INIT_TRACING: Once = Once::new();

/// Install a test subscriber so engine logs show up under --nocapture.
pub fn init_tracing() {
    INIT_TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt().with_test_writer().try_init();
    });
}

/// Empty fixture for groups that carry no state.
#[derive(Default)]
pub struct NoState;

/// Run one group with an empty environment filter.
pub fn run_single(group: GroupRegistration) -> Vec<TestGroup> {
    init_tracing();
    run(&[Arc::new(group)], "")
}

/// The single case of a single-group, single-case run.
pub fn only_case(results: &[TestGroup]) -> &TestCase {
    assert_eq!(results.len(), 1, "expected exactly one group");
    assert_eq!(results[0].cases.len(), 1, "expected exactly one case");
    &results[0].cases[0]
}

/// Integer values, for building step sequences and parameter lists.
pub fn ints(values: &[i64]) -> Vec<Value> {
    values.iter().map(|&i| Value::Int(i)).collect()
}

/// A two-parameter addition group with a configurable expectation.
pub fn addition_group(expected: i64) -> GroupRegistration {
    GroupBuilder::<NoState>::new("Calculator")
        .case(
            CaseMarker::new("add")
                .expects(expected)
                .with_params(ints(&[2, 3])),
            |_, args| match (&args[0], &args[1]) {
                (Value::Int(a), Value::Int(b)) => Ok(CaseOutput::Value(Value::Int(a + b))),
                _ => Err(CaseError::fault("non-integer arguments")),
            },
        )
        .build()
}
