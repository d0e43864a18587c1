//! Marker and result model
//!
//! Declarative descriptors for test groups and cases. The descriptors
//! double as the result records: a [`TestGroup`] is the aggregate result
//! for one registered group, and a [`TestCase`] carries both the declared
//! marker data and the mutable outcome fields the engine fills in during
//! execution.
//!
//! Pure data. The only behavior is [`TestGroup::passed`], recomputed on
//! every read so it never goes stale against the case list.

use crate::value::Value;
use serde::Serialize;

/// Declarative tag for one test case: a name, an expected return value and
/// an ordered parameter list.
///
/// Markers are repeatable per case method; each marker produces an
/// independent [`TestCase`] over the same underlying body.
#[derive(Debug, Clone, Serialize)]
pub struct CaseMarker {
    /// Declared case name
    pub name: String,
    /// Expected return value, compared by value equality
    pub expected: Value,
    /// Positional invocation arguments; empty means "invoke with none"
    pub params: Vec<Value>,
}

impl CaseMarker {
    /// Create a marker with no expected value and no parameters.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            expected: Value::Null,
            params: Vec::new(),
        }
    }

    /// Set the expected return value.
    pub fn expects(mut self, expected: impl Into<Value>) -> Self {
        self.expected = expected.into();
        self
    }

    /// Set the positional parameters.
    pub fn with_params(mut self, params: Vec<Value>) -> Self {
        self.params = params;
        self
    }
}

/// One finished (or in-flight) test case result.
#[derive(Debug, Clone, Serialize)]
pub struct TestCase {
    /// Declared case name
    pub name: String,
    /// Expected return value from the marker
    pub expected: Value,
    /// Declared invocation parameters from the marker
    pub params: Vec<Value>,
    /// Whether the case passed; exactly one of `passed` / non-empty
    /// `error_message` holds once execution completes
    pub passed: bool,
    /// One-line failure summary, empty when passed
    pub error_message: String,
    /// Full trace text for unexpected-exception or secondary failures
    pub exception_details: String,
    /// Accumulated multi-line trace from assertion- or step-returning bodies
    pub assertion_details: String,
    /// Wall-clock case duration in milliseconds
    pub elapsed_ms: u64,
}

impl TestCase {
    /// Start a fresh result record from a declared marker.
    pub fn from_marker(marker: &CaseMarker) -> Self {
        Self {
            name: marker.name.clone(),
            expected: marker.expected.clone(),
            params: marker.params.clone(),
            passed: false,
            error_message: String::new(),
            exception_details: String::new(),
            assertion_details: String::new(),
            elapsed_ms: 0,
        }
    }
}

/// Group marker doubling as the aggregate result for one run of the group.
#[derive(Debug, Clone, Serialize)]
pub struct TestGroup {
    /// Declared group name
    pub name: String,
    /// Environment-binding key; empty means "run anywhere"
    pub environment: String,
    /// Finished cases, in discovery/execution order
    pub cases: Vec<TestCase>,
    /// Wall-clock duration of the whole group's case run, in milliseconds
    pub elapsed_ms: u64,
}

impl TestGroup {
    /// Create an empty group result.
    pub fn new(name: impl Into<String>, environment: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            environment: environment.into(),
            cases: Vec::new(),
            elapsed_ms: 0,
        }
    }

    /// Whether every case in this group passed. Recomputed on read.
    pub fn passed(&self) -> bool {
        self.cases.iter().all(|c| c.passed)
    }
}
