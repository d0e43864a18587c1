//! Error types for the simpletest framework
//!
//! Two layers of failure live here:
//! - `Error`: run-level failures that are fatal to discovery or registration.
//! - `CaseError`: failures raised from inside a test case or lifecycle hook,
//!   carrying a recursive cause chain that the engine unwraps to its leaf.
//!
//! We use `thiserror` for automatic `Display` and `Error` trait implementations.

use thiserror::Error;

/// Result type alias for run-level operations
pub type Result<T> = std::result::Result<T, Error>;

/// Result type alias for in-case operations (case bodies, hooks, chain ends)
pub type CaseResult<T> = std::result::Result<T, CaseError>;

/// Run-level error types
///
/// These are fatal to the run and surfaced to the caller, never recovered
/// by the engine.
#[derive(Debug, Error)]
pub enum Error {
    /// A group with the same name was already registered
    #[error("Duplicate test group: {0}")]
    DuplicateGroup(String),

    /// A registration was rejected before it entered the registry
    #[error("Invalid registration: {0}")]
    InvalidRegistration(String),
}

/// Failure raised from inside a test case, hook, or assertion chain.
///
/// `Assertion` is the structured, expected failure kind: it is how a case is
/// "normally" marked failed. `Fault` is everything else (code under test
/// crashed, invocation failed). Faults may wrap an inner cause; the engine
/// always unwraps to the deepest cause before classifying and reporting.
#[derive(Debug, Error)]
pub enum CaseError {
    /// Expected, structured failure from the assertion chain terminal step
    /// or the engine's return-value mismatch check
    #[error("{0}")]
    Assertion(String),

    /// Unexpected failure with a named kind and an optional inner cause
    #[error("{message}")]
    Fault {
        /// Name of the failure kind (the "runtime type" of the exception)
        kind: String,
        /// Human-readable one-line description
        message: String,
        /// Inner cause, when this failure wraps another
        source: Option<Box<CaseError>>,
    },
}

impl CaseError {
    /// Create a plain fault with the default kind.
    pub fn fault(message: impl Into<String>) -> Self {
        CaseError::Fault {
            kind: "Fault".to_string(),
            message: message.into(),
            source: None,
        }
    }

    /// Create a fault with an explicit kind name.
    ///
    /// The kind is what `throws_exception` matches against when an expected
    /// exception type is requested.
    pub fn fault_of(kind: impl Into<String>, message: impl Into<String>) -> Self {
        CaseError::Fault {
            kind: kind.into(),
            message: message.into(),
            source: None,
        }
    }

    /// Wrap an inner failure in an outer fault, preserving the cause chain.
    pub fn wrap(message: impl Into<String>, inner: CaseError) -> Self {
        CaseError::Fault {
            kind: "Fault".to_string(),
            message: message.into(),
            source: Some(Box::new(inner)),
        }
    }

    /// Name of this failure's kind.
    pub fn kind_name(&self) -> &str {
        match self {
            CaseError::Assertion(_) => "AssertionError",
            CaseError::Fault { kind, .. } => kind,
        }
    }

    /// The failure message without any cause-chain rendering.
    pub fn message(&self) -> &str {
        match self {
            CaseError::Assertion(msg) => msg,
            CaseError::Fault { message, .. } => message,
        }
    }

    /// Follow the cause chain to its innermost failure.
    pub fn deepest(&self) -> &CaseError {
        match self {
            CaseError::Fault {
                source: Some(inner),
                ..
            } => inner.deepest(),
            _ => self,
        }
    }

    /// Whether the deepest cause is an assertion failure.
    pub fn is_assertion(&self) -> bool {
        matches!(self.deepest(), CaseError::Assertion(_))
    }

    /// Render the full cause chain, outermost first, one line per cause.
    pub fn trace(&self) -> String {
        let mut lines = Vec::new();
        let mut current = self;
        loop {
            lines.push(format!("{}: {}", current.kind_name(), current.message()));
            match current {
                CaseError::Fault {
                    source: Some(inner),
                    ..
                } => current = inner,
                _ => break,
            }
        }
        lines.join("\n")
    }
}
