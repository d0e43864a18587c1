//! SimpleTest - a self-hosted unit-test framework with a fluent assertion
//! chain, declare-once group discovery and deferred-step narration.
//!
//! # Quick Start
//!
//! ```
//! use simpletest::{run, Assert, CaseMarker, CaseOutput, GroupBuilder, Value};
//! use std::sync::Arc;
//!
//! #[derive(Default)]
//! struct Calculator;
//!
//! let group = GroupBuilder::<Calculator>::new("Calculator")
//!     .case(
//!         CaseMarker::new("add")
//!             .expects(5)
//!             .with_params(vec![Value::Int(2), Value::Int(3)]),
//!         |_calc, args| match (&args[0], &args[1]) {
//!             (Value::Int(a), Value::Int(b)) => Ok(CaseOutput::Value(Value::Int(a + b))),
//!             _ => Ok(CaseOutput::unit()),
//!         },
//!     )
//!     .case(CaseMarker::new("bounds"), |_calc, _| {
//!         Ok(CaseOutput::Asserts(vec![
//!             Assert::create(5).is_greater_than(3).is_less_than(10),
//!         ]))
//!     })
//!     .build();
//!
//! let results = run(&[Arc::new(group)], "");
//! assert!(results[0].passed());
//! ```
//!
//! # Architecture
//!
//! Groups register themselves as data; there is no module scanning. The
//! engine runs groups one at a time on the calling thread and produces
//! plain result structs, rendered as text or JSON by the report module.

// Re-export the public API from the member crates
pub use simpletest_assert::*;
pub use simpletest_core::*;
pub use simpletest_engine::*;
