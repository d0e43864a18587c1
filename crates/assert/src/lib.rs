//! Fluent assertion chain for the simpletest framework
//!
//! A chain is created over one subject value, mutated in place through
//! successive checks, and terminated with `end()`:
//!
//! ```
//! use simpletest_assert::Assert;
//!
//! let subject = Assert::create(5)
//!     .is_greater_than(3)
//!     .is_less_than(10)
//!     .end()
//!     .unwrap();
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod chain;

pub use chain::{Assert, Carried, StepName};
