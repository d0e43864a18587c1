//! Core types for the simpletest framework
//!
//! This crate defines the foundational types used throughout the system:
//! - Value: dynamic value for subjects, expected results and parameters
//! - ObjectShape / Member: declared member descriptors for object subjects
//! - CaseMarker / TestCase / TestGroup: marker model doubling as the
//!   result model
//! - Error / CaseError: run-level and in-case error taxonomy

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod marker;
pub mod shape;
pub mod value;

// Re-export commonly used types
pub use error::{CaseError, CaseResult, Error, Result};
pub use marker::{CaseMarker, TestCase, TestGroup};
pub use shape::{Member, MemberKind, ObjectShape};
pub use value::{ActionHandle, Value};
