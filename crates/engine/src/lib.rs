//! Test execution engine for the simpletest framework
//!
//! Brings the pieces together: the group [`registry`](crate::registry) for
//! declare-once discovery, the [`runner`](crate::runner) that executes
//! groups case by case, the deferred-step [`drain`](crate::steps::drain),
//! the [`stage`](crate::stage) construction helper and plain-text/JSON
//! [`report`](crate::report) rendering.
//!
//! ```
//! use simpletest_core::CaseMarker;
//! use simpletest_engine::{run, CaseOutput, GroupBuilder};
//! use std::sync::Arc;
//!
//! #[derive(Default)]
//! struct NoState;
//!
//! let group = GroupBuilder::<NoState>::new("Smoke")
//!     .case(CaseMarker::new("noop"), |_, _| Ok(CaseOutput::unit()))
//!     .build();
//! let results = run(&[Arc::new(group)], "");
//! assert!(results[0].passed());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod fixture;
pub mod registry;
pub mod report;
pub mod runner;
pub mod stage;
pub mod steps;

pub use fixture::{CaseFn, CaseMethod, CaseOutput, Fixture, GroupBuilder, GroupRegistration, HookFn};
pub use registry::{discover, discover_for, register, Registry};
pub use report::{render_case_details, render_json, render_summary};
pub use runner::{run, run_registered, UNKNOWN_EXCEPTION_MESSAGE};
pub use stage::{Stage, StageBuilder};
pub use steps::{drain, Step, StepSequence};
