//! Framework integration suite: case protocol, assertion chains, deferred
//! narration, reporting and property tests over the public facade.

#[path = "../common/mod.rs"]
mod common;

mod chain;
mod narration;
mod properties;
mod reporting;
