//! Deferred-step sequences
//!
//! A test body can "narrate" multi-step behavior by returning a lazily
//! produced sequence of values, where a produced step may itself be another
//! sequence. [`drain`] flattens such a sequence depth-first into the ordered
//! list of emitted leaf values; the engine turns that list into the case's
//! assertion detail trace.
//!
//! Sequences are pull-based and single-pass: advancing one is a synchronous
//! call that runs until the next step is produced, and draining consumes the
//! sequence. Finiteness is the producer's responsibility; an infinite
//! sequence makes the drain never return.

use simpletest_core::Value;
use std::fmt;

/// One produced step: a leaf value, or a nested narration.
pub enum Step {
    /// A leaf value emitted into the flattened trace
    Value(Value),
    /// A nested sequence, spliced into the trace at this position
    Nested(StepSequence),
}

impl Step {
    /// Convenience constructor for a leaf step.
    pub fn value(value: impl Into<Value>) -> Self {
        Step::Value(value.into())
    }

    /// Convenience constructor for a nested sequence of leaf values.
    pub fn nested(values: Vec<Value>) -> Self {
        Step::Nested(StepSequence::of_values(values))
    }
}

impl fmt::Debug for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Step::Value(v) => write!(f, "Step::Value({v})"),
            Step::Nested(_) => f.write_str("Step::Nested(..)"),
        }
    }
}

/// A finite, single-pass, lazily produced sequence of steps.
pub struct StepSequence {
    iter: Box<dyn Iterator<Item = Step> + Send>,
}

impl StepSequence {
    /// Wrap any iterator of steps.
    pub fn new<I>(steps: I) -> Self
    where
        I: IntoIterator<Item = Step>,
        I::IntoIter: Send + 'static,
    {
        Self {
            iter: Box::new(steps.into_iter()),
        }
    }

    /// A sequence of plain leaf values.
    pub fn of_values(values: Vec<Value>) -> Self {
        Self::new(values.into_iter().map(Step::Value))
    }

    /// A sequence driven by a closure; production is deferred until the
    /// sequence is advanced.
    pub fn from_fn(f: impl FnMut() -> Option<Step> + Send + 'static) -> Self {
        Self {
            iter: Box::new(std::iter::from_fn(f)),
        }
    }

    /// Advance to the next step, running the producer until it yields.
    pub fn advance(&mut self) -> Option<Step> {
        self.iter.next()
    }
}

impl fmt::Debug for StepSequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("StepSequence(..)")
    }
}

/// Flatten a deferred-step sequence depth-first into its emitted leaf
/// values, order-preserving: a nested sequence's output is spliced in
/// immediately after its position, before the outer sequence continues.
///
/// Consumes the sequence; draining is not restartable.
pub fn drain(sequence: StepSequence) -> Vec<Value> {
    let mut emitted = Vec::new();
    drain_into(sequence, &mut emitted);
    emitted
}

fn drain_into(mut sequence: StepSequence, emitted: &mut Vec<Value>) {
    while let Some(step) = sequence.advance() {
        match step {
            Step::Value(value) => emitted.push(value),
            Step::Nested(inner) => drain_into(inner, emitted),
        }
    }
}
