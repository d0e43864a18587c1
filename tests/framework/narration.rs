//! Deferred-step narration: drain semantics and the engine's iteration
//! trace.

use crate::common::*;

#[test]
fn drain_flattens_nested_sequences_in_order() {
    let make = || {
        StepSequence::new(vec![
            Step::value(1),
            Step::nested(ints(&[2, 3])),
            Step::value(4),
        ])
    };
    assert_eq!(drain(make()), ints(&[1, 2, 3, 4]));
    // A fresh sequence drains to the same result; the drained instance is
    // consumed, not restartable.
    assert_eq!(drain(make()), ints(&[1, 2, 3, 4]));
}

#[test]
fn drain_handles_multiple_nesting_levels() {
    let innermost = StepSequence::of_values(ints(&[3]));
    let inner = StepSequence::new(vec![Step::value(2), Step::Nested(innermost)]);
    let seq = StepSequence::new(vec![
        Step::value(1),
        Step::Nested(inner),
        Step::value(4),
    ]);
    assert_eq!(drain(seq), ints(&[1, 2, 3, 4]));
}

#[test]
fn narrated_case_records_one_iteration_line_per_leaf() {
    let group = GroupBuilder::<NoState>::new("Narrated")
        .case(CaseMarker::new("spawn sequence"), |_, _| {
            Ok(CaseOutput::Steps(StepSequence::new(vec![
                Step::value("spawned"),
                Step::nested(ints(&[1, 2])),
                Step::value("done"),
            ])))
        })
        .build();

    let results = run_single(group);
    let case = only_case(&results);
    assert!(case.passed);
    assert_eq!(
        case.assertion_details,
        "Iteration [0] returned spawned\n\
         Iteration [1] returned 1\n\
         Iteration [2] returned 2\n\
         Iteration [3] returned done\n"
    );
}

#[test]
fn narration_is_produced_only_when_the_engine_drains() {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    let produced = Arc::new(AtomicUsize::new(0));
    let observed = produced.clone();

    let group = GroupBuilder::<NoState>::new("Lazy")
        .case(CaseMarker::new("deferred"), move |_, _| {
            let counter = produced.clone();
            let mut remaining = 2i64;
            let seq = StepSequence::from_fn(move || {
                if remaining == 0 {
                    return None;
                }
                remaining -= 1;
                counter.fetch_add(1, Ordering::SeqCst);
                Some(Step::value(remaining))
            });
            // Building the sequence produced nothing yet.
            assert_eq!(produced.load(Ordering::SeqCst), 0);
            Ok(CaseOutput::Steps(seq))
        })
        .build();

    let results = run_single(group);
    assert!(only_case(&results).passed);
    assert_eq!(observed.load(Ordering::SeqCst), 2);
}

#[test]
fn empty_narration_leaves_no_trace() {
    let group = GroupBuilder::<NoState>::new("Silent")
        .case(CaseMarker::new("nothing to say"), |_, _| {
            Ok(CaseOutput::Steps(StepSequence::new(Vec::<Step>::new())))
        })
        .build();

    let results = run_single(group);
    let case = only_case(&results);
    assert!(case.passed);
    assert!(case.assertion_details.is_empty());
}
