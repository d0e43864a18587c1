//! Rendering finished runs as text and JSON.

use crate::common::*;
use simpletest::{render_case_details, render_json, render_summary};

fn mixed_run() -> Vec<TestGroup> {
    let group = GroupBuilder::<NoState>::new("Calculator")
        .case(
            CaseMarker::new("add").expects(5).with_params(ints(&[2, 3])),
            |_, args| match (&args[0], &args[1]) {
                (Value::Int(a), Value::Int(b)) => Ok(CaseOutput::Value(Value::Int(a + b))),
                _ => Err(CaseError::fault("non-integer arguments")),
            },
        )
        .case(CaseMarker::new("broken"), |_, _| {
            Assert::create(1).is_equal(2).end()?;
            Ok(CaseOutput::unit())
        })
        .build();
    run_single(group)
}

#[test]
fn summary_shows_group_counts_and_case_statuses() {
    let results = mixed_run();
    let summary = render_summary(&results);

    assert!(summary.contains("Calculator Passed: 1 Failed: 1"));
    assert!(summary.contains("add passed"));
    assert!(summary.contains("broken FAILED"));
    assert!(summary.contains("IsEqual"));
}

#[test]
fn details_select_exception_text_over_assertion_trace() {
    let crashed = GroupBuilder::<NoState>::new("Crashing")
        .case(CaseMarker::new("boom"), |_, _| {
            Err(CaseError::fault_of("Io", "no such device"))
        })
        .build();
    let results = run_single(crashed);
    let details = render_case_details(only_case(&results));
    assert!(details.contains("no such device"));

    let narrated = GroupBuilder::<NoState>::new("Narrated")
        .case(CaseMarker::new("steps"), |_, _| {
            Ok(CaseOutput::Steps(StepSequence::of_values(ints(&[7]))))
        })
        .build();
    let results = run_single(narrated);
    assert_eq!(
        render_case_details(only_case(&results)),
        "Iteration [0] returned 7\n"
    );
}

#[test]
fn json_export_round_trips_names_and_pass_flags() {
    let results = mixed_run();
    let json = render_json(&results).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();

    assert_eq!(parsed[0]["name"], "Calculator");
    assert_eq!(parsed[0]["cases"][0]["name"], "add");
    assert_eq!(parsed[0]["cases"][0]["passed"], true);
    assert_eq!(parsed[0]["cases"][1]["name"], "broken");
    assert_eq!(parsed[0]["cases"][1]["passed"], false);
}
