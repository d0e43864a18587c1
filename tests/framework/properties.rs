//! Property tests over the drain algorithm, the chain latch and the
//! return-value protocol.

use crate::common::*;
use proptest::prelude::*;

/// Shadow tree used to generate nested narrations with a known eager
/// flattening.
#[derive(Debug, Clone)]
enum Shadow {
    Leaf(i64),
    Nested(Vec<Shadow>),
}

fn arb_shadow() -> impl Strategy<Value = Shadow> {
    let leaf = any::<i64>().prop_map(Shadow::Leaf);
    leaf.prop_recursive(3, 24, 4, |inner| {
        prop::collection::vec(inner, 0..4).prop_map(Shadow::Nested)
    })
}

fn to_step(shadow: Shadow) -> Step {
    match shadow {
        Shadow::Leaf(i) => Step::value(i),
        Shadow::Nested(children) => {
            Step::Nested(StepSequence::new(children.into_iter().map(to_step)))
        }
    }
}

fn eager_flatten(shadow: &Shadow, out: &mut Vec<Value>) {
    match shadow {
        Shadow::Leaf(i) => out.push(Value::Int(*i)),
        Shadow::Nested(children) => {
            for child in children {
                eager_flatten(child, out);
            }
        }
    }
}

proptest! {
    #[test]
    fn drain_matches_eager_depth_first_flatten(shadows in prop::collection::vec(arb_shadow(), 0..6)) {
        let mut expected = Vec::new();
        for shadow in &shadows {
            eager_flatten(shadow, &mut expected);
        }

        let seq = StepSequence::new(shadows.into_iter().map(to_step).collect::<Vec<_>>());
        prop_assert_eq!(drain(seq), expected);
    }

    #[test]
    fn chain_latch_keeps_the_first_failure(subject in any::<i64>(), bound in any::<i64>(), later in any::<i64>()) {
        prop_assume!(subject <= bound);
        let chain = Assert::create(subject)
            .is_greater_than(bound)
            .is_equal(later)
            .is_less_than(later);
        prop_assert!(!chain.succeeded());
        prop_assert!(chain.fail_message().starts_with("IsGreaterThan"));
    }

    #[test]
    fn passing_chain_always_returns_its_subject(subject in any::<i64>()) {
        let returned = Assert::create(subject).is_equal(subject).end();
        prop_assert_eq!(returned.unwrap(), Value::Int(subject));
    }

    #[test]
    fn value_case_passes_exactly_when_returns_match(returned in any::<i64>(), expected in any::<i64>()) {
        let group = GroupBuilder::<NoState>::new("Echo")
            .case(
                CaseMarker::new("echo").expects(expected),
                move |_, _| Ok(CaseOutput::Value(Value::Int(returned))),
            )
            .build();

        let results = run_single(group);
        let case = &results[0].cases[0];
        prop_assert_eq!(case.passed, returned == expected);
        prop_assert_eq!(case.passed, case.error_message.is_empty());
    }
}
