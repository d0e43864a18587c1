//! Assertion chain behavior over the public facade: latching, ordering
//! rules, member handoff and termination.

use crate::common::*;
use simpletest::ObjectShape;

fn player() -> Value {
    Value::object(
        ObjectShape::new("Player")
            .implements("Entity")
            .with_field("health", "Int")
            .with_property("alive", "Bool")
            .with_method("attack", "Int"),
    )
}

#[test]
fn passing_chain_returns_the_original_subject() {
    let subject = Assert::create(5)
        .is_greater_than(3)
        .is_less_than(10)
        .end()
        .unwrap();
    assert_eq!(subject, Value::Int(5));
}

#[test]
fn failing_step_names_itself_in_the_message() {
    let err = Assert::create(5).is_greater_than(10).end().unwrap_err();
    assert!(err.message().contains("IsGreaterThan"));
    assert!(err.is_assertion());
}

#[test]
fn failure_latches_and_later_steps_do_not_evaluate() {
    // is_equal against a non-comparable subject would produce its own
    // message; the latched chain must keep the first one instead.
    let chain = Assert::create(5).is_greater_than(10).is_equal("banana");
    assert!(!chain.succeeded());
    assert!(chain.fail_message().contains("IsGreaterThan"));
    assert!(!chain.fail_message().contains("IsEqual"));

    let err = chain.end().unwrap_err();
    assert!(err.message().contains("IsGreaterThan"));
}

#[test]
fn of_type_without_member_narrowing_is_an_ordering_violation() {
    let chain = Assert::create(player()).of_type("Int");
    assert!(!chain.succeeded());
    assert!(chain.fail_message().contains("Wrong assertions order."));
}

#[test]
fn of_type_after_is_field_checks_the_member() {
    let ok = Assert::create(player())
        .has_member("health")
        .is_field()
        .of_type("Int");
    assert!(ok.succeeded());

    let bad = Assert::create(player())
        .has_member("health")
        .is_field()
        .of_type("String");
    assert!(!bad.succeeded());
}

#[test]
fn returns_type_follows_method_narrowing() {
    let chain = Assert::create(player())
        .has_member("attack")
        .is_method()
        .returns_type("Int");
    assert!(chain.succeeded());
}

#[test]
fn end_with_prefixes_the_failure() {
    let err = Assert::create(1)
        .is_equal(2)
        .end_with("sanity check")
        .unwrap_err();
    assert!(err.message().starts_with("sanity check :: "));
}

#[test]
fn combinators_evaluate_even_after_upstream_failure() {
    let rescued = Assert::create(1)
        .is_equal(2)
        .or(Assert::create(3).is_equal(3));
    assert!(rescued.succeeded());

    let inverted = Assert::create(1).is_equal(2).not();
    assert!(inverted.succeeded());
}

#[test]
fn throws_exception_matches_the_failure_kind() {
    let exploding = Value::action(|| Err(CaseError::fault_of("Io", "lost the disk")));
    let chain = Assert::create(exploding).throws_exception(Some("Io"));
    assert!(chain.succeeded());

    let calm = Value::action(|| Ok(()));
    let chain = Assert::create(calm).throws_exception(None);
    assert!(!chain.succeeded());
}

#[test]
fn instance_of_type_consults_declared_ancestry() {
    assert!(Assert::create(player())
        .instance_of_type("Entity")
        .succeeded());
    assert!(!Assert::create(player())
        .instance_of_type("Vehicle")
        .succeeded());
}

#[test]
fn length_checks_cover_lists_and_bytes() {
    let list = Value::List(ints(&[1, 2, 3]));
    assert!(Assert::create(list).length_equals(3).succeeded());
    let bytes = Value::Bytes(vec![0xca, 0xfe]);
    assert!(Assert::create(bytes.clone()).length_greater_than(1).succeeded());
    assert!(!Assert::create(bytes).length_less_than(2).succeeded());
}
