//! Execution engine
//!
//! Runs discovered groups one at a time, one case at a time, on the calling
//! thread. For each group: instantiate the fixture, run group-setup hooks
//! (recovered on failure), run every case, run group-cleanup hooks
//! (recovered), append the finished [`TestGroup`] to the run's results.
//!
//! The case protocol times each case, runs before-each hooks, invokes the
//! body with the marker's parameters, classifies the returned
//! [`CaseOutput`], and resolves any raised failure by unwrapping it to its
//! deepest cause. Assertion failures get the after-each hooks a chance to
//! run (a failure there overwrites the reported detail, a long-standing
//! contract of the result format); unexpected failures skip them.
//!
//! Nothing below the per-case boundary crosses to other cases or groups; a
//! case that never returns blocks the run, by design.

use crate::fixture::{CaseMethod, CaseOutput, Fixture, GroupRegistration, HookFn};
use crate::steps::drain;
use simpletest_core::{CaseError, CaseMarker, CaseResult, TestCase, TestGroup};
use std::fmt::Write as _;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, error, info};

/// One-line summary recorded when a case fails outside the assertion chain.
pub const UNKNOWN_EXCEPTION_MESSAGE: &str = "Unknown Exception (not AssertionException) occurred.";

const EXCEPTION_PREAMBLE: &str =
    "Following exception was thrown in the code under test, not in the assertion chain.\n\n";

/// Run the given groups in order.
///
/// An empty `environment_filter` runs every group, including its
/// group-setup and group-cleanup hooks. A non-empty filter runs only the
/// groups bound to exactly that key and skips setup/cleanup entirely, even
/// for matching groups: an environment-triggered run assumes the
/// environment is already prepared.
pub fn run(groups: &[Arc<GroupRegistration>], environment_filter: &str) -> Vec<TestGroup> {
    let mut results = Vec::new();
    for registration in groups {
        if !environment_filter.is_empty() && registration.environment != environment_filter {
            continue;
        }
        info!(
            target: "simpletest::run",
            group = %registration.name,
            filter = %environment_filter,
            "Running test group"
        );

        let mut group = TestGroup::new(&registration.name, &registration.environment);
        let mut fixture = registration.instantiate();

        if environment_filter.is_empty() {
            run_preparation_hooks(&registration.setup, &mut fixture, &registration.name, "setup");
        }
        run_cases(registration, &mut fixture, &mut group);
        if environment_filter.is_empty() {
            run_preparation_hooks(
                &registration.cleanup,
                &mut fixture,
                &registration.name,
                "cleanup",
            );
        }

        results.push(group);
    }
    results
}

/// Discover all globally registered groups and run them with the filter.
pub fn run_registered(environment_filter: &str) -> Vec<TestGroup> {
    run(&crate::registry::discover(), environment_filter)
}

/// Group setup/cleanup hooks are recovered: a failure is logged and never
/// aborts the group.
fn run_preparation_hooks(hooks: &[HookFn], fixture: &mut Fixture, group_name: &str, phase: &str) {
    for hook in hooks {
        if let Err(err) = hook(fixture) {
            error!(
                target: "simpletest::run",
                group = %group_name,
                phase,
                error = %err.deepest().message(),
                "Something went wrong during test preparation"
            );
        }
    }
}

fn run_cases(registration: &GroupRegistration, fixture: &mut Fixture, group: &mut TestGroup) {
    let group_timer = Instant::now();
    for method in registration.methods() {
        for marker in &method.markers {
            let mut case = TestCase::from_marker(marker);
            let case_timer = Instant::now();

            match invoke_case(registration, method, marker, fixture, &mut case) {
                Ok(()) => {
                    case.passed = true;
                    case.error_message.clear();
                    // After-each hooks still run on success; a failure in
                    // them fails the case.
                    if let Err(err) = run_after_hooks(&registration.after_each, fixture) {
                        resolve_failure(&mut case, &err);
                    }
                }
                Err(err) => {
                    if let CaseError::Assertion(message) = err.deepest() {
                        case.passed = false;
                        case.error_message = message.clone();
                        // Attempt cleanup even for a failed case. A failure
                        // here overwrites the assertion failure's reported
                        // message and detail.
                        if let Err(second) = run_after_hooks(&registration.after_each, fixture) {
                            let deepest = second.deepest();
                            case.error_message = deepest.message().to_string();
                            case.exception_details = second.trace();
                        }
                    } else {
                        // Code under test crashed; after-each hooks are not
                        // attempted in this branch.
                        record_unexpected(&mut case, &err);
                    }
                }
            }

            case.elapsed_ms = case_timer.elapsed().as_millis() as u64;
            debug!(
                target: "simpletest::run",
                group = %registration.name,
                case = %case.name,
                passed = case.passed,
                elapsed_ms = case.elapsed_ms,
                "Case finished"
            );
            group.cases.push(case);
        }
    }
    group.elapsed_ms = group_timer.elapsed().as_millis() as u64;
}

/// Steps 2-4 of the case protocol: before hooks, invocation, return-value
/// classification. Any raised failure propagates to the caller's
/// classification.
fn invoke_case(
    registration: &GroupRegistration,
    method: &CaseMethod,
    marker: &CaseMarker,
    fixture: &mut Fixture,
    case: &mut TestCase,
) -> CaseResult<()> {
    for hook in &registration.before_each {
        hook(fixture)?;
    }

    if marker.params.len() != method.arity {
        return Err(CaseError::fault_of(
            "ParameterCount",
            format!(
                "Case {} supplies {} parameter(s) but its method takes {}",
                marker.name,
                marker.params.len(),
                method.arity
            ),
        ));
    }

    let output = (method.body)(fixture, &marker.params)?;
    match output {
        CaseOutput::Steps(sequence) => {
            for (i, value) in drain(sequence).into_iter().enumerate() {
                let _ = writeln!(case.assertion_details, "Iteration [{i}] returned {value}");
            }
            Ok(())
        }
        CaseOutput::Asserts(chains) => {
            for (i, chain) in chains.iter().enumerate() {
                if !chain.details().is_empty() {
                    let _ = writeln!(
                        case.assertion_details,
                        "{}. {}",
                        i + 1,
                        chain.details().trim_end()
                    );
                }
            }
            Ok(())
        }
        CaseOutput::Value(value) => {
            if value != marker.expected {
                return Err(CaseError::Assertion(format!(
                    "Expected return value is as expected. Expected: {}, Returned: {value}",
                    marker.expected
                )));
            }
            Ok(())
        }
    }
}

fn run_after_hooks(hooks: &[HookFn], fixture: &mut Fixture) -> CaseResult<()> {
    for hook in hooks {
        hook(fixture)?;
    }
    Ok(())
}

/// Classify a failure raised by after-each hooks following a success.
fn resolve_failure(case: &mut TestCase, err: &CaseError) {
    case.passed = false;
    match err.deepest() {
        CaseError::Assertion(message) => {
            case.error_message = message.clone();
        }
        _ => record_unexpected(case, err),
    }
}

fn record_unexpected(case: &mut TestCase, err: &CaseError) {
    let deepest = err.deepest();
    case.passed = false;
    case.error_message = UNKNOWN_EXCEPTION_MESSAGE.to_string();
    case.exception_details = format!(
        "{EXCEPTION_PREAMBLE}{}\n{}",
        deepest.message(),
        err.trace()
    );
}
