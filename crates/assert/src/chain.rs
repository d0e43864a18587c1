//! Stateful fluent assertion chain
//!
//! A chain wraps one subject [`Value`] and is mutated in place through
//! successive steps. The first failing step latches a failure message;
//! every later step is a non-evaluating no-op that preserves that message.
//! Only the terminal [`Assert::end`] converts a failed chain into an
//! [`CaseError::Assertion`]; a chain that is never terminated simply
//! carries its failed state.
//!
//! Member checks (`has_member`, `is_method`, `of_type`, ...) hand state
//! from one step to the next through the closed [`Carried`] enum and
//! enforce their ordering constraints via the recorded previous step name.

use simpletest_core::{CaseError, CaseResult, Member, MemberKind, Value};
use std::fmt;

/// Name of a chain step, recorded as the "previous operation" after each
/// successfully applied step and rendered into failure messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[allow(missing_docs)]
pub enum StepName {
    IsEqual,
    IsNotEqual,
    IsGreaterThan,
    IsGreaterOrEqual,
    IsLessThan,
    IsLessOrEqual,
    IsOfType,
    InstanceOfType,
    IsNotOfType,
    IsReferenceEqual,
    IsNotReferenceEqual,
    And,
    Or,
    Not,
    Contains,
    LengthEquals,
    LengthNotEqual,
    LengthGreaterThan,
    LengthGreaterOrEqual,
    LengthLessThan,
    LengthLessOrEqual,
    StringContains,
    ThrowsException,
    HasMember,
    IsMethod,
    IsProperty,
    IsField,
    OfType,
    ReturnsType,
}

impl StepName {
    /// The step name as it appears in failure messages.
    pub fn as_str(self) -> &'static str {
        match self {
            StepName::IsEqual => "IsEqual",
            StepName::IsNotEqual => "IsNotEqual",
            StepName::IsGreaterThan => "IsGreaterThan",
            StepName::IsGreaterOrEqual => "IsGreaterOrEqual",
            StepName::IsLessThan => "IsLessThan",
            StepName::IsLessOrEqual => "IsLessOrEqual",
            StepName::IsOfType => "IsOfType",
            StepName::InstanceOfType => "InstanceOfType",
            StepName::IsNotOfType => "IsNotOfType",
            StepName::IsReferenceEqual => "IsReferenceEqual",
            StepName::IsNotReferenceEqual => "IsNotReferenceEqual",
            StepName::And => "And",
            StepName::Or => "Or",
            StepName::Not => "Not",
            StepName::Contains => "Contains",
            StepName::LengthEquals => "LengthEquals",
            StepName::LengthNotEqual => "LengthNotEqual",
            StepName::LengthGreaterThan => "LengthGreaterThan",
            StepName::LengthGreaterOrEqual => "LengthGreaterOrEqual",
            StepName::LengthLessThan => "LengthLessThan",
            StepName::LengthLessOrEqual => "LengthLessOrEqual",
            StepName::StringContains => "StringContains",
            StepName::ThrowsException => "ThrowsException",
            StepName::HasMember => "HasMember",
            StepName::IsMethod => "IsMethod",
            StepName::IsProperty => "IsProperty",
            StepName::IsField => "IsField",
            StepName::OfType => "OfType",
            StepName::ReturnsType => "ReturnsType",
        }
    }
}

impl fmt::Display for StepName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Cross-step handoff state produced by member-resolution steps.
#[derive(Debug, Clone, Default)]
pub enum Carried {
    /// Nothing carried
    #[default]
    None,
    /// Member resolved by `has_member`, kind not yet validated
    Member(Member),
    /// Member narrowed by `is_method`
    Method(Member),
    /// Member narrowed by `is_property`
    Property(Member),
    /// Member narrowed by `is_field`
    Field(Member),
}

impl Carried {
    fn member(&self) -> Option<&Member> {
        match self {
            Carried::None => None,
            Carried::Member(m)
            | Carried::Method(m)
            | Carried::Property(m)
            | Carried::Field(m) => Some(m),
        }
    }
}

/// Mutable, stateful assertion chain around one subject value.
#[derive(Debug)]
pub struct Assert {
    value: Value,
    succeed: bool,
    fail_message: String,
    details: String,
    previous: Option<StepName>,
    carried: Carried,
}

impl Assert {
    /// Begin a chain over the given subject.
    pub fn create(value: impl Into<Value>) -> Self {
        Self {
            value: value.into(),
            succeed: true,
            fail_message: String::new(),
            details: String::new(),
            previous: None,
            carried: Carried::None,
        }
    }

    /// Whether the chain is still in a succeeding state.
    pub fn succeeded(&self) -> bool {
        self.succeed
    }

    /// The latched failure message, empty while succeeding.
    pub fn fail_message(&self) -> &str {
        &self.fail_message
    }

    /// Accumulated free-text annotations.
    pub fn details(&self) -> &str {
        &self.details
    }

    /// The subject value.
    pub fn value(&self) -> &Value {
        &self.value
    }

    /// Name of the last successfully applied step.
    pub fn previous_step(&self) -> Option<StepName> {
        self.previous
    }

    fn fail(&mut self, message: String) {
        self.succeed = false;
        self.fail_message = message;
    }

    /// Append a free-text annotation line.
    pub fn add_details(mut self, text: impl AsRef<str>) -> Self {
        self.details.push_str(text.as_ref());
        self.details.push('\n');
        self
    }

    // ------------------------------------------------------------------
    // Value comparisons
    // ------------------------------------------------------------------

    /// Subject must equal `value` (value equality, no coercion).
    pub fn is_equal(mut self, value: impl Into<Value>) -> Self {
        if !self.succeed {
            return self;
        }
        self.previous = Some(StepName::IsEqual);
        let value = value.into();
        if self.value != value {
            self.fail(format!("IsEqual: {} != {}", self.value, value));
        }
        self
    }

    /// Subject must not equal `value`.
    pub fn is_not_equal(mut self, value: impl Into<Value>) -> Self {
        if !self.succeed {
            return self;
        }
        self.previous = Some(StepName::IsNotEqual);
        let value = value.into();
        if self.value == value {
            self.fail(format!("IsNotEqual: {} == {}", self.value, value));
        }
        self
    }

    fn numeric_step(
        mut self,
        name: StepName,
        bound: Value,
        op: &str,
        cmp: impl FnOnce(f64, f64) -> bool,
    ) -> Self {
        if !self.succeed {
            return self;
        }
        self.previous = Some(name);
        match (self.value.as_number(), bound.as_number()) {
            (Some(subject), Some(bound)) => {
                if !cmp(subject, bound) {
                    self.fail(format!("{name}: {subject} {op} {bound}"));
                }
            }
            _ => self.fail(format!(
                "{name}: {} and {} are not comparable as numbers",
                self.value, bound
            )),
        }
        self
    }

    /// Numeric: subject > value.
    pub fn is_greater_than(self, value: impl Into<Value>) -> Self {
        self.numeric_step(StepName::IsGreaterThan, value.into(), ">", |a, b| a > b)
    }

    /// Numeric: subject >= value.
    pub fn is_greater_or_equal(self, value: impl Into<Value>) -> Self {
        self.numeric_step(StepName::IsGreaterOrEqual, value.into(), ">=", |a, b| a >= b)
    }

    /// Numeric: subject < value.
    pub fn is_less_than(self, value: impl Into<Value>) -> Self {
        self.numeric_step(StepName::IsLessThan, value.into(), "<", |a, b| a < b)
    }

    /// Numeric: subject <= value.
    pub fn is_less_or_equal(self, value: impl Into<Value>) -> Self {
        self.numeric_step(StepName::IsLessOrEqual, value.into(), "<=", |a, b| a <= b)
    }

    // ------------------------------------------------------------------
    // Identity / type checks
    // ------------------------------------------------------------------

    /// Subject's runtime type name must be exactly `type_name`.
    pub fn is_of_type(mut self, type_name: &str) -> Self {
        if !self.succeed {
            return self;
        }
        self.previous = Some(StepName::IsOfType);
        if self.value.runtime_type_name() != type_name {
            self.fail(format!(
                "IsOfType: {} is not {type_name}",
                self.value.runtime_type_name()
            ));
        }
        self
    }

    /// Subject must be an instance of `type_name`: its exact type, or a
    /// type its shape declares it implements.
    pub fn instance_of_type(mut self, type_name: &str) -> Self {
        if !self.succeed {
            return self;
        }
        self.previous = Some(StepName::InstanceOfType);
        let is_instance = match self.value.shape() {
            Some(shape) => shape.is_instance_of(type_name),
            None => self.value.runtime_type_name() == type_name,
        };
        if !is_instance {
            self.fail(format!(
                "InstanceOfType: {} does not inherit from {type_name}",
                self.value.runtime_type_name()
            ));
        }
        self
    }

    /// Subject's runtime type name must differ from `type_name`.
    pub fn is_not_of_type(mut self, type_name: &str) -> Self {
        if !self.succeed {
            return self;
        }
        self.previous = Some(StepName::IsNotOfType);
        if self.value.runtime_type_name() == type_name {
            self.fail(format!("IsNotOfType: {} is {type_name}", self.value.runtime_type_name()));
        }
        self
    }

    /// Subject must share the same underlying handle as `value`.
    pub fn is_reference_equal(mut self, value: &Value) -> Self {
        if !self.succeed {
            return self;
        }
        self.previous = Some(StepName::IsReferenceEqual);
        if !self.value.reference_equals(value) {
            self.fail(format!("IsReferenceEqual: {} is not {value}", self.value));
        }
        self
    }

    /// Subject must not share the same underlying handle as `value`.
    pub fn is_not_reference_equal(mut self, value: &Value) -> Self {
        if !self.succeed {
            return self;
        }
        self.previous = Some(StepName::IsNotReferenceEqual);
        if self.value.reference_equals(value) {
            self.fail(format!("IsNotReferenceEqual: {} is {value}", self.value));
        }
        self
    }

    // ------------------------------------------------------------------
    // Combinators
    // ------------------------------------------------------------------

    /// Both this chain and `other` must currently succeed.
    pub fn and(mut self, other: Assert) -> Self {
        self.previous = Some(StepName::And);
        if !(self.succeed && other.succeed) {
            let message = format!(
                "And: One or more assertions failed. Left assertion Succeed: {} {}, Parameter assertion Succeed: {} {}",
                self.succeed, self.fail_message, other.succeed, other.fail_message
            );
            self.fail(message);
        }
        self
    }

    /// Returns the first of the two chains that currently succeeds, else
    /// this chain unchanged.
    pub fn or(mut self, mut other: Assert) -> Self {
        if self.succeed {
            self.previous = Some(StepName::Or);
            return self;
        }
        if other.succeed {
            other.previous = Some(StepName::Or);
            return other;
        }
        self
    }

    /// Flip the chain's state.
    pub fn not(mut self) -> Self {
        if self.succeed {
            self.fail(format!("Not: Assertion with value {}", self.value));
        } else {
            self.succeed = true;
            self.fail_message.clear();
        }
        self.previous = Some(StepName::Not);
        self
    }

    // ------------------------------------------------------------------
    // Collection checks
    // ------------------------------------------------------------------

    /// Subject list must contain `value`.
    pub fn contains(mut self, value: impl Into<Value>) -> Self {
        if !self.succeed {
            return self;
        }
        self.previous = Some(StepName::Contains);
        let value = value.into();
        match &self.value {
            Value::List(items) => {
                if !items.contains(&value) {
                    self.fail(format!(
                        "Contains: Collection {} does not contain {value}",
                        self.value
                    ));
                }
            }
            other => {
                let message = format!(
                    "Contains: Subject {other} of type {} is not a collection",
                    other.type_name()
                );
                self.fail(message);
            }
        }
        self
    }

    fn length_step(
        mut self,
        name: StepName,
        bound: Value,
        phrase: &str,
        cmp: impl FnOnce(i64, i64) -> bool,
    ) -> Self {
        if !self.succeed {
            return self;
        }
        self.previous = Some(name);
        let Some(bound_len) = bound.as_length_bound() else {
            self.fail(format!("{name}: Length bound {bound} is not an integer"));
            return self;
        };
        match self.value.countable_len() {
            Some(len) => {
                if !cmp(len as i64, bound_len) {
                    self.fail(format!(
                        "{name}: Collection {} length {len} is not {phrase} {bound_len}",
                        self.value
                    ));
                }
            }
            None => {
                let message = format!(
                    "{name}: Subject {} of type {} is neither a list nor bytes",
                    self.value,
                    self.value.type_name()
                );
                self.fail(message);
            }
        }
        self
    }

    /// Countable subject's length must equal `value`.
    pub fn length_equals(self, value: impl Into<Value>) -> Self {
        self.length_step(StepName::LengthEquals, value.into(), "equal to", |a, b| {
            a == b
        })
    }

    /// Countable subject's length must not equal `value`.
    pub fn length_not_equal(self, value: impl Into<Value>) -> Self {
        self.length_step(
            StepName::LengthNotEqual,
            value.into(),
            "different from",
            |a, b| a != b,
        )
    }

    /// Countable subject's length must be greater than `value`.
    pub fn length_greater_than(self, value: impl Into<Value>) -> Self {
        self.length_step(
            StepName::LengthGreaterThan,
            value.into(),
            "greater than",
            |a, b| a > b,
        )
    }

    /// Countable subject's length must be greater than or equal to `value`.
    pub fn length_greater_or_equal(self, value: impl Into<Value>) -> Self {
        self.length_step(
            StepName::LengthGreaterOrEqual,
            value.into(),
            "greater than or equal to",
            |a, b| a >= b,
        )
    }

    /// Countable subject's length must be less than `value`.
    pub fn length_less_than(self, value: impl Into<Value>) -> Self {
        self.length_step(
            StepName::LengthLessThan,
            value.into(),
            "less than",
            |a, b| a < b,
        )
    }

    /// Countable subject's length must be less than or equal to `value`.
    pub fn length_less_or_equal(self, value: impl Into<Value>) -> Self {
        self.length_step(
            StepName::LengthLessOrEqual,
            value.into(),
            "less than or equal to",
            |a, b| a <= b,
        )
    }

    // ------------------------------------------------------------------
    // String check
    // ------------------------------------------------------------------

    /// Subject's rendered form must contain the rendered form of `value`.
    pub fn string_contains(mut self, value: impl Into<Value>) -> Self {
        if !self.succeed {
            return self;
        }
        self.previous = Some(StepName::StringContains);
        let value = value.into();
        if !self.value.to_string().contains(&value.to_string()) {
            self.fail(format!(
                "StringContains: String {} does not contain string {value}",
                self.value
            ));
        }
        self
    }

    // ------------------------------------------------------------------
    // Behavioral check
    // ------------------------------------------------------------------

    /// Subject must be an invokable action whose invocation raises a
    /// failure; when `expected_kind` is given, the raised failure's kind
    /// must match it exactly.
    pub fn throws_exception(mut self, expected_kind: Option<&str>) -> Self {
        if !self.succeed {
            return self;
        }
        self.previous = Some(StepName::ThrowsException);
        let action = match &self.value {
            Value::Action(action) => action.clone(),
            _ => {
                self.fail(
                    "ThrowsException: Subject used in Assert::create is not an invokable action"
                        .to_string(),
                );
                return self;
            }
        };
        match action.invoke() {
            Ok(()) => {
                self.fail("ThrowsException: Action did not raise any failure".to_string());
            }
            Err(raised) => {
                if let Some(expected) = expected_kind {
                    if raised.kind_name() != expected {
                        self.fail(format!(
                            "ThrowsException: Action raised a failure of kind {} instead of {expected}",
                            raised.kind_name()
                        ));
                    }
                }
            }
        }
        self
    }

    // ------------------------------------------------------------------
    // Member handoff checks
    // ------------------------------------------------------------------

    /// Look up a declared member by name on the subject's shape and carry
    /// it for the following narrowing step.
    pub fn has_member(mut self, name: &str) -> Self {
        if !self.succeed {
            return self;
        }
        self.previous = Some(StepName::HasMember);
        match self.value.shape() {
            Some(shape) => match shape.member(name) {
                Some(member) => self.carried = Carried::Member(member.clone()),
                None => {
                    let message = format!(
                        "Object {} does not have member with name {name}",
                        self.value
                    );
                    self.fail(message);
                }
            },
            None => {
                let message = format!(
                    "HasMember: Subject {} of type {} has no declared shape",
                    self.value,
                    self.value.type_name()
                );
                self.fail(message);
            }
        }
        self
    }

    fn narrow_member(
        mut self,
        name: StepName,
        expected: MemberKind,
        wrap: impl FnOnce(Member) -> Carried,
    ) -> Self {
        if !self.succeed {
            return self;
        }
        match std::mem::take(&mut self.carried).member().cloned() {
            Some(member) => {
                if member.kind == expected {
                    self.carried = wrap(member);
                } else {
                    self.fail(format!(
                        "Member {member} from object {} is not a {expected}.",
                        self.value
                    ));
                }
            }
            None => self.fail(format!("{} is not a {expected}.", self.value)),
        }
        self.previous = Some(name);
        self
    }

    /// Carried member must be a method.
    pub fn is_method(self) -> Self {
        self.narrow_member(StepName::IsMethod, MemberKind::Method, Carried::Method)
    }

    /// Carried member must be a property.
    pub fn is_property(self) -> Self {
        self.narrow_member(StepName::IsProperty, MemberKind::Property, Carried::Property)
    }

    /// Carried member must be a field.
    pub fn is_field(self) -> Self {
        self.narrow_member(StepName::IsField, MemberKind::Field, Carried::Field)
    }

    fn ordering_violation(&mut self, step: StepName, allowed: &[StepName]) {
        let allowed_names: Vec<&str> = allowed.iter().map(|s| s.as_str()).collect();
        let was = self
            .previous
            .map_or("none", StepName::as_str);
        let line = format!(
            "{step} has to be after one of the following assertions: {}, was {was}",
            allowed_names.join(", ")
        );
        self.details.push_str(&line);
        self.details.push('\n');
        self.fail(format!("Wrong assertions order. {line}"));
    }

    /// Carried field's or property's declared type must be `type_name`.
    /// Only valid directly after `is_field` or `is_property`.
    pub fn of_type(mut self, type_name: &str) -> Self {
        if !self.succeed {
            return self;
        }
        const ALLOWED: &[StepName] = &[StepName::IsField, StepName::IsProperty];
        if !matches!(self.previous, Some(StepName::IsField) | Some(StepName::IsProperty)) {
            self.ordering_violation(StepName::OfType, ALLOWED);
            return self;
        }
        match &self.carried {
            Carried::Field(member) => {
                if member.type_name != type_name {
                    let message = format!(
                        "Field {} is {}, expected: {type_name}",
                        member.name, member.type_name
                    );
                    self.fail(message);
                }
            }
            Carried::Property(member) => {
                if member.type_name != type_name {
                    let message = format!(
                        "Property {} is {}, expected: {type_name}",
                        member.name, member.type_name
                    );
                    self.fail(message);
                }
            }
            _ => {}
        }
        self.previous = Some(StepName::OfType);
        self
    }

    /// Carried member's return/declared type must be `type_name`.
    /// Only valid directly after `is_method`, `is_property` or `is_field`.
    pub fn returns_type(mut self, type_name: &str) -> Self {
        if !self.succeed {
            return self;
        }
        const ALLOWED: &[StepName] = &[StepName::IsMethod, StepName::IsProperty, StepName::IsField];
        if !matches!(
            self.previous,
            Some(StepName::IsMethod) | Some(StepName::IsProperty) | Some(StepName::IsField)
        ) {
            self.ordering_violation(StepName::ReturnsType, ALLOWED);
            return self;
        }
        match &self.carried {
            Carried::Method(member) => {
                if member.type_name != type_name {
                    let message = format!(
                        "Method {} returns {} instead of {type_name}",
                        member.name, member.type_name
                    );
                    self.fail(message);
                }
            }
            Carried::Property(member) | Carried::Field(member) => {
                if member.type_name != type_name {
                    let message = format!(
                        "{} {} returns {} instead of {type_name}",
                        member.kind, member.name, member.type_name
                    );
                    self.fail(message);
                }
            }
            _ => {}
        }
        self.previous = Some(StepName::ReturnsType);
        self
    }

    // ------------------------------------------------------------------
    // Terminal step
    // ------------------------------------------------------------------

    /// Terminate the chain: a failed state becomes an assertion failure,
    /// a succeeding chain yields back its subject.
    pub fn end(self) -> CaseResult<Value> {
        self.end_with("")
    }

    /// Terminate the chain with an additional message prefix.
    pub fn end_with(self, prefix: &str) -> CaseResult<Value> {
        if !self.succeed {
            return Err(CaseError::Assertion(format!(
                "{prefix} :: {}",
                self.fail_message
            )));
        }
        Ok(self.value)
    }
}
