//! Value types for simpletest
//!
//! This module defines `Value`, the unified dynamic value used for assertion
//! subjects, expected case results and case parameters.
//!
//! ## Type rules
//!
//! - No implicit coercions in equality: `Int(1) != Float(1.0)`.
//! - Float equality follows IEEE-754: `NaN != NaN`, `-0.0 == 0.0`.
//! - `Object` and `Action` compare by reference identity (shared handle).
//!
//! Numeric assertion steps may still coerce through [`Value::as_number`];
//! that is an explicit, step-local choice, never part of equality.

use crate::error::CaseResult;
use crate::shape::ObjectShape;
use serde::ser::SerializeSeq;
use serde::{Serialize, Serializer};
use std::fmt;
use std::sync::Arc;

/// Invokable zero-argument action used by behavioral assertions.
///
/// Wraps a shared closure; invoking it either completes or raises a
/// [`crate::CaseError`]. Two handles are equal only when they share the
/// same underlying closure.
#[derive(Clone)]
pub struct ActionHandle(Arc<dyn Fn() -> CaseResult<()> + Send + Sync>);

impl ActionHandle {
    /// Wrap a closure as an invokable action.
    pub fn new(f: impl Fn() -> CaseResult<()> + Send + Sync + 'static) -> Self {
        Self(Arc::new(f))
    }

    /// Invoke the action.
    pub fn invoke(&self) -> CaseResult<()> {
        (self.0)()
    }

    fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for ActionHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ActionHandle(..)")
    }
}

/// Canonical simpletest value type
#[derive(Debug, Clone)]
pub enum Value {
    /// Null value
    Null,
    /// Boolean value
    Bool(bool),
    /// 64-bit signed integer
    Int(i64),
    /// 64-bit floating point (IEEE-754)
    Float(f64),
    /// UTF-8 string
    String(String),
    /// Raw bytes
    Bytes(Vec<u8>),
    /// Ordered list of values
    List(Vec<Value>),
    /// Object subject with a declared shape; reference identity
    Object(Arc<ObjectShape>),
    /// Invokable zero-argument action; reference identity
    Action(ActionHandle),
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            // IEEE-754: NaN != NaN, -0.0 == 0.0
            (Value::Float(a), Value::Float(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Bytes(a), Value::Bytes(b)) => a == b,
            (Value::List(a), Value::List(b)) => a == b,
            (Value::Object(a), Value::Object(b)) => Arc::ptr_eq(a, b),
            (Value::Action(a), Value::Action(b)) => a.ptr_eq(b),
            // Different types are never equal
            _ => false,
        }
    }
}

impl Value {
    /// Variant name of this value
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "Null",
            Value::Bool(_) => "Bool",
            Value::Int(_) => "Int",
            Value::Float(_) => "Float",
            Value::String(_) => "String",
            Value::Bytes(_) => "Bytes",
            Value::List(_) => "List",
            Value::Object(_) => "Object",
            Value::Action(_) => "Action",
        }
    }

    /// Runtime type name used by type-identity assertions: the declared
    /// shape name for objects, the variant name for everything else.
    pub fn runtime_type_name(&self) -> &str {
        match self {
            Value::Object(shape) => &shape.type_name,
            other => other.type_name(),
        }
    }

    /// Coerce to a common numeric representation, when possible.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Int(i) => Some(*i as f64),
            Value::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// Coerce to an integer length bound, when possible.
    pub fn as_length_bound(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            Value::Float(f) => Some(f.round() as i64),
            _ => None,
        }
    }

    /// Number of elements for countable values (`List`, `Bytes`).
    pub fn countable_len(&self) -> Option<usize> {
        match self {
            Value::List(items) => Some(items.len()),
            Value::Bytes(bytes) => Some(bytes.len()),
            _ => None,
        }
    }

    /// The declared shape, if this is an object subject.
    pub fn shape(&self) -> Option<&ObjectShape> {
        match self {
            Value::Object(shape) => Some(shape),
            _ => None,
        }
    }

    /// Reference identity: shared handle for objects and actions,
    /// false for everything else.
    pub fn reference_equals(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Object(a), Value::Object(b)) => Arc::ptr_eq(a, b),
            (Value::Action(a), Value::Action(b)) => a.ptr_eq(b),
            _ => false,
        }
    }

    /// Wrap a shape as an object value.
    pub fn object(shape: ObjectShape) -> Self {
        Value::Object(Arc::new(shape))
    }

    /// Wrap a closure as an action value.
    pub fn action(f: impl Fn() -> CaseResult<()> + Send + Sync + 'static) -> Self {
        Value::Action(ActionHandle::new(f))
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "null"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Int(i) => write!(f, "{i}"),
            Value::Float(x) => write!(f, "{x}"),
            Value::String(s) => write!(f, "{s}"),
            Value::Bytes(bytes) => write!(f, "bytes[{}]", bytes.len()),
            Value::List(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{item}")?;
                }
                write!(f, "]")
            }
            Value::Object(shape) => write!(f, "{}", shape.type_name),
            Value::Action(_) => write!(f, "<action>"),
        }
    }
}

// Manual Serialize: actions hold closures, objects serialize as their
// declared type name. Enough for the display sink's JSON export.
impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            Value::Null => serializer.serialize_unit(),
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::Int(i) => serializer.serialize_i64(*i),
            Value::Float(x) => serializer.serialize_f64(*x),
            Value::String(s) => serializer.serialize_str(s),
            Value::Bytes(bytes) => serializer.serialize_bytes(bytes),
            Value::List(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            Value::Object(shape) => serializer.serialize_str(&shape.type_name),
            Value::Action(_) => serializer.serialize_str("<action>"),
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Value::Int(i64::from(i))
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::List(items)
    }
}

impl From<ObjectShape> for Value {
    fn from(shape: ObjectShape) -> Self {
        Value::object(shape)
    }
}
