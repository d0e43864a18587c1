//! Declared object shapes
//!
//! Members of a test subject are declared up front rather than resolved by
//! runtime introspection: a subject's shape carries a type name, the type
//! names it claims to be an instance of, and an ordered member list.
//! The assertion chain's member checks (`has_member`, `is_method`, `of_type`,
//! `returns_type`) operate on these descriptors.

use serde::Serialize;
use std::fmt;

/// Kind of a declared member
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum MemberKind {
    /// Callable member; `type_name` is its return type
    Method,
    /// Computed member; `type_name` is its value type
    Property,
    /// Stored member; `type_name` is its value type
    Field,
}

impl fmt::Display for MemberKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MemberKind::Method => write!(f, "method"),
            MemberKind::Property => write!(f, "property"),
            MemberKind::Field => write!(f, "field"),
        }
    }
}

/// One declared member of an object shape
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Member {
    /// Member name, unique within its shape
    pub name: String,
    /// Whether this is a method, property or field
    pub kind: MemberKind,
    /// Declared value type (return type for methods)
    pub type_name: String,
}

impl Member {
    /// Create a member descriptor.
    pub fn new(name: impl Into<String>, kind: MemberKind, type_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind,
            type_name: type_name.into(),
        }
    }
}

impl fmt::Display for Member {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.kind, self.name)
    }
}

/// Declared shape of an object subject
///
/// Built fluently:
///
/// ```
/// use simpletest_core::shape::ObjectShape;
///
/// let shape = ObjectShape::new("Player")
///     .implements("Entity")
///     .with_field("health", "Int")
///     .with_property("alive", "Bool")
///     .with_method("attack", "Int");
/// assert!(shape.member("health").is_some());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ObjectShape {
    /// Concrete type name of the object
    pub type_name: String,
    /// Additional type names this object counts as an instance of
    pub implements: Vec<String>,
    /// Declared members, in declaration order
    pub members: Vec<Member>,
}

impl ObjectShape {
    /// Create an empty shape with the given concrete type name.
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            implements: Vec::new(),
            members: Vec::new(),
        }
    }

    /// Declare a base type or interface this object is an instance of.
    pub fn implements(mut self, type_name: impl Into<String>) -> Self {
        self.implements.push(type_name.into());
        self
    }

    /// Declare a method member with its return type.
    pub fn with_method(mut self, name: impl Into<String>, return_type: impl Into<String>) -> Self {
        self.members
            .push(Member::new(name, MemberKind::Method, return_type));
        self
    }

    /// Declare a property member with its value type.
    pub fn with_property(mut self, name: impl Into<String>, type_name: impl Into<String>) -> Self {
        self.members
            .push(Member::new(name, MemberKind::Property, type_name));
        self
    }

    /// Declare a field member with its value type.
    pub fn with_field(mut self, name: impl Into<String>, type_name: impl Into<String>) -> Self {
        self.members
            .push(Member::new(name, MemberKind::Field, type_name));
        self
    }

    /// Look up a member by name.
    pub fn member(&self, name: &str) -> Option<&Member> {
        self.members.iter().find(|m| m.name == name)
    }

    /// Whether this shape is an instance of the named type (its concrete
    /// type, or anything it declares it implements).
    pub fn is_instance_of(&self, type_name: &str) -> bool {
        self.type_name == type_name || self.implements.iter().any(|t| t == type_name)
    }
}
