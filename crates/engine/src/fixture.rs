//! Group registration model
//!
//! A test group declares itself once as data: a name, an optional
//! environment binding, a fixture factory, ordered lifecycle hook lists and
//! a list of case methods, each carrying one or more case markers. The
//! registry stores these registrations and the runner executes them; no
//! runtime type introspection is involved.
//!
//! [`GroupBuilder`] is the typed entry point. It erases the group's fixture
//! type behind `dyn Any`, so registrations of differently-typed groups live
//! in one registry.

use crate::steps::StepSequence;
use simpletest_assert::Assert;
use simpletest_core::{CaseError, CaseMarker, CaseResult, Value};
use std::any::Any;
use std::marker::PhantomData;
use std::sync::Arc;

/// Instantiated group state, type-erased.
pub type Fixture = Box<dyn Any + Send>;

/// Erased lifecycle hook (setup, cleanup, before-each, after-each).
pub type HookFn = Arc<dyn Fn(&mut Fixture) -> CaseResult<()> + Send + Sync>;

/// Erased case body: receives the fixture and the marker's parameters.
pub type CaseFn = Arc<dyn Fn(&mut Fixture, &[Value]) -> CaseResult<CaseOutput> + Send + Sync>;

/// What a case body hands back to the engine for classification.
#[derive(Debug)]
pub enum CaseOutput {
    /// Plain value, compared against the marker's expected result
    Value(Value),
    /// Deferred-step narration, drained into the assertion detail trace
    Steps(StepSequence),
    /// Assertion chains whose accumulated details are collected
    Asserts(Vec<Assert>),
}

impl CaseOutput {
    /// The output of a case that returns nothing.
    pub fn unit() -> Self {
        CaseOutput::Value(Value::Null)
    }
}

impl From<Value> for CaseOutput {
    fn from(value: Value) -> Self {
        CaseOutput::Value(value)
    }
}

impl From<StepSequence> for CaseOutput {
    fn from(steps: StepSequence) -> Self {
        CaseOutput::Steps(steps)
    }
}

impl From<Vec<Assert>> for CaseOutput {
    fn from(chains: Vec<Assert>) -> Self {
        CaseOutput::Asserts(chains)
    }
}

/// One case method: a body, its declared arity, and the markers attached
/// to it. Each marker produces an independent result over the same body.
pub struct CaseMethod {
    pub(crate) body: CaseFn,
    /// Number of positional arguments the body consumes
    pub arity: usize,
    /// Markers declared on this method, in declaration order
    pub markers: Vec<CaseMarker>,
}

/// A registered test group: descriptor, lifecycle hooks and case list.
///
/// Hook and method lists preserve declaration order; the runner calls them
/// in exactly that order.
pub struct GroupRegistration {
    /// Declared group name, unique within a registry
    pub name: String,
    /// Environment-binding key; empty means "run anywhere"
    pub environment: String,
    pub(crate) factory: Arc<dyn Fn() -> Fixture + Send + Sync>,
    pub(crate) setup: Vec<HookFn>,
    pub(crate) cleanup: Vec<HookFn>,
    pub(crate) before_each: Vec<HookFn>,
    pub(crate) after_each: Vec<HookFn>,
    pub(crate) methods: Vec<CaseMethod>,
}

impl GroupRegistration {
    /// Create a fresh fixture for one run of this group.
    pub fn instantiate(&self) -> Fixture {
        (self.factory)()
    }

    /// The case methods declared on this group.
    pub fn methods(&self) -> &[CaseMethod] {
        &self.methods
    }
}

impl std::fmt::Debug for GroupRegistration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GroupRegistration")
            .field("name", &self.name)
            .field("environment", &self.environment)
            .field("methods", &self.methods.len())
            .finish()
    }
}

fn erase_hook<S: Send + 'static>(
    f: impl Fn(&mut S) -> CaseResult<()> + Send + Sync + 'static,
) -> HookFn {
    Arc::new(move |fixture: &mut Fixture| {
        let state = fixture
            .as_mut()
            .downcast_mut::<S>()
            .ok_or_else(|| CaseError::fault("fixture type mismatch in lifecycle hook"))?;
        f(state)
    })
}

/// Typed builder for a [`GroupRegistration`].
///
/// ```
/// use simpletest_engine::{CaseOutput, GroupBuilder};
/// use simpletest_core::{CaseMarker, Value};
///
/// #[derive(Default)]
/// struct Calc;
///
/// let registration = GroupBuilder::<Calc>::new("Calculator")
///     .case(
///         CaseMarker::new("add")
///             .expects(5)
///             .with_params(vec![Value::Int(2), Value::Int(3)]),
///         |_calc, args| {
///             let (a, b) = (&args[0], &args[1]);
///             match (a, b) {
///                 (Value::Int(a), Value::Int(b)) => Ok(CaseOutput::Value(Value::Int(a + b))),
///                 _ => Ok(CaseOutput::unit()),
///             }
///         },
///     )
///     .build();
/// assert_eq!(registration.name, "Calculator");
/// ```
pub struct GroupBuilder<S> {
    name: String,
    environment: String,
    setup: Vec<HookFn>,
    cleanup: Vec<HookFn>,
    before_each: Vec<HookFn>,
    after_each: Vec<HookFn>,
    methods: Vec<CaseMethod>,
    _fixture: PhantomData<fn() -> S>,
}

impl<S: Default + Send + 'static> GroupBuilder<S> {
    /// Start a builder for a group with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            environment: String::new(),
            setup: Vec::new(),
            cleanup: Vec::new(),
            before_each: Vec::new(),
            after_each: Vec::new(),
            methods: Vec::new(),
            _fixture: PhantomData,
        }
    }

    /// Bind the group to an environment key.
    pub fn environment(mut self, key: impl Into<String>) -> Self {
        self.environment = key.into();
        self
    }

    /// Add a group-setup hook, run once before the group's cases.
    pub fn setup(mut self, f: impl Fn(&mut S) -> CaseResult<()> + Send + Sync + 'static) -> Self {
        self.setup.push(erase_hook(f));
        self
    }

    /// Add a group-cleanup hook, run once after the group's cases.
    pub fn cleanup(mut self, f: impl Fn(&mut S) -> CaseResult<()> + Send + Sync + 'static) -> Self {
        self.cleanup.push(erase_hook(f));
        self
    }

    /// Add a hook run before every case.
    pub fn before_each(
        mut self,
        f: impl Fn(&mut S) -> CaseResult<()> + Send + Sync + 'static,
    ) -> Self {
        self.before_each.push(erase_hook(f));
        self
    }

    /// Add a hook run after every case.
    pub fn after_each(
        mut self,
        f: impl Fn(&mut S) -> CaseResult<()> + Send + Sync + 'static,
    ) -> Self {
        self.after_each.push(erase_hook(f));
        self
    }

    /// Declare a case method carrying a single marker. The method's arity
    /// is taken from the marker's parameter count.
    pub fn case(
        self,
        marker: CaseMarker,
        body: impl Fn(&mut S, &[Value]) -> CaseResult<CaseOutput> + Send + Sync + 'static,
    ) -> Self {
        let arity = marker.params.len();
        self.cases(arity, vec![marker], body)
    }

    /// Declare a case method carrying several markers over the same body.
    /// Every marker must supply exactly `arity` parameters or its
    /// invocation fails at run time.
    pub fn cases(
        mut self,
        arity: usize,
        markers: Vec<CaseMarker>,
        body: impl Fn(&mut S, &[Value]) -> CaseResult<CaseOutput> + Send + Sync + 'static,
    ) -> Self {
        let erased: CaseFn = Arc::new(move |fixture: &mut Fixture, args: &[Value]| {
            let state = fixture
                .as_mut()
                .downcast_mut::<S>()
                .ok_or_else(|| CaseError::fault("fixture type mismatch in case body"))?;
            body(state, args)
        });
        self.methods.push(CaseMethod {
            body: erased,
            arity,
            markers,
        });
        self
    }

    /// Finish the registration.
    pub fn build(self) -> GroupRegistration {
        GroupRegistration {
            name: self.name,
            environment: self.environment,
            factory: Arc::new(|| Box::new(S::default()) as Fixture),
            setup: self.setup,
            cleanup: self.cleanup,
            before_each: self.before_each,
            after_each: self.after_each,
            methods: self.methods,
        }
    }

    /// Finish the registration and add it to the global registry.
    pub fn register(self) -> simpletest_core::Result<()> {
        crate::registry::register(self.build())
    }
}
