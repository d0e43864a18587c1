//! Test group registry (discovery)
//!
//! Groups self-register once and are discovered as data; there is no module
//! scanning. A process-global registry backs the "declare once, discover
//! automatically" workflow; a constructible [`Registry`] offers the same
//! operations for embedders and for tests that need isolation.
//!
//! Registrations are snapshotted in registration order; discovery never
//! exposes the lock.

use crate::fixture::GroupRegistration;
use once_cell::sync::Lazy;
use parking_lot::RwLock;
use simpletest_core::{Error, Result};
use std::sync::Arc;
use tracing::debug;

/// Ordered collection of group registrations.
#[derive(Debug, Default)]
pub struct Registry {
    groups: Vec<Arc<GroupRegistration>>,
}

impl Registry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a registration.
    ///
    /// # Errors
    /// A duplicate group name or an empty name is fatal and rejected;
    /// markers inside the group are accepted as-is (duplicate case names
    /// are a case-level concern, not a discovery-level validation).
    pub fn register(&mut self, registration: GroupRegistration) -> Result<()> {
        if registration.name.is_empty() {
            return Err(Error::InvalidRegistration(
                "group name must not be empty".to_string(),
            ));
        }
        if self.groups.iter().any(|g| g.name == registration.name) {
            return Err(Error::DuplicateGroup(registration.name));
        }
        debug!(
            target: "simpletest::registry",
            group = %registration.name,
            environment = %registration.environment,
            "Registered test group"
        );
        self.groups.push(Arc::new(registration));
        Ok(())
    }

    /// All registered groups, in registration order.
    pub fn discover(&self) -> Vec<Arc<GroupRegistration>> {
        self.groups.clone()
    }

    /// Registered groups bound to the given environment key.
    pub fn discover_for(&self, environment: &str) -> Vec<Arc<GroupRegistration>> {
        self.groups
            .iter()
            .filter(|g| g.environment == environment)
            .cloned()
            .collect()
    }

    /// Number of registered groups.
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// Whether nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

static GLOBAL: Lazy<RwLock<Registry>> = Lazy::new(|| RwLock::new(Registry::new()));

/// Add a registration to the process-global registry.
pub fn register(registration: GroupRegistration) -> Result<()> {
    GLOBAL.write().register(registration)
}

/// Snapshot of all globally registered groups, in registration order.
pub fn discover() -> Vec<Arc<GroupRegistration>> {
    GLOBAL.read().discover()
}

/// Snapshot of globally registered groups bound to an environment key.
pub fn discover_for(environment: &str) -> Vec<Arc<GroupRegistration>> {
    GLOBAL.read().discover_for(environment)
}
