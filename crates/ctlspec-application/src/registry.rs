//! Memoized per-example fixtures
//!
//! `prepare_model` hands out at most one fixture per model key and example.
//! The first request builds it, through the example's custom constructor
//! for that model when one is defined and a plain double otherwise; every
//! later request returns the very same handle.

use crate::context::ExampleContext;
use ctlspec_domain::error::Result;
use ctlspec_domain::{Attributes, EntityRef, Fixture};
use std::collections::HashMap;
use std::rc::Rc;
use tracing::debug;

/// Custom fixture constructor, keyed by model in the example
pub type FixtureConstructor = Rc<dyn Fn(&mut ExampleContext) -> Result<Fixture>>;

/// Fixtures prepared in one example, by registry key
#[derive(Debug, Default)]
pub struct ModelDoubleRegistry {
    entries: HashMap<String, Fixture>,
    prepared: Vec<Fixture>,
    last_bound: Option<Fixture>,
}

impl ModelDoubleRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Fixture stored under `key`
    pub fn get(&self, key: &str) -> Option<&Fixture> {
        self.entries.get(key)
    }

    /// Store a freshly prepared fixture; it becomes the most recent one
    pub fn insert(&mut self, key: String, fixture: Fixture) {
        self.prepared.push(fixture.clone());
        self.entries.insert(key, fixture);
    }

    /// Store a fixture under `key` without making it the most recent one
    pub fn assign(&mut self, key: String, fixture: Fixture) {
        self.entries.insert(key, fixture);
    }

    /// The most recently prepared fixture
    pub fn last_prepared(&self) -> Option<&Fixture> {
        self.prepared.last()
    }

    /// Note that a class's finders now answer `fixture`
    ///
    /// Only prepared fixtures count; actors bound outside the registry are
    /// ignored.
    pub fn mark_bound(&mut self, fixture: &Fixture) {
        if self.prepared.iter().any(|prepared| prepared.ptr_eq(fixture)) {
            self.last_bound = Some(fixture.clone());
        }
    }

    /// The fixture a member request is about
    ///
    /// The most recently prepared fixture whose finders were bound, else the
    /// most recently prepared one.
    pub fn relevant(&self) -> Option<&Fixture> {
        self.last_bound.as_ref().or_else(|| self.last_prepared())
    }

    /// Number of stored fixtures
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing is stored
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl ExampleContext {
    /// The example's fixture for `model`, created on first use
    pub fn prepare_model<R: Into<EntityRef>>(&mut self, model: R) -> Result<Fixture> {
        let descriptor = self.resolve_model(model)?;
        let key = descriptor.key();
        if let Some(existing) = self.registry.get(&key) {
            debug!(key = %key, "fixture already prepared");
            return Ok(existing.clone());
        }

        let fixture = match self.constructors.get(&key).cloned() {
            Some(constructor) => {
                debug!(key = %key, "preparing fixture with custom constructor");
                constructor(self)?
            }
            None => {
                debug!(key = %key, "preparing generic fixture");
                self.factory.create_double(&descriptor, Attributes::new())?
            }
        };
        self.registry.insert(key, fixture.clone());
        Ok(fixture)
    }

    /// Fixture stored under a model's key, without creating one
    pub fn fixture(&self, key: &str) -> Option<Fixture> {
        self.registry.get(key).cloned()
    }

    /// The example's fixture registry
    pub fn registry(&self) -> &ModelDoubleRegistry {
        &self.registry
    }
}
