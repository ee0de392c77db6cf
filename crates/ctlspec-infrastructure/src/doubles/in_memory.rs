//! In-memory double factory
//!
//! Hands out instance doubles with sequential ids and keeps one class double
//! per entity descriptor. Every id is handed out at most once per factory:
//! explicit ids are reserved, and the sequence skips them. Stubs go straight into the target's stub table.
//! A factory is built per example and dropped with it.

use crate::constants::{ID_ATTRIBUTE, IN_MEMORY_FACTORY_NAME};
use ctlspec_domain::doubles::{Stub, StubTarget};
use ctlspec_domain::error::{Error, Result};
use ctlspec_domain::ports::DoubleFactory;
use ctlspec_domain::{
    ArgMatcher, Attributes, ClassDouble, EntityDescriptor, Fixture, FixtureId, HarnessSettings,
    Reply,
};
use std::cell::{Cell, RefCell};
use std::collections::{HashMap, HashSet};
use tracing::debug;

/// Double factory backed by plain in-memory tables
///
/// # Example
///
/// ```
/// use ctlspec_domain::ports::DoubleFactory;
/// use ctlspec_domain::{Attributes, EntityDescriptor};
/// use ctlspec_infrastructure::InMemoryDoubleFactory;
///
/// let factory = InMemoryDoubleFactory::new(1001);
/// let widget = factory
///     .create_double(&EntityDescriptor::new("Widget"), Attributes::new())
///     .unwrap();
/// assert_eq!(widget.id().value(), 1001);
/// ```
#[derive(Debug)]
pub struct InMemoryDoubleFactory {
    next_id: Cell<Option<u64>>,
    taken: RefCell<HashSet<u64>>,
    classes: RefCell<HashMap<EntityDescriptor, ClassDouble>>,
}

impl InMemoryDoubleFactory {
    /// Create a factory whose id sequence starts at `first_id`
    pub fn new(first_id: u64) -> Self {
        Self {
            next_id: Cell::new(Some(first_id)),
            taken: RefCell::new(HashSet::new()),
            classes: RefCell::new(HashMap::new()),
        }
    }

    /// Create a factory from harness settings
    pub fn from_settings(settings: &HarnessSettings) -> Self {
        Self::new(settings.first_fixture_id)
    }

    fn take_id(&self) -> Result<FixtureId> {
        loop {
            let id = self
                .next_id
                .get()
                .ok_or_else(|| Error::invalid_argument("double id sequence is exhausted"))?;
            self.next_id.set(id.checked_add(1));
            if self.taken.borrow_mut().insert(id) {
                return Ok(FixtureId::new(id));
            }
        }
    }

    fn reserve_id(&self, descriptor: &EntityDescriptor, id: u64) -> Result<FixtureId> {
        if !self.taken.borrow_mut().insert(id) {
            return Err(Error::invalid_argument(format!(
                "{descriptor} double id {id} is already in use"
            )));
        }
        Ok(FixtureId::new(id))
    }
}

impl Default for InMemoryDoubleFactory {
    fn default() -> Self {
        Self::from_settings(&HarnessSettings::default())
    }
}

impl DoubleFactory for InMemoryDoubleFactory {
    fn create_double(&self, descriptor: &EntityDescriptor, overrides: Attributes) -> Result<Fixture> {
        let mut attributes = overrides;
        let id = match attributes.remove(ID_ATTRIBUTE) {
            Some(value) => {
                let id = value.as_u64().ok_or_else(|| {
                    Error::invalid_argument(format!(
                        "{descriptor} double id must be a non-negative integer, got {value}"
                    ))
                })?;
                self.reserve_id(descriptor, id)?
            }
            None => self.take_id()?,
        };
        debug!(double = %descriptor, %id, "created double");
        Ok(Fixture::new(descriptor.clone(), id, attributes))
    }

    fn class_double(&self, descriptor: &EntityDescriptor) -> ClassDouble {
        self.classes
            .borrow_mut()
            .entry(descriptor.clone())
            .or_insert_with(|| ClassDouble::new(descriptor.clone()))
            .clone()
    }

    fn stub_method(&self, target: &dyn StubTarget, method: &str, matcher: ArgMatcher, reply: Reply) {
        debug!(target_double = %target.label(), method, "stubbed");
        target.stub_table().push(method, Stub::new(matcher, reply));
    }

    fn replace_stubs(&self, target: &dyn StubTarget, method: &str, stubs: Vec<Stub>) {
        debug!(
            target_double = %target.label(),
            method,
            variants = stubs.len(),
            "replaced stubs"
        );
        target.stub_table().replace(method, stubs);
    }

    fn factory_name(&self) -> &str {
        IN_MEMORY_FACTORY_NAME
    }
}
