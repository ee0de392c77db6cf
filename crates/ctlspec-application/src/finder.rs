//! Finder stub binding
//!
//! Controllers look records up in several equivalent shapes. Binding a
//! fixture makes every one of them answer that fixture:
//!
//! | Message | Arguments |
//! |---------|-----------|
//! | `find` | the fixture itself |
//! | `find` | `id` |
//! | `find` | `id`, anything |
//! | `find` | `"id"` |
//! | `find` | `"id"`, anything |
//! | `find_by_id` | `id` |
//! | `find_by_id` | `id`, anything |
//! | `find_by_id` | `"id"` |
//! | `find_by_id` | `"id"`, anything |
//!
//! Rebinding a class swaps the whole set; no shape keeps answering the
//! previous fixture.

use crate::context::ExampleContext;
use ctlspec_domain::constants::{FIND, FIND_BY_ID};
use ctlspec_domain::doubles::Stub;
use ctlspec_domain::error::Result;
use ctlspec_domain::ports::DoubleFactory;
use ctlspec_domain::{ArgMatcher, ArgPattern, EntityDescriptor, EntityRef, Fixture, Reply};
use serde_json::Value;
use tracing::debug;

/// Binds a class's finders to one fixture
pub struct FinderStubBinder<'a> {
    factory: &'a dyn DoubleFactory,
}

impl<'a> FinderStubBinder<'a> {
    /// Create a binder working through `factory`
    pub fn new(factory: &'a dyn DoubleFactory) -> Self {
        Self { factory }
    }

    /// Stubs answering `fixture` for every `find` shape
    pub fn find_variants(fixture: &Fixture) -> Vec<Stub> {
        let mut stubs = vec![Stub::new(
            ArgMatcher::Exactly(vec![ArgPattern::Same(fixture.clone())]),
            Reply::from(fixture),
        )];
        stubs.extend(Self::id_variants(fixture));
        stubs
    }

    /// Stubs answering `fixture` for every `find_by_id` shape
    pub fn find_by_id_variants(fixture: &Fixture) -> Vec<Stub> {
        Self::id_variants(fixture)
    }

    fn id_variants(fixture: &Fixture) -> Vec<Stub> {
        let id = fixture.id();
        [id.to_value(), Value::from(id.to_param())]
            .into_iter()
            .flat_map(|key| {
                [
                    ArgMatcher::Exactly(vec![ArgPattern::Eq(key.clone())]),
                    ArgMatcher::Exactly(vec![ArgPattern::Eq(key), ArgPattern::Anything]),
                ]
            })
            .map(|matcher| Stub::new(matcher, Reply::from(fixture)))
            .collect()
    }

    /// Make every finder shape of `descriptor` answer `fixture`
    pub fn bind(&self, descriptor: &EntityDescriptor, fixture: &Fixture) -> Fixture {
        let find = Self::find_variants(fixture);
        let find_by_id = Self::find_by_id_variants(fixture);
        let class = self.factory.class_double(descriptor);
        self.factory.replace_stubs(&class, FIND, find);
        self.factory.replace_stubs(&class, FIND_BY_ID, find_by_id);
        debug!(class = %descriptor, fixture = %fixture.label(), "bound finders");
        fixture.clone()
    }
}

impl ExampleContext {
    /// Make every finder shape of `model` answer `fixture`
    pub fn bind_finders<R: Into<EntityRef>>(&mut self, model: R, fixture: &Fixture) -> Result<Fixture> {
        let descriptor = self.resolve_model(model)?;
        let bound = FinderStubBinder::new(self.factory.as_ref()).bind(&descriptor, fixture);
        self.registry.mark_bound(&bound);
        Ok(bound)
    }
}
