//! Per-example harness state

use crate::registry::{FixtureConstructor, ModelDoubleRegistry};
use ctlspec_domain::error::Result;
use ctlspec_domain::ports::DoubleFactory;
use ctlspec_domain::{
    Action, Attributes, ClassDouble, EntityDescriptor, EntityRef, Fixture, HarnessSettings,
    ModelCatalog, Params, Response,
};
use serde_json::Value;
use std::collections::HashMap;
use std::rc::Rc;
use tracing::debug;

/// Everything one example owns
///
/// Built fresh before an example's hooks run and dropped after its body;
/// nothing in here is ever shared with another example.
pub struct ExampleContext {
    pub(crate) settings: HarnessSettings,
    pub(crate) factory: Box<dyn DoubleFactory>,
    pub(crate) catalog: ModelCatalog,
    pub(crate) constructors: HashMap<String, FixtureConstructor>,
    pub(crate) registry: ModelDoubleRegistry,
    pub(crate) action: Option<Action>,
    pub(crate) params: Params,
    pub(crate) current_actor: Option<Fixture>,
    pub(crate) response: Response,
    pub(crate) dispatches: usize,
}

impl ExampleContext {
    /// Create the context of one example
    pub fn new(settings: HarnessSettings, factory: Box<dyn DoubleFactory>) -> Self {
        debug!(factory = factory.factory_name(), "example context created");
        Self {
            settings,
            factory,
            catalog: ModelCatalog::new(),
            constructors: HashMap::new(),
            registry: ModelDoubleRegistry::new(),
            action: None,
            params: Params::new(),
            current_actor: None,
            response: Response::default(),
            dispatches: 0,
        }
    }

    /// Harness settings
    pub fn settings(&self) -> &HarnessSettings {
        &self.settings
    }

    /// The example's double factory
    pub fn factory(&self) -> &dyn DoubleFactory {
        self.factory.as_ref()
    }

    /// Make a model class known to this example
    pub fn register_model(&mut self, name: &str) -> Result<EntityDescriptor> {
        self.catalog.register(name)
    }

    /// Known model classes
    pub fn catalog(&self) -> &ModelCatalog {
        &self.catalog
    }

    /// Resolve a model reference against the known classes
    pub fn resolve_model<R: Into<EntityRef>>(&self, model: R) -> Result<EntityDescriptor> {
        self.catalog.resolve(&model.into())
    }

    /// Install the custom constructor `prepare_model` uses for `model`
    ///
    /// `"Widget"`, `"widget"` and `"line_item"` / `"LineItem"` name the same
    /// registry keys as the model references they correspond to.
    pub fn define_fixture(&mut self, model: &str, constructor: FixtureConstructor) {
        let key = EntityDescriptor::new(model).key();
        self.constructors.insert(key, constructor);
    }

    /// Fresh instance double of a model, never memoized
    pub fn stub_model<R: Into<EntityRef>>(&self, model: R, overrides: Attributes) -> Result<Fixture> {
        let descriptor = self.resolve_model(model)?;
        self.factory.create_double(&descriptor, overrides)
    }

    /// Class double of a model
    pub fn model_class<R: Into<EntityRef>>(&self, model: R) -> Result<ClassDouble> {
        let descriptor = self.resolve_model(model)?;
        Ok(self.factory.class_double(&descriptor))
    }

    /// Declare the action under test
    pub fn set_action<A: Into<Action>>(&mut self, action: A) {
        self.action = Some(action.into());
    }

    /// The declared action, if any
    pub fn action(&self) -> Option<&Action> {
        self.action.as_ref()
    }

    /// Request parameters assembled so far
    pub fn params(&self) -> &Params {
        &self.params
    }

    /// Mutable request parameters
    pub fn params_mut(&mut self) -> &mut Params {
        &mut self.params
    }

    /// Merge `extra` into the request parameters
    pub fn add_params(&mut self, extra: &Params) {
        self.params.merge(extra);
    }

    /// Set one request parameter
    pub fn set_param<K: Into<String>, V: Into<Value>>(&mut self, key: K, value: V) {
        self.params.insert(key, value);
    }

    /// The signed-in actor, if established
    pub fn current_actor(&self) -> Option<&Fixture> {
        self.current_actor.as_ref()
    }

    /// Observable state of the last dispatch
    pub fn response(&self) -> &Response {
        &self.response
    }

    /// Mutable response, e.g. to stub the flash sweep before dispatch
    pub fn response_mut(&mut self) -> &mut Response {
        &mut self.response
    }

    /// How many times the handler was invoked in this example
    pub fn dispatch_count(&self) -> usize {
        self.dispatches
    }

    /// Shorthand for building a constructor from a closure
    pub fn constructor<F>(f: F) -> FixtureConstructor
    where
        F: Fn(&mut ExampleContext) -> Result<Fixture> + 'static,
    {
        Rc::new(f)
    }
}
