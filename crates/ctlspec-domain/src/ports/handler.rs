//! Handler Under Test Port
//!
//! The controller action the harness exercises. It is invoked once per
//! dispatch with the resolved verb, the action and the assembled parameters,
//! and leaves its observable effects in the [`RequestScope`].

use crate::doubles::{ClassDouble, Fixture, Reply};
use crate::error::{HandlerError, Result};
use crate::ports::DoubleFactory;
use crate::value_objects::{Action, EntityRef, Flash, ModelCatalog, Params, Response, Verb};
use serde_json::Value;

/// Outcome of one handler invocation
pub type HandlerResult = std::result::Result<(), HandlerError>;

/// The controller action under test
pub trait ActionHandler {
    /// Handle one simulated request
    fn handle(
        &mut self,
        verb: Verb,
        action: &Action,
        params: &Params,
        scope: &mut RequestScope<'_>,
    ) -> HandlerResult;
}

impl<F> ActionHandler for F
where
    F: FnMut(Verb, &Action, &Params, &mut RequestScope<'_>) -> HandlerResult,
{
    fn handle(
        &mut self,
        verb: Verb,
        action: &Action,
        params: &Params,
        scope: &mut RequestScope<'_>,
    ) -> HandlerResult {
        self(verb, action, params, scope)
    }
}

/// What a handler can reach while it runs
///
/// Models resolve to the example's class doubles, so every finder the
/// example bound answers here. Everything the handler assigns, flashes or
/// redirects to lands in the example's [`Response`].
pub struct RequestScope<'a> {
    factory: &'a dyn DoubleFactory,
    catalog: &'a ModelCatalog,
    current_actor: Option<&'a Fixture>,
    response: &'a mut Response,
}

impl<'a> RequestScope<'a> {
    /// Build the scope of one request
    pub fn new(
        factory: &'a dyn DoubleFactory,
        catalog: &'a ModelCatalog,
        current_actor: Option<&'a Fixture>,
        response: &'a mut Response,
    ) -> Self {
        Self {
            factory,
            catalog,
            current_actor,
            response,
        }
    }

    /// Class double of a model
    pub fn model<R: Into<EntityRef>>(&self, model: R) -> Result<ClassDouble> {
        let descriptor = self.catalog.resolve(&model.into())?;
        Ok(self.factory.class_double(&descriptor))
    }

    /// The signed-in actor, if any
    pub fn current_actor(&self) -> Option<&Fixture> {
        self.current_actor
    }

    /// Assign an instance variable for the view
    pub fn assign<S: Into<String>, R: Into<Reply>>(&mut self, name: S, value: R) {
        self.response.assigns.insert(name.into(), value.into());
    }

    /// Flash messages
    pub fn flash(&mut self) -> &mut Flash {
        &mut self.response.flash
    }

    /// Store a session entry
    pub fn set_session<S: Into<String>, V: Into<Value>>(&mut self, key: S, value: V) {
        self.response.session.insert(key.into(), value.into());
    }

    /// Redirect to `target`
    pub fn redirect_to<S: Into<String>>(&mut self, target: S) {
        self.response.redirect = Some(target.into());
    }

    /// Everything recorded so far
    pub fn response(&self) -> &Response {
        self.response
    }
}
