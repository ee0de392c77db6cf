//! Request dispatch
//!
//! Resolves the verb of the declared action, fills in the default id of
//! member actions and hands the request to the handler under test. The
//! handler's own errors come back wrapped in [`Error::Handler`] and are
//! otherwise untouched.

use crate::context::ExampleContext;
use ctlspec_domain::constants::ID_PARAM;
use ctlspec_domain::error::{Error, Result};
use ctlspec_domain::ports::{ActionHandler, RequestScope};
use ctlspec_domain::{Action, Fixture, Params, resolve_verb};
use serde_json::Value;
use tracing::{debug, info, warn};

/// Give a member action an `id` parameter if it has none
///
/// The relevant fixture's id wins; without one the placeholder is used.
/// Dispatch passes the most recently prepared fixture whose finders are
/// bound, falling back to the most recently prepared fixture.
/// Returns the injected value, or `None` when nothing was injected.
pub fn inject_default_id(
    action: &Action,
    params: &mut Params,
    relevant: Option<&Fixture>,
    placeholder: &str,
) -> Option<Value> {
    if !action.is_member() || params.contains(ID_PARAM) {
        return None;
    }
    let id = relevant.map_or_else(|| Value::from(placeholder), |fixture| fixture.id().to_value());
    params.insert(ID_PARAM, id.clone());
    Some(id)
}

impl ExampleContext {
    /// Simulate the request for the declared action
    ///
    /// Fails with [`Error::NoActionSet`] before any action is declared and
    /// with [`Error::UnknownAction`] for actions outside the verb table.
    /// Dispatching twice in one example is allowed but logged, since the
    /// handler's side effects run again.
    pub fn dispatch(&mut self, handler: &mut dyn ActionHandler) -> Result<()> {
        let action = self.action.clone().ok_or(Error::NoActionSet)?;
        let verb = resolve_verb(&action)?;

        if let Some(id) = inject_default_id(
            &action,
            &mut self.params,
            self.registry.relevant(),
            &self.settings.placeholder_id,
        ) {
            debug!(action = %action, id = %id, "injected default id");
        }

        self.dispatches += 1;
        if self.dispatches > 1 {
            warn!(action = %action, count = self.dispatches, "request dispatched again in the same example");
        }
        info!(verb = %verb, action = %action, params = self.params.len(), "dispatching request");

        let params = self.params.clone();
        self.response.begin_request(params.clone());
        let outcome = {
            let mut scope = RequestScope::new(
                self.factory.as_ref(),
                &self.catalog,
                self.current_actor.as_ref(),
                &mut self.response,
            );
            handler.handle(verb, &action, &params, &mut scope)
        };
        self.response.flash.sweep();
        outcome.map_err(Error::handler)
    }
}
