//! Current actor and second-party actors
//!
//! The current actor is established at most once per example; repeated
//! establishment returns the recorded actor untouched. Other actors are
//! always fresh doubles with their own ids.

use crate::context::ExampleContext;
use ctlspec_domain::constants::{PERISHABLE_TOKEN, PERSISTENCE_TOKEN, SAVE};
use ctlspec_domain::error::{Error, Result};
use ctlspec_domain::{Attributes, EntityDescriptor, Fixture};
use tracing::{debug, info};

impl ExampleContext {
    /// Descriptor of the actor model named in the settings
    pub fn actor_descriptor(&mut self) -> Result<EntityDescriptor> {
        let actor_model = self.settings.actor_model.clone();
        self.catalog.register(&actor_model)
    }

    /// Fresh actor double: persistable, with missing tokens reset
    ///
    /// `overrides` are laid over the `save = true` default. For each of the
    /// persistence and perishable tokens the double lacks, its reset hook
    /// runs exactly once.
    pub fn stub_user(&mut self, overrides: Attributes) -> Result<Fixture> {
        let descriptor = self.actor_descriptor()?;
        let attributes = Attributes::new().with(SAVE, true).merged(overrides);
        let actor = self.factory.create_double(&descriptor, attributes)?;
        for token in [PERSISTENCE_TOKEN, PERISHABLE_TOKEN] {
            if !actor.has_attribute(token) {
                actor.reset_token(token);
            }
        }
        Ok(actor)
    }

    /// Sign an actor in for this example, once
    ///
    /// The first call creates the actor, binds the actor model's finders to
    /// it and records it as the current actor. Later calls return that
    /// actor and change nothing.
    pub fn establish_identity(&mut self, overrides: Attributes) -> Result<Fixture> {
        if let Some(actor) = &self.current_actor {
            debug!(actor = %actor.label(), "identity already established");
            return Ok(actor.clone());
        }
        let descriptor = self.actor_descriptor()?;
        let actor = self.stub_user(overrides)?;
        self.bind_finders(&descriptor, &actor)?;
        self.current_actor = Some(actor.clone());
        info!(actor = %actor.label(), "identity established");
        Ok(actor)
    }

    /// A second party, distinct from the current actor
    ///
    /// Always a new double; its finders are bound so the handler can look
    /// it up. It is never recorded as the current actor.
    pub fn establish_other_actor(&mut self, overrides: Attributes) -> Result<Fixture> {
        let descriptor = self.actor_descriptor()?;
        let other = self.stub_user(overrides)?;
        if let Some(current) = &self.current_actor {
            if current.id() == other.id() {
                return Err(Error::invalid_argument(format!(
                    "other actor must not share id {} with the current actor",
                    current.id()
                )));
            }
        }
        self.bind_finders(&descriptor, &other)?;
        debug!(actor = %other.label(), "other actor established");
        Ok(other)
    }

    /// Establish identity and pass the actor's id as `param`
    ///
    /// `param` defaults to the configured actor parameter (`user_id`). The
    /// actor is also stored under the actor model's registry key.
    pub fn with_current_user(&mut self, overrides: Attributes, param: Option<&str>) -> Result<Fixture> {
        let descriptor = self.actor_descriptor()?;
        let actor = self.establish_identity(overrides)?;
        self.bind_finders(&descriptor, &actor)?;
        self.publish_actor(&descriptor, &actor, param);
        Ok(actor)
    }

    /// Establish identity, then pass a different actor's id as `param`
    ///
    /// `overrides` apply to the current actor; the other actor is a plain
    /// actor double.
    pub fn with_other_user(&mut self, overrides: Attributes, param: Option<&str>) -> Result<Fixture> {
        let descriptor = self.actor_descriptor()?;
        self.establish_identity(overrides)?;
        let other = self.establish_other_actor(Attributes::new())?;
        self.publish_actor(&descriptor, &other, param);
        Ok(other)
    }

    fn publish_actor(&mut self, descriptor: &EntityDescriptor, actor: &Fixture, param: Option<&str>) {
        let param = param.map_or_else(|| self.settings.actor_param.clone(), str::to_string);
        self.params.insert(param, actor.id().to_value());
        self.registry.assign(descriptor.key(), actor.clone());
    }
}
