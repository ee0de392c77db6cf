//! Example groups and setup hooks
//!
//! An [`ExampleGroup`] is built once, declaratively, and run many times:
//! every declaration appends a hook or an example instead of doing any work.
//! Nested groups inherit their ancestors' hooks; the runner executes them
//! outermost first, in registration order, before each example body.

use ctlspec_application::ExampleContext;
use ctlspec_domain::error::Result;
use ctlspec_domain::{Action, ActionHandler, Attributes, EntityRef, Fixture, Params, resolve_verb};
use std::rc::Rc;
use tracing::trace;

/// Setup step run against a fresh context before each example
pub type Hook = Rc<dyn Fn(&mut ExampleContext) -> Result<()>>;

/// Body of one example
pub type ExampleBody = Rc<dyn Fn(&mut ExampleContext, &mut dyn ActionHandler) -> Result<()>>;

/// One registered example
#[derive(Clone)]
pub struct Example {
    pub(crate) description: String,
    pub(crate) body: ExampleBody,
}

impl Example {
    /// The example's own description, without its group's
    pub fn description(&self) -> &str {
        &self.description
    }
}

/// A described group of examples sharing setup hooks
#[derive(Clone)]
pub struct ExampleGroup {
    pub(crate) description: String,
    pub(crate) hooks: Vec<Hook>,
    pub(crate) examples: Vec<Example>,
    pub(crate) children: Vec<ExampleGroup>,
}

impl ExampleGroup {
    /// Create an empty group
    pub fn new<S: Into<String>>(description: S) -> Self {
        Self {
            description: description.into(),
            hooks: Vec::new(),
            examples: Vec::new(),
            children: Vec::new(),
        }
    }

    /// The group's own description
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Examples declared directly in this group
    pub fn examples(&self) -> &[Example] {
        &self.examples
    }

    /// Nested groups
    pub fn children(&self) -> &[ExampleGroup] {
        &self.children
    }

    /// Number of examples in this group and all nested groups
    pub fn example_count(&self) -> usize {
        self.examples.len() + self.children.iter().map(Self::example_count).sum::<usize>()
    }

    /// Register a setup hook
    pub fn before<F>(&mut self, hook: F) -> &mut Self
    where
        F: Fn(&mut ExampleContext) -> Result<()> + 'static,
    {
        self.hooks.push(Rc::new(hook));
        self
    }

    /// Register an example
    pub fn it<S, F>(&mut self, description: S, body: F) -> &mut Self
    where
        S: Into<String>,
        F: Fn(&mut ExampleContext, &mut dyn ActionHandler) -> Result<()> + 'static,
    {
        let description = description.into();
        trace!(group = %self.description, example = %description, "example registered");
        self.examples.push(Example {
            description,
            body: Rc::new(body),
        });
        self
    }

    /// Nest a group; it inherits every hook registered here
    pub fn describe<S, F>(&mut self, description: S, build: F) -> Result<&mut Self>
    where
        S: Into<String>,
        F: FnOnce(&mut ExampleGroup) -> Result<()>,
    {
        let mut child = ExampleGroup::new(description);
        build(&mut child)?;
        self.children.push(child);
        Ok(self)
    }

    /// Nest a group named after the action's verb, e.g. `GET show`
    ///
    /// Every example in the nested group runs with `action` declared. An
    /// action outside the verb table fails here, while the group is built.
    pub fn describe_action<A, F>(&mut self, action: A, build: F) -> Result<&mut Self>
    where
        A: Into<Action>,
        F: FnOnce(&mut ExampleGroup) -> Result<()>,
    {
        let action = action.into();
        let verb = resolve_verb(&action)?;
        self.describe(format!("{verb} {action}"), |group| {
            group.set_action(action);
            build(group)
        })
    }

    /// Make model classes known to every example
    pub fn models(&mut self, names: &[&str]) -> &mut Self {
        let names: Vec<String> = names.iter().map(|name| (*name).to_string()).collect();
        self.before(move |ctx| {
            for name in &names {
                ctx.register_model(name)?;
            }
            Ok(())
        })
    }

    /// Install a custom fixture constructor for `model`
    pub fn define_fixture<F>(&mut self, model: &str, constructor: F) -> &mut Self
    where
        F: Fn(&mut ExampleContext) -> Result<Fixture> + 'static,
    {
        let model = model.to_string();
        let constructor = ExampleContext::constructor(constructor);
        self.before(move |ctx| {
            ctx.define_fixture(&model, Rc::clone(&constructor));
            Ok(())
        })
    }

    /// Declare the action for every example
    pub fn set_action<A: Into<Action>>(&mut self, action: A) -> &mut Self {
        let action = action.into();
        self.before(move |ctx| {
            ctx.set_action(action.clone());
            Ok(())
        })
    }

    /// Merge `extra` into the request parameters of every example
    pub fn add_params(&mut self, extra: Params) -> &mut Self {
        self.before(move |ctx| {
            ctx.add_params(&extra);
            Ok(())
        })
    }

    /// Prepare the model's fixture before every example
    pub fn prepare_model<R: Into<EntityRef>>(&mut self, model: R) -> &mut Self {
        let model = model.into();
        self.before(move |ctx| ctx.prepare_model(model.clone()).map(drop))
    }

    /// Sign an actor in before every example
    pub fn stub_current_user(&mut self, overrides: Attributes) -> &mut Self {
        self.before(move |ctx| ctx.establish_identity(overrides.clone()).map(drop))
    }

    /// Sign an actor in and pass its id as `param` (default `user_id`)
    pub fn with_current_user(&mut self, overrides: Attributes, param: Option<&str>) -> &mut Self {
        let param = param.map(str::to_string);
        self.before(move |ctx| {
            ctx.with_current_user(overrides.clone(), param.as_deref())
                .map(drop)
        })
    }

    /// Sign an actor in and pass a different actor's id as `param`
    pub fn with_other_user(&mut self, overrides: Attributes, param: Option<&str>) -> &mut Self {
        let param = param.map(str::to_string);
        self.before(move |ctx| {
            ctx.with_other_user(overrides.clone(), param.as_deref())
                .map(drop)
        })
    }

    /// `Model.new` answers the model's fixture
    pub fn stubs_for_new<R: Into<EntityRef>>(&mut self, model: R) -> &mut Self {
        let model = model.into();
        self.before(move |ctx| ctx.stubs_for_new(model.clone()).map(drop))
    }

    /// `Model.new` answers the fixture and `save` answers `valid`
    pub fn stubs_for_create<R: Into<EntityRef>>(&mut self, model: R, valid: bool) -> &mut Self {
        let model = model.into();
        self.before(move |ctx| ctx.stubs_for_create(model.clone(), valid).map(drop))
    }

    /// Finders answer the fixture; its id becomes the `id` parameter
    pub fn stubs_for_show<R: Into<EntityRef>>(&mut self, model: R) -> &mut Self {
        let model = model.into();
        self.before(move |ctx| ctx.stubs_for_show(model.clone()).map(drop))
    }

    /// Same as [`Self::stubs_for_show`]
    pub fn stubs_for_edit<R: Into<EntityRef>>(&mut self, model: R) -> &mut Self {
        self.stubs_for_show(model)
    }

    /// Show stubs plus `update_attributes` answering `valid`
    pub fn stubs_for_update<R: Into<EntityRef>>(&mut self, model: R, valid: bool) -> &mut Self {
        let model = model.into();
        self.before(move |ctx| ctx.stubs_for_update(model.clone(), valid).map(drop))
    }

    /// Show stubs plus `destroy` answering `valid`
    pub fn stubs_for_destroy<R: Into<EntityRef>>(&mut self, model: R, valid: bool) -> &mut Self {
        let model = model.into();
        self.before(move |ctx| ctx.stubs_for_destroy(model.clone(), valid).map(drop))
    }

    /// `Model.paginate` and `Model.all` answer a page holding the fixture
    pub fn stubs_for_index<R: Into<EntityRef>>(&mut self, model: R) -> &mut Self {
        let model = model.into();
        self.before(move |ctx| ctx.stubs_for_index(model.clone()).map(drop))
    }
}

/// Build [`Params`] from `key => value` pairs
///
/// ```
/// let params = ctlspec::params! { "page" => 2, "q" => "bolts" };
/// assert_eq!(params.len(), 2);
/// ```
#[macro_export]
macro_rules! params {
    () => {
        $crate::Params::new()
    };
    ( $( $key:expr => $value:expr ),+ $(,)? ) => {
        $crate::Params::new() $( .with($key, $value) )+
    };
}
