//! Generated assertions
//!
//! Each declaration registers exactly one example: dispatch the declared
//! action, then check one observable condition. Failures surface as
//! [`Error::AssertionFailed`]; handler errors propagate unchanged.

use crate::group::ExampleGroup;
use ctlspec_application::ExampleContext;
use ctlspec_domain::constants::PAGINATE;
use ctlspec_domain::error::{Error, Result};
use ctlspec_domain::{Action, EntityRef, Reply};
use regex::Regex;
use serde_json::Value;
use std::fmt;

/// Fail with `message` unless `condition` holds
pub fn check<F>(condition: bool, message: F) -> Result<()>
where
    F: FnOnce() -> String,
{
    if condition {
        Ok(())
    } else {
        Err(Error::assertion_failed(message()))
    }
}

/// Observable collection a pattern assertion reads from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collection {
    /// Flash carried to the next request
    Flash,
    /// Flash for the current request only
    FlashNow,
    /// Session entries
    Session,
    /// Request parameters as the handler saw them
    Params,
}

impl Collection {
    /// Whether reading this collection needs the flash sweep stubbed
    pub fn needs_stubbed_sweep(self) -> bool {
        matches!(self, Self::Flash | Self::FlashNow)
    }

    fn lookup(self, ctx: &ExampleContext, key: &str) -> Option<String> {
        let response = ctx.response();
        match self {
            Self::Flash => response.flash.get(key).map(str::to_string),
            Self::FlashNow => response.flash.get_now(key).map(str::to_string),
            Self::Session => response.session.get(key).map(render),
            Self::Params => response.params.get(key).map(render),
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Flash => "flash",
            Self::FlashNow => "flash_now",
            Self::Session => "session",
            Self::Params => "params",
        })
    }
}

fn render(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

/// Where a redirect assertion expects the handler to go
#[derive(Debug, Clone, PartialEq, Eq)]
enum RedirectTarget {
    Path(String),
    Login,
    AdminDenied,
}

impl RedirectTarget {
    fn resolve(&self, ctx: &ExampleContext) -> String {
        match self {
            Self::Path(path) => path.clone(),
            Self::Login => ctx.settings().login_path.clone(),
            Self::AdminDenied => ctx.settings().admin_redirect_path.clone(),
        }
    }

    fn describe(&self) -> String {
        match self {
            Self::Path(path) => path.clone(),
            Self::Login => "the login path".to_string(),
            Self::AdminDenied => "the admin redirect path".to_string(),
        }
    }
}

fn assigned(ctx: &ExampleContext, name: &str) -> Result<Reply> {
    ctx.response()
        .assigned(name)
        .cloned()
        .ok_or_else(|| Error::assertion_failed(format!("expected @{name} to be assigned")))
}

impl ExampleGroup {
    fn redirect_example(&mut self, target: RedirectTarget) -> &mut Self {
        let description = format!("redirects to {}", target.describe());
        self.it(description, move |ctx, handler| {
            ctx.dispatch(handler)?;
            let expected = target.resolve(ctx);
            let actual = ctx.response().redirect_target();
            check(actual == Some(expected.as_str()), || {
                format!("expected redirect to {expected}, got {actual:?}")
            })
        })
    }

    /// The handler redirects to `target`
    pub fn assert_redirects_to<S: Into<String>>(&mut self, target: S) -> &mut Self {
        self.redirect_example(RedirectTarget::Path(target.into()))
    }

    /// The assigned instance of `model` carries validation errors
    pub fn assert_sets_errors_on<R: Into<EntityRef>>(&mut self, model: R) -> &mut Self {
        self.errors_example(model.into(), true)
    }

    /// The assigned instance of `model` carries no validation errors
    pub fn assert_not_sets_errors_on<R: Into<EntityRef>>(&mut self, model: R) -> &mut Self {
        self.errors_example(model.into(), false)
    }

    fn errors_example(&mut self, model: EntityRef, expect_errors: bool) -> &mut Self {
        let description = if expect_errors {
            format!("sets errors on {}", model.as_written())
        } else {
            format!("does not set errors on {}", model.as_written())
        };
        self.it(description, move |ctx, handler| {
            let key = ctx.resolve_model(model.clone())?.key();
            ctx.dispatch(handler)?;
            let reply = assigned(ctx, &key)?;
            let fixture = reply.as_fixture().ok_or_else(|| {
                Error::assertion_failed(format!("expected @{key} to be a model, got {reply:?}"))
            })?;
            let errors = fixture.errors();
            check(errors.is_empty() != expect_errors, || {
                if expect_errors {
                    format!("expected errors on @{key}, found none")
                } else {
                    format!("expected no errors on @{key}, found {errors:?}")
                }
            })
        })
    }

    /// `collection[key]` matches `pattern` after dispatch
    ///
    /// For the flash collections the sweep is stubbed before dispatch, so
    /// `now` entries survive for inspection. An invalid pattern fails here,
    /// while the group is built.
    pub fn assert_matches(&mut self, collection: Collection, key: &str, pattern: &str) -> Result<&mut Self> {
        let regex = Regex::new(pattern)
            .map_err(|err| Error::invalid_argument(format!("invalid pattern /{pattern}/: {err}")))?;
        let key = key.to_string();
        let description = format!("{collection}[:{key}] should match /{pattern}/");
        Ok(self.it(description, move |ctx, handler| {
            if collection.needs_stubbed_sweep() {
                ctx.response_mut().flash.stub_sweep();
            }
            ctx.dispatch(handler)?;
            let value = collection.lookup(ctx, &key);
            check(value.as_deref().is_some_and(|text| regex.is_match(text)), || {
                format!("expected {collection}[:{key}] to match /{regex}/, got {value:?}")
            })
        }))
    }

    /// Dispatch fails with a handler error of type `E`
    pub fn assert_raises<E>(&mut self) -> &mut Self
    where
        E: std::error::Error + 'static,
    {
        let kind = short_type_name::<E>();
        self.it(format!("raises {kind}"), move |ctx, handler| match ctx.dispatch(handler) {
            Ok(()) => Err(Error::assertion_failed(format!("expected {kind} to be raised"))),
            Err(err) if err.is_handler_error::<E>() => Ok(()),
            Err(err) => Err(Error::assertion_failed(format!(
                "expected {kind} to be raised, got: {err}"
            ))),
        })
    }

    /// The handler assigns `name`
    pub fn assert_assigns(&mut self, name: &str) -> &mut Self {
        let name = name.to_string();
        self.it(format!("assigns @{name}"), move |ctx, handler| {
            ctx.dispatch(handler)?;
            let reply = assigned(ctx, &name)?;
            check(reply.is_truthy(), || format!("expected @{name} to be present, got {reply:?}"))
        })
    }

    /// The handler paginates `model` and assigns the page as `name`
    pub fn assert_paginates_and_assigns<R: Into<EntityRef>>(&mut self, model: R, name: &str) -> &mut Self {
        let model = model.into();
        let name = name.to_string();
        self.it(format!("paginates {} into @{name}", model.as_written()), move |ctx, handler| {
            let class = ctx.model_class(model.clone())?;
            ctx.dispatch(handler)?;
            check(class.received_count(PAGINATE) > 0, || {
                format!("expected {} to receive :{PAGINATE}", class.descriptor())
            })?;
            let reply = assigned(ctx, &name)?;
            check(reply.as_collection().is_some(), || {
                format!("expected @{name} to be a page of records, got {reply:?}")
            })
        })
    }

    /// For `action`, the handler redirects to `target`
    pub fn assert_redirects_action_to<A, S>(&mut self, action: A, target: S) -> Result<&mut Self>
    where
        A: Into<Action>,
        S: Into<String>,
    {
        let target = target.into();
        self.describe_action(action, move |group| {
            group.assert_redirects_to(target);
            Ok(())
        })
    }

    /// Without an actor, `action` redirects to the login path
    pub fn require_actor_for<A: Into<Action>>(&mut self, action: A) -> Result<&mut Self> {
        self.describe_action(action, |group| {
            group.redirect_example(RedirectTarget::Login);
            Ok(())
        })
    }

    /// Without an administrator, `action` redirects to the admin redirect path
    pub fn require_administrator_for<A: Into<Action>>(&mut self, action: A) -> Result<&mut Self> {
        self.describe_action(action, |group| {
            group.redirect_example(RedirectTarget::AdminDenied);
            Ok(())
        })
    }
}

fn short_type_name<E>() -> &'static str {
    let full = std::any::type_name::<E>();
    let base = full.split('<').next().unwrap_or(full);
    base.rsplit("::").next().unwrap_or(base)
}

