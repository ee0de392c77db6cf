//! # ctlspec
//!
//! Declarative tests for request handlers. Example groups declare the
//! action under test, the fixtures it needs and the outcome it must produce;
//! the runner turns every declaration into setup hooks and examples and runs
//! them against fresh per-example state.
//!
//! ## Example
//!
//! ```
//! use ctlspec::{Action, CallArg, ExampleGroup, ExampleRunner, HandlerResult, Params, RequestScope, Verb};
//!
//! fn show(_: Verb, _: &Action, params: &Params, scope: &mut RequestScope<'_>) -> HandlerResult {
//!     let id = params.get("id").cloned().unwrap_or_default();
//!     let widget = scope.model("Widget")?.call("find", &[CallArg::from(id)])?;
//!     scope.assign("widget", widget);
//!     Ok(())
//! }
//!
//! let mut group = ExampleGroup::new("WidgetsController");
//! group.models(&["Widget"]);
//! group
//!     .describe_action("show", |show| {
//!         show.stubs_for_show("widget").assert_assigns("widget");
//!         Ok(())
//!     })
//!     .unwrap();
//!
//! assert!(ExampleRunner::default().run(&group, || show).all_passed());
//! ```
//!
//! ## Architecture
//!
//! - `domain` - errors, value objects, doubles and port traits
//! - `application` - `ExampleContext` and the stub-resolution engine
//! - `infrastructure` - configuration, logging and the in-memory double factory
//! - [`group`], [`assertions`], [`runner`] - the declarative layer

/// Generated assertions
pub mod assertions;
/// Example groups and setup hooks
pub mod group;
/// In-process example runner
pub mod runner;

/// Domain layer - errors, value objects, doubles and port traits
///
/// Re-exports from the domain crate for convenience
pub mod domain {
    pub use ctlspec_domain::*;
}

/// Application layer - per-example state and the stub engine
///
/// Re-exports from the application crate for convenience
pub mod application {
    pub use ctlspec_application::*;
}

/// Infrastructure layer - configuration, logging and doubles
///
/// Re-exports from the infrastructure crate for convenience
pub mod infrastructure {
    pub use ctlspec_infrastructure::*;
}

// Re-export commonly used domain types at the crate root
pub use domain::*;

pub use application::ExampleContext;
pub use assertions::{Collection, check};
pub use group::{Example, ExampleBody, ExampleGroup, Hook};
pub use infrastructure::{ConfigLoader, HarnessConfig, InMemoryDoubleFactory};
pub use runner::{ExampleOutcome, ExampleRunner, RunReport};
