//! # Application Layer
//!
//! The stub-resolution and request-simulation engine. Everything hangs off
//! [`ExampleContext`], the explicit per-example state: fixture registry,
//! current action, parameters, current actor and the response of the last
//! dispatch.
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`context`] | `ExampleContext` construction and accessors |
//! | [`registry`] | Memoized per-example fixtures (`prepare_model`) |
//! | [`identity`] | Current actor and second-party actors |
//! | [`finder`] | Binding every finder call shape to one fixture |
//! | [`dispatcher`] | Verb resolution, default id injection, handler invocation |
//! | [`stubs`] | Per-action stub bundles (`stubs_for_create`, ...) |

pub mod context;
pub mod dispatcher;
pub mod finder;
pub mod identity;
pub mod registry;
pub mod stubs;

pub use context::ExampleContext;
pub use dispatcher::inject_default_id;
pub use finder::FinderStubBinder;
pub use registry::{FixtureConstructor, ModelDoubleRegistry};
