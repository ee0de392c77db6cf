//! # ctlspec domain
//!
//! Core types for the controller-spec harness: the action/verb table, entity
//! references, fixture doubles with their stub tables, request parameters and
//! the observable response of a simulated request.
//!
//! The domain owns the port traits the harness consumes ([`ports::DoubleFactory`]
//! and [`ports::ActionHandler`]); concrete implementations live in the
//! infrastructure crate or in the tests that use the harness.

/// Harness-wide constants
pub mod constants;
/// Fixture doubles, class doubles and stub tables
pub mod doubles;
/// Error handling types
pub mod error;
/// Port traits consumed by the harness
pub mod ports;
/// Value objects
pub mod value_objects;

pub use doubles::{ArgMatcher, ArgPattern, Attributes, CallArg, ClassDouble, Fixture, FixtureId, Reply};
pub use error::{Error, HandlerError, Result};
pub use ports::{ActionHandler, DoubleFactory, HandlerResult, RequestScope};
pub use value_objects::{
    Action, EntityDescriptor, EntityRef, Flash, HarnessSettings, ModelCatalog, Params, Response,
    Verb, resolve_verb,
};
