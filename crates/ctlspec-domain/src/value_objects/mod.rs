//! Domain Value Objects
//!
//! ## Value Objects
//!
//! | Value Object | Description |
//! |--------------|-------------|
//! | [`Action`] | Symbolic name of the controller action under test |
//! | [`Verb`] | HTTP verb an action is simulated with |
//! | [`EntityRef`] | Model reference as written by the test author |
//! | [`EntityDescriptor`] | Resolved model class descriptor |
//! | [`ModelCatalog`] | Known model classes of an example |
//! | [`Params`] | Request parameter set |
//! | [`Response`] | Observable state after a simulated request |
//! | [`HarnessSettings`] | Redirect targets, placeholder id and fixture ids |

/// Actions and the verb table
pub mod action;
/// Entity references and their resolution
pub mod entity;
/// Request parameters
pub mod params;
/// Post-request observables
pub mod response;
/// Harness settings
pub mod settings;

pub use action::{Action, Verb, resolve_verb};
pub use entity::{EntityDescriptor, EntityRef, ModelCatalog};
pub use params::Params;
pub use response::{Flash, Response};
pub use settings::HarnessSettings;
