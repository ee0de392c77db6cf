//! Domain Port Interfaces
//!
//! Contracts between the harness and its collaborators:
//!
//! - **doubles** - creating doubles and installing stubs on them
//! - **handler** - the controller action under test and the scope it runs in

/// Double creation and stubbing
pub mod doubles;
/// Handler under test
pub mod handler;

pub use doubles::DoubleFactory;
pub use handler::{ActionHandler, HandlerResult, RequestScope};
