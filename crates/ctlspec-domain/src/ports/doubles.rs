//! Double Factory Port
//!
//! The narrow stubbing capability the harness needs: create instance and
//! class doubles, and install stubs on them. Implementations keep explicit
//! registration tables; nothing here intercepts arbitrary method calls.

use crate::doubles::{ArgMatcher, Attributes, ClassDouble, Fixture, Reply, Stub, StubTarget};
use crate::error::Result;
use crate::value_objects::EntityDescriptor;

/// Creates doubles and stubs their messages
///
/// One factory serves exactly one example; its class doubles and id sequence
/// are discarded with the example.
pub trait DoubleFactory {
    /// Create a fresh instance double of `descriptor`
    ///
    /// An `id` entry in `overrides` fixes the double's id; otherwise the
    /// next id of the sequence is used.
    fn create_double(&self, descriptor: &EntityDescriptor, overrides: Attributes) -> Result<Fixture>;

    /// The class double of `descriptor`; the same handle on every call
    fn class_double(&self, descriptor: &EntityDescriptor) -> ClassDouble;

    /// Install a stub for `method` on `target`
    fn stub_method(&self, target: &dyn StubTarget, method: &str, matcher: ArgMatcher, reply: Reply);

    /// Replace every stub for `method` on `target` at once
    fn replace_stubs(&self, target: &dyn StubTarget, method: &str, stubs: Vec<Stub>);

    /// Factory name for logs
    fn factory_name(&self) -> &str;
}
