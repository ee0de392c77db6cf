//! Fixture doubles
//!
//! A [`Fixture`] stands in for one domain entity; a [`ClassDouble`] stands in
//! for the entity's class and carries class-level stubs such as `find` and
//! `new`. Both answer messages from a [`StubTable`]: the most recently
//! installed stub whose [`ArgMatcher`] accepts the arguments wins.
//!
//! Doubles are reference-counted handles. Cloning a handle never copies the
//! double, and equality is identity.

/// Instance and class doubles
pub mod fixture;
/// Argument matching, replies and the stub table
pub mod stub;

pub use fixture::{Attributes, ClassDouble, Fixture, FixtureId};
pub use stub::{ArgMatcher, ArgPattern, CallArg, ReceivedMessage, Reply, Stub, StubTable, StubTarget};
