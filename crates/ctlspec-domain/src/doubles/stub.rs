//! Argument matching, replies and the stub table

use crate::doubles::Fixture;
use crate::error::{Error, Result};
use serde_json::Value;
use std::cell::RefCell;
use std::collections::BTreeMap;
use tracing::trace;

/// One argument of a message sent to a double
#[derive(Debug, Clone, PartialEq)]
pub enum CallArg {
    /// Plain value (ids, strings, option maps)
    Value(Value),
    /// Another double, compared by identity
    Fixture(Fixture),
}

impl CallArg {
    fn render(&self) -> String {
        match self {
            Self::Value(value) => value.to_string(),
            Self::Fixture(fixture) => fixture.label(),
        }
    }
}

impl From<Value> for CallArg {
    fn from(value: Value) -> Self {
        Self::Value(value)
    }
}

impl From<u64> for CallArg {
    fn from(value: u64) -> Self {
        Self::Value(Value::from(value))
    }
}

impl From<&str> for CallArg {
    fn from(value: &str) -> Self {
        Self::Value(Value::from(value))
    }
}

impl From<String> for CallArg {
    fn from(value: String) -> Self {
        Self::Value(Value::from(value))
    }
}

impl From<Fixture> for CallArg {
    fn from(fixture: Fixture) -> Self {
        Self::Fixture(fixture)
    }
}

impl From<&Fixture> for CallArg {
    fn from(fixture: &Fixture) -> Self {
        Self::Fixture(fixture.clone())
    }
}

/// Expectation on a single argument
#[derive(Debug, Clone, PartialEq)]
pub enum ArgPattern {
    /// Equal plain value; `42` and `"42"` are different values
    Eq(Value),
    /// The very same double
    Same(Fixture),
    /// Any single argument
    Anything,
}

impl ArgPattern {
    /// Whether `arg` satisfies this pattern
    pub fn matches(&self, arg: &CallArg) -> bool {
        match (self, arg) {
            (Self::Anything, _) => true,
            (Self::Eq(expected), CallArg::Value(actual)) => expected == actual,
            (Self::Same(expected), CallArg::Fixture(actual)) => expected.ptr_eq(actual),
            _ => false,
        }
    }
}

/// Expectation on a whole argument list
#[derive(Debug, Clone, PartialEq)]
pub enum ArgMatcher {
    /// Any arguments at all
    Any,
    /// Exactly these arguments, position by position
    Exactly(Vec<ArgPattern>),
}

impl ArgMatcher {
    /// Matcher for a message sent without arguments
    pub fn no_args() -> Self {
        Self::Exactly(Vec::new())
    }

    /// Whether `args` satisfies this matcher
    pub fn matches(&self, args: &[CallArg]) -> bool {
        match self {
            Self::Any => true,
            Self::Exactly(patterns) => {
                patterns.len() == args.len()
                    && patterns.iter().zip(args).all(|(pattern, arg)| pattern.matches(arg))
            }
        }
    }
}

/// What a stubbed message answers
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Reply {
    /// Nothing
    #[default]
    Nil,
    /// Plain value
    Value(Value),
    /// A double
    Fixture(Fixture),
    /// Several doubles, e.g. a page of records
    Collection(Vec<Fixture>),
}

impl Reply {
    /// The double, if this reply is one
    pub fn as_fixture(&self) -> Option<&Fixture> {
        match self {
            Self::Fixture(fixture) => Some(fixture),
            _ => None,
        }
    }

    /// The doubles, if this reply is a collection
    pub fn as_collection(&self) -> Option<&[Fixture]> {
        match self {
            Self::Collection(fixtures) => Some(fixtures),
            _ => None,
        }
    }

    /// The plain value, if this reply is one
    pub fn as_value(&self) -> Option<&Value> {
        match self {
            Self::Value(value) => Some(value),
            _ => None,
        }
    }

    /// `Nil`, `null` and `false` are falsy, everything else is truthy
    pub fn is_truthy(&self) -> bool {
        match self {
            Self::Nil | Self::Value(Value::Null | Value::Bool(false)) => false,
            _ => true,
        }
    }
}

impl From<bool> for Reply {
    fn from(value: bool) -> Self {
        Self::Value(Value::Bool(value))
    }
}

impl From<Value> for Reply {
    fn from(value: Value) -> Self {
        Self::Value(value)
    }
}

impl From<Fixture> for Reply {
    fn from(fixture: Fixture) -> Self {
        Self::Fixture(fixture)
    }
}

impl From<&Fixture> for Reply {
    fn from(fixture: &Fixture) -> Self {
        Self::Fixture(fixture.clone())
    }
}

/// A single installed stub
#[derive(Debug, Clone, PartialEq)]
pub struct Stub {
    /// Arguments this stub answers
    pub matcher: ArgMatcher,
    /// What it answers with
    pub reply: Reply,
}

impl Stub {
    /// Create a stub
    pub fn new(matcher: ArgMatcher, reply: Reply) -> Self {
        Self { matcher, reply }
    }
}

/// A message a double received
#[derive(Debug, Clone, PartialEq)]
pub struct ReceivedMessage {
    /// Message name
    pub method: String,
    /// Arguments it was sent with
    pub args: Vec<CallArg>,
}

/// Per-double table of stubs and log of received messages
#[derive(Debug, Default)]
pub struct StubTable {
    stubs: RefCell<BTreeMap<String, Vec<Stub>>>,
    received: RefCell<Vec<ReceivedMessage>>,
}

impl StubTable {
    /// Install a stub on top of the existing ones for `method`
    pub fn push(&self, method: &str, stub: Stub) {
        self.stubs
            .borrow_mut()
            .entry(method.to_string())
            .or_default()
            .push(stub);
    }

    /// Swap every stub of `method` for `stubs` in one step
    pub fn replace(&self, method: &str, stubs: Vec<Stub>) {
        self.stubs.borrow_mut().insert(method.to_string(), stubs);
    }

    /// Whether any stub is installed for `method`
    pub fn is_stubbed(&self, method: &str) -> bool {
        self.stubs
            .borrow()
            .get(method)
            .is_some_and(|stubs| !stubs.is_empty())
    }

    /// Stubs installed for `method`, oldest first
    pub fn stubs_for(&self, method: &str) -> Vec<Stub> {
        self.stubs.borrow().get(method).cloned().unwrap_or_default()
    }

    /// Reply of the newest stub accepting `args`, without recording anything
    pub fn lookup(&self, method: &str, args: &[CallArg]) -> Option<Reply> {
        self.stubs.borrow().get(method).and_then(|stubs| {
            stubs
                .iter()
                .rev()
                .find(|stub| stub.matcher.matches(args))
                .map(|stub| stub.reply.clone())
        })
    }

    /// Record a received message
    pub fn record(&self, method: &str, args: &[CallArg]) {
        self.received.borrow_mut().push(ReceivedMessage {
            method: method.to_string(),
            args: args.to_vec(),
        });
    }

    /// Record and answer a message
    ///
    /// `fallback` is consulted only when `method` has no stubs at all.
    pub fn answer<F>(&self, label: &str, method: &str, args: &[CallArg], fallback: F) -> Result<Reply>
    where
        F: FnOnce() -> Option<Reply>,
    {
        self.record(method, args);
        if self.is_stubbed(method) {
            let reply = self.lookup(method, args).ok_or_else(|| {
                let rendered: Vec<String> = args.iter().map(CallArg::render).collect();
                Error::unexpected_arguments(label, method, rendered.join(", "))
            })?;
            trace!(target_double = label, method, "stub answered");
            return Ok(reply);
        }
        fallback().ok_or_else(|| Error::unstubbed_method(label, method))
    }

    /// How many times `method` was received
    pub fn received_count(&self, method: &str) -> usize {
        self.received
            .borrow()
            .iter()
            .filter(|message| message.method == method)
            .count()
    }

    /// Every received message, oldest first
    pub fn received(&self) -> Vec<ReceivedMessage> {
        self.received.borrow().clone()
    }
}

/// Anything that carries a stub table
pub trait StubTarget {
    /// The double's stub table
    fn stub_table(&self) -> &StubTable;

    /// Human-readable label for errors and logs
    fn label(&self) -> String;
}
