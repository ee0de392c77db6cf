//! Instance and class doubles

use crate::doubles::stub::{CallArg, ReceivedMessage, Reply, StubTable, StubTarget};
use crate::error::Result;
use crate::value_objects::EntityDescriptor;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;

/// Identifier of an instance double
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FixtureId(u64);

impl FixtureId {
    /// Wrap a raw id
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    /// The raw id
    pub fn value(self) -> u64 {
        self.0
    }

    /// The id as a JSON number, the shape a finder receives it in
    pub fn to_value(self) -> Value {
        Value::from(self.0)
    }

    /// The id as text, the shape it arrives in from a request
    pub fn to_param(self) -> String {
        self.0.to_string()
    }
}

impl fmt::Display for FixtureId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for FixtureId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

/// Attribute overrides of an instance double
///
/// Each attribute doubles as the zero-argument answer of the message with
/// the same name, so `save = true` makes an unstubbed `save` succeed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Attributes(BTreeMap<String, Value>);

impl Attributes {
    /// No overrides
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert
    pub fn with<K: Into<String>, V: Into<Value>>(mut self, key: K, value: V) -> Self {
        self.insert(key, value);
        self
    }

    /// Insert or overwrite an attribute
    pub fn insert<K: Into<String>, V: Into<Value>>(&mut self, key: K, value: V) {
        self.0.insert(key.into(), value.into());
    }

    /// Remove an attribute, returning it
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.0.remove(key)
    }

    /// Attribute by name
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Whether an attribute is set
    pub fn contains(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Lay `overrides` over these attributes
    pub fn merged(mut self, overrides: Attributes) -> Self {
        self.0.extend(overrides.0);
        self
    }

    /// Iterate attributes in key order
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Attributes {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        )
    }
}

#[derive(Debug)]
struct InstanceState {
    descriptor: EntityDescriptor,
    id: FixtureId,
    attributes: RefCell<Attributes>,
    errors: RefCell<Vec<(String, String)>>,
    table: StubTable,
}

/// In-memory stand-in for one entity
#[derive(Clone)]
pub struct Fixture(Rc<InstanceState>);

impl fmt::Debug for Fixture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}

impl Fixture {
    /// Create an instance double; factories call this
    pub fn new(descriptor: EntityDescriptor, id: FixtureId, attributes: Attributes) -> Self {
        Self(Rc::new(InstanceState {
            descriptor,
            id,
            attributes: RefCell::new(attributes),
            errors: RefCell::new(Vec::new()),
            table: StubTable::default(),
        }))
    }

    /// The double's id
    pub fn id(&self) -> FixtureId {
        self.0.id
    }

    /// The class this double is an instance of
    pub fn descriptor(&self) -> &EntityDescriptor {
        &self.0.descriptor
    }

    /// Attribute value by name
    pub fn attribute(&self, name: &str) -> Option<Value> {
        self.0.attributes.borrow().get(name).cloned()
    }

    /// Whether the attribute is set to something other than `null`
    pub fn has_attribute(&self, name: &str) -> bool {
        self.0
            .attributes
            .borrow()
            .get(name)
            .is_some_and(|value| !value.is_null())
    }

    /// Set an attribute
    pub fn set_attribute<V: Into<Value>>(&self, name: &str, value: V) {
        self.0.attributes.borrow_mut().insert(name, value);
    }

    /// Send a message
    ///
    /// Stubs answer first; a message without stubs and without arguments
    /// falls back to the attribute of the same name, and `id` always answers.
    pub fn call(&self, method: &str, args: &[CallArg]) -> Result<Reply> {
        let label = self.label();
        self.0.table.answer(&label, method, args, || {
            if !args.is_empty() {
                return None;
            }
            if method == "id" {
                return Some(Reply::Value(self.0.id.to_value()));
            }
            self.attribute(method).map(Reply::Value)
        })
    }

    /// Run the `reset_<token>` hook of this double
    ///
    /// The hook is recorded as received; a stub answering a value sets the
    /// token attribute to it. The double never invents token values itself.
    pub fn reset_token(&self, token: &str) {
        let method = format!("reset_{token}");
        self.0.table.record(&method, &[]);
        if let Some(Reply::Value(value)) = self.0.table.lookup(&method, &[]) {
            if !value.is_null() {
                self.set_attribute(token, value);
            }
        }
    }

    /// Validation errors as `(field, message)` pairs
    pub fn errors(&self) -> Vec<(String, String)> {
        self.0.errors.borrow().clone()
    }

    /// Add a validation error
    pub fn add_error<F: Into<String>, M: Into<String>>(&self, field: F, message: M) {
        self.0.errors.borrow_mut().push((field.into(), message.into()));
    }

    /// Whether any validation error is recorded
    pub fn has_errors(&self) -> bool {
        !self.0.errors.borrow().is_empty()
    }

    /// How many times `method` was received
    pub fn received_count(&self, method: &str) -> usize {
        self.0.table.received_count(method)
    }

    /// Every received message, oldest first
    pub fn received(&self) -> Vec<ReceivedMessage> {
        self.0.table.received()
    }

    /// Identity comparison
    pub fn ptr_eq(&self, other: &Fixture) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    /// `#<Widget id: 42>`
    pub fn label(&self) -> String {
        format!("#<{} id: {}>", self.0.descriptor, self.0.id)
    }
}

impl PartialEq for Fixture {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl StubTarget for Fixture {
    fn stub_table(&self) -> &StubTable {
        &self.0.table
    }

    fn label(&self) -> String {
        Fixture::label(self)
    }
}

#[derive(Debug)]
struct ClassState {
    descriptor: EntityDescriptor,
    table: StubTable,
}

/// Stand-in for an entity's class; carries finder and constructor stubs
#[derive(Debug, Clone)]
pub struct ClassDouble(Rc<ClassState>);

impl ClassDouble {
    /// Create a class double; factories call this
    pub fn new(descriptor: EntityDescriptor) -> Self {
        Self(Rc::new(ClassState {
            descriptor,
            table: StubTable::default(),
        }))
    }

    /// The class this double stands in for
    pub fn descriptor(&self) -> &EntityDescriptor {
        &self.0.descriptor
    }

    /// Send a class-level message; only stubs answer
    pub fn call(&self, method: &str, args: &[CallArg]) -> Result<Reply> {
        self.0
            .table
            .answer(self.0.descriptor.class_name(), method, args, || None)
    }

    /// How many times `method` was received
    pub fn received_count(&self, method: &str) -> usize {
        self.0.table.received_count(method)
    }

    /// Identity comparison
    pub fn ptr_eq(&self, other: &ClassDouble) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl PartialEq for ClassDouble {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl StubTarget for ClassDouble {
    fn stub_table(&self) -> &StubTable {
        &self.0.table
    }

    fn label(&self) -> String {
        self.0.descriptor.class_name().to_string()
    }
}
