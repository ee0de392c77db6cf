//! Entity references and class descriptor resolution
//!
//! Test authors name models as a descriptor, a string (`"Widget"`,
//! `"line_item"`) or a symbol-like static name. [`ModelCatalog::resolve`] is
//! the single place such references become an [`EntityDescriptor`].

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Resolved model class
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntityDescriptor {
    class_name: String,
}

impl EntityDescriptor {
    /// Create a descriptor from a camel-case class name
    pub fn new<S: Into<String>>(class_name: S) -> Self {
        Self {
            class_name: class_name.into(),
        }
    }

    /// Camel-case class name (`LineItem`)
    pub fn class_name(&self) -> &str {
        &self.class_name
    }

    /// Snake-case key used by the fixture registry (`line_item`)
    pub fn key(&self) -> String {
        underscore(&self.class_name)
    }
}

impl fmt::Display for EntityDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.class_name)
    }
}

/// Model reference as written by a test author
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntityRef {
    /// Already a class descriptor
    Class(EntityDescriptor),
    /// Owned name, camel or snake case
    Name(String),
    /// Static name, camel or snake case
    Symbol(&'static str),
}

impl EntityRef {
    /// The reference as written, for error messages
    pub fn as_written(&self) -> String {
        match self {
            Self::Class(descriptor) => descriptor.class_name().to_string(),
            Self::Name(name) => name.clone(),
            Self::Symbol(name) => format!(":{name}"),
        }
    }
}

impl From<EntityDescriptor> for EntityRef {
    fn from(descriptor: EntityDescriptor) -> Self {
        Self::Class(descriptor)
    }
}

impl From<&EntityDescriptor> for EntityRef {
    fn from(descriptor: &EntityDescriptor) -> Self {
        Self::Class(descriptor.clone())
    }
}

impl From<&'static str> for EntityRef {
    fn from(name: &'static str) -> Self {
        Self::Symbol(name)
    }
}

impl From<String> for EntityRef {
    fn from(name: String) -> Self {
        Self::Name(name)
    }
}

/// Model classes known to an example
///
/// Plays the part of constant lookup: a name resolves only if its camelised
/// form was registered.
#[derive(Debug, Clone, Default)]
pub struct ModelCatalog {
    classes: BTreeMap<String, EntityDescriptor>,
}

impl ModelCatalog {
    /// Create an empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a model class; camel or snake case is accepted
    pub fn register(&mut self, name: &str) -> Result<EntityDescriptor> {
        let class_name = camelize(name)
            .ok_or_else(|| Error::invalid_model_reference(name.to_string()))?;
        let descriptor = EntityDescriptor::new(class_name.clone());
        self.classes.insert(class_name, descriptor.clone());
        Ok(descriptor)
    }

    /// Whether a class with this camel-case name is registered
    pub fn contains(&self, class_name: &str) -> bool {
        self.classes.contains_key(class_name)
    }

    /// Registered descriptors in name order
    pub fn descriptors(&self) -> impl Iterator<Item = &EntityDescriptor> {
        self.classes.values()
    }

    /// Resolve a reference to a registered class descriptor
    ///
    /// Descriptors pass through unchanged. Names are camelised and must be
    /// registered; anything else is [`Error::InvalidModelReference`].
    pub fn resolve(&self, reference: &EntityRef) -> Result<EntityDescriptor> {
        let name = match reference {
            EntityRef::Class(descriptor) => return Ok(descriptor.clone()),
            EntityRef::Name(name) => name.as_str(),
            EntityRef::Symbol(name) => name,
        };
        camelize(name)
            .and_then(|class_name| self.classes.get(&class_name).cloned())
            .ok_or_else(|| Error::invalid_model_reference(reference.as_written()))
    }
}

/// `line_item` / `LineItem` -> `LineItem`; `None` for non-identifiers
fn camelize(name: &str) -> Option<String> {
    let valid = name
        .chars()
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic())
        && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_');
    if !valid {
        return None;
    }
    let camel: String = name
        .split('_')
        .filter(|part| !part.is_empty())
        .map(|part| {
            let mut chars = part.chars();
            chars.next().map_or_else(String::new, |first| {
                first.to_ascii_uppercase().to_string() + chars.as_str()
            })
        })
        .collect();
    Some(camel)
}

/// `LineItem` -> `line_item`
fn underscore(class_name: &str) -> String {
    let mut out = String::with_capacity(class_name.len() + 4);
    for (i, c) in class_name.chars().enumerate() {
        if c.is_ascii_uppercase() {
            if i > 0 {
                out.push('_');
            }
            out.push(c.to_ascii_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}
