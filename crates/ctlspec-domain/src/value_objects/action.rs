//! Actions and the action-to-verb table

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// HTTP verb a request is simulated with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Verb {
    /// GET
    Get,
    /// POST
    Post,
    /// PUT
    Put,
    /// DELETE
    Delete,
}

impl Verb {
    /// Upper-case method name
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
        }
    }
}

impl fmt::Display for Verb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Symbolic name of the action under test (`index`, `show`, ...)
///
/// Any name can be declared; only [`resolve_verb`] decides whether it is
/// one the harness knows how to simulate.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Action(String);

impl Action {
    /// Create an action from its symbolic name
    pub fn new<S: Into<String>>(name: S) -> Self {
        Self(name.into())
    }

    /// The symbolic name
    pub fn name(&self) -> &str {
        &self.0
    }

    /// Whether the action operates on a single identified resource
    pub fn is_member(&self) -> bool {
        matches!(self.0.as_str(), "show" | "edit" | "update" | "destroy")
    }

    /// Verb this action is simulated with
    pub fn verb(&self) -> Result<Verb> {
        resolve_verb(self)
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Action {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for Action {
    fn from(name: String) -> Self {
        Self(name)
    }
}

/// Map an action to its HTTP verb
///
/// `index`, `new`, `show` and `edit` are GET, `create` is POST, `update` is
/// PUT and `destroy` is DELETE. Anything else is [`Error::UnknownAction`].
pub fn resolve_verb(action: &Action) -> Result<Verb> {
    match action.name() {
        "index" | "new" | "show" | "edit" => Ok(Verb::Get),
        "create" => Ok(Verb::Post),
        "update" => Ok(Verb::Put),
        "destroy" => Ok(Verb::Delete),
        other => Err(Error::unknown_action(other)),
    }
}
