//! Observable state of a simulated request
//!
//! Handlers write into a [`Response`] through the request scope; generated
//! assertions read it back after dispatch.

use crate::doubles::Reply;
use crate::value_objects::Params;
use serde_json::Value;
use std::collections::BTreeMap;

/// Flash messages, including the current-request-only `now` entries
#[derive(Debug, Clone, Default)]
pub struct Flash {
    entries: BTreeMap<String, String>,
    now: BTreeMap<String, String>,
    sweep_stubbed: bool,
    sweeps: usize,
}

impl Flash {
    /// Set a message carried to the next request
    pub fn set<K: Into<String>, V: Into<String>>(&mut self, key: K, message: V) {
        self.entries.insert(key.into(), message.into());
    }

    /// Set a message for the current request only
    pub fn set_now<K: Into<String>, V: Into<String>>(&mut self, key: K, message: V) {
        self.now.insert(key.into(), message.into());
    }

    /// Message carried to the next request
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Message for the current request only
    pub fn get_now(&self, key: &str) -> Option<&str> {
        self.now.get(key).map(String::as_str)
    }

    /// Replace the end-of-request sweep with a no-op
    pub fn stub_sweep(&mut self) {
        self.sweep_stubbed = true;
    }

    /// Whether the sweep is stubbed
    pub fn is_sweep_stubbed(&self) -> bool {
        self.sweep_stubbed
    }

    /// End-of-request sweep: drops `now` entries unless stubbed
    pub fn sweep(&mut self) {
        self.sweeps += 1;
        if !self.sweep_stubbed {
            self.now.clear();
        }
    }

    /// How many times the sweep ran
    pub fn sweep_count(&self) -> usize {
        self.sweeps
    }
}

/// Everything a handler left behind
#[derive(Debug, Clone, Default)]
pub struct Response {
    /// Instance variables the handler assigned for its view
    pub assigns: BTreeMap<String, Reply>,
    /// Flash messages
    pub flash: Flash,
    /// Session entries
    pub session: BTreeMap<String, Value>,
    /// Redirect target, if the handler redirected
    pub redirect: Option<String>,
    /// Parameters the handler was invoked with
    pub params: Params,
}

impl Response {
    /// Start a new request: drop the previous assigns and redirect
    ///
    /// Flash and session carry over, as does a stubbed sweep.
    pub fn begin_request(&mut self, params: Params) {
        self.assigns.clear();
        self.redirect = None;
        self.params = params;
    }

    /// Assigned value by name
    pub fn assigned(&self, name: &str) -> Option<&Reply> {
        self.assigns.get(name)
    }

    /// Redirect target, if any
    pub fn redirect_target(&self) -> Option<&str> {
        self.redirect.as_deref()
    }
}
