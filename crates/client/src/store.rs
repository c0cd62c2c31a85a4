//! The client-side state map.

use std::collections::HashMap;

use serde_json::Value;

/// Mapping from state id to current value. Written by the message router
/// (authoritative `stateUpdate` frames) and by explicit local writes;
/// entries are never deleted during the page's lifetime.
#[derive(Debug, Default)]
pub struct StateStore {
    entries: HashMap<String, Value>,
}

impl StateStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, id: &str) -> Option<&Value> {
        self.entries.get(id)
    }

    /// Write a value, returning the prior one.
    pub fn put(&mut self, id: &str, value: Value) -> Option<Value> {
        self.entries.insert(id.to_string(), value)
    }
}
