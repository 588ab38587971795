//! Builder pattern implementations for easy test data construction
//!
//! Provides fluent builders for:
//! - ToDo records with sensible defaults
//! - NewToDo inputs
//! - Raw request payloads, including invalid ones

use crate::fixtures::expiry_on;
use chrono::NaiveDateTime;
use serde_json::{json, Map, Value};
use todo_core::{NewToDo, ToDo, ToDoPayload};

/// Builder for constructing ToDo instances in tests
pub struct ToDoBuilder {
    todo: ToDo,
}

impl Default for ToDoBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ToDoBuilder {
    /// Create new builder with default values
    pub fn new() -> Self {
        Self {
            todo: ToDo::from_new(1, NewToDo::new("Test to-do", expiry_on(16))),
        }
    }

    pub fn with_id(mut self, id: i32) -> Self {
        self.todo.id = id;
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.todo.title = title.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.todo.description = Some(description.into());
        self
    }

    pub fn with_expiry(mut self, expiry: NaiveDateTime) -> Self {
        self.todo.expiry = expiry;
        self
    }

    pub fn with_complete_percent(mut self, complete_percent: f64) -> Self {
        self.todo.complete_percent = complete_percent;
        self
    }

    pub fn done(mut self) -> Self {
        self.todo.is_done = true;
        self
    }

    /// Build the final ToDo
    pub fn build(self) -> ToDo {
        self.todo
    }
}

/// Builder for constructing NewToDo instances in tests
pub struct NewToDoBuilder {
    new_todo: NewToDo,
}

impl Default for NewToDoBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl NewToDoBuilder {
    /// Create new builder with default values
    pub fn new() -> Self {
        Self {
            new_todo: NewToDo::new("New test to-do", expiry_on(16)),
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.new_todo.title = title.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.new_todo.description = Some(description.into());
        self
    }

    pub fn with_expiry(mut self, expiry: NaiveDateTime) -> Self {
        self.new_todo.expiry = expiry;
        self
    }

    pub fn with_complete_percent(mut self, complete_percent: f64) -> Self {
        self.new_todo.complete_percent = complete_percent;
        self
    }

    pub fn done(mut self) -> Self {
        self.new_todo.is_done = true;
        self
    }

    /// Build the final NewToDo
    pub fn build(self) -> NewToDo {
        self.new_todo
    }
}

/// Builder for request bodies as a client would send them.
///
/// Keys use the service's camelCase response names unless overridden with
/// [`PayloadBuilder::with_raw`], so tests can exercise case-insensitive
/// matching and malformed values.
pub struct PayloadBuilder {
    body: Map<String, Value>,
}

impl Default for PayloadBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl PayloadBuilder {
    /// A body that passes validation
    pub fn new() -> Self {
        let mut body = Map::new();
        body.insert("title".to_string(), json!("Test"));
        body.insert("description".to_string(), json!("Test description"));
        body.insert("expiry".to_string(), json!("2026-10-16T12:00:00"));
        body.insert("completePercent".to_string(), json!(0));
        Self { body }
    }

    /// An empty JSON object
    pub fn empty() -> Self {
        Self { body: Map::new() }
    }

    pub fn with_title(self, title: impl Into<String>) -> Self {
        self.with_raw("title", Value::String(title.into()))
    }

    pub fn with_description(self, description: impl Into<String>) -> Self {
        self.with_raw("description", Value::String(description.into()))
    }

    pub fn with_expiry(self, expiry: impl Into<String>) -> Self {
        self.with_raw("expiry", Value::String(expiry.into()))
    }

    pub fn with_complete_percent(self, complete_percent: f64) -> Self {
        self.with_raw("completePercent", json!(complete_percent))
    }

    pub fn with_done(self, is_done: bool) -> Self {
        self.with_raw("isDone", json!(is_done))
    }

    /// Set any key to any value
    pub fn with_raw(mut self, key: &str, value: Value) -> Self {
        self.body.insert(key.to_string(), value);
        self
    }

    pub fn without(mut self, key: &str) -> Self {
        self.body.remove(key);
        self
    }

    /// Build the JSON body
    pub fn build(self) -> Value {
        Value::Object(self.body)
    }

    /// Decode the body the way the service does after key folding
    pub fn build_payload(self) -> ToDoPayload {
        let folded: Map<String, Value> = self
            .body
            .into_iter()
            .map(|(key, value)| (key.to_lowercase(), value))
            .collect();
        serde_json::from_value(Value::Object(folded)).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payload_builder_folds_keys() {
        let payload = PayloadBuilder::new()
            .with_complete_percent(55.0)
            .with_done(true)
            .build_payload();

        assert_eq!(payload.title.as_deref(), Some("Test"));
        assert_eq!(payload.complete_percent, Some(55.0));
        assert_eq!(payload.is_done, Some(true));
    }

    #[test]
    fn test_payload_builder_without_key() {
        let body = PayloadBuilder::new().without("title").build();
        assert!(body.get("title").is_none());
        assert!(body.get("expiry").is_some());
    }
}
