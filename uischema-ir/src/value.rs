//! Runtime values checked by the validator.

use std::{
    fmt,
    sync::{Arc, OnceLock},
};

use indexmap::IndexMap;

/// Externally supplied widget state.
///
/// Plain variants form a tree. [`Value::Shared`] is the only way to share a
/// node between several parents, which also makes cycles representable.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    Number(f64),
    String(String),
    List(Vec<Value>),
    Map(IndexMap<String, Value>),
    Shared(SharedValue),
}

impl Value {
    /// Runtime kind name used in validation messages.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "boolean",
            Value::Number(_) => "number",
            Value::String(_) => "string",
            Value::List(_) => "list",
            Value::Map(_) => "map",
            Value::Shared(shared) => shared.get().map_or("null", Value::kind_name),
        }
    }

    /// Build a map from key/value pairs.
    pub fn map<K: Into<String>>(entries: impl IntoIterator<Item = (K, Value)>) -> Self {
        Value::Map(entries.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Number(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(value)
    }
}

impl From<Vec<Value>> for Value {
    fn from(value: Vec<Value>) -> Self {
        Value::List(value)
    }
}

impl From<SharedValue> for Value {
    fn from(value: SharedValue) -> Self {
        Value::Shared(value)
    }
}

impl From<serde_json::Value> for Value {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            // Numbers outside f64 range do not occur in JSON input.
            serde_json::Value::Number(n) => Value::Number(n.as_f64().unwrap_or(f64::NAN)),
            serde_json::Value::String(s) => Value::String(s),
            serde_json::Value::Array(items) => {
                Value::List(items.into_iter().map(Value::from).collect())
            }
            serde_json::Value::Object(entries) => Value::Map(
                entries
                    .into_iter()
                    .map(|(k, v)| (k, Value::from(v)))
                    .collect(),
            ),
        }
    }
}

/// A reference-counted, late-bound value node.
///
/// The node is created empty and bound once, so a node can be placed inside
/// its own content. An unbound node reads as absent. Equality is identity.
#[derive(Clone, Default)]
pub struct SharedValue(Arc<OnceLock<Value>>);

impl SharedValue {
    /// Create an unbound node.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a node bound to `value`.
    pub fn with(value: Value) -> Self {
        Self(Arc::new(OnceLock::from(value)))
    }

    /// Bind the node. Returns the value back if it was already bound.
    pub fn set(&self, value: Value) -> Result<(), Value> {
        self.0.set(value)
    }

    /// The bound value, if any.
    pub fn get(&self) -> Option<&Value> {
        self.0.get()
    }

    /// Identity of the node, stable for its lifetime.
    pub fn id(&self) -> usize {
        Arc::as_ptr(&self.0) as usize
    }
}

impl PartialEq for SharedValue {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for SharedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = if self.get().is_some() { "bound" } else { "unbound" };
        write!(f, "SharedValue({:#x}, {})", self.id(), state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_json() {
        let json = serde_json::json!({ "hidden": true, "index": 2, "status": null, "tags": ["a"] });
        let value = Value::from(json);
        let Value::Map(entries) = value else {
            panic!("expected map");
        };
        assert_eq!(entries["hidden"], Value::Bool(true));
        assert_eq!(entries["index"], Value::Number(2.0));
        assert_eq!(entries["status"], Value::Null);
        assert_eq!(entries["tags"], Value::List(vec![Value::from("a")]));
        let keys: Vec<&str> = entries.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["hidden", "index", "status", "tags"]);
    }

    #[test]
    fn test_shared_node_created_bound() {
        let node = SharedValue::with(Value::from(1.0));
        assert_eq!(node.get(), Some(&Value::Number(1.0)));
        assert_eq!(node.set(Value::Null), Err(Value::Null));
    }

    #[test]
    fn test_shared_node_can_contain_itself() {
        let node = SharedValue::new();
        let content = Value::map([("subject", Value::Shared(node.clone()))]);
        assert!(node.set(content).is_ok());
        assert!(node.set(Value::Null).is_err());

        let Some(Value::Map(entries)) = node.get() else {
            panic!("expected bound map");
        };
        assert_eq!(entries["subject"], Value::Shared(node.clone()));
        assert_eq!(Value::Shared(node).kind_name(), "map");
    }

    #[test]
    fn test_unbound_node_reads_as_null() {
        let node = SharedValue::new();
        assert!(node.get().is_none());
        assert_eq!(Value::Shared(node).kind_name(), "null");
    }
}
