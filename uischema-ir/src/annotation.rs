//! Field annotations consumed by transport code.

use std::fmt;

use indexmap::IndexMap;
use serde::Serialize;

/// Which side raises an event carried by a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EventDirection {
    Client,
    Server,
}

/// Which side may write a synchronized data field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DataFlow {
    Client,
    Server,
    Both,
}

/// When a pending change should be sent to the other side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DelayPolicy {
    /// Hold until something else forces a flush.
    Forever,
    /// Send with the next flush.
    Flush,
    /// Send after the given number of milliseconds.
    Millis(u64),
}

impl DelayPolicy {
    fn parse(value: &str) -> Option<Self> {
        match value {
            "forever" => Some(DelayPolicy::Forever),
            "flush" => Some(DelayPolicy::Flush),
            _ => value
                .strip_suffix("ms")
                .unwrap_or(value)
                .parse()
                .ok()
                .map(DelayPolicy::Millis),
        }
    }
}

/// Annotation tags attached to a field, in declaration order.
///
/// Unknown keys are preserved as-is. An empty set means the field is pure
/// data with no synchronization semantics.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct AnnotationSet(IndexMap<String, String>);

impl AnnotationSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a tag. A repeated key keeps the last value.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.insert(key.into(), value.into());
    }

    /// Raw value for a key.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns true if any tag is present.
    pub fn is_synchronized(&self) -> bool {
        !self.is_empty()
    }

    /// The `event` tag.
    pub fn event(&self) -> Option<EventDirection> {
        match self.get("event")? {
            "client" => Some(EventDirection::Client),
            "server" => Some(EventDirection::Server),
            _ => None,
        }
    }

    /// The `data` tag.
    pub fn data(&self) -> Option<DataFlow> {
        match self.get("data")? {
            "client" => Some(DataFlow::Client),
            "server" => Some(DataFlow::Server),
            "both" => Some(DataFlow::Both),
            _ => None,
        }
    }

    /// The `delay` tag.
    pub fn delay(&self) -> Option<DelayPolicy> {
        DelayPolicy::parse(self.get("delay")?)
    }
}

impl FromIterator<(String, String)> for AnnotationSet {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl fmt::Display for AnnotationSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (key, value)) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "@{}={}", key, value)?;
        }
        Ok(())
    }
}
