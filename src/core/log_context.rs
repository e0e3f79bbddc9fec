//! Structured logging context
//!
//! This module provides:
//! - `FieldValue`: Value type for structured fields
//! - `Fields`: Per-call key-value fields
//! - `ContextNode`: Immutable parent-chained context shared between handles

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// Value type for structured logging fields
///
/// Sorted maps are used throughout so that two events built from identical
/// inputs serialize to identical bytes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    String(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    Null,
    Map(BTreeMap<String, FieldValue>),
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::String(s) => write!(f, "{}", s),
            FieldValue::Int(i) => write!(f, "{}", i),
            FieldValue::Float(fl) => write!(f, "{}", fl),
            FieldValue::Bool(b) => write!(f, "{}", b),
            FieldValue::Null => write!(f, "null"),
            FieldValue::Map(m) => {
                write!(f, "{{")?;
                for (i, (k, v)) in m.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}={}", k, v)?;
                }
                write!(f, "}}")
            }
        }
    }
}

impl FieldValue {
    /// Coerce this value into a form guaranteed to survive JSON encoding.
    ///
    /// Non-finite floats have no JSON representation; they degrade to their
    /// string form instead of failing the event. Nested maps are coerced
    /// recursively and empty keys inside them are dropped.
    #[must_use]
    pub fn coerced(self) -> FieldValue {
        match self {
            FieldValue::Float(f) if !f.is_finite() => FieldValue::String(f.to_string()),
            FieldValue::Map(m) => FieldValue::Map(
                m.into_iter()
                    .filter(|(k, _)| !k.is_empty())
                    .map(|(k, v)| (k, v.coerced()))
                    .collect(),
            ),
            other => other,
        }
    }

    /// Convert to serde_json::Value
    #[must_use]
    pub fn to_json_value(&self) -> serde_json::Value {
        match self {
            FieldValue::String(s) => serde_json::Value::String(s.clone()),
            FieldValue::Int(i) => serde_json::Value::Number((*i).into()),
            FieldValue::Float(f) => serde_json::Number::from_f64(*f)
                .map(serde_json::Value::Number)
                .unwrap_or_else(|| serde_json::Value::String(f.to_string())),
            FieldValue::Bool(b) => serde_json::Value::Bool(*b),
            FieldValue::Null => serde_json::Value::Null,
            FieldValue::Map(m) => serde_json::Value::Object(
                m.iter()
                    .map(|(k, v)| (k.clone(), v.to_json_value()))
                    .collect(),
            ),
        }
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        FieldValue::String(s)
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::String(s.to_string())
    }
}

impl From<i64> for FieldValue {
    fn from(i: i64) -> Self {
        FieldValue::Int(i)
    }
}

impl From<i32> for FieldValue {
    fn from(i: i32) -> Self {
        FieldValue::Int(i as i64)
    }
}

impl From<u32> for FieldValue {
    fn from(i: u32) -> Self {
        FieldValue::Int(i as i64)
    }
}

impl From<f64> for FieldValue {
    fn from(f: f64) -> Self {
        FieldValue::Float(f)
    }
}

impl From<bool> for FieldValue {
    fn from(b: bool) -> Self {
        FieldValue::Bool(b)
    }
}

impl From<BTreeMap<String, FieldValue>> for FieldValue {
    fn from(m: BTreeMap<String, FieldValue>) -> Self {
        FieldValue::Map(m)
    }
}

/// Key-value fields attached to a single logging call or context derivation
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Fields {
    fields: BTreeMap<String, FieldValue>,
}

impl Fields {
    /// Create a new empty field set
    pub fn new() -> Self {
        Self {
            fields: BTreeMap::new(),
        }
    }

    /// Add a field
    pub fn with_field<K, V>(mut self, key: K, value: V) -> Self
    where
        K: Into<String>,
        V: Into<FieldValue>,
    {
        self.fields.insert(key.into(), value.into());
        self
    }

    /// Add a field (mutable version)
    pub fn add_field<K, V>(&mut self, key: K, value: V)
    where
        K: Into<String>,
        V: Into<FieldValue>,
    {
        self.fields.insert(key.into(), value.into());
    }

    /// Get all fields
    pub fn fields(&self) -> &BTreeMap<String, FieldValue> {
        &self.fields
    }

    /// Check if the field set is empty
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Get the number of fields
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Format fields as key=value pairs
    pub fn format_fields(&self) -> String {
        self.fields
            .iter()
            .map(|(k, v)| format!("{}={}", k, v))
            .collect::<Vec<_>>()
            .join(" ")
    }

    pub(crate) fn into_inner(self) -> BTreeMap<String, FieldValue> {
        self.fields
    }
}

impl fmt::Display for Fields {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_fields())
    }
}

impl IntoIterator for Fields {
    type Item = (String, FieldValue);
    type IntoIter = std::collections::btree_map::IntoIter<String, FieldValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.into_iter()
    }
}

impl FromIterator<(String, FieldValue)> for Fields {
    fn from_iter<I: IntoIterator<Item = (String, FieldValue)>>(iter: I) -> Self {
        Self {
            fields: iter.into_iter().collect(),
        }
    }
}

/// Immutable key-value context with a link to its parent
///
/// Deriving a child context is O(1): it stores only its own fields and an
/// `Arc` to the parent. The flattened view is computed lazily by
/// [`ContextNode::resolve`] when an event is built, walking the chain from
/// the root down so the most specific value wins on key collision.
///
/// Nodes never change after construction, so they can be shared freely
/// across threads without locking. Parent links only point at strictly
/// older nodes; cycles cannot be formed.
///
/// # Example
///
/// ```
/// use logship::core::{ContextNode, Fields};
///
/// let root = ContextNode::root();
/// let session = root.derive(Fields::new().with_field("session_id", "sess_1"));
/// let request = session.derive(Fields::new().with_field("request_id", "req_9"));
///
/// let resolved = request.resolve();
/// assert_eq!(resolved.len(), 2);
/// ```
#[derive(Debug)]
pub struct ContextNode {
    fields: BTreeMap<String, FieldValue>,
    parent: Option<Arc<ContextNode>>,
}

impl ContextNode {
    /// Create an empty root context
    pub fn root() -> Arc<Self> {
        Arc::new(Self {
            fields: BTreeMap::new(),
            parent: None,
        })
    }

    /// Derive a child context whose fields override the parent's
    ///
    /// Empty keys are malformed and are rejected here rather than at
    /// logging time.
    pub fn derive(self: &Arc<Self>, extra: Fields) -> Arc<ContextNode> {
        Arc::new(ContextNode {
            fields: extra
                .into_inner()
                .into_iter()
                .filter(|(k, _)| !k.is_empty())
                .collect(),
            parent: Some(Arc::clone(self)),
        })
    }

    /// Own fields of this node, not including ancestors
    pub fn own_fields(&self) -> &BTreeMap<String, FieldValue> {
        &self.fields
    }

    /// Number of nodes on the chain from the root to this node
    pub fn depth(&self) -> usize {
        let mut depth = 1;
        let mut current = &self.parent;
        while let Some(node) = current {
            depth += 1;
            current = &node.parent;
        }
        depth
    }

    /// Flatten the parent chain into a single mapping
    ///
    /// Fields are applied root-first, so a descendant's value replaces any
    /// ancestor's value for the same key.
    pub fn resolve(&self) -> BTreeMap<String, FieldValue> {
        let mut chain: Vec<&ContextNode> = Vec::new();
        let mut current = Some(self);
        while let Some(node) = current {
            chain.push(node);
            current = node.parent.as_deref();
        }

        let mut resolved = BTreeMap::new();
        for node in chain.into_iter().rev() {
            for (key, value) in &node.fields {
                resolved.insert(key.clone(), value.clone());
            }
        }
        resolved
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fields_builder() {
        let fields = Fields::new()
            .with_field("user_id", 123)
            .with_field("username", "john_doe")
            .with_field("active", true);

        assert_eq!(fields.len(), 3);
        assert!(!fields.is_empty());
    }

    #[test]
    fn test_fields_format() {
        let fields = Fields::new()
            .with_field("key1", "value1")
            .with_field("key2", 42);

        let formatted = fields.format_fields();
        assert!(formatted.contains("key1=value1"));
        assert!(formatted.contains("key2=42"));
    }

    #[test]
    fn test_root_context_is_empty() {
        let root = ContextNode::root();
        assert!(root.own_fields().is_empty());
        assert!(root.resolve().is_empty());
        assert_eq!(root.depth(), 1);
    }

    #[test]
    fn test_derive_does_not_mutate_parent() {
        let root = ContextNode::root();
        let child = root.derive(Fields::new().with_field("a", 1));

        assert!(root.own_fields().is_empty());
        assert_eq!(child.own_fields().len(), 1);
        assert_eq!(child.depth(), 2);
    }

    #[test]
    fn test_resolve_descendant_wins() {
        let root = ContextNode::root();
        let outer = root.derive(
            Fields::new()
                .with_field("service", "checkout")
                .with_field("region", "eu-1"),
        );
        let inner = outer.derive(Fields::new().with_field("region", "us-2"));

        let resolved = inner.resolve();
        assert_eq!(
            resolved.get("region"),
            Some(&FieldValue::String("us-2".to_string()))
        );
        assert_eq!(
            resolved.get("service"),
            Some(&FieldValue::String("checkout".to_string()))
        );
    }

    #[test]
    fn test_derive_rejects_empty_keys() {
        let root = ContextNode::root();
        let child = root.derive(
            Fields::new()
                .with_field("", "dropped")
                .with_field("kept", true),
        );

        assert_eq!(child.own_fields().len(), 1);
        assert!(child.own_fields().contains_key("kept"));
    }

    #[test]
    fn test_shared_parent_between_siblings() {
        let root = ContextNode::root();
        let base = root.derive(Fields::new().with_field("session_id", "s1"));
        let left = base.derive(Fields::new().with_field("branch", "left"));
        let right = base.derive(Fields::new().with_field("branch", "right"));

        assert_eq!(
            left.resolve().get("branch"),
            Some(&FieldValue::String("left".to_string()))
        );
        assert_eq!(
            right.resolve().get("branch"),
            Some(&FieldValue::String("right".to_string()))
        );
        assert_eq!(
            left.resolve().get("session_id"),
            Some(&FieldValue::String("s1".to_string()))
        );
    }

    #[test]
    fn test_coerce_non_finite_float() {
        let coerced = FieldValue::Float(f64::NAN).coerced();
        assert_eq!(coerced, FieldValue::String("NaN".to_string()));

        let coerced = FieldValue::Float(f64::INFINITY).coerced();
        assert_eq!(coerced, FieldValue::String("inf".to_string()));

        let untouched = FieldValue::Float(1.5).coerced();
        assert_eq!(untouched, FieldValue::Float(1.5));
    }

    #[test]
    fn test_coerce_nested_map() {
        let mut inner = BTreeMap::new();
        inner.insert("rate".to_string(), FieldValue::Float(f64::NAN));
        inner.insert("".to_string(), FieldValue::Bool(true));

        let coerced = FieldValue::Map(inner).coerced();
        match coerced {
            FieldValue::Map(m) => {
                assert_eq!(m.len(), 1);
                assert_eq!(m.get("rate"), Some(&FieldValue::String("NaN".to_string())));
            }
            other => panic!("Expected map, got {:?}", other),
        }
    }

    #[test]
    fn test_field_value_json() {
        let value = FieldValue::Float(f64::NAN);
        assert_eq!(
            value.to_json_value(),
            serde_json::Value::String("NaN".to_string())
        );

        let mut map = BTreeMap::new();
        map.insert("count".to_string(), FieldValue::Int(3));
        let value = FieldValue::Map(map);
        assert_eq!(value.to_json_value()["count"], serde_json::json!(3));
    }
}
