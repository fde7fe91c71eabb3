//! # Node Tree Types
//!
//! This module defines the in-memory score tree handed to the generator.
//!
//! ## Type Hierarchy
//! ```text
//! Node
//!   ├── kind: String (music21 class name, e.g. "Measure", "TrebleClef")
//!   ├── id: Option<NodeId> (identity key, needed only for cross-references)
//!   ├── attributes: BTreeMap<String, Value>
//!   └── children: Vec<Node> (empty for leaf nodes)
//! ```
//!
//! The generator treats nodes as opaque: only handlers read attributes, and
//! they do so through the typed accessors below. An accessor returns `None`
//! both when the attribute is absent and when it holds a value of the wrong
//! type; the latter is logged, since it usually means a malformed document.

use serde::Deserialize;
use std::collections::BTreeMap;
use std::fmt;

/// Stable identity key of a node.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize)]
#[serde(transparent)]
pub struct NodeId(pub String);

impl NodeId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for NodeId {
    fn from(s: &str) -> Self {
        NodeId(s.to_string())
    }
}

/// Domain attribute value
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    List(Vec<Value>),
}

impl Value {
    /// Short type name used in diagnostics
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::Str(_) => "string",
            Value::List(_) => "list",
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Int(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Int(n as i64)
    }
}

impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Value::Float(x)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Value::List(items.into_iter().map(Into::into).collect())
    }
}

/// One element of the score tree
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub kind: String,
    pub id: Option<NodeId>,
    pub attributes: BTreeMap<String, Value>,
    pub children: Vec<Node>,
}

impl Node {
    /// Create a node with no attributes and no children.
    ///
    /// The node has no identity key; use [`Node::with_id`] when it takes
    /// part in cross-references. Keys must be unique within one tree.
    pub fn new(kind: &str) -> Self {
        Self {
            kind: kind.to_string(),
            id: None,
            attributes: BTreeMap::new(),
            children: Vec::new(),
        }
    }

    pub fn with_id(mut self, id: &str) -> Self {
        self.id = Some(NodeId::from(id));
        self
    }

    pub fn attr(mut self, name: &str, value: impl Into<Value>) -> Self {
        self.attributes.insert(name.to_string(), value.into());
        self
    }

    pub fn child(mut self, child: Node) -> Self {
        self.children.push(child);
        self
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.attributes.get(name)
    }

    pub fn str_attr(&self, name: &str) -> Option<&str> {
        match self.get(name)? {
            Value::Str(s) => Some(s),
            other => self.mistyped(name, "string", other),
        }
    }

    /// Integers are accepted where a float is expected.
    pub fn f64_attr(&self, name: &str) -> Option<f64> {
        match self.get(name)? {
            Value::Float(x) => Some(*x),
            Value::Int(n) => Some(*n as f64),
            other => self.mistyped(name, "float", other),
        }
    }

    pub fn i64_attr(&self, name: &str) -> Option<i64> {
        match self.get(name)? {
            Value::Int(n) => Some(*n),
            other => self.mistyped(name, "int", other),
        }
    }

    pub fn bool_attr(&self, name: &str) -> Option<bool> {
        match self.get(name)? {
            Value::Bool(b) => Some(*b),
            other => self.mistyped(name, "bool", other),
        }
    }

    /// A list attribute whose items are all strings.
    pub fn str_list_attr(&self, name: &str) -> Option<Vec<&str>> {
        let items = match self.get(name)? {
            Value::List(items) => items,
            other => return self.mistyped(name, "list", other),
        };
        let mut strings = Vec::with_capacity(items.len());
        for item in items {
            match item {
                Value::Str(s) => strings.push(s.as_str()),
                other => return self.mistyped(name, "list of strings", other),
            }
        }
        Some(strings)
    }

    fn mistyped<T>(&self, name: &str, expected: &str, found: &Value) -> Option<T> {
        tracing::warn!(
            node = ?self.id,
            kind = %self.kind,
            attribute = name,
            expected,
            found = found.type_name(),
            "Ignoring attribute with unexpected type"
        );
        None
    }
}
