//! Node document loader.
//!
//! Reads a score tree from YAML (JSON documents parse too, being valid YAML).
//! Each node is a mapping with a `type`, an optional `id`, optional
//! `children`, and any number of further keys that become attributes:
//!
//! ```yaml
//! type: Measure
//! number: 1
//! children:
//!   - type: TrebleClef
//!   - type: Note
//!     id: n1
//!     pitch: C4
//!     quarterLength: 1.0
//! ```
//!
//! Nodes without an `id` get `#<n>`, where `n` is their pre-order index.
//! Keys are checked for uniqueness when the tree is generated, so trees
//! built in code get the same check.

use crate::error::GenError;
use crate::node::{Node, NodeId, Value};
use serde::Deserialize;
use std::collections::BTreeMap;

#[derive(Deserialize, Debug)]
struct RawNode {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    id: Option<Value>,
    #[serde(default)]
    children: Vec<RawNode>,
    #[serde(flatten)]
    attributes: BTreeMap<String, Value>,
}

/// Parse a node document into a tree.
pub fn parse_document(source: &str) -> Result<Node, GenError> {
    let raw: RawNode =
        serde_yaml::from_str(source).map_err(|e| GenError::DocumentError(e.to_string()))?;

    let mut next_index = 0;
    build(raw, &mut next_index)
}

fn build(raw: RawNode, next_index: &mut usize) -> Result<Node, GenError> {
    let index = *next_index;
    *next_index += 1;

    let id = match raw.id {
        None => NodeId(format!("#{}", index)),
        Some(Value::Str(s)) => NodeId(s),
        Some(Value::Int(n)) => NodeId(n.to_string()),
        Some(other) => {
            return Err(GenError::DocumentError(format!(
                "'{}' node has an id of type {}; expected a string or integer",
                raw.kind,
                other.type_name()
            )))
        }
    };

    let mut children = Vec::with_capacity(raw.children.len());
    for child in raw.children {
        children.push(build(child, next_index)?);
    }

    Ok(Node {
        kind: raw.kind,
        id: Some(id),
        attributes: raw.attributes,
        children,
    })
}
