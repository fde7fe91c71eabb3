//! # Error Types
//!
//! This module defines all error types for the m21gen transpiler.
//!
//! Every error carries enough context (node type, container type, position or
//! identity key) to locate the offending node in the input tree.
//!
//! ## Error Types
//! - `UnresolvedType` - No handler for a node type, even after ancestor fallback
//! - `MissingConstructor` - A handled node type has no constructor in the vocabulary
//! - `DanglingReference` - A relationship names a key that was never registered
//! - `DuplicateKey` - Two nodes in one tree share an identity key
//! - `DocumentError` - The node document could not be loaded
//! - `VocabularyError` - The type hierarchy itself is inconsistent
//! - `ConfigError` - Generator options are unusable (bad root name, bad file)
//!
//! Missing optional attributes are never errors: handlers simply leave the
//! corresponding parameter out.
//!
//! ## Usage
//! ```rust
//! use m21gen::{transpile, GenError};
//!
//! let source = "type: Stream\nchildren:\n  - type: Kazoo\n";
//! match transpile(source) {
//!     Ok(program) => println!("{}", program),
//!     Err(GenError::UnresolvedType { node_type, .. }) => {
//!         eprintln!("no handler for {}", node_type);
//!     }
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum GenError {
    /// No handler is registered for a node type or any of its ancestors.
    ///
    /// `container` and `position` are `None` only for the root node.
    ///
    /// # Example
    /// ```
    /// # use m21gen::GenError;
    /// let err = GenError::UnresolvedType {
    ///     node_type: "Kazoo".to_string(),
    ///     container: Some("Measure".to_string()),
    ///     position: Some(3),
    /// };
    /// assert_eq!(
    ///     err.to_string(),
    ///     "No handler for node type 'Kazoo' (child 3 of 'Measure')"
    /// );
    /// ```
    #[error("No handler for node type '{node_type}'{}", location(.container, .position))]
    UnresolvedType {
        node_type: String,
        container: Option<String>,
        position: Option<usize>,
    },

    /// A node type resolves to a handler but has no constructor of its own.
    ///
    /// Raised while a handler emits, so the location is filled in by the
    /// container that expanded the node.
    #[error("No constructor known for '{node_type}'{}", location(.container, .position))]
    MissingConstructor {
        node_type: String,
        container: Option<String>,
        position: Option<usize>,
    },

    /// A relationship references an identity key that no emitted node registered.
    ///
    /// This means the relationship points outside the tree being generated.
    #[error("'{relationship}' references '{key}', which is not in the {table} table")]
    DanglingReference {
        relationship: String,
        key: String,
        table: &'static str,
    },

    /// Two nodes carry the same identity key, so a reference to it would be
    /// ambiguous.
    ///
    /// # Example
    /// ```
    /// # use m21gen::GenError;
    /// let err = GenError::DuplicateKey {
    ///     key: "n1".to_string(),
    ///     first: "Note".to_string(),
    ///     second: "Chord".to_string(),
    /// };
    /// assert_eq!(
    ///     err.to_string(),
    ///     "Identity key 'n1' is used by a 'Note' and a 'Chord' node"
    /// );
    /// ```
    #[error("Identity key '{key}' is used by a '{first}' and a '{second}' node")]
    DuplicateKey {
        key: String,
        first: String,
        second: String,
    },

    /// The node document could not be read.
    #[error("Invalid document: {0}")]
    DocumentError(String),

    /// The type hierarchy is inconsistent (unknown parent, duplicate tag).
    #[error("Invalid vocabulary: {0}")]
    VocabularyError(String),

    #[error("Invalid options: {0}")]
    ConfigError(String),
}

impl GenError {
    /// Attach the expanding container to an error raised by a child's handler.
    ///
    /// Only errors that do not know their location yet are changed.
    pub(crate) fn at(self, container: &str, position: usize) -> Self {
        match self {
            GenError::MissingConstructor {
                node_type,
                container: None,
                ..
            } => GenError::MissingConstructor {
                node_type,
                container: Some(container.to_string()),
                position: Some(position),
            },
            other => other,
        }
    }
}

fn location(container: &Option<String>, position: &Option<usize>) -> String {
    match (container, position) {
        (Some(container), Some(position)) => {
            format!(" (child {} of '{}')", position, container)
        }
        (Some(container), None) => format!(" (in '{}')", container),
        _ => " (root node)".to_string(),
    }
}
