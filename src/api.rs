//! # Public API
//!
//! Entry points for the m21gen library.
//!
//! - [`generate()`] - program for an in-memory tree, built-in handlers
//! - [`generate_with_options()`] - same, with a custom root name, terminal
//!   barline or write trailer
//! - [`transpile()`] - load a YAML/JSON node document, then generate
//! - [`transpile_with_options()`] - both of the above combined
//!
//! ## Typical Usage
//!
//! ```rust
//! use m21gen::transpile;
//!
//! let source = r#"
//! type: Measure
//! children:
//!   - type: TrebleClef
//!   - type: Note
//!     pitch: C4
//!     quarterLength: 1.0
//! "#;
//!
//! let program = transpile(source)?;
//! assert!(program.to_string().contains("note.Note('C4'"));
//! # Ok::<(), m21gen::GenError>(())
//! ```
//!
//! Callers that register their own handlers build a [`Registry`] and call
//! [`crate::generator::generate`] directly.

use crate::{
    builtin_registry, generator, parse_document, GenError, GeneratorOptions, Node, Program,
    Registry,
};

/// Generate the music21 program that rebuilds `root`.
///
/// # Example
/// ```rust
/// use m21gen::{generate, Node};
///
/// let measure = Node::new("Measure").child(Node::new("Note").attr("pitch", "C4"));
/// let program = generate(&measure)?;
/// assert!(program.lines().contains(&"score_e0 = note.Note('C4')".to_string()));
/// # Ok::<(), m21gen::GenError>(())
/// ```
pub fn generate(root: &Node) -> Result<Program, GenError> {
    generate_with_options(root, &GeneratorOptions::default())
}

/// Generate with explicit [`GeneratorOptions`].
pub fn generate_with_options(root: &Node, options: &GeneratorOptions) -> Result<Program, GenError> {
    generate_with_registry(root, &builtin_registry(), options)
}

/// Generate with caller-supplied handlers.
pub fn generate_with_registry(
    root: &Node,
    registry: &Registry,
    options: &GeneratorOptions,
) -> Result<Program, GenError> {
    generator::generate(root, registry, options)
}

/// Parse a node document and generate its program.
///
/// # Errors
/// [`GenError::DocumentError`] if the document cannot be parsed, otherwise
/// any error [`generate()`] returns.
pub fn transpile(source: &str) -> Result<Program, GenError> {
    transpile_with_options(source, &GeneratorOptions::default())
}

pub fn transpile_with_options(
    source: &str,
    options: &GeneratorOptions,
) -> Result<Program, GenError> {
    let root = parse_document(source)?;
    generate_with_options(&root, options)
}
