pub mod api;
pub mod context;
pub mod document;
pub mod error;
pub mod expand;
pub mod generator;
pub mod handlers;
pub mod node;
pub mod options;
pub mod python;
pub mod registry;
pub mod vocabulary;
pub mod xref;

pub use api::{
    generate, generate_with_options, generate_with_registry, transpile, transpile_with_options,
};
pub use document::parse_document;
pub use error::*;
pub use generator::Program;
pub use handlers::{builtin_registry, Emission, Handler, Placement};
pub use node::{Node, NodeId, Value};
pub use options::{GeneratorOptions, WriteTarget};
pub use registry::Registry;
pub use vocabulary::Vocabulary;
