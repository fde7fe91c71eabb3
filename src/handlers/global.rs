//! Handlers for nodes that describe their whole container: metadata,
//! instruments and layout. All of them are layered at offset zero.

use super::{construct, ConstructorArgs, Emission, Handler, Placement};
use crate::context::Context;
use crate::error::GenError;
use crate::node::Node;
use crate::python::{self, Args};

/// Bare constructor followed by one assignment per present field:
///
/// ```text
/// x = metadata.Metadata()
/// x.title = 'Invention No. 1'
/// ```
pub struct Assignments {
    fields: &'static [&'static str],
}

impl Assignments {
    pub fn new(fields: &'static [&'static str]) -> Self {
        Self { fields }
    }

    pub fn metadata() -> Self {
        Self::new(&["title", "composer", "movementName", "movementNumber"])
    }

    /// Also covers every concrete instrument, since the constructor comes
    /// from the node's own type (`instrument.Violin()`).
    pub fn instrument() -> Self {
        Self::new(&[
            "instrumentName",
            "partName",
            "partAbbreviation",
            "midiProgram",
            "midiChannel",
        ])
    }
}

impl Handler for Assignments {
    fn emit(&self, node: &Node, name: &str, cx: &mut Context<'_>) -> Result<Emission, GenError> {
        let constructor = cx.constructor(node)?;
        let mut lines = vec![construct(name, constructor, &Args::new())];
        for field in self.fields {
            if let Some(value) = node.get(field) {
                lines.push(format!("{}.{} = {}", name, field, python::value(value)));
            }
        }
        Ok(Emission::new(lines, Placement::InsertFront))
    }
}

/// Every attribute passed as a keyword argument, in name order:
/// `layout.SystemLayout(isNew=True)`
pub struct KeywordArgs;

impl ConstructorArgs for KeywordArgs {
    fn args(&self, node: &Node) -> Args {
        let mut args = Args::new();
        for (key, value) in &node.attributes {
            if python::is_identifier(key) {
                args = args.keyword(key, python::value(value));
            } else {
                tracing::warn!(
                    node = ?node.id,
                    kind = %node.kind,
                    attribute = %key,
                    "Skipping attribute that is not a valid keyword name"
                );
            }
        }
        args
    }

    fn placement(&self) -> Placement {
        Placement::InsertFront
    }
}
