//! Container categories. The recursion itself lives in `expand`; these only
//! decide placement and what follows the children.

use crate::context::Context;
use crate::expand::Container;
use crate::handlers::Placement;
use crate::node::Node;
use crate::python;
use crate::xref::Table;

/// Score, generic streams and voices
pub struct PlainContainer {
    placement: Placement,
}

impl PlainContainer {
    /// Sequential: kept in traversal order
    pub fn appended() -> Self {
        Self {
            placement: Placement::Append,
        }
    }

    /// Parallel: layered at offset zero, like voices in a measure
    pub fn layered() -> Self {
        Self {
            placement: Placement::InsertFront,
        }
    }
}

impl Container for PlainContainer {
    fn placement(&self) -> Placement {
        self.placement
    }
}

/// Parts run in parallel, so each one is inserted at the front of the score.
/// Staff groups find them through the parts table.
pub struct PartContainer;

impl Container for PartContainer {
    fn placement(&self) -> Placement {
        Placement::InsertFront
    }

    fn treatment(&self, node: &Node, name: &str, cx: &mut Context<'_>) -> Vec<String> {
        let mut lines = Vec::new();
        for field in ["partName", "partAbbreviation"] {
            if let Some(value) = node.str_attr(field) {
                lines.push(format!("{}.{} = {}", name, field, python::string(value)));
            }
        }
        lines.extend(cx.register_if_referenced(Table::Parts, node, name));
        lines
    }
}

/// Measures keep their order and carry an optional number. The last one
/// completed is where the closing barline goes.
pub struct MeasureContainer;

impl Container for MeasureContainer {
    fn placement(&self) -> Placement {
        Placement::Append
    }

    fn treatment(&self, node: &Node, name: &str, cx: &mut Context<'_>) -> Vec<String> {
        let mut lines = Vec::new();
        if let Some(number) = node.i64_attr("number") {
            lines.push(format!("{}.number = {}", name, python::int(number)));
        }
        cx.mark_sequential(name);
        lines
    }
}
