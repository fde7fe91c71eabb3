//! # Container Expansion
//!
//! A container node is emitted as its own construction statement followed by,
//! for each child in order:
//!
//! 1. the child's statements, produced by the handler the registry resolves
//!    for the child's type, with the child bound to `<container>_e<index>`;
//! 2. exactly one attach statement, `append` or `insert(0, ...)`, chosen by
//!    the child's placement.
//!
//! After the children, the container's own treatment hook may add trailing
//! statements (numbering, naming, table registration).
//!
//! Child names extend the container's name, so every generated name is
//! unique across the whole program, not just within one container.

use crate::context::Context;
use crate::error::GenError;
use crate::handlers::{construct, Emission, Handler, Placement};
use crate::node::Node;
use crate::python::Args;

/// Name bound to child `index` of the container bound to `container`
pub fn child_name(container: &str, index: usize) -> String {
    format!("{}_e{}", container, index)
}

/// Statements for every child of `container`, each followed by its attach
/// statement.
///
/// Fails on the first child whose type has no handler, naming the child's
/// type, the container's type and the child's position.
pub fn expand_children(
    container: &Node,
    name: &str,
    cx: &mut Context<'_>,
) -> Result<Vec<String>, GenError> {
    let registry = cx.registry();
    let mut lines = Vec::new();

    for (index, child) in container.children.iter().enumerate() {
        let (matched, handler) =
            registry
                .resolve_with_origin(&child.kind)
                .ok_or_else(|| GenError::UnresolvedType {
                    node_type: child.kind.clone(),
                    container: Some(container.kind.clone()),
                    position: Some(index),
                })?;
        tracing::trace!(
            kind = %child.kind,
            handler = matched,
            container = %container.kind,
            index,
            "Resolved child handler"
        );

        let child_name = child_name(name, index);
        let emission = handler
            .emit(child, &child_name, cx)
            .map_err(|e| e.at(&container.kind, index))?;
        lines.extend(emission.lines);
        lines.push(emission.placement.attach(name, &child_name));
    }

    Ok(lines)
}

/// Per-category behaviour of a container handler
pub trait Container {
    fn placement(&self) -> Placement;

    /// Trailing statements emitted after all children are attached.
    fn treatment(&self, _node: &Node, _name: &str, _cx: &mut Context<'_>) -> Vec<String> {
        Vec::new()
    }
}

/// Handler for any node whose children must be expanded recursively
pub struct ContainerHandler<C>(pub C);

impl<C: Container> Handler for ContainerHandler<C> {
    fn emit(&self, node: &Node, name: &str, cx: &mut Context<'_>) -> Result<Emission, GenError> {
        let constructor = cx.constructor(node)?;
        let mut lines = vec![construct(name, constructor, &Args::new())];
        lines.extend(expand_children(node, name, cx)?);
        lines.extend(self.0.treatment(node, name, cx));
        Ok(Emission::new(lines, self.0.placement()))
    }
}
