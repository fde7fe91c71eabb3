//! # Program Generation
//!
//! One run turns one root node into a complete Python program:
//!
//! ```text
//! from music21 import bar, base, chord, clef, duration, ...
//!
//! parts = {}
//! notes = {}
//! spanners = {}
//!
//! score = stream.Score()
//! ...                                   (recursive expansion)
//! spanners['sl1'].addSpannedElements([notes['n1'], notes['n2']])
//! score_e0_e3.rightBarline = bar.Barline('final')
//! ```
//!
//! ## Phases
//! 1. **Init** - validate options, resolve the root handler, check that
//!    identity keys are unique, and collect every key some relationship in
//!    the tree refers to.
//! 2. **Expanding** - depth-first, pre-order emission from the root.
//! 3. **Finalizing** - flush the deferred statements, cap the last measure
//!    with the terminal barline, then the optional trailer.
//! 4. **Done** - the program is returned.
//!
//! Each run builds its own [`Context`], so tables and deferred statements
//! never carry over between documents.

use crate::context::Context;
use crate::error::GenError;
use crate::node::{Node, NodeId};
use crate::options::GeneratorOptions;
use crate::python;
use crate::registry::Registry;
use crate::xref::Table;
use std::collections::{BTreeSet, HashMap, HashSet};
use std::fmt;

/// Modules the generated code uses besides the vocabulary's own
const SUPPORT_MODULES: [&str; 3] = ["bar", "duration", "tie"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Init,
    Expanding,
    Finalizing,
    Done,
}

/// A generated program, one statement per line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Program {
    lines: Vec<String>,
}

impl Program {
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

}

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for line in &self.lines {
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}

/// Generate the program that rebuilds `root`.
///
/// # Errors
/// - [`GenError::ConfigError`] if the root name is unusable
/// - [`GenError::DuplicateKey`] if two nodes share an identity key
/// - [`GenError::UnresolvedType`] if any node has no handler
/// - [`GenError::DanglingReference`] if a relationship names a key outside the tree
pub fn generate(
    root: &Node,
    registry: &Registry,
    options: &GeneratorOptions,
) -> Result<Program, GenError> {
    let mut phase = Phase::Init;
    tracing::debug!(?phase, root = %root.kind, "Starting generation");

    options.validate()?;
    let modules = imported_modules(registry);
    check_root_name(&options.root_name, &modules)?;

    let handler = registry
        .resolve(&root.kind)
        .ok_or_else(|| GenError::UnresolvedType {
            node_type: root.kind.clone(),
            container: None,
            position: None,
        })?;
    check_unique_keys(root)?;
    let referenced = collect_references(root, registry);
    tracing::debug!(referenced = referenced.len(), "Collected relationship keys");

    let mut lines = preamble(&modules);
    let mut cx = Context::new(registry, referenced);

    phase = Phase::Expanding;
    tracing::debug!(?phase, "Expanding tree");
    let emission = handler.emit(root, &options.root_name, &mut cx)?;
    lines.extend(emission.lines);

    phase = Phase::Finalizing;
    tracing::debug!(?phase, deferred = cx.pending(), "Flushing deferred statements");
    let (deferred, last_sequential) = cx.finish()?;
    lines.extend(deferred);
    lines.push(terminal_marker(
        &options.root_name,
        last_sequential.as_deref(),
        &options.terminal_barline,
    ));

    if let Some(target) = &options.write {
        lines.extend(trailer(&options.root_name, &target.path, &target.format));
    }

    phase = Phase::Done;
    tracing::debug!(?phase, lines = lines.len(), "Generation finished");
    Ok(Program { lines })
}

fn imported_modules(registry: &Registry) -> BTreeSet<&str> {
    let mut modules = registry.vocabulary().modules();
    modules.extend(SUPPORT_MODULES);
    modules
}

/// The root binding must not shadow an import or a table.
fn check_root_name(name: &str, modules: &BTreeSet<&str>) -> Result<(), GenError> {
    let is_table = Table::ALL.iter().any(|table| table.name() == name);
    if is_table || modules.contains(name) {
        return Err(GenError::ConfigError(format!(
            "Root name '{}' would shadow a name the program needs",
            name
        )));
    }
    Ok(())
}

/// Keys must be unique across the whole tree; tables are flat.
fn check_unique_keys(root: &Node) -> Result<(), GenError> {
    let mut seen: HashMap<&NodeId, &str> = HashMap::new();
    let mut stack = vec![root];
    while let Some(node) = stack.pop() {
        if let Some(key) = &node.id {
            if let Some(first) = seen.insert(key, &node.kind) {
                return Err(GenError::DuplicateKey {
                    key: key.to_string(),
                    first: first.to_string(),
                    second: node.kind.clone(),
                });
            }
        }
        stack.extend(node.children.iter().rev());
    }
    Ok(())
}

/// Every key some relationship refers to, so that only those nodes are
/// registered in the tables.
///
/// Nodes without a handler are skipped here; expansion reports them with
/// their position.
fn collect_references(root: &Node, registry: &Registry) -> HashSet<NodeId> {
    let mut keys = HashSet::new();
    let mut stack = vec![root];
    while let Some(node) = stack.pop() {
        if let Some(handler) = registry.resolve(&node.kind) {
            keys.extend(handler.references(node).into_iter().map(|r| r.key));
        }
        stack.extend(node.children.iter());
    }
    keys
}

fn preamble(modules: &BTreeSet<&str>) -> Vec<String> {
    let mut lines = vec![
        format!(
            "from music21 import {}",
            modules.iter().copied().collect::<Vec<_>>().join(", ")
        ),
        String::new(),
    ];
    lines.extend(Table::ALL.iter().map(|table| table.init_statement()));
    lines.push(String::new());
    lines
}

/// Closing barline on the last measure, or appended to the root when the
/// tree has no measures.
fn terminal_marker(root: &str, last_sequential: Option<&str>, style: &str) -> String {
    let barline = format!("bar.Barline({})", python::string(style));
    match last_sequential {
        Some(measure) => format!("{}.rightBarline = {}", measure, barline),
        None => format!("{}.append({})", root, barline),
    }
}

fn trailer(root: &str, path: &str, format: &str) -> Vec<String> {
    vec![
        String::new(),
        format!("if not {}.isWellFormedNotation():", root),
        format!(
            "    raise ValueError({})",
            python::string(&format!("{} is not well-formed notation", root))
        ),
        format!(
            "{}.write({}, fp={})",
            root,
            python::string(format),
            python::string(path)
        ),
    ]
}
