//! # Node Handlers
//!
//! A handler turns one node into an ordered list of statements plus a
//! placement directive telling the enclosing container how to attach it.
//!
//! ## Strategies
//! - **Uniform**: the handler implements [`ConstructorArgs`] and only supplies
//!   the argument list; [`Uniform`] writes `name = module.Class(args)` using
//!   the constructor recorded for the node's exact type.
//! - **Custom**: the handler implements [`Handler`] directly and writes every
//!   statement itself (attribute assignments, table registration, deferred
//!   bindings, or a recursive expansion for containers).
//!
//! Handlers must be deterministic: equal nodes produce byte-identical output.
//!
//! ## Placement
//! - `Append` keeps the node at its traversal position among its siblings.
//! - `InsertFront` layers it at offset zero of the container; used for nodes
//!   that describe the whole container (metadata, instruments, layout,
//!   spanners, parallel parts and voices).
//!
//! ## Sub-modules
//! - `notes` - notes, rests, chords, chord symbols
//! - `marks` - clefs, key and time signatures, tempo, barlines, dynamics, text
//! - `global` - metadata, instruments, layout
//! - `spanners` - slurs, wedges, staff groups
//! - `streams` - score, part, measure, voice, generic stream

mod global;
mod marks;
mod notes;
mod spanners;
mod streams;

pub use global::{Assignments, KeywordArgs};
pub use marks::{
    BarlineArgs, DynamicArgs, KeyArgs, KeySignatureArgs, MetronomeMarkArgs, NoArgs, RepeatArgs,
    TextArgs, TimeSignatureArgs,
};
pub use notes::{NoteHandler, Pitch};
pub use spanners::SpannerHandler;
pub use streams::{MeasureContainer, PartContainer, PlainContainer};

use crate::context::Context;
use crate::error::GenError;
use crate::expand::ContainerHandler;
use crate::node::Node;
use crate::python::Args;
use crate::registry::Registry;
use crate::vocabulary::Vocabulary;
use crate::xref::{Reference, Table};

/// Where a generated child goes in its container
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    Append,
    InsertFront,
}

impl Placement {
    /// Statement attaching `child` to `container`
    pub fn attach(self, container: &str, child: &str) -> String {
        match self {
            Placement::Append => format!("{}.append({})", container, child),
            Placement::InsertFront => format!("{}.insert(0, {})", container, child),
        }
    }
}

/// Code produced for one node
#[derive(Debug, Clone, PartialEq)]
pub struct Emission {
    pub lines: Vec<String>,
    pub placement: Placement,
}

impl Emission {
    pub fn new(lines: Vec<String>, placement: Placement) -> Self {
        Self { lines, placement }
    }
}

pub trait Handler {
    /// Statements that build `node` and bind it to `name`.
    fn emit(&self, node: &Node, name: &str, cx: &mut Context<'_>) -> Result<Emission, GenError>;

    /// Keys of other nodes this node binds to once the tree is complete.
    fn references(&self, _node: &Node) -> Vec<Reference> {
        Vec::new()
    }
}

/// Argument list for the uniform constructor strategy
pub trait ConstructorArgs {
    fn args(&self, node: &Node) -> Args;

    fn placement(&self) -> Placement {
        Placement::Append
    }
}

/// Adapts a [`ConstructorArgs`] into a one-statement [`Handler`]
pub struct Uniform<A>(pub A);

impl<A: ConstructorArgs> Handler for Uniform<A> {
    fn emit(&self, node: &Node, name: &str, cx: &mut Context<'_>) -> Result<Emission, GenError> {
        let constructor = cx.constructor(node)?;
        let line = construct(name, constructor, &self.0.args(node));
        Ok(Emission::new(vec![line], self.0.placement()))
    }
}

/// `name = constructor(args)`
pub fn construct(name: &str, constructor: &str, args: &Args) -> String {
    format!("{} = {}({})", name, constructor, args.render())
}

/// Registry with a handler for every built-in node category
pub fn builtin_registry() -> Registry {
    let mut registry = Registry::new(Vocabulary::music21());

    // Containers
    registry.register("Stream", ContainerHandler(PlainContainer::appended()));
    registry.register("Score", ContainerHandler(PlainContainer::appended()));
    registry.register("Part", ContainerHandler(PartContainer));
    registry.register("Voice", ContainerHandler(PlainContainer::layered()));
    registry.register("Measure", ContainerHandler(MeasureContainer));

    // Notes
    registry.register("GeneralNote", NoteHandler::new(Pitch::Unpitched));
    registry.register("Note", NoteHandler::new(Pitch::Single));
    registry.register("Chord", NoteHandler::new(Pitch::Chord));
    registry.register("ChordSymbol", NoteHandler::new(Pitch::Figure));

    // Marks
    registry.register("Clef", Uniform(NoArgs));
    registry.register("KeySignature", Uniform(KeySignatureArgs));
    registry.register("Key", Uniform(KeyArgs));
    registry.register("TimeSignature", Uniform(TimeSignatureArgs));
    registry.register("MetronomeMark", Uniform(MetronomeMarkArgs));
    registry.register("TempoText", Uniform(TextArgs("text")));
    registry.register("Barline", Uniform(BarlineArgs));
    registry.register("Repeat", Uniform(RepeatArgs));
    registry.register("Dynamic", Uniform(DynamicArgs));
    registry.register("TextExpression", Uniform(TextArgs("content")));

    // Whole-container annotations
    registry.register("Metadata", Assignments::metadata());
    registry.register("Instrument", Assignments::instrument());
    registry.register("LayoutBase", Uniform(KeywordArgs));

    // Relationships
    registry.register("Spanner", SpannerHandler::new(Table::Notes, &[]));
    registry.register(
        "StaffGroup",
        SpannerHandler::new(Table::Parts, &["name", "abbreviation", "symbol", "barTogether"]),
    );

    registry
}
