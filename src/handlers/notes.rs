//! Notes, rests, chords and chord symbols.
//!
//! ```text
//! n = note.Note('C4', duration=duration.Duration(1.0))
//! c = chord.Chord(['E4', 'G4'], duration=duration.Duration(1.0))
//! h = harmony.ChordSymbol('Cmaj7')
//! r = note.Rest(duration=duration.Duration(0.5))
//! ```

use super::{construct, Emission, Handler, Placement};
use crate::context::Context;
use crate::error::GenError;
use crate::node::Node;
use crate::python::{self, Args};
use crate::xref::Table;

/// Which pitch attribute a note-like node carries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pitch {
    /// `pitch: C4`
    Single,
    /// `pitches: [E4, G4]`
    Chord,
    /// `figure: Cmaj7`
    Figure,
    /// Rests and unpitched notes
    Unpitched,
}

/// Custom handler shared by every `GeneralNote` category.
///
/// Besides the constructor it copies `tie` and `lyric`, and registers the
/// node in the notes table when a spanner refers to it.
pub struct NoteHandler {
    pitch: Pitch,
}

impl NoteHandler {
    pub fn new(pitch: Pitch) -> Self {
        Self { pitch }
    }

    fn pitch_arg(&self, node: &Node) -> Option<String> {
        match self.pitch {
            Pitch::Single => node.str_attr("pitch").map(python::string),
            Pitch::Chord => node
                .str_list_attr("pitches")
                .map(|pitches| python::list(pitches.into_iter().map(python::string))),
            Pitch::Figure => node.str_attr("figure").map(python::string),
            Pitch::Unpitched => None,
        }
    }
}

impl Handler for NoteHandler {
    fn emit(&self, node: &Node, name: &str, cx: &mut Context<'_>) -> Result<Emission, GenError> {
        let constructor = cx.constructor(node)?;
        let args = Args::new()
            .positional_opt(self.pitch_arg(node))
            .keyword_opt("duration", duration_arg(node));

        let mut lines = vec![construct(name, constructor, &args)];
        if let Some(tie) = node.str_attr("tie") {
            lines.push(format!("{}.tie = tie.Tie({})", name, python::string(tie)));
        }
        if let Some(lyric) = node.str_attr("lyric") {
            lines.push(format!("{}.lyric = {}", name, python::string(lyric)));
        }
        lines.extend(cx.register_if_referenced(Table::Notes, node, name));

        Ok(Emission::new(lines, Placement::Append))
    }
}

/// `duration.Duration(<quarterLength>)`
pub(crate) fn duration_arg(node: &Node) -> Option<String> {
    node.f64_attr("quarterLength")
        .map(|ql| format!("duration.Duration({})", python::float(ql)))
}
