//! # Type Vocabulary
//!
//! The static description of the node types the generator knows about: for
//! each type tag, its parent tag (single inheritance) and the constructor the
//! generated program calls to rebuild a node of exactly that type.
//!
//! ## Fallback and constructors
//! Handler lookup falls back along the parent chain ([`Vocabulary::ancestors`]),
//! so a `TrebleClef` without a handler of its own is handled as a `Clef`. The
//! constructor, however, always comes from the node's exact tag, so the
//! generic clef handler still emits `clef.TrebleClef()`.
//!
//! ## Invariants
//! - A parent is always defined before its children, so the parent chain of
//!   every tag is finite and ends at a root.
//! - Constructors are written `module.Class`; the module part feeds the import
//!   line of the generated program.

use crate::error::GenError;
use std::collections::{BTreeSet, HashMap};

/// Built-in music21 hierarchy, parents first: (tag, parent, constructor)
const MUSIC21_TYPES: &[(&str, Option<&str>, &str)] = &[
    ("Music21Object", None, "base.Music21Object"),
    // Streams
    ("Stream", Some("Music21Object"), "stream.Stream"),
    ("Score", Some("Stream"), "stream.Score"),
    ("Opus", Some("Stream"), "stream.Opus"),
    ("Part", Some("Stream"), "stream.Part"),
    ("PartStaff", Some("Part"), "stream.PartStaff"),
    ("Measure", Some("Stream"), "stream.Measure"),
    ("Voice", Some("Stream"), "stream.Voice"),
    // Notes and chords
    ("GeneralNote", Some("Music21Object"), "note.GeneralNote"),
    ("NotRest", Some("GeneralNote"), "note.NotRest"),
    ("Note", Some("NotRest"), "note.Note"),
    ("Unpitched", Some("NotRest"), "note.Unpitched"),
    ("Rest", Some("GeneralNote"), "note.Rest"),
    ("Chord", Some("NotRest"), "chord.Chord"),
    ("Harmony", Some("Chord"), "harmony.Harmony"),
    ("ChordSymbol", Some("Harmony"), "harmony.ChordSymbol"),
    // Clefs
    ("Clef", Some("Music21Object"), "clef.Clef"),
    ("PitchClef", Some("Clef"), "clef.PitchClef"),
    ("GClef", Some("PitchClef"), "clef.GClef"),
    ("TrebleClef", Some("GClef"), "clef.TrebleClef"),
    ("Treble8vbClef", Some("GClef"), "clef.Treble8vbClef"),
    ("Treble8vaClef", Some("GClef"), "clef.Treble8vaClef"),
    ("FrenchViolinClef", Some("GClef"), "clef.FrenchViolinClef"),
    ("FClef", Some("PitchClef"), "clef.FClef"),
    ("BassClef", Some("FClef"), "clef.BassClef"),
    ("Bass8vbClef", Some("FClef"), "clef.Bass8vbClef"),
    ("Bass8vaClef", Some("FClef"), "clef.Bass8vaClef"),
    ("SubBassClef", Some("FClef"), "clef.SubBassClef"),
    ("FBaritoneClef", Some("FClef"), "clef.FBaritoneClef"),
    ("CClef", Some("PitchClef"), "clef.CClef"),
    ("AltoClef", Some("CClef"), "clef.AltoClef"),
    ("TenorClef", Some("CClef"), "clef.TenorClef"),
    ("SopranoClef", Some("CClef"), "clef.SopranoClef"),
    ("MezzoSopranoClef", Some("CClef"), "clef.MezzoSopranoClef"),
    ("CBaritoneClef", Some("CClef"), "clef.CBaritoneClef"),
    ("NoClef", Some("Clef"), "clef.NoClef"),
    ("PercussionClef", Some("Clef"), "clef.PercussionClef"),
    ("TabClef", Some("Clef"), "clef.TabClef"),
    // Key, meter, tempo, barlines
    ("KeySignature", Some("Music21Object"), "key.KeySignature"),
    ("Key", Some("KeySignature"), "key.Key"),
    ("TimeSignature", Some("Music21Object"), "meter.TimeSignature"),
    ("TempoIndication", Some("Music21Object"), "tempo.TempoIndication"),
    ("MetronomeMark", Some("TempoIndication"), "tempo.MetronomeMark"),
    ("TempoText", Some("TempoIndication"), "tempo.TempoText"),
    ("Barline", Some("Music21Object"), "bar.Barline"),
    ("Repeat", Some("Barline"), "bar.Repeat"),
    // Instruments
    ("Instrument", Some("Music21Object"), "instrument.Instrument"),
    ("KeyboardInstrument", Some("Instrument"), "instrument.KeyboardInstrument"),
    ("Piano", Some("KeyboardInstrument"), "instrument.Piano"),
    ("Harpsichord", Some("KeyboardInstrument"), "instrument.Harpsichord"),
    ("Organ", Some("KeyboardInstrument"), "instrument.Organ"),
    ("StringInstrument", Some("Instrument"), "instrument.StringInstrument"),
    ("Violin", Some("StringInstrument"), "instrument.Violin"),
    ("Viola", Some("StringInstrument"), "instrument.Viola"),
    ("Violoncello", Some("StringInstrument"), "instrument.Violoncello"),
    ("Contrabass", Some("StringInstrument"), "instrument.Contrabass"),
    ("Guitar", Some("StringInstrument"), "instrument.Guitar"),
    ("Harp", Some("StringInstrument"), "instrument.Harp"),
    ("WoodwindInstrument", Some("Instrument"), "instrument.WoodwindInstrument"),
    ("Flute", Some("WoodwindInstrument"), "instrument.Flute"),
    ("Oboe", Some("WoodwindInstrument"), "instrument.Oboe"),
    ("Clarinet", Some("WoodwindInstrument"), "instrument.Clarinet"),
    ("Bassoon", Some("WoodwindInstrument"), "instrument.Bassoon"),
    ("Saxophone", Some("WoodwindInstrument"), "instrument.Saxophone"),
    ("AltoSaxophone", Some("Saxophone"), "instrument.AltoSaxophone"),
    ("TenorSaxophone", Some("Saxophone"), "instrument.TenorSaxophone"),
    ("BrassInstrument", Some("Instrument"), "instrument.BrassInstrument"),
    ("Trumpet", Some("BrassInstrument"), "instrument.Trumpet"),
    ("Horn", Some("BrassInstrument"), "instrument.Horn"),
    ("Trombone", Some("BrassInstrument"), "instrument.Trombone"),
    ("Tuba", Some("BrassInstrument"), "instrument.Tuba"),
    ("Vocalist", Some("Instrument"), "instrument.Vocalist"),
    ("Soprano", Some("Vocalist"), "instrument.Soprano"),
    ("Alto", Some("Vocalist"), "instrument.Alto"),
    ("Tenor", Some("Vocalist"), "instrument.Tenor"),
    ("Bass", Some("Vocalist"), "instrument.Bass"),
    ("Percussion", Some("Instrument"), "instrument.Percussion"),
    // Score-wide annotations
    ("Metadata", Some("Music21Object"), "metadata.Metadata"),
    ("LayoutBase", Some("Music21Object"), "layout.LayoutBase"),
    ("SystemLayout", Some("LayoutBase"), "layout.SystemLayout"),
    ("PageLayout", Some("LayoutBase"), "layout.PageLayout"),
    ("StaffLayout", Some("LayoutBase"), "layout.StaffLayout"),
    // Spanners
    ("Spanner", Some("Music21Object"), "spanner.Spanner"),
    ("Slur", Some("Spanner"), "spanner.Slur"),
    ("Glissando", Some("Spanner"), "spanner.Glissando"),
    ("Ottava", Some("Spanner"), "spanner.Ottava"),
    ("RepeatBracket", Some("Spanner"), "spanner.RepeatBracket"),
    ("StaffGroup", Some("Spanner"), "layout.StaffGroup"),
    ("DynamicWedge", Some("Spanner"), "dynamics.DynamicWedge"),
    ("Crescendo", Some("DynamicWedge"), "dynamics.Crescendo"),
    ("Diminuendo", Some("DynamicWedge"), "dynamics.Diminuendo"),
    // Markings
    ("Dynamic", Some("Music21Object"), "dynamics.Dynamic"),
    ("Expression", Some("Music21Object"), "expressions.Expression"),
    ("TextExpression", Some("Expression"), "expressions.TextExpression"),
];

/// What the vocabulary records about one type tag
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct TypeInfo {
    pub parent: Option<String>,
    pub constructor: String,
}

impl TypeInfo {
    /// Module part of the constructor (`clef` for `clef.TrebleClef`)
    pub fn module(&self) -> &str {
        self.constructor
            .split_once('.')
            .map(|(module, _)| module)
            .unwrap_or(self.constructor.as_str())
    }
}

/// Type hierarchy plus constructor names
#[derive(Debug, Clone, Default)]
pub struct Vocabulary {
    types: HashMap<String, TypeInfo>,
}

impl Vocabulary {
    /// An empty vocabulary
    pub fn new() -> Self {
        Self::default()
    }

    /// The built-in music21 vocabulary
    pub fn music21() -> Self {
        let mut vocabulary = Self::new();
        for (tag, parent, constructor) in MUSIC21_TYPES {
            vocabulary.insert(tag, *parent, constructor);
        }
        vocabulary
    }

    /// Add a type tag.
    ///
    /// `parent` must already be defined and `tag` must not be; this keeps
    /// every parent chain finite.
    pub fn define(
        &mut self,
        tag: &str,
        parent: Option<&str>,
        constructor: &str,
    ) -> Result<(), GenError> {
        if self.types.contains_key(tag) {
            return Err(GenError::VocabularyError(format!(
                "'{}' is already defined",
                tag
            )));
        }
        if let Some(parent) = parent {
            if !self.types.contains_key(parent) {
                return Err(GenError::VocabularyError(format!(
                    "'{}' names undefined parent '{}'",
                    tag, parent
                )));
            }
        }
        self.insert(tag, parent, constructor);
        Ok(())
    }

    fn insert(&mut self, tag: &str, parent: Option<&str>, constructor: &str) {
        self.types.insert(
            tag.to_string(),
            TypeInfo {
                parent: parent.map(str::to_string),
                constructor: constructor.to_string(),
            },
        );
    }

    pub fn parent(&self, tag: &str) -> Option<&str> {
        self.types.get(tag)?.parent.as_deref()
    }

    /// Constructor for nodes of exactly this type
    pub fn constructor(&self, tag: &str) -> Option<&str> {
        self.types.get(tag).map(|info| info.constructor.as_str())
    }

    /// The tag itself followed by its parent chain up to the root.
    ///
    /// An unknown tag yields only itself.
    pub fn ancestors<'v>(&'v self, tag: &'v str) -> Ancestors<'v> {
        Ancestors {
            vocabulary: self,
            next: Some(tag),
        }
    }

    /// Whether `tag` is `ancestor` or descends from it
    pub fn is_a(&self, tag: &str, ancestor: &str) -> bool {
        self.ancestors(tag).any(|t| t == ancestor)
    }

    /// Every module a constructor lives in, sorted
    pub fn modules(&self) -> BTreeSet<&str> {
        self.types.values().map(TypeInfo::module).collect()
    }
}

/// Iterator over a tag and its ancestors
pub struct Ancestors<'v> {
    vocabulary: &'v Vocabulary,
    next: Option<&'v str>,
}

impl<'v> Iterator for Ancestors<'v> {
    type Item = &'v str;

    fn next(&mut self) -> Option<&'v str> {
        let current = self.next?;
        self.next = self.vocabulary.parent(current);
        Some(current)
    }
}
