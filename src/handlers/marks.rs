//! Uniform-strategy handlers for clefs, signatures, tempo and other marks.
//!
//! Each type only decides its argument list; the constructor always comes
//! from the node's exact type, which is what lets one `NoArgs` registration
//! under `Clef` emit `clef.TrebleClef()`, `clef.AltoClef()` and so on.

use super::ConstructorArgs;
use crate::node::Node;
use crate::python::{self, Args};

/// Constructor called with no arguments
pub struct NoArgs;

impl ConstructorArgs for NoArgs {
    fn args(&self, _node: &Node) -> Args {
        Args::new()
    }
}

/// `key.KeySignature(<sharps>)`
pub struct KeySignatureArgs;

impl ConstructorArgs for KeySignatureArgs {
    fn args(&self, node: &Node) -> Args {
        Args::new().positional_opt(node.i64_attr("sharps").map(python::int))
    }
}

/// `key.Key('<tonic>', '<mode>')`
pub struct KeyArgs;

impl ConstructorArgs for KeyArgs {
    fn args(&self, node: &Node) -> Args {
        Args::new()
            .positional_opt(node.str_attr("tonic").map(python::string))
            .positional_opt(node.str_attr("mode").map(python::string))
    }
}

/// `meter.TimeSignature('<ratioString>')`
pub struct TimeSignatureArgs;

impl ConstructorArgs for TimeSignatureArgs {
    fn args(&self, node: &Node) -> Args {
        Args::new().positional_opt(node.str_attr("ratioString").map(python::string))
    }
}

/// `tempo.MetronomeMark(number=<number>, text='<text>')`
///
/// The number is written back exactly as given, so `120` stays an integer.
pub struct MetronomeMarkArgs;

impl ConstructorArgs for MetronomeMarkArgs {
    fn args(&self, node: &Node) -> Args {
        // f64_attr checks the type; the literal keeps integers as integers
        let number = node
            .f64_attr("number")
            .and(node.get("number"))
            .map(python::value);
        Args::new()
            .keyword_opt("number", number)
            .keyword_opt("text", node.str_attr("text").map(python::string))
    }
}

/// Single positional string taken from the named attribute
pub struct TextArgs(pub &'static str);

impl ConstructorArgs for TextArgs {
    fn args(&self, node: &Node) -> Args {
        Args::new().positional_opt(node.str_attr(self.0).map(python::string))
    }
}

/// `bar.Barline('<type>')`
pub struct BarlineArgs;

impl ConstructorArgs for BarlineArgs {
    fn args(&self, node: &Node) -> Args {
        Args::new().positional_opt(node.str_attr("type").map(python::string))
    }
}

/// `bar.Repeat(direction='<direction>', times=<times>)`
pub struct RepeatArgs;

impl ConstructorArgs for RepeatArgs {
    fn args(&self, node: &Node) -> Args {
        Args::new()
            .keyword_opt("direction", node.str_attr("direction").map(python::string))
            .keyword_opt("times", node.i64_attr("times").map(python::int))
    }
}

/// `dynamics.Dynamic('<value>')`
pub struct DynamicArgs;

impl ConstructorArgs for DynamicArgs {
    fn args(&self, node: &Node) -> Args {
        Args::new().positional_opt(node.str_attr("value").map(python::string))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::Context;
    use crate::handlers::{builtin_registry, Handler};

    fn emit(node: Node) -> String {
        let registry = builtin_registry();
        let mut cx = Context::new(&registry, Default::default());
        let handler = registry.resolve(&node.kind).unwrap();
        handler.emit(&node, "x", &mut cx).unwrap().lines.join("\n")
    }

    #[test]
    fn test_clef_constructor_from_exact_type() {
        assert_eq!(emit(Node::new("TrebleClef")), "x = clef.TrebleClef()");
        assert_eq!(emit(Node::new("Treble8vbClef")), "x = clef.Treble8vbClef()");
        assert_eq!(emit(Node::new("AltoClef")), "x = clef.AltoClef()");
    }

    #[test]
    fn test_signatures_use_literal_values() {
        assert_eq!(
            emit(Node::new("KeySignature").attr("sharps", 0)),
            "x = key.KeySignature(0)"
        );
        assert_eq!(
            emit(Node::new("KeySignature").attr("sharps", -3)),
            "x = key.KeySignature(-3)"
        );
        assert_eq!(
            emit(Node::new("TimeSignature").attr("ratioString", "4/4")),
            "x = meter.TimeSignature('4/4')"
        );
        assert_eq!(
            emit(Node::new("Key").attr("tonic", "g").attr("mode", "minor")),
            "x = key.Key('g', 'minor')"
        );
    }

    #[test]
    fn test_metronome_mark() {
        assert_eq!(
            emit(Node::new("MetronomeMark").attr("number", 120)),
            "x = tempo.MetronomeMark(number=120)"
        );
        assert_eq!(
            emit(
                Node::new("MetronomeMark")
                    .attr("number", 92.5)
                    .attr("text", "Andante")
            ),
            "x = tempo.MetronomeMark(number=92.5, text='Andante')"
        );
        assert_eq!(emit(Node::new("MetronomeMark")), "x = tempo.MetronomeMark()");
    }

    #[test]
    fn test_barlines() {
        assert_eq!(
            emit(Node::new("Barline").attr("type", "final")),
            "x = bar.Barline('final')"
        );
        assert_eq!(
            emit(Node::new("Repeat").attr("direction", "end").attr("times", 2)),
            "x = bar.Repeat(direction='end', times=2)"
        );
    }

    #[test]
    fn test_text_marks() {
        assert_eq!(
            emit(Node::new("Dynamic").attr("value", "mf")),
            "x = dynamics.Dynamic('mf')"
        );
        assert_eq!(
            emit(Node::new("TextExpression").attr("content", "dolce")),
            "x = expressions.TextExpression('dolce')"
        );
        assert_eq!(
            emit(Node::new("TempoText").attr("text", "Allegro")),
            "x = tempo.TempoText('Allegro')"
        );
    }
}
