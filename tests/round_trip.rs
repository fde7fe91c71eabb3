//! Replays generated programs and compares the rebuilt tree to the input.

mod common;

use common::{py_string, py_string_list, Attach, Replay};
use m21gen::{builtin_registry, generate, parse_document, Node, Registry};
use pretty_assertions::assert_eq;

/// Kinds attached at offset zero by the built-in handlers
fn front_placed(registry: &Registry, node: &Node) -> bool {
    let vocabulary = registry.vocabulary();
    ["Part", "Voice", "Metadata", "Instrument", "LayoutBase", "Spanner"]
        .iter()
        .any(|family| vocabulary.is_a(&node.kind, family))
}

fn assert_same_tree(registry: &Registry, node: &Node, replay: &Replay, name: &str) {
    let object = replay.get(name);
    let vocabulary = registry.vocabulary();
    assert_eq!(
        Some(object.constructor.as_str()),
        vocabulary.constructor(&node.kind),
        "wrong class for {:?}",
        node.id
    );

    if vocabulary.is_a(&node.kind, "GeneralNote") {
        assert_eq!(
            object.quarter_length(),
            node.f64_attr("quarterLength"),
            "duration of {:?}",
            node.id
        );
        if vocabulary.is_a(&node.kind, "Chord") && !vocabulary.is_a(&node.kind, "Harmony") {
            let expected: Vec<String> = node
                .str_list_attr("pitches")
                .unwrap_or_default()
                .into_iter()
                .map(String::from)
                .collect();
            let actual = object.positional.first().map(|p| py_string_list(p)).unwrap_or_default();
            assert_eq!(actual, expected, "pitches of {:?}", node.id);
        } else if node.kind == "Note" {
            let actual = object.positional.first().map(|p| py_string(p));
            assert_eq!(actual.as_deref(), node.str_attr("pitch"), "pitch of {:?}", node.id);
        }
    }

    assert_eq!(
        object.children.len(),
        node.children.len(),
        "child count of {:?}",
        node.id
    );
    for (child, (attach, child_name)) in node.children.iter().zip(&object.children) {
        let expected = if front_placed(registry, child) {
            Attach::Front
        } else {
            Attach::Append
        };
        assert_eq!(*attach, expected, "placement of {:?}", child.id);
        assert_same_tree(registry, child, replay, child_name);
    }
}

fn round_trip(source: &str) -> Replay {
    let root = parse_document(source).unwrap();
    let program = generate(&root).unwrap();
    let replay = Replay::run(&program.to_string());
    assert_same_tree(&builtin_registry(), &root, &replay, "score");
    replay
}

const PIANO_SCORE: &str = r#"
type: Score
children:
  - type: Metadata
    title: Minuet
    composer: Anon.
  - type: StaffGroup
    id: grand
    symbol: brace
    spanned: [rh, lh]
  - type: Part
    id: rh
    partName: Right hand
    children:
      - type: Piano
      - type: Measure
        number: 1
        children:
          - type: TrebleClef
          - type: KeySignature
            sharps: 1
          - type: TimeSignature
            ratioString: 3/4
          - type: Note
            id: d5
            pitch: D5
            quarterLength: 1.0
          - type: Note
            id: g4
            pitch: G4
            quarterLength: 0.5
          - type: Note
            pitch: A4
            quarterLength: 0.5
          - type: Slur
            id: s1
            spanned: [d5, g4]
      - type: Measure
        number: 2
        children:
          - type: Chord
            pitches: [B4, D5]
            quarterLength: 2.0
          - type: Rest
            quarterLength: 1.0
  - type: Part
    id: lh
    children:
      - type: Measure
        number: 1
        children:
          - type: BassClef
          - type: Voice
            children:
              - type: Note
                pitch: G3
                quarterLength: 3.0
          - type: Voice
            children:
              - type: Rest
                quarterLength: 3.0
"#;

#[test]
fn test_piano_score_round_trip() {
    round_trip(PIANO_SCORE);
}

#[test]
fn test_relationships_bind_to_the_right_nodes() {
    let replay = round_trip(PIANO_SCORE);

    let slur = replay.get(replay.lookup("spanners", "s1"));
    assert_eq!(slur.constructor, "spanner.Slur");
    let pitches: Vec<String> = slur
        .spanned
        .iter()
        .map(|name| py_string(&replay.get(name).positional[0]))
        .collect();
    assert_eq!(pitches, vec!["D5", "G4"]);

    let group = replay.get(replay.lookup("spanners", "grand"));
    assert_eq!(group.keyword("symbol"), Some("'brace'"));
    assert_eq!(
        group.spanned,
        vec![replay.lookup("parts", "rh").to_string(), replay.lookup("parts", "lh").to_string()]
    );
    assert_eq!(
        replay.get(&group.spanned[0]).attribute("partName"),
        Some("'Right hand'")
    );
}

#[test]
fn test_only_referenced_nodes_are_registered() {
    let replay = round_trip(PIANO_SCORE);
    assert_eq!(replay.tables["notes"].len(), 2);
    assert_eq!(replay.tables["parts"].len(), 2);
    assert_eq!(replay.tables["spanners"].len(), 2);
}

#[test]
fn test_terminal_barline_lands_on_last_measure() {
    let replay = round_trip(PIANO_SCORE);
    let last_measure = replay
        .bound
        .iter()
        .filter(|name| replay.get(name).constructor == "stream.Measure")
        .last()
        .unwrap();
    assert_eq!(
        replay.get(last_measure).attribute("rightBarline"),
        Some("bar.Barline('final')")
    );
}

#[test]
fn test_generated_names_are_never_rebound() {
    let replay = round_trip(PIANO_SCORE);
    let mut names = replay.bound.clone();
    names.sort();
    names.dedup();
    assert_eq!(names.len(), replay.bound.len());
}

#[test]
fn test_front_placement_ignores_child_order() {
    // Layout and instrument come last in the document but are still
    // layered at the front; the appended notes keep their order.
    let source = r#"
type: Measure
children:
  - type: Note
    pitch: C4
  - type: Note
    pitch: E4
  - type: SystemLayout
    isNew: true
  - type: Note
    pitch: G4
  - type: Violin
"#;
    let replay = round_trip(source);
    let children = replay.children("score");
    let front: Vec<&str> = children
        .iter()
        .filter(|(attach, _)| *attach == Attach::Front)
        .map(|(_, object)| object.constructor.as_str())
        .collect();
    assert_eq!(front, vec!["layout.SystemLayout", "instrument.Violin"]);

    let appended: Vec<String> = children
        .iter()
        .filter(|(attach, _)| *attach == Attach::Append)
        .filter(|(_, object)| object.constructor == "note.Note")
        .map(|(_, object)| py_string(&object.positional[0]))
        .collect();
    assert_eq!(appended, vec!["C4", "E4", "G4"]);
}

#[test]
fn test_deferred_binding_to_later_and_deeper_nodes() {
    // The slur precedes the notes it spans, which sit two levels deeper.
    let root = Node::new("Score")
        .child(
            Node::new("Slur")
                .with_id("slur")
                .attr("spanned", vec!["first", "last"]),
        )
        .child(
            Node::new("Part").child(
                Node::new("Measure")
                    .child(Node::new("Note").with_id("first").attr("pitch", "C4"))
                    .child(Node::new("Note").with_id("last").attr("pitch", "C5")),
            ),
        );
    let program = generate(&root).unwrap();
    let replay = Replay::run(&program.to_string());
    let slur = replay.get(replay.lookup("spanners", "slur"));
    assert_eq!(slur.spanned, vec!["score_e1_e0_e0", "score_e1_e0_e1"]);
}
