use lintel_core::{
    Document, DocumentInput, EndpointRef, LayoutConfig, LinkInput, SlotCollision, WordInput,
};
use lintel_render::rows::{move_word, pack_rows};
use lintel_render::slots::assign_slots;
use lintel_render::text::DeterministicTextMeasurer;

fn config() -> LayoutConfig {
    LayoutConfig {
        word_font_size: 10.0,
        text_padding_x: 5.0,
        word_padding: 0.0,
        ..LayoutConfig::default()
    }
}

fn packed(keys: &[&str], links: Vec<LinkInput>, width: f64, cfg: &LayoutConfig) -> Document {
    let input = DocumentInput {
        words: keys.iter().map(|k| WordInput::new(*k, "abcd")).collect(),
        links,
        clusters: Vec::new(),
    };
    let mut doc = Document::from_input(input, width).unwrap();
    let measurer = DeterministicTextMeasurer {
        char_width_factor: 1.0,
        line_height_factor: 1.0,
    };
    pack_rows(&mut doc, &measurer, cfg);
    doc
}

fn w(id: &str) -> EndpointRef {
    EndpointRef::word(id)
}

fn h(doc: &Document, key: &str) -> u32 {
    doc.link(doc.link_id(key).unwrap()).unwrap().h
}

fn max_slots(doc: &Document) -> Vec<u32> {
    doc.rows.iter().map(|r| r.max_slots).collect()
}

#[test]
fn two_links_over_the_same_rows_take_different_levels() {
    let cfg = config();
    // Width 120: two words per row, so a..e occupy rows 0, 0, 1, 1, 2.
    let mut doc = packed(
        &["a", "b", "c", "d", "e"],
        vec![
            LinkInput::new("outer", w("a"), w("e")),
            LinkInput::new("inner", w("b"), w("e")),
        ],
        120.0,
        &cfg,
    );
    assign_slots(&mut doc, &cfg).unwrap();

    assert_eq!(h(&doc, "inner"), 1);
    assert_eq!(h(&doc, "outer"), 2);
    assert_eq!(max_slots(&doc), vec![2, 2, 2]);
}

#[test]
fn pass_through_rows_count_towards_max_slots() {
    let cfg = config();
    let mut doc = packed(
        &["a", "b", "c", "d", "e"],
        vec![
            LinkInput::new("long", w("a"), w("e")),
            LinkInput::new("short", w("a"), w("b")),
        ],
        120.0,
        &cfg,
    );
    assign_slots(&mut doc, &cfg).unwrap();

    assert_eq!(h(&doc, "short"), 1);
    assert_eq!(h(&doc, "long"), 2);
    // Row 1 holds no endpoint of either link.
    assert_eq!(max_slots(&doc), vec![2, 2, 2]);
}

#[test]
fn rows_without_links_have_no_slots() {
    let cfg = config();
    let mut doc = packed(
        &["a", "b", "c", "d", "e"],
        vec![LinkInput::new("l", w("a"), w("b"))],
        120.0,
        &cfg,
    );
    assign_slots(&mut doc, &cfg).unwrap();
    assert_eq!(max_slots(&doc), vec![1, 0, 0]);
}

#[test]
fn links_sit_above_the_links_they_are_anchored_to() {
    let cfg = config();
    let mut doc = packed(
        &["a", "b", "c", "d"],
        vec![
            LinkInput::new("base", w("b"), w("c")),
            LinkInput::new("on-link", w("a"), EndpointRef::link("base")),
            LinkInput::new("on-on-link", EndpointRef::link("on-link"), w("d")),
        ],
        1000.0,
        &cfg,
    );
    assign_slots(&mut doc, &cfg).unwrap();

    assert_eq!(h(&doc, "base"), 1);
    assert!(h(&doc, "on-link") > h(&doc, "base"));
    assert!(h(&doc, "on-on-link") > h(&doc, "on-link"));
}

#[test]
fn assignment_is_a_valid_first_fit_colouring() {
    let cfg = config();
    let keys: Vec<String> = (0..12).map(|i| format!("w{i}")).collect();
    let refs: Vec<&str> = keys.iter().map(String::as_str).collect();
    let spans = [(0, 3), (1, 2), (2, 9), (4, 5), (5, 11), (6, 7), (8, 10), (0, 11)];
    let links = spans
        .iter()
        .enumerate()
        .map(|(i, (a, b))| LinkInput::new(format!("l{i}"), w(refs[*a]), w(refs[*b])))
        .collect();
    let mut doc = packed(&refs, links, 230.0, &cfg);
    assign_slots(&mut doc, &cfg).unwrap();

    let ids: Vec<_> = doc.link_ids().collect();
    for &x in &ids {
        let hx = doc.link(x).unwrap().h;
        assert!(hx >= 1);
        let (x0, x1) = doc.link_row_span(x).unwrap();
        for &y in &ids {
            if x == y {
                continue;
            }
            let (y0, y1) = doc.link_row_span(y).unwrap();
            if x0 <= y1 && y0 <= x1 {
                assert_ne!(hx, doc.link(y).unwrap().h, "{x} and {y} share a row");
            }
        }
        for r in x0..=x1 {
            assert!(doc.rows[r].max_slots >= hx);
        }
    }
    for (r, row) in doc.rows.iter().enumerate() {
        let expected = ids
            .iter()
            .filter(|id| {
                let (a, b) = doc.link_row_span(**id).unwrap();
                a <= r && r <= b
            })
            .map(|id| doc.link(*id).unwrap().h)
            .max()
            .unwrap_or(0);
        assert_eq!(row.max_slots, expected);
    }
}

#[test]
fn word_collision_lets_disjoint_links_in_one_row_share_a_level() {
    let keys = ["a", "b", "c", "d"];
    let links = || {
        vec![
            LinkInput::new("left", w("a"), w("b")),
            LinkInput::new("right", w("c"), w("d")),
        ]
    };

    let cfg = config();
    let mut doc = packed(&keys, links(), 1000.0, &cfg);
    assign_slots(&mut doc, &cfg).unwrap();
    assert_eq!((h(&doc, "left"), h(&doc, "right")), (1, 2));

    let cfg = LayoutConfig {
        slot_collision: SlotCollision::Words,
        ..config()
    };
    let mut doc = packed(&keys, links(), 1000.0, &cfg);
    assign_slots(&mut doc, &cfg).unwrap();
    assert_eq!((h(&doc, "left"), h(&doc, "right")), (1, 1));
    assert_eq!(max_slots(&doc), vec![1]);
}

#[test]
fn reassignment_starts_from_scratch() {
    let cfg = config();
    let mut doc = packed(
        &["a", "b", "c"],
        vec![
            LinkInput::new("l1", w("a"), w("b")),
            LinkInput::new("l2", w("a"), w("c")),
        ],
        1000.0,
        &cfg,
    );
    assign_slots(&mut doc, &cfg).unwrap();
    let first: Vec<u32> = doc.links.iter().map(|l| l.h).collect();
    assign_slots(&mut doc, &cfg).unwrap();
    let second: Vec<u32> = doc.links.iter().map(|l| l.h).collect();
    assert_eq!(first, second);
    assert_eq!(first, vec![1, 2]);
}

#[test]
fn rows_a_link_leaves_drop_back_to_zero_slots() {
    let cfg = config();
    // Width 120: rows [a b] [c d].
    let mut doc = packed(
        &["a", "b", "c", "d"],
        vec![LinkInput::new("l", w("a"), w("b"))],
        120.0,
        &cfg,
    );
    let b = doc.word_id("b").unwrap();

    // b wraps to the next row: [a] [b c] [d].
    move_word(&mut doc, b, 100.0, &cfg).unwrap();
    assign_slots(&mut doc, &cfg).unwrap();
    assert_eq!(max_slots(&doc), vec![1, 1, 0]);

    // And back: [a b] [c] [d]; the link no longer touches row 1.
    move_word(&mut doc, b, 0.0, &cfg).unwrap();
    assign_slots(&mut doc, &cfg).unwrap();
    assert_eq!(max_slots(&doc), vec![1, 0, 0]);
}

#[test]
fn hidden_links_and_their_dependents_take_no_slot() {
    let cfg = config();
    let mut doc = packed(
        &["a", "b", "c"],
        vec![
            LinkInput::new("l1", w("a"), w("b")).hidden(),
            LinkInput::new("l2", EndpointRef::link("l1"), w("c")),
            LinkInput::new("l3", w("b"), w("c")),
        ],
        1000.0,
        &cfg,
    );
    assign_slots(&mut doc, &cfg).unwrap();

    assert_eq!(h(&doc, "l1"), 0);
    assert_eq!(h(&doc, "l2"), 0);
    assert_eq!(h(&doc, "l3"), 1);
    assert_eq!(max_slots(&doc), vec![1]);
}

#[test]
fn unpacked_documents_are_rejected() {
    let input = DocumentInput {
        words: vec![WordInput::new("a", "x"), WordInput::new("b", "y")],
        links: vec![LinkInput::new("l", w("a"), w("b"))],
        clusters: Vec::new(),
    };
    let mut doc = Document::from_input(input, 100.0).unwrap();
    assert!(assign_slots(&mut doc, &config()).is_err());
}
