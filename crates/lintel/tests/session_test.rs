use lintel::render::{DeterministicTextMeasurer, LayoutOptions};
use lintel::{
    ConfigOverrides, DocumentInput, EndpointRef, Error, LayoutConfig, LayoutEvent, LayoutSession,
    LinkEnd, LinkInput, SessionError, Side, WordInput,
};
use serde_json::json;
use std::sync::Arc;

fn options() -> LayoutOptions {
    LayoutOptions {
        text_measurer: Arc::new(DeterministicTextMeasurer {
            char_width_factor: 1.0,
            line_height_factor: 1.0,
        }),
        config: LayoutConfig {
            word_font_size: 10.0,
            text_padding_x: 5.0,
            word_padding: 0.0,
            ..LayoutConfig::default()
        },
        arrange_attachments: false,
    }
}

// Five 50px words; at width 120 they sit in rows [a b] [c d] [e].
fn session(width: f64) -> LayoutSession {
    let input = DocumentInput {
        words: ["a", "b", "c", "d", "e"]
            .iter()
            .map(|k| WordInput::new(*k, "abcd"))
            .collect(),
        links: vec![
            LinkInput::new("outer", EndpointRef::word("a"), EndpointRef::word("e")),
            LinkInput::new("inner", EndpointRef::word("b"), EndpointRef::word("e")),
        ],
        clusters: Vec::new(),
    };
    LayoutSession::new(input, width, options()).unwrap()
}

#[test]
fn a_new_session_is_laid_out_immediately() {
    let s = session(120.0);
    assert_eq!(s.scene().rows.len(), 3);
    assert_eq!(s.scene().links.len(), 2);
    let max_slots: Vec<u32> = s.document().rows.iter().map(|r| r.max_slots).collect();
    assert_eq!(max_slots, vec![2, 2, 2]);
}

#[test]
fn malformed_input_is_reported_by_link_id() {
    let input = DocumentInput {
        words: vec![WordInput::new("a", "x")],
        links: vec![LinkInput::new(
            "dangling",
            EndpointRef::word("a"),
            EndpointRef::word("missing"),
        )],
        clusters: Vec::new(),
    };
    let err = LayoutSession::new(input, 100.0, options()).unwrap_err();
    assert!(matches!(
        err,
        SessionError::Model(Error::MalformedReference { ref link, .. }) if link == "dangling"
    ));
    assert_eq!(
        err.to_string(),
        "link `dangling` references unknown word `missing`"
    );
}

#[test]
fn canvas_resize_repacks_every_row() {
    let mut s = session(120.0);
    let scene = s.handle(LayoutEvent::CanvasResize { width: 1000.0 }).unwrap();
    assert_eq!(scene.rows.len(), 1);
    assert_eq!(scene.width, 1000.0);
    assert!(scene.links.iter().all(|l| l.segments.len() == 1));

    let scene = s.handle(LayoutEvent::CanvasResize { width: 120.0 }).unwrap();
    assert_eq!(scene.rows.len(), 3);
}

#[test]
fn row_resize_moves_the_rows_below() {
    let mut s = session(120.0);
    let before = s.scene().rows[1].rect.min_y();
    let scene = s
        .handle(LayoutEvent::RowResize {
            row: 0,
            height: 200.0,
        })
        .unwrap();
    assert_eq!(scene.rows[0].rect.size.height, 200.0);
    assert_eq!(scene.rows[1].rect.min_y(), 5.0 + 200.0);
    assert!(scene.rows[1].rect.min_y() > before);
}

#[test]
fn word_move_across_rows_updates_link_spans() {
    let mut s = session(120.0);
    let b = s.document().word_id("b").unwrap();
    s.handle(LayoutEvent::WordMove { word: b, x: 100.0 }).unwrap();

    let doc = s.document();
    assert_eq!(doc.word(b).unwrap().row, Some(1));
    doc.validate_rows().unwrap();
    let inner = doc.link_id("inner").unwrap();
    assert_eq!(doc.link_row_span(inner).unwrap().0, 1);
}

#[test]
fn attachment_moves_are_kept_across_layouts() {
    let mut s = session(120.0);
    let outer = s.document().link_id("outer").unwrap();
    s.handle(LayoutEvent::AttachmentMove {
        link: outer,
        end: LinkEnd::Left,
        x: 15.0,
    })
    .unwrap();
    s.handle(LayoutEvent::RecalculateSlots).unwrap();

    let link = s.document().link(outer).unwrap();
    assert_eq!(link.left_attach, Side::Left);
    assert_eq!(link.x1_percent, 0.2);
    let tip = s.scene().link(outer).unwrap().arrows[0].tip;
    assert_eq!(tip.x, 15.0);
}

#[test]
fn rejected_events_restore_the_previous_state() {
    let mut s = session(120.0);
    let before = s.scene().clone();
    let rows_before = s.document().rows.clone();

    let err = s
        .handle(LayoutEvent::RowResize {
            row: 42,
            height: 10.0,
        })
        .unwrap_err();
    assert_eq!(
        err,
        SessionError::Layout(lintel_render::Error::Model(Error::UnknownRow { row: 42 }))
    );
    assert_eq!(s.scene(), &before);
    assert_eq!(s.document().rows, rows_before);
}

#[test]
fn configure_applies_json_overrides_and_repacks() {
    let mut s = session(120.0);
    let before = s.scene().rows[0].rect.size.height;

    let overrides = ConfigOverrides::from_value(json!({
        "words": { "fontSize": 10, "textPaddingX": 5, "padding": 0 },
        "rows": { "levelPadding": 30 }
    }));
    let scene = s.handle(LayoutEvent::Configure { overrides }).unwrap();

    // Same packing as before; two slot levels at 10px more each.
    assert_eq!(scene.rows.len(), 3);
    assert_eq!(scene.rows[0].rect.size.height, before + 20.0);
    assert_eq!(s.options().config.level_padding, 30.0);
    assert_eq!(s.options().config.edge_padding, LayoutConfig::default().edge_padding);
}

#[test]
fn options_can_be_built_from_overrides() {
    let overrides = ConfigOverrides::from_value(json!({
        "words": { "fontSize": 10, "textPaddingX": 5, "padding": 0 },
        "links": { "slotCollision": "words" }
    }));
    let opts = options().with_overrides(&overrides);
    assert_eq!(opts.config.slot_collision, lintel::SlotCollision::Words);

    let input = DocumentInput {
        words: ["a", "b", "c", "d"]
            .iter()
            .map(|k| WordInput::new(*k, "abcd"))
            .collect(),
        links: vec![
            LinkInput::new("l1", EndpointRef::word("a"), EndpointRef::word("b")),
            LinkInput::new("l2", EndpointRef::word("c"), EndpointRef::word("d")),
        ],
        clusters: Vec::new(),
    };
    let s = LayoutSession::new(input, 1000.0, opts).unwrap();
    // Disjoint word intervals share a level even though they share the row.
    let levels: Vec<u32> = s.document().links.iter().map(|l| l.h).collect();
    assert_eq!(levels, vec![1, 1]);
}

#[test]
fn word_resize_moves_attachments_proportionally() {
    let mut s = session(1000.0);
    let b = s.document().word_id("b").unwrap();
    let inner = s.document().link_id("inner").unwrap();
    // b spans 60..110; the inner link leaves from the middle of its right half.
    assert_eq!(s.scene().link(inner).unwrap().arrows[0].tip.x, 97.5);

    s.handle(LayoutEvent::WordResize {
        word: b,
        edge: Side::Right,
        x: 150.0,
    })
    .unwrap();
    assert_eq!(s.scene().link(inner).unwrap().arrows[0].tip.x, 127.5);
    assert_eq!(s.scene().words[2].bbox.min_x(), 150.0);

    let scene = s.handle(LayoutEvent::CanvasResize { width: 1200.0 }).unwrap();
    assert_eq!(scene.words[1].bbox.size.width, 90.0);
}

#[test]
fn hiding_a_link_frees_its_slot() {
    let mut s = session(120.0);
    let inner = s.document().link_id("inner").unwrap();
    let before = s.scene().rows[0].rect.size.height;

    let scene = s
        .handle(LayoutEvent::SetLinkVisibility {
            link: inner,
            visible: false,
        })
        .unwrap();
    assert_eq!(scene.links.len(), 1);
    assert!(scene.link(inner).is_none());
    assert_eq!(scene.rows[0].rect.size.height, before - 20.0);
    assert_eq!(s.document().link(inner).unwrap().h, 0);

    let scene = s
        .handle(LayoutEvent::SetLinkVisibility {
            link: inner,
            visible: true,
        })
        .unwrap();
    assert_eq!(scene.links.len(), 2);
    assert_eq!(scene.rows[0].rect.size.height, before);
}

#[test]
fn clear_empties_the_scene() {
    let mut s = session(120.0);
    let scene = s.handle(LayoutEvent::Clear).unwrap();
    assert!(scene.rows.is_empty());
    assert!(scene.words.is_empty());
    assert!(scene.links.is_empty());
    assert!(s.document().words.is_empty());
}

#[test]
fn sessions_accept_json_input_and_emit_json_scenes() {
    let input: DocumentInput = serde_json::from_value(serde_json::json!({
        "words": [{ "id": "w1", "text": "cats" }, { "id": "w2", "text": "purr" }],
        "links": [{
            "id": "nsubj",
            "left": { "word": "w2" },
            "right": { "word": "w1" },
            "direction": "backward",
            "label": "nsubj"
        }]
    }))
    .unwrap();
    let s = LayoutSession::new(input, 500.0, options()).unwrap();

    let value = serde_json::to_value(s.scene()).unwrap();
    assert_eq!(value["links"][0]["key"], "nsubj");
    assert_eq!(value["links"][0]["labels"][0]["text"], "nsubj");
    assert_eq!(value["words"].as_array().map(Vec::len), Some(2));
}
