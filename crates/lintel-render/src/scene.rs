//! Draw-ready output handed to the rendering collaborator.
//!
//! Everything here is plain geometry plus style strings; no SVG or toolkit types.

use crate::route::SegmentKind;
use lintel_core::geom::{Line, Point, Rect, point, rect};
use lintel_core::{Color, Document, LayoutConfig, LinkEnd, LinkId, WordId};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Parity {
    Even,
    Odd,
}

impl Parity {
    pub fn of_row(idx: usize) -> Self {
        if idx % 2 == 0 { Self::Even } else { Self::Odd }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Scene {
    pub width: f64,
    pub height: f64,
    pub rows: Vec<RowShape>,
    pub words: Vec<WordShape>,
    pub links: Vec<LinkShape>,
    pub clusters: Vec<ClusterShape>,
}

impl Scene {
    pub fn link(&self, id: LinkId) -> Option<&LinkShape> {
        self.links.iter().find(|l| l.id == id)
    }

    pub fn word(&self, id: WordId) -> Option<&WordShape> {
        self.words.iter().find(|w| w.id == id)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RowShape {
    pub idx: usize,
    pub rect: Rect,
    pub top_line: Line,
    pub bottom_line: Line,
    /// Square in the bottom-right corner used to drag the row height.
    pub resize_handle: Rect,
    pub parity: Parity,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WordShape {
    pub id: WordId,
    pub key: String,
    pub text: String,
    pub bbox: Rect,
    /// Top-left of the text, centred in the box.
    pub text_origin: Point,
    pub left_handle: Rect,
    pub right_handle: Rect,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SegmentGradient {
    pub id: String,
    pub from: Color,
    pub to: Color,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SegmentShape {
    pub row: usize,
    pub kind: SegmentKind,
    pub points: Vec<Point>,
    /// Horizontal extent other links attach within.
    pub left_x: f64,
    pub right_x: f64,
    /// Per-level spacing available in this row.
    pub percentage_padding: f64,
    pub visible: bool,
    /// CSS for the polyline: the link's stroke, or the hidden placeholder.
    pub style: String,
    pub gradient: Option<SegmentGradient>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ArrowKind {
    Up,
    Down,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "shape", rename_all = "camelCase")]
pub enum Marker {
    /// Closed path: tip, left barb, notch, right barb.
    Triangle { points: [Point; 4] },
    Circle { center: Point, radius: f64 },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ArrowShape {
    pub end: LinkEnd,
    pub kind: ArrowKind,
    pub tip: Point,
    pub marker: Marker,
    /// Bounds of the anchor this end is attached to, for drag-to-reattach.
    pub anchor_left_x: f64,
    pub anchor_right_x: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LabelShape {
    pub text: String,
    pub kind: SegmentKind,
    pub rect: Rect,
    pub text_origin: Point,
    pub parity: Parity,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkShape {
    pub id: LinkId,
    pub key: String,
    pub level: u32,
    pub segments: Vec<SegmentShape>,
    pub arrows: Vec<ArrowShape>,
    pub labels: Vec<LabelShape>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClusterShape {
    pub key: String,
    pub label: String,
    /// One box per row the member words occupy.
    pub brackets: Vec<Rect>,
}

pub(crate) fn build_scene(doc: &Document, cfg: &LayoutConfig, links: Vec<LinkShape>) -> Scene {
    let width = doc.canvas_width;
    let rows = doc
        .rows
        .iter()
        .map(|row| {
            let side = cfg.row_handle_side;
            let inset = side + cfg.row_handle_margin;
            RowShape {
                idx: row.idx,
                rect: rect(0.0, row.ry, width, row.rh),
                top_line: Line::horizontal(0.0, width, row.ry),
                bottom_line: Line::horizontal(0.0, width, row.bottom()),
                resize_handle: rect(width - inset, row.bottom() - inset, side, side),
                parity: Parity::of_row(row.idx),
            }
        })
        .collect();

    let words = doc
        .word_ids()
        .filter_map(|id| doc.word(id).map(|w| (id, w)))
        .map(|(id, w)| {
            let b = w.bbox;
            let handle_y = b.min_y() + b.size.height / 2.0 - cfg.handle_height / 2.0;
            WordShape {
                id,
                key: w.key.clone(),
                text: w.text.clone(),
                bbox: b,
                text_origin: point(
                    b.min_x() + b.size.width / 2.0 - w.text_size.width / 2.0,
                    b.min_y() + cfg.text_padding_y,
                ),
                left_handle: rect(b.min_x(), handle_y, cfg.handle_width, cfg.handle_height),
                right_handle: rect(
                    b.max_x() - cfg.handle_width,
                    handle_y,
                    cfg.handle_width,
                    cfg.handle_height,
                ),
            }
        })
        .collect();

    let clusters = doc
        .clusters
        .iter()
        .map(|c| ClusterShape {
            key: c.key.clone(),
            label: c.label.clone(),
            brackets: cluster_brackets(doc, c),
        })
        .collect();

    let height = doc
        .rows
        .last()
        .map(|r| r.bottom())
        .unwrap_or(cfg.top_margin);

    Scene {
        width,
        height,
        rows,
        words,
        links,
        clusters,
    }
}

fn cluster_brackets(doc: &Document, cluster: &lintel_core::Cluster) -> Vec<Rect> {
    use lintel_core::Anchor;
    use std::collections::BTreeMap;

    let mut per_row: BTreeMap<usize, (f64, f64, f64, f64)> = BTreeMap::new();
    let mut add = |id: WordId| {
        let Some(w) = doc.word(id) else {
            return;
        };
        let Some(row) = w.row else {
            return;
        };
        let b = w.bbox;
        per_row
            .entry(row)
            .and_modify(|e| {
                e.0 = e.0.min(b.min_x());
                e.1 = e.1.max(b.max_x());
            })
            .or_insert((b.min_x(), b.max_x(), b.min_y(), b.size.height));
    };
    for m in &cluster.members {
        match *m {
            Anchor::Word(id) => add(id),
            Anchor::Link(id) => {
                if let Some(l) = doc.link(id) {
                    add(l.root_min_word);
                    add(l.root_max_word);
                }
            }
        }
    }
    per_row
        .into_values()
        .map(|(x1, x2, y, h)| rect(x1, y, x2 - x1, h))
        .collect()
}
