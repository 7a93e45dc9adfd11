//! Link routing: one polyline per row a link spans.

use crate::Result;
use crate::attach::{anchor_bounds, resolve_x};
use crate::scene::{ArrowKind, ArrowShape, LabelShape, LinkShape, Marker, Parity, SegmentShape};
use crate::stroke::segment_paints;
use crate::text::{TextMeasurer, TextStyle};
use lintel_core::geom::{Point, point, rect};
use lintel_core::{
    Anchor, Direction, Document, Error, LayoutConfig, LinkEnd, LinkId, Row, SegmentBounds,
};
use serde::Serialize;

/// Position of a segment within its link.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum SegmentKind {
    /// Row of the leftmost endpoint; runs off the right edge.
    First,
    /// Row the link only passes through.
    Middle,
    /// Row of the rightmost endpoint; enters from the left edge.
    Last,
    /// Both endpoints in one row.
    Single,
}

/// Vertical distance between neighbouring slot levels in `row`.
pub fn percentage_padding(row: &Row) -> f64 {
    (row.base_height - row.ry) / f64::from(row.max_slots + 1)
}

/// Arrowhead kinds for the (left, right) end of a link.
pub fn arrow_kinds(direction: Direction) -> (ArrowKind, ArrowKind) {
    match direction {
        Direction::Forward => (ArrowKind::Up, ArrowKind::Down),
        Direction::Backward => (ArrowKind::Down, ArrowKind::Up),
        Direction::Both => (ArrowKind::Down, ArrowKind::Down),
        Direction::None => (ArrowKind::Up, ArrowKind::Up),
    }
}

fn level_y(row: &Row, level: u32) -> f64 {
    row.base_height - f64::from(level) * percentage_padding(row)
}

fn reading_order(doc: &Document, anchor: Anchor) -> usize {
    match anchor {
        Anchor::Word(id) => doc.word(id).map(|w| w.order),
        Anchor::Link(id) => doc
            .link(id)
            .and_then(|l| doc.word(l.root_min_word))
            .map(|w| w.order),
    }
    .unwrap_or(0)
}

fn marker(kind: ArrowKind, tip: Point, cfg: &LayoutConfig) -> Marker {
    match kind {
        ArrowKind::Down => Marker::Triangle {
            points: [
                tip,
                point(tip.x - cfg.arrow_width, tip.y - cfg.arrow_height),
                point(tip.x, tip.y - cfg.arrow_mid_height),
                point(tip.x + cfg.arrow_width, tip.y - cfg.arrow_height),
            ],
        },
        ArrowKind::Up => Marker::Circle {
            center: point(tip.x, tip.y - cfg.marker_offset),
            radius: cfg.marker_radius,
        },
    }
}

struct Endpoint {
    end: LinkEnd,
    kind: ArrowKind,
    x: f64,
    level: u32,
}

/// Routes one link against the current rows and slot levels.
///
/// The end whose anchor comes first in reading order is drawn in the first row of the span.
/// Links this one is anchored to must already carry their routed `lines`.
pub fn route_link(
    doc: &Document,
    id: LinkId,
    cfg: &LayoutConfig,
    measurer: &dyn TextMeasurer,
) -> Result<LinkShape> {
    let link = doc.link(id).ok_or(Error::UnknownLink(id))?;
    let (min_row, max_row) = doc.link_row_span(id)?;
    let xs = resolve_x(doc, id)?;
    let (left_kind, right_kind) = arrow_kinds(link.direction);

    let mut ends = [
        Endpoint {
            end: LinkEnd::Left,
            kind: left_kind,
            x: xs.left,
            level: link.left.level(doc),
        },
        Endpoint {
            end: LinkEnd::Right,
            kind: right_kind,
            x: xs.right,
            level: link.right.level(doc),
        },
    ];
    if reading_order(doc, link.right) < reading_order(doc, link.left) {
        ends.swap(0, 1);
    }
    let [lo, hi] = &ends;

    let width = doc.canvas_width;
    let count = max_row - min_row + 1;
    let paints = segment_paints(
        &format!("lintel-gradient-{}", id.index()),
        &link.style,
        count,
        cfg.gradient_overshoot,
    );
    let label_style = TextStyle::sized(cfg.link_font_size);

    let mut segments = Vec::with_capacity(count);
    let mut arrows = Vec::new();
    let mut labels = Vec::new();

    for (paint, r) in paints.into_iter().zip(min_row..=max_row) {
        let row = doc.row(r)?;
        let pp = percentage_padding(row);
        let y = row.base_height - f64::from(link.h) * pp;
        let kind = match (r == min_row, r == max_row) {
            (true, true) => SegmentKind::Single,
            (true, false) => SegmentKind::First,
            (false, true) => SegmentKind::Last,
            (false, false) => SegmentKind::Middle,
        };

        let (points, left_x, right_x) = match kind {
            SegmentKind::First => (
                vec![point(lo.x, level_y(row, lo.level)), point(lo.x, y), point(width, y)],
                lo.x,
                width,
            ),
            SegmentKind::Middle => {
                let lead = cfg.middle_lead_offset;
                (
                    vec![point(-lead, y - lead), point(0.0, y), point(width, y)],
                    0.0,
                    width,
                )
            }
            SegmentKind::Last => (
                vec![point(0.0, y), point(hi.x, y), point(hi.x, level_y(row, hi.level))],
                0.0,
                hi.x,
            ),
            SegmentKind::Single => (
                vec![
                    point(lo.x, level_y(row, lo.level)),
                    point(lo.x, y),
                    point(hi.x, y),
                    point(hi.x, level_y(row, hi.level)),
                ],
                lo.x,
                hi.x,
            ),
        };

        let visible = pp >= cfg.hide_percentage;
        tracing::trace!(link = %link.key, row = r, ?kind, pp, visible, "routed segment");

        if visible {
            let mut at = |e: &Endpoint| -> Result<()> {
                let tip = point(e.x, level_y(row, e.level));
                let (anchor_left_x, anchor_right_x) = anchor_bounds(doc, id, e.end)?;
                arrows.push(ArrowShape {
                    end: e.end,
                    kind: e.kind,
                    tip,
                    marker: marker(e.kind, tip, cfg),
                    anchor_left_x,
                    anchor_right_x,
                });
                Ok(())
            };
            if matches!(kind, SegmentKind::First | SegmentKind::Single) {
                at(lo)?;
            }
            if matches!(kind, SegmentKind::Last | SegmentKind::Single) {
                at(hi)?;
            }
        }

        let label = link
            .label
            .as_deref()
            .filter(|_| pp >= cfg.label_hide_percentage);
        if let Some(text) = label {
            let m = measurer.measure(text, &label_style);
            let mid = (left_x + right_x) / 2.0;
            let origin = point(mid - m.width / 2.0, y - m.height / 2.0);
            labels.push(LabelShape {
                text: text.to_string(),
                kind,
                rect: rect(
                    origin.x - cfg.label_padding_x,
                    origin.y,
                    m.width + cfg.label_padding_x * 2.0,
                    m.height,
                ),
                text_origin: origin,
                parity: Parity::of_row(r),
            });
        }

        let (style, gradient) = if visible {
            (paint.style, paint.gradient)
        } else {
            (cfg.hidden_stroke.clone(), None)
        };
        segments.push(SegmentShape {
            row: r,
            kind,
            points,
            left_x,
            right_x,
            percentage_padding: pp,
            visible,
            style,
            gradient,
        });
    }

    Ok(LinkShape {
        id,
        key: link.key.clone(),
        level: link.h,
        segments,
        arrows,
        labels,
    })
}

/// Routes every link, anchors before dependents, and records each link's segment bounds.
///
/// Shapes are returned in document order.
pub fn route_links(
    doc: &mut Document,
    cfg: &LayoutConfig,
    measurer: &dyn TextMeasurer,
) -> Result<Vec<LinkShape>> {
    for link in &mut doc.links {
        link.lines.clear();
    }

    let mut shapes = Vec::with_capacity(doc.links.len());
    for id in doc.links_in_dependency_order() {
        if !doc.is_link_shown(id) {
            continue;
        }
        let shape = route_link(doc, id, cfg, measurer)?;
        if let Some(link) = doc.link_mut(id) {
            link.lines = shape
                .segments
                .iter()
                .map(|s| SegmentBounds {
                    row: s.row,
                    left_x: s.left_x,
                    right_x: s.right_x,
                })
                .collect();
        }
        shapes.push(shape);
    }
    shapes.sort_by_key(|s| s.id);

    tracing::debug!(links = shapes.len(), "routed links");
    Ok(shapes)
}
