//! Horizontal attachment points of link ends.
//!
//! An end stores a side and a percentage instead of an absolute x, so it keeps its relative
//! position when the anchor is moved or resized.

use crate::{Error, Result};
use lintel_core::{Anchor, Document, LinkEnd, LinkId, Side};
use rustc_hash::FxHashMap;

/// Resolved x of both ends of a link.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AttachX {
    pub left: f64,
    pub right: f64,
}

/// `p = 0` is the edge of the chosen side; `p = 1` is the centre of the anchor.
pub fn interpolate((left, right): (f64, f64), side: Side, percent: f64) -> f64 {
    let half = (right - left) / 2.0;
    match side {
        Side::Left => left + percent * half,
        Side::Right => right - percent * half,
    }
}

fn anchor_name(doc: &Document, anchor: Anchor) -> String {
    match anchor {
        Anchor::Word(id) => doc.word(id).map(|w| w.key.clone()),
        Anchor::Link(id) => doc.link(id).map(|l| l.key.clone()),
    }
    .unwrap_or_else(|| match anchor {
        Anchor::Word(id) => id.to_string(),
        Anchor::Link(id) => id.to_string(),
    })
}

/// Bounds the given end interpolates within, for the side it is currently attached to.
pub fn anchor_bounds(doc: &Document, link: LinkId, end: LinkEnd) -> Result<(f64, f64)> {
    let l = doc.link(link).ok_or(lintel_core::Error::UnknownLink(link))?;
    let (side, _) = l.attach(end);
    side_bounds(doc, link, end, side)
}

fn side_bounds(doc: &Document, link: LinkId, end: LinkEnd, side: Side) -> Result<(f64, f64)> {
    let l = doc.link(link).ok_or(lintel_core::Error::UnknownLink(link))?;
    let anchor = l.anchor(end);
    anchor
        .attachment_bounds(doc, side)
        .ok_or_else(|| Error::UnroutedAnchor {
            link: l.key.clone(),
            anchor: anchor_name(doc, anchor),
        })
}

/// Resolves both ends. Link anchors must have been routed already.
pub fn resolve_x(doc: &Document, link: LinkId) -> Result<AttachX> {
    let l = doc.link(link).ok_or(lintel_core::Error::UnknownLink(link))?;
    let mut xs = [0.0; 2];
    for (slot, end) in xs.iter_mut().zip([LinkEnd::Left, LinkEnd::Right]) {
        let (side, percent) = l.attach(end);
        *slot = interpolate(anchor_bounds(doc, link, end)?, side, percent);
    }
    Ok(AttachX {
        left: xs[0],
        right: xs[1],
    })
}

/// Stores a dragged end position as side + percentage of its anchor.
///
/// The side is whichever half of the anchor `x` falls in; the percentage is clamped to
/// `[0, 1]`, so dropping an end outside its anchor snaps it to the nearest edge.
pub fn reattach(doc: &mut Document, link: LinkId, end: LinkEnd, x: f64) -> Result<()> {
    let (left, right) = anchor_bounds(doc, link, end)?;
    let side = if x < (left + right) / 2.0 {
        Side::Left
    } else {
        Side::Right
    };
    let (left, right) = side_bounds(doc, link, end, side)?;
    let half = (right - left) / 2.0;
    let percent = if half > 0.0 {
        let raw = match side {
            Side::Left => (x - left) / half,
            Side::Right => (right - x) / half,
        };
        raw.clamp(0.0, 1.0)
    } else {
        0.0
    };

    let l = doc
        .link_mut(link)
        .ok_or(lintel_core::Error::UnknownLink(link))?;
    l.set_attach(end, side, percent);
    tracing::debug!(link = %l.key, ?end, ?side, percent, "reattached link end");
    Ok(())
}

/// Spreads the ends that share an anchor side so they do not start from the same pixel.
///
/// Within a group the shortest link sits closest to the anchor centre: the k-th of n ends
/// gets `(n - k) / (n + 1)`.
pub fn arrange_attachment_offsets(doc: &mut Document) -> Result<()> {
    let mut groups: FxHashMap<(Anchor, Side), Vec<(usize, LinkId, LinkEnd)>> =
        FxHashMap::default();
    for id in doc.link_ids() {
        let (lo, hi) = doc.link_word_span(id)?;
        let Some(link) = doc.link(id) else {
            continue;
        };
        for end in [LinkEnd::Left, LinkEnd::Right] {
            let (side, _) = link.attach(end);
            groups
                .entry((link.anchor(end), side))
                .or_default()
                .push((hi - lo, id, end));
        }
    }

    for (_, mut ends) in groups {
        if ends.len() < 2 {
            continue;
        }
        ends.sort_by_key(|(width, id, _)| (*width, *id));
        let n = ends.len() as f64;
        for (k, (_, id, end)) in ends.into_iter().enumerate() {
            if let Some(link) = doc.link_mut(id) {
                let (side, _) = link.attach(end);
                link.set_attach(end, side, (n - k as f64) / (n + 1.0));
            }
        }
    }
    Ok(())
}
