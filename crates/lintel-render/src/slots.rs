//! Slot (level) assignment for links.
//!
//! Links are coloured first-fit over their span intervals: shorter links are placed first and
//! take the lowest level above their anchors that no colliding link already holds.

use crate::Result;
use lintel_core::{Document, Error, LayoutConfig, LinkId, SlotCollision};
use rustc_hash::FxHashSet;

#[derive(Debug, Clone, Copy)]
struct Span {
    id: LinkId,
    rows: (usize, usize),
    words: (usize, usize),
    depth: usize,
}

impl Span {
    fn collides(&self, other: &Span, policy: SlotCollision) -> bool {
        let (a, b) = match policy {
            SlotCollision::Rows => (self.rows, other.rows),
            SlotCollision::Words => (self.words, other.words),
        };
        a.0 <= b.1 && b.0 <= a.1
    }
}

/// Assigns every link a level `h >= 1` and every row its `max_slots`.
///
/// Previous levels are discarded first; links that are not shown keep `h == 0` and do not
/// count towards `max_slots`. Requires rows to be packed.
pub fn assign_slots(doc: &mut Document, cfg: &LayoutConfig) -> Result<()> {
    for link in &mut doc.links {
        link.h = 0;
    }
    for row in &mut doc.rows {
        row.max_slots = 0;
    }

    let mut spans = Vec::with_capacity(doc.links.len());
    for id in doc.link_ids().filter(|id| doc.is_link_shown(*id)) {
        let link = doc.link(id).ok_or(Error::UnknownLink(id))?;
        spans.push(Span {
            id,
            rows: doc.link_row_span(id)?,
            words: doc.link_word_span(id)?,
            depth: link.depth,
        });
    }
    // A link's word span contains the spans of the links it is anchored to, and ties are
    // broken by depth, so anchors are always placed before their dependents.
    spans.sort_by_key(|s| (s.words.1 - s.words.0, s.depth, s.rows.0, s.id));

    let policy = cfg.slot_collision;
    let mut placed: Vec<(Span, u32)> = Vec::with_capacity(spans.len());
    for span in spans {
        let link = doc.link(span.id).ok_or(Error::UnknownLink(span.id))?;
        let min_level = 1 + link.left.level(doc).max(link.right.level(doc));

        let taken: FxHashSet<u32> = placed
            .iter()
            .filter(|(other, _)| span.collides(other, policy))
            .map(|(_, h)| *h)
            .collect();
        let mut h = min_level;
        while taken.contains(&h) {
            h += 1;
        }
        tracing::trace!(link = %link.key, h, min_level, "assigned slot");

        if let Some(link) = doc.link_mut(span.id) {
            link.h = h;
        }
        for row in doc.rows.iter_mut().take(span.rows.1 + 1).skip(span.rows.0) {
            row.max_slots = row.max_slots.max(h);
        }
        placed.push((span, h));
    }

    tracing::debug!(
        links = placed.len(),
        max_level = placed.iter().map(|(_, h)| *h).max().unwrap_or(0),
        "assigned slots"
    );
    Ok(())
}
