//! Row packing, vertical stacking and interactive word moves.

use crate::Result;
use crate::text::{TextMeasurer, TextStyle};
use lintel_core::geom::{rect, size};
use lintel_core::{Document, Error, LayoutConfig, Row, Side, WordId};

/// Where a moved word ended up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    InRow,
    NextRow,
    PreviousRow,
}

/// Measures every word and fills rows greedily from the left edge.
///
/// Any existing rows are dropped, including their height overrides. Vertical placement is left
/// to [`finalize_rows`], which needs slot levels first.
pub fn pack_rows(doc: &mut Document, measurer: &dyn TextMeasurer, cfg: &LayoutConfig) {
    let style = TextStyle::sized(cfg.word_font_size);
    let canvas_width = doc.canvas_width;
    let mut rows: Vec<Row> = Vec::new();
    let mut x = cfg.edge_padding;

    for (id, word) in doc.word_ids().zip(doc.words.iter_mut()) {
        let m = measurer.measure(&word.text, &style);
        let min_width = m.width + cfg.text_padding_x * 2.0;
        let ww = word.width_override.map_or(min_width, |w| w.max(min_width));
        let wh = cfg.word_box_height(m.height);

        let wraps = x + ww + cfg.edge_padding > canvas_width;
        if rows.is_empty() || wraps {
            rows.push(Row::new(rows.len()));
            x = cfg.edge_padding;
        }
        let idx = rows.len() - 1;
        rows[idx].words.push(id);

        word.text_size = size(m.width, m.height);
        word.bbox = rect(x, 0.0, ww, wh);
        word.row = Some(idx);
        x += ww + cfg.word_padding;
    }

    tracing::debug!(
        words = doc.words.len(),
        rows = rows.len(),
        canvas_width,
        "packed rows"
    );
    doc.rows = rows;
}

fn word_text_height(doc: &Document) -> f64 {
    doc.words
        .iter()
        .map(|w| w.text_size.height)
        .fold(0.0, f64::max)
}

/// Stacks rows top to bottom and drops every word onto its row's baseline.
///
/// Must run after slot assignment: row heights depend on `max_slots`.
pub fn finalize_rows(doc: &mut Document, cfg: &LayoutConfig) {
    let th = word_text_height(doc);
    let wh = cfg.word_box_height(th);
    let min_height = cfg.base_row_height(th);

    let mut ry = cfg.top_margin;
    for row in &mut doc.rows {
        row.ry = ry;
        row.rh = match row.height_override {
            Some(h) => h.max(min_height),
            None => cfg.row_height(th, row.max_slots),
        };
        row.base_height = row.ry + row.rh - wh;
        for id in &row.words {
            if let Some(word) = doc.words.get_mut(id.index()) {
                word.bbox.origin.y = row.base_height;
                word.bbox.size.height = wh;
            }
        }
        ry = row.bottom();
    }
    tracing::debug!(rows = doc.rows.len(), height = ry, "finalized rows");
}

/// Pins a row to `height`, never below the height of a row without links.
pub fn resize_row(doc: &mut Document, row: usize, height: f64, cfg: &LayoutConfig) -> Result<()> {
    let min_height = cfg.base_row_height(word_text_height(doc));
    let target = doc.rows.get_mut(row).ok_or(Error::UnknownRow { row })?;
    target.height_override = Some(height.max(min_height));
    tracing::debug!(row, height, "row resized");
    Ok(())
}

fn bounds(doc: &Document, cfg: &LayoutConfig) -> (f64, f64) {
    (cfg.edge_padding, doc.canvas_width - cfg.edge_padding)
}

fn extent(doc: &Document, id: WordId) -> Result<(f64, f64)> {
    let word = doc.word(id).ok_or(Error::UnknownWord(id))?;
    Ok((word.left_x(), word.width()))
}

fn set_x(doc: &mut Document, id: WordId, x: f64) -> Result<()> {
    let word = doc.word_mut(id).ok_or(Error::UnknownWord(id))?;
    word.bbox.origin.x = x;
    Ok(())
}

/// Pushes words right, starting at `from`, until each clears its left neighbour.
fn settle_forward(doc: &mut Document, row: usize, from: usize, cfg: &LayoutConfig) -> Result<()> {
    let words = doc.rows[row].words.clone();
    for i in from.max(1)..words.len() {
        let (px, pw) = extent(doc, words[i - 1])?;
        let (x, _) = extent(doc, words[i])?;
        let min_x = px + pw + cfg.word_padding;
        if x < min_x {
            set_x(doc, words[i], min_x)?;
        }
    }
    Ok(())
}

/// Pushes the words left of `pos` leftwards so none overlaps its right neighbour.
fn settle_backward(doc: &mut Document, row: usize, pos: usize, cfg: &LayoutConfig) -> Result<()> {
    let words = doc.rows[row].words.clone();
    for i in (0..pos).rev() {
        let (nx, _) = extent(doc, words[i + 1])?;
        let (x, w) = extent(doc, words[i])?;
        let max_x = nx - cfg.word_padding - w;
        if x > max_x {
            set_x(doc, words[i], max_x)?;
        }
    }
    Ok(())
}

/// Moves trailing words that cross the right bound into the next row, cascading downwards.
fn spill_overflow(doc: &mut Document, from_row: usize, cfg: &LayoutConfig) -> Result<()> {
    let (left_bound, right_bound) = bounds(doc, cfg);
    let mut r = from_row;
    while r < doc.rows.len() {
        let mut spilled = Vec::new();
        while doc.rows[r].words.len() > 1 {
            let Some(&last) = doc.rows[r].words.last() else {
                break;
            };
            let (x, w) = extent(doc, last)?;
            if x + w <= right_bound {
                break;
            }
            doc.rows[r].words.pop();
            spilled.push(last);
        }
        if spilled.is_empty() {
            break;
        }
        spilled.reverse();
        tracing::trace!(row = r, count = spilled.len(), "spilling words");

        if r + 1 == doc.rows.len() {
            doc.rows.push(Row::new(r + 1));
        }
        for id in &spilled {
            set_x(doc, *id, left_bound)?;
        }
        doc.rows[r + 1].words.splice(0..0, spilled);
        settle_forward(doc, r + 1, 1, cfg)?;
        r += 1;
    }
    Ok(())
}

fn drop_empty_rows(doc: &mut Document) {
    let before = doc.rows.len();
    doc.rows.retain(|row| !row.words.is_empty());
    if doc.rows.len() != before {
        tracing::debug!(removed = before - doc.rows.len(), "dropped empty rows");
    }
    doc.reindex_rows();
}

/// Drags `word` so its left edge lands at `x`.
///
/// Neighbours in the same row are pushed out of the way. The last word of a row dragged past
/// the right bound moves to the front of the next row; the first word dragged past the left
/// bound moves to the end of the previous row when there is room for it.
pub fn move_word(doc: &mut Document, word: WordId, x: f64, cfg: &LayoutConfig) -> Result<MoveOutcome> {
    let row_idx = doc.row_of(word)?;
    let (left_bound, right_bound) = bounds(doc, cfg);
    let (_, ww) = extent(doc, word)?;
    let pos = doc.rows[row_idx]
        .words
        .iter()
        .position(|w| *w == word)
        .ok_or_else(|| Error::UnplacedWord {
            word: word.to_string(),
        })?;
    let len = doc.rows[row_idx].words.len();

    let outcome = if pos + 1 == len && x + ww > right_bound {
        doc.rows[row_idx].words.remove(pos);
        if row_idx + 1 == doc.rows.len() {
            doc.rows.push(Row::new(row_idx + 1));
        }
        doc.rows[row_idx + 1].words.insert(0, word);
        set_x(doc, word, left_bound)?;
        settle_forward(doc, row_idx + 1, 1, cfg)?;
        spill_overflow(doc, row_idx + 1, cfg)?;
        MoveOutcome::NextRow
    } else if pos == 0 && x < left_bound && row_idx > 0 && fits_after_last(doc, row_idx - 1, ww, cfg)? {
        doc.rows[row_idx].words.remove(0);
        doc.rows[row_idx - 1].words.push(word);
        set_x(doc, word, right_bound - ww)?;
        MoveOutcome::PreviousRow
    } else {
        let clamped = x.max(left_bound).min((right_bound - ww).max(left_bound));
        set_x(doc, word, clamped)?;
        settle_backward(doc, row_idx, pos, cfg)?;
        if let Some(&first) = doc.rows[row_idx].words.first() {
            let (fx, _) = extent(doc, first)?;
            if fx < left_bound {
                set_x(doc, first, left_bound)?;
            }
        }
        settle_forward(doc, row_idx, 1, cfg)?;
        spill_overflow(doc, row_idx, cfg)?;
        MoveOutcome::InRow
    };

    drop_empty_rows(doc);
    tracing::debug!(%word, x, ?outcome, "moved word");
    Ok(outcome)
}

/// Drags one edge of `word` to `x`, keeping the box at least as wide as its padded text.
///
/// The width sticks to the word through later moves and repacks. Neighbours are pushed away
/// from the dragged edge and trailing words spill into the next row as in [`move_word`].
pub fn resize_word(
    doc: &mut Document,
    word: WordId,
    edge: Side,
    x: f64,
    cfg: &LayoutConfig,
) -> Result<()> {
    let row_idx = doc.row_of(word)?;
    let (left_bound, right_bound) = bounds(doc, cfg);
    let pos = doc.rows[row_idx]
        .words
        .iter()
        .position(|w| *w == word)
        .ok_or_else(|| Error::UnplacedWord {
            word: word.to_string(),
        })?;

    let target = doc.word_mut(word).ok_or(Error::UnknownWord(word))?;
    let min_width = target.text_size.width + cfg.text_padding_x * 2.0;
    let (left, right) = (target.left_x(), target.right_x());
    let (new_left, new_right) = match edge {
        Side::Left => (x.max(left_bound).min(right - min_width), right),
        Side::Right => (left, x.min(right_bound).max(left + min_width)),
    };
    target.bbox.origin.x = new_left;
    target.bbox.size.width = new_right - new_left;
    target.width_override = Some(new_right - new_left);

    match edge {
        Side::Left => {
            settle_backward(doc, row_idx, pos, cfg)?;
            if let Some(&first) = doc.rows[row_idx].words.first() {
                let (fx, _) = extent(doc, first)?;
                if fx < left_bound {
                    set_x(doc, first, left_bound)?;
                }
            }
            settle_forward(doc, row_idx, 1, cfg)?;
        }
        Side::Right => settle_forward(doc, row_idx, pos + 1, cfg)?,
    }
    spill_overflow(doc, row_idx, cfg)?;
    drop_empty_rows(doc);
    tracing::debug!(%word, ?edge, x, width = new_right - new_left, "resized word");
    Ok(())
}

fn fits_after_last(doc: &Document, row: usize, ww: f64, cfg: &LayoutConfig) -> Result<bool> {
    let (_, right_bound) = bounds(doc, cfg);
    let Some(&last) = doc.rows[row].words.last() else {
        return Ok(true);
    };
    let (x, w) = extent(doc, last)?;
    Ok(x + w + cfg.word_padding <= right_bound - ww)
}
