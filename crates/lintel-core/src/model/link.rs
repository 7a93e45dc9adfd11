use crate::ids::{LinkId, WordId};
use crate::model::document::Document;
use crate::model::style::LinkStyle;
use serde::{Deserialize, Serialize};

/// Which half of an anchor an attachment point lives in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Side {
    #[default]
    Left,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Direction {
    #[default]
    Forward,
    Backward,
    Both,
    None,
}

/// One of the two ends of a link.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum LinkEnd {
    Left,
    Right,
}

/// What a link end is attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "kind", content = "id", rename_all = "camelCase")]
pub enum Anchor {
    Word(WordId),
    Link(LinkId),
}

impl Anchor {
    /// Slot level the attachment point sits at: 0 for words, the link's own level otherwise.
    pub fn level(self, doc: &Document) -> u32 {
        match self {
            Self::Word(id) => doc.word(id).map(|w| w.level()).unwrap_or(0),
            Self::Link(id) => doc.link(id).map(|l| l.h).unwrap_or(0),
        }
    }

    /// Left/right x bounds an attachment on `side` interpolates within.
    ///
    /// For a link anchor this is its first drawn segment when `side` is left and its last one
    /// when `side` is right. Returns `None` when the anchor link has not been routed yet.
    pub fn attachment_bounds(self, doc: &Document, side: Side) -> Option<(f64, f64)> {
        match self {
            Self::Word(id) => {
                let word = doc.word(id)?;
                Some((word.left_x(), word.right_x()))
            }
            Self::Link(id) => {
                let link = doc.link(id)?;
                let seg = match side {
                    Side::Left => link.lines.first(),
                    Side::Right => link.lines.last(),
                }?;
                Some((seg.left_x, seg.right_x))
            }
        }
    }
}

/// Horizontal extent of one drawn segment of a link.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SegmentBounds {
    pub row: usize,
    pub left_x: f64,
    pub right_x: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Link {
    pub key: String,
    pub left: Anchor,
    pub right: Anchor,
    pub direction: Direction,
    pub left_attach: Side,
    pub right_attach: Side,
    /// Offset within the left anchor's half-width, in `[0, 1]`.
    pub x1_percent: f64,
    /// Offset within the right anchor's half-width, in `[0, 1]`.
    pub x2_percent: f64,
    pub style: LinkStyle,
    pub label: Option<String>,
    /// Hidden links take no slot and are not routed; neither are links anchored to them.
    pub visible: bool,
    /// Leftmost word reachable through the anchor chain.
    pub root_min_word: WordId,
    /// Rightmost word reachable through the anchor chain.
    pub root_max_word: WordId,
    /// Number of link hops to the deepest word below this link (1 for word-to-word links).
    pub depth: usize,
    /// Assigned slot level; 0 until the slot assigner has run.
    pub h: u32,
    /// Segments of the most recent routing, first row first.
    pub lines: Vec<SegmentBounds>,
}

impl Link {
    pub fn anchor(&self, end: LinkEnd) -> Anchor {
        match end {
            LinkEnd::Left => self.left,
            LinkEnd::Right => self.right,
        }
    }

    pub fn attach(&self, end: LinkEnd) -> (Side, f64) {
        match end {
            LinkEnd::Left => (self.left_attach, self.x1_percent),
            LinkEnd::Right => (self.right_attach, self.x2_percent),
        }
    }

    pub fn set_attach(&mut self, end: LinkEnd, side: Side, percent: f64) {
        match end {
            LinkEnd::Left => {
                self.left_attach = side;
                self.x1_percent = percent;
            }
            LinkEnd::Right => {
                self.right_attach = side;
                self.x2_percent = percent;
            }
        }
    }
}
