use crate::geom::{Rect, Size, rect, size};
use serde::Serialize;

/// A positioned text token.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Word {
    /// Id from the input document.
    pub key: String,
    pub text: String,
    /// Position in reading order; never changes after construction.
    pub order: usize,
    /// Measured text size (`tw`/`th`).
    pub text_size: Size,
    /// Box including padding (`wx`/`wy`/`ww`/`wh`).
    pub bbox: Rect,
    /// Owning row index. `None` until the row packer has run.
    pub row: Option<usize>,
    /// Box width set by dragging a resize handle; survives repacking.
    pub width_override: Option<f64>,
}

impl Word {
    pub fn new(key: impl Into<String>, text: impl Into<String>, order: usize) -> Self {
        Self {
            key: key.into(),
            text: text.into(),
            order,
            text_size: size(0.0, 0.0),
            bbox: rect(0.0, 0.0, 0.0, 0.0),
            row: None,
            width_override: None,
        }
    }

    /// A word's own slot level. Links anchored to a word start right above it.
    pub fn level(&self) -> u32 {
        0
    }

    pub fn left_x(&self) -> f64 {
        self.bbox.min_x()
    }

    pub fn right_x(&self) -> f64 {
        self.bbox.max_x()
    }

    pub fn width(&self) -> f64 {
        self.bbox.size.width
    }
}
