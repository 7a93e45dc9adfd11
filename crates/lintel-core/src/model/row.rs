use crate::ids::WordId;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Row {
    pub idx: usize,
    /// Words in reading order.
    pub words: Vec<WordId>,
    /// Top edge.
    pub ry: f64,
    /// Height.
    pub rh: f64,
    /// Highest slot level of any link touching or passing through this row.
    pub max_slots: u32,
    /// y of the top of the word boxes; link levels are measured upwards from here.
    pub base_height: f64,
    /// Height requested by a row-resize interaction.
    pub height_override: Option<f64>,
}

impl Row {
    pub fn new(idx: usize) -> Self {
        Self {
            idx,
            words: Vec::new(),
            ry: 0.0,
            rh: 0.0,
            max_slots: 0,
            base_height: 0.0,
            height_override: None,
        }
    }

    pub fn bottom(&self) -> f64 {
        self.ry + self.rh
    }
}
