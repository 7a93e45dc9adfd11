use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Partial JSON overrides addressed by dotted paths (`"rows.levelPadding"`).
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigOverrides(Value);

impl Default for ConfigOverrides {
    fn default() -> Self {
        Self(Value::Object(Map::new()))
    }
}

impl ConfigOverrides {
    pub fn from_value(value: Value) -> Self {
        Self(value)
    }

    fn lookup(&self, dotted_path: &str) -> Option<&Value> {
        let mut cur = &self.0;
        for segment in dotted_path.split('.') {
            cur = cur.as_object()?.get(segment)?;
        }
        Some(cur)
    }

    pub fn get_f64(&self, dotted_path: &str) -> Option<f64> {
        self.lookup(dotted_path)?.as_f64()
    }

    pub fn get_str(&self, dotted_path: &str) -> Option<&str> {
        self.lookup(dotted_path)?.as_str()
    }
}

/// How the slot assigner decides that two links compete for the same level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SlotCollision {
    /// Links collide when their row spans share any row.
    #[default]
    Rows,
    /// Links collide only when their reading-order word intervals overlap.
    Words,
}

/// Tuning constants for packing, slot spacing and routing.
///
/// None of these are derived invariants; they are the values the viewer was tuned with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutConfig {
    /// Horizontal margin at both canvas edges.
    pub edge_padding: f64,
    /// Gap between neighbouring word boxes.
    pub word_padding: f64,
    pub text_padding_x: f64,
    pub text_padding_y: f64,
    /// Extra row height per slot level.
    pub level_padding: f64,
    /// y of the first row.
    pub top_margin: f64,
    /// Height above the word box in a row without links.
    pub row_extra_height: f64,
    pub word_font_size: f64,
    pub link_font_size: f64,
    /// Minimum per-level spacing for a segment to be stroked.
    pub hide_percentage: f64,
    /// Minimum per-level spacing for a label to be drawn.
    pub label_hide_percentage: f64,
    /// How far each gradient sub-segment reaches past its own share of the link.
    pub gradient_overshoot: f64,
    /// Offset of the extra leading point on middle-row segments.
    pub middle_lead_offset: f64,
    pub label_padding_x: f64,
    pub handle_width: f64,
    pub handle_height: f64,
    pub arrow_width: f64,
    pub arrow_height: f64,
    pub arrow_mid_height: f64,
    pub marker_radius: f64,
    pub marker_offset: f64,
    pub row_handle_side: f64,
    pub row_handle_margin: f64,
    pub slot_collision: SlotCollision,
    pub hidden_stroke: String,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            edge_padding: 10.0,
            word_padding: 15.0,
            text_padding_x: 2.0,
            text_padding_y: 2.0,
            level_padding: 20.0,
            top_margin: 5.0,
            row_extra_height: 10.0,
            word_font_size: 16.0,
            link_font_size: 10.0,
            hide_percentage: 2.0,
            label_hide_percentage: 7.0,
            gradient_overshoot: 0.1,
            middle_lead_offset: 10.0,
            label_padding_x: 2.0,
            handle_width: 5.0,
            handle_height: 10.0,
            arrow_width: 3.0,
            arrow_height: 6.0,
            arrow_mid_height: 4.0,
            marker_radius: 2.5,
            marker_offset: 3.0,
            row_handle_side: 10.0,
            row_handle_margin: 2.0,
            slot_collision: SlotCollision::Rows,
            hidden_stroke: "fill:none;stroke:none;".to_string(),
        }
    }
}

impl LayoutConfig {
    /// Applies camelCase overrides (`canvas.*`, `words.*`, `rows.*`, `links.*`) onto defaults.
    pub fn from_overrides(overrides: &ConfigOverrides) -> Self {
        let mut cfg = Self::default();

        let numeric: [(&str, &mut f64); 23] = [
            ("canvas.edgePadding", &mut cfg.edge_padding),
            ("canvas.topMargin", &mut cfg.top_margin),
            ("words.padding", &mut cfg.word_padding),
            ("words.textPaddingX", &mut cfg.text_padding_x),
            ("words.textPaddingY", &mut cfg.text_padding_y),
            ("words.fontSize", &mut cfg.word_font_size),
            ("words.handleWidth", &mut cfg.handle_width),
            ("words.handleHeight", &mut cfg.handle_height),
            ("rows.levelPadding", &mut cfg.level_padding),
            ("rows.extraHeight", &mut cfg.row_extra_height),
            ("rows.handleSide", &mut cfg.row_handle_side),
            ("rows.handleMargin", &mut cfg.row_handle_margin),
            ("links.fontSize", &mut cfg.link_font_size),
            ("links.hidePercentage", &mut cfg.hide_percentage),
            ("links.labelHidePercentage", &mut cfg.label_hide_percentage),
            ("links.gradientOvershoot", &mut cfg.gradient_overshoot),
            ("links.middleLeadOffset", &mut cfg.middle_lead_offset),
            ("links.labelPaddingX", &mut cfg.label_padding_x),
            ("links.arrowWidth", &mut cfg.arrow_width),
            ("links.arrowHeight", &mut cfg.arrow_height),
            ("links.arrowMidHeight", &mut cfg.arrow_mid_height),
            ("links.markerRadius", &mut cfg.marker_radius),
            ("links.markerOffset", &mut cfg.marker_offset),
        ];
        for (path, slot) in numeric {
            if let Some(v) = overrides.get_f64(path) {
                *slot = v.max(0.0);
            }
        }

        match overrides.get_str("links.slotCollision") {
            Some("words") => cfg.slot_collision = SlotCollision::Words,
            Some("rows") => cfg.slot_collision = SlotCollision::Rows,
            _ => {}
        }
        if let Some(s) = overrides.get_str("links.hiddenStroke") {
            cfg.hidden_stroke = s.to_string();
        }

        cfg
    }

    /// Height of a word box for the given measured text height.
    pub fn word_box_height(&self, text_height: f64) -> f64 {
        text_height + self.text_padding_y * 2.0
    }

    /// Height of a row that no link passes through.
    pub fn base_row_height(&self, text_height: f64) -> f64 {
        self.row_extra_height + self.word_box_height(text_height)
    }

    pub fn row_height(&self, text_height: f64, max_slots: u32) -> f64 {
        self.base_row_height(text_height) + self.level_padding * f64::from(max_slots)
    }
}
