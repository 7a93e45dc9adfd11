//! Already-parsed annotation data as handed over by the loading collaborator.
//!
//! References between records are still plain string ids here; [`crate::Document::from_input`]
//! resolves them into arena handles.

use crate::model::link::{Direction, Side};
use serde::Deserialize;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentInput {
    #[serde(default)]
    pub words: Vec<WordInput>,
    #[serde(default)]
    pub links: Vec<LinkInput>,
    #[serde(default)]
    pub clusters: Vec<ClusterInput>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WordInput {
    pub id: String,
    pub text: String,
}

impl WordInput {
    pub fn new(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
        }
    }
}

/// `{"word": "w3"}` or `{"link": "l1"}`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EndpointRef {
    Word(String),
    Link(String),
}

impl EndpointRef {
    pub fn word(id: impl Into<String>) -> Self {
        Self::Word(id.into())
    }

    pub fn link(id: impl Into<String>) -> Self {
        Self::Link(id.into())
    }
}

/// A bare colour string or a `{ "from": .., "to": .. }` gradient.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum StrokeInput {
    Solid(String),
    Gradient { from: String, to: String },
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkStyleInput {
    pub stroke: StrokeInput,
    #[serde(default = "default_stroke_width")]
    pub width: f64,
    #[serde(default = "default_opacity")]
    pub opacity: f64,
    #[serde(default)]
    pub dasharray: Option<String>,
}

impl Default for LinkStyleInput {
    fn default() -> Self {
        Self {
            stroke: StrokeInput::Solid("#000000".to_string()),
            width: default_stroke_width(),
            opacity: default_opacity(),
            dasharray: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkInput {
    pub id: String,
    pub left: EndpointRef,
    pub right: EndpointRef,
    #[serde(default)]
    pub direction: Direction,
    #[serde(default = "default_left_attach")]
    pub left_attach: Side,
    #[serde(default = "default_right_attach")]
    pub right_attach: Side,
    #[serde(default = "default_percent")]
    pub x1_percent: f64,
    #[serde(default = "default_percent")]
    pub x2_percent: f64,
    #[serde(default)]
    pub style: LinkStyleInput,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default = "default_visible")]
    pub visible: bool,
}

impl LinkInput {
    /// A link with default attachment (inner halves, midway) and a black stroke.
    pub fn new(id: impl Into<String>, left: EndpointRef, right: EndpointRef) -> Self {
        Self {
            id: id.into(),
            left,
            right,
            direction: Direction::default(),
            left_attach: default_left_attach(),
            right_attach: default_right_attach(),
            x1_percent: default_percent(),
            x2_percent: default_percent(),
            style: LinkStyleInput::default(),
            label: None,
            visible: default_visible(),
        }
    }

    pub fn with_direction(mut self, direction: Direction) -> Self {
        self.direction = direction;
        self
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn hidden(mut self) -> Self {
        self.visible = false;
        self
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ClusterInput {
    pub id: String,
    #[serde(default)]
    pub label: String,
    pub members: Vec<EndpointRef>,
}

fn default_stroke_width() -> f64 {
    1.0
}

fn default_opacity() -> f64 {
    1.0
}

fn default_left_attach() -> Side {
    Side::Right
}

fn default_right_attach() -> Side {
    Side::Left
}

fn default_visible() -> bool {
    true
}

fn default_percent() -> f64 {
    0.5
}
