#![forbid(unsafe_code)]

//! `lintel` lays out linguistic annotation diagrams without a UI toolkit.
//!
//! Words wrap into rows of a fixed canvas width; links (dependency arcs, relations between
//! other links) are stacked into slot levels above the words and routed across row breaks.
//! The output is a serializable [`render::Scene`] of plain geometry and style strings.
//!
//! For one-shot layout use [`render::layout_document`]. For an interactive viewer, keep a
//! [`LayoutSession`] and feed it [`LayoutEvent`]s.

pub use lintel_core::*;

pub mod render {
    pub use lintel_render::attach::{AttachX, reattach, resolve_x};
    pub use lintel_render::rows::MoveOutcome;
    pub use lintel_render::text::{
        DeterministicTextMeasurer, TextMeasurer, TextMetrics, TextStyle,
    };
    pub use lintel_render::{
        ArrowKind, ArrowShape, ClusterShape, LabelShape, LayoutOptions, LinkShape, Marker, Parity,
        RowShape, Scene, SegmentGradient, SegmentKind, SegmentShape, WordShape, layout_document,
        repack_document,
    };
}

mod session;

pub use session::{LayoutEvent, LayoutSession};

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SessionError {
    #[error(transparent)]
    Model(#[from] lintel_core::Error),
    #[error(transparent)]
    Layout(#[from] lintel_render::Error),
}

pub type SessionResult<T> = std::result::Result<T, SessionError>;
