#![forbid(unsafe_code)]

//! Data model for wrapped linguistic annotation diagrams (headless).
//!
//! Words are packed into rows; links connect words or other links and are stacked into slot
//! levels above the words. This crate owns the arena those pieces live in, the input records
//! used to build it, and the layout configuration. Layout itself lives in `lintel-render`.

pub mod config;
pub mod error;
pub mod geom;
pub mod ids;
pub mod model;

pub use config::{ConfigOverrides, LayoutConfig, SlotCollision};
pub use error::{Error, RefKind, Result};
pub use ids::{LinkId, WordId};
pub use model::{
    Anchor, Cluster, ClusterInput, Color, Direction, Document, DocumentInput, EndpointRef, Link,
    LinkEnd, LinkInput, LinkStyle, LinkStyleInput, Row, SegmentBounds, Side, Stroke, StrokeInput,
    Word, WordInput,
};
