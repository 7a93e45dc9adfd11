//! Words, rows, links and clusters, held in a [`Document`] arena.

pub mod cluster;
pub mod document;
pub mod input;
pub mod link;
pub mod row;
pub mod style;
pub mod word;

pub use cluster::Cluster;
pub use document::Document;
pub use input::{
    ClusterInput, DocumentInput, EndpointRef, LinkInput, LinkStyleInput, StrokeInput, WordInput,
};
pub use link::{Anchor, Direction, Link, LinkEnd, SegmentBounds, Side};
pub use row::Row;
pub use style::{Color, LinkStyle, Stroke};
pub use word::Word;
