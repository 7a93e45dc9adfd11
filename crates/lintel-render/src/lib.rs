#![forbid(unsafe_code)]

//! Headless layout for wrapped annotation diagrams.
//!
//! A full pass runs: row packing (only when the document has no rows yet), slot assignment,
//! row finalisation and link routing, and returns a [`Scene`].

pub mod attach;
pub mod route;
pub mod rows;
pub mod scene;
pub mod slots;
pub mod stroke;
pub mod text;

pub use attach::AttachX;
pub use rows::MoveOutcome;
pub use route::SegmentKind;
pub use scene::{
    ArrowKind, ArrowShape, ClusterShape, LabelShape, LinkShape, Marker, Parity, RowShape, Scene,
    SegmentGradient, SegmentShape, WordShape,
};

use crate::text::{DeterministicTextMeasurer, TextMeasurer};
use lintel_core::{ConfigOverrides, Document, LayoutConfig};
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Model(#[from] lintel_core::Error),
    #[error("link `{link}` is anchored to `{anchor}`, which has not been routed")]
    UnroutedAnchor { link: String, anchor: String },
}

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Clone)]
pub struct LayoutOptions {
    pub text_measurer: Arc<dyn TextMeasurer + Send + Sync>,
    pub config: LayoutConfig,
    /// Spread link ends that share an anchor side when a document is first packed.
    pub arrange_attachments: bool,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            text_measurer: Arc::new(DeterministicTextMeasurer::default()),
            config: LayoutConfig::default(),
            arrange_attachments: false,
        }
    }
}

impl LayoutOptions {
    /// Replaces the config with defaults plus `overrides`.
    pub fn with_overrides(mut self, overrides: &ConfigOverrides) -> Self {
        self.config = LayoutConfig::from_overrides(overrides);
        self
    }
}

impl std::fmt::Debug for LayoutOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LayoutOptions")
            .field("config", &self.config)
            .field("arrange_attachments", &self.arrange_attachments)
            .finish_non_exhaustive()
    }
}

/// Lays out `doc` in place and returns the resulting scene.
pub fn layout_document(doc: &mut Document, options: &LayoutOptions) -> Result<Scene> {
    let cfg = &options.config;
    let measurer = options.text_measurer.as_ref();

    if doc.rows.is_empty() && !doc.words.is_empty() {
        rows::pack_rows(doc, measurer, cfg);
        if options.arrange_attachments {
            attach::arrange_attachment_offsets(doc)?;
        }
    }
    doc.validate_rows()?;
    slots::assign_slots(doc, cfg)?;
    rows::finalize_rows(doc, cfg);
    let links = route::route_links(doc, cfg, measurer)?;
    Ok(scene::build_scene(doc, cfg, links))
}

/// Discards the current rows, packs again for `doc.canvas_width` and lays out.
pub fn repack_document(doc: &mut Document, options: &LayoutOptions) -> Result<Scene> {
    rows::pack_rows(doc, options.text_measurer.as_ref(), &options.config);
    layout_document(doc, options)
}
