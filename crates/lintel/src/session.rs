use crate::SessionResult;
use lintel_core::{
    ConfigOverrides, Document, DocumentInput, LayoutConfig, LinkEnd, LinkId, Side, WordId,
};
use lintel_render::{LayoutOptions, Scene, attach, layout_document, repack_document, rows};

/// An edit coming from the viewer. Every event triggers a full layout pass.
#[derive(Debug, Clone, PartialEq)]
pub enum LayoutEvent {
    /// Row `row` was dragged to `height`.
    RowResize { row: usize, height: f64 },
    /// A word was dragged so its left edge is at `x`.
    WordMove { word: WordId, x: f64 },
    /// One of a word's resize handles was dragged to `x`.
    WordResize { word: WordId, edge: Side, x: f64 },
    RecalculateSlots,
    /// The canvas changed width; rows are packed again from scratch.
    CanvasResize { width: f64 },
    /// A link end was dragged to `x` along its anchor.
    AttachmentMove { link: LinkId, end: LinkEnd, x: f64 },
    /// Show or hide a link. Links anchored to a hidden link are hidden with it.
    SetLinkVisibility { link: LinkId, visible: bool },
    /// Replace the layout config with defaults plus `overrides` and repack.
    Configure { overrides: ConfigOverrides },
    /// Drop the whole document.
    Clear,
}

/// Owns one document and the scene of its last successful layout.
#[derive(Debug)]
pub struct LayoutSession {
    doc: Document,
    options: LayoutOptions,
    scene: Scene,
}

impl LayoutSession {
    pub fn new(
        input: DocumentInput,
        canvas_width: f64,
        options: LayoutOptions,
    ) -> SessionResult<Self> {
        let mut doc = Document::from_input(input, canvas_width)?;
        let scene = layout_document(&mut doc, &options)?;
        Ok(Self {
            doc,
            options,
            scene,
        })
    }

    pub fn document(&self) -> &Document {
        &self.doc
    }

    pub fn options(&self) -> &LayoutOptions {
        &self.options
    }

    /// Scene of the last event that succeeded.
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// Applies `event` and lays the document out again.
    ///
    /// On failure the document and config are rolled back to their state before the event
    /// and [`Self::scene`] keeps returning the previous scene.
    pub fn handle(&mut self, event: LayoutEvent) -> SessionResult<&Scene> {
        let snapshot = self.doc.clone();
        let config = self.options.config.clone();
        match self.apply(&event) {
            Ok(scene) => {
                self.scene = scene;
                Ok(&self.scene)
            }
            Err(err) => {
                tracing::warn!(?event, %err, "layout event rejected, restoring previous document");
                self.doc = snapshot;
                self.options.config = config;
                Err(err)
            }
        }
    }

    fn apply(&mut self, event: &LayoutEvent) -> SessionResult<Scene> {
        tracing::debug!(?event, "handling layout event");
        let doc = &mut self.doc;
        let cfg = &self.options.config;

        let repack = match event {
            LayoutEvent::RowResize { row, height } => {
                rows::resize_row(doc, *row, *height, cfg)?;
                false
            }
            LayoutEvent::WordMove { word, x } => {
                rows::move_word(doc, *word, *x, cfg)?;
                false
            }
            LayoutEvent::WordResize { word, edge, x } => {
                rows::resize_word(doc, *word, *edge, *x, cfg)?;
                false
            }
            LayoutEvent::RecalculateSlots => false,
            LayoutEvent::CanvasResize { width } => {
                doc.canvas_width = *width;
                true
            }
            LayoutEvent::AttachmentMove { link, end, x } => {
                attach::reattach(doc, *link, *end, *x)?;
                false
            }
            LayoutEvent::SetLinkVisibility { link, visible } => {
                doc.set_link_visible(*link, *visible)?;
                false
            }
            LayoutEvent::Configure { overrides } => {
                self.options.config = LayoutConfig::from_overrides(overrides);
                true
            }
            LayoutEvent::Clear => {
                doc.clear();
                false
            }
        };

        let scene = if repack {
            repack_document(&mut self.doc, &self.options)?
        } else {
            layout_document(&mut self.doc, &self.options)?
        };
        Ok(scene)
    }
}
