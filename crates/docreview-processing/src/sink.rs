//! Display sinks - the abstract regions renderers write into

use bytes::Bytes;
use std::fmt;
use std::sync::Arc;

use crate::classifier::RendererKind;

/// Freshly allocated RGBA drawing surface.
#[derive(Clone, PartialEq, Eq)]
pub struct Canvas {
    pub width: u32,
    pub height: u32,
    /// Row-major RGBA, `width * height * 4` bytes.
    pub pixels: Vec<u8>,
}

impl Canvas {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![0; width as usize * height as usize * 4],
        }
    }
}

impl fmt::Debug for Canvas {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Canvas")
            .field("width", &self.width)
            .field("height", &self.height)
            .finish()
    }
}

/// Content a sink can display. Accepting new content replaces the old.
#[derive(Debug, Clone, PartialEq)]
pub enum SinkContent {
    Empty,
    /// Shared blob bound directly to an image element.
    Image { blob: Bytes, content_type: String },
    Canvas(Canvas),
    /// Converted HTML plus the stylesheet it must be shown with.
    Html {
        html: String,
        stylesheet: &'static str,
    },
    /// Plain status text (loading indicator, inline error).
    Text(String),
}

/// A display region. Implementations use interior mutability; the UI owns them.
pub trait DisplaySink: Send + Sync {
    fn accept(&self, content: SinkContent);
    fn show(&self);
    fn hide(&self);
}

/// The three preview regions of the review modal.
#[derive(Clone)]
pub struct PreviewRegions {
    pub image: Arc<dyn DisplaySink>,
    pub pdf: Arc<dyn DisplaySink>,
    pub docx: Arc<dyn DisplaySink>,
}

impl PreviewRegions {
    pub fn new(
        image: Arc<dyn DisplaySink>,
        pdf: Arc<dyn DisplaySink>,
        docx: Arc<dyn DisplaySink>,
    ) -> Self {
        Self { image, pdf, docx }
    }

    pub fn sink_for(&self, kind: RendererKind) -> &dyn DisplaySink {
        match kind {
            RendererKind::Image => self.image.as_ref(),
            RendererKind::Pdf => self.pdf.as_ref(),
            RendererKind::Docx => self.docx.as_ref(),
        }
    }

    /// Hide every region and clear the Word region.
    pub fn reset(&self) {
        self.image.hide();
        self.pdf.hide();
        self.docx.hide();
        self.docx.accept(SinkContent::Empty);
    }

    /// Wrap every region with `wrap`, e.g. to guard against stale writes.
    pub fn map(&self, wrap: impl Fn(Arc<dyn DisplaySink>) -> Arc<dyn DisplaySink>) -> Self {
        Self {
            image: wrap(self.image.clone()),
            pdf: wrap(self.pdf.clone()),
            docx: wrap(self.docx.clone()),
        }
    }
}
