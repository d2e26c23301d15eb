//! Renderer contract and the external collaborators renderers depend on

use async_trait::async_trait;
use bytes::Bytes;
use docreview_core::models::PreviewPayload;
use docreview_core::ClientResult;

use crate::sink::{Canvas, DisplaySink};

/// A format-specific strategy turning a blob into displayable content.
#[async_trait]
pub trait PreviewRenderer: Send + Sync {
    /// Attach the rendered payload to `sink`. Failures are returned, never panicked.
    async fn render(&self, payload: &PreviewPayload, sink: &dyn DisplaySink) -> ClientResult<()>;
}

/// Size of a page rendered at a given scale, in pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
    pub scale: f32,
}

impl Viewport {
    /// Allocate a canvas matching this viewport (fractional pixels truncated, at least 1x1).
    pub fn canvas(&self) -> Canvas {
        Canvas::new(
            (self.width as u32).max(1),
            (self.height as u32).max(1),
        )
    }
}

/// PDF rasterization library. Pages are 1-based.
#[async_trait]
pub trait PdfRasterizer: Send + Sync {
    async fn page_viewport(&self, pdf: &Bytes, page_number: u32, scale: f32)
        -> ClientResult<Viewport>;

    async fn render_page(
        &self,
        pdf: &Bytes,
        page_number: u32,
        viewport: Viewport,
        canvas: &mut Canvas,
    ) -> ClientResult<()>;
}

/// Word-to-HTML conversion library.
#[async_trait]
pub trait DocxConverter: Send + Sync {
    async fn convert_to_html(&self, document: Bytes) -> ClientResult<String>;
}
