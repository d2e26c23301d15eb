//! PDF renderer - first page only, fixed zoom

use async_trait::async_trait;
use docreview_core::models::PreviewPayload;
use docreview_core::ClientResult;
use std::sync::Arc;

use crate::sink::{DisplaySink, SinkContent};
use crate::traits::{PdfRasterizer, PreviewRenderer};

/// Only the first page is ever rendered.
pub const PDF_PREVIEW_PAGE: u32 = 1;
pub const PDF_PREVIEW_SCALE: f32 = 1.5;

pub struct PdfRenderer {
    rasterizer: Arc<dyn PdfRasterizer>,
}

impl PdfRenderer {
    pub fn new(rasterizer: Arc<dyn PdfRasterizer>) -> Self {
        Self { rasterizer }
    }
}

#[async_trait]
impl PreviewRenderer for PdfRenderer {
    async fn render(&self, payload: &PreviewPayload, sink: &dyn DisplaySink) -> ClientResult<()> {
        sink.show();

        let viewport = self
            .rasterizer
            .page_viewport(&payload.bytes, PDF_PREVIEW_PAGE, PDF_PREVIEW_SCALE)
            .await?;

        // A new canvas per render; the previous one is dropped when replaced.
        let mut canvas = viewport.canvas();
        self.rasterizer
            .render_page(&payload.bytes, PDF_PREVIEW_PAGE, viewport, &mut canvas)
            .await?;

        tracing::debug!(
            width = canvas.width,
            height = canvas.height,
            scale = viewport.scale,
            "Rendered first PDF page"
        );

        sink.accept(SinkContent::Canvas(canvas));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{FakeRasterizer, RecordingSink, SinkEvent};
    use docreview_core::ClientError;

    #[tokio::test]
    async fn test_renders_first_page_at_fixed_scale() {
        let rasterizer = Arc::new(FakeRasterizer::letter());
        let renderer = PdfRenderer::new(rasterizer.clone());
        let sink = RecordingSink::new();
        let payload = PreviewPayload::new(&b"%PDF-1.4\n"[..], "application/pdf", "w2.pdf");

        renderer.render(&payload, sink.as_ref()).await.unwrap();

        assert_eq!(rasterizer.render_calls(), vec![(1, 1.5)]);
        match sink.content() {
            SinkContent::Canvas(canvas) => {
                assert_eq!(canvas.width, 918);
                assert_eq!(canvas.height, 1188);
                assert_eq!(canvas.pixels.len(), 918 * 1188 * 4);
            }
            other => panic!("unexpected content: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_multi_page_document_renders_page_one_only() {
        let rasterizer = Arc::new(FakeRasterizer::letter().with_pages(12));
        let renderer = PdfRenderer::new(rasterizer.clone());
        let sink = RecordingSink::new();
        let payload = PreviewPayload::new(&b"%PDF-1.4\n"[..], "application/pdf", "statement.pdf");

        renderer.render(&payload, sink.as_ref()).await.unwrap();

        assert_eq!(rasterizer.render_calls().len(), 1);
        assert_eq!(rasterizer.render_calls()[0].0, 1);
    }

    #[tokio::test]
    async fn test_rasterizer_failure_leaves_no_canvas() {
        let renderer = PdfRenderer::new(Arc::new(FakeRasterizer::letter()));
        let sink = RecordingSink::new();
        let payload = PreviewPayload::new(&b"not a pdf"[..], "application/pdf", "broken.pdf");

        let err = renderer.render(&payload, sink.as_ref()).await.unwrap_err();

        assert!(matches!(err, ClientError::Rendering(_)));
        assert_eq!(sink.events(), vec![SinkEvent::Show]);
    }
}
