//! Preview renderers and the dispatcher selecting between them

pub mod docx;
pub mod image;
pub mod pdf;

pub use docx::{DocxRenderer, DOCX_LOADING_TEXT, DOCX_PREVIEW_STYLE};
pub use image::ImageRenderer;
pub use pdf::{PdfRenderer, PDF_PREVIEW_PAGE, PDF_PREVIEW_SCALE};

use docreview_core::models::PreviewPayload;
use docreview_core::ClientResult;
use std::sync::Arc;

use crate::classifier::RendererKind;
use crate::sink::PreviewRegions;
use crate::traits::{DocxConverter, PdfRasterizer, PreviewRenderer};

/// Routes a payload to the renderer its classification selects.
pub struct PreviewDispatcher {
    image: ImageRenderer,
    pdf: PdfRenderer,
    docx: DocxRenderer,
}

impl PreviewDispatcher {
    pub fn new(rasterizer: Arc<dyn PdfRasterizer>, converter: Arc<dyn DocxConverter>) -> Self {
        Self {
            image: ImageRenderer,
            pdf: PdfRenderer::new(rasterizer),
            docx: DocxRenderer::new(converter),
        }
    }

    pub fn renderer(&self, kind: RendererKind) -> &dyn PreviewRenderer {
        match kind {
            RendererKind::Image => &self.image,
            RendererKind::Pdf => &self.pdf,
            RendererKind::Docx => &self.docx,
        }
    }

    /// Render an already-classified payload into the matching region.
    pub async fn render_kind(
        &self,
        kind: RendererKind,
        payload: &PreviewPayload,
        regions: &PreviewRegions,
    ) -> ClientResult<()> {
        tracing::debug!(
            renderer = %kind,
            filename = %payload.filename,
            size = payload.len(),
            "Rendering preview"
        );
        self.renderer(kind)
            .render(payload, regions.sink_for(kind))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::classify_payload;
    use crate::sink::SinkContent;
    use crate::testing::{FakeDocxConverter, FakeRasterizer, RecordingSink};

    struct Fixture {
        dispatcher: PreviewDispatcher,
        image: Arc<RecordingSink>,
        pdf: Arc<RecordingSink>,
        docx: Arc<RecordingSink>,
        regions: PreviewRegions,
    }

    fn fixture() -> Fixture {
        let image = RecordingSink::new();
        let pdf = RecordingSink::new();
        let docx = RecordingSink::new();
        let regions = PreviewRegions::new(image.clone(), pdf.clone(), docx.clone());
        let dispatcher = PreviewDispatcher::new(
            Arc::new(FakeRasterizer::letter()),
            Arc::new(FakeDocxConverter::returning("<p>W2</p>")),
        );
        Fixture {
            dispatcher,
            image,
            pdf,
            docx,
            regions,
        }
    }

    #[tokio::test]
    async fn test_dispatch_pdf_only_touches_pdf_region() {
        let f = fixture();
        let payload = PreviewPayload::new(&b"%PDF-1.7\n"[..], "application/pdf", "w2.pdf");
        f.dispatcher
            .render_kind(RendererKind::Pdf, &payload, &f.regions)
            .await
            .unwrap();

        assert!(f.pdf.is_visible());
        assert!(matches!(f.pdf.content(), SinkContent::Canvas(_)));
        assert!(f.image.events().is_empty());
        assert!(f.docx.events().is_empty());
    }

    #[tokio::test]
    async fn test_dispatch_docx_by_extension() {
        let f = fixture();
        let payload = PreviewPayload::new(&b"PK\x03\x04"[..], "application/octet-stream", "form.docx");
        let kind = classify_payload(&payload).unwrap();
        f.dispatcher.render_kind(kind, &payload, &f.regions).await.unwrap();

        assert_eq!(kind, RendererKind::Docx);
        assert!(f.docx.is_visible());
        assert!(f.image.events().is_empty());
        assert!(matches!(f.docx.content(), SinkContent::Html { .. }));
    }

    #[test]
    fn test_reset_hides_all_and_clears_docx() {
        let f = fixture();
        f.regions.reset();

        assert!(!f.image.is_visible());
        assert!(!f.pdf.is_visible());
        assert!(!f.docx.is_visible());
        assert_eq!(f.docx.content(), SinkContent::Empty);
    }
}
