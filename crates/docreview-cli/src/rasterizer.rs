use async_trait::async_trait;
use bytes::Bytes;
use docreview_core::{ClientError, ClientResult};
use docreview_processing::{Canvas, PdfRasterizer, Viewport};
use std::sync::Arc;

const UNAVAILABLE: &str = "PDF preview is not available in this build (enable the `pdfium` feature)";

/// Stand-in used when no PDF library is available; every PDF preview fails.
pub struct UnavailablePdfRasterizer;

#[async_trait]
impl PdfRasterizer for UnavailablePdfRasterizer {
    async fn page_viewport(
        &self,
        _pdf: &Bytes,
        _page_number: u32,
        _scale: f32,
    ) -> ClientResult<Viewport> {
        Err(ClientError::Rendering(UNAVAILABLE.to_string()))
    }

    async fn render_page(
        &self,
        _pdf: &Bytes,
        _page_number: u32,
        _viewport: Viewport,
        _canvas: &mut Canvas,
    ) -> ClientResult<()> {
        Err(ClientError::Rendering(UNAVAILABLE.to_string()))
    }
}

/// The best rasterizer this build can offer.
pub fn pdf_rasterizer() -> Arc<dyn PdfRasterizer> {
    #[cfg(feature = "pdfium")]
    {
        match crate::pdfium::PdfiumRasterizer::new() {
            Ok(rasterizer) => return Arc::new(rasterizer),
            Err(e) => tracing::warn!(error = %e, "PDFium unavailable, PDF previews disabled"),
        }
    }
    Arc::new(UnavailablePdfRasterizer)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_unavailable_rasterizer_fails_with_rendering_error() {
        let err = UnavailablePdfRasterizer
            .page_viewport(&Bytes::from_static(b"%PDF-1.4"), 1, 1.5)
            .await
            .unwrap_err();
        assert!(matches!(err, ClientError::Rendering(_)));
    }
}
