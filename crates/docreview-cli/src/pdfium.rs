//! PDF rasterization through Google PDFium.
//!
//! `Pdfium` is loaded per operation inside a blocking task; the OS caches
//! the library load, so repeat loads are cheap.

use async_trait::async_trait;
use bytes::Bytes;
use docreview_core::{ClientError, ClientResult};
use docreview_processing::{Canvas, PdfRasterizer, Viewport};
use pdfium_render::prelude::*;

pub struct PdfiumRasterizer;

impl PdfiumRasterizer {
    /// Fails when no PDFium library can be found.
    pub fn new() -> ClientResult<Self> {
        let _ = load_pdfium()?;
        Ok(Self)
    }
}

/// Discovery order: `PDFIUM_DYNAMIC_LIB_PATH`, next to the executable, system paths.
fn load_pdfium() -> ClientResult<Pdfium> {
    if let Ok(path) = std::env::var("PDFIUM_DYNAMIC_LIB_PATH") {
        tracing::debug!(path = %path, "Loading PDFium from env var");
        let bindings = Pdfium::bind_to_library(&path).map_err(|e| {
            ClientError::Rendering(format!("Failed to load PDFium from {}: {}", path, e))
        })?;
        return Ok(Pdfium::new(bindings));
    }

    if let Some(dir) = std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(|p| p.to_path_buf()))
    {
        let lib_path = Pdfium::pdfium_platform_library_name_at_path(dir.to_string_lossy().as_ref());
        if let Ok(bindings) = Pdfium::bind_to_library(&lib_path) {
            tracing::debug!(dir = %dir.display(), "Loaded PDFium next to executable");
            return Ok(Pdfium::new(bindings));
        }
    }

    let bindings = Pdfium::bind_to_system_library().map_err(|e| {
        ClientError::Rendering(format!(
            "PDFium library not found. Set PDFIUM_DYNAMIC_LIB_PATH or install PDFium: {}",
            e
        ))
    })?;
    Ok(Pdfium::new(bindings))
}

fn page_index(page_number: u32) -> ClientResult<u16> {
    page_number
        .checked_sub(1)
        .and_then(|i| u16::try_from(i).ok())
        .ok_or_else(|| ClientError::Rendering(format!("Invalid page number {}", page_number)))
}

fn load_error(e: PdfiumError) -> ClientError {
    ClientError::Rendering(format!("Failed to load PDF: {}", e))
}

fn viewport_blocking(pdf: &[u8], page_number: u32, scale: f32) -> ClientResult<Viewport> {
    let pdfium = load_pdfium()?;
    let document = pdfium.load_pdf_from_byte_slice(pdf, None).map_err(load_error)?;
    let pages = document.pages();
    let page = pages.get(page_index(page_number)?).map_err(|_| {
        ClientError::Rendering(format!(
            "Page {} out of range (document has {} pages)",
            page_number,
            pages.len()
        ))
    })?;

    Ok(Viewport {
        width: page.width().value * scale,
        height: page.height().value * scale,
        scale,
    })
}

/// RGBA pixels of the page rendered at `width` x `height`, row-major.
fn render_blocking(
    pdf: &[u8],
    page_number: u32,
    width: u32,
    height: u32,
) -> ClientResult<(u32, u32, Vec<u8>)> {
    let pdfium = load_pdfium()?;
    let document = pdfium.load_pdf_from_byte_slice(pdf, None).map_err(load_error)?;
    let page = document
        .pages()
        .get(page_index(page_number)?)
        .map_err(|e| ClientError::Rendering(format!("Page {}: {}", page_number, e)))?;

    let config = PdfRenderConfig::new()
        .set_target_width(width as i32)
        .set_maximum_height(height as i32);
    let bitmap = page
        .render_with_config(&config)
        .map_err(|e| ClientError::Rendering(format!("Rendering failed: {}", e)))?;

    Ok((
        bitmap.width() as u32,
        bitmap.height() as u32,
        bitmap.as_rgba_bytes(),
    ))
}

/// Copy `src` into `canvas`, clipping to the overlapping rectangle.
fn blit(canvas: &mut Canvas, src_width: u32, src_height: u32, src: &[u8]) {
    let rows = src_height.min(canvas.height) as usize;
    let row_bytes = src_width.min(canvas.width) as usize * 4;
    let src_stride = src_width as usize * 4;
    let dst_stride = canvas.width as usize * 4;

    for y in 0..rows {
        let from = &src[y * src_stride..y * src_stride + row_bytes];
        canvas.pixels[y * dst_stride..y * dst_stride + row_bytes].copy_from_slice(from);
    }
}

#[async_trait]
impl PdfRasterizer for PdfiumRasterizer {
    async fn page_viewport(
        &self,
        pdf: &Bytes,
        page_number: u32,
        scale: f32,
    ) -> ClientResult<Viewport> {
        let pdf = pdf.clone();
        tokio::task::spawn_blocking(move || viewport_blocking(&pdf, page_number, scale))
            .await
            .map_err(|e| ClientError::Rendering(format!("PDF task failed: {}", e)))?
    }

    async fn render_page(
        &self,
        pdf: &Bytes,
        page_number: u32,
        viewport: Viewport,
        canvas: &mut Canvas,
    ) -> ClientResult<()> {
        let pdf = pdf.clone();
        let (width, height) = (canvas.width, canvas.height);
        let (src_width, src_height, pixels) =
            tokio::task::spawn_blocking(move || render_blocking(&pdf, page_number, width, height))
                .await
                .map_err(|e| ClientError::Rendering(format!("PDF task failed: {}", e)))??;

        if pixels.len() < src_width as usize * src_height as usize * 4 {
            return Err(ClientError::Rendering(
                "PDFium returned a short bitmap".to_string(),
            ));
        }
        blit(canvas, src_width, src_height, &pixels);

        tracing::debug!(
            page = page_number,
            scale = viewport.scale,
            width = src_width,
            height = src_height,
            "Rendered PDF page"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_index_is_one_based() {
        assert_eq!(page_index(1).unwrap(), 0);
        assert!(page_index(0).is_err());
        assert!(page_index(70_000).is_err());
    }

    #[test]
    fn test_blit_clips_to_canvas() {
        let mut canvas = Canvas::new(2, 2);
        let src = vec![9u8; 3 * 4];

        blit(&mut canvas, 3, 1, &src);

        assert_eq!(&canvas.pixels[..8], &[9u8; 8]);
        assert_eq!(&canvas.pixels[8..], &[0u8; 8]);
    }
}
