//! Preview regions backed by files in the preview directory
//!
//! Image region writes `preview.<ext>`, the PDF region `preview-page1.png`
//! and the Word region `preview.html`.

use docreview_processing::{Canvas, DisplaySink, PreviewRegions, RendererKind, SinkContent};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

const PDF_PAGE_FILE: &str = "preview-page1.png";
const HTML_FILE: &str = "preview.html";

#[derive(Default)]
struct SinkState {
    visible: bool,
    written: Option<PathBuf>,
}

/// One preview region.
pub struct FileSink {
    dir: PathBuf,
    kind: RendererKind,
    state: Mutex<SinkState>,
}

impl FileSink {
    pub fn new(dir: impl Into<PathBuf>, kind: RendererKind) -> Self {
        Self {
            dir: dir.into(),
            kind,
            state: Mutex::new(SinkState::default()),
        }
    }

    /// File holding the current content, if any.
    pub fn written(&self) -> Option<PathBuf> {
        self.state.lock().ok()?.written.clone()
    }

    pub fn is_visible(&self) -> bool {
        self.state.lock().map(|s| s.visible).unwrap_or(false)
    }

    fn write(&self, content: SinkContent) -> std::io::Result<Option<PathBuf>> {
        match content {
            SinkContent::Empty => Ok(None),
            SinkContent::Image { blob, content_type } => {
                let path = self
                    .dir
                    .join(format!("preview.{}", image_extension(&content_type)));
                std::fs::write(&path, &blob)?;
                Ok(Some(path))
            }
            SinkContent::Canvas(canvas) => {
                let path = self.dir.join(PDF_PAGE_FILE);
                save_canvas(canvas, &path)?;
                Ok(Some(path))
            }
            SinkContent::Html { html, stylesheet } => {
                let path = self.dir.join(HTML_FILE);
                std::fs::write(&path, html_page(&html, stylesheet))?;
                Ok(Some(path))
            }
            SinkContent::Text(text) => {
                let path = self.dir.join(HTML_FILE);
                let body = format!("<p>{}</p>", escape_html(&text));
                std::fs::write(&path, html_page(&body, ""))?;
                Ok(Some(path))
            }
        }
    }
}

impl DisplaySink for FileSink {
    fn accept(&self, content: SinkContent) {
        let Ok(mut state) = self.state.lock() else {
            return;
        };

        if let Some(previous) = state.written.take() {
            if let Err(e) = std::fs::remove_file(&previous) {
                if e.kind() != std::io::ErrorKind::NotFound {
                    tracing::warn!(path = %previous.display(), error = %e, "Failed to remove old preview");
                }
            }
        }

        match self.write(content) {
            Ok(written) => {
                if let Some(path) = &written {
                    tracing::debug!(region = %self.kind, path = %path.display(), "Preview written");
                }
                state.written = written;
            }
            Err(e) => {
                tracing::warn!(region = %self.kind, error = %e, "Failed to write preview");
            }
        }
    }

    fn show(&self) {
        if let Ok(mut state) = self.state.lock() {
            state.visible = true;
        }
    }

    fn hide(&self) {
        if let Ok(mut state) = self.state.lock() {
            state.visible = false;
        }
    }
}

/// The three regions, writing into `dir`.
pub fn preview_regions(dir: &Path) -> (PreviewRegions, [Arc<FileSink>; 3]) {
    let image = Arc::new(FileSink::new(dir, RendererKind::Image));
    let pdf = Arc::new(FileSink::new(dir, RendererKind::Pdf));
    let docx = Arc::new(FileSink::new(dir, RendererKind::Docx));
    let regions = PreviewRegions::new(image.clone(), pdf.clone(), docx.clone());
    (regions, [image, pdf, docx])
}

fn image_extension(content_type: &str) -> &'static str {
    match content_type {
        "image/png" => "png",
        "image/jpeg" => "jpg",
        "image/gif" => "gif",
        "image/webp" => "webp",
        "image/bmp" => "bmp",
        "image/tiff" => "tiff",
        _ => "bin",
    }
}

fn save_canvas(canvas: Canvas, path: &Path) -> std::io::Result<()> {
    let buffer = image::RgbaImage::from_raw(canvas.width, canvas.height, canvas.pixels)
        .ok_or_else(|| std::io::Error::other("canvas size does not match its pixel buffer"))?;
    buffer.save(path).map_err(std::io::Error::other)
}

fn html_page(body: &str, stylesheet: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n<style>\n{}</style>\n</head>\n<body>\n<div class=\"docx-preview\">\n{}\n</div>\n</body>\n</html>\n",
        stylesheet, body
    )
}

fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;

    #[test]
    fn test_image_written_with_extension() {
        let dir = tempfile::tempdir().unwrap();
        let sink = FileSink::new(dir.path(), RendererKind::Image);

        sink.show();
        sink.accept(SinkContent::Image {
            blob: Bytes::from_static(b"\xFF\xD8\xFF"),
            content_type: "image/jpeg".to_string(),
        });

        let path = sink.written().unwrap();
        assert_eq!(path, dir.path().join("preview.jpg"));
        assert_eq!(std::fs::read(&path).unwrap(), b"\xFF\xD8\xFF");
        assert!(sink.is_visible());
    }

    #[test]
    fn test_canvas_saved_as_png() {
        let dir = tempfile::tempdir().unwrap();
        let sink = FileSink::new(dir.path(), RendererKind::Pdf);
        let mut canvas = Canvas::new(4, 3);
        canvas.pixels.fill(200);

        sink.accept(SinkContent::Canvas(canvas));

        let path = sink.written().unwrap();
        assert!(path.ends_with("preview-page1.png"));
        let png = std::fs::read(&path).unwrap();
        assert_eq!(&png[..4], b"\x89PNG");
    }

    #[test]
    fn test_html_includes_stylesheet_and_empty_clears() {
        let dir = tempfile::tempdir().unwrap();
        let sink = FileSink::new(dir.path(), RendererKind::Docx);

        sink.accept(SinkContent::Html {
            html: "<p>Hello</p>".to_string(),
            stylesheet: ".docx-preview { max-height: 400px; }\n",
        });
        let path = sink.written().unwrap();
        let page = std::fs::read_to_string(&path).unwrap();
        assert!(page.contains("<p>Hello</p>"));
        assert!(page.contains("max-height: 400px"));

        sink.accept(SinkContent::Empty);
        assert!(sink.written().is_none());
        assert!(!path.exists());
    }

    #[test]
    fn test_text_is_escaped() {
        let dir = tempfile::tempdir().unwrap();
        let sink = FileSink::new(dir.path(), RendererKind::Docx);

        sink.accept(SinkContent::Text("Error: <w:p> & more".to_string()));

        let page = std::fs::read_to_string(sink.written().unwrap()).unwrap();
        assert!(page.contains("Error: &lt;w:p&gt; &amp; more"));
    }
}
