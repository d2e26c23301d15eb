//! Content classifier - picks the preview renderer for a fetched document

use docreview_core::models::PreviewPayload;
use docreview_core::{ClientError, ClientResult};
use std::fmt;

pub const PDF_CONTENT_TYPE: &str = "application/pdf";
pub const DOCX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";
pub const DOC_CONTENT_TYPE: &str = "application/msword";

const IMAGE_EXTENSIONS: [&str; 4] = ["jpg", "jpeg", "png", "gif"];

/// The three preview strategies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RendererKind {
    Image,
    Pdf,
    Docx,
}

impl RendererKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            RendererKind::Image => "image",
            RendererKind::Pdf => "pdf",
            RendererKind::Docx => "docx",
        }
    }
}

impl fmt::Display for RendererKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lower-cased text after the last `.`; a name without a dot is its own extension.
pub fn file_extension(filename: &str) -> String {
    filename
        .rsplit('.')
        .next()
        .unwrap_or_default()
        .to_lowercase()
}

/// Media type essence: parameters dropped, lower-cased.
pub(crate) fn content_type_essence(content_type: &str) -> String {
    content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_lowercase()
}

/// Decide which renderer applies. First match wins: PDF, then Word, then image.
///
/// The extension is always consulted, even when a content type is present,
/// because servers routinely mislabel legacy document formats.
pub fn classify(declared_content_type: &str, filename: &str) -> Option<RendererKind> {
    let content_type = content_type_essence(declared_content_type);
    let extension = file_extension(filename);

    if content_type == PDF_CONTENT_TYPE || extension == "pdf" {
        Some(RendererKind::Pdf)
    } else if content_type == DOCX_CONTENT_TYPE
        || content_type == DOC_CONTENT_TYPE
        || extension == "docx"
        || extension == "doc"
    {
        Some(RendererKind::Docx)
    } else if content_type.starts_with("image/") || IMAGE_EXTENSIONS.contains(&extension.as_str())
    {
        Some(RendererKind::Image)
    } else {
        None
    }
}

/// Classify a fetched payload, failing with `UnsupportedFileType` when no renderer applies.
pub fn classify_payload(payload: &PreviewPayload) -> ClientResult<RendererKind> {
    classify(&payload.declared_content_type, &payload.filename).ok_or_else(|| {
        ClientError::UnsupportedFileType {
            content_type: payload.declared_content_type.clone(),
            filename: payload.filename.clone(),
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pdf_by_content_type_or_extension() {
        assert_eq!(classify("application/pdf", "unknown"), Some(RendererKind::Pdf));
        assert_eq!(classify("", "W2.PDF"), Some(RendererKind::Pdf));
        assert_eq!(
            classify("application/octet-stream", "scan.Pdf"),
            Some(RendererKind::Pdf)
        );
        // PDF wins over an image content type
        assert_eq!(classify("image/png", "statement.pdf"), Some(RendererKind::Pdf));
    }

    #[test]
    fn test_word_by_content_type_or_extension() {
        assert_eq!(classify(DOCX_CONTENT_TYPE, "unknown"), Some(RendererKind::Docx));
        assert_eq!(classify(DOC_CONTENT_TYPE, "unknown"), Some(RendererKind::Docx));
        assert_eq!(
            classify("application/octet-stream", "letter.doc"),
            Some(RendererKind::Docx)
        );
        assert_eq!(classify("image/jpeg", "form.DOCX"), Some(RendererKind::Docx));
    }

    #[test]
    fn test_image_by_content_type_or_extension() {
        assert_eq!(classify("image/png", "passport.png"), Some(RendererKind::Image));
        assert_eq!(classify("image/webp", "unknown"), Some(RendererKind::Image));
        assert_eq!(classify("", "photo.JPEG"), Some(RendererKind::Image));
        assert_eq!(
            classify("application/octet-stream", "anim.gif"),
            Some(RendererKind::Image)
        );
    }

    #[test]
    fn test_image_content_type_with_other_extensions() {
        for filename in ["scan.tiff", "noext", "archive.tar.gz", "x.txt"] {
            assert_eq!(classify("image/tiff", filename), Some(RendererKind::Image));
        }
    }

    #[test]
    fn test_unsupported() {
        assert_eq!(classify("text/plain", "notes.txt"), None);
        assert_eq!(classify("", "unknown"), None);
        assert_eq!(classify("application/zip", "bundle.zip"), None);
    }

    #[test]
    fn test_content_type_parameters_and_case() {
        assert_eq!(
            classify("Application/PDF; charset=binary", "unknown"),
            Some(RendererKind::Pdf)
        );
        assert_eq!(classify("IMAGE/PNG", "unknown"), Some(RendererKind::Image));
    }

    #[test]
    fn test_file_extension() {
        assert_eq!(file_extension("a.b.DOCX"), "docx");
        assert_eq!(file_extension("pdf"), "pdf");
        assert_eq!(file_extension("trailing."), "");
    }

    #[test]
    fn test_classify_payload_unsupported_error() {
        let payload = PreviewPayload::new(&b"hello"[..], "text/plain", "notes.txt");
        let err = classify_payload(&payload).unwrap_err();
        assert!(matches!(err, ClientError::UnsupportedFileType { .. }));
        assert!(err.to_string().starts_with("Unsupported file type"));
    }
}
