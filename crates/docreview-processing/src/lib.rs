//! Preview pipeline for the document review client
//!
//! The classifier picks a renderer from the declared media type and the
//! filename; renderers turn a fetched blob into content for a display sink.
//! PDF rasterization and Word-to-HTML conversion are external collaborators
//! reached through the traits in [`traits`].

pub mod classifier;
#[cfg(feature = "docx-html")]
pub mod docx_html;
pub mod preview;
pub mod sink;
#[cfg(any(test, feature = "test-helpers"))]
pub mod testing;
pub mod traits;
pub mod validator;

pub use classifier::{classify, classify_payload, file_extension, RendererKind};
#[cfg(feature = "docx-html")]
pub use docx_html::DocxHtmlConverter;
pub use preview::{PreviewDispatcher, PDF_PREVIEW_PAGE, PDF_PREVIEW_SCALE};
pub use sink::{Canvas, DisplaySink, PreviewRegions, SinkContent};
pub use traits::{DocxConverter, PdfRasterizer, PreviewRenderer, Viewport};
pub use validator::{UploadValidator, ValidationError, UPLOAD_ACCEPT};
