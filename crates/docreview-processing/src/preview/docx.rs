//! Word renderer - converts to HTML through the external converter

use async_trait::async_trait;
use docreview_core::models::PreviewPayload;
use docreview_core::ClientResult;
use std::sync::Arc;

use crate::sink::{DisplaySink, SinkContent};
use crate::traits::{DocxConverter, PreviewRenderer};

pub const DOCX_LOADING_TEXT: &str = "Loading Word document preview...";

/// Fixed presentation for converted Word documents.
pub const DOCX_PREVIEW_STYLE: &str = "\
.docx-preview {
    font-family: Arial, sans-serif;
    line-height: 1.6;
    padding: 20px;
    max-height: 400px;
    overflow-y: auto;
    background-color: white;
    border: 1px solid #ccc;
}
.docx-preview img {
    max-width: 100%;
    height: auto;
}
";

pub struct DocxRenderer {
    converter: Arc<dyn DocxConverter>,
}

impl DocxRenderer {
    pub fn new(converter: Arc<dyn DocxConverter>) -> Self {
        Self { converter }
    }
}

#[async_trait]
impl PreviewRenderer for DocxRenderer {
    /// The loading text is always replaced, by the HTML or by an inline error.
    async fn render(&self, payload: &PreviewPayload, sink: &dyn DisplaySink) -> ClientResult<()> {
        sink.accept(SinkContent::Text(DOCX_LOADING_TEXT.to_string()));
        sink.show();

        match self.converter.convert_to_html(payload.bytes.clone()).await {
            Ok(html) => {
                sink.accept(SinkContent::Html {
                    html,
                    stylesheet: DOCX_PREVIEW_STYLE,
                });
                Ok(())
            }
            Err(err) => {
                tracing::warn!(error = %err, filename = %payload.filename, "Word conversion failed");
                sink.accept(SinkContent::Text(format!(
                    "Error previewing Word document: {}",
                    err
                )));
                Err(err)
            }
        }
    }
}
