//! Image renderer - binds the blob directly, no transformation

use async_trait::async_trait;
use docreview_core::models::PreviewPayload;
use docreview_core::ClientResult;

use crate::classifier::{content_type_essence, file_extension};
use crate::sink::{DisplaySink, SinkContent};
use crate::traits::PreviewRenderer;

pub struct ImageRenderer;

impl ImageRenderer {
    /// Declared type when it is an image type, otherwise derived from the extension.
    fn image_content_type(payload: &PreviewPayload) -> String {
        let declared = content_type_essence(&payload.declared_content_type);
        if declared.starts_with("image/") {
            return declared;
        }

        match file_extension(&payload.filename).as_str() {
            "jpg" | "jpeg" => "image/jpeg",
            "png" => "image/png",
            "gif" => "image/gif",
            _ => "application/octet-stream",
        }
        .to_string()
    }
}

#[async_trait]
impl PreviewRenderer for ImageRenderer {
    async fn render(&self, payload: &PreviewPayload, sink: &dyn DisplaySink) -> ClientResult<()> {
        sink.show();
        sink.accept(SinkContent::Image {
            blob: payload.bytes.clone(),
            content_type: Self::image_content_type(payload),
        });
        Ok(())
    }
}
