//! Upload flow: pick, encode, submit, annotate, refresh

use base64::{engine::general_purpose::STANDARD, Engine as _};
use docreview_api_client::DocumentApi;
use docreview_core::error::log_error;
use docreview_core::models::{UploadCategory, UploadRequest, UploadResponse};
use docreview_core::{ClientError, ClientResult, ErrorMetadata};
use docreview_processing::UploadValidator;
use std::sync::Arc;

use crate::queue::ActionItemQueue;
use crate::view::{FilePicker, ReviewUi, SelectedFile};

pub const UPLOAD_ERROR_PREFIX: &str = "Upload failed: ";
const SUCCESS_MARK: &str = "✔";

#[derive(Debug, Clone, PartialEq)]
pub enum UploadOutcome {
    /// The file prompt was dismissed; nothing was sent.
    Cancelled,
    Uploaded(UploadResponse),
}

/// Label annotation shown after a successful upload.
pub fn upload_annotation(score: f64) -> String {
    format!("{} (Score: {})", SUCCESS_MARK, score)
}

pub struct UploadFlow {
    api: Arc<dyn DocumentApi>,
    ui: Arc<dyn ReviewUi>,
    picker: Arc<dyn FilePicker>,
    queue: Arc<ActionItemQueue>,
    validator: UploadValidator,
    student_id: String,
}

impl UploadFlow {
    pub fn new(
        api: Arc<dyn DocumentApi>,
        ui: Arc<dyn ReviewUi>,
        picker: Arc<dyn FilePicker>,
        queue: Arc<ActionItemQueue>,
        validator: UploadValidator,
        student_id: impl Into<String>,
    ) -> Self {
        Self {
            api,
            ui,
            picker,
            queue,
            validator,
            student_id: student_id.into(),
        }
    }

    /// Prompt for a file and upload it under `category`.
    ///
    /// The queue is refreshed exactly once after a successful upload and not
    /// at all after a failed one.
    #[tracing::instrument(skip(self, category), fields(category = %category))]
    pub async fn upload(&self, category: UploadCategory) -> ClientResult<UploadOutcome> {
        let file = match self.picker.pick_file(self.validator.accept()).await {
            Ok(Some(file)) => file,
            Ok(None) => {
                tracing::debug!("File prompt cancelled");
                return Ok(UploadOutcome::Cancelled);
            }
            Err(err) => return Err(self.report(err)),
        };

        let response = match self.submit(category, &file).await {
            Ok(response) => response,
            Err(err) => return Err(self.report(err)),
        };

        tracing::info!(
            file_name = %file.name,
            score = response.score,
            "Document uploaded"
        );
        self.ui
            .annotate_upload_label(category, &upload_annotation(response.score));

        // A failed refresh is alerted by the queue; the upload itself stands.
        let _ = self.queue.refresh().await;

        Ok(UploadOutcome::Uploaded(response))
    }

    async fn submit(
        &self,
        category: UploadCategory,
        file: &SelectedFile,
    ) -> ClientResult<UploadResponse> {
        self.validator
            .validate_all(&file.name, file.content_type.as_deref(), file.bytes.len())?;

        let request = UploadRequest {
            document_base64: STANDARD.encode(&file.bytes),
            document_type: category.document_type(),
            student_id: self.student_id.clone(),
            file_name: file.name.clone(),
        };
        self.api.upload_document(&request).await
    }

    fn report(&self, err: ClientError) -> ClientError {
        log_error("Upload failed", &err);
        self.ui
            .alert(&format!("{}{}", UPLOAD_ERROR_PREFIX, err.user_message()));
        err
    }
}
