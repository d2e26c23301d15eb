//! Domain methods for the review API client.
//!
//! `DocumentApi` is the seam the review services depend on; `ApiClient`
//! is its HTTP implementation and tests substitute in-memory fakes.

use async_trait::async_trait;
use docreview_core::models::{
    ActionItem, PreviewPayload, ReviewRequest, ReviewStatus, UploadRequest, UploadResponse,
};
use docreview_core::ClientResult;

use crate::disposition::filename_from_content_disposition;
use crate::ApiClient;

/// Server endpoints consumed by the review workflow.
#[async_trait]
pub trait DocumentApi: Send + Sync {
    /// `POST /upload`
    async fn upload_document(&self, request: &UploadRequest) -> ClientResult<UploadResponse>;

    /// `GET /action-items`, in server order.
    async fn list_action_items(&self) -> ClientResult<Vec<ActionItem>>;

    /// `GET /document/{id}`
    async fn fetch_document(&self, document_id: &str) -> ClientResult<PreviewPayload>;

    /// `POST /review`. The acknowledgement body is returned as-is.
    async fn submit_review(
        &self,
        document_id: &str,
        status: ReviewStatus,
    ) -> ClientResult<serde_json::Value>;
}

#[async_trait]
impl DocumentApi for ApiClient {
    async fn upload_document(&self, request: &UploadRequest) -> ClientResult<UploadResponse> {
        tracing::debug!(
            file_name = %request.file_name,
            document_type = %request.document_type,
            encoded_len = request.document_base64.len(),
            "Uploading document"
        );
        self.post_json("/upload", request).await
    }

    async fn list_action_items(&self) -> ClientResult<Vec<ActionItem>> {
        self.get("/action-items").await
    }

    async fn fetch_document(&self, document_id: &str) -> ClientResult<PreviewPayload> {
        let path = format!("/document/{}", urlencoding::encode(document_id));
        let response = self.get_bytes(&path).await?;

        let filename = filename_from_content_disposition(response.content_disposition.as_deref());
        let content_type = response.content_type.unwrap_or_default();

        tracing::debug!(
            document_id = %document_id,
            content_type = %content_type,
            filename = %filename,
            size = response.bytes.len(),
            "Fetched document"
        );

        Ok(PreviewPayload::new(response.bytes, content_type, filename))
    }

    async fn submit_review(
        &self,
        document_id: &str,
        status: ReviewStatus,
    ) -> ClientResult<serde_json::Value> {
        let body = ReviewRequest {
            document_id: document_id.to_string(),
            status,
        };
        self.post_json("/review", &body).await
    }
}
