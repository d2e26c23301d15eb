//! HTTP client for the document review server.
//!
//! Provides a minimal client with generic GET/POST helpers and the four
//! domain methods the review workflow needs (upload, list action items,
//! fetch a document, submit a decision). Every call is a single attempt;
//! failures are mapped onto `ClientError` and never retried here.

pub mod api;
pub mod disposition;

use bytes::Bytes;
use docreview_core::{ClientConfig, ClientError, ClientResult};
use reqwest::header::{HeaderMap, CONTENT_DISPOSITION, CONTENT_TYPE};
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use std::time::Duration;

pub use api::DocumentApi;
pub use disposition::filename_from_content_disposition;

/// HTTP client for the review server.
#[derive(Clone, Debug)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

/// Raw binary response with the headers used for preview classification.
#[derive(Debug, Clone)]
pub struct BinaryResponse {
    pub bytes: Bytes,
    pub content_type: Option<String>,
    pub content_disposition: Option<String>,
}

impl ApiClient {
    pub fn new(base_url: &str, timeout: Duration) -> ClientResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ClientError::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn from_config(config: &ClientConfig) -> ClientResult<Self> {
        Self::new(
            &config.api_url,
            Duration::from_secs(config.request_timeout_secs),
        )
    }

    pub fn build_url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// GET request. Deserializes JSON response.
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        let url = self.build_url(path);
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(transport_error)?;

        let response = ensure_success(response).await?;
        decode_json(response).await
    }

    /// POST JSON body and deserialize response.
    pub async fn post_json<T: DeserializeOwned, B: serde::Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        let url = self.build_url(path);
        let response = self
            .client
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(transport_error)?;

        let response = ensure_success(response).await?;
        decode_json(response).await
    }

    /// GET a binary body together with its content headers.
    pub async fn get_bytes(&self, path: &str) -> ClientResult<BinaryResponse> {
        let url = self.build_url(path);
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(transport_error)?;

        let response = ensure_success(response).await?;
        let headers = response.headers().clone();
        let bytes = response.bytes().await.map_err(transport_error)?;

        Ok(BinaryResponse {
            bytes,
            content_type: header_string(&headers, CONTENT_TYPE.as_str()),
            content_disposition: header_string(&headers, CONTENT_DISPOSITION.as_str()),
        })
    }
}

fn transport_error(err: reqwest::Error) -> ClientError {
    if err.is_decode() {
        ClientError::Decode(err.to_string())
    } else {
        ClientError::Transport(err.to_string())
    }
}

fn header_string(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(|s| s.to_string())
}

/// Turn a non-2xx response into `ClientError::Server`, extracting the `error`
/// field of a JSON error body when there is one.
async fn ensure_success(response: Response) -> ClientResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<serde_json::Value>(&body)
        .ok()
        .and_then(|v| v.get("error").and_then(|e| e.as_str()).map(String::from));

    tracing::debug!(status = status.as_u16(), body = %body, "API request failed");

    Err(ClientError::Server {
        status: status.as_u16(),
        message,
    })
}

async fn decode_json<T: DeserializeOwned>(response: Response) -> ClientResult<T> {
    let body = response.bytes().await.map_err(transport_error)?;
    serde_json::from_slice(&body).map_err(ClientError::from)
}

// Re-export domain types for convenience.
pub use docreview_core::models::{
    ActionItem, DocumentType, PreviewPayload, ReviewRequest, ReviewStatus, UploadRequest,
    UploadResponse,
};
