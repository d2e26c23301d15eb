use async_trait::async_trait;
use docreview_api_client::DocumentApi;
use docreview_core::models::{ActionItem, PreviewPayload, ReviewStatus, UploadRequest, UploadResponse};
use docreview_core::{ClientError, ClientResult};
use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

/// A failure the fake server should produce.
#[derive(Debug, Clone)]
pub enum FakeFailure {
    Server { status: u16, message: Option<String> },
    Transport(String),
}

impl FakeFailure {
    pub fn server(status: u16, message: &str) -> Self {
        FakeFailure::Server {
            status,
            message: Some(message.to_string()),
        }
    }

    fn to_error(&self) -> ClientError {
        match self {
            FakeFailure::Server { status, message } => ClientError::Server {
                status: *status,
                message: message.clone(),
            },
            FakeFailure::Transport(msg) => ClientError::Transport(msg.clone()),
        }
    }
}

type FetchHook = Box<dyn Fn(&str) + Send + Sync>;

/// In-memory review server.
#[derive(Default)]
pub struct FakeApi {
    action_items: Mutex<Vec<ActionItem>>,
    list_failure: Mutex<Option<FakeFailure>>,
    scripted_lists: Mutex<VecDeque<(Vec<ActionItem>, Duration)>>,
    documents: Mutex<HashMap<String, PreviewPayload>>,
    fetch_delays: Mutex<HashMap<String, Duration>>,
    on_fetch: Mutex<Option<FetchHook>>,
    upload_score: Mutex<f64>,
    upload_failure: Mutex<Option<FakeFailure>>,
    review_failure: Mutex<Option<FakeFailure>>,

    list_calls: AtomicUsize,
    fetches: Mutex<Vec<String>>,
    uploads: Mutex<Vec<UploadRequest>>,
    reviews: Mutex<Vec<(String, ReviewStatus)>>,
}

impl FakeApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_action_items(self, items: Vec<ActionItem>) -> Self {
        *self.action_items.lock().unwrap() = items;
        self
    }

    /// Answer the next list calls in order, each with its own items and delay.
    /// The stored items are used once the script runs out.
    pub fn with_list_responses(self, responses: Vec<(Vec<ActionItem>, Duration)>) -> Self {
        self.scripted_lists.lock().unwrap().extend(responses);
        self
    }

    pub fn with_document(self, document_id: &str, payload: PreviewPayload) -> Self {
        self.documents
            .lock()
            .unwrap()
            .insert(document_id.to_string(), payload);
        self
    }

    /// Hold the fetch of `document_id` for `delay` before answering.
    pub fn with_fetch_delay(self, document_id: &str, delay: Duration) -> Self {
        self.fetch_delays
            .lock()
            .unwrap()
            .insert(document_id.to_string(), delay);
        self
    }

    /// Run `hook` when a fetch is issued, before it is answered.
    pub fn on_fetch(&self, hook: impl Fn(&str) + Send + Sync + 'static) {
        *self.on_fetch.lock().unwrap() = Some(Box::new(hook));
    }

    pub fn with_upload_score(self, score: f64) -> Self {
        *self.upload_score.lock().unwrap() = score;
        self
    }

    pub fn set_action_items(&self, items: Vec<ActionItem>) {
        *self.action_items.lock().unwrap() = items;
    }

    pub fn fail_list(&self, failure: Option<FakeFailure>) {
        *self.list_failure.lock().unwrap() = failure;
    }

    pub fn fail_upload(&self, failure: Option<FakeFailure>) {
        *self.upload_failure.lock().unwrap() = failure;
    }

    pub fn fail_review(&self, failure: Option<FakeFailure>) {
        *self.review_failure.lock().unwrap() = failure;
    }

    pub fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }

    pub fn fetches(&self) -> Vec<String> {
        self.fetches.lock().unwrap().clone()
    }

    pub fn uploads(&self) -> Vec<UploadRequest> {
        self.uploads.lock().unwrap().clone()
    }

    pub fn reviews(&self) -> Vec<(String, ReviewStatus)> {
        self.reviews.lock().unwrap().clone()
    }
}

#[async_trait]
impl DocumentApi for FakeApi {
    async fn upload_document(&self, request: &UploadRequest) -> ClientResult<UploadResponse> {
        self.uploads.lock().unwrap().push(request.clone());
        if let Some(failure) = self.upload_failure.lock().unwrap().as_ref() {
            return Err(failure.to_error());
        }
        Ok(UploadResponse {
            score: *self.upload_score.lock().unwrap(),
            document_id: Some(format!("doc{}", self.uploads.lock().unwrap().len())),
            message: None,
        })
    }

    async fn list_action_items(&self) -> ClientResult<Vec<ActionItem>> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(failure) = self.list_failure.lock().unwrap().as_ref() {
            return Err(failure.to_error());
        }

        let scripted = self.scripted_lists.lock().unwrap().pop_front();
        if let Some((items, delay)) = scripted {
            tokio::time::sleep(delay).await;
            return Ok(items);
        }
        Ok(self.action_items.lock().unwrap().clone())
    }

    async fn fetch_document(&self, document_id: &str) -> ClientResult<PreviewPayload> {
        self.fetches.lock().unwrap().push(document_id.to_string());
        if let Some(hook) = self.on_fetch.lock().unwrap().as_ref() {
            hook(document_id);
        }

        let delay = self.fetch_delays.lock().unwrap().get(document_id).copied();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        self.documents
            .lock()
            .unwrap()
            .get(document_id)
            .cloned()
            .ok_or(ClientError::Server {
                status: 404,
                message: Some("Document not found".to_string()),
            })
    }

    async fn submit_review(
        &self,
        document_id: &str,
        status: ReviewStatus,
    ) -> ClientResult<serde_json::Value> {
        if let Some(failure) = self.review_failure.lock().unwrap().as_ref() {
            return Err(failure.to_error());
        }
        self.reviews
            .lock()
            .unwrap()
            .push((document_id.to_string(), status));
        Ok(serde_json::json!({ "message": "Review submitted successfully" }))
    }
}
