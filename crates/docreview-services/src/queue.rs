//! Action-item queue

use docreview_api_client::DocumentApi;
use docreview_core::error::log_error;
use docreview_core::models::ActionItem;
use docreview_core::{ClientResult, ErrorMetadata};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use crate::view::ReviewUi;

pub const QUEUE_ERROR_PREFIX: &str = "Failed to fetch action items: ";

/// The list of documents awaiting review, as last reported by the server.
pub struct ActionItemQueue {
    api: Arc<dyn DocumentApi>,
    ui: Arc<dyn ReviewUi>,
    items: Mutex<Vec<ActionItem>>,
    generation: AtomicU64,
}

impl ActionItemQueue {
    pub fn new(api: Arc<dyn DocumentApi>, ui: Arc<dyn ReviewUi>) -> Self {
        Self {
            api,
            ui,
            items: Mutex::new(Vec::new()),
            generation: AtomicU64::new(0),
        }
    }

    /// Replace the displayed list with the server's. On failure the list is
    /// left as it was and the reviewer is alerted.
    #[tracing::instrument(skip(self))]
    pub async fn refresh(&self) -> ClientResult<Vec<ActionItem>> {
        match self.api.list_action_items().await {
            Ok(items) => {
                tracing::info!(count = items.len(), "Action items refreshed");
                self.replace(items.clone());
                self.ui.render_action_items(&items);
                Ok(items)
            }
            Err(err) => {
                log_error("Error fetching action items", &err);
                self.ui
                    .alert(&format!("{}{}", QUEUE_ERROR_PREFIX, err.user_message()));
                Err(err)
            }
        }
    }

    fn replace(&self, items: Vec<ActionItem>) {
        if let Ok(mut current) = self.items.lock() {
            *current = items;
        }
        self.generation.fetch_add(1, Ordering::SeqCst);
    }

    /// Snapshot of the displayed list.
    pub fn items(&self) -> Vec<ActionItem> {
        self.items
            .lock()
            .map(|items| items.clone())
            .unwrap_or_default()
    }

    pub fn find(&self, document_id: &str) -> Option<ActionItem> {
        self.items
            .lock()
            .ok()?
            .iter()
            .find(|item| item.document_id == document_id)
            .cloned()
    }

    /// Number of successful refreshes so far.
    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }
}
