//! Review desk - sequences every user action of the review workflow
//!
//! Owns the queue, the upload flow and the single review session. The
//! session lock is never held across an await; each async stage re-checks
//! its ticket instead.

use docreview_api_client::DocumentApi;
use docreview_core::error::log_error;
use docreview_core::models::{ActionItem, DocumentType, PreviewPayload, ReviewStatus, UploadCategory};
use docreview_core::{ClientConfig, ClientError, ClientResult, ErrorMetadata, Surface};
use docreview_processing::{classify_payload, PreviewDispatcher, PreviewRegions, RendererKind, UploadValidator};
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::guard::EpochGuard;
use crate::queue::ActionItemQueue;
use crate::session::{ReviewSession, SessionState, SessionTicket};
use crate::upload::{UploadFlow, UploadOutcome};
use crate::view::{FilePicker, ReviewHeader, ReviewUi};

pub const PREVIEW_ERROR_PREFIX: &str = "Error loading document preview: ";

pub struct ReviewDesk {
    api: Arc<dyn DocumentApi>,
    ui: Arc<dyn ReviewUi>,
    regions: PreviewRegions,
    dispatcher: PreviewDispatcher,
    queue: Arc<ActionItemQueue>,
    uploads: UploadFlow,
    session: Mutex<ReviewSession>,
    guard: EpochGuard,
}

impl ReviewDesk {
    pub fn new(
        config: &ClientConfig,
        api: Arc<dyn DocumentApi>,
        ui: Arc<dyn ReviewUi>,
        picker: Arc<dyn FilePicker>,
        regions: PreviewRegions,
        dispatcher: PreviewDispatcher,
    ) -> Self {
        let queue = Arc::new(ActionItemQueue::new(api.clone(), ui.clone()));
        let uploads = UploadFlow::new(
            api.clone(),
            ui.clone(),
            picker,
            queue.clone(),
            UploadValidator::from_config(config),
            config.student_id.clone(),
        );

        Self {
            api,
            ui,
            regions,
            dispatcher,
            queue,
            uploads,
            session: Mutex::new(ReviewSession::new()),
            guard: EpochGuard::new(),
        }
    }

    pub fn queue(&self) -> &ActionItemQueue {
        &self.queue
    }

    /// Reload the action-item list (initial load, or on demand).
    pub async fn refresh(&self) -> ClientResult<Vec<ActionItem>> {
        self.queue.refresh().await
    }

    pub async fn upload(&self, category: UploadCategory) -> ClientResult<UploadOutcome> {
        self.uploads.upload(category).await
    }

    /// Open the review modal for a queued item.
    pub async fn open_item(&self, item: &ActionItem) -> ClientResult<RendererKind> {
        self.open_review(
            &item.document_id,
            item.document_type,
            item.score,
            &item.explanation,
        )
        .await
    }

    /// Bind the session to `document_id`, fetch the document and render its
    /// preview. The regions are reset before the fetch is issued.
    ///
    /// Returns `StaleSession` when the session moved on while this call was
    /// in flight; nothing from a stale call reaches the display.
    #[tracing::instrument(skip(self, document_type, explanation), fields(document_type = %document_type))]
    pub async fn open_review(
        &self,
        document_id: &str,
        document_type: DocumentType,
        score: f64,
        explanation: &str,
    ) -> ClientResult<RendererKind> {
        let ticket = {
            let mut session = self.session.lock().await;
            let ticket = session.open(document_id);
            self.guard.advance_to(ticket.epoch);
            ticket
        };

        self.ui
            .set_review_header(&ReviewHeader::new(document_type, score, explanation));
        self.regions.reset();

        let payload = match self.api.fetch_document(document_id).await {
            Ok(payload) => payload,
            Err(err) => return Err(self.preview_failed(&ticket, err).await),
        };
        if !self.guard.is_live(ticket.epoch) {
            return Err(stale(&ticket));
        }

        let kind = match classify_payload(&payload) {
            Ok(kind) => kind,
            Err(err) => return Err(self.preview_failed(&ticket, err).await),
        };

        // Shown before rendering completes so interim content is visible.
        self.ui.show_modal();

        match self.render(&ticket, kind, &payload).await {
            Ok(()) => {
                self.session.lock().await.complete(&ticket, kind)?;
                tracing::info!(document_id = %document_id, renderer = %kind, "Preview ready");
                Ok(kind)
            }
            Err(err) => Err(self.preview_failed(&ticket, err).await),
        }
    }

    async fn render(
        &self,
        ticket: &SessionTicket,
        kind: RendererKind,
        payload: &PreviewPayload,
    ) -> ClientResult<()> {
        let regions = self.guard.guard_regions(&self.regions, ticket.epoch);
        self.dispatcher.render_kind(kind, payload, &regions).await?;
        if !self.guard.is_live(ticket.epoch) {
            return Err(stale(ticket));
        }
        Ok(())
    }

    /// Record a preview failure and present it, unless the session moved on.
    async fn preview_failed(&self, ticket: &SessionTicket, err: ClientError) -> ClientError {
        if err.is_stale() {
            tracing::debug!(document_id = %ticket.document_id, "Discarding superseded preview");
            return err;
        }

        let recorded = self.session.lock().await.fail(ticket, err.to_string());
        if let Err(stale) = recorded {
            tracing::debug!(
                document_id = %ticket.document_id,
                error = %err,
                "Discarding failure of superseded preview"
            );
            return stale;
        }

        log_error("Error loading document preview", &err);
        if err.surface() == Surface::Alert {
            self.ui.alert(&format!("{}{}", PREVIEW_ERROR_PREFIX, err));
        }
        err
    }

    /// Post the reviewer's decision for the open document.
    ///
    /// On success the session is closed and the queue refreshed once. On
    /// failure the session stays open and the error is only logged.
    #[tracing::instrument(skip(self, status), fields(status = %status))]
    pub async fn submit_decision(&self, status: ReviewStatus) -> ClientResult<()> {
        let Some(ticket) = self.session.lock().await.current_ticket() else {
            tracing::debug!("Decision submitted without an open document");
            return Err(ClientError::NoOpenSession);
        };

        if let Err(err) = self.api.submit_review(&ticket.document_id, status).await {
            log_error("Error submitting review", &err);
            return Err(err);
        }

        tracing::info!(document_id = %ticket.document_id, "Review decision recorded");
        self.close_if_current(&ticket).await;

        // A failed refresh is alerted by the queue; the decision itself stands.
        let _ = self.queue.refresh().await;
        Ok(())
    }

    async fn close_if_current(&self, ticket: &SessionTicket) {
        let mut session = self.session.lock().await;
        if session.is_current(ticket) {
            let epoch = session.close();
            self.guard.advance_to(epoch);
            drop(session);
            self.ui.hide_modal();
        } else {
            tracing::debug!(
                document_id = %ticket.document_id,
                "Another document was opened meanwhile, leaving it open"
            );
        }
    }

    /// Close the modal. In-flight preview work becomes stale.
    pub async fn close(&self) {
        let mut session = self.session.lock().await;
        let epoch = session.close();
        self.guard.advance_to(epoch);
        drop(session);
        self.ui.hide_modal();
    }

    pub async fn open_document_id(&self) -> Option<String> {
        self.session
            .lock()
            .await
            .open_document_id()
            .map(str::to_string)
    }

    pub async fn session_state(&self) -> SessionState {
        self.session.lock().await.state().clone()
    }
}

fn stale(ticket: &SessionTicket) -> ClientError {
    ClientError::StaleSession {
        document_id: ticket.document_id.clone(),
    }
}
