//! Review session state machine
//!
//! ```text
//! Closed --open--> Loading --complete--> Ready(kind)
//!                          --fail------> Failed(message)
//! any ----close--> Closed
//! ```
//!
//! Every `open` and `close` advances the epoch. Work started under an older
//! epoch holds a stale ticket and its results are rejected.

use docreview_core::{ClientError, ClientResult};
use docreview_processing::RendererKind;

#[derive(Debug, Clone, PartialEq)]
pub enum SessionState {
    Closed,
    Loading,
    Ready(RendererKind),
    Failed(String),
}

/// Proof that a piece of work belongs to a particular `open`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionTicket {
    pub epoch: u64,
    pub document_id: String,
}

#[derive(Debug)]
pub struct ReviewSession {
    open_document_id: Option<String>,
    state: SessionState,
    epoch: u64,
}

impl Default for ReviewSession {
    fn default() -> Self {
        Self::new()
    }
}

impl ReviewSession {
    pub fn new() -> Self {
        Self {
            open_document_id: None,
            state: SessionState::Closed,
            epoch: 0,
        }
    }

    /// Bind `document_id`, discarding any previous binding.
    pub fn open(&mut self, document_id: &str) -> SessionTicket {
        self.epoch += 1;
        self.open_document_id = Some(document_id.to_string());
        self.state = SessionState::Loading;
        SessionTicket {
            epoch: self.epoch,
            document_id: document_id.to_string(),
        }
    }

    pub fn is_current(&self, ticket: &SessionTicket) -> bool {
        ticket.epoch == self.epoch
            && self.open_document_id.as_deref() == Some(ticket.document_id.as_str())
    }

    fn check(&self, ticket: &SessionTicket) -> ClientResult<()> {
        if self.is_current(ticket) {
            Ok(())
        } else {
            Err(ClientError::StaleSession {
                document_id: ticket.document_id.clone(),
            })
        }
    }

    pub fn complete(&mut self, ticket: &SessionTicket, kind: RendererKind) -> ClientResult<()> {
        self.check(ticket)?;
        self.state = SessionState::Ready(kind);
        Ok(())
    }

    pub fn fail(&mut self, ticket: &SessionTicket, message: impl Into<String>) -> ClientResult<()> {
        self.check(ticket)?;
        self.state = SessionState::Failed(message.into());
        Ok(())
    }

    /// Unbind regardless of in-flight work. Returns the new epoch.
    pub fn close(&mut self) -> u64 {
        self.epoch += 1;
        self.open_document_id = None;
        self.state = SessionState::Closed;
        self.epoch
    }

    /// Ticket for the current binding, if a document is open.
    pub fn current_ticket(&self) -> Option<SessionTicket> {
        self.open_document_id.as_ref().map(|id| SessionTicket {
            epoch: self.epoch,
            document_id: id.clone(),
        })
    }

    pub fn open_document_id(&self) -> Option<&str> {
        self.open_document_id.as_deref()
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn is_open(&self) -> bool {
        self.open_document_id.is_some()
    }
}
