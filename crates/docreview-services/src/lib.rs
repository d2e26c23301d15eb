//! Review workflow services
//!
//! The action-item queue, the upload flow and the review session, tied
//! together by [`ReviewDesk`]. Everything user-visible goes through the view
//! traits in [`view`]; the server is reached through `DocumentApi`.

pub mod desk;
pub mod guard;
pub mod queue;
pub mod session;
#[cfg(any(test, feature = "test-helpers"))]
pub mod test_helpers;
pub mod upload;
pub mod view;

pub use desk::{ReviewDesk, PREVIEW_ERROR_PREFIX};
pub use guard::{EpochGuard, GuardedSink};
pub use queue::{ActionItemQueue, QUEUE_ERROR_PREFIX};
pub use session::{ReviewSession, SessionState, SessionTicket};
pub use upload::{upload_annotation, UploadFlow, UploadOutcome, UPLOAD_ERROR_PREFIX};
pub use view::{FilePicker, ReviewHeader, ReviewUi, SelectedFile};
