//! View traits implemented by a front-end

use async_trait::async_trait;
use bytes::Bytes;
use docreview_core::models::{ActionItem, DocumentType, UploadCategory};
use docreview_core::ClientResult;

/// Header lines of the review modal.
#[derive(Debug, Clone, PartialEq)]
pub struct ReviewHeader {
    pub title: String,
    pub score: String,
    pub explanation: String,
}

impl ReviewHeader {
    pub fn new(document_type: DocumentType, score: f64, explanation: &str) -> Self {
        Self {
            title: format!("Reviewing document: {}", document_type),
            score: format!("Score: {}", score),
            explanation: format!("Explanation: {}", explanation),
        }
    }
}

/// Everything the workflow shows outside the preview regions.
pub trait ReviewUi: Send + Sync {
    /// Replace the displayed queue with `items`, in the given order.
    fn render_action_items(&self, items: &[ActionItem]);

    /// Append `annotation` to the label of an upload entry point.
    fn annotate_upload_label(&self, category: UploadCategory, annotation: &str);

    /// Blocking notification.
    fn alert(&self, message: &str);

    fn set_review_header(&self, header: &ReviewHeader);

    fn show_modal(&self);

    fn hide_modal(&self);
}

/// A file chosen by the user.
#[derive(Debug, Clone)]
pub struct SelectedFile {
    pub name: String,
    pub bytes: Bytes,
    /// Media type reported by the picker, if any.
    pub content_type: Option<String>,
}

/// Prompts for exactly one local file.
#[async_trait]
pub trait FilePicker: Send + Sync {
    /// `Ok(None)` when the prompt is cancelled.
    async fn pick_file(&self, accept: &str) -> ClientResult<Option<SelectedFile>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_review_header_text() {
        let header = ReviewHeader::new(DocumentType::StudentW2, 55.0, "low confidence");
        assert_eq!(header.title, "Reviewing document: Student W2");
        assert_eq!(header.score, "Score: 55");
        assert_eq!(header.explanation, "Explanation: low confidence");

        let header = ReviewHeader::new(DocumentType::ProofOfCitizenship, 72.5, "");
        assert_eq!(header.score, "Score: 72.5");
        assert_eq!(header.explanation, "Explanation: ");
    }
}
