//! Review UI printing to a terminal

use docreview_core::models::{ActionItem, UploadCategory};
use docreview_services::{ReviewHeader, ReviewUi};
use std::io::Write;
use std::sync::Mutex;

use crate::truncate_string;

const EXPLANATION_WIDTH: usize = 48;

pub struct TerminalUi {
    out: Mutex<Box<dyn Write + Send>>,
}

impl TerminalUi {
    pub fn new(out: Box<dyn Write + Send>) -> Self {
        Self {
            out: Mutex::new(out),
        }
    }

    pub fn stdout() -> Self {
        Self::new(Box::new(std::io::stdout()))
    }

    fn line(&self, text: &str) {
        if let Ok(mut out) = self.out.lock() {
            if let Err(e) = writeln!(out, "{}", text) {
                tracing::warn!(error = %e, "Failed to write to terminal");
            }
        }
    }
}

impl ReviewUi for TerminalUi {
    fn render_action_items(&self, items: &[ActionItem]) {
        if items.is_empty() {
            self.line("No documents awaiting review.");
            return;
        }

        self.line(&format!(
            "{:<24} {:<22} {:>7}  {}",
            "DOCUMENT", "TYPE", "SCORE", "EXPLANATION"
        ));
        for item in items {
            self.line(&format!(
                "{:<24} {:<22} {:>7}  {}",
                truncate_string(&item.document_id, 24),
                item.document_type.label(),
                item.score,
                truncate_string(&item.explanation, EXPLANATION_WIDTH)
            ));
        }
    }

    fn annotate_upload_label(&self, category: UploadCategory, annotation: &str) {
        self.line(&format!(
            "{} {}",
            category.document_type().label(),
            annotation
        ));
    }

    fn alert(&self, message: &str) {
        self.line(&format!("[!] {}", message));
    }

    fn set_review_header(&self, header: &ReviewHeader) {
        self.line(&header.title);
        self.line(&header.score);
        self.line(&header.explanation);
    }

    fn show_modal(&self) {
        self.line("-- preview ready --");
    }

    fn hide_modal(&self) {
        self.line("-- review closed --");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use docreview_core::models::DocumentType;
    use std::sync::Arc;

    #[derive(Clone, Default)]
    struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

    impl Write for SharedBuffer {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    impl SharedBuffer {
        fn text(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    #[test]
    fn test_lists_items_in_order() {
        let buffer = SharedBuffer::default();
        let ui = TerminalUi::new(Box::new(buffer.clone()));

        ui.render_action_items(&[
            ActionItem {
                document_id: "doc2".to_string(),
                document_type: DocumentType::StudentW2,
                score: 40.0,
                explanation: "employer name unreadable".to_string(),
                student_id: None,
            },
            ActionItem {
                document_id: "doc1".to_string(),
                document_type: DocumentType::ProofOfCitizenship,
                score: 91.5,
                explanation: String::new(),
                student_id: None,
            },
        ]);

        let text = buffer.text();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[1].starts_with("doc2"));
        assert!(lines[1].contains("Student W2"));
        assert!(lines[2].contains("Proof of Citizenship"));
        assert!(lines[2].contains("91.5"));
    }

    #[test]
    fn test_label_and_alert() {
        let buffer = SharedBuffer::default();
        let ui = TerminalUi::new(Box::new(buffer.clone()));

        ui.annotate_upload_label(UploadCategory::W2, "✔ (Score: 87)");
        ui.alert("Upload failed: Unknown error");

        assert_eq!(
            buffer.text(),
            "Student W2 ✔ (Score: 87)\n[!] Upload failed: Unknown error\n"
        );
    }
}
