use async_trait::async_trait;
use bytes::Bytes;
use docreview_core::models::{ActionItem, UploadCategory};
use docreview_core::{ClientError, ClientResult};
use std::sync::Mutex;

use crate::view::{FilePicker, ReviewHeader, ReviewUi, SelectedFile};

#[derive(Debug, Clone, PartialEq)]
pub enum UiEvent {
    /// Document ids of a rendered list, in display order.
    Items(Vec<String>),
    Label(UploadCategory, String),
    Alert(String),
    Header(ReviewHeader),
    ShowModal,
    HideModal,
}

/// Review UI that records every call.
#[derive(Default)]
pub struct RecordingUi {
    events: Mutex<Vec<UiEvent>>,
}

impl RecordingUi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<UiEvent> {
        self.events.lock().unwrap().clone()
    }

    pub fn alerts(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                UiEvent::Alert(message) => Some(message),
                _ => None,
            })
            .collect()
    }

    pub fn labels(&self) -> Vec<(UploadCategory, String)> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                UiEvent::Label(category, text) => Some((category, text)),
                _ => None,
            })
            .collect()
    }

    /// Every list rendered so far.
    pub fn rendered_lists(&self) -> Vec<Vec<String>> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                UiEvent::Items(ids) => Some(ids),
                _ => None,
            })
            .collect()
    }

    pub fn header(&self) -> Option<ReviewHeader> {
        self.events().into_iter().rev().find_map(|e| match e {
            UiEvent::Header(header) => Some(header),
            _ => None,
        })
    }

    pub fn modal_visible(&self) -> bool {
        self.events()
            .iter()
            .rev()
            .find_map(|e| match e {
                UiEvent::ShowModal => Some(true),
                UiEvent::HideModal => Some(false),
                _ => None,
            })
            .unwrap_or(false)
    }

    pub fn clear(&self) {
        self.events.lock().unwrap().clear();
    }

    fn push(&self, event: UiEvent) {
        self.events.lock().unwrap().push(event);
    }
}

impl ReviewUi for RecordingUi {
    fn render_action_items(&self, items: &[ActionItem]) {
        self.push(UiEvent::Items(
            items.iter().map(|i| i.document_id.clone()).collect(),
        ));
    }

    fn annotate_upload_label(&self, category: UploadCategory, annotation: &str) {
        self.push(UiEvent::Label(category, annotation.to_string()));
    }

    fn alert(&self, message: &str) {
        self.push(UiEvent::Alert(message.to_string()));
    }

    fn set_review_header(&self, header: &ReviewHeader) {
        self.push(UiEvent::Header(header.clone()));
    }

    fn show_modal(&self) {
        self.push(UiEvent::ShowModal);
    }

    fn hide_modal(&self) {
        self.push(UiEvent::HideModal);
    }
}

/// File picker answering from a script instead of prompting.
#[derive(Default)]
pub struct ScriptedPicker {
    next: Mutex<Option<SelectedFile>>,
    fail_with: Mutex<Option<String>>,
    prompts: Mutex<Vec<String>>,
}

impl ScriptedPicker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer the next prompt with this file.
    pub fn select(&self, name: &str, bytes: &[u8]) {
        *self.next.lock().unwrap() = Some(SelectedFile {
            name: name.to_string(),
            bytes: Bytes::copy_from_slice(bytes),
            content_type: None,
        });
    }

    /// Answer the next prompt with a read error.
    pub fn fail_next(&self, message: &str) {
        *self.fail_with.lock().unwrap() = Some(message.to_string());
    }

    /// Accept filters of every prompt shown.
    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl FilePicker for ScriptedPicker {
    async fn pick_file(&self, accept: &str) -> ClientResult<Option<SelectedFile>> {
        self.prompts.lock().unwrap().push(accept.to_string());
        if let Some(message) = self.fail_with.lock().unwrap().take() {
            return Err(ClientError::Io(std::io::Error::other(message)));
        }
        Ok(self.next.lock().unwrap().take())
    }
}
