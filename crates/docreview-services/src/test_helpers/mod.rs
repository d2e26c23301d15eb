//! Test helpers for desk and flow tests
//!
//! In-memory server, UI and picker, plus a fixture wiring them into a
//! [`ReviewDesk`] with recording preview regions. No network, PDF library
//! or Word converter is needed.

pub mod fake_api;
pub mod recording_ui;

pub use fake_api::{FakeApi, FakeFailure};
pub use recording_ui::{RecordingUi, ScriptedPicker, UiEvent};

use docreview_core::models::{ActionItem, DocumentType, PreviewPayload};
use docreview_core::ClientConfig;
use docreview_processing::testing::{FakeDocxConverter, FakeRasterizer, RecordingSink};
use docreview_processing::{PreviewDispatcher, PreviewRegions};
use std::sync::Arc;

use crate::desk::ReviewDesk;

pub fn action_item(document_id: &str, document_type: DocumentType, score: f64) -> ActionItem {
    ActionItem {
        document_id: document_id.to_string(),
        document_type,
        score,
        explanation: String::new(),
        student_id: Some("student123".to_string()),
    }
}

pub fn pdf_payload(filename: &str) -> PreviewPayload {
    PreviewPayload::new(&b"%PDF-1.7\n%fake\n"[..], "application/pdf", filename)
}

pub fn png_payload(filename: &str) -> PreviewPayload {
    PreviewPayload::new(
        &[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A][..],
        "image/png",
        filename,
    )
}

pub fn docx_payload(filename: &str) -> PreviewPayload {
    PreviewPayload::new(
        &b"PK\x03\x04"[..],
        "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        filename,
    )
}

/// A desk plus handles on every collaborator it talks to.
pub struct DeskFixture {
    pub desk: ReviewDesk,
    pub api: Arc<FakeApi>,
    pub ui: Arc<RecordingUi>,
    pub picker: Arc<ScriptedPicker>,
    pub image: Arc<RecordingSink>,
    pub pdf: Arc<RecordingSink>,
    pub docx: Arc<RecordingSink>,
    pub rasterizer: Arc<FakeRasterizer>,
    pub converter: Arc<FakeDocxConverter>,
}

pub struct DeskFixtureBuilder {
    api: FakeApi,
    rasterizer: FakeRasterizer,
    converter: FakeDocxConverter,
    config: ClientConfig,
}

impl DeskFixture {
    pub fn builder(api: FakeApi) -> DeskFixtureBuilder {
        DeskFixtureBuilder {
            api,
            rasterizer: FakeRasterizer::letter(),
            converter: FakeDocxConverter::returning("<p>converted</p>"),
            config: ClientConfig::default(),
        }
    }

    pub fn new(api: FakeApi) -> Self {
        Self::builder(api).build()
    }
}

impl DeskFixtureBuilder {
    pub fn rasterizer(mut self, rasterizer: FakeRasterizer) -> Self {
        self.rasterizer = rasterizer;
        self
    }

    pub fn converter(mut self, converter: FakeDocxConverter) -> Self {
        self.converter = converter;
        self
    }

    pub fn config(mut self, config: ClientConfig) -> Self {
        self.config = config;
        self
    }

    pub fn build(self) -> DeskFixture {
        let api = Arc::new(self.api);
        let ui = Arc::new(RecordingUi::new());
        let picker = Arc::new(ScriptedPicker::new());
        let rasterizer = Arc::new(self.rasterizer);
        let converter = Arc::new(self.converter);
        let (image, pdf, docx) = (RecordingSink::new(), RecordingSink::new(), RecordingSink::new());

        let desk = ReviewDesk::new(
            &self.config,
            api.clone(),
            ui.clone(),
            picker.clone(),
            PreviewRegions::new(image.clone(), pdf.clone(), docx.clone()),
            PreviewDispatcher::new(rasterizer.clone(), converter.clone()),
        );

        DeskFixture {
            desk,
            api,
            ui,
            picker,
            image,
            pdf,
            docx,
            rasterizer,
            converter,
        }
    }
}
