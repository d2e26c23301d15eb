//! In-memory collaborators for renderer and controller tests
//!
//! No PDF library or Word converter is needed; every fake records what it
//! was asked to do so tests can assert on the exact sequence.

use async_trait::async_trait;
use bytes::Bytes;
use docreview_core::{ClientError, ClientResult};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::sink::{Canvas, DisplaySink, SinkContent};
use crate::traits::{DocxConverter, PdfRasterizer, Viewport};

/// One call made on a [`RecordingSink`].
#[derive(Debug, Clone, PartialEq)]
pub enum SinkEvent {
    Accept(SinkContent),
    Show,
    Hide,
}

/// Display sink that records every call and tracks visibility.
#[derive(Default)]
pub struct RecordingSink {
    events: Mutex<Vec<SinkEvent>>,
}

impl RecordingSink {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn events(&self) -> Vec<SinkEvent> {
        self.events.lock().unwrap().clone()
    }

    pub fn is_visible(&self) -> bool {
        self.events
            .lock()
            .unwrap()
            .iter()
            .rev()
            .find_map(|e| match e {
                SinkEvent::Show => Some(true),
                SinkEvent::Hide => Some(false),
                SinkEvent::Accept(_) => None,
            })
            .unwrap_or(false)
    }

    /// Latest accepted content.
    pub fn content(&self) -> SinkContent {
        self.events
            .lock()
            .unwrap()
            .iter()
            .rev()
            .find_map(|e| match e {
                SinkEvent::Accept(content) => Some(content.clone()),
                _ => None,
            })
            .unwrap_or(SinkContent::Empty)
    }

    pub fn clear_events(&self) {
        self.events.lock().unwrap().clear();
    }
}

impl DisplaySink for RecordingSink {
    fn accept(&self, content: SinkContent) {
        self.events.lock().unwrap().push(SinkEvent::Accept(content));
    }

    fn show(&self) {
        self.events.lock().unwrap().push(SinkEvent::Show);
    }

    fn hide(&self) {
        self.events.lock().unwrap().push(SinkEvent::Hide);
    }
}

/// Rasterizer reporting a fixed page size in points and filling the canvas with one colour.
pub struct FakeRasterizer {
    pub page_width_pt: f32,
    pub page_height_pt: f32,
    pub page_count: u32,
    pub delay: Option<Duration>,
    calls: Mutex<Vec<(u32, f32)>>,
}

impl FakeRasterizer {
    /// US letter, one page.
    pub fn letter() -> Self {
        Self {
            page_width_pt: 612.0,
            page_height_pt: 792.0,
            page_count: 1,
            delay: None,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn with_pages(mut self, page_count: u32) -> Self {
        self.page_count = page_count;
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// `(page_number, scale)` of every `render_page` call.
    pub fn render_calls(&self) -> Vec<(u32, f32)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl PdfRasterizer for FakeRasterizer {
    async fn page_viewport(
        &self,
        pdf: &Bytes,
        page_number: u32,
        scale: f32,
    ) -> ClientResult<Viewport> {
        if !pdf.starts_with(b"%PDF") {
            return Err(ClientError::Rendering("Invalid PDF structure".to_string()));
        }
        if page_number == 0 || page_number > self.page_count {
            return Err(ClientError::Rendering(format!(
                "Page {} out of range",
                page_number
            )));
        }
        Ok(Viewport {
            width: self.page_width_pt * scale,
            height: self.page_height_pt * scale,
            scale,
        })
    }

    async fn render_page(
        &self,
        _pdf: &Bytes,
        page_number: u32,
        viewport: Viewport,
        canvas: &mut Canvas,
    ) -> ClientResult<()> {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        self.calls.lock().unwrap().push((page_number, viewport.scale));
        for px in canvas.pixels.chunks_mut(4) {
            px.copy_from_slice(&[255, 255, 255, 255]);
        }
        Ok(())
    }
}

/// Converter returning canned HTML, or a canned failure.
pub struct FakeDocxConverter {
    result: Result<String, String>,
    delay: Option<Duration>,
    calls: AtomicUsize,
}

impl FakeDocxConverter {
    pub fn returning(html: &str) -> Self {
        Self {
            result: Ok(html.to_string()),
            delay: None,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            result: Err(message.to_string()),
            delay: None,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl DocxConverter for FakeDocxConverter {
    async fn convert_to_html(&self, _document: Bytes) -> ClientResult<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        self.result.clone().map_err(ClientError::Conversion)
    }
}
