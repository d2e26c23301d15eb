//! Epoch guard for display sinks
//!
//! Renderers keep running after the session moves on; their sinks are
//! wrapped so writes from a superseded epoch are dropped.

use docreview_processing::{DisplaySink, PreviewRegions, SinkContent};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Shared view of the session's current epoch.
#[derive(Clone, Default)]
pub struct EpochGuard {
    live: Arc<AtomicU64>,
}

impl EpochGuard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Epochs only move forward; an older value is ignored.
    pub fn advance_to(&self, epoch: u64) {
        self.live.fetch_max(epoch, Ordering::SeqCst);
    }

    pub fn is_live(&self, epoch: u64) -> bool {
        self.live.load(Ordering::SeqCst) == epoch
    }

    pub fn guard_sink(&self, inner: Arc<dyn DisplaySink>, epoch: u64) -> Arc<dyn DisplaySink> {
        Arc::new(GuardedSink {
            inner,
            epoch,
            live: self.live.clone(),
        })
    }

    /// Regions that only accept writes while `epoch` is live.
    pub fn guard_regions(&self, regions: &PreviewRegions, epoch: u64) -> PreviewRegions {
        regions.map(|sink| self.guard_sink(sink, epoch))
    }
}

pub struct GuardedSink {
    inner: Arc<dyn DisplaySink>,
    epoch: u64,
    live: Arc<AtomicU64>,
}

impl GuardedSink {
    fn is_live(&self) -> bool {
        let live = self.live.load(Ordering::SeqCst) == self.epoch;
        if !live {
            tracing::debug!(epoch = self.epoch, "Dropping write from superseded preview");
        }
        live
    }
}

impl DisplaySink for GuardedSink {
    fn accept(&self, content: SinkContent) {
        if self.is_live() {
            self.inner.accept(content);
        }
    }

    fn show(&self) {
        if self.is_live() {
            self.inner.show();
        }
    }

    fn hide(&self) {
        if self.is_live() {
            self.inner.hide();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use docreview_processing::testing::{RecordingSink, SinkEvent};

    #[test]
    fn test_forwards_while_live() {
        let guard = EpochGuard::new();
        guard.advance_to(3);
        let inner = RecordingSink::new();
        let sink = guard.guard_sink(inner.clone(), 3);

        sink.show();
        sink.accept(SinkContent::Text("hello".to_string()));

        assert_eq!(
            inner.events(),
            vec![
                SinkEvent::Show,
                SinkEvent::Accept(SinkContent::Text("hello".to_string()))
            ]
        );
    }

    #[test]
    fn test_drops_after_epoch_moves() {
        let guard = EpochGuard::new();
        guard.advance_to(1);
        let inner = RecordingSink::new();
        let regions = PreviewRegions::new(inner.clone(), inner.clone(), inner.clone());
        let guarded = guard.guard_regions(&regions, 1);

        guard.advance_to(2);
        guarded.pdf.show();
        guarded.docx.accept(SinkContent::Text("late".to_string()));
        guarded.image.hide();

        assert!(inner.events().is_empty());
        assert!(!guard.is_live(1));
        assert!(guard.is_live(2));
    }

    #[test]
    fn test_late_advance_does_not_move_backwards() {
        let guard = EpochGuard::new();
        guard.advance_to(5);
        let inner = RecordingSink::new();
        let sink = guard.guard_sink(inner.clone(), 5);

        // A close that computed epoch 4 finishes after open moved to 5.
        guard.advance_to(4);
        sink.show();

        assert!(guard.is_live(5));
        assert_eq!(inner.events(), vec![SinkEvent::Show]);
    }
}
