//! Recording doubles shared by the integration tests.

#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use veneer_core::{
    Capabilities, DesktopPeer, EmbedError, Editor, EditorProvider, NativeEmbedding, ParentWindow,
    Platform, SharedDesktop, Size, TimerId, Toolkit,
};

/// Route `tracing` output to the test harness, filtered by `RUST_LOG`.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Counters observed by [`RecordingEmbedding`] and its peers.
#[derive(Debug, Default)]
pub struct EmbedLog {
    pub attaches: usize,
    pub detaches: usize,
    pub repaints: usize,
    pub parents: Vec<ParentWindow>,
    /// Most peers alive at the same time.
    pub max_live: usize,
}

impl EmbedLog {
    /// Peers attached and not yet detached.
    pub fn live(&self) -> usize {
        self.attaches - self.detaches
    }
}

/// Embedding that records every attach and detach.
pub struct RecordingEmbedding {
    pub log: Arc<Mutex<EmbedLog>>,
    pub capabilities: Capabilities,
    pub fail: bool,
    /// Fail only when attaching to this window.
    pub fail_for: Option<ParentWindow>,
}

impl RecordingEmbedding {
    pub fn for_platform(platform: Platform) -> (Self, Arc<Mutex<EmbedLog>>) {
        let log = Arc::new(Mutex::new(EmbedLog::default()));
        let embedding = Self {
            log: Arc::clone(&log),
            capabilities: platform.capabilities(),
            fail: false,
            fail_for: None,
        };
        (embedding, log)
    }
}

struct RecordingPeer {
    log: Arc<Mutex<EmbedLog>>,
}

impl DesktopPeer for RecordingPeer {
    fn detach(&mut self) {
        self.log.lock().detaches += 1;
    }

    fn repaint(&mut self) {
        self.log.lock().repaints += 1;
    }
}

impl NativeEmbedding for RecordingEmbedding {
    fn name(&self) -> &'static str {
        "recording"
    }

    fn capabilities(&self) -> Capabilities {
        self.capabilities
    }

    fn attach(
        &mut self,
        parent: &ParentWindow,
        desktop: &SharedDesktop,
        _toolkit: &Arc<Toolkit>,
    ) -> Result<Box<dyn DesktopPeer>, EmbedError> {
        if self.fail || self.fail_for == Some(*parent) {
            return Err(EmbedError::Unsupported {
                platform: Platform::Other,
            });
        }
        desktop.lock().set_visible(true);
        let mut log = self.log.lock();
        log.attaches += 1;
        log.parents.push(*parent);
        log.max_live = log.max_live.max(log.live());
        Ok(Box::new(RecordingPeer {
            log: Arc::clone(&self.log),
        }))
    }
}

/// Editor with a fixed natural size that records resize notifications.
pub struct FixedEditor {
    pub size: Size,
    pub resized: Arc<Mutex<Vec<(f64, f64)>>>,
}

impl Editor for FixedEditor {
    fn size(&self) -> Size {
        self.size
    }

    fn resized(&mut self, width: f64, height: f64) {
        self.resized.lock().push((width, height));
    }

    fn ui(&mut self, ui: &mut egui::Ui) {
        ui.label("fixed");
    }
}

/// Provider handing out [`FixedEditor`]s and numbering timers.
#[derive(Default)]
pub struct MockProvider {
    pub decline: bool,
    pub refuse_timers: bool,
    pub editors_created: usize,
    pub next_timer: u32,
    pub registered: Vec<(TimerId, Duration)>,
    pub unregistered: Vec<TimerId>,
    pub resized: Arc<Mutex<Vec<(f64, f64)>>>,
}

impl EditorProvider for MockProvider {
    fn create_editor(&mut self, _toolkit: &Arc<Toolkit>) -> Option<Box<dyn Editor>> {
        if self.decline {
            return None;
        }
        self.editors_created += 1;
        Some(Box::new(FixedEditor {
            size: Size::new(400, 300),
            resized: Arc::clone(&self.resized),
        }))
    }

    fn register_timer(&mut self, period: Duration) -> Option<TimerId> {
        if self.refuse_timers {
            return None;
        }
        self.next_timer += 1;
        let id = TimerId(self.next_timer);
        self.registered.push((id, period));
        Some(id)
    }

    fn unregister_timer(&mut self, id: TimerId) {
        self.unregistered.push(id);
    }
}
