use std::sync::Arc;

use veneer_core::{
    Capabilities, DesktopPeer, EmbedError, NativeEmbedding, ParentWindow, Platform, SharedDesktop,
    Toolkit, WindowApi,
};

use super::{dispatch_inline, expect_api, open_peer};

/// Embeds the chain into an `NSView`.
///
/// The view is added as-is and repainted once attached. Runtime rescaling
/// is unavailable; AppKit reports sizes in points already.
#[derive(Debug, Clone, Default)]
pub struct CocoaEmbedding {
    background: [u8; 3],
}

impl CocoaEmbedding {
    /// Embedding with a black background.
    pub fn new() -> Self {
        Self::default()
    }

    /// Colour painted behind the editor.
    pub fn with_background(mut self, background: [u8; 3]) -> Self {
        self.background = background;
        self
    }
}

impl NativeEmbedding for CocoaEmbedding {
    fn name(&self) -> &'static str {
        "cocoa"
    }

    fn capabilities(&self) -> Capabilities {
        Platform::MacOs.capabilities()
    }

    fn attach(
        &mut self,
        parent: &ParentWindow,
        desktop: &SharedDesktop,
        toolkit: &Arc<Toolkit>,
    ) -> Result<Box<dyn DesktopPeer>, EmbedError> {
        expect_api(parent, WindowApi::Cocoa)?;
        let mut peer = open_peer(
            parent,
            desktop,
            toolkit,
            self.background,
            dispatch_inline(&*self),
        );
        desktop.lock().set_visible(true);
        peer.repaint();
        Ok(Box::new(peer))
    }
}
