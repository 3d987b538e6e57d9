use std::sync::Arc;

use veneer_core::{
    Capabilities, DesktopPeer, EmbedError, NativeEmbedding, ParentWindow, Platform, SharedDesktop,
    Toolkit, WindowApi,
};

use super::{dispatch_inline, expect_api, open_peer};

/// Embeds the chain into an X11 window.
///
/// baseview runs the X11 child window on its own thread, so opening and
/// painting happen under the toolkit UI lock, and the queue is left to the
/// host timer instead of the frame callback.
#[derive(Debug, Clone, Default)]
pub struct X11Embedding {
    background: [u8; 3],
}

impl X11Embedding {
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

impl NativeEmbedding for X11Embedding {
    fn name(&self) -> &'static str {
        "x11"
    }

    fn capabilities(&self) -> Capabilities {
        Platform::Linux.capabilities()
    }

    fn attach(
        &mut self,
        parent: &ParentWindow,
        desktop: &SharedDesktop,
        toolkit: &Arc<Toolkit>,
    ) -> Result<Box<dyn DesktopPeer>, EmbedError> {
        expect_api(parent, WindowApi::X11)?;
        let _ui = toolkit.lock();
        desktop.lock().set_visible(false);
        let peer = open_peer(
            parent,
            desktop,
            toolkit,
            self.background,
            dispatch_inline(&*self),
        );
        desktop.lock().set_visible(true);
        Ok(Box::new(peer))
    }
}
