use std::sync::Arc;

use veneer_core::{
    Capabilities, DesktopPeer, EmbedError, NativeEmbedding, ParentWindow, Platform, SharedDesktop,
    Toolkit, WindowApi,
};

use super::{dispatch_inline, expect_api, open_peer};

/// Embeds the chain into a Win32 `HWND`.
///
/// The desktop is hidden, made opaque and pinned to the parent's top-left
/// corner before the child window opens, then shown.
#[derive(Debug, Clone, Default)]
pub struct Win32Embedding {
    background: [u8; 3],
}

impl Win32Embedding {
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

impl NativeEmbedding for Win32Embedding {
    fn name(&self) -> &'static str {
        "win32"
    }

    fn capabilities(&self) -> Capabilities {
        Platform::Windows.capabilities()
    }

    fn attach(
        &mut self,
        parent: &ParentWindow,
        desktop: &SharedDesktop,
        toolkit: &Arc<Toolkit>,
    ) -> Result<Box<dyn DesktopPeer>, EmbedError> {
        expect_api(parent, WindowApi::Win32)?;
        {
            let mut chain = desktop.lock();
            chain.set_visible(false);
            chain.set_opaque(true);
            chain.set_top_left_position(0, 0);
        }
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
