//! Native embeddings that open a baseview child window in the host window.
//!
//! All three embeddings share the same peer: a baseview window whose
//! handler paints the chain (see [`crate::egui_bridge`]). They differ only in
//! the desktop bookkeeping around opening it and in whether the host has to
//! pump the toolkit queue.
//!
//! | Embedding | Around open | Queue drained by |
//! |-----------|-------------|------------------|
//! | [`Win32Embedding`] | hide, opaque, origin (0, 0) / show | window frame |
//! | [`CocoaEmbedding`] | show and repaint | window frame |
//! | [`X11Embedding`] | UI lock held: hide / show | host timer |

mod cocoa;
mod win32;
mod x11;

pub use cocoa::CocoaEmbedding;
pub use win32::Win32Embedding;
pub use x11::X11Embedding;

use std::ffi::{c_ulong, c_void};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use baseview::WindowHandle;
use raw_window_handle::{
    AppKitWindowHandle, HasRawWindowHandle, RawWindowHandle, Win32WindowHandle, XlibWindowHandle,
};
use veneer_core::{
    DesktopPeer, EmbedError, NativeEmbedding, ParentWindow, Platform, SharedDesktop, ShimConfig,
    Toolkit, UnsupportedEmbedding, WindowApi,
};

use crate::egui_bridge::{self, BridgeOptions};

/// Title given to editor child windows.
const WINDOW_TITLE: &str = "veneer";

/// Pick the embedding for the platform this binary runs on.
pub fn native_embedding(config: &ShimConfig) -> Box<dyn NativeEmbedding> {
    let background = config.background;
    match Platform::current() {
        Platform::Windows => Box::new(Win32Embedding::new().with_background(background)),
        Platform::MacOs => Box::new(CocoaEmbedding::new().with_background(background)),
        Platform::Linux => Box::new(X11Embedding::new().with_background(background)),
        Platform::Other => Box::new(UnsupportedEmbedding),
    }
}

/// Host parent window handed to baseview.
///
/// # Safety
///
/// The handle stays valid until the plugin's GUI is destroyed; CLAP hosts
/// call `destroy()` before closing the parent.
struct HostParent(RawWindowHandle);

#[allow(unsafe_code)]
// SAFETY: HasRawWindowHandle is unsafe in rwh 0.5. The impl returns a Copy
// value received from the host, valid for the GUI lifetime.
unsafe impl HasRawWindowHandle for HostParent {
    fn raw_window_handle(&self) -> RawWindowHandle {
        self.0
    }
}

/// Rebuild the native handle for `parent`.
pub(crate) fn raw_handle(parent: &ParentWindow) -> RawWindowHandle {
    match *parent {
        ParentWindow::Win32 { hwnd } => {
            let mut handle = Win32WindowHandle::empty();
            handle.hwnd = hwnd as *mut c_void;
            RawWindowHandle::Win32(handle)
        }
        ParentWindow::Cocoa { ns_view } => {
            let mut handle = AppKitWindowHandle::empty();
            handle.ns_view = ns_view as *mut c_void;
            RawWindowHandle::AppKit(handle)
        }
        ParentWindow::X11 { window } => {
            let mut handle = XlibWindowHandle::empty();
            handle.window = window as c_ulong;
            RawWindowHandle::Xlib(handle)
        }
    }
}

fn expect_api(parent: &ParentWindow, expected: WindowApi) -> Result<(), EmbedError> {
    let found = parent.api();
    if found == expected {
        Ok(())
    } else {
        Err(EmbedError::ApiMismatch { expected, found })
    }
}

/// Whether the window frame drains the toolkit queue. Platforms without a
/// host-driven event pump rely on it.
pub(crate) fn dispatch_inline(embedding: &dyn NativeEmbedding) -> bool {
    !embedding.capabilities().event_pump
}

/// Open the child window and wrap it in a peer.
fn open_peer(
    parent: &ParentWindow,
    desktop: &SharedDesktop,
    toolkit: &Arc<Toolkit>,
    background: [u8; 3],
    dispatch_inline: bool,
) -> WindowPeer {
    let repaint = Arc::new(AtomicBool::new(true));
    let window = egui_bridge::open_parented(
        &HostParent(raw_handle(parent)),
        Arc::downgrade(desktop),
        Arc::clone(toolkit),
        BridgeOptions {
            title: WINDOW_TITLE.to_owned(),
            background,
            dispatch_inline,
        },
        Arc::clone(&repaint),
    );
    WindowPeer {
        window: Some(window),
        repaint,
    }
}

/// A baseview child window showing the chain.
struct WindowPeer {
    window: Option<WindowHandle>,
    repaint: Arc<AtomicBool>,
}

impl DesktopPeer for WindowPeer {
    fn detach(&mut self) {
        if let Some(mut window) = self.window.take() {
            window.close();
        }
    }

    fn repaint(&mut self) {
        self.repaint.store(true, Ordering::Release);
    }
}

impl Drop for WindowPeer {
    fn drop(&mut self) {
        self.detach();
    }
}
