//! Native window embedding capability.
//!
//! Each desktop platform attaches the containment chain to the host window
//! differently. Those differences live behind [`NativeEmbedding`]; the shim
//! only consults [`Capabilities`] and never branches on the platform itself.
//! Concrete embeddings for Win32, Cocoa and X11 are provided by the
//! `veneer-plugin` crate; [`UnsupportedEmbedding`] covers everything else.

use core::fmt;
use std::sync::Arc;

use crate::error::EmbedError;
use crate::toolkit::Toolkit;
use crate::view::SharedDesktop;

/// Native windowing APIs a host can hand a parent window in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WindowApi {
    /// Windows `HWND`.
    Win32,
    /// macOS `NSView`.
    Cocoa,
    /// X11 window id.
    X11,
}

impl WindowApi {
    /// All recognised APIs.
    pub const ALL: [WindowApi; 3] = [WindowApi::Win32, WindowApi::Cocoa, WindowApi::X11];

    /// CLAP identifier of the API (`"win32"`, `"cocoa"`, `"x11"`).
    pub const fn as_str(self) -> &'static str {
        match self {
            WindowApi::Win32 => "win32",
            WindowApi::Cocoa => "cocoa",
            WindowApi::X11 => "x11",
        }
    }

    /// Parse a CLAP window API identifier. Wayland and unknown ids yield `None`.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|api| api.as_str() == name)
    }
}

impl fmt::Display for WindowApi {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Opaque parent window reference supplied by the host.
///
/// Handles are stored as plain integers; they are only ever turned back into
/// native pointers by the embedding that receives them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParentWindow {
    /// Windows parent window.
    Win32 {
        /// `HWND` of the parent.
        hwnd: usize,
    },
    /// macOS parent view.
    Cocoa {
        /// `NSView*` of the parent.
        ns_view: usize,
    },
    /// X11 parent window.
    X11 {
        /// X11 window id of the parent.
        window: u64,
    },
}

impl ParentWindow {
    /// Windowing API the handle belongs to.
    pub fn api(&self) -> WindowApi {
        match self {
            ParentWindow::Win32 { .. } => WindowApi::Win32,
            ParentWindow::Cocoa { .. } => WindowApi::Cocoa,
            ParentWindow::X11 { .. } => WindowApi::X11,
        }
    }
}

/// Desktop operating system the plugin runs on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Platform {
    /// Microsoft Windows.
    Windows,
    /// Apple macOS.
    MacOs,
    /// Linux / X11.
    Linux,
    /// Anything without a native embedding.
    Other,
}

impl Platform {
    /// Platform this binary was compiled for.
    pub const fn current() -> Self {
        if cfg!(target_os = "windows") {
            Platform::Windows
        } else if cfg!(target_os = "macos") {
            Platform::MacOs
        } else if cfg!(target_os = "linux") {
            Platform::Linux
        } else {
            Platform::Other
        }
    }

    /// What the shim may rely on when embedding on this platform.
    pub const fn capabilities(self) -> Capabilities {
        match self {
            Platform::Windows => Capabilities {
                runtime_rescale: true,
                event_pump: false,
            },
            Platform::Linux => Capabilities {
                runtime_rescale: true,
                event_pump: true,
            },
            Platform::MacOs | Platform::Other => Capabilities {
                runtime_rescale: false,
                event_pump: false,
            },
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Platform::Windows => "windows",
            Platform::MacOs => "macos",
            Platform::Linux => "linux",
            Platform::Other => "an unsupported platform",
        };
        f.write_str(name)
    }
}

/// Platform features the shim adapts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Capabilities {
    /// The holder transform may be changed while the editor is open.
    pub runtime_rescale: bool,
    /// The host must pump the toolkit message queue from a timer.
    pub event_pump: bool,
}

/// A live attachment of the desktop to a host window.
pub trait DesktopPeer {
    /// Remove the desktop from the host window.
    fn detach(&mut self);

    /// Ask the native window to repaint.
    fn repaint(&mut self) {}
}

/// Attaches a containment chain to a native host window.
pub trait NativeEmbedding {
    /// Short name for logging.
    fn name(&self) -> &'static str;

    /// Features of the underlying platform.
    fn capabilities(&self) -> Capabilities;

    /// Attach `desktop` into `parent`. The returned peer keeps the native
    /// window alive until it is detached.
    fn attach(
        &mut self,
        parent: &ParentWindow,
        desktop: &SharedDesktop,
        toolkit: &Arc<Toolkit>,
    ) -> Result<Box<dyn DesktopPeer>, EmbedError>;
}

/// Embedding for platforms with no native window support configured.
///
/// Every attach fails, which the shim reports by clearing its attached flag.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnsupportedEmbedding;

impl NativeEmbedding for UnsupportedEmbedding {
    fn name(&self) -> &'static str {
        "unsupported"
    }

    fn capabilities(&self) -> Capabilities {
        Platform::Other.capabilities()
    }

    fn attach(
        &mut self,
        _parent: &ParentWindow,
        _desktop: &SharedDesktop,
        _toolkit: &Arc<Toolkit>,
    ) -> Result<Box<dyn DesktopPeer>, EmbedError> {
        Err(EmbedError::Unsupported {
            platform: Platform::current(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn window_api_names_round_trip() {
        for api in WindowApi::ALL {
            assert_eq!(WindowApi::from_name(api.as_str()), Some(api));
        }
        assert_eq!(WindowApi::from_name("wayland"), None);
        assert_eq!(WindowApi::from_name("Win32"), None);
        assert_eq!(WindowApi::from_name(""), None);
    }

    #[test]
    fn parent_window_reports_api() {
        assert_eq!(ParentWindow::Win32 { hwnd: 1 }.api(), WindowApi::Win32);
        assert_eq!(ParentWindow::Cocoa { ns_view: 1 }.api(), WindowApi::Cocoa);
        assert_eq!(ParentWindow::X11 { window: 1 }.api(), WindowApi::X11);
    }

    #[test]
    fn only_linux_pumps_events() {
        assert!(Platform::Linux.capabilities().event_pump);
        assert!(!Platform::Windows.capabilities().event_pump);
        assert!(!Platform::MacOs.capabilities().event_pump);
    }

    #[test]
    fn macos_cannot_rescale() {
        assert!(!Platform::MacOs.capabilities().runtime_rescale);
        assert!(Platform::Windows.capabilities().runtime_rescale);
        assert!(Platform::Linux.capabilities().runtime_rescale);
    }
}
