//! Editor embedding and context-menu translation for CLAP plugin GUIs.
//!
//! Two helpers sit between a plugin's host-facing CLAP glue and its editor:
//!
//! - **[`EditorShim`]**: owns the containment chain (desktop, holder,
//!   editor) and implements the GUI lifecycle the host drives: create,
//!   attach to a parent window, resize, rescale, show, destroy.
//! - **[`populate_menu_for_param`]**: walks a host-described context menu and
//!   materialises it as a [`PopupMenu`], wiring each entry back to the
//!   host's `perform` callback.
//!
//! Nothing here touches native windows directly. Platform attachment goes
//! through [`NativeEmbedding`]; the `veneer-plugin` crate provides the
//! Win32, Cocoa and X11 implementations and the clack adapter.
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use veneer_core::{Editor, EditorProvider, EditorShim, Size, Toolkit, UnsupportedEmbedding};
//!
//! struct Knobs;
//!
//! impl Editor for Knobs {
//!     fn size(&self) -> Size {
//!         Size::new(640, 360)
//!     }
//!     fn ui(&mut self, ui: &mut egui::Ui) {
//!         ui.label("gain");
//!     }
//! }
//!
//! struct Provider;
//!
//! impl EditorProvider for Provider {
//!     fn create_editor(&mut self, _toolkit: &Arc<Toolkit>) -> Option<Box<dyn Editor>> {
//!         Some(Box::new(Knobs))
//!     }
//! }
//!
//! let mut shim = EditorShim::new(Provider, Box::new(UnsupportedEmbedding));
//! shim.create("x11", false).unwrap();
//! assert_eq!(shim.size(), Some(Size::new(640, 360)));
//! shim.destroy();
//! assert_eq!(shim.reported_size(), (Size::new(1000, 800), false));
//! ```

pub mod config;
pub mod error;
pub mod geometry;
pub mod menu;
pub mod platform;
pub mod provider;
pub mod shim;
pub mod toolkit;
pub mod view;

pub use config::ShimConfig;
pub use error::{ConfigError, EmbedError, ShimError};
pub use geometry::{LogicalSize, Size};
pub use menu::{
    ContextMenuHost, MenuBuilder, MenuElement, MenuItemKind, MenuTarget, PopupMenu, TargetKind,
    populate_menu_for_param,
};
pub use platform::{
    Capabilities, DesktopPeer, NativeEmbedding, ParentWindow, Platform, UnsupportedEmbedding,
    WindowApi,
};
pub use provider::{EditorProvider, TimerId};
pub use shim::{EditorShim, ShowHook};
pub use toolkit::Toolkit;
pub use view::{Desktop, Editor, Holder, SharedDesktop, WeakDesktop};
