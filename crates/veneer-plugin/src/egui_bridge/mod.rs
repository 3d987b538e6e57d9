//! egui-in-baseview bridge that paints a containment chain.
//!
//! ```text
//! host parent window (RawWindowHandle)
//!     │
//!     ▼
//! baseview::Window (child window + GL context, 1:1 scale)
//!     │
//!     ▼
//! DesktopHandler
//!     ├── translate: baseview events → egui RawInput (in holder points)
//!     ├── frame loop: UI lock → upgrade chain → editor.ui() → tessellate
//!     └── render: egui_glow::Painter → OpenGL
//! ```
//!
//! The handler holds the chain weakly, so the shim stays its only owner.

mod handler;
mod translate;

pub use handler::{BridgeOptions, open_parented};
