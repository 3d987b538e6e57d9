//! The containment chain: `Desktop` owns `Holder` owns the editor.
//!
//! ```text
//! host window (ParentWindow)
//!     │  attached by a NativeEmbedding
//!     ▼
//! Desktop   ── pixel size, visibility, opacity, origin
//!     │
//!     ▼
//! Holder    ── logical size + scale transform
//!     │
//!     ▼
//! dyn Editor ── plugin UI content (egui)
//! ```
//!
//! A [`Desktop`] can only be built from an editor, so the three levels are
//! created together and dropping the desktop releases all of them.

use std::sync::{Arc, Weak};

use parking_lot::Mutex;

use crate::geometry::{LogicalSize, Size};

/// Plugin UI content embedded in the host window.
///
/// Editors are constructed by an [`EditorProvider`](crate::EditorProvider)
/// and painted by the native window's render loop, which may run on a
/// different thread than the host's main thread (X11), hence `Send`.
pub trait Editor: Send {
    /// Natural size of the editor in logical pixels.
    fn size(&self) -> Size;

    /// Called when the holder's logical size changes.
    fn resized(&mut self, _width: f64, _height: f64) {}

    /// Render the editor content.
    fn ui(&mut self, ui: &mut egui::Ui);
}

/// Intermediate container carrying an independent scale transform.
pub struct Holder {
    logical: LogicalSize,
    scale: f64,
    editor: Box<dyn Editor>,
}

impl Holder {
    fn new(editor: Box<dyn Editor>) -> Self {
        let logical = LogicalSize::from(editor.size());
        Self {
            logical,
            scale: 1.0,
            editor,
        }
    }

    /// Untransformed size of the holder.
    pub fn logical_size(&self) -> LogicalSize {
        self.logical
    }

    /// Current scale transform.
    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Bounds of the holder once its transform is applied.
    pub fn transformed_size(&self) -> Size {
        self.logical.scaled(self.scale)
    }

    fn set_logical_size(&mut self, logical: LogicalSize) {
        self.logical = logical;
        self.editor.resized(logical.width, logical.height);
    }

    fn set_scale(&mut self, scale: f64) {
        self.scale = scale;
    }

    /// Mutable access to the embedded editor.
    pub fn editor_mut(&mut self) -> &mut dyn Editor {
        self.editor.as_mut()
    }
}

/// Top-level container attached to the host's native window.
pub struct Desktop {
    size: Size,
    visible: bool,
    opaque: bool,
    origin: (i32, i32),
    holder: Holder,
}

impl Desktop {
    /// Build the chain around `editor`, sized to the editor's natural size.
    pub fn new(editor: Box<dyn Editor>) -> Self {
        let holder = Holder::new(editor);
        let size = holder.transformed_size();
        Self {
            size,
            visible: false,
            opaque: false,
            origin: (0, 0),
            holder,
        }
    }

    /// Pixel size of the desktop.
    pub fn size(&self) -> Size {
        self.size
    }

    /// Resize the desktop; the holder is laid out to cover it.
    pub fn set_size(&mut self, size: Size) {
        self.size = size;
        let logical = LogicalSize::unscaled(size, self.holder.scale);
        self.holder.set_logical_size(logical);
    }

    /// Apply a scale transform to the holder and refit the desktop to the
    /// holder's transformed bounds.
    pub fn set_scale(&mut self, scale: f64) {
        self.holder.set_scale(scale);
        self.size = self.holder.transformed_size();
    }

    /// The scale-carrying holder.
    pub fn holder(&self) -> &Holder {
        &self.holder
    }

    /// Mutable access to the holder.
    pub fn holder_mut(&mut self) -> &mut Holder {
        &mut self.holder
    }

    /// Whether the desktop is currently shown.
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Show or hide the desktop.
    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    /// Whether the desktop paints every pixel it covers.
    pub fn is_opaque(&self) -> bool {
        self.opaque
    }

    /// Mark the desktop as opaque.
    pub fn set_opaque(&mut self, opaque: bool) {
        self.opaque = opaque;
    }

    /// Top-left position inside the parent window.
    pub fn origin(&self) -> (i32, i32) {
        self.origin
    }

    /// Move the desktop inside the parent window.
    pub fn set_top_left_position(&mut self, x: i32, y: i32) {
        self.origin = (x, y);
    }
}

/// Owning handle to a containment chain.
///
/// The shim holds the only strong reference; native windows keep a
/// [`WeakDesktop`] and stop painting once the chain is released.
pub type SharedDesktop = Arc<Mutex<Desktop>>;

/// Non-owning handle used by native window render loops.
pub type WeakDesktop = Weak<Mutex<Desktop>>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    struct Fixed {
        size: Size,
        resizes: Arc<AtomicU32>,
    }

    impl Editor for Fixed {
        fn size(&self) -> Size {
            self.size
        }

        fn resized(&mut self, _width: f64, _height: f64) {
            self.resizes.fetch_add(1, Ordering::Relaxed);
        }

        fn ui(&mut self, _ui: &mut egui::Ui) {}
    }

    fn desktop(width: u32, height: u32) -> (Desktop, Arc<AtomicU32>) {
        let resizes = Arc::new(AtomicU32::new(0));
        let editor = Fixed {
            size: Size::new(width, height),
            resizes: Arc::clone(&resizes),
        };
        (Desktop::new(Box::new(editor)), resizes)
    }

    #[test]
    fn new_desktop_matches_editor_size() {
        let (d, _) = desktop(400, 300);
        assert_eq!(d.size(), Size::new(400, 300));
        assert_eq!(d.holder().transformed_size(), Size::new(400, 300));
        assert!(!d.is_visible());
    }

    #[test]
    fn scale_refits_desktop() {
        let (mut d, _) = desktop(400, 300);
        d.set_scale(1.5);
        assert_eq!(d.size(), Size::new(600, 450));
        assert_eq!(d.holder().logical_size(), LogicalSize::from(Size::new(400, 300)));
    }

    #[test]
    fn resize_lays_out_holder_under_scale() {
        let (mut d, resizes) = desktop(400, 300);
        d.set_scale(2.0);
        d.set_size(Size::new(1000, 800));
        assert_eq!(d.size(), Size::new(1000, 800));
        assert_eq!(d.holder().transformed_size(), Size::new(1000, 800));
        assert_eq!(d.holder().logical_size().width, 500.0);
        assert_eq!(resizes.load(Ordering::Relaxed), 1);
    }

    #[test]
    fn weak_handle_dies_with_chain() {
        let (d, _) = desktop(10, 10);
        let shared: SharedDesktop = Arc::new(Mutex::new(d));
        let weak: WeakDesktop = Arc::downgrade(&shared);
        assert!(weak.upgrade().is_some());
        drop(shared);
        assert!(weak.upgrade().is_none());
    }
}
