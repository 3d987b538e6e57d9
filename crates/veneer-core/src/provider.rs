//! The editor provider: the plugin-side collaborator that constructs editor
//! content and registers periodic timers with the host.

use core::fmt;
use std::sync::Arc;
use std::time::Duration;

use crate::toolkit::Toolkit;
use crate::view::Editor;

/// Host-assigned timer identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerId(pub u32);

impl fmt::Display for TimerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Supplies editors to an [`EditorShim`](crate::EditorShim).
pub trait EditorProvider {
    /// Construct the editor content. Called on the UI thread with the
    /// toolkit lock held. Returning `None` makes `create` fail.
    fn create_editor(&mut self, toolkit: &Arc<Toolkit>) -> Option<Box<dyn Editor>>;

    /// Register a periodic host timer. Only used on platforms that need the
    /// host to pump the toolkit message queue.
    fn register_timer(&mut self, _period: Duration) -> Option<TimerId> {
        None
    }

    /// Unregister a timer previously returned by
    /// [`register_timer`](Self::register_timer).
    fn unregister_timer(&mut self, _id: TimerId) {}
}

impl<P: EditorProvider + ?Sized> EditorProvider for Box<P> {
    fn create_editor(&mut self, toolkit: &Arc<Toolkit>) -> Option<Box<dyn Editor>> {
        (**self).create_editor(toolkit)
    }

    fn register_timer(&mut self, period: Duration) -> Option<TimerId> {
        (**self).register_timer(period)
    }

    fn unregister_timer(&mut self, id: TimerId) {
        (**self).unregister_timer(id);
    }
}
