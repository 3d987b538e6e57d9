//! Editor provider backed by the CLAP host.

use std::sync::Arc;
use std::time::Duration;

use veneer_core::{Editor, EditorProvider, TimerId, Toolkit};

use crate::timer::HostTimers;

/// Builds editors with a closure and registers pump timers with the host.
pub struct ClapEditorProvider<'a, F> {
    timers: HostTimers<'a>,
    factory: F,
}

impl<'a, F> ClapEditorProvider<'a, F>
where
    F: FnMut(&Arc<Toolkit>) -> Option<Box<dyn Editor>>,
{
    /// Provider calling `factory` for each new editor.
    pub fn new(timers: HostTimers<'a>, factory: F) -> Self {
        Self { timers, factory }
    }

    /// The host timer registry.
    pub fn timers(&self) -> &HostTimers<'a> {
        &self.timers
    }
}

impl<F> EditorProvider for ClapEditorProvider<'_, F>
where
    F: FnMut(&Arc<Toolkit>) -> Option<Box<dyn Editor>>,
{
    fn create_editor(&mut self, toolkit: &Arc<Toolkit>) -> Option<Box<dyn Editor>> {
        (self.factory)(toolkit)
    }

    fn register_timer(&mut self, period: Duration) -> Option<TimerId> {
        self.timers.register(period)
    }

    fn unregister_timer(&mut self, id: TimerId) {
        self.timers.unregister(id);
    }
}
