//! Host timer registration through the CLAP timer-support extension.

use std::time::Duration;

use clack_extensions::timer::{self, HostTimer};
use clack_plugin::prelude::HostMainThreadHandle;
use veneer_core::TimerId;

/// Registers periodic timers with the host.
///
/// Hosts without the timer extension refuse every registration, which the
/// shim logs and otherwise tolerates.
pub struct HostTimers<'a> {
    host: HostMainThreadHandle<'a>,
    extension: Option<HostTimer>,
}

impl<'a> HostTimers<'a> {
    /// Look up the timer extension on `host`.
    pub fn new(host: HostMainThreadHandle<'a>) -> Self {
        let extension = host.shared().get_extension::<HostTimer>();
        if extension.is_none() {
            tracing::debug!("host has no timer extension");
        }
        Self { host, extension }
    }

    /// Whether the host supports timers at all.
    pub fn is_available(&self) -> bool {
        self.extension.is_some()
    }

    /// Register a timer firing every `period` (rounded to whole milliseconds,
    /// at least one).
    pub fn register(&mut self, period: Duration) -> Option<TimerId> {
        let extension = self.extension.as_ref()?;
        let period_ms = period_millis(period);
        match extension.register_timer(&mut self.host, period_ms) {
            Ok(id) => Some(from_clack(id)),
            Err(err) => {
                tracing::warn!(?err, period_ms, "host rejected timer registration");
                None
            }
        }
    }

    /// Unregister a timer returned by [`register`](Self::register).
    pub fn unregister(&mut self, id: TimerId) {
        let Some(extension) = self.extension.as_ref() else {
            return;
        };
        if let Err(err) = extension.unregister_timer(&mut self.host, to_clack(id)) {
            tracing::warn!(?err, %id, "host rejected timer unregistration");
        }
    }
}

/// Milliseconds in `period`, clamped to `1..=u32::MAX`.
pub(crate) fn period_millis(period: Duration) -> u32 {
    u32::try_from(period.as_millis()).unwrap_or(u32::MAX).max(1)
}

/// Convert a clack timer id.
pub fn from_clack(id: timer::TimerId) -> TimerId {
    TimerId(id.0)
}

/// Convert to a clack timer id.
pub fn to_clack(id: TimerId) -> timer::TimerId {
    timer::TimerId(id.0)
}
