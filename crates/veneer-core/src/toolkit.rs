//! Toolkit runtime: initialize-once resource, UI lock, and message queue.
//!
//! The runtime is shared by every editor in the process. The first
//! [`Toolkit::acquire`] creates it, later calls return the same instance, and
//! it is torn down when the last `Arc` is dropped (normally when the last
//! [`EditorShim`](crate::EditorShim) goes away).
//!
//! Work that must run on the UI thread is posted with [`Toolkit::post`].
//! Where the native window loop runs on the host's main thread the queue is
//! drained by the window itself every frame; on X11 the host drives the
//! drain through a periodic timer (see [`EditorShim::on_timer`]).
//!
//! [`EditorShim::on_timer`]: crate::EditorShim::on_timer

use std::collections::VecDeque;
use std::sync::{Arc, Weak};

use parking_lot::{Mutex, ReentrantMutex, ReentrantMutexGuard};

type Message = Box<dyn FnOnce() + Send>;

static INSTANCE: Mutex<Weak<Toolkit>> = Mutex::new(Weak::new());

/// Shared UI runtime for embedded editors.
pub struct Toolkit {
    ui_lock: ReentrantMutex<()>,
    queue: Mutex<VecDeque<Message>>,
}

impl Toolkit {
    fn new() -> Self {
        Self {
            ui_lock: ReentrantMutex::new(()),
            queue: Mutex::new(VecDeque::new()),
        }
    }

    /// Return the process-wide runtime, initializing it on first use.
    pub fn acquire() -> Arc<Self> {
        let mut slot = INSTANCE.lock();
        if let Some(toolkit) = slot.upgrade() {
            return toolkit;
        }
        let toolkit = Arc::new(Self::new());
        *slot = Arc::downgrade(&toolkit);
        tracing::info!("toolkit runtime initialized");
        toolkit
    }

    /// Whether a process-wide runtime currently exists.
    pub fn is_initialized() -> bool {
        INSTANCE.lock().strong_count() > 0
    }

    /// Create a runtime that is not registered as the process-wide instance.
    pub fn standalone() -> Arc<Self> {
        Arc::new(Self::new())
    }

    /// Take the UI-thread lock for the duration of one toolkit interaction.
    ///
    /// The lock is re-entrant so nested toolkit calls on the same thread do
    /// not deadlock.
    pub fn lock(&self) -> ReentrantMutexGuard<'_, ()> {
        self.ui_lock.lock()
    }

    /// Queue `f` to run on the UI thread.
    pub fn post(&self, f: impl FnOnce() + Send + 'static) {
        self.queue.lock().push_back(Box::new(f));
    }

    /// Run the oldest queued message. Returns `false` when the queue was empty.
    ///
    /// The queue lock is released before the message runs, so messages may
    /// post further messages.
    pub fn dispatch_next(&self) -> bool {
        let next = self.queue.lock().pop_front();
        match next {
            Some(message) => {
                message();
                true
            }
            None => false,
        }
    }

    /// Run queued messages until none remain. Returns how many ran.
    pub fn dispatch_pending(&self) -> usize {
        let _ui = self.lock();
        let mut count = 0;
        while self.dispatch_next() {
            count += 1;
        }
        count
    }

    /// Number of queued messages.
    pub fn pending(&self) -> usize {
        self.queue.lock().len()
    }
}

impl Drop for Toolkit {
    fn drop(&mut self) {
        let dropped = self.queue.get_mut().len();
        tracing::info!(dropped, "toolkit runtime shut down");
    }
}
