//! The editor-embedding shim.
//!
//! [`EditorShim`] is the plugin-side implementation of the CLAP GUI
//! extension. It owns the containment chain and drives it through the
//! lifecycle the host expects:
//!
//! ```text
//! Uninitialized ──create──► Created ──set_parent──► Attached
//!        ▲                     │                       │
//!        └──────────────── destroy ◄───────────────────┘
//! ```
//!
//! Platform differences are delegated to a [`NativeEmbedding`]; the shim only
//! consults its [`Capabilities`](crate::platform::Capabilities) to decide
//! whether rescaling is allowed and whether a pump timer is needed.

use std::sync::Arc;

use parking_lot::Mutex;

use crate::config::ShimConfig;
use crate::error::ShimError;
use crate::geometry::Size;
use crate::platform::{DesktopPeer, NativeEmbedding, ParentWindow, WindowApi};
use crate::provider::{EditorProvider, TimerId};
use crate::toolkit::Toolkit;
use crate::view::{Desktop, SharedDesktop};

/// Hook consulted by [`EditorShim::show`] after the attachment check.
pub type ShowHook = Box<dyn FnMut() -> bool + Send>;

/// Embeds one editor in a host-supplied native window.
pub struct EditorShim<P: EditorProvider> {
    provider: P,
    embedding: Box<dyn NativeEmbedding>,
    config: ShimConfig,
    toolkit: Option<Arc<Toolkit>>,
    chain: Option<SharedDesktop>,
    peer: Option<Box<dyn DesktopPeer>>,
    attached: bool,
    parent: Option<ParentWindow>,
    scale: f64,
    timer: Option<TimerId>,
    resizable: bool,
    on_show: Option<ShowHook>,
}

impl<P: EditorProvider> EditorShim<P> {
    /// Create a shim that builds editors with `provider` and attaches them
    /// through `embedding`.
    pub fn new(provider: P, embedding: Box<dyn NativeEmbedding>) -> Self {
        Self::with_config(provider, embedding, ShimConfig::default())
    }

    /// Create a shim with explicit configuration.
    pub fn with_config(
        provider: P,
        embedding: Box<dyn NativeEmbedding>,
        config: ShimConfig,
    ) -> Self {
        let resizable = config.resizable;
        Self {
            provider,
            embedding,
            config,
            toolkit: None,
            chain: None,
            peer: None,
            attached: false,
            parent: None,
            scale: 1.0,
            timer: None,
            resizable,
            on_show: None,
        }
    }

    /// Use `toolkit` instead of the process-wide runtime.
    pub fn with_toolkit(mut self, toolkit: Arc<Toolkit>) -> Self {
        self.toolkit = Some(toolkit);
        self
    }

    /// The editor provider.
    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Mutable access to the editor provider.
    pub fn provider_mut(&mut self) -> &mut P {
        &mut self.provider
    }

    /// Active configuration.
    pub fn config(&self) -> &ShimConfig {
        &self.config
    }

    /// Name of the native embedding in use.
    pub fn embedding_name(&self) -> &'static str {
        self.embedding.name()
    }

    /// The toolkit runtime, once [`create`](Self::create) has acquired it.
    pub fn toolkit(&self) -> Option<&Arc<Toolkit>> {
        self.toolkit.as_ref()
    }

    /// The containment chain, if an editor exists.
    pub fn desktop(&self) -> Option<&SharedDesktop> {
        self.chain.as_ref()
    }

    /// Whether the host may resize the editor.
    pub fn can_resize(&self) -> bool {
        self.resizable
    }

    /// Allow or forbid host-driven resizing.
    pub fn set_resizable(&mut self, resizable: bool) {
        self.resizable = resizable;
    }

    /// Install a hook that must also agree before [`show`](Self::show)
    /// reports success.
    pub fn set_on_show(&mut self, hook: impl FnMut() -> bool + Send + 'static) {
        self.on_show = Some(Box::new(hook));
    }

    /// Whether the chain is currently attached to a host window.
    pub fn is_attached(&self) -> bool {
        self.attached
    }

    /// Effective scale: the recorded factor where rescaling is supported,
    /// 1.0 elsewhere.
    pub fn gui_scale(&self) -> f64 {
        if self.embedding.capabilities().runtime_rescale {
            self.scale
        } else {
            1.0
        }
    }

    /// Registered pump timer, if any.
    pub fn timer_id(&self) -> Option<TimerId> {
        self.timer
    }

    /// Whether an editor can be embedded for `api`. Floating windows are
    /// never supported.
    pub fn is_api_supported(&self, api: &str, is_floating: bool) -> bool {
        !is_floating && WindowApi::from_name(api).is_some()
    }

    /// Construct the editor and its containment chain.
    pub fn create(&mut self, api: &str, is_floating: bool) -> Result<(), ShimError> {
        if is_floating {
            return Err(ShimError::FloatingUnsupported);
        }
        if self.chain.is_some() {
            return Err(ShimError::AlreadyCreated);
        }

        let toolkit = Arc::clone(self.toolkit.get_or_insert_with(Toolkit::acquire));
        let editor = {
            let _ui = toolkit.lock();
            self.provider.create_editor(&toolkit)
        };
        let editor = editor.ok_or(ShimError::EditorUnavailable)?;

        let mut desktop = Desktop::new(editor);
        if self.embedding.capabilities().runtime_rescale && self.scale != 1.0 {
            desktop.set_scale(self.scale);
        }
        self.chain = Some(Arc::new(Mutex::new(desktop)));
        tracing::debug!(api, embedding = self.embedding.name(), "editor created");

        if self.embedding.capabilities().event_pump {
            let period = self.config.timer_period();
            self.timer = self.provider.register_timer(period);
            match self.timer {
                Some(id) => tracing::debug!(%id, ?period, "event pump timer registered"),
                None => tracing::warn!("host refused the event pump timer"),
            }
        }

        self.dump_size("create");
        Ok(())
    }

    /// Attach the chain into the host window `parent`.
    ///
    /// Re-attaching to the window the chain is already attached to detaches
    /// first, so a host that reparents without destroying never ends up with
    /// two live attachments.
    pub fn set_parent(&mut self, parent: ParentWindow) -> Result<(), ShimError> {
        let reattach = self.attached && self.parent == Some(parent);
        self.attached = true;
        self.parent = Some(parent);

        let Some(chain) = self.chain.clone() else {
            self.attached = false;
            return Err(ShimError::NoEditor);
        };

        if reattach {
            tracing::debug!(?parent, "re-attaching to the same window");
        }
        // At most one native attachment exists, even when this attach fails.
        self.detach();

        let toolkit = Arc::clone(self.toolkit.get_or_insert_with(Toolkit::acquire));
        match self.embedding.attach(&parent, &chain, &toolkit) {
            Ok(peer) => {
                self.peer = Some(peer);
                tracing::debug!(?parent, embedding = self.embedding.name(), "editor attached");
                self.dump_size("set_parent");
                Ok(())
            }
            Err(err) => {
                tracing::warn!(%err, "failed to attach editor");
                self.attached = false;
                Err(err.into())
            }
        }
    }

    /// Tear down the editor. Safe to call at any time, any number of times.
    pub fn destroy(&mut self) {
        if let Some(id) = self.timer.take() {
            self.provider.unregister_timer(id);
            tracing::debug!(%id, "event pump timer unregistered");
        }

        self.detach();
        if self.chain.take().is_some() {
            tracing::debug!("editor destroyed");
        }
        self.attached = false;
        self.parent = None;
    }

    /// Whether the editor is showing. Attachment implies visibility, so this
    /// performs no change of its own.
    pub fn show(&mut self) -> bool {
        if self.chain.is_none() || !self.attached {
            return false;
        }
        match self.on_show.as_mut() {
            Some(hook) => hook(),
            None => true,
        }
    }

    /// Accepted and ignored; detaching is the only way to hide.
    pub fn hide(&mut self) {}

    /// Resize the desktop to `size` pixels.
    pub fn set_size(&mut self, size: Size) {
        if let Some(chain) = &self.chain {
            chain.lock().set_size(size);
        }
        if let Some(peer) = self.peer.as_mut() {
            peer.repaint();
        }
        self.dump_size("set_size");
    }

    /// Bounds of the holder after its transform, if an editor exists.
    pub fn size(&self) -> Option<Size> {
        let toolkit = self.toolkit.as_ref()?;
        let _ui = toolkit.lock();
        let chain = self.chain.as_ref()?;
        let size = chain.lock().holder().transformed_size();
        Some(size)
    }

    /// Size query in the host's out-parameter shape: the fallback size and
    /// `false` when there is no editor.
    pub fn reported_size(&self) -> (Size, bool) {
        match self.size() {
            Some(size) => (size, true),
            None => (self.config.fallback_size(), false),
        }
    }

    /// Sizes are accepted as proposed.
    pub fn adjust_size(&self, size: Size) -> Size {
        size
    }

    /// Record a display scale and apply it to the holder.
    pub fn set_scale(&mut self, scale: f64) -> Result<(), ShimError> {
        if !self.embedding.capabilities().runtime_rescale {
            return Err(ShimError::ScaleUnsupported);
        }
        if !scale.is_finite() || scale <= 0.0 {
            return Err(ShimError::InvalidScale(scale));
        }

        self.scale = scale;
        if let Some(chain) = &self.chain {
            chain.lock().set_scale(scale);
        }
        if let Some(peer) = self.peer.as_mut() {
            peer.repaint();
        }
        self.dump_size("set_scale");
        Ok(())
    }

    /// Host timer callback. Drains the toolkit queue when `id` is the pump
    /// timer; other timers are ignored.
    pub fn on_timer(&mut self, id: TimerId) {
        if self.timer != Some(id) {
            return;
        }
        if let Some(toolkit) = &self.toolkit {
            toolkit.dispatch_pending();
        }
    }

    fn detach(&mut self) {
        if let Some(mut peer) = self.peer.take() {
            peer.detach();
            if let Some(chain) = &self.chain {
                chain.lock().set_visible(false);
            }
            tracing::debug!("editor detached");
        }
    }

    fn dump_size(&self, op: &'static str) {
        if let Some(chain) = &self.chain {
            let desktop = chain.lock();
            tracing::trace!(
                op,
                desktop = %desktop.size(),
                holder = %desktop.holder().transformed_size(),
                scale = desktop.holder().scale(),
                "editor size"
            );
        }
    }
}

impl<P: EditorProvider> Drop for EditorShim<P> {
    fn drop(&mut self) {
        self.destroy();
    }
}
