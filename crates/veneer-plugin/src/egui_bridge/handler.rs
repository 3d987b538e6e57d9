//! Baseview [`WindowHandler`] that paints a containment chain with egui.
//!
//! Each `on_frame()`:
//!
//! 1. Take the toolkit UI lock (and drain the message queue where the host
//!    does not pump it)
//! 2. Upgrade the weak chain; a released chain is never painted again
//! 3. Follow the desktop size and holder scale
//! 4. Run the egui pass over the editor, tessellate, paint via
//!    `egui_glow::Painter`, swap buffers

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use baseview::gl::GlConfig;
use baseview::{
    Event, EventStatus, Window, WindowHandle, WindowHandler, WindowOpenOptions, WindowScalePolicy,
};
use egui::Context;
use raw_window_handle::HasRawWindowHandle;
use veneer_core::{Size, Toolkit, WeakDesktop};

use super::translate::InputState;

/// How a bridged window is opened.
pub struct BridgeOptions {
    /// Window title.
    pub title: String,
    /// Colour cleared behind the editor.
    pub background: [u8; 3],
    /// Drain the toolkit queue every frame.
    pub dispatch_inline: bool,
}

/// Open a child window in `parent` that renders `desktop` until the chain
/// is released or the returned handle is closed.
///
/// `repaint` is polled every frame; setting it forces egui to repaint even
/// when no input arrived.
pub fn open_parented<P: HasRawWindowHandle>(
    parent: &P,
    desktop: WeakDesktop,
    toolkit: Arc<Toolkit>,
    options: BridgeOptions,
    repaint: Arc<AtomicBool>,
) -> WindowHandle {
    let (size, scale) = desktop
        .upgrade()
        .map(|chain| {
            let chain = chain.lock();
            (chain.size(), chain.holder().scale())
        })
        .unwrap_or((Size::new(1, 1), 1.0));

    let window_options = WindowOpenOptions {
        title: options.title,
        size: baseview::Size::new(f64::from(size.width), f64::from(size.height)),
        scale: WindowScalePolicy::ScaleFactor(1.0),
        gl_config: Some(GlConfig {
            version: (3, 2),
            ..GlConfig::default()
        }),
    };

    let background = options.background;
    let dispatch_inline = options.dispatch_inline;

    baseview::Window::open_parented(parent, window_options, move |window: &mut Window<'_>| {
        let gl = GlState::new(window);
        if gl.is_none() {
            tracing::error!("no OpenGL context for the editor window; it will stay blank");
        }
        let ctx = Context::default();
        ctx.set_pixels_per_point(scale as f32);
        DesktopHandler {
            ctx,
            gl,
            input: InputState::new((size.width, size.height), scale as f32),
            applied: size,
            desktop,
            toolkit,
            background,
            dispatch_inline,
            repaint,
        }
    })
}

struct GlState {
    gl: Arc<glow::Context>,
    painter: egui_glow::Painter,
}

impl GlState {
    fn new(window: &mut Window<'_>) -> Option<Self> {
        let gl_context = window.gl_context()?;

        #[allow(unsafe_code)]
        // SAFETY: the loader resolves symbols from the window's own GL
        // context, which lives as long as the window.
        let gl = unsafe {
            Arc::new(glow::Context::from_loader_function(|s| {
                gl_context.get_proc_address(s)
            }))
        };

        match egui_glow::Painter::new(Arc::clone(&gl), "", None, false) {
            Ok(painter) => Some(Self { gl, painter }),
            Err(err) => {
                tracing::error!(?err, "failed to create the egui painter");
                None
            }
        }
    }
}

struct DesktopHandler {
    ctx: Context,
    gl: Option<GlState>,
    input: InputState,
    /// Desktop size last applied to the native window.
    applied: Size,
    desktop: WeakDesktop,
    toolkit: Arc<Toolkit>,
    background: [u8; 3],
    dispatch_inline: bool,
    repaint: Arc<AtomicBool>,
}

impl WindowHandler for DesktopHandler {
    fn on_frame(&mut self, window: &mut Window<'_>) {
        let _ui = self.toolkit.lock();
        if self.dispatch_inline {
            self.toolkit.dispatch_pending();
        }

        let Some(chain) = self.desktop.upgrade() else {
            return;
        };
        let mut desktop = chain.lock();
        if !desktop.is_visible() {
            return;
        }

        let size = desktop.size();
        if size != self.applied {
            window.resize(baseview::Size::new(
                f64::from(size.width),
                f64::from(size.height),
            ));
            self.input.set_physical_size(size.width, size.height);
            self.applied = size;
        }

        let scale = desktop.holder().scale() as f32;
        if scale != self.input.scale() {
            self.input.set_scale(scale);
            self.ctx.set_pixels_per_point(scale);
        }
        if self.repaint.swap(false, Ordering::AcqRel) {
            self.ctx.request_repaint();
        }

        let (Some(gl_state), Some(gl_context)) = (self.gl.as_mut(), window.gl_context()) else {
            return;
        };

        #[allow(unsafe_code)]
        // SAFETY: the context belongs to this window and is only made current
        // from its own frame callback.
        unsafe {
            gl_context.make_current();
        }

        let full_output = self.ctx.run(self.input.take(), |ctx| {
            egui::CentralPanel::default().show(ctx, |ui| {
                desktop.holder_mut().editor_mut().ui(ui);
            });
        });
        drop(desktop);

        let primitives = self
            .ctx
            .tessellate(full_output.shapes, full_output.pixels_per_point);
        let (width, height) = self.input.physical_size();
        let [r, g, b] = self.background.map(|c| f32::from(c) / 255.0);

        #[allow(unsafe_code)]
        // SAFETY: plain GL state calls on the context made current above.
        unsafe {
            use glow::HasContext;
            gl_state.gl.viewport(0, 0, width as i32, height as i32);
            gl_state.gl.clear_color(r, g, b, 1.0);
            gl_state
                .gl
                .clear(glow::COLOR_BUFFER_BIT | glow::DEPTH_BUFFER_BIT);
        }

        gl_state.painter.paint_and_update_textures(
            [width, height],
            full_output.pixels_per_point,
            &primitives,
            &full_output.textures_delta,
        );

        gl_context.swap_buffers();
    }

    fn on_event(&mut self, _window: &mut Window<'_>, event: Event) -> EventStatus {
        match event {
            Event::Mouse(mouse_event) => {
                self.input.on_mouse(&mouse_event);
                if self.ctx.wants_pointer_input() {
                    EventStatus::Captured
                } else {
                    EventStatus::Ignored
                }
            }
            Event::Keyboard(kb_event) => {
                self.input.on_modifiers(kb_event.modifiers);
                EventStatus::Ignored
            }
            Event::Window(window_event) => {
                if self.input.on_window(&window_event) {
                    let (width, height) = self.input.physical_size();
                    tracing::trace!(width, height, "editor window resized");
                }
                EventStatus::Captured
            }
        }
    }
}

impl Drop for DesktopHandler {
    fn drop(&mut self) {
        if let Some(gl_state) = self.gl.as_mut() {
            gl_state.painter.destroy();
        }
    }
}
