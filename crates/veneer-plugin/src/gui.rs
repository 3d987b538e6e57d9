//! Glue between clack's GUI extension types and [`EditorShim`].
//!
//! These are the bodies of the [`veneer_gui!`](crate::veneer_gui) methods;
//! every failure collapses to `PluginError::Message`, `false` or `None`,
//! which hosts read as "not available".

use clack_extensions::gui::{
    AspectRatioStrategy, GuiApiType, GuiConfiguration, GuiResizeHints, GuiSize, Window,
};
use clack_plugin::prelude::PluginError;
use raw_window_handle::{HasRawWindowHandle, RawWindowHandle};
use veneer_core::{EditorProvider, EditorShim, ParentWindow, ShimError, Size, WindowApi};

/// Windowing API named by a clack GUI API type. Wayland and unknown APIs
/// yield `None`.
pub fn window_api(api: GuiApiType) -> Option<WindowApi> {
    if api == GuiApiType::WIN32 {
        Some(WindowApi::Win32)
    } else if api == GuiApiType::COCOA {
        Some(WindowApi::Cocoa)
    } else if api == GuiApiType::X11 {
        Some(WindowApi::X11)
    } else {
        None
    }
}

fn api_name(api: GuiApiType) -> &'static str {
    window_api(api).map_or("", WindowApi::as_str)
}

/// Parent window described by a raw handle from the host.
pub fn parent_from_raw(handle: RawWindowHandle) -> Option<ParentWindow> {
    match handle {
        RawWindowHandle::Win32(h) => Some(ParentWindow::Win32 {
            hwnd: h.hwnd as usize,
        }),
        RawWindowHandle::AppKit(h) => Some(ParentWindow::Cocoa {
            ns_view: h.ns_view as usize,
        }),
        RawWindowHandle::Xlib(h) => Some(ParentWindow::X11 {
            window: h.window as u64,
        }),
        RawWindowHandle::Xcb(h) => Some(ParentWindow::X11 {
            window: u64::from(h.window),
        }),
        _ => None,
    }
}

/// Static description of a shim error for the host.
pub fn plugin_error(err: &ShimError) -> PluginError {
    let message = match err {
        ShimError::FloatingUnsupported => "floating editor windows are not supported",
        ShimError::AlreadyCreated => "an editor is already embedded",
        ShimError::EditorUnavailable => "the editor could not be constructed",
        ShimError::NoEditor => "no editor has been created",
        ShimError::ScaleUnsupported => "runtime rescaling is not supported on this platform",
        ShimError::InvalidScale(_) => "invalid scale factor",
        ShimError::Embed(_) => "failed to attach the editor to the host window",
    };
    PluginError::Message(message)
}

fn to_plugin_result(result: Result<(), ShimError>) -> Result<(), PluginError> {
    result.map_err(|err| {
        tracing::debug!(%err, "GUI request rejected");
        plugin_error(&err)
    })
}

/// `clap_plugin_gui.is_api_supported`.
pub fn is_api_supported<P: EditorProvider>(
    shim: &EditorShim<P>,
    config: &GuiConfiguration<'_>,
) -> bool {
    shim.is_api_supported(api_name(config.api_type), config.is_floating)
}

/// `clap_plugin_gui.get_preferred_api`: the current platform's API, docked.
pub fn preferred_api() -> Option<GuiConfiguration<'static>> {
    Some(GuiConfiguration {
        api_type: GuiApiType::default_for_current_platform()?,
        is_floating: false,
    })
}

/// `clap_plugin_gui.create`.
pub fn create<P: EditorProvider>(
    shim: &mut EditorShim<P>,
    config: &GuiConfiguration<'_>,
) -> Result<(), PluginError> {
    to_plugin_result(shim.create(api_name(config.api_type), config.is_floating))
}

/// `clap_plugin_gui.set_parent`.
pub fn set_parent<P: EditorProvider>(
    shim: &mut EditorShim<P>,
    window: &Window,
) -> Result<(), PluginError> {
    let Some(parent) = parent_from_raw(window.raw_window_handle()) else {
        tracing::warn!("host supplied an unsupported parent window handle");
        return Err(PluginError::Message("unsupported parent window handle"));
    };
    to_plugin_result(shim.set_parent(parent))
}

/// `clap_plugin_gui.set_scale`.
pub fn set_scale<P: EditorProvider>(
    shim: &mut EditorShim<P>,
    scale: f64,
) -> Result<(), PluginError> {
    to_plugin_result(shim.set_scale(scale))
}

/// `clap_plugin_gui.get_size`.
pub fn get_size<P: EditorProvider>(shim: &EditorShim<P>) -> Option<GuiSize> {
    let (size, known) = shim.reported_size();
    known.then_some(GuiSize {
        width: size.width,
        height: size.height,
    })
}

/// `clap_plugin_gui.set_size`.
pub fn set_size<P: EditorProvider>(
    shim: &mut EditorShim<P>,
    size: GuiSize,
) -> Result<(), PluginError> {
    shim.set_size(Size::new(size.width, size.height));
    Ok(())
}

/// `clap_plugin_gui.adjust_size`.
pub fn adjust_size<P: EditorProvider>(shim: &EditorShim<P>, size: GuiSize) -> Option<GuiSize> {
    let adjusted = shim.adjust_size(Size::new(size.width, size.height));
    Some(GuiSize {
        width: adjusted.width,
        height: adjusted.height,
    })
}

/// `clap_plugin_gui.get_resize_hints`.
pub fn resize_hints<P: EditorProvider>(shim: &EditorShim<P>) -> Option<GuiResizeHints> {
    let resizable = shim.can_resize();
    Some(GuiResizeHints {
        can_resize_horizontally: resizable,
        can_resize_vertically: resizable,
        strategy: AspectRatioStrategy::Disregard,
    })
}

/// `clap_plugin_gui.show`.
pub fn show<P: EditorProvider>(shim: &mut EditorShim<P>) -> Result<(), PluginError> {
    if shim.show() {
        Ok(())
    } else {
        Err(PluginError::Message("the editor is not attached"))
    }
}
