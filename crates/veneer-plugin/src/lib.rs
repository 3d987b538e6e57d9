//! CLAP adapter for veneer editors.
//!
//! Connects a [`veneer_core::EditorShim`] to the host through `clack`:
//!
//! | CLAP | veneer |
//! |------|--------|
//! | `clap.gui` | [`veneer_gui!`] → [`gui`] helpers → `EditorShim` |
//! | `clap.timer-support` | [`HostTimers`] / `PluginTimerImpl::on_timer` → `EditorShim::on_timer` |
//! | `clap.context-menu` | [`ClapContextMenuHost`] → `populate_menu_for_param` |
//! | parent window | [`platform`] embeddings → baseview child window + egui |
//!
//! # Wiring a plugin
//!
//! ```rust,ignore
//! use std::sync::Arc;
//!
//! use clack_extensions::gui::PluginGui;
//! use clack_extensions::timer::PluginTimer;
//! use clack_plugin::prelude::*;
//! use veneer_core::{Editor, EditorShim, ShimConfig, Toolkit};
//! use veneer_plugin::{ClapEditorProvider, HostTimers, native_embedding, veneer_gui};
//!
//! type EditorFactory = fn(&Arc<Toolkit>) -> Option<Box<dyn Editor>>;
//!
//! // `MyEditor` is the plugin's own `veneer_core::Editor`.
//! fn make_editor(_toolkit: &Arc<Toolkit>) -> Option<Box<dyn Editor>> {
//!     Some(Box::new(MyEditor::default()))
//! }
//!
//! pub struct MyMainThread<'a> {
//!     gui: EditorShim<ClapEditorProvider<'a, EditorFactory>>,
//! }
//!
//! impl<'a> MyMainThread<'a> {
//!     fn new(host: HostMainThreadHandle<'a>) -> Self {
//!         let config = ShimConfig::default();
//!         let factory: EditorFactory = make_editor;
//!         let provider = ClapEditorProvider::new(HostTimers::new(host), factory);
//!         let embedding = native_embedding(&config);
//!         Self {
//!             gui: EditorShim::with_config(provider, embedding, config),
//!         }
//!     }
//! }
//!
//! veneer_gui!(MyMainThread<'_> => gui);
//!
//! // In Plugin::declare_extensions:
//! builder.register::<PluginGui>();
//! builder.register::<PluginTimer>();
//! ```

mod context_menu;
mod egui_bridge;
pub mod gui;
pub mod platform;
mod provider;
pub mod timer;

pub use context_menu::{
    CLAP_EXT_CONTEXT_MENU, CLAP_EXT_CONTEXT_MENU_COMPAT, ClapContextMenuHost, ffi,
    populate_menu_for_clap_param, populate_menu_for_raw_host,
};
pub use platform::{CocoaEmbedding, Win32Embedding, X11Embedding, native_embedding};
pub use provider::ClapEditorProvider;
pub use timer::HostTimers;

#[doc(hidden)]
pub mod __private {
    pub use clack_extensions;
    pub use clack_plugin;
    pub use veneer_core;
}

/// Implement clack's `PluginGuiImpl` and `PluginTimerImpl` for a plugin
/// main-thread type by delegating to one of its `EditorShim` fields.
///
/// ```rust,ignore
/// veneer_gui!(MyMainThread<'_> => gui);
/// ```
///
/// The plugin still registers `PluginGui` and `PluginTimer` in
/// `declare_extensions`.
#[macro_export]
macro_rules! veneer_gui {
    ($main_thread:ty => $field:ident) => {
        impl $crate::__private::clack_extensions::gui::PluginGuiImpl for $main_thread {
            fn is_api_supported(
                &mut self,
                config: $crate::__private::clack_extensions::gui::GuiConfiguration,
            ) -> bool {
                $crate::gui::is_api_supported(&self.$field, &config)
            }

            fn get_preferred_api(
                &mut self,
            ) -> Option<$crate::__private::clack_extensions::gui::GuiConfiguration<'_>> {
                $crate::gui::preferred_api()
            }

            fn create(
                &mut self,
                config: $crate::__private::clack_extensions::gui::GuiConfiguration,
            ) -> Result<(), $crate::__private::clack_plugin::prelude::PluginError> {
                $crate::gui::create(&mut self.$field, &config)
            }

            fn destroy(&mut self) {
                self.$field.destroy();
            }

            fn set_scale(
                &mut self,
                scale: f64,
            ) -> Result<(), $crate::__private::clack_plugin::prelude::PluginError> {
                $crate::gui::set_scale(&mut self.$field, scale)
            }

            fn get_size(&mut self) -> Option<$crate::__private::clack_extensions::gui::GuiSize> {
                $crate::gui::get_size(&self.$field)
            }

            fn can_resize(&mut self) -> bool {
                self.$field.can_resize()
            }

            fn get_resize_hints(
                &mut self,
            ) -> Option<$crate::__private::clack_extensions::gui::GuiResizeHints> {
                $crate::gui::resize_hints(&self.$field)
            }

            fn adjust_size(
                &mut self,
                size: $crate::__private::clack_extensions::gui::GuiSize,
            ) -> Option<$crate::__private::clack_extensions::gui::GuiSize> {
                $crate::gui::adjust_size(&self.$field, size)
            }

            fn set_size(
                &mut self,
                size: $crate::__private::clack_extensions::gui::GuiSize,
            ) -> Result<(), $crate::__private::clack_plugin::prelude::PluginError> {
                $crate::gui::set_size(&mut self.$field, size)
            }

            fn set_parent(
                &mut self,
                window: $crate::__private::clack_extensions::gui::Window,
            ) -> Result<(), $crate::__private::clack_plugin::prelude::PluginError> {
                $crate::gui::set_parent(&mut self.$field, &window)
            }

            fn set_transient(
                &mut self,
                _window: $crate::__private::clack_extensions::gui::Window,
            ) -> Result<(), $crate::__private::clack_plugin::prelude::PluginError> {
                Err($crate::__private::clack_plugin::prelude::PluginError::Message(
                    "floating editor windows are not supported",
                ))
            }

            fn show(
                &mut self,
            ) -> Result<(), $crate::__private::clack_plugin::prelude::PluginError> {
                $crate::gui::show(&mut self.$field)
            }

            fn hide(
                &mut self,
            ) -> Result<(), $crate::__private::clack_plugin::prelude::PluginError> {
                self.$field.hide();
                Ok(())
            }
        }

        impl $crate::__private::clack_extensions::timer::PluginTimerImpl for $main_thread {
            fn on_timer(&mut self, timer_id: $crate::__private::clack_extensions::timer::TimerId) {
                self.$field.on_timer($crate::timer::from_clack(timer_id));
            }
        }
    };
}
