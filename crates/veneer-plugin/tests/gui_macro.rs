//! The `veneer_gui!` expansion drives the shim through clack's traits.

use std::sync::Arc;

use clack_extensions::gui::{GuiApiType, GuiConfiguration, GuiSize, PluginGuiImpl};
use clack_extensions::timer::{PluginTimerImpl, TimerId};
use veneer_core::{Editor, EditorProvider, EditorShim, Size, Toolkit, UnsupportedEmbedding};
use veneer_plugin::veneer_gui;

struct Blank;

impl Editor for Blank {
    fn size(&self) -> Size {
        Size::new(320, 240)
    }

    fn ui(&mut self, ui: &mut egui::Ui) {
        ui.label("blank");
    }
}

struct BlankProvider;

impl EditorProvider for BlankProvider {
    fn create_editor(&mut self, _toolkit: &Arc<Toolkit>) -> Option<Box<dyn Editor>> {
        Some(Box::new(Blank))
    }
}

struct MainThread {
    gui: EditorShim<BlankProvider>,
}

veneer_gui!(MainThread => gui);

fn main_thread() -> MainThread {
    MainThread {
        gui: EditorShim::new(BlankProvider, Box::new(UnsupportedEmbedding))
            .with_toolkit(Toolkit::standalone()),
    }
}

fn docked(api_type: GuiApiType<'static>) -> GuiConfiguration<'static> {
    GuiConfiguration {
        api_type,
        is_floating: false,
    }
}

/// API negotiation accepts the three native APIs and rejects floating.
#[test]
fn test_api_negotiation() {
    let mut mt = main_thread();
    assert!(mt.is_api_supported(docked(GuiApiType::X11)));
    assert!(mt.is_api_supported(docked(GuiApiType::WIN32)));
    assert!(mt.is_api_supported(docked(GuiApiType::COCOA)));
    assert!(!mt.is_api_supported(docked(GuiApiType::WAYLAND)));
    assert!(!mt.is_api_supported(GuiConfiguration {
        api_type: GuiApiType::X11,
        is_floating: true,
    }));
}

/// Create, size queries and destroy flow through to the shim.
#[test]
fn test_lifecycle_through_clack() {
    let mut mt = main_thread();
    assert!(mt.get_size().is_none());

    mt.create(docked(GuiApiType::X11)).unwrap();
    let size = mt.get_size().unwrap();
    assert_eq!((size.width, size.height), (320, 240));

    mt.set_size(GuiSize {
        width: 500,
        height: 400,
    })
    .unwrap();
    let size = mt.get_size().unwrap();
    assert_eq!((size.width, size.height), (500, 400));

    let adjusted = mt
        .adjust_size(GuiSize {
            width: 10,
            height: 20,
        })
        .unwrap();
    assert_eq!((adjusted.width, adjusted.height), (10, 20));

    assert!(!mt.can_resize());
    assert!(mt.show().is_err());
    assert!(mt.hide().is_ok());

    mt.destroy();
    assert!(mt.get_size().is_none());
}

/// Floating creation and double creation are refused.
#[test]
fn test_create_errors() {
    let mut mt = main_thread();
    assert!(
        mt.create(GuiConfiguration {
            api_type: GuiApiType::X11,
            is_floating: true,
        })
        .is_err()
    );
    mt.create(docked(GuiApiType::X11)).unwrap();
    assert!(mt.create(docked(GuiApiType::X11)).is_err());
}

/// Unknown timers are ignored.
#[test]
fn test_foreign_timer_is_ignored() {
    let mut mt = main_thread();
    mt.create(docked(GuiApiType::X11)).unwrap();
    mt.on_timer(TimerId(1234));
    assert!(mt.gui.desktop().is_some());
}
