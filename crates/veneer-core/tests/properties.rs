//! Property-based tests for API negotiation and scaling.

mod common;

use common::{MockProvider, RecordingEmbedding};
use proptest::prelude::*;
use veneer_core::{EditorShim, Platform, Size, Toolkit, WindowApi};

fn shim(platform: Platform) -> EditorShim<MockProvider> {
    let (embedding, _log) = RecordingEmbedding::for_platform(platform);
    EditorShim::new(MockProvider::default(), Box::new(embedding))
        .with_toolkit(Toolkit::standalone())
}

proptest! {
    /// Only the three native API names are accepted, and never floating.
    #[test]
    fn api_support_matches_known_names(api in "[a-z0-9]{0,8}", floating in any::<bool>()) {
        let shim = shim(Platform::Linux);
        let known = matches!(api.as_str(), "win32" | "cocoa" | "x11");
        prop_assert_eq!(shim.is_api_supported(&api, floating), known && !floating);
    }

    /// Known names are accepted exactly when docked.
    #[test]
    fn known_apis_depend_only_on_floating(index in 0usize..3, floating in any::<bool>()) {
        let shim = shim(Platform::Windows);
        let api = WindowApi::ALL[index].as_str();
        prop_assert_eq!(shim.is_api_supported(api, floating), !floating);
    }

    /// The reported size is the natural size scaled by the factor, and the
    /// desktop always matches the holder bounds.
    #[test]
    fn scaled_size_is_consistent(scale in 0.25f64..4.0) {
        let mut shim = shim(Platform::Windows);
        shim.create("win32", false).unwrap();
        shim.set_scale(scale).unwrap();

        let expected = Size::new((400.0 * scale).round() as u32, (300.0 * scale).round() as u32);
        prop_assert_eq!(shim.size(), Some(expected));
        let desktop = shim.desktop().unwrap().lock();
        prop_assert_eq!(desktop.size(), desktop.holder().transformed_size());
    }

    /// Scaling never succeeds on macOS.
    #[test]
    fn macos_never_rescales(scale in 0.1f64..8.0) {
        let mut shim = shim(Platform::MacOs);
        shim.create("cocoa", false).unwrap();
        prop_assert!(shim.set_scale(scale).is_err());
        prop_assert_eq!(shim.gui_scale(), 1.0);
        prop_assert_eq!(shim.size(), Some(Size::new(400, 300)));
    }
}
