//! Accumulates baseview input into egui's [`RawInput`].
//!
//! The child window is opened with a 1:1 baseview scale, so event positions
//! arrive in host pixels. [`InputState`] divides them by the holder scale to
//! land in egui points, matching the `pixels_per_point` the frame is run at.

use baseview::{MouseButton as BvMouseButton, MouseEvent, ScrollDelta, WindowEvent};
use egui::{Event as EguiEvent, Modifiers, PointerButton, Pos2, RawInput, Rect, Vec2};
use keyboard_types::Modifiers as KbModifiers;

/// Points scrolled per wheel line.
const LINE_HEIGHT: f32 = 24.0;

/// Input gathered between two frames.
pub struct InputState {
    raw: RawInput,
    /// Last cursor position in points.
    pointer: Pos2,
    /// Viewport size in host pixels.
    physical: (u32, u32),
    /// Holder scale used for the next frame.
    scale: f32,
}

impl InputState {
    pub fn new(physical: (u32, u32), scale: f32) -> Self {
        Self {
            raw: RawInput::default(),
            pointer: Pos2::ZERO,
            physical,
            scale,
        }
    }

    /// Viewport size in host pixels.
    pub fn physical_size(&self) -> (u32, u32) {
        self.physical
    }

    pub fn set_physical_size(&mut self, width: u32, height: u32) {
        self.physical = (width, height);
    }

    /// Scale applied to positions from now on. Non-positive values are ignored.
    pub fn set_scale(&mut self, scale: f32) {
        if scale > 0.0 {
            self.scale = scale;
        }
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    /// Hand the accumulated input to egui, with the screen rect sized to the
    /// viewport in points.
    pub fn take(&mut self) -> RawInput {
        let (width, height) = self.physical;
        self.raw.screen_rect = Some(Rect::from_min_size(
            Pos2::ZERO,
            Vec2::new(width as f32 / self.scale, height as f32 / self.scale),
        ));
        self.raw.take()
    }

    /// Record a mouse event.
    pub fn on_mouse(&mut self, event: &MouseEvent) {
        let recip = 1.0 / self.scale;
        match event {
            MouseEvent::CursorMoved {
                position,
                modifiers,
            } => {
                self.pointer = Pos2::new(position.x as f32 * recip, position.y as f32 * recip);
                self.raw.modifiers = map_modifiers(*modifiers);
                self.raw.events.push(EguiEvent::PointerMoved(self.pointer));
            }
            MouseEvent::ButtonPressed { button, modifiers } => {
                self.push_button(*button, *modifiers, true);
            }
            MouseEvent::ButtonReleased { button, modifiers } => {
                self.push_button(*button, *modifiers, false);
            }
            MouseEvent::WheelScrolled { delta, modifiers } => {
                self.raw.modifiers = map_modifiers(*modifiers);
                let delta = match delta {
                    ScrollDelta::Lines { x, y } => Vec2::new(x * LINE_HEIGHT, y * LINE_HEIGHT),
                    ScrollDelta::Pixels { x, y } => Vec2::new(x * recip, y * recip),
                };
                self.raw.events.push(EguiEvent::MouseWheel {
                    unit: egui::MouseWheelUnit::Point,
                    delta,
                    modifiers: self.raw.modifiers,
                });
            }
            MouseEvent::CursorLeft => self.raw.events.push(EguiEvent::PointerGone),
            _ => {}
        }
    }

    /// Record a window event. Returns `true` when the viewport was resized.
    pub fn on_window(&mut self, event: &WindowEvent) -> bool {
        match event {
            WindowEvent::Focused => {
                self.raw.focused = true;
                false
            }
            WindowEvent::Unfocused => {
                self.raw.focused = false;
                false
            }
            WindowEvent::Resized(info) => {
                let size = info.physical_size();
                self.physical = (size.width, size.height);
                true
            }
            _ => false,
        }
    }

    /// Track modifier state from a keyboard event.
    pub fn on_modifiers(&mut self, modifiers: KbModifiers) {
        self.raw.modifiers = map_modifiers(modifiers);
    }

    fn push_button(&mut self, button: BvMouseButton, modifiers: KbModifiers, pressed: bool) {
        self.raw.modifiers = map_modifiers(modifiers);
        if let Some(button) = map_mouse_button(button) {
            self.raw.events.push(EguiEvent::PointerButton {
                pos: self.pointer,
                button,
                pressed,
                modifiers: self.raw.modifiers,
            });
        }
    }
}

fn map_modifiers(mods: KbModifiers) -> Modifiers {
    let command = if cfg!(target_os = "macos") {
        mods.contains(KbModifiers::META)
    } else {
        mods.contains(KbModifiers::CONTROL)
    };
    Modifiers {
        alt: mods.contains(KbModifiers::ALT),
        ctrl: mods.contains(KbModifiers::CONTROL),
        shift: mods.contains(KbModifiers::SHIFT),
        mac_cmd: cfg!(target_os = "macos") && mods.contains(KbModifiers::META),
        command,
    }
}

fn map_mouse_button(button: BvMouseButton) -> Option<PointerButton> {
    match button {
        BvMouseButton::Left => Some(PointerButton::Primary),
        BvMouseButton::Right => Some(PointerButton::Secondary),
        BvMouseButton::Middle => Some(PointerButton::Middle),
        BvMouseButton::Back => Some(PointerButton::Extra1),
        BvMouseButton::Forward => Some(PointerButton::Extra2),
        BvMouseButton::Other(_) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use baseview::Point;

    #[test]
    fn positions_are_divided_by_scale() {
        let mut input = InputState::new((300, 200), 2.0);
        input.on_mouse(&MouseEvent::CursorMoved {
            position: Point::new(100.0, 50.0),
            modifiers: KbModifiers::empty(),
        });
        let raw = input.take();
        assert!(matches!(raw.events[0], EguiEvent::PointerMoved(p) if p == Pos2::new(50.0, 25.0)));
        assert_eq!(raw.screen_rect.unwrap().size(), Vec2::new(150.0, 100.0));
    }

    #[test]
    fn press_uses_last_pointer_position() {
        let mut input = InputState::new((100, 100), 1.0);
        input.on_mouse(&MouseEvent::CursorMoved {
            position: Point::new(10.0, 20.0),
            modifiers: KbModifiers::empty(),
        });
        input.on_mouse(&MouseEvent::ButtonPressed {
            button: BvMouseButton::Right,
            modifiers: KbModifiers::SHIFT,
        });
        let raw = input.take();
        let EguiEvent::PointerButton {
            pos,
            button,
            pressed,
            modifiers,
        } = raw.events[1]
        else {
            panic!("expected a button event");
        };
        assert_eq!(pos, Pos2::new(10.0, 20.0));
        assert_eq!(button, PointerButton::Secondary);
        assert!(pressed);
        assert!(modifiers.shift);
    }

    #[test]
    fn take_drains_events() {
        let mut input = InputState::new((100, 100), 1.0);
        input.on_mouse(&MouseEvent::CursorLeft);
        assert_eq!(input.take().events.len(), 1);
        assert!(input.take().events.is_empty());
    }

    #[test]
    fn invalid_scale_is_ignored() {
        let mut input = InputState::new((100, 100), 1.5);
        input.set_scale(0.0);
        assert_eq!(input.scale(), 1.5);
    }
}
