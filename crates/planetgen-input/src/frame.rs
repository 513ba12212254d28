//! Per-frame input snapshot.

use glam::Vec2;
use winit::event::MouseButton;
use winit::keyboard::KeyCode;

use crate::keyboard::KeyboardState;
use crate::mouse::MouseState;

/// Everything the viewer reads from input in one frame.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FrameInput {
    /// Cursor movement in pixels since the previous frame.
    pub cursor_delta: Vec2,
    pub left_held: bool,
    pub right_held: bool,
    /// Wheel notches scrolled this frame, positive away from the user.
    pub scroll: f32,
    /// Number key pressed this frame, if any.
    pub number_key: Option<u8>,
    pub escape: bool,
}

impl FrameInput {
    pub fn capture(mouse: &MouseState, keyboard: &KeyboardState) -> Self {
        let input = Self {
            cursor_delta: mouse.delta(),
            left_held: mouse.is_held(MouseButton::Left),
            right_held: mouse.is_held(MouseButton::Right),
            scroll: mouse.scroll(),
            number_key: keyboard.just_pressed_number(),
            escape: keyboard.just_pressed(KeyCode::Escape),
        };
        if let Some(n) = input.number_key {
            tracing::trace!(number = n, "number key pressed");
        }
        input
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keyboard::RawKeyEvent;
    use winit::event::{ElementState, MouseScrollDelta};
    use winit::keyboard::PhysicalKey;

    #[test]
    fn test_capture_reflects_both_devices() {
        let mut mouse = MouseState::new();
        let mut keyboard = KeyboardState::new();
        mouse.on_cursor_moved(0.0, 0.0);
        mouse.on_button(MouseButton::Right, ElementState::Pressed);
        mouse.on_cursor_moved(3.0, 4.0);
        mouse.on_scroll(MouseScrollDelta::LineDelta(0.0, 2.0));
        keyboard.process_raw(RawKeyEvent {
            key: PhysicalKey::Code(KeyCode::Digit3),
            state: ElementState::Pressed,
            repeat: false,
        });

        let input = FrameInput::capture(&mouse, &keyboard);
        assert_eq!(input.cursor_delta, Vec2::new(3.0, 4.0));
        assert!(!input.left_held);
        assert!(input.right_held);
        assert_eq!(input.scroll, 2.0);
        assert_eq!(input.number_key, Some(3));
        assert!(!input.escape);
    }

    #[test]
    fn test_scroll_is_per_frame() {
        let mut mouse = MouseState::new();
        mouse.on_scroll(MouseScrollDelta::LineDelta(0.0, 3.0));
        assert_eq!(FrameInput::capture(&mouse, &KeyboardState::new()).scroll, 3.0);
        mouse.end_frame();
        mouse.on_scroll(MouseScrollDelta::LineDelta(0.0, -1.0));
        assert_eq!(FrameInput::capture(&mouse, &KeyboardState::new()).scroll, -1.0);
    }

    #[test]
    fn test_idle_frame() {
        let input = FrameInput::capture(&MouseState::new(), &KeyboardState::new());
        assert_eq!(input, FrameInput::default());
    }
}
