//! Frame-coherent mouse state.
//!
//! Cursor motion and scroll accumulate between [`MouseState::end_frame`]
//! calls; button holds persist across frames.

use glam::Vec2;
use winit::event::{ElementState, MouseButton, MouseScrollDelta};

/// Pixels of a trackpad `PixelDelta` that count as one wheel notch.
const PIXELS_PER_LINE: f64 = 40.0;

fn button_slot(button: MouseButton) -> Option<usize> {
    match button {
        MouseButton::Left => Some(0),
        MouseButton::Right => Some(1),
        MouseButton::Middle => Some(2),
        _ => None,
    }
}

/// Mouse state fed by winit window events.
#[derive(Debug, Clone, Default)]
pub struct MouseState {
    position: Option<Vec2>,
    delta: Vec2,
    held: [bool; 3],
    scroll: f32,
}

impl MouseState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Process a `CursorMoved` event.
    ///
    /// The first position after startup (or after the cursor re-enters) only
    /// seeds the tracker, so entering the window never produces a jump.
    pub fn on_cursor_moved(&mut self, x: f64, y: f64) {
        let new_pos = Vec2::new(x as f32, y as f32);
        if let Some(old) = self.position {
            self.delta += new_pos - old;
        }
        self.position = Some(new_pos);
    }

    /// Process a `CursorLeft` event.
    pub fn on_cursor_left(&mut self) {
        self.position = None;
    }

    /// Process a `MouseInput` event. Buttons other than left, right and middle are ignored.
    pub fn on_button(&mut self, button: MouseButton, state: ElementState) {
        let Some(slot) = button_slot(button) else {
            return;
        };
        self.held[slot] = state == ElementState::Pressed;
    }

    /// Process a `MouseWheel` event. Positive is away from the user.
    pub fn on_scroll(&mut self, delta: MouseScrollDelta) {
        let lines = match delta {
            MouseScrollDelta::LineDelta(_x, y) => y,
            MouseScrollDelta::PixelDelta(pos) => (pos.y / PIXELS_PER_LINE) as f32,
        };
        self.scroll += lines;
    }

    /// Reset per-frame deltas. Held buttons persist.
    pub fn end_frame(&mut self) {
        self.delta = Vec2::ZERO;
        self.scroll = 0.0;
    }

    /// Cursor movement in pixels since the last [`end_frame`](Self::end_frame).
    #[must_use]
    pub fn delta(&self) -> Vec2 {
        self.delta
    }

    #[must_use]
    pub fn is_held(&self, button: MouseButton) -> bool {
        button_slot(button).is_some_and(|i| self.held[i])
    }

    /// Wheel notches scrolled this frame.
    #[must_use]
    pub fn scroll(&self) -> f32 {
        self.scroll
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_move_only_seeds_position() {
        let mut ms = MouseState::new();
        ms.on_cursor_moved(100.0, 200.0);
        assert_eq!(ms.delta(), Vec2::ZERO);
        ms.on_cursor_moved(101.0, 200.0);
        assert_eq!(ms.delta(), Vec2::new(1.0, 0.0));
    }

    #[test]
    fn test_delta_accumulates_within_frame() {
        let mut ms = MouseState::new();
        ms.on_cursor_moved(100.0, 200.0);
        ms.on_cursor_moved(110.0, 195.0);
        ms.on_cursor_moved(112.0, 190.0);
        assert_eq!(ms.delta(), Vec2::new(12.0, -10.0));
        ms.end_frame();
        assert_eq!(ms.delta(), Vec2::ZERO);
    }

    #[test]
    fn test_reentering_window_does_not_jump() {
        let mut ms = MouseState::new();
        ms.on_cursor_moved(10.0, 10.0);
        ms.on_cursor_left();
        ms.on_cursor_moved(500.0, 400.0);
        assert_eq!(ms.delta(), Vec2::ZERO);
    }

    #[test]
    fn test_button_hold_and_release() {
        let mut ms = MouseState::new();
        ms.on_button(MouseButton::Left, ElementState::Pressed);
        assert!(ms.is_held(MouseButton::Left));
        assert!(!ms.is_held(MouseButton::Right));

        ms.end_frame();
        assert!(ms.is_held(MouseButton::Left));

        ms.on_button(MouseButton::Left, ElementState::Released);
        assert!(!ms.is_held(MouseButton::Left));
    }

    #[test]
    fn test_extra_buttons_ignored() {
        let mut ms = MouseState::new();
        ms.on_button(MouseButton::Back, ElementState::Pressed);
        assert!(!ms.is_held(MouseButton::Back));
    }

    #[test]
    fn test_scroll_resets_each_frame() {
        let mut ms = MouseState::new();
        ms.on_scroll(MouseScrollDelta::LineDelta(0.0, 1.0));
        ms.on_scroll(MouseScrollDelta::LineDelta(0.0, 0.5));
        assert_eq!(ms.scroll(), 1.5);
        ms.end_frame();
        assert_eq!(ms.scroll(), 0.0);
        ms.on_scroll(MouseScrollDelta::LineDelta(0.0, -2.0));
        assert_eq!(ms.scroll(), -2.0);
    }

    #[test]
    fn test_pixel_scroll_is_scaled_to_lines() {
        let mut ms = MouseState::new();
        ms.on_scroll(MouseScrollDelta::PixelDelta(
            winit::dpi::PhysicalPosition::new(0.0, 80.0),
        ));
        assert_eq!(ms.scroll(), 2.0);
    }
}
