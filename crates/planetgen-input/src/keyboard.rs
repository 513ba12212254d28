//! Frame-coherent keyboard state using physical key codes.

use rustc_hash::FxHashSet;
use winit::event::{ElementState, KeyEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

/// Minimal description of a key event, constructible without a window.
#[derive(Debug, Clone, Copy)]
pub struct RawKeyEvent {
    pub key: PhysicalKey,
    pub state: ElementState,
    pub repeat: bool,
}

/// Which keys are held, and which went down since the last frame.
#[derive(Debug, Clone, Default)]
pub struct KeyboardState {
    held: FxHashSet<PhysicalKey>,
    just_pressed: FxHashSet<PhysicalKey>,
}

impl KeyboardState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn process_event(&mut self, event: &KeyEvent) {
        self.process_raw(RawKeyEvent {
            key: event.physical_key,
            state: event.state,
            repeat: event.repeat,
        });
    }

    /// Repeat events are ignored.
    pub fn process_raw(&mut self, event: RawKeyEvent) {
        if event.repeat {
            return;
        }
        match event.state {
            ElementState::Pressed => {
                if self.held.insert(event.key) {
                    self.just_pressed.insert(event.key);
                }
            }
            ElementState::Released => {
                self.held.remove(&event.key);
            }
        }
    }

    #[must_use]
    pub fn just_pressed(&self, key: KeyCode) -> bool {
        self.just_pressed.contains(&PhysicalKey::Code(key))
    }

    /// Lowest number key (`1`-`9`, top row or keypad) pressed this frame.
    #[must_use]
    pub fn just_pressed_number(&self) -> Option<u8> {
        NUMBER_KEYS
            .iter()
            .find(|(_, row, pad)| self.just_pressed(*row) || self.just_pressed(*pad))
            .map(|(n, _, _)| *n)
    }

    /// Clear the just-pressed set. Call at the end of each frame.
    pub fn end_frame(&mut self) {
        self.just_pressed.clear();
    }
}

const NUMBER_KEYS: [(u8, KeyCode, KeyCode); 9] = [
    (1, KeyCode::Digit1, KeyCode::Numpad1),
    (2, KeyCode::Digit2, KeyCode::Numpad2),
    (3, KeyCode::Digit3, KeyCode::Numpad3),
    (4, KeyCode::Digit4, KeyCode::Numpad4),
    (5, KeyCode::Digit5, KeyCode::Numpad5),
    (6, KeyCode::Digit6, KeyCode::Numpad6),
    (7, KeyCode::Digit7, KeyCode::Numpad7),
    (8, KeyCode::Digit8, KeyCode::Numpad8),
    (9, KeyCode::Digit9, KeyCode::Numpad9),
];
