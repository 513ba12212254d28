//! Mouse and keyboard state for the viewer, collected from winit events and
//! read once per frame through [`FrameInput`].

pub mod frame;
pub mod keyboard;
pub mod mouse;

pub use frame::FrameInput;
pub use keyboard::{KeyboardState, RawKeyEvent};
pub use mouse::MouseState;
