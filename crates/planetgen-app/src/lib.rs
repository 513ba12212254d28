//! Planet viewer application: window, event handling and the render loop
//! around a mesh generated up front.

pub mod draw_mode;
pub mod window;

pub use window::{AppError, AppState, camera_settings, run};
