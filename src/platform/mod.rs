//! Platform layer
//!
//! Handles the native window side of the game:
//! - Time since start
//! - Keyboard input
//! - The winit application handler that drives frames

pub mod app;
pub mod clock;
pub mod input;

pub use app::StackerApp;
pub use clock::Clock;
pub use input::{InputAction, InputState};
