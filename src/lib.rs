//! Cube Stacker - A 3D tower-stacking arcade game
//!
//! Core modules:
//! - `sim`: Game simulation (oscillation, drop alignment, fall and reset)
//! - `renderer`: Unit-cube rendering backend (wgpu) and recording backend
//! - `hud`: Bitmap-font score overlay drawn with cubes
//! - `frame`: Per-frame orchestration of simulation and draw calls
//! - `platform`: Clock, input latching and the winit application handler
//! - `settings`: Player-facing presentation settings

pub mod error;
pub mod frame;
pub mod hud;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use error::{InitError, SettingsError};
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Window dimensions (fixed, not resizable)
    pub const WINDOW_WIDTH: u32 = 800;
    pub const WINDOW_HEIGHT: u32 = 600;
    pub const WINDOW_TITLE: &str = "3D Stacker Game";

    /// Perspective projection
    pub const FOV_Y_DEGREES: f32 = 45.0;
    pub const Z_NEAR: f32 = 0.1;
    pub const Z_FAR: f32 = 100.0;

    /// Active cube oscillation: x = sin(t * speed) * range
    pub const OSCILLATION_SPEED: f32 = 2.0;
    pub const OSCILLATION_RANGE: f32 = 3.0;

    /// Horizontal tolerance for a hit (strictly greater is a miss)
    pub const CUBE_WIDTH: f32 = 1.0;
    /// Fraction of `CUBE_WIDTH` under which a hit counts as well-aligned
    pub const ALIGNED_FRACTION: f32 = 0.5;

    /// Fall step per frame (frame-rate dependent on purpose)
    pub const FALL_STEP: f32 = 0.1;
    /// Reset fires once the fall offset goes below this
    pub const FALL_RESET_OFFSET: f32 = -5.0;

    /// Stack-following camera
    pub const CAMERA_X: f32 = 6.0;
    pub const CAMERA_Z: f32 = 12.0;
    pub const CAMERA_BASE_HEIGHT: f32 = 8.0;
    pub const CAMERA_HEIGHT_PER_LAYER: f32 = 0.8;
}
