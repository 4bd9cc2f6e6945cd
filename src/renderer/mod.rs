//! Unit-cube rendering
//!
//! Everything on screen is a unit cube drawn with some transform and color.
//! The frame code talks to [`CubeRenderer`]; `pipeline` implements it on
//! wgpu and `recording` captures the calls for headless tests.

pub mod camera;
pub mod pipeline;
pub mod recording;
pub mod vertex;

pub use camera::StackCamera;
pub use pipeline::CubeRenderState;
pub use recording::{DrawCommand, RecordingRenderer};
pub use vertex::colors;

use glam::Mat4;

/// Display RGB color, each channel 0..=1
pub type Rgb = [f32; 3];

/// Draw-call surface the frame orchestrator renders through
pub trait CubeRenderer {
    /// Error surfaced when a finished frame cannot be shown
    type Error;

    /// Start a frame: clear color and depth
    fn clear(&mut self);

    /// Camera matrix for subsequent draws
    fn set_view(&mut self, view: Mat4);

    /// Projection matrix for subsequent draws
    fn set_projection(&mut self, projection: Mat4);

    /// Draw the unit cube transformed by `model`
    fn draw_cube(&mut self, model: Mat4, color: Rgb);

    /// Show the frame
    fn present(&mut self) -> Result<(), Self::Error>;
}
