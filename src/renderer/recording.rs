//! In-memory renderer that records draw calls

use std::convert::Infallible;

use glam::Mat4;

use super::{CubeRenderer, Rgb};

/// One call made against a [`CubeRenderer`]
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Clear,
    SetView(Mat4),
    SetProjection(Mat4),
    Cube { model: Mat4, color: Rgb },
    Present,
}

/// Renderer that keeps every command it receives
#[derive(Debug, Default)]
pub struct RecordingRenderer {
    pub commands: Vec<DrawCommand>,
}

impl RecordingRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drain the recorded commands
    pub fn take(&mut self) -> Vec<DrawCommand> {
        std::mem::take(&mut self.commands)
    }

    /// Recorded cube draws in order
    pub fn cubes(&self) -> impl Iterator<Item = (Mat4, Rgb)> + '_ {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Cube { model, color } => Some((*model, *color)),
            _ => None,
        })
    }

    /// Cube draws with the given color
    pub fn cubes_colored(&self, color: Rgb) -> Vec<Mat4> {
        self.cubes()
            .filter(|(_, c)| *c == color)
            .map(|(m, _)| m)
            .collect()
    }
}

impl CubeRenderer for RecordingRenderer {
    type Error = Infallible;

    fn clear(&mut self) {
        self.commands.push(DrawCommand::Clear);
    }

    fn set_view(&mut self, view: Mat4) {
        self.commands.push(DrawCommand::SetView(view));
    }

    fn set_projection(&mut self, projection: Mat4) {
        self.commands.push(DrawCommand::SetProjection(projection));
    }

    fn draw_cube(&mut self, model: Mat4, color: Rgb) {
        self.commands.push(DrawCommand::Cube { model, color });
    }

    fn present(&mut self) -> Result<(), Infallible> {
        self.commands.push(DrawCommand::Present);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_records_in_order() {
        let mut r = RecordingRenderer::new();
        r.clear();
        r.set_view(Mat4::IDENTITY);
        r.draw_cube(Mat4::IDENTITY, [1.0, 0.0, 0.0]);
        r.present().unwrap();

        assert_eq!(
            r.take(),
            vec![
                DrawCommand::Clear,
                DrawCommand::SetView(Mat4::IDENTITY),
                DrawCommand::Cube {
                    model: Mat4::IDENTITY,
                    color: [1.0, 0.0, 0.0]
                },
                DrawCommand::Present,
            ]
        );
        assert!(r.commands.is_empty());
    }

    #[test]
    fn test_cubes_colored() {
        let mut r = RecordingRenderer::new();
        r.draw_cube(Mat4::IDENTITY, [1.0, 0.0, 0.0]);
        r.draw_cube(Mat4::ZERO, [0.0, 1.0, 0.0]);
        assert_eq!(r.cubes().count(), 2);
        assert_eq!(r.cubes_colored([0.0, 1.0, 0.0]), vec![Mat4::ZERO]);
    }
}
