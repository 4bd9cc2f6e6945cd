use glam::{Mat4, Vec3};

use crate::consts::*;

/// Camera that rises with the stack and looks at its current top
#[derive(Debug, Clone, Copy)]
pub struct StackCamera {
    pub layer: u32,
}

impl StackCamera {
    pub fn new(layer: u32) -> Self {
        Self { layer }
    }

    pub fn position(&self) -> Vec3 {
        Vec3::new(
            CAMERA_X,
            CAMERA_BASE_HEIGHT + self.layer as f32 * CAMERA_HEIGHT_PER_LAYER,
            CAMERA_Z,
        )
    }

    pub fn target(&self) -> Vec3 {
        Vec3::new(0.0, self.layer as f32, 0.0)
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position(), self.target(), Vec3::Y)
    }

    /// Fixed perspective for the window's aspect ratio
    pub fn projection_matrix() -> Mat4 {
        Mat4::perspective_rh(
            FOV_Y_DEGREES.to_radians(),
            WINDOW_WIDTH as f32 / WINDOW_HEIGHT as f32,
            Z_NEAR,
            Z_FAR,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_camera_rises_with_stack() {
        let ground = StackCamera::new(0);
        assert_eq!(ground.position(), Vec3::new(6.0, 8.0, 12.0));
        assert_eq!(ground.target(), Vec3::ZERO);

        let high = StackCamera::new(10);
        assert!((high.position().y - 16.0).abs() < 1e-5);
        assert_eq!(high.target(), Vec3::new(0.0, 10.0, 0.0));
    }

    #[test]
    fn test_target_projects_to_screen_center() {
        let cam = StackCamera::new(4);
        let clip = StackCamera::projection_matrix() * cam.view_matrix() * cam.target().extend(1.0);
        let ndc = clip.truncate() / clip.w;
        assert!(ndc.x.abs() < 1e-4);
        assert!(ndc.y.abs() < 1e-4);
        assert!(ndc.z > 0.0 && ndc.z < 1.0);
    }
}
