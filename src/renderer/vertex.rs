//! Vertex and instance types for the unit cube

use bytemuck::{Pod, Zeroable};
use glam::Mat4;

use super::Rgb;

/// Unit cube corner
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
}

impl Vertex {
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { position: [x, y, z] }
    }

    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[wgpu::VertexAttribute {
                offset: 0,
                shader_location: 0,
                format: wgpu::VertexFormat::Float32x3,
            }],
        }
    }
}

/// Unit cube corners at ±0.5: front face (z = +0.5) then back face
pub const CUBE_VERTICES: [Vertex; 8] = [
    Vertex::new(-0.5, -0.5, 0.5),
    Vertex::new(0.5, -0.5, 0.5),
    Vertex::new(0.5, 0.5, 0.5),
    Vertex::new(-0.5, 0.5, 0.5),
    Vertex::new(-0.5, -0.5, -0.5),
    Vertex::new(0.5, -0.5, -0.5),
    Vertex::new(0.5, 0.5, -0.5),
    Vertex::new(-0.5, 0.5, -0.5),
];

/// 12 triangles, two per face: front, back, left, right, top, bottom
pub const CUBE_INDICES: [u16; 36] = [
    0, 1, 2, 2, 3, 0, //
    4, 5, 6, 6, 7, 4, //
    0, 4, 7, 7, 3, 0, //
    1, 5, 6, 6, 2, 1, //
    3, 2, 6, 6, 7, 3, //
    0, 1, 5, 5, 4, 0,
];

/// Per-cube instance data: full clip transform plus color
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct CubeInstance {
    pub mvp: [[f32; 4]; 4],
    pub color: [f32; 4],
}

impl CubeInstance {
    pub fn new(mvp: Mat4, color: Rgb) -> Self {
        Self {
            mvp: mvp.to_cols_array_2d(),
            color: [color[0], color[1], color[2], 1.0],
        }
    }

    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        const ATTRIBUTES: [wgpu::VertexAttribute; 5] = wgpu::vertex_attr_array![
            1 => Float32x4,
            2 => Float32x4,
            3 => Float32x4,
            4 => Float32x4,
            5 => Float32x4
        ];
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<CubeInstance>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &ATTRIBUTES,
        }
    }
}

/// Colors for game elements
pub mod colors {
    use crate::renderer::Rgb;
    use crate::sim::Alignment;

    pub const STACK: Rgb = [0.2, 0.6, 0.9];
    pub const ALIGNED: Rgb = [0.2, 0.8, 0.2];
    pub const MISALIGNED: Rgb = [0.8, 0.2, 0.2];
    pub const FIRST: Rgb = [0.9, 0.9, 0.2];
    pub const FALLING: Rgb = [1.0, 0.0, 0.0];
    pub const HUD: Rgb = [0.95, 0.95, 0.98];
    pub const BACKGROUND: Rgb = [0.0, 0.0, 0.0];

    /// Active cube color for its current alignment
    pub fn for_alignment(alignment: Alignment) -> Rgb {
        match alignment {
            Alignment::First => FIRST,
            Alignment::Aligned => ALIGNED,
            Alignment::Loose | Alignment::Miss => MISALIGNED,
        }
    }

    /// sRGB-encoded channel to linear, for sRGB render targets
    pub fn srgb_to_linear(color: Rgb) -> Rgb {
        color.map(|c| {
            if c <= 0.04045 {
                c / 12.92
            } else {
                ((c + 0.055) / 1.055).powf(2.4)
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::Alignment;

    #[test]
    fn test_cube_mesh_topology() {
        assert_eq!(CUBE_INDICES.len(), 36);
        assert!(CUBE_INDICES.iter().all(|&i| (i as usize) < CUBE_VERTICES.len()));
        for v in &CUBE_VERTICES {
            assert!(v.position.iter().all(|c| c.abs() == 0.5));
        }
        // Every corner is used
        for i in 0..CUBE_VERTICES.len() as u16 {
            assert!(CUBE_INDICES.contains(&i));
        }
    }

    #[test]
    fn test_vertex_layout() {
        let layout = Vertex::desc();
        assert_eq!(layout.array_stride, 12);
        assert_eq!(layout.attributes.len(), 1);
        assert_eq!(layout.step_mode, wgpu::VertexStepMode::Vertex);
    }

    #[test]
    fn test_instance_layout() {
        let layout = CubeInstance::desc();
        assert_eq!(layout.array_stride, 80);
        assert_eq!(layout.attributes.len(), 5);
        assert_eq!(layout.step_mode, wgpu::VertexStepMode::Instance);
    }

    #[test]
    fn test_instance_is_column_major() {
        let mvp = Mat4::from_translation(glam::Vec3::new(1.0, 2.0, 3.0));
        let instance = CubeInstance::new(mvp, colors::STACK);
        assert_eq!(instance.mvp[3], [1.0, 2.0, 3.0, 1.0]);
        assert_eq!(instance.color, [0.2, 0.6, 0.9, 1.0]);
    }

    #[test]
    fn test_alignment_colors() {
        assert_eq!(colors::for_alignment(Alignment::First), colors::FIRST);
        assert_eq!(colors::for_alignment(Alignment::Aligned), colors::ALIGNED);
        assert_eq!(colors::for_alignment(Alignment::Loose), colors::MISALIGNED);
        assert_eq!(colors::for_alignment(Alignment::Miss), colors::MISALIGNED);
    }

    #[test]
    fn test_srgb_to_linear_endpoints() {
        assert_eq!(colors::srgb_to_linear([0.0, 1.0, 0.0]), [0.0, 1.0, 0.0]);
        let mid = colors::srgb_to_linear([0.5, 0.5, 0.5]);
        assert!((mid[0] - 0.214).abs() < 0.001);
    }
}
