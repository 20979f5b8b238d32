//! Vertex types for 2D rendering

use bytemuck::{Pod, Zeroable};

/// Simple 2D vertex with position and color
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
    pub color: [f32; 4],
}

impl Vertex {
    pub const fn new(x: f32, y: f32, color: [f32; 4]) -> Self {
        Self {
            position: [x, y],
            color,
        }
    }

    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x2,
                },
                wgpu::VertexAttribute {
                    offset: std::mem::size_of::<[f32; 2]>() as wgpu::BufferAddress,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x4,
                },
            ],
        }
    }
}

/// Colors for game elements (sRGB, passed through unconverted)
pub mod colors {
    pub const BACKGROUND: [f32; 4] = [0.173, 0.243, 0.314, 1.0]; // #2c3e50
    pub const OBSTACLE: [f32; 4] = [0.153, 0.682, 0.376, 1.0]; // #27ae60
    pub const BIRD_BODY: [f32; 4] = [0.96, 0.78, 0.26, 1.0];
    pub const BIRD_WING: [f32; 4] = [0.84, 0.65, 0.14, 1.0];
    pub const BIRD_EYE: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
    pub const BIRD_PUPIL: [f32; 4] = [0.08, 0.08, 0.08, 1.0];
    pub const BIRD_BEAK: [f32; 4] = [0.88, 0.29, 0.14, 1.0];
}
