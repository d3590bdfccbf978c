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

/// Colors for game elements (sRGB, straight alpha)
pub mod colors {
    /// `0xRRGGBB` to an opaque RGBA color
    pub const fn hex(rgb: u32) -> [f32; 4] {
        [
            ((rgb >> 16) & 0xff) as f32 / 255.0,
            ((rgb >> 8) & 0xff) as f32 / 255.0,
            (rgb & 0xff) as f32 / 255.0,
            1.0,
        ]
    }

    pub const SKY_TOP: [f32; 4] = hex(0x87CEEB);
    pub const SKY_BOTTOM: [f32; 4] = hex(0xE0FFFF);
    pub const GROUND: [f32; 4] = hex(0xC2A579);
    pub const OBSTACLE: [f32; 4] = hex(0x2EBD59);
    pub const OBSTACLE_LIP: [f32; 4] = hex(0x1C9A42);
    pub const AVATAR: [f32; 4] = hex(0xFFD166);
    pub const EYE: [f32; 4] = hex(0xFFFFFF);
    pub const PUPIL: [f32; 4] = hex(0x000000);
    pub const SCORE: [f32; 4] = hex(0x000000);

    /// sRGB-encoded channel to linear, for sRGB render targets
    pub fn to_linear(color: [f32; 4]) -> [f32; 4] {
        let channel = |c: f32| {
            if c <= 0.04045 {
                c / 12.92
            } else {
                ((c + 0.055) / 1.055).powf(2.4)
            }
        };
        [channel(color[0]), channel(color[1]), channel(color[2]), color[3]]
    }
}
