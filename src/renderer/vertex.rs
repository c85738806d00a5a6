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

/// Colors for game elements
pub mod colors {
    use crate::sim::PowerupKind;

    /// 0xRRGGBB to linear-ish RGBA floats
    pub const fn from_hex(rgb: u32, alpha: f32) -> [f32; 4] {
        [
            ((rgb >> 16) & 0xff) as f32 / 255.0,
            ((rgb >> 8) & 0xff) as f32 / 255.0,
            (rgb & 0xff) as f32 / 255.0,
            alpha,
        ]
    }

    pub const PADDLE_LEFT: [f32; 4] = from_hex(0x50aaff, 1.0);
    pub const PADDLE_RIGHT: [f32; 4] = from_hex(0x00cccc, 1.0);
    pub const BALL_CORE: [f32; 4] = from_hex(0xffff00, 1.0);
    pub const BALL_EDGE: [f32; 4] = from_hex(0xffaa00, 1.0);
    pub const GAME_OVER_SHADE: [f32; 4] = [0.0, 0.0, 0.0, 0.7];
    pub const BACKGROUND: [f32; 4] = [0.02, 0.02, 0.05, 1.0];

    pub fn powerup(kind: PowerupKind) -> [f32; 4] {
        let rgb = match kind {
            PowerupKind::Expand => 0x00ff00,
            PowerupKind::Shrink => 0xff0000,
            PowerupKind::MultiBall => 0xffaa00,
            PowerupKind::Slow => 0xaa00ff,
            PowerupKind::Fast => 0x00cccc,
            PowerupKind::Life => 0xffff00,
        };
        from_hex(rgb, 1.0)
    }
}
