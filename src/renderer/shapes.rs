//! Shape generation for 2D primitives
//!
//! All shapes are triangle lists in canvas coordinates (y down).

use glam::Vec2;
use std::f32::consts::PI;

use super::vertex::Vertex;

/// Filled axis-aligned rectangle from its top-left corner
pub fn rect(top_left: Vec2, size: Vec2, color: [f32; 4]) -> Vec<Vertex> {
    horizontal_gradient_rect(top_left, size, color, color)
}

/// Rectangle blending from `left` to `right` across its width
pub fn horizontal_gradient_rect(
    top_left: Vec2,
    size: Vec2,
    left: [f32; 4],
    right: [f32; 4],
) -> Vec<Vertex> {
    let (x0, y0) = (top_left.x, top_left.y);
    let (x1, y1) = (x0 + size.x, y0 + size.y);

    vec![
        Vertex::new(x0, y0, left),
        Vertex::new(x1, y0, right),
        Vertex::new(x0, y1, left),
        Vertex::new(x0, y1, left),
        Vertex::new(x1, y0, right),
        Vertex::new(x1, y1, right),
    ]
}

/// Filled circle shaded from `core` at the center to `edge` at the rim
pub fn radial_circle(
    center: Vec2,
    radius: f32,
    core: [f32; 4],
    edge: [f32; 4],
    segments: u32,
) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity((segments * 3) as usize);

    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * 2.0 * PI;
        let theta2 = ((i + 1) as f32 / segments as f32) * 2.0 * PI;

        // Triangle from center to edge
        vertices.push(Vertex::new(center.x, center.y, core));
        vertices.push(Vertex::new(
            center.x + radius * theta1.cos(),
            center.y + radius * theta1.sin(),
            edge,
        ));
        vertices.push(Vertex::new(
            center.x + radius * theta2.cos(),
            center.y + radius * theta2.sin(),
            edge,
        ));
    }

    vertices
}

/// Diamond (rotated square) with the given half-extent
pub fn diamond(center: Vec2, half: f32, color: [f32; 4]) -> Vec<Vertex> {
    let top = Vertex::new(center.x, center.y - half, color);
    let right = Vertex::new(center.x + half, center.y, color);
    let bottom = Vertex::new(center.x, center.y + half, color);
    let left = Vertex::new(center.x - half, center.y, color);
    vec![top, right, bottom, bottom, left, top]
}
