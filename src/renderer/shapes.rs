//! Shape generation for 2D primitives

use glam::Vec2;
use std::f32::consts::PI;

use super::vertex::Vertex;

/// Generate vertices for a filled circle
pub fn circle(center: Vec2, radius: f32, color: [f32; 4], segments: u32) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity((segments * 3) as usize);

    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * 2.0 * PI;
        let theta2 = ((i + 1) as f32 / segments as f32) * 2.0 * PI;

        // Triangle from center to edge
        vertices.push(Vertex::new(center.x, center.y, color));
        vertices.push(Vertex::new(
            center.x + radius * theta1.cos(),
            center.y + radius * theta1.sin(),
            color,
        ));
        vertices.push(Vertex::new(
            center.x + radius * theta2.cos(),
            center.y + radius * theta2.sin(),
            color,
        ));
    }

    vertices
}

/// Spin marker: a small dot offset from the circle center by its body angle
pub fn angle_notch(center: Vec2, radius: f32, angle: f32, color: [f32; 4]) -> Vec<Vertex> {
    let offset = Vec2::new(angle.cos(), angle.sin()) * radius * 0.55;
    circle(center + offset, radius * 0.2, color, 12)
}

/// Generate vertices for an axis-aligned filled rectangle
pub fn rect(min: Vec2, size: Vec2, color: [f32; 4]) -> Vec<Vertex> {
    let max = min + size;
    vec![
        Vertex::new(min.x, min.y, color),
        Vertex::new(max.x, min.y, color),
        Vertex::new(max.x, max.y, color),
        Vertex::new(min.x, min.y, color),
        Vertex::new(max.x, max.y, color),
        Vertex::new(min.x, max.y, color),
    ]
}

/// Field border: four strips just inside the given bounds
pub fn border(width: f32, height: f32, thickness: f32, color: [f32; 4]) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity(24);
    // Top, bottom
    vertices.extend(rect(Vec2::ZERO, Vec2::new(width, thickness), color));
    vertices.extend(rect(
        Vec2::new(0.0, height - thickness),
        Vec2::new(width, thickness),
        color,
    ));
    // Left, right
    vertices.extend(rect(Vec2::ZERO, Vec2::new(thickness, height), color));
    vertices.extend(rect(
        Vec2::new(width - thickness, 0.0),
        Vec2::new(thickness, height),
        color,
    ));
    vertices
}
