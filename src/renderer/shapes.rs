//! Shape generation for 2D primitives
//!
//! Every shape comes out as a triangle list.

use glam::Vec2;
use std::f32::consts::PI;

use super::vertex::{Color, Vertex};
use crate::sim::Aabb;

/// Segments used for effect circles
pub const CIRCLE_SEGMENTS: u32 = 16;

/// Generate vertices for a filled axis-aligned rectangle
pub fn rect(bounds: &Aabb, color: Color) -> Vec<Vertex> {
    let [tl, tr, br, bl] = bounds.corners();
    quad(tl, tr, br, bl, color)
}

/// Generate vertices for a filled circle
pub fn circle(center: Vec2, radius: f32, color: Color, segments: u32) -> Vec<Vertex> {
    let segments = segments.max(3);
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

/// Generate vertices for a line of the given width
pub fn line(start: Vec2, end: Vec2, width: f32, color: Color) -> Vec<Vertex> {
    let dir = (end - start).normalize_or_zero();
    if dir == Vec2::ZERO {
        return Vec::new();
    }
    // Perpendicular for width
    let perp = Vec2::new(-dir.y, dir.x) * (width / 2.0);
    quad(start + perp, end + perp, end - perp, start - perp, color)
}

fn quad(a: Vec2, b: Vec2, c: Vec2, d: Vec2, color: Color) -> Vec<Vertex> {
    vec![
        Vertex::new(a.x, a.y, color),
        Vertex::new(b.x, b.y, color),
        Vertex::new(c.x, c.y, color),
        Vertex::new(c.x, c.y, color),
        Vertex::new(d.x, d.y, color),
        Vertex::new(a.x, a.y, color),
    ]
}
