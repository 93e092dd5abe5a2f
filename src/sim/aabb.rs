//! Axis-aligned bounding boxes for square units
//!
//! Screen convention: +x right, +y down, so `top` is the smaller y.

use glam::Vec2;

/// An axis-aligned box stored as center + full size
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub center: Vec2,
    pub size: Vec2,
}

impl Aabb {
    pub fn new(center: Vec2, size: Vec2) -> Self {
        Self { center, size }
    }

    /// Square box of side `side` centered on `center`
    pub fn square(center: Vec2, side: f32) -> Self {
        Self::new(center, Vec2::splat(side))
    }

    #[inline]
    pub fn half_extents(&self) -> Vec2 {
        self.size * 0.5
    }

    #[inline]
    pub fn min(&self) -> Vec2 {
        self.center - self.half_extents()
    }

    #[inline]
    pub fn max(&self) -> Vec2 {
        self.center + self.half_extents()
    }

    /// Corners in order: top-left, top-right, bottom-right, bottom-left
    pub fn corners(&self) -> [Vec2; 4] {
        let min = self.min();
        let max = self.max();
        [
            Vec2::new(min.x, min.y),
            Vec2::new(max.x, min.y),
            Vec2::new(max.x, max.y),
            Vec2::new(min.x, max.y),
        ]
    }

    /// Move the box by `delta`
    #[inline]
    pub fn translate(&mut self, delta: Vec2) {
        self.center += delta;
    }

    pub fn contains_point(&self, point: Vec2) -> bool {
        let min = self.min();
        let max = self.max();
        point.x >= min.x && point.x <= max.x && point.y >= min.y && point.y <= max.y
    }
}
