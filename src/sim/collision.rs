//! Hit tests for ability resolution
//!
//! Abilities never sweep: every test here is a distance check from an
//! origin, against either a unit's center or its box corners.

use glam::Vec2;

use super::aabb::Aabb;

/// True if `point` lies within `radius` of `origin` (inclusive)
#[inline]
pub fn within_radius(origin: Vec2, point: Vec2, radius: f32) -> bool {
    origin.distance(point) <= radius
}

/// True if `point` lies strictly closer than `radius` to `origin`
#[inline]
pub fn strictly_within_radius(origin: Vec2, point: Vec2, radius: f32) -> bool {
    origin.distance(point) < radius
}

/// Number of box corners within `radius` of `origin` (inclusive)
pub fn corners_within(origin: Vec2, bounds: &Aabb, radius: f32) -> usize {
    bounds
        .corners()
        .iter()
        .filter(|&&corner| within_radius(origin, corner, radius))
        .count()
}

/// True if any box corner lies within `radius` of `origin`
#[inline]
pub fn any_corner_within(origin: Vec2, bounds: &Aabb, radius: f32) -> bool {
    corners_within(origin, bounds, radius) > 0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_within_radius_is_inclusive() {
        assert!(within_radius(Vec2::ZERO, Vec2::new(30.0, 0.0), 30.0));
        assert!(!within_radius(Vec2::ZERO, Vec2::new(30.01, 0.0), 30.0));
    }

    #[test]
    fn test_strict_radius_excludes_boundary() {
        assert!(!strictly_within_radius(Vec2::ZERO, Vec2::new(0.0, 150.0), 150.0));
        assert!(strictly_within_radius(Vec2::ZERO, Vec2::new(0.0, 149.9), 150.0));
    }

    #[test]
    fn test_corners_straddling_boundary() {
        // Box spans x in [490, 510]; left corners at distance 490.x, right at 510.x
        let bounds = Aabb::square(Vec2::new(500.0, 0.0), 20.0);
        assert_eq!(corners_within(Vec2::ZERO, &bounds, 500.0), 2);
        assert!(any_corner_within(Vec2::ZERO, &bounds, 500.0));
    }

    #[test]
    fn test_no_corner_in_range() {
        let bounds = Aabb::square(Vec2::new(600.0, 0.0), 20.0);
        assert_eq!(corners_within(Vec2::ZERO, &bounds, 500.0), 0);
        assert!(!any_corner_within(Vec2::ZERO, &bounds, 500.0));
    }
}
