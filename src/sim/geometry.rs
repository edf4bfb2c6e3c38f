//! Rays and circles
//!
//! Vectors are plain `glam::Vec2` values. The one operation `Vec2` leaves
//! unguarded for our purposes is normalizing a zero vector, so directions
//! derived from point differences go through [`safe_direction`].

use glam::Vec2;

/// A ray with an origin and a (not necessarily unit) direction
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: Vec2,
    pub dir: Vec2,
}

impl Ray {
    pub fn new(origin: Vec2, dir: Vec2) -> Self {
        Self { origin, dir }
    }

    /// Point at parametric distance `t` along the ray
    #[inline]
    pub fn at(&self, t: f32) -> Vec2 {
        self.origin + self.dir * t
    }
}

/// A circle in canvas space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Circle {
    pub center: Vec2,
    pub radius: f32,
}

impl Circle {
    pub fn new(center: Vec2, radius: f32) -> Self {
        Self { center, radius }
    }

    /// Whether `point` lies strictly within `radius + buffer` of the center
    #[inline]
    pub fn hit_test(&self, point: Vec2, buffer: f32) -> bool {
        point.distance(self.center) < self.radius + buffer
    }

    /// Center-to-center distance
    #[inline]
    pub fn distance_to(&self, other: &Circle) -> f32 {
        self.center.distance(other.center)
    }

    /// Whether the two discs interpenetrate
    #[inline]
    pub fn overlaps(&self, other: &Circle) -> bool {
        self.distance_to(other) < self.radius + other.radius
    }
}

/// Normalize `v`, or `fallback` if `v` has no usable direction
///
/// If the fallback is unusable as well, +X is returned.
pub fn safe_direction(v: Vec2, fallback: Vec2) -> Vec2 {
    v.try_normalize()
        .or_else(|| fallback.try_normalize())
        .unwrap_or(Vec2::X)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ray_at() {
        let ray = Ray::new(Vec2::new(1.0, 2.0), Vec2::new(0.0, 2.0));
        assert_eq!(ray.at(0.0), Vec2::new(1.0, 2.0));
        assert_eq!(ray.at(1.5), Vec2::new(1.0, 5.0));
    }

    #[test]
    fn test_hit_test_uses_buffer() {
        let circle = Circle::new(Vec2::new(100.0, 100.0), 10.0);
        assert!(circle.hit_test(Vec2::new(115.0, 100.0), 10.0));
        assert!(!circle.hit_test(Vec2::new(115.0, 100.0), 0.0));
        // Boundary is exclusive
        assert!(!circle.hit_test(Vec2::new(120.0, 100.0), 10.0));
    }

    #[test]
    fn test_overlaps() {
        let a = Circle::new(Vec2::ZERO, 10.0);
        let b = Circle::new(Vec2::new(59.0, 0.0), 50.0);
        let c = Circle::new(Vec2::new(60.0, 0.0), 50.0);
        assert!(a.overlaps(&b));
        assert!(!a.overlaps(&c));
    }

    #[test]
    fn test_safe_direction() {
        assert_eq!(safe_direction(Vec2::new(0.0, 3.0), Vec2::X), Vec2::Y);
        assert_eq!(safe_direction(Vec2::ZERO, Vec2::new(0.0, -2.0)), Vec2::NEG_Y);
        assert_eq!(safe_direction(Vec2::ZERO, Vec2::ZERO), Vec2::X);
        assert_eq!(safe_direction(Vec2::new(f32::NAN, 1.0), Vec2::ZERO), Vec2::X);
    }
}
