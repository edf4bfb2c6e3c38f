//! Ray-circle intersection and circle-circle separation
//!
//! Intersection clips shadow rays against the occluder; separation keeps a
//! dragged circle from being pushed into the other one.

use glam::Vec2;

use super::geometry::{Ray, safe_direction};

/// Intersect a ray with a circle
///
/// Solves `|origin + dir·t - center|² = radius²` and returns the nearer root.
/// The root may be negative when the circle sits behind the ray origin; use
/// [`forward_hit`] when only hits ahead of the origin matter. Returns `None`
/// when the ray's line misses the circle or the direction is zero.
pub fn ray_circle_intersection(ray: &Ray, center: Vec2, radius: f32) -> Option<f32> {
    let oc = ray.origin - center;
    let a = ray.dir.dot(ray.dir);
    if a <= 0.0 {
        return None;
    }
    let b = 2.0 * oc.dot(ray.dir);
    let c = oc.dot(oc) - radius * radius;
    let disc = b * b - 4.0 * a * c;

    if disc < 0.0 {
        return None;
    }
    Some((-b - disc.sqrt()) / (2.0 * a))
}

/// Nearest intersection strictly ahead of the ray origin (`t > 0`)
#[inline]
pub fn forward_hit(ray: &Ray, center: Vec2, radius: f32) -> Option<f32> {
    ray_circle_intersection(ray, center, radius).filter(|&t| t > 0.0)
}

/// Resolve a proposed position for a dragged circle against a fixed one
///
/// If the proposed center is closer than `dragged_radius + other_radius` to
/// `other_center`, it is pushed out to exactly that distance along the
/// direction from `other_center` to the proposal. When the proposal sits
/// exactly on `other_center`, `fallback` supplies the push direction.
pub fn resolve_drag(
    proposed: Vec2,
    dragged_radius: f32,
    other_center: Vec2,
    other_radius: f32,
    fallback: Vec2,
) -> Vec2 {
    let delta = proposed - other_center;
    let limit = dragged_radius + other_radius;

    if delta.length() < limit {
        let push_dir = safe_direction(delta, fallback);
        other_center + push_dir * limit
    } else {
        proposed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_intersection_head_on() {
        let ray = Ray::new(Vec2::ZERO, Vec2::X);
        let t = ray_circle_intersection(&ray, Vec2::new(100.0, 0.0), 10.0).unwrap();
        assert!((t - 90.0).abs() < 1e-4);
    }

    #[test]
    fn test_intersection_miss() {
        let ray = Ray::new(Vec2::ZERO, Vec2::Y);
        assert!(ray_circle_intersection(&ray, Vec2::new(100.0, 0.0), 10.0).is_none());
    }

    #[test]
    fn test_intersection_scale_aware() {
        // Non-unit direction: t is measured in direction lengths
        let ray = Ray::new(Vec2::ZERO, Vec2::new(2.0, 0.0));
        let t = ray_circle_intersection(&ray, Vec2::new(100.0, 0.0), 10.0).unwrap();
        assert!((t - 45.0).abs() < 1e-4);
        assert!((ray.at(t) - Vec2::new(90.0, 0.0)).length() < 1e-3);
    }

    #[test]
    fn test_intersection_behind_origin() {
        let ray = Ray::new(Vec2::ZERO, Vec2::NEG_X);
        let t = ray_circle_intersection(&ray, Vec2::new(100.0, 0.0), 10.0).unwrap();
        assert!(t < 0.0);
        assert!(forward_hit(&ray, Vec2::new(100.0, 0.0), 10.0).is_none());
    }

    #[test]
    fn test_intersection_tangent() {
        // Grazing ray: discriminant is exactly zero, single root at the touch point
        let ray = Ray::new(Vec2::new(0.0, 10.0), Vec2::X);
        let t = ray_circle_intersection(&ray, Vec2::new(50.0, 0.0), 10.0);
        assert_eq!(t, Some(50.0));
    }

    #[test]
    fn test_intersection_zero_direction() {
        let ray = Ray::new(Vec2::ZERO, Vec2::ZERO);
        assert!(ray_circle_intersection(&ray, Vec2::new(5.0, 0.0), 10.0).is_none());
    }

    #[test]
    fn test_resolve_drag_clamps_to_limit() {
        // Light (r=10) dragged to 40 units from occluder (r=50): clamp to 60
        let occluder = Vec2::new(400.0, 300.0);
        let proposed = Vec2::new(360.0, 300.0);
        let resolved = resolve_drag(proposed, 10.0, occluder, 50.0, Vec2::X);
        assert!((resolved - Vec2::new(340.0, 300.0)).length() < 1e-4);
        assert!((resolved.distance(occluder) - 60.0).abs() < 1e-4);
    }

    #[test]
    fn test_resolve_drag_passes_through_when_clear() {
        let proposed = Vec2::new(100.0, 100.0);
        let resolved = resolve_drag(proposed, 10.0, Vec2::new(400.0, 300.0), 50.0, Vec2::X);
        assert_eq!(resolved, proposed);
    }

    #[test]
    fn test_resolve_drag_coincident_uses_fallback() {
        let other = Vec2::new(400.0, 300.0);
        let resolved = resolve_drag(other, 10.0, other, 50.0, Vec2::new(0.0, -3.0));
        assert!((resolved - Vec2::new(400.0, 240.0)).length() < 1e-4);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(2000))]

        // Rays aimed at a point inside the circle must hit it on the boundary
        #[test]
        fn intersection_lies_on_circle(
            ox in -100.0f32..100.0,
            oy in -100.0f32..100.0,
            radius in 5.0f32..100.0,
            gap in 1.0f32..100.0,
            place_angle in 0.0f32..6.28,
            aim_fraction in 0.0f32..0.9,
            aim_angle in 0.0f32..6.28,
        ) {
            let origin = Vec2::new(ox, oy);
            let center = origin + Vec2::from_angle(place_angle) * (radius + gap);
            let target = center + Vec2::from_angle(aim_angle) * radius * aim_fraction;
            let ray = Ray::new(origin, (target - origin).normalize());

            let t = forward_hit(&ray, center, radius);
            prop_assert!(t.is_some());
            let hit = ray.at(t.unwrap());
            prop_assert!((hit.distance(center) - radius).abs() < 1e-2 * radius);

            // Reversed ray only finds the circle behind its origin
            let back = Ray::new(origin, -ray.dir);
            prop_assert!(forward_hit(&back, center, radius).is_none());
        }

        // A line passing wider than the radius never intersects
        #[test]
        fn intersection_none_when_line_misses(
            radius in 5.0f32..100.0,
            offset in 1.01f32..5.0,
            along in -50.0f32..50.0,
        ) {
            let center = Vec2::new(0.0, radius * offset);
            let ray = Ray::new(Vec2::new(along, 0.0), Vec2::X);
            prop_assert!(ray_circle_intersection(&ray, center, radius).is_none());
        }

        #[test]
        fn resolve_drag_never_overlaps(
            px in -1000.0f32..1000.0,
            py in -1000.0f32..1000.0,
            ox in -1000.0f32..1000.0,
            oy in -1000.0f32..1000.0,
            dragged_radius in 1.0f32..100.0,
            other_radius in 1.0f32..100.0,
        ) {
            let other = Vec2::new(ox, oy);
            let limit = dragged_radius + other_radius;
            let resolved = resolve_drag(Vec2::new(px, py), dragged_radius, other, other_radius, Vec2::X);
            prop_assert!(resolved.distance(other) >= limit - 1e-2);
        }

        #[test]
        fn resolve_drag_idempotent(
            px in -1000.0f32..1000.0,
            py in -1000.0f32..1000.0,
            dragged_radius in 1.0f32..100.0,
            other_radius in 1.0f32..100.0,
        ) {
            let other = Vec2::new(250.0, -40.0);
            let once = resolve_drag(Vec2::new(px, py), dragged_radius, other, other_radius, Vec2::X);
            let twice = resolve_drag(once, dragged_radius, other, other_radius, Vec2::X);
            prop_assert!(once.distance(twice) < 1e-2);
        }
    }
}
