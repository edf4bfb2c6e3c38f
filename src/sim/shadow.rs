//! Shadow cone computation
//!
//! Rays fan out from the light at evenly spaced angles. The occluder, seen
//! from the light, subtends a cone of half-angle `asin(r / d)`; rays inside
//! that cone are clipped where they strike the occluder, rays outside run
//! out to the far distance.

use std::f32::consts::TAU;

use glam::Vec2;

use super::collision::forward_hit;
use super::geometry::{Circle, Ray};
use crate::settings::Settings;
use crate::{cartesian_to_polar, normalize_angle, polar_to_cartesian};

/// Angular extent of the occluder as seen from the light
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShadowCone {
    /// Direction from light to occluder center (radians)
    pub angle_to_occluder: f32,
    /// Half the angular width of the cone (radians)
    pub half_spread: f32,
    /// Light-to-occluder center distance
    pub distance: f32,
}

impl ShadowCone {
    /// Compute the cone cast by `occluder` from a light at `light_center`
    ///
    /// `radius / distance` is clamped to `max_ratio` so the light touching
    /// (or sitting inside) the occluder yields a wide cone instead of NaN.
    pub fn compute(light_center: Vec2, occluder: &Circle, max_ratio: f32) -> Self {
        let (distance, angle_to_occluder) = cartesian_to_polar(occluder.center - light_center);

        let ratio = if distance > 0.0 {
            (occluder.radius / distance).min(max_ratio)
        } else {
            max_ratio
        };

        Self {
            angle_to_occluder,
            half_spread: ratio.asin(),
            distance,
        }
    }

    /// Signed angular offset of `angle` from the cone axis, in (-π, π]
    #[inline]
    pub fn offset_of(&self, angle: f32) -> f32 {
        normalize_angle(angle - self.angle_to_occluder)
    }

    /// Whether a ray at `angle` falls strictly inside the cone
    #[inline]
    pub fn contains(&self, angle: f32) -> bool {
        self.offset_of(angle).abs() < self.half_spread
    }
}

/// One drawn ray, from the light to where it stops
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RaySegment {
    /// Sample angle (radians, in [0, 2π))
    pub angle: f32,
    pub start: Vec2,
    pub end: Vec2,
    /// Whether the ray was stopped by the occluder
    pub clipped: bool,
}

/// Everything computed for one frame of rays
#[derive(Debug, Clone)]
pub struct ShadowFrame {
    pub cone: ShadowCone,
    /// Segments in sample-angle order
    pub segments: Vec<RaySegment>,
}

impl ShadowFrame {
    /// Number of rays stopped by the occluder
    pub fn clipped_count(&self) -> usize {
        self.segments.iter().filter(|s| s.clipped).count()
    }
}

/// Sample angle of ray `index` out of `count`
#[inline]
pub fn sample_angle(index: u32, count: u32) -> f32 {
    index as f32 * (TAU / count as f32)
}

/// Cast `settings.ray_count` rays from the light and clip them against the occluder
pub fn cast_shadow_rays(light: &Circle, occluder: &Circle, settings: &Settings) -> ShadowFrame {
    let cone = ShadowCone::compute(light.center, occluder, settings.max_shadow_ratio);
    let far = settings.far_distance;

    let segments = (0..settings.ray_count)
        .map(|i| {
            let angle = sample_angle(i, settings.ray_count);
            let ray = Ray::new(light.center, polar_to_cartesian(1.0, angle));

            // Only rays inside the cone are tested; a miss there still draws full length
            let hit = if cone.contains(angle) {
                forward_hit(&ray, occluder.center, occluder.radius)
            } else {
                None
            };

            match hit {
                Some(t) => RaySegment {
                    angle,
                    start: ray.origin,
                    end: ray.at(t),
                    clipped: true,
                },
                None => RaySegment {
                    angle,
                    start: ray.origin,
                    end: ray.at(far),
                    clipped: false,
                },
            }
        })
        .collect();

    ShadowFrame { cone, segments }
}
