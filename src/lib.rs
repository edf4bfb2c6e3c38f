//! Shadow Cone - an interactive 2D light/occluder visualization
//!
//! Core modules:
//! - `sim`: Scene geometry (rays, intersection, shadow cone, drag constraints, input)
//! - `renderer`: Canvas abstraction, recording canvas and WebGPU backend
//! - `settings`: Tunable scene parameters
//! - `app`: Per-frame loop tying input, simulation and drawing together

pub mod app;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use app::App;
pub use settings::{PressPrecedence, Settings, SettingsError};

use glam::Vec2;

/// Scene configuration constants (defaults for `Settings`)
pub mod consts {
    /// Window dimensions in pixels
    pub const WINDOW_WIDTH: u32 = 800;
    pub const WINDOW_HEIGHT: u32 = 600;
    pub const WINDOW_TITLE: &str = "Shadow Cone";

    /// Light ("sun") defaults
    pub const LIGHT_START: (f32, f32) = (100.0, 100.0);
    pub const LIGHT_RADIUS: f32 = 10.0;

    /// Occluder defaults
    pub const OCCLUDER_START: (f32, f32) = (400.0, 300.0);
    pub const OCCLUDER_RADIUS: f32 = 50.0;

    /// Extra grab radius around each circle when starting a drag
    pub const HIT_TEST_BUFFER: f32 = 10.0;

    /// Number of rays sampled around the light each frame
    pub const RAY_COUNT: u32 = 180;
    /// Largest ray count accepted from settings
    pub const MAX_RAY_COUNT: u32 = 10_000;
    /// Length of rays that miss the occluder (well past the canvas edge)
    pub const FAR_DISTANCE: f32 = 1000.0;
    /// Upper bound on radius/distance before asin (light touching the occluder)
    pub const MAX_SHADOW_RATIO: f32 = 0.99;
}

/// Normalize an angle to (-π, π]
///
/// Non-finite input is returned unchanged.
#[inline]
pub fn normalize_angle(angle: f32) -> f32 {
    use std::f32::consts::{PI, TAU};
    if !angle.is_finite() {
        return angle;
    }
    let wrapped = angle.rem_euclid(TAU);
    if wrapped > PI { wrapped - TAU } else { wrapped }
}

/// Convert polar (r, theta) to cartesian (x, y)
#[inline]
pub fn polar_to_cartesian(r: f32, theta: f32) -> Vec2 {
    Vec2::new(r * theta.cos(), r * theta.sin())
}

/// Convert cartesian (x, y) to polar (r, theta)
#[inline]
pub fn cartesian_to_polar(pos: Vec2) -> (f32, f32) {
    (pos.length(), pos.y.atan2(pos.x))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::f32::consts::{PI, TAU};

    #[test]
    fn test_normalize_angle_boundaries() {
        assert!((normalize_angle(PI) - PI).abs() < 1e-6);
        assert!((normalize_angle(-PI) - PI).abs() < 1e-6);
        assert!(normalize_angle(0.0).abs() < 1e-6);
        assert!((normalize_angle(3.0 * PI / 2.0) + PI / 2.0).abs() < 1e-5);
        assert!((normalize_angle(-TAU - 0.5) + 0.5).abs() < 1e-5);
    }

    #[test]
    fn test_normalize_angle_non_finite() {
        assert!(normalize_angle(f32::NAN).is_nan());
        assert_eq!(normalize_angle(f32::INFINITY), f32::INFINITY);
    }

    #[test]
    fn test_polar_round_trip() {
        let p = polar_to_cartesian(5.0, PI / 3.0);
        let (r, theta) = cartesian_to_polar(p);
        assert!((r - 5.0).abs() < 1e-5);
        assert!((theta - PI / 3.0).abs() < 1e-5);
    }

    proptest! {
        #[test]
        fn normalize_angle_in_range(theta in -1000.0f32..1000.0) {
            let n = normalize_angle(theta);
            prop_assert!(n > -PI && n <= PI, "{} -> {}", theta, n);
        }

        #[test]
        fn normalize_angle_congruent(theta in -1000.0f32..1000.0) {
            let n = normalize_angle(theta);
            let turns = (theta - n) / TAU;
            prop_assert!((turns - turns.round()).abs() < 1e-3, "{} -> {} ({} turns)", theta, n, turns);
        }
    }
}
